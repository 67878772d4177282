//! NFT ownership lookups.
//!
//! Split in two layers:
//!
//! - `OwnershipApi` performs exactly one upstream request per call and reports failures
//!   as `OwnershipError`. `ReservoirApi` is the HTTP implementation.
//! - `OwnershipClient` applies the lookup policy on top of any `OwnershipApi`: failures
//!   degrade to zero or to a partial listing and are logged, never raised, so the
//!   verification worker and reconciliation passes keep running through upstream outages.

pub mod reservoir;

use std::{collections::HashMap, sync::Arc, time::Duration};

use async_trait::async_trait;

use crate::{
    error::ownership::OwnershipError, model::holder::HolderSnapshot,
    util::parse::normalize_wallet,
};

pub use reservoir::ReservoirApi;

/// One page of a wallet's tokens in a collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WalletTokensPage {
    /// Tokens held across the entries of this page.
    pub token_count: u64,
    /// Cursor for the next page, `None` on the last page.
    pub continuation: Option<String>,
}

/// One row of a collection's holder listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerEntry {
    pub address: String,
    pub token_count: u64,
}

#[async_trait]
pub trait OwnershipApi: Send + Sync {
    /// Fetches one page of the tokens `wallet` holds in `collection`.
    ///
    /// # Arguments
    /// - `wallet` - Wallet address
    /// - `collection` - Collection contract address
    /// - `continuation` - Cursor returned by the previous page, `None` for the first
    ///
    /// An empty token list is a page with a zero count, not an error.
    async fn wallet_tokens_page(
        &self,
        wallet: &str,
        collection: &str,
        continuation: Option<&str>,
    ) -> Result<WalletTokensPage, OwnershipError>;

    /// Fetches one page of a collection's holders.
    ///
    /// # Arguments
    /// - `collection` - Collection contract address
    /// - `offset` - Number of holders to skip
    /// - `limit` - Maximum number of holders to return
    async fn owners_page(
        &self,
        collection: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnerEntry>, OwnershipError>;
}

/// Ownership lookups with the degrade-on-failure policy applied.
pub struct OwnershipClient {
    api: Arc<dyn OwnershipApi>,
    page_size: u64,
    page_delay: Duration,
}

impl OwnershipClient {
    /// Creates a client over an ownership API.
    ///
    /// # Arguments
    /// - `api` - Raw API implementation
    /// - `page_size` - Holders requested per listing page (at least 1)
    /// - `page_delay` - Fixed pause between consecutive listing pages
    pub fn new(api: Arc<dyn OwnershipApi>, page_size: u64, page_delay: Duration) -> Self {
        Self {
            api,
            page_size: page_size.max(1),
            page_delay,
        }
    }

    /// Returns how many tokens of `collection` the wallet holds.
    ///
    /// Follows the listing's continuation cursor until the last page. Any request
    /// failure, including one on a later page, is logged and reported as `0`.
    pub async fn get_ownership_count(&self, wallet: &str, collection: &str) -> u64 {
        match self.count_wallet_tokens(wallet, collection).await {
            Ok(0) => {
                tracing::warn!(
                    "Wallet {} does not own any tokens in collection {}",
                    wallet,
                    collection
                );
                0
            }
            Ok(count) => {
                tracing::info!(
                    "Wallet {} owns {} tokens in collection {}",
                    wallet,
                    count,
                    collection
                );
                count
            }
            Err(e) => {
                tracing::error!("Error verifying wallet {}: {}", wallet, e);
                0
            }
        }
    }

    async fn count_wallet_tokens(
        &self,
        wallet: &str,
        collection: &str,
    ) -> Result<u64, OwnershipError> {
        let mut total = 0;
        let mut continuation: Option<String> = None;

        loop {
            let page = self
                .api
                .wallet_tokens_page(wallet, collection, continuation.as_deref())
                .await?;
            total += page.token_count;

            match page.continuation {
                // A repeated cursor would loop forever.
                Some(next) if !next.is_empty() && continuation.as_deref() != Some(next.as_str()) => {
                    continuation = Some(next);
                }
                _ => return Ok(total),
            }
        }
    }

    /// Lists every holder of a collection.
    ///
    /// Requests pages of `page_size` holders, pausing `page_delay` between pages, until a
    /// page comes back shorter than `page_size`. A page of exactly `page_size` entries
    /// always triggers another request. Wallets are lower-cased and entries with a zero
    /// count are dropped.
    ///
    /// A failed page stops the listing without retrying; the holders gathered so far are
    /// returned with `complete == false`.
    pub async fn get_all_holders(&self, collection: &str) -> HolderSnapshot {
        let mut holders = HashMap::new();
        let mut offset = 0;

        let complete = loop {
            let page = match self.api.owners_page(collection, offset, self.page_size).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::error!(
                        "Error fetching owners of {} at offset {}: {}",
                        collection,
                        offset,
                        e
                    );
                    break false;
                }
            };

            let page_len = page.len() as u64;
            let mut new_holders = 0;
            for entry in page {
                let wallet = normalize_wallet(&entry.address);
                if !wallet.is_empty() && entry.token_count > 0 {
                    holders.insert(wallet, entry.token_count);
                    new_holders += 1;
                }
            }

            if page_len < self.page_size {
                tracing::info!("End of data reached for collection {}", collection);
                break true;
            }

            offset += self.page_size;
            tracing::debug!(
                "Processed holder page | New holders: {} | Total: {}",
                new_holders,
                holders.len()
            );

            tokio::time::sleep(self.page_delay).await;
        };

        if holders.is_empty() {
            tracing::warn!("No holders found for collection {}", collection);
        } else {
            tracing::info!(
                "Fetched {} holders for collection {}",
                holders.len(),
                collection
            );
        }

        HolderSnapshot { holders, complete }
    }
}
