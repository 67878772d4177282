use std::{
    collections::{BTreeSet, HashMap, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use test_utils::{builder::TestBuilder, factory};

use crate::{
    error::{ownership::OwnershipError, AppError},
    model::discord::MemberHandle,
    service::{
        gateway::GuildGateway,
        ownership::{OwnerEntry, OwnershipApi, OwnershipClient, WalletTokensPage},
        user_lock::UserLocks,
        verification_queue::VerificationQueue,
    },
};

mod role_assignment;
mod verification_queue;

const GUILD_ID: u64 = 1000;
const COLLECTION: &str = "0xcollection";
const BRONZE: u64 = 111;
const SILVER: u64 = 222;
const GOLD: u64 = 333;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GatewayCall {
    Add { user_id: u64, role_id: u64 },
    Remove { user_id: u64, role_id: u64 },
}

/// Wallet address `n` in canonical lower-case form.
fn wallet(n: u64) -> String {
    format!("0x{:040x}", n)
}

/// In-memory gateway that records every role call in order.
#[derive(Default)]
struct FakeGateway {
    members: HashSet<(u64, u64)>,
    failing_roles: HashSet<u64>,
    delay: Option<Duration>,
    calls: Mutex<Vec<GatewayCall>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl FakeGateway {
    fn with_member(mut self, guild_id: u64, user_id: u64) -> Self {
        self.members.insert((guild_id, user_id));
        self
    }

    /// Makes every add or remove of `role_id` report failure.
    fn with_failing_role(mut self, role_id: u64) -> Self {
        self.failing_roles.insert(role_id);
        self
    }

    /// Makes every role call take `delay` before it completes.
    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Roles a user holds in Discord after replaying every successful call.
    fn held_roles(&self, user_id: u64) -> BTreeSet<u64> {
        let mut held = BTreeSet::new();
        for call in self.calls() {
            match call {
                GatewayCall::Add { user_id: user, role_id } if user == user_id => {
                    held.insert(role_id);
                }
                GatewayCall::Remove { user_id: user, role_id } if user == user_id => {
                    held.remove(&role_id);
                }
                _ => {}
            }
        }
        held
    }

    /// Largest number of role calls observed running at the same time.
    fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    async fn record(&self, call: GatewayCall, role_id: u64) -> bool {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.calls.lock().unwrap().push(call);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        !self.failing_roles.contains(&role_id)
    }

    fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }
}

#[async_trait]
impl GuildGateway for FakeGateway {
    async fn resolve_member(&self, guild_id: u64, user_id: u64) -> Option<MemberHandle> {
        self.members
            .contains(&(guild_id, user_id))
            .then_some(MemberHandle { guild_id, user_id })
    }

    async fn add_role(&self, member: &MemberHandle, role_id: u64) -> bool {
        let call = GatewayCall::Add {
            user_id: member.user_id,
            role_id,
        };
        self.record(call, role_id).await
    }

    async fn remove_role(&self, member: &MemberHandle, role_id: u64) -> bool {
        let call = GatewayCall::Remove {
            user_id: member.user_id,
            role_id,
        };
        self.record(call, role_id).await
    }
}

/// Scripted ownership API recording the requests it receives.
#[derive(Default)]
struct FakeOwnershipApi {
    count_pages: Mutex<HashMap<String, Vec<u64>>>,
    failing_pages: Mutex<HashSet<(String, usize)>>,
    owners: Mutex<Vec<OwnerEntry>>,
    failing_offset: Mutex<Option<u64>>,
    count_calls: Mutex<Vec<String>>,
    page_calls: Mutex<Vec<u64>>,
}

impl FakeOwnershipApi {
    fn set_count(&self, wallet: &str, count: u64) {
        self.set_count_pages(wallet, &[count]);
    }

    /// Splits a wallet's tokens over several continuation pages.
    fn set_count_pages(&self, wallet: &str, pages: &[u64]) {
        self.count_pages
            .lock()
            .unwrap()
            .insert(wallet.to_string(), pages.to_vec());
    }

    fn fail_wallet(&self, wallet: &str) {
        self.fail_wallet_page(wallet, 0);
    }

    fn fail_wallet_page(&self, wallet: &str, page: usize) {
        self.failing_pages
            .lock()
            .unwrap()
            .insert((wallet.to_string(), page));
    }

    fn set_owners(&self, owners: &[(&str, u64)]) {
        *self.owners.lock().unwrap() = owners
            .iter()
            .map(|(address, token_count)| OwnerEntry {
                address: address.to_string(),
                token_count: *token_count,
            })
            .collect();
    }

    fn fail_page_at(&self, offset: u64) {
        *self.failing_offset.lock().unwrap() = Some(offset);
    }

    fn count_calls(&self) -> Vec<String> {
        self.count_calls.lock().unwrap().clone()
    }

    fn page_calls(&self) -> Vec<u64> {
        self.page_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl OwnershipApi for FakeOwnershipApi {
    async fn wallet_tokens_page(
        &self,
        wallet: &str,
        _collection: &str,
        continuation: Option<&str>,
    ) -> Result<WalletTokensPage, OwnershipError> {
        self.count_calls.lock().unwrap().push(wallet.to_string());

        let page: usize = continuation.map_or(0, |cursor| cursor.parse().unwrap());

        if self
            .failing_pages
            .lock()
            .unwrap()
            .contains(&(wallet.to_string(), page))
        {
            return Err(OwnershipError::Status {
                url: format!("https://ownership.test/users/{}/tokens", wallet),
                status: 500,
            });
        }

        let pages = self
            .count_pages
            .lock()
            .unwrap()
            .get(wallet)
            .cloned()
            .unwrap_or_default();

        Ok(WalletTokensPage {
            token_count: pages.get(page).copied().unwrap_or(0),
            continuation: (page + 1 < pages.len()).then(|| (page + 1).to_string()),
        })
    }

    async fn owners_page(
        &self,
        _collection: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnerEntry>, OwnershipError> {
        self.page_calls.lock().unwrap().push(offset);

        if *self.failing_offset.lock().unwrap() == Some(offset) {
            return Err(OwnershipError::Status {
                url: "https://ownership.test/owners".to_string(),
                status: 429,
            });
        }

        Ok(self
            .owners
            .lock()
            .unwrap()
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }
}

fn ownership_client(api: &Arc<FakeOwnershipApi>, page_size: u64) -> OwnershipClient {
    OwnershipClient::new(api.clone(), page_size, Duration::ZERO)
}

async fn started_queue(api: &Arc<FakeOwnershipApi>) -> VerificationQueue {
    let queue = VerificationQueue::new(Arc::new(ownership_client(api, 500)), Duration::ZERO);
    queue.start().await;
    queue
}

/// Configures `GUILD_ID` with tiers 1-4 Bronze, 5-9 Silver and 10+ Gold.
async fn create_tiered_config(db: &DatabaseConnection) -> Result<(), AppError> {
    factory::verification_config::VerificationConfigFactory::new(db, GUILD_ID)
        .collection_address(COLLECTION)
        .tier(1, Some(4), BRONZE)
        .tier(5, Some(9), SILVER)
        .tier(10, None, GOLD)
        .build()
        .await?;

    Ok(())
}
