//! Reservoir HTTP implementation of `OwnershipApi`.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize};
use url::Url;

use crate::{
    error::ownership::OwnershipError,
    service::ownership::{OwnerEntry, OwnershipApi, WalletTokensPage},
};

/// Tokens requested per wallet page; the endpoint's maximum.
const WALLET_TOKENS_LIMIT: &str = "200";

#[derive(Deserialize)]
struct UserTokensResponse {
    #[serde(default)]
    tokens: Vec<UserToken>,
    #[serde(default)]
    continuation: Option<String>,
}

#[derive(Deserialize)]
struct UserToken {
    #[serde(default)]
    ownership: Option<Ownership>,
}

#[derive(Deserialize)]
struct OwnersResponse {
    #[serde(default)]
    owners: Vec<Owner>,
}

#[derive(Deserialize)]
struct Owner {
    #[serde(default)]
    address: String,
    #[serde(default)]
    ownership: Option<Ownership>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Ownership {
    #[serde(default)]
    token_count: Option<serde_json::Value>,
}

impl UserTokensResponse {
    /// ERC-1155 entries carry a per-token balance; ERC-721 entries count once.
    fn token_count(&self) -> u64 {
        self.tokens
            .iter()
            .map(|token| {
                token
                    .ownership
                    .as_ref()
                    .and_then(Ownership::token_count)
                    .unwrap_or(1)
            })
            .sum()
    }
}

impl Ownership {
    /// Reads `tokenCount`, which the API sends either as a string or a number.
    fn token_count(&self) -> Option<u64> {
        match self.token_count.as_ref()? {
            serde_json::Value::String(raw) => raw.trim().parse().ok(),
            serde_json::Value::Number(raw) => raw.as_u64(),
            _ => None,
        }
    }
}

/// Reservoir API client authenticated with a bearer token.
pub struct ReservoirApi {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl ReservoirApi {
    /// Creates a client for the given API root, e.g. `https://api.reservoir.tools`.
    pub fn new(http: reqwest::Client, api_key: String, base_url: String) -> Self {
        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> Result<Url, OwnershipError> {
        Ok(Url::parse(&format!("{}/{}", self.base_url, path))?)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, OwnershipError> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(&self.api_key)
            .query(query)
            .send()
            .await
            .map_err(|source| OwnershipError::Request {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OwnershipError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|source| OwnershipError::Request {
                url: url.to_string(),
                source,
            })
    }
}

#[async_trait]
impl OwnershipApi for ReservoirApi {
    async fn wallet_tokens_page(
        &self,
        wallet: &str,
        collection: &str,
        continuation: Option<&str>,
    ) -> Result<WalletTokensPage, OwnershipError> {
        let url = self.endpoint(&format!("users/{}/tokens/v10", wallet))?;

        let mut query = vec![
            ("collection", collection.to_string()),
            ("limit", WALLET_TOKENS_LIMIT.to_string()),
        ];
        if let Some(continuation) = continuation {
            query.push(("continuation", continuation.to_string()));
        }

        let body: UserTokensResponse = self.get_json(url, &query).await?;

        Ok(WalletTokensPage {
            token_count: body.token_count(),
            continuation: body.continuation,
        })
    }

    async fn owners_page(
        &self,
        collection: &str,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<OwnerEntry>, OwnershipError> {
        let url = self.endpoint("owners/v2")?;
        let body: OwnersResponse = self
            .get_json(
                url,
                &[
                    ("collection", collection.to_string()),
                    ("limit", limit.to_string()),
                    ("offset", offset.to_string()),
                ],
            )
            .await?;

        Ok(body
            .owners
            .into_iter()
            .map(|owner| {
                let token_count = owner
                    .ownership
                    .as_ref()
                    .and_then(Ownership::token_count)
                    .unwrap_or(0);
                OwnerEntry {
                    address: owner.address,
                    token_count,
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_owner_counts_from_strings_and_numbers() {
        let body: OwnersResponse = serde_json::from_value(serde_json::json!({
            "owners": [
                { "address": "0xAAA", "ownership": { "tokenCount": "3" } },
                { "address": "0xbbb", "ownership": { "tokenCount": 2 } },
                { "address": "0xccc", "ownership": { "tokenCount": "many" } },
                { "address": "0xddd" }
            ]
        }))
        .unwrap();

        let counts: Vec<Option<u64>> = body
            .owners
            .iter()
            .map(|owner| owner.ownership.as_ref().and_then(Ownership::token_count))
            .collect();

        assert_eq!(counts, vec![Some(3), Some(2), None, None]);
    }

    #[test]
    fn missing_tokens_field_means_no_tokens() {
        let body: UserTokensResponse = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(body.token_count(), 0);
        assert!(body.continuation.is_none());
    }

    #[test]
    fn sums_token_balances_and_keeps_cursor() {
        let body: UserTokensResponse = serde_json::from_value(serde_json::json!({
            "tokens": [
                { "ownership": { "tokenCount": "4" } },
                { "ownership": {} },
                {}
            ],
            "continuation": "abc"
        }))
        .unwrap();

        assert_eq!(body.token_count(), 6);
        assert_eq!(body.continuation.as_deref(), Some("abc"));
    }

    #[test]
    fn builds_endpoint_without_double_slash() {
        let api = ReservoirApi::new(
            reqwest::Client::new(),
            "key".to_string(),
            "https://api.reservoir.tools/".to_string(),
        );

        assert_eq!(
            api.endpoint("owners/v2").unwrap().as_str(),
            "https://api.reservoir.tools/owners/v2"
        );
    }
}
