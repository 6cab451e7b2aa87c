use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    Ledger,
    error::LedgerError,
    types::{Account, AccountList, CreateAccountRequest, IncrementUsageRequest, RecordList, UsageRecord},
};

/// Async HTTP client for an external ledger service
#[derive(Clone)]
pub struct RemoteLedger {
    http: reqwest::Client,
    base_url: Url,
    service_api_key: SecretString,
}

impl RemoteLedger {
    /// Create a new remote ledger client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built
    pub fn new(base_url: Url, service_api_key: SecretString, timeout: Duration) -> Result<Self, LedgerError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LedgerError::Request)?;

        Ok(Self {
            http,
            base_url,
            service_api_key,
        })
    }

    /// Resolve `segments` below the base URL, percent-encoding each one
    fn endpoint(&self, segments: &[&str]) -> Result<Url, LedgerError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| LedgerError::Api {
                status: 0,
                message: format!("invalid ledger base URL: {}", self.base_url),
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<Response, LedgerError> {
        Ok(self
            .http
            .get(url)
            .header("x-service-api-key", self.service_api_key.expose_secret())
            .send()
            .await?)
    }

    async fn post<B: serde::Serialize + Sync>(&self, url: Url, body: &B) -> Result<Response, LedgerError> {
        Ok(self
            .http
            .post(url)
            .header("x-service-api-key", self.service_api_key.expose_secret())
            .json(body)
            .send()
            .await?)
    }
}

/// Decode a success body or turn the response into an API error
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, LedgerError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        Err(api_error(response).await)
    }
}

async fn api_error(response: Response) -> LedgerError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_default();
    LedgerError::Api { status, message }
}

#[async_trait]
impl Ledger for RemoteLedger {
    /// GET `/accounts/:key`
    async fn lookup(&self, account_key: &str) -> Result<Option<Account>, LedgerError> {
        let url = self.endpoint(&["accounts", account_key])?;
        let response = self.get(url).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        decode(response).await.map(Some)
    }

    /// POST `/accounts/:key/usage`
    async fn increment_usage(&self, account_key: &str, tokens: u64) -> Result<Account, LedgerError> {
        let url = self.endpoint(&["accounts", account_key, "usage"])?;
        let response = self.post(url, &IncrementUsageRequest { tokens }).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(LedgerError::AccountNotFound {
                account_key: account_key.to_owned(),
            });
        }

        decode(response).await
    }

    /// POST `/accounts/:key/records`
    async fn append_record(&self, record: &UsageRecord) -> Result<(), LedgerError> {
        let url = self.endpoint(&["accounts", &record.account_key, "records"])?;
        let response = self.post(url, record).await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(api_error(response).await)
        }
    }

    /// POST `/accounts`
    async fn create_account(&self, plan: &str, usage_limit: u64) -> Result<Account, LedgerError> {
        let url = self.endpoint(&["accounts"])?;
        let body = CreateAccountRequest {
            plan: plan.to_owned(),
            usage_limit,
        };

        decode(self.post(url, &body).await?).await
    }

    /// GET `/accounts`
    async fn list_accounts(&self) -> Result<Vec<Account>, LedgerError> {
        let url = self.endpoint(&["accounts"])?;
        let list: AccountList = decode(self.get(url).await?).await?;
        Ok(list.accounts)
    }

    /// GET `/accounts/:key/records`
    async fn records(&self, account_key: &str) -> Result<Vec<UsageRecord>, LedgerError> {
        let url = self.endpoint(&["accounts", account_key, "records"])?;
        let list: RecordList = decode(self.get(url).await?).await?;
        Ok(list.records)
    }
}

impl std::fmt::Debug for RemoteLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteLedger")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}
