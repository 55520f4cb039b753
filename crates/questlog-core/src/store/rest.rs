//! PostgREST-style HTTP table client.
//!
//! ```text
//! GET    {base}/rest/v1/{table}?select=*&order=id.desc
//! POST   {base}/rest/v1/{table}            (Prefer: return=representation)
//! DELETE {base}/rest/v1/{table}?id=eq.{id}
//! ```

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use tracing::debug;
use url::Url;

use super::TaskStore;
use crate::error::{ConfigError, CoreError, StoreError};
use crate::storage::StoreConfig;
use crate::task::{NewTask, Task};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    table_url: Url,
    api_key: Option<String>,
}

impl RestStore {
    pub fn new(base_url: &str, table: &str, api_key: Option<String>) -> Result<Self, StoreError> {
        let base = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        let table_url = base.join(&format!("rest/v1/{table}"))?;
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            table_url,
            api_key: api_key.filter(|k| !k.is_empty()),
        })
    }

    /// Build from the `[store]` config section.
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        if config.url.trim().is_empty() {
            return Err(ConfigError::MissingKey("store.url".into()).into());
        }
        Ok(Self::new(&config.url, &config.table, config.api_key.clone())?)
    }

    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.api_key {
            Some(key) => builder.header("apikey", key).bearer_auth(key),
            None => builder,
        }
    }

    fn url_with(&self, pairs: &[(&str, &str)]) -> Url {
        let mut url = self.table_url.clone();
        {
            let mut query = url.query_pairs_mut();
            for (k, v) in pairs {
                query.append_pair(k, v);
            }
        }
        url
    }
}

/// Turn non-success statuses into [`StoreError::Rejected`].
async fn check(resp: Response) -> Result<Response, StoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let text = resp.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_owned))
        .unwrap_or(text);
    Err(StoreError::Rejected {
        status: status.as_u16(),
        message,
    })
}

impl TaskStore for RestStore {
    async fn list_tasks(&self) -> Result<Vec<Task>, StoreError> {
        let url = self.url_with(&[("select", "*"), ("order", "id.desc")]);
        debug!(%url, "listing tasks");
        let resp = check(self.request(Method::GET, url).send().await?).await?;
        Ok(resp.json().await?)
    }

    async fn insert_task(&self, task: &NewTask) -> Result<Task, StoreError> {
        let resp = self
            .request(Method::POST, self.table_url.clone())
            .header("Prefer", "return=representation")
            .json(&[task])
            .send()
            .await?;
        let created: Vec<Task> = check(resp).await?.json().await?;
        created
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Malformed("insert returned no rows".into()))
    }

    async fn delete_task(&self, id: i64) -> Result<(), StoreError> {
        let filter = format!("eq.{id}");
        let url = self.url_with(&[("id", filter.as_str())]);
        debug!(%url, "deleting task");
        check(self.request(Method::DELETE, url).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_url_tolerates_trailing_slash() {
        let a = RestStore::new("https://example.test", "tasks", None).unwrap();
        let b = RestStore::new("https://example.test/", "tasks", None).unwrap();
        assert_eq!(a.table_url().as_str(), "https://example.test/rest/v1/tasks");
        assert_eq!(a.table_url(), b.table_url());
    }

    #[test]
    fn empty_url_in_config_is_missing_key() {
        let config = StoreConfig::default();
        let err = RestStore::from_config(&config).unwrap_err();
        assert!(err.to_string().contains("store.url"));
    }

    #[test]
    fn delete_filter_is_encoded_as_postgrest_eq() {
        let store = RestStore::new("https://example.test", "tasks", None).unwrap();
        let url = store.url_with(&[("id", "eq.12")]);
        assert_eq!(url.query(), Some("id=eq.12"));
    }
}
