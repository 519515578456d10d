//! HTTP client for the OData data service
//!
//! One [`DataverseClient`] is constructed at startup and shared by every
//! entity module. It owns the connection pool and the bearer token; the
//! token sits behind an async `RwLock` and is only replaced by
//! [`reauthenticate`](DataServicePort::reauthenticate) (called explicitly,
//! or implicitly when the cached token has expired).

use super::auth::{AccessToken, TokenSource};
use super::error::from_reqwest;
use async_trait::async_trait;
use chrono::Utc;
use dataverse_application::{DataServiceError, DataServicePort};
use dataverse_domain::{EntitySet, ODataQuery, Record, RecordKey};
use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, info};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct DataverseClient {
    http: reqwest::Client,
    /// Web API root, e.g. `https://org.crm.dynamics.com/api/data/v9.2`
    base_url: String,
    /// Scheme + host, e.g. `https://org.crm.dynamics.com`
    root: String,
    timeout: Duration,
    token_source: Arc<dyn TokenSource>,
    token: RwLock<AccessToken>,
}

fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert("OData-MaxVersion", HeaderValue::from_static("4.0"));
    headers.insert("OData-Version", HeaderValue::from_static("4.0"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    headers.insert(
        CONTENT_TYPE,
        HeaderValue::from_static("application/json; charset=utf-8"),
    );
    headers
}

impl DataverseClient {
    /// Build a client and acquire the first token.
    pub async fn connect(
        base_url: &str,
        timeout: Duration,
        token_source: Arc<dyn TokenSource>,
    ) -> Result<Self, DataServiceError> {
        let root = origin(base_url)?;
        let token = token_source.fetch_token(&root).await?;
        info!(root = %root, source = token_source.name(), "Authenticated against data service");
        Self::with_token(base_url, timeout, token_source, token)
    }

    /// Build a client around an already acquired token.
    pub fn with_token(
        base_url: &str,
        timeout: Duration,
        token_source: Arc<dyn TokenSource>,
        token: AccessToken,
    ) -> Result<Self, DataServiceError> {
        let http = reqwest::Client::builder()
            .default_headers(default_headers())
            .build()
            .map_err(from_reqwest)?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            root: origin(base_url)?,
            timeout,
            token_source,
            token: RwLock::new(token),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// `{base}/{resource}` with the resource percent-encoded as one path segment.
    fn resource_url(&self, resource: &str) -> Result<Url, DataServiceError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            DataServiceError::Transport(format!("invalid base URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|()| {
                DataServiceError::Transport(format!(
                    "base URL '{}' cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .push(resource);
        Ok(url)
    }

    async fn bearer(&self) -> Result<String, DataServiceError> {
        {
            let token = self.token.read().await;
            if !token.is_expired_at(Utc::now()) {
                return Ok(token.secret.clone());
            }
        }
        debug!("Cached token expired, reauthenticating");
        self.reauthenticate().await?;
        Ok(self.token.read().await.secret.clone())
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, DataServiceError> {
        let started = Instant::now();
        let response = request
            .bearer_auth(self.bearer().await?)
            .send()
            .await
            .map_err(from_reqwest)?;

        let status = response.status();
        debug!(
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            url = %response.url(),
            "Data service response"
        );
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DataServiceError::Http {
                status: status.as_u16(),
                body,
            });
        }
        response.json::<Value>().await.map_err(from_reqwest)
    }
}

/// Scheme + host (+ port) of a URL, without trailing slash.
fn origin(url: &str) -> Result<String, DataServiceError> {
    let parsed = Url::parse(url)
        .map_err(|e| DataServiceError::Transport(format!("invalid base URL '{}': {}", url, e)))?;
    Ok(parsed.origin().ascii_serialization())
}

fn into_record(body: Value) -> Result<Record, DataServiceError> {
    match body {
        Value::Object(record) => Ok(record),
        other => Err(DataServiceError::Decode(format!(
            "expected a JSON object, got {}",
            other
        ))),
    }
}

fn into_records(body: Value) -> Result<Vec<Record>, DataServiceError> {
    let Value::Object(mut map) = body else {
        return Err(DataServiceError::Decode(
            "expected a JSON object".to_string(),
        ));
    };
    match map.remove("value") {
        Some(Value::Array(rows)) => rows.into_iter().map(into_record).collect(),
        _ => Err(DataServiceError::Decode(
            "response has no 'value' array".to_string(),
        )),
    }
}

#[async_trait]
impl DataServicePort for DataverseClient {
    async fn query(
        &self,
        table: EntitySet,
        query: &ODataQuery,
    ) -> Result<Vec<Record>, DataServiceError> {
        let url = self.resource_url(table.as_str())?;
        debug!(%table, %query, "GET collection");
        into_records(self.send(self.http.get(url).query(&query.params())).await?)
    }

    async fn retrieve(
        &self,
        table: EntitySet,
        key: &RecordKey,
        query: Option<&ODataQuery>,
    ) -> Result<Record, DataServiceError> {
        let url = self.resource_url(&format!("{}({})", table, key))?;
        let params = query.map(ODataQuery::params).unwrap_or_default();
        debug!(%table, %key, "GET record");
        into_record(self.send(self.http.get(url).query(&params)).await?)
    }

    async fn query_with_params(
        &self,
        table: EntitySet,
        params: &[(String, String)],
    ) -> Result<Value, DataServiceError> {
        let url = self.resource_url(table.as_str())?;
        debug!(%table, ?params, timeout_s = self.timeout.as_secs(), "GET with parameters");
        let request = self.http.get(url).query(params).timeout(self.timeout);
        self.send(request).await
    }

    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, DataServiceError> {
        let url = format!("{}{}", self.root, endpoint);
        debug!(%endpoint, "POST");
        self.send(self.http.post(url).json(payload)).await
    }

    async fn reauthenticate(&self) -> Result<(), DataServiceError> {
        let token = self.token_source.fetch_token(&self.root).await?;
        *self.token.write().await = token;
        info!(source = self.token_source.name(), "Bearer token refreshed");
        Ok(())
    }
}
