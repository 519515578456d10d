//! Data service port
//!
//! Defines the interface to the OData record store. Every entity module
//! receives one shared implementation; the adapter owns the HTTP client and
//! the bearer token.

use async_trait::async_trait;
use dataverse_domain::{EntitySet, ODataQuery, Record, RecordKey};
use serde_json::Value;
use thiserror::Error;

/// Errors reported by the data service adapter.
///
/// Remote failures keep the response body verbatim so it can be relayed
/// to the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DataServiceError {
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl DataServiceError {
    pub fn status(&self) -> Option<u16> {
        match self {
            DataServiceError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, DataServiceError::Timeout(_))
    }
}

/// Port for the record store
#[async_trait]
pub trait DataServicePort: Send + Sync {
    /// `GET {base}/{table}?{query}`; returns the `value` array.
    async fn query(&self, table: EntitySet, query: &ODataQuery)
    -> Result<Vec<Record>, DataServiceError>;

    /// `GET {base}/{table}({key})[?{query}]`; returns the single record.
    async fn retrieve(
        &self,
        table: EntitySet,
        key: &RecordKey,
        query: Option<&ODataQuery>,
    ) -> Result<Record, DataServiceError>;

    /// `GET {base}/{table}` with URL-encoded parameters and the client
    /// timeout; returns the whole response body.
    async fn query_with_params(
        &self,
        table: EntitySet,
        params: &[(String, String)],
    ) -> Result<Value, DataServiceError>;

    /// `POST {root}{endpoint}` with a JSON payload.
    async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, DataServiceError>;

    /// Replace the bearer token with a freshly acquired one.
    async fn reauthenticate(&self) -> Result<(), DataServiceError>;
}

#[cfg(test)]
pub(crate) mod mock {
    //! Scripted data service for use case tests.
    //!
    //! Requests are rendered as strings (`GET accounts?$top=5`,
    //! `GET accounts(a-1)`, `POST /api/search/v1.0/query`) and matched
    //! exactly against the scripted responses.

    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub(crate) struct MockDataService {
        requests: Mutex<Vec<String>>,
        payloads: Mutex<Vec<Value>>,
        responses: HashMap<String, Value>,
        failures: HashMap<String, DataServiceError>,
    }

    impl MockDataService {
        pub(crate) fn new() -> Self {
            Self::default()
        }

        pub(crate) fn respond(mut self, request: impl Into<String>, body: Value) -> Self {
            self.responses.insert(request.into(), body);
            self
        }

        pub(crate) fn fail(mut self, request: impl Into<String>, error: DataServiceError) -> Self {
            self.failures.insert(request.into(), error);
            self
        }

        pub(crate) fn requests(&self) -> Vec<String> {
            let mut requests = self.requests.lock().unwrap().clone();
            requests.sort();
            requests
        }

        pub(crate) fn payloads(&self) -> Vec<Value> {
            self.payloads.lock().unwrap().clone()
        }

        fn answer(&self, request: String) -> Result<Option<Value>, DataServiceError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(error) = self.failures.get(&request) {
                return Err(error.clone());
            }
            Ok(self.responses.get(&request).cloned())
        }
    }

    fn to_records(body: Value) -> Vec<Record> {
        match body {
            Value::Array(rows) => rows
                .into_iter()
                .filter_map(|row| row.as_object().cloned())
                .collect(),
            _ => Vec::new(),
        }
    }

    #[async_trait]
    impl DataServicePort for MockDataService {
        async fn query(
            &self,
            table: EntitySet,
            query: &ODataQuery,
        ) -> Result<Vec<Record>, DataServiceError> {
            let body = self.answer(format!("GET {}?{}", table, query))?;
            Ok(body.map(to_records).unwrap_or_default())
        }

        async fn retrieve(
            &self,
            table: EntitySet,
            key: &RecordKey,
            query: Option<&ODataQuery>,
        ) -> Result<Record, DataServiceError> {
            let mut request = format!("GET {}({})", table, key);
            if let Some(query) = query.filter(|q| !q.is_empty()) {
                request.push('?');
                request.push_str(&query.to_query_string());
            }
            match self.answer(request)? {
                Some(Value::Object(record)) => Ok(record),
                _ => Err(DataServiceError::Http {
                    status: 404,
                    body: "Does Not Exist".to_string(),
                }),
            }
        }

        async fn query_with_params(
            &self,
            table: EntitySet,
            params: &[(String, String)],
        ) -> Result<Value, DataServiceError> {
            let rendered = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<_>>()
                .join("&");
            let body = self.answer(format!("GET {}?{}", table, rendered))?;
            Ok(body.unwrap_or_else(|| serde_json::json!({"value": []})))
        }

        async fn post(&self, endpoint: &str, payload: &Value) -> Result<Value, DataServiceError> {
            self.payloads.lock().unwrap().push(payload.clone());
            let body = self.answer(format!("POST {}", endpoint))?;
            Ok(body.unwrap_or_else(|| serde_json::json!({})))
        }

        async fn reauthenticate(&self) -> Result<(), DataServiceError> {
            self.answer("AUTH".to_string()).map(|_| ())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        let not_found = DataServiceError::Http {
            status: 404,
            body: "Does Not Exist".into(),
        };
        assert!(not_found.is_not_found());
        assert_eq!(not_found.to_string(), "HTTP 404: Does Not Exist");

        let timeout = DataServiceError::Timeout("10s".into());
        assert!(timeout.is_timeout());
        assert_eq!(timeout.status(), None);
    }
}
