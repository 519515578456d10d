//! In-memory data service for provider tests

use async_trait::async_trait;
use dataverse_application::{DataServiceError, DataServicePort};
use dataverse_domain::{EntitySet, ODataQuery, Record, RecordKey};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Records each request as a line (`GET accounts?$top=5`, `POST /api/...`)
/// and answers from a table of scripted bodies keyed by that line.
#[derive(Default)]
pub(crate) struct RecordingDataService {
    responses: HashMap<String, Result<Value, DataServiceError>>,
    requests: Mutex<Vec<String>>,
}

impl RecordingDataService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, request: &str, body: Value) -> Self {
        self.responses.insert(request.to_string(), Ok(body));
        self
    }

    pub fn fail(mut self, request: &str, error: DataServiceError) -> Self {
        self.responses.insert(request.to_string(), Err(error));
        self
    }

    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    fn answer(&self, request: String, fallback: Value) -> Result<Value, DataServiceError> {
        let response = self.responses.get(&request).cloned();
        self.requests.lock().unwrap().push(request);
        response.unwrap_or(Ok(fallback))
    }
}

fn rows(body: Value) -> Vec<Record> {
    match body {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[async_trait]
impl DataServicePort for RecordingDataService {
    async fn query(
        &self,
        table: EntitySet,
        query: &ODataQuery,
    ) -> Result<Vec<Record>, DataServiceError> {
        let request = format!("GET {}?{}", table, query.to_query_string());
        self.answer(request, json!([])).map(rows)
    }

    async fn retrieve(
        &self,
        table: EntitySet,
        key: &RecordKey,
        query: Option<&ODataQuery>,
    ) -> Result<Record, DataServiceError> {
        let mut request = format!("GET {}({})", table, key);
        if let Some(q) = query {
            request.push('?');
            request.push_str(&q.to_query_string());
        }
        match self.answer(request, Value::Null)? {
            Value::Object(record) => Ok(record),
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
        let encoded: Vec<String> = params.iter().map(|(k, v)| format!("{k}={v}")).collect();
        let request = format!("GET {}?{}", table, encoded.join("&"));
        self.answer(request, json!({"value": []}))
    }

    async fn post(&self, endpoint: &str, _payload: &Value) -> Result<Value, DataServiceError> {
        self.answer(format!("POST {endpoint}"), json!({}))
    }

    async fn reauthenticate(&self) -> Result<(), DataServiceError> {
        self.answer("AUTH".to_string(), Value::Null).map(|_| ())
    }
}
