//! Fuzzy relevance search
//!
//! Delegates to the data service's search endpoint, which tolerates typos
//! and ranks by relevance. The response is returned as-is.

use super::records::UseCaseError;
use crate::ports::data_service::DataServicePort;
use dataverse_domain::EntitySet;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_SEARCH_PATH: &str = "/api/search/v1.0/query";

pub struct SearchUseCase {
    data: Arc<dyn DataServicePort>,
    search_path: String,
}

impl SearchUseCase {
    pub fn new(data: Arc<dyn DataServicePort>, search_path: impl Into<String>) -> Self {
        Self {
            data,
            search_path: search_path.into(),
        }
    }

    pub async fn search(
        &self,
        entity: EntitySet,
        search: &str,
        top: u32,
    ) -> Result<Value, UseCaseError> {
        let payload = json!({
            "search": search,
            "entities": [entity.logical_name()],
            "top": top,
            "fuzzy": true,
        });
        debug!(entity = %entity, search, top, "Fuzzy search");
        Ok(self.data.post(&self.search_path, &payload).await?)
    }
}
