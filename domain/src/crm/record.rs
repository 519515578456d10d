//! Records and record keys
//!
//! A record is whatever the data service returns for one row. Its shape is
//! owned by the remote schema, so it stays an untyped JSON object.

use crate::odata::quote;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One row from the data service.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Column names of a record, in the order the data service returned them.
pub fn field_names(record: &Record) -> Vec<String> {
    record.keys().cloned().collect()
}

/// Key used in a point lookup: `table(<key>)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKey {
    /// Primary id (GUID)
    Id(String),
    /// Alternate key, e.g. `ordernumber='ORD-01001'`
    Alternate { field: String, value: String },
}

impl RecordKey {
    pub fn id(id: impl Into<String>) -> Self {
        Self::Id(id.into())
    }

    pub fn alternate(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Alternate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordKey::Id(id) => f.write_str(id),
            RecordKey::Alternate { field, value } => write!(f, "{}={}", field, quote(value)),
        }
    }
}
