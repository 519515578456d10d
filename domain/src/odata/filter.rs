//! Filter clauses for `$filter` expressions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Right-hand side of a comparison clause.
///
/// Text literals are rendered single-quoted; raw literals (integer codes,
/// GUIDs of lookup columns) are rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Literal {
    Text(String),
    Raw(String),
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Text(s) => write!(f, "{}", quote(s)),
            Literal::Raw(s) => f.write_str(s),
        }
    }
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// A single predicate inside `$filter` or `filter(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterClause {
    /// `field eq literal`
    Eq { field: String, value: Literal },
    /// `contains(field, 'text')`
    Contains { field: String, value: String },
}

impl FilterClause {
    /// `field eq 'value'`
    pub fn eq_text(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: Literal::Text(value.into()),
        }
    }

    /// `field eq 3`
    pub fn eq_code(field: impl Into<String>, code: i64) -> Self {
        Self::Eq {
            field: field.into(),
            value: Literal::Raw(code.to_string()),
        }
    }

    /// `_lookup_value eq 00000000-0000-0000-0000-000000000000`
    ///
    /// Lookup columns compare against bare GUIDs.
    pub fn eq_id(field: impl Into<String>, id: impl Into<String>) -> Self {
        Self::Eq {
            field: field.into(),
            value: Literal::Raw(id.into()),
        }
    }

    /// `contains(field, 'value')`
    pub fn contains(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::Contains {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn field(&self) -> &str {
        match self {
            FilterClause::Eq { field, .. } | FilterClause::Contains { field, .. } => field,
        }
    }
}

impl fmt::Display for FilterClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterClause::Eq { field, value } => write!(f, "{} eq {}", field, value),
            FilterClause::Contains { field, value } => {
                write!(f, "contains({}, {})", field, quote(value))
            }
        }
    }
}

/// Join clauses with ` and `, or `None` when there are none.
pub fn join_clauses(clauses: &[FilterClause]) -> Option<String> {
    if clauses.is_empty() {
        return None;
    }
    Some(
        clauses
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(" and "),
    )
}
