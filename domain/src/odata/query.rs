//! OData query specification and rendering
//!
//! An [`ODataQuery`] is the ordered combination of paging, filter clauses,
//! sort, projection and aggregation. It renders as the query-string part of a
//! data service URL:
//!
//! ```text
//! $top=3&$filter=cs_accountsalesregion eq 'NAR' and statecode eq 0&$orderby=name asc
//! └─top─┘ └──────────────────filter─────────────────────────────┘ └──orderby──┘
//! ```
//!
//! Parts are always emitted in the fixed order `$top`, `$filter`, `$orderby`,
//! `$select`, `$expand`, `$apply`. Absent parts contribute nothing, so there
//! are never dangling `&` separators.

use super::aggregate::Aggregation;
use super::filter::{FilterClause, join_clauses};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort specification (`$orderby=<field> <direction>`).
///
/// The direction is kept verbatim. Callers document it as `asc` or `desc`
/// but anything else is forwarded and left for the data service to reject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: String,
}

impl fmt::Display for OrderBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.direction)
    }
}

/// Builder for an OData query string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ODataQuery {
    top: Option<u32>,
    filters: Vec<FilterClause>,
    order_by: Option<OrderBy>,
    select: Vec<String>,
    expand: Option<String>,
    apply: Option<String>,
}

impl ODataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the result set (`$top=N`)
    pub fn top(mut self, n: u32) -> Self {
        self.top = Some(n);
        self
    }

    /// Append a mandatory clause
    pub fn filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }

    /// Append a clause only when the source parameter was supplied.
    ///
    /// Presence is what counts: `Some(0)` still produces a clause.
    pub fn filter_if<T>(mut self, value: Option<T>, clause: impl FnOnce(T) -> FilterClause) -> Self {
        if let Some(value) = value {
            self.filters.push(clause(value));
        }
        self
    }

    /// Sort by `field direction` when both halves are supplied; otherwise no-op.
    pub fn order_by(mut self, field: Option<&str>, direction: Option<&str>) -> Self {
        if let (Some(field), Some(direction)) = (field, direction) {
            self.order_by = Some(OrderBy {
                field: field.to_string(),
                direction: direction.to_string(),
            });
        }
        self
    }

    /// Project columns (`$select=a,b,c`)
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(columns.into_iter().map(Into::into));
        self
    }

    /// Expand navigation properties (`$expand=...`)
    pub fn expand(mut self, expand: impl Into<String>) -> Self {
        self.expand = Some(expand.into());
        self
    }

    /// Aggregation pipeline (`$apply=...`)
    pub fn apply(mut self, aggregation: &Aggregation) -> Self {
        self.apply = Some(aggregation.to_string());
        self
    }

    pub fn filters(&self) -> &[FilterClause] {
        &self.filters
    }

    pub fn sort(&self) -> Option<&OrderBy> {
        self.order_by.as_ref()
    }

    pub fn top_value(&self) -> Option<u32> {
        self.top
    }

    pub fn is_empty(&self) -> bool {
        self.params().is_empty()
    }

    /// Ordered `(name, value)` pairs, e.g. for a parameterized request.
    pub fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        if let Some(top) = self.top {
            params.push(("$top".to_string(), top.to_string()));
        }
        if let Some(filter) = join_clauses(&self.filters) {
            params.push(("$filter".to_string(), filter));
        }
        if let Some(order_by) = &self.order_by {
            params.push(("$orderby".to_string(), order_by.to_string()));
        }
        if !self.select.is_empty() {
            params.push(("$select".to_string(), self.select.join(",")));
        }
        if let Some(expand) = &self.expand {
            params.push(("$expand".to_string(), expand.clone()));
        }
        if let Some(apply) = &self.apply {
            params.push(("$apply".to_string(), apply.clone()));
        }
        params
    }

    /// Render the query string (without a leading `?`).
    pub fn to_query_string(&self) -> String {
        self.params()
            .into_iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl fmt::Display for ODataQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}
