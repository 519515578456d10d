//! Aggregation pipelines for `$apply`

use super::filter::{FilterClause, join_clauses};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One aggregate expression inside `aggregate(...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateExpr {
    /// `$count as alias`
    Count { alias: String },
    /// `field with sum as alias`
    Sum { field: String, alias: String },
}

impl fmt::Display for AggregateExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateExpr::Count { alias } => write!(f, "$count as {}", alias),
            AggregateExpr::Sum { field, alias } => write!(f, "{} with sum as {}", field, alias),
        }
    }
}

/// `filter(...)/aggregate(...)` transformation sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aggregation {
    filters: Vec<FilterClause>,
    aggregates: Vec<AggregateExpr>,
}

impl Aggregation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, clause: FilterClause) -> Self {
        self.filters.push(clause);
        self
    }

    pub fn count_as(mut self, alias: impl Into<String>) -> Self {
        self.aggregates.push(AggregateExpr::Count {
            alias: alias.into(),
        });
        self
    }

    pub fn sum_as(mut self, field: impl Into<String>, alias: impl Into<String>) -> Self {
        self.aggregates.push(AggregateExpr::Sum {
            field: field.into(),
            alias: alias.into(),
        });
        self
    }

    /// Aliases produced by this aggregation, in declaration order.
    pub fn aliases(&self) -> Vec<&str> {
        self.aggregates
            .iter()
            .map(|a| match a {
                AggregateExpr::Count { alias } | AggregateExpr::Sum { alias, .. } => alias.as_str(),
            })
            .collect()
    }
}

impl fmt::Display for Aggregation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = Vec::new();
        if let Some(filter) = join_clauses(&self.filters) {
            steps.push(format!("filter({})", filter));
        }
        if !self.aggregates.is_empty() {
            let exprs = self
                .aggregates
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            steps.push(format!("aggregate({})", exprs));
        }
        f.write_str(&steps.join("/"))
    }
}
