//! Per-entity filter assembly
//!
//! Each list operation takes an input struct of named optional fields. Every
//! supplied field maps to exactly one [`FilterClause`] through a fixed
//! mapping, and clauses are appended in field-declaration order so the
//! rendered `$filter` is deterministic.
//!
//! Status codes are zero-based and entity-specific; they are forwarded
//! without local validation.
//!
//! | Entity | `statecode` |
//! |--------|-------------|
//! | account | 0 = active, 1 = inactive |
//! | opportunity | 0 = open, 1 = won, 2 = lost |
//! | product | 0 = active, 1 = retired, 2 = draft, 3 = under revision |
//! | sales order | 0 = active, 1 = submitted, 2 = cancelled, 3 = fulfilled, 4 = invoiced |

use super::record::RecordKey;
use crate::core::error::DomainError;
use crate::odata::{FilterClause, ODataQuery};
use serde::{Deserialize, Serialize};

/// Result cap for list operations when the caller gives none
pub const DEFAULT_TOP: u32 = 5;

/// Result cap for fuzzy search when the caller gives none
pub const DEFAULT_SEARCH_TOP: u32 = 10;

/// Column names used by the filter mappings
pub mod fields {
    pub const STATE_CODE: &str = "statecode";
    pub const ACCOUNT_SALES_REGION: &str = "cs_accountsalesregion";
    pub const OWNING_BUSINESS_UNIT: &str = "_owningbusinessunit_value";
    pub const PARENT_ACCOUNT: &str = "_parentaccountid_value";
    pub const CUSTOMER: &str = "_customerid_value";
    pub const OWNER: &str = "_ownerid_value";
    pub const PARENT_SYSTEM_USER: &str = "_parentsystemuserid_value";
    pub const FULL_NAME: &str = "fullname";
    pub const ORDER_NUMBER: &str = "ordernumber";
    pub const ESTIMATED_VALUE: &str = "estimatedvalue";
    pub const ACTUAL_VALUE: &str = "actualvalue";
}

/// Treat empty strings like absent parameters.
fn supplied(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

/// Inputs of `list_accounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListAccountsFilter {
    pub top: u32,
    /// Sales region code: NAR, CALA, MEA, Europe or APAC
    pub region: Option<String>,
    /// 0 = active, 1 = inactive
    pub status: Option<i64>,
    /// GUID of the owning business unit
    pub business_unit_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl Default for ListAccountsFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            region: None,
            status: None,
            business_unit_id: None,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl ListAccountsFilter {
    pub fn to_query(&self) -> ODataQuery {
        ODataQuery::new()
            .top(self.top)
            .filter_if(supplied(&self.region), |r| {
                FilterClause::eq_text(fields::ACCOUNT_SALES_REGION, r)
            })
            .filter_if(self.status, |s| FilterClause::eq_code(fields::STATE_CODE, s))
            .filter_if(supplied(&self.business_unit_id), |id| {
                FilterClause::eq_id(fields::OWNING_BUSINESS_UNIT, id)
            })
            .order_by(supplied(&self.sort_by), supplied(&self.sort_direction))
    }
}

/// Inputs of `list_opportunities`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListOpportunitiesFilter {
    pub top: u32,
    /// 0 = open, 1 = won, 2 = lost
    pub status: Option<i64>,
    /// GUID of the owning user
    pub owner_id: Option<String>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl Default for ListOpportunitiesFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            status: None,
            owner_id: None,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl ListOpportunitiesFilter {
    pub fn to_query(&self) -> ODataQuery {
        ODataQuery::new()
            .top(self.top)
            .filter_if(self.status, |s| FilterClause::eq_code(fields::STATE_CODE, s))
            .filter_if(supplied(&self.owner_id), |id| FilterClause::eq_id(fields::OWNER, id))
            .order_by(supplied(&self.sort_by), supplied(&self.sort_direction))
    }
}

/// Inputs of `list_products`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListProductsFilter {
    pub top: u32,
    /// 0 = active, 1 = retired, 2 = draft, 3 = under revision
    pub status: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_direction: Option<String>,
}

impl Default for ListProductsFilter {
    fn default() -> Self {
        Self {
            top: DEFAULT_TOP,
            status: None,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl ListProductsFilter {
    pub fn to_query(&self) -> ODataQuery {
        ODataQuery::new()
            .top(self.top)
            .filter_if(self.status, |s| FilterClause::eq_code(fields::STATE_CODE, s))
            .order_by(supplied(&self.sort_by), supplied(&self.sort_direction))
    }
}

/// Records whose lookup column `foreign_key` points at `parent_id`,
/// optionally narrowed by status. No `$top`: the full relationship is returned.
pub fn related_records(foreign_key: &str, parent_id: &str, status: Option<i64>) -> ODataQuery {
    ODataQuery::new()
        .filter(FilterClause::eq_id(foreign_key, parent_id))
        .filter_if(status, |s| FilterClause::eq_code(fields::STATE_CODE, s))
}

/// Key for an order lookup by id or by order number.
///
/// The id wins when both are supplied. Neither is an input error.
pub fn order_key(
    order_id: Option<&str>,
    order_number: Option<&str>,
) -> Result<RecordKey, DomainError> {
    let order_id = order_id.filter(|s| !s.is_empty());
    let order_number = order_number.filter(|s| !s.is_empty());
    match (order_id, order_number) {
        (Some(id), _) => Ok(RecordKey::id(id)),
        (None, Some(number)) => Ok(RecordKey::alternate(fields::ORDER_NUMBER, number)),
        (None, None) => Err(DomainError::missing_identifier(["order_id", "order_number"])),
    }
}
