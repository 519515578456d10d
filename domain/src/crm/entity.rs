//! Entity sets exposed by the data service

use serde::{Deserialize, Serialize};
use std::fmt;

/// A table (entity set) on the data service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntitySet {
    Accounts,
    Opportunities,
    Products,
    Leads,
    SalesOrders,
    Quotes,
    SystemUsers,
    BusinessUnits,
    Contacts,
    Teams,
    Invoices,
    Competitors,
}

impl EntitySet {
    /// URL segment of the entity set (`/accounts`, `/salesorders`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            EntitySet::Accounts => "accounts",
            EntitySet::Opportunities => "opportunities",
            EntitySet::Products => "products",
            EntitySet::Leads => "leads",
            EntitySet::SalesOrders => "salesorders",
            EntitySet::Quotes => "quotes",
            EntitySet::SystemUsers => "systemusers",
            EntitySet::BusinessUnits => "businessunits",
            EntitySet::Contacts => "contacts",
            EntitySet::Teams => "teams",
            EntitySet::Invoices => "invoices",
            EntitySet::Competitors => "competitors",
        }
    }

    /// Singular logical name, as the search endpoint expects it.
    pub fn logical_name(&self) -> &'static str {
        match self {
            EntitySet::Accounts => "account",
            EntitySet::Opportunities => "opportunity",
            EntitySet::Products => "product",
            EntitySet::Leads => "lead",
            EntitySet::SalesOrders => "salesorder",
            EntitySet::Quotes => "quote",
            EntitySet::SystemUsers => "systemuser",
            EntitySet::BusinessUnits => "businessunit",
            EntitySet::Contacts => "contact",
            EntitySet::Teams => "team",
            EntitySet::Invoices => "invoice",
            EntitySet::Competitors => "competitor",
        }
    }
}

impl fmt::Display for EntitySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
