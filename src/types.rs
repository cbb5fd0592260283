//! Core types for search queries and the common result model.
//!
//! Both backend query modes normalise into [`SearchResults`]; the renderer
//! never sees the raw wire shapes. Wire-facing structs use camelCase serde
//! renames matching the HTTP contracts.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::SearchConfig;

/// Which backend query mode a search runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContext {
    /// Universal search across customers and their contacts.
    Customers,
    /// Typo-tolerant fuzzy search over leads.
    Leads,
}

impl SearchContext {
    /// Returns the wire name of this context, as sent in query strings.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Customers => "customers",
            Self::Leads => "leads",
        }
    }
}

impl fmt::Display for SearchContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Immutable signature of one logical search.
///
/// Two queries are equal iff all fields are equal; that equality is the
/// result-cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Query {
    /// The (trimmed) search text.
    pub text: String,
    /// Whether contact results are requested alongside customers.
    pub include_contacts: bool,
    /// Whether inactive records are included.
    pub include_inactive: bool,
    /// Maximum number of results requested from the backend.
    pub limit: usize,
    /// Which backend query mode to use.
    pub context: SearchContext,
}

impl Query {
    /// Builds the signature for `text` under the given configuration.
    pub fn from_config(text: impl Into<String>, config: &SearchConfig) -> Self {
        Self {
            text: text.into(),
            include_contacts: config.include_contacts,
            include_inactive: config.include_inactive,
            limit: config.limit,
            context: config.context,
        }
    }
}

/// Which kind of record a [`ResultEntry`] wraps. Wire field name: `type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Customer,
    Contact,
}

/// One ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry<T> {
    /// Record kind, serialised as `type` on the wire.
    #[serde(rename = "type")]
    pub kind: EntryKind,
    /// Backend identifier of the matched record.
    pub id: String,
    /// The matched record itself.
    pub data: T,
    /// Backend-supplied 0–100 ranking of how well this record matches.
    pub relevance_score: u8,
    /// Record attributes that contributed to the match, for highlighting.
    #[serde(default)]
    pub matched_fields: Vec<String>,
}

/// A customer (or lead, in fuzzy mode) as it appears in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRecord {
    pub id: String,
    pub company_name: String,
    /// Empty for leads — they have no customer number yet.
    #[serde(default)]
    pub customer_number: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_count: Option<usize>,
}

/// A contact person as it appears in search results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    pub customer_id: String,
    pub customer_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_primary: Option<bool>,
}

/// How the backend classified the query text. Detection happens server-side;
/// this crate never re-derives it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    Email,
    Phone,
    CustomerNumber,
    Text,
}

/// Supplementary information about how a search was executed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
    /// The query text as the backend saw it.
    pub query: String,
    pub query_type: QueryType,
    /// Whether the result set was cut off at the limit.
    #[serde(default)]
    pub truncated: bool,
    /// Advisory notes for the user, e.g. that typo-tolerant matching ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// The common result model both backends normalise into.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    #[serde(default)]
    pub customers: Vec<ResultEntry<CustomerRecord>>,
    #[serde(default)]
    pub contacts: Vec<ResultEntry<ContactRecord>>,
    #[serde(default)]
    pub total_count: usize,
    /// Backend-reported execution time. Wire name: `executionTime`.
    #[serde(rename = "executionTime", default)]
    pub execution_time_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SearchMetadata>,
}

impl SearchResults {
    /// True when the result set contains no hits of either kind.
    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.contacts.is_empty()
    }
}
