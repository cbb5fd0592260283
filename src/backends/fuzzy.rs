//! Fuzzy lead search backend — typo-tolerant matching over leads.
//!
//! The endpoint returns a flat list of leads with no separate contact
//! results and no per-record scoring: the backend has already rank-ordered
//! by trigram similarity. Normalisation therefore assigns every entry the
//! maximum relevance score and derives the matched-field list heuristically
//! from which optional lead fields are populated.

use serde::Deserialize;

use crate::backend::SearchBackendTrait;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{
    CustomerRecord, EntryKind, Query, QueryType, ResultEntry, SearchContext, SearchMetadata,
    SearchResults,
};

/// Advisory shown when the backend reports that fuzzy matching was active.
const FUZZY_ADVISORY: &str = "Typo-tolerant search active";

/// Lead status assumed when the backend omits one.
const DEFAULT_LEAD_STATUS: &str = "REGISTERED";

/// Fuzzy lead search over `/api/leads/search/fuzzy`.
pub struct FuzzyLeadBackend;

impl SearchBackendTrait for FuzzyLeadBackend {
    async fn fetch(
        &self,
        query: &Query,
        config: &SearchConfig,
        client: &reqwest::Client,
    ) -> Result<SearchResults, SearchError> {
        tracing::trace!(text = %query.text, "fuzzy lead search");

        let url = format!(
            "{}/api/leads/search/fuzzy",
            config.base_url.trim_end_matches('/')
        );
        let response = client
            .get(&url)
            .query(&[
                ("q", query.text.clone()),
                ("limit", query.limit.to_string()),
                ("includeInactive", query.include_inactive.to_string()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("fuzzy search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("fuzzy search body read failed: {e}")))?;

        parse_fuzzy_body(&body, &query.text)
    }

    fn context(&self) -> SearchContext {
        SearchContext::Leads
    }
}

/// Wire shape of the fuzzy lead search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FuzzyResponse {
    #[serde(default)]
    data: Vec<LeadRecord>,
    #[serde(default)]
    total: usize,
    #[serde(default)]
    query: String,
    #[serde(default)]
    fuzzy_enabled: bool,
}

/// The endpoint sends lead ids as either JSON numbers or strings.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum LeadId {
    Number(i64),
    Text(String),
}

impl LeadId {
    fn into_string(self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LeadRecord {
    id: LeadId,
    #[serde(default)]
    company_name: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    phone: Option<String>,
    #[serde(default)]
    city: Option<String>,
    /// Embedded contact persons; only the count survives normalisation.
    #[serde(default)]
    contacts: Option<Vec<serde_json::Value>>,
}

/// Parse a fuzzy search response body into the common result model.
///
/// `query_text` is the text that was sent, used as the metadata query when
/// the backend echoes nothing back.
pub(crate) fn parse_fuzzy_body(body: &str, query_text: &str) -> Result<SearchResults, SearchError> {
    let wire: FuzzyResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("fuzzy search response: {e}")))?;

    let customers: Vec<ResultEntry<CustomerRecord>> =
        wire.data.into_iter().map(normalise_lead).collect();

    let metadata = SearchMetadata {
        query: if wire.query.is_empty() {
            query_text.to_string()
        } else {
            wire.query
        },
        query_type: QueryType::Text,
        truncated: false,
        suggestions: wire
            .fuzzy_enabled
            .then(|| vec![FUZZY_ADVISORY.to_string()]),
    };

    tracing::debug!(count = customers.len(), "fuzzy results parsed");
    Ok(SearchResults {
        customers,
        contacts: Vec::new(),
        total_count: wire.total,
        // The fuzzy endpoint reports no timing.
        execution_time_ms: 0,
        metadata: Some(metadata),
    })
}

fn normalise_lead(lead: LeadRecord) -> ResultEntry<CustomerRecord> {
    let matched_fields = matched_fields(&lead);
    let id = lead.id.into_string();
    ResultEntry {
        kind: EntryKind::Customer,
        id: id.clone(),
        data: CustomerRecord {
            id,
            company_name: lead.company_name.unwrap_or_default(),
            // Leads have no customer number yet.
            customer_number: String::new(),
            status: lead
                .status
                .unwrap_or_else(|| DEFAULT_LEAD_STATUS.to_string()),
            contact_email: lead.email,
            contact_phone: lead.phone,
            contact_count: Some(lead.contacts.map_or(0, |contacts| contacts.len())),
        },
        // The backend has already rank-ordered by similarity.
        relevance_score: 100,
        matched_fields,
    }
}

/// Company name always matches; city and email count only when populated.
fn matched_fields(lead: &LeadRecord) -> Vec<String> {
    let mut fields = vec!["companyName".to_string()];
    if lead.city.as_deref().is_some_and(|city| !city.is_empty()) {
        fields.push("city".to_string());
    }
    if lead.email.as_deref().is_some_and(|email| !email.is_empty()) {
        fields.push("email".to_string());
    }
    fields
}
