//! Universal search backend — customers and contacts in one call.
//!
//! The endpoint already splits results into customers and contacts with
//! relevance scores and matched-field lists, and detects the query type
//! (email vs phone vs customer number vs free text) server-side. This
//! backend only translates field names into the common result model.

use serde::Deserialize;

use crate::backend::SearchBackendTrait;
use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::types::{
    ContactRecord, CustomerRecord, Query, ResultEntry, SearchContext, SearchMetadata,
    SearchResults,
};

/// Universal search over `/api/search/universal`.
pub struct UniversalBackend;

impl SearchBackendTrait for UniversalBackend {
    async fn fetch(
        &self,
        query: &Query,
        config: &SearchConfig,
        client: &reqwest::Client,
    ) -> Result<SearchResults, SearchError> {
        tracing::trace!(text = %query.text, "universal search");

        let url = format!(
            "{}/api/search/universal",
            config.base_url.trim_end_matches('/')
        );
        let response = client
            .get(&url)
            .query(&[
                ("query", query.text.clone()),
                ("includeContacts", query.include_contacts.to_string()),
                ("includeInactive", query.include_inactive.to_string()),
                ("limit", query.limit.to_string()),
                ("context", query.context.name().to_string()),
            ])
            .send()
            .await
            .map_err(|e| SearchError::Transport(format!("universal search request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Http {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Transport(format!("universal search body read failed: {e}")))?;

        parse_universal_body(&body)
    }

    fn context(&self) -> SearchContext {
        SearchContext::Customers
    }
}

/// Wire shape of the universal search response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UniversalResponse {
    #[serde(default)]
    customers: Vec<ResultEntry<CustomerRecord>>,
    #[serde(default)]
    contacts: Vec<ResultEntry<ContactRecord>>,
    #[serde(default)]
    total_count: usize,
    #[serde(default)]
    execution_time: u64,
    #[serde(default)]
    metadata: Option<SearchMetadata>,
}

/// Parse a universal search response body into the common result model.
///
/// Extracted as a separate function for testability with mock JSON.
pub(crate) fn parse_universal_body(body: &str) -> Result<SearchResults, SearchError> {
    let wire: UniversalResponse = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("universal search response: {e}")))?;

    let results = SearchResults {
        customers: wire.customers,
        contacts: wire.contacts,
        total_count: wire.total_count,
        execution_time_ms: wire.execution_time,
        metadata: wire.metadata,
    };
    tracing::debug!(
        customers = results.customers.len(),
        contacts = results.contacts.len(),
        "universal results parsed"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QueryType;

    const MOCK_BODY: &str = r#"{
        "customers": [
            {
                "type": "customer",
                "id": "c-1",
                "data": {
                    "id": "c-1",
                    "companyName": "Schmidt GmbH",
                    "customerNumber": "K-1001",
                    "status": "ACTIVE",
                    "contactEmail": "info@schmidt.example"
                },
                "relevanceScore": 95,
                "matchedFields": ["companyName"]
            }
        ],
        "contacts": [
            {
                "type": "contact",
                "id": "p-7",
                "data": {
                    "id": "p-7",
                    "firstName": "Anna",
                    "lastName": "Schmidt",
                    "customerId": "c-1",
                    "customerName": "Schmidt GmbH"
                },
                "relevanceScore": 80,
                "matchedFields": ["lastName"]
            }
        ],
        "totalCount": 2,
        "executionTime": 12,
        "metadata": {
            "query": "schmidt",
            "queryType": "TEXT",
            "truncated": false
        }
    }"#;

    #[test]
    fn parse_mock_body_normalises_field_names() {
        let results = parse_universal_body(MOCK_BODY).expect("should parse");
        assert_eq!(results.total_count, 2);
        assert_eq!(results.execution_time_ms, 12);
        assert_eq!(results.customers.len(), 1);
        assert_eq!(results.contacts.len(), 1);

        let customer = &results.customers[0];
        assert_eq!(customer.relevance_score, 95);
        assert_eq!(customer.data.company_name, "Schmidt GmbH");
        assert_eq!(customer.matched_fields, vec!["companyName"]);

        let contact = &results.contacts[0];
        assert_eq!(contact.data.last_name, "Schmidt");
        assert_eq!(contact.data.customer_id, "c-1");
    }

    #[test]
    fn parse_preserves_backend_query_type() {
        let results = parse_universal_body(MOCK_BODY).expect("should parse");
        let metadata = results.metadata.expect("metadata present");
        assert_eq!(metadata.query_type, QueryType::Text);
        assert!(!metadata.truncated);
    }

    #[test]
    fn parse_empty_object_yields_empty_results() {
        let results = parse_universal_body("{}").expect("should parse");
        assert!(results.is_empty());
        assert_eq!(results.total_count, 0);
        assert!(results.metadata.is_none());
    }

    #[test]
    fn parse_rejects_malformed_json() {
        let err = parse_universal_body("<html>gateway timeout</html>").expect_err("should fail");
        assert!(matches!(err, SearchError::Parse(_)));
    }

    #[test]
    fn backend_serves_customers_context() {
        assert_eq!(UniversalBackend.context(), SearchContext::Customers);
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<UniversalBackend>();
    }
}
