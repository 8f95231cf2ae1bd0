//! Request executor for the listing service.
//!
//! Responsibilities:
//! - build query parameters (`serviceKey`, `page`, `perPage`, `cond[FIELD::OP]`)
//! - perform the GET through a `Transport`
//! - bounded retry (fixed pause, fixed attempt budget)
//! - validate the JSON envelope (`data` on the listing path)

use std::time::{Duration, Instant};

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::data::transport::{HttpResponse, Transport};
use crate::domain::CategoryFilter;
use crate::error::{FetchError, TransportError};
use crate::registry::EndpointSpec;

/// Attempt budget and pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub pause: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            pause: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Same attempt budget, no pause. Used by tests.
    pub fn immediate() -> Self {
        Self {
            pause: Duration::ZERO,
            ..Self::default()
        }
    }
}

/// Response envelope shared by every endpoint of the service.
///
/// Counts are read leniently: a numeric string counts, any other shape reads
/// as absent. Only `data` decides whether a listing page is usable.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    #[serde(default, deserialize_with = "lenient_count")]
    pub page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub per_page: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub total_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub current_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_count")]
    pub match_count: Option<u64>,
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

fn lenient_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A validated listing page: `data` is guaranteed present.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub items: Vec<Value>,
    pub current_count: Option<u64>,
    /// Rows matching the filters across all pages, when the provider reports it.
    pub available: Option<u64>,
}

/// Blocking client for the listing service.
pub struct ListingApi<T> {
    transport: T,
    base_url: String,
    service_key: String,
    retry: RetryPolicy,
}

impl<T: Transport> ListingApi<T> {
    pub fn new(transport: T, base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = RetryPolicy {
            max_attempts: retry.max_attempts.max(1),
            pause: retry.pause,
        };
        self
    }

    pub fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch one page of `endpoint`.
    ///
    /// `page_size` above the endpoint's cap is clamped to the cap.
    pub fn fetch<F: 'static>(
        &self,
        endpoint: &EndpointSpec<F>,
        page: u32,
        page_size: u32,
        filters: &CategoryFilter,
    ) -> Result<ListingPage, FetchError> {
        if page == 0 {
            return Err(FetchError::InvalidRequest {
                reason: "page must be >= 1".to_string(),
            });
        }
        if page_size == 0 {
            return Err(FetchError::InvalidRequest {
                reason: "page size must be >= 1".to_string(),
            });
        }
        let per_page = page_size.min(endpoint.max_page_size);
        if per_page < page_size {
            debug!(
                endpoint = endpoint.path,
                requested = page_size,
                cap = endpoint.max_page_size,
                "Page size clamped to provider cap"
            );
        }

        let query = self.build_query(page, per_page, filters);
        let resp = self.send_with_retry(endpoint.path, &query)?;
        let envelope = parse_envelope(endpoint.path, &resp)?;

        let items = envelope.data.ok_or_else(|| FetchError::MalformedResponse {
            endpoint: endpoint.path.to_string(),
            reason: "missing `data` array".to_string(),
        })?;

        Ok(ListingPage {
            items,
            current_count: envelope.current_count,
            available: envelope.match_count.or(envelope.total_count),
        })
    }

    /// Fetch up to `max_rows` items, following pages as needed.
    ///
    /// Stops when `max_rows` items were collected, the provider's match count
    /// is reached, or a page comes back short.
    pub fn fetch_rows<F: 'static>(
        &self,
        endpoint: &EndpointSpec<F>,
        max_rows: u32,
        filters: &CategoryFilter,
    ) -> Result<Vec<Value>, FetchError> {
        if max_rows == 0 {
            return Err(FetchError::InvalidRequest {
                reason: "max rows must be >= 1".to_string(),
            });
        }
        let per_page = max_rows.min(endpoint.max_page_size);
        let wanted = max_rows as usize;

        let mut rows = Vec::new();
        let mut page = 1u32;
        loop {
            let batch = self.fetch(endpoint, page, per_page, filters)?;
            let got = batch.items.len();
            rows.extend(batch.items);

            let exhausted = batch.available.is_some_and(|n| rows.len() as u64 >= n);
            if rows.len() >= wanted || got < per_page as usize || exhausted {
                break;
            }
            page += 1;
        }

        rows.truncate(wanted);
        Ok(rows)
    }

    /// Query parameters for one page; filters become `cond[FIELD::OP]`.
    pub fn build_query(&self, page: u32, per_page: u32, filters: &CategoryFilter) -> Vec<(String, String)> {
        let mut query = vec![
            ("serviceKey".to_string(), self.service_key.clone()),
            ("page".to_string(), page.to_string()),
            ("perPage".to_string(), per_page.to_string()),
        ];
        query.extend(filters.iter().map(|(field, op, value)| {
            (
                format!("cond[{}::{}]", field.to_ascii_uppercase(), op.as_str()),
                value.to_string(),
            )
        }));
        query
    }

    /// A single attempt, no retry. Used by the connectivity probe.
    pub fn send_once(&self, path: &str, query: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        self.transport.get(&self.endpoint_url(path), query)
    }

    fn send_with_retry(&self, path: &str, query: &[(String, String)]) -> Result<HttpResponse, FetchError> {
        let url = self.endpoint_url(path);
        let attempts = self.retry.max_attempts;
        let mut last = TransportError::Other("no attempt made".to_string());

        for attempt in 1..=attempts {
            let started = Instant::now();
            let outcome = self.transport.get(&url, query);
            let elapsed_ms = started.elapsed().as_millis() as u64;

            match outcome {
                Ok(resp) if resp.is_success() => {
                    debug!(endpoint = path, attempt, status = resp.status, elapsed_ms, "Request succeeded");
                    return Ok(resp);
                }
                Ok(resp) => {
                    warn!(endpoint = path, attempt, attempts, status = resp.status, elapsed_ms, "Request returned error status");
                    last = TransportError::Status { status: resp.status };
                }
                Err(err) => {
                    warn!(endpoint = path, attempt, attempts, elapsed_ms, error = %err, "Request failed");
                    last = err;
                }
            }

            if attempt < attempts && !self.retry.pause.is_zero() {
                std::thread::sleep(self.retry.pause);
            }
        }

        error!(endpoint = path, attempts, last = %last, "Request attempts exhausted");
        Err(FetchError::RequestExhausted {
            endpoint: path.to_string(),
            attempts,
            last,
        })
    }
}

/// Parse a 2xx body into the shared envelope.
pub fn parse_envelope(endpoint: &str, resp: &HttpResponse) -> Result<Envelope, FetchError> {
    serde_json::from_str(&resp.body).map_err(|e| FetchError::MalformedResponse {
        endpoint: endpoint.to_string(),
        reason: format!("invalid JSON: {e}"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::transport::MockTransport;
    use crate::domain::{Category, FilterOp};
    use crate::registry;
    use serde_json::json;

    const DETAIL: &str = "getAPTLttotPblancDetail";

    fn api(mock: &MockTransport) -> ListingApi<&MockTransport> {
        ListingApi::new(mock, "https://api.example/v1/", "KEY").with_retry(RetryPolicy::immediate())
    }

    fn page_body(n: usize) -> Value {
        let data: Vec<Value> = (0..n).map(|i| json!({ "HOUSE_NM": format!("House {i}") })).collect();
        json!({ "page": 1, "perPage": n, "currentCount": n, "data": data })
    }

    #[test]
    fn query_carries_pagination_and_conditions() {
        let mock = MockTransport::new().respond_json(DETAIL, &page_body(1));
        let filters = CategoryFilter::new()
            .with("rcrit_pblanc_de", FilterOp::Gte, "2024-01-01")
            .with("RCRIT_PBLANC_DE", FilterOp::Lte, "2024-01-31");

        let endpoint = &registry::spec(Category::Apt).detail;
        api(&mock).fetch(endpoint, 2, 20, &filters).unwrap();

        let req = &mock.requests()[0];
        assert_eq!(req.url, "https://api.example/v1/getAPTLttotPblancDetail");
        assert_eq!(req.param("serviceKey"), Some("KEY"));
        assert_eq!(req.param("page"), Some("2"));
        assert_eq!(req.param("perPage"), Some("20"));
        assert_eq!(req.param("cond[RCRIT_PBLANC_DE::GTE]"), Some("2024-01-01"));
        assert_eq!(req.param("cond[RCRIT_PBLANC_DE::LTE]"), Some("2024-01-31"));
    }

    #[test]
    fn page_size_is_clamped_to_endpoint_cap() {
        let mock = MockTransport::new()
            .respond_json(DETAIL, &page_body(1))
            .respond_json("getAPTLttotPblancMdl", &page_body(1));
        let spec = registry::spec(Category::Apt);
        let api = api(&mock);

        api.fetch(&spec.detail, 1, 500, &CategoryFilter::new()).unwrap();
        api.fetch(&spec.models, 1, 500, &CategoryFilter::new()).unwrap();

        let reqs = mock.requests();
        assert_eq!(reqs[0].param("perPage"), Some("150"));
        assert_eq!(reqs[1].param("perPage"), Some("100"));
    }

    #[test]
    fn rejects_zero_page_or_page_size() {
        let mock = MockTransport::new();
        let endpoint = &registry::spec(Category::Apt).detail;
        let api = api(&mock);
        let none = CategoryFilter::new();

        assert!(matches!(api.fetch(endpoint, 0, 10, &none), Err(FetchError::InvalidRequest { .. })));
        assert!(matches!(api.fetch(endpoint, 1, 0, &none), Err(FetchError::InvalidRequest { .. })));
        assert_eq!(mock.request_count(), 0);
    }

    #[test]
    fn succeeds_on_third_attempt_after_two_transport_failures() {
        let mock = MockTransport::new()
            .fail(DETAIL, TransportError::Timeout("t1".into()))
            .fail(DETAIL, TransportError::Connect("refused".into()))
            .respond_json(DETAIL, &page_body(2));

        let endpoint = &registry::spec(Category::Apt).detail;
        let page = api(&mock).fetch(endpoint, 1, 10, &CategoryFilter::new()).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(mock.request_count(), 3);
    }

    #[test]
    fn exhausts_after_exactly_three_attempts() {
        let mock = MockTransport::new()
            .respond(DETAIL, HttpResponse::new(500, "err"))
            .fail(DETAIL, TransportError::Timeout("t".into()))
            .respond(DETAIL, HttpResponse::new(503, "busy"))
            .respond_json(DETAIL, &page_body(1));

        let endpoint = &registry::spec(Category::Apt).detail;
        let err = api(&mock).fetch(endpoint, 1, 10, &CategoryFilter::new()).unwrap_err();

        match err {
            FetchError::RequestExhausted { attempts, last, .. } => {
                assert_eq!(attempts, 3);
                assert_eq!(last, TransportError::Status { status: 503 });
            }
            other => panic!("expected RequestExhausted, got {other:?}"),
        }
        // The fourth scripted response is never requested.
        assert_eq!(mock.request_count(), 3);
    }

    #[test]
    fn missing_data_is_malformed_and_not_retried() {
        let mock = MockTransport::new().respond_json(DETAIL, &json!({ "currentCount": 0 }));
        let endpoint = &registry::spec(Category::Apt).detail;
        let err = api(&mock).fetch(endpoint, 1, 10, &CategoryFilter::new()).unwrap_err();

        assert!(matches!(err, FetchError::MalformedResponse { .. }));
        assert_eq!(mock.request_count(), 1);
    }

    #[test]
    fn invalid_json_is_malformed() {
        let mock = MockTransport::new().respond(DETAIL, HttpResponse::ok("<html>gateway</html>"));
        let endpoint = &registry::spec(Category::Apt).detail;
        let err = api(&mock).fetch(endpoint, 1, 10, &CategoryFilter::new()).unwrap_err();
        assert!(matches!(err, FetchError::MalformedResponse { .. }));
    }

    #[test]
    fn fetch_rows_follows_pages_until_match_count() {
        let first = json!({ "currentCount": 2, "matchCount": 3, "data": [{"HOUSE_NM": "a"}, {"HOUSE_NM": "b"}] });
        let second = json!({ "currentCount": 1, "matchCount": 3, "data": [{"HOUSE_NM": "c"}] });
        let mock = MockTransport::new()
            .respond_json("getAPTLttotPblancMdl", &first)
            .respond_json("getAPTLttotPblancMdl", &second);

        // Two rows per page, so three matches need a second page.
        let endpoint = EndpointSpec {
            max_page_size: 2,
            ..registry::spec(Category::Apt).models
        };
        let rows = api(&mock).fetch_rows(&endpoint, 10, &CategoryFilter::new()).unwrap();

        assert_eq!(rows.len(), 3);
        let reqs = mock.requests();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[1].param("page"), Some("2"));
    }

    #[test]
    fn odd_count_types_do_not_reject_a_page_with_data() {
        let body = json!({
            "currentCount": "2",
            "matchCount": 2,
            "totalCount": [1],
            "page": null,
            "data": [{ "HOUSE_NM": "a" }, { "HOUSE_NM": "b" }]
        });
        let mock = MockTransport::new().respond_json(DETAIL, &body);
        let endpoint = &registry::spec(Category::Apt).detail;
        let page = api(&mock).fetch(endpoint, 1, 10, &CategoryFilter::new()).unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.current_count, Some(2));
        assert_eq!(page.available, Some(2));

        let odd = parse_envelope(DETAIL, &HttpResponse::ok(r#"{ "currentCount": {"n": 1}, "data": [] }"#)).unwrap();
        assert_eq!(odd.current_count, None);
        assert_eq!(odd.data, Some(Vec::new()));
    }

    #[test]
    fn fetch_rows_stops_on_short_page_and_truncates() {
        let mock = MockTransport::new().respond_json(DETAIL, &page_body(5));
        let endpoint = &registry::spec(Category::Apt).detail;
        let rows = api(&mock).fetch_rows(endpoint, 3, &CategoryFilter::new()).unwrap();

        // perPage=3 but the provider sent 5; we never hand out more than asked.
        assert_eq!(rows.len(), 3);
        assert_eq!(mock.request_count(), 1);
    }
}
