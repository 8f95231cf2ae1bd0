//! Scripted `Transport` for tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use super::{HttpResponse, Transport};
use crate::error::TransportError;

/// A request seen by `MockTransport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

impl RecordedRequest {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

type Scripted = Result<HttpResponse, TransportError>;

/// Scripted transport for tests.
///
/// Responses are queued per URL fragment (typically an endpoint path) and
/// consumed in order. A request whose URL matches no non-empty queue fails with
/// `TransportError::Connect`, so unscripted endpoints behave like an
/// unreachable host. Outside this crate's own unit tests it needs the
/// `test-util` feature.
#[derive(Default)]
pub struct MockTransport {
    routes: RefCell<Vec<(String, VecDeque<Scripted>)>>,
    requests: RefCell<Vec<RecordedRequest>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response for URLs containing `fragment`.
    pub fn respond(self, fragment: &str, response: HttpResponse) -> Self {
        self.push(fragment, Ok(response));
        self
    }

    /// Queue a transport failure for URLs containing `fragment`.
    pub fn fail(self, fragment: &str, error: TransportError) -> Self {
        self.push(fragment, Err(error));
        self
    }

    /// Queue a 200 response carrying `body` serialized as JSON.
    pub fn respond_json(self, fragment: &str, body: &serde_json::Value) -> Self {
        self.respond(fragment, HttpResponse::ok(body.to_string()))
    }

    fn push(&self, fragment: &str, scripted: Scripted) {
        let mut routes = self.routes.borrow_mut();
        match routes.iter_mut().find(|(key, _)| key == fragment) {
            Some((_, queue)) => queue.push_back(scripted),
            None => routes.push((fragment.to_string(), VecDeque::from([scripted]))),
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    /// Requests whose URL contains `fragment`.
    pub fn requests_to(&self, fragment: &str) -> Vec<RecordedRequest> {
        self.requests
            .borrow()
            .iter()
            .filter(|r| r.url.contains(fragment))
            .cloned()
            .collect()
    }
}

impl Transport for MockTransport {
    fn get(&self, url: &str, query: &[(String, String)]) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(RecordedRequest {
            url: url.to_string(),
            query: query.to_vec(),
        });

        let mut routes = self.routes.borrow_mut();
        let next = routes
            .iter_mut()
            .filter(|(key, queue)| url.contains(key.as_str()) && !queue.is_empty())
            .find_map(|(_, queue)| queue.pop_front());

        next.unwrap_or_else(|| {
            Err(TransportError::Connect(format!(
                "no scripted response for {url}"
            )))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mock_replays_in_order_then_refuses() {
        let mock = MockTransport::new()
            .fail("detail", TransportError::Timeout("slow".into()))
            .respond("detail", HttpResponse::new(500, "oops"))
            .respond("detail", HttpResponse::ok("{}"));

        assert!(matches!(mock.get("x/detail", &[]), Err(TransportError::Timeout(_))));
        assert_eq!(mock.get("x/detail", &[]).unwrap().status, 500);
        assert!(mock.get("x/detail", &[]).unwrap().is_success());
        assert!(matches!(mock.get("x/detail", &[]), Err(TransportError::Connect(_))));
        assert_eq!(mock.request_count(), 4);
    }

    #[test]
    fn mock_routes_by_fragment_and_records_query() {
        let mock = MockTransport::new()
            .respond("alpha", HttpResponse::ok("a"))
            .respond("beta", HttpResponse::ok("b"));

        let query = vec![("page".to_string(), "2".to_string())];
        assert_eq!(mock.get("host/beta", &query).unwrap().body, "b");
        assert_eq!(mock.get("host/alpha", &[]).unwrap().body, "a");

        let beta = mock.requests_to("beta");
        assert_eq!(beta.len(), 1);
        assert_eq!(beta[0].param("page"), Some("2"));
    }
}
