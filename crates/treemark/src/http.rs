//! HTTP topic feed.
//!
//! The topic API answers a `GET` with `{"count": N}` and a `POST`
//! `{"index": i}` with the record at that index. Requests carry the API
//! token in the `X-Auth-Token` header.

use serde_json::{json, Value};

use crate::feed::TopicFeed;
use crate::topic::TopicRecord;
use crate::{Result, TreemarkError};

/// Header carrying the API token
pub const AUTH_HEADER: &str = "X-Auth-Token";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// A request to the topic API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub token: Option<String>,
    /// JSON body, sent with `Content-Type: application/json`
    pub body: Option<Value>,
}

/// Status and body of an API response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport used by [`HttpFeed`]
pub trait ApiClient {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}

/// Blocking `reqwest` transport
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    pub fn new() -> Result<Self> {
        Ok(Self::from_client(reqwest::blocking::Client::builder().build()?))
    }

    pub fn from_client(client: reqwest::blocking::Client) -> Self {
        Self { client }
    }
}

impl ApiClient for ReqwestClient {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        if let Some(token) = &request.token {
            builder = builder.header(AUTH_HEADER, token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(ApiResponse { status, body })
    }
}

/// A feed backed by the topic API
#[derive(Debug, Clone)]
pub struct HttpFeed<C = ReqwestClient> {
    client: C,
    url: String,
    token: Option<String>,
}

impl HttpFeed<ReqwestClient> {
    /// Create a feed for `url` using a default `reqwest` client
    pub fn new(url: impl Into<String>, token: Option<String>) -> Result<Self> {
        Ok(Self::with_client(ReqwestClient::new()?, url, token))
    }
}

impl<C: ApiClient> HttpFeed<C> {
    pub fn with_client(client: C, url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client,
            url: url.into(),
            token,
        }
    }

    /// Request for the number of topics
    pub fn count_request(&self) -> ApiRequest {
        ApiRequest {
            method: Method::Get,
            url: self.url.clone(),
            token: self.token.clone(),
            body: None,
        }
    }

    /// Request for the topic at `index`
    pub fn topic_request(&self, index: usize) -> ApiRequest {
        ApiRequest {
            method: Method::Post,
            url: self.url.clone(),
            token: self.token.clone(),
            body: Some(json!({ "index": index })),
        }
    }
}

/// Read `count` from a count response. Fractional counts round up, the
/// way an `i < count` loop would treat them.
fn parse_count(body: &Value) -> Option<i64> {
    let count = body.get("count")?;
    count
        .as_i64()
        .or_else(|| count.as_f64().map(|f| f.ceil() as i64))
}

impl<C: ApiClient> TopicFeed for HttpFeed<C> {
    fn count(&self) -> Result<i64> {
        let count_error = |reason: String| TreemarkError::CountRequest { reason };

        let response = self
            .client
            .send(&self.count_request())
            .map_err(|err| count_error(err.to_string()))?;
        if !response.is_success() {
            return Err(count_error(format!("status {}", response.status)));
        }

        let body: Value =
            serde_json::from_str(&response.body).map_err(|err| count_error(err.to_string()))?;
        parse_count(&body).ok_or_else(|| count_error("response has no numeric count".to_string()))
    }

    fn fetch(&self, index: usize) -> Result<TopicRecord> {
        let fetch_error = |reason: String| TreemarkError::Fetch { index, reason };

        let response = self
            .client
            .send(&self.topic_request(index))
            .map_err(|err| fetch_error(err.to_string()))?;
        if !response.is_success() {
            return Err(fetch_error(format!("status {}", response.status)));
        }

        let body: Value =
            serde_json::from_str(&response.body).map_err(|err| fetch_error(err.to_string()))?;
        tracing::debug!(index, "topic fetched");
        Ok(TopicRecord::from_value(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::collect_topics;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Replays canned responses and records the requests it was sent
    #[derive(Default)]
    struct ScriptedClient {
        responses: RefCell<VecDeque<ApiResponse>>,
        requests: RefCell<Vec<ApiRequest>>,
    }

    impl ScriptedClient {
        fn new(responses: &[(u16, &str)]) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .iter()
                        .map(|(status, body)| ApiResponse::new(*status, body))
                        .collect(),
                ),
                ..Default::default()
            }
        }
    }

    impl ApiClient for ScriptedClient {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
            self.requests.borrow_mut().push(request.clone());
            self.responses
                .borrow_mut()
                .pop_front()
                .ok_or_else(|| TreemarkError::CountRequest {
                    reason: "connection refused".to_string(),
                })
        }
    }

    fn feed(responses: &[(u16, &str)]) -> HttpFeed<ScriptedClient> {
        HttpFeed::with_client(
            ScriptedClient::new(responses),
            "https://api.example.com/topics",
            Some("secret".to_string()),
        )
    }

    #[test]
    fn test_requests_carry_token_and_index() {
        let feed = feed(&[]);

        let count = feed.count_request();
        assert_eq!(count.method, Method::Get);
        assert_eq!(count.token.as_deref(), Some("secret"));
        assert_eq!(count.body, None);

        let topic = feed.topic_request(3);
        assert_eq!(topic.method, Method::Post);
        assert_eq!(topic.url, "https://api.example.com/topics");
        assert_eq!(topic.body, Some(json!({"index": 3})));
    }

    #[test]
    fn test_collect_topics_over_api() {
        let feed = feed(&[
            (200, r#"{"count": 2}"#),
            (200, r#"{"id": 1, "topic": "One"}"#),
            (200, r#"{"id": 2, "topic": 2024}"#),
        ]);

        let topics = collect_topics(&feed).unwrap();
        assert_eq!(topics.len(), 2);
        assert_eq!(topics[1].page_title().as_deref(), Some("2024"));

        let requests = feed.client.requests.borrow();
        let bodies: Vec<_> = requests.iter().map(|r| r.body.clone()).collect();
        assert_eq!(
            bodies,
            [None, Some(json!({"index": 0})), Some(json!({"index": 1}))]
        );
    }

    #[test]
    fn test_count_error_status() {
        let err = feed(&[(401, "denied")]).count().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch topic count: status 401");
    }

    #[test]
    fn test_count_zero_is_invalid() {
        let err = collect_topics(&feed(&[(200, r#"{"count": 0}"#)])).unwrap_err();
        assert!(matches!(err, TreemarkError::InvalidTopicCount(0)));
    }

    #[test]
    fn test_count_not_numeric() {
        let err = feed(&[(200, r#"{"count": "3"}"#)]).count().unwrap_err();
        assert!(matches!(err, TreemarkError::CountRequest { .. }));

        let err = feed(&[(200, "<html>")]).count().unwrap_err();
        assert!(matches!(err, TreemarkError::CountRequest { .. }));
    }

    #[test]
    fn test_fractional_count_rounds_up() {
        assert_eq!(feed(&[(200, r#"{"count": 2.5}"#)]).count().unwrap(), 3);
    }

    #[test]
    fn test_fetch_error_status() {
        let err = feed(&[(500, "")]).fetch(4).unwrap_err();
        assert!(matches!(err, TreemarkError::Fetch { index: 4, .. }));
        assert_eq!(err.to_string(), "Failed to fetch topic at index 4: status 500");
    }

    #[test]
    fn test_fetch_transport_error() {
        let err = feed(&[]).fetch(0).unwrap_err();
        assert!(matches!(err, TreemarkError::Fetch { index: 0, .. }));
    }

    #[test]
    fn test_fetch_stops_batch_on_error() {
        let feed = feed(&[(200, r#"{"count": 3}"#), (200, "{}"), (503, "")]);
        let err = collect_topics(&feed).unwrap_err();
        assert!(matches!(err, TreemarkError::Fetch { index: 1, .. }));
        assert_eq!(feed.client.requests.borrow().len(), 3);
    }

    #[test]
    fn test_fetch_non_object_record() {
        let record = feed(&[(200, "[1, 2]")]).fetch(0).unwrap();
        assert_eq!(record.file_name(), "topic.md");
    }

    /// Serve one canned response per connection; the handle returns the raw
    /// requests received
    fn serve(responses: Vec<(u16, &'static str)>) -> (String, thread::JoinHandle<Vec<String>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/api", listener.local_addr().unwrap());

        let handle = thread::spawn(move || {
            let mut received = Vec::new();
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());

                let mut request = String::new();
                let mut content_length = 0;
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 {
                        break;
                    }
                    if let Some(value) = line.to_ascii_lowercase().strip_prefix("content-length:") {
                        content_length = value.trim().parse().unwrap();
                    }
                    let end_of_head = line == "\r\n";
                    request.push_str(&line);
                    if end_of_head {
                        break;
                    }
                }
                let mut payload = vec![0; content_length];
                reader.read_exact(&mut payload).unwrap();
                request.push_str(&String::from_utf8(payload).unwrap());

                write!(
                    stream,
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                )
                .unwrap();
                received.push(request);
            }
            received
        });

        (url, handle)
    }

    fn local_client() -> ReqwestClient {
        ReqwestClient::from_client(
            reqwest::blocking::Client::builder()
                .no_proxy()
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_reqwest_client_over_local_server() {
        let (url, server) = serve(vec![
            (200, r#"{"count": 1}"#),
            (200, r#"{"id": 9, "topic": "Served", "docTree": "[]"}"#),
        ]);
        let feed = HttpFeed::with_client(local_client(), url, Some("secret".to_string()));

        let topics = collect_topics(&feed).unwrap();
        assert_eq!(topics[0].file_name(), "9.md");

        let requests = server.join().unwrap();
        let count = requests[0].to_ascii_lowercase();
        assert!(count.starts_with("get /api "));
        assert!(count.contains("x-auth-token: secret"));

        let topic = requests[1].to_ascii_lowercase();
        assert!(topic.starts_with("post /api "));
        assert!(topic.contains("content-type: application/json"));
        assert!(topic.ends_with(r#"{"index":0}"#));
    }

    #[test]
    fn test_reqwest_client_reports_status() {
        let (url, server) = serve(vec![(403, "forbidden")]);
        let feed = HttpFeed::with_client(local_client(), url, None);

        let err = feed.count().unwrap_err();
        assert_eq!(err.to_string(), "Failed to fetch topic count: status 403");

        let requests = server.join().unwrap();
        assert!(!requests[0].to_ascii_lowercase().contains("x-auth-token"));
    }
}
