//! Minimal page-fetching HTTP client with safe logging.
//!
//! - One GET per call, fixed browser-like `User-Agent`, bounded timeout
//! - No retries: a transport failure is returned to the caller as-is
//! - Non-2xx statuses are logged and the body is still handed back
//! - Optional *raw* request/response logging via `MIRROR_HTTP_RAW=1`
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), mirror_http::HttpError> {
//! let client = mirror_http::HttpClient::new(mirror_http::DEFAULT_USER_AGENT)?;
//! let page = client
//!     .get("https://linktr.ee/example", mirror_http::RequestOpts::default())
//!     .await?;
//! println!("{} bytes, status {}", page.body.len(), page.status);
//! # Ok(()) }
//! ```
//!
//! Observability: structured `tracing` events are emitted for request start,
//! response status, non-success statuses (with a truncated body snippet),
//! network errors, and (optionally) raw request/response lines (target
//! `http.raw`) when `MIRROR_HTTP_RAW=1`. Cookie and authorization headers are
//! never logged in clear.

use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};
use std::env;
use std::time::{Duration, Instant};
use thiserror::Error;
use uuid::Uuid;

/// Identification sent with every request. Some link-aggregation hosts serve
/// a stripped page to unknown agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Applied when neither the client nor the request sets one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// ==============================
// Raw logging toggles
// ==============================

const RAW_ENV: &str = "MIRROR_HTTP_RAW";
const RAW_MAX_BODY: usize = 64 * 1024; // cap raw body logs (64 KiB)
const SNIPPET_MAX: usize = 500;

fn raw_enabled() -> bool {
    matches!(
        env::var(RAW_ENV).as_deref(),
        Ok("1") | Ok("true") | Ok("yes")
    )
}

/// Render a best-effort curl command for repro/debug, with secrets redacted.
fn make_curl(method: &Method, url: &Url, headers: &[(String, String)]) -> String {
    let mut parts = vec!["curl".to_string(), format!("-X{}", method)];
    for (name, val) in headers {
        parts.push(format!("-H '{}: {}'", name, val.replace('\'', r"'\''")));
    }
    parts.push(format!("'{}'", url.as_str()));
    parts.join(" ")
}

fn is_sensitive_header(name: &str) -> bool {
    name.eq_ignore_ascii_case("authorization")
        || name.eq_ignore_ascii_case("cookie")
        || name.eq_ignore_ascii_case("set-cookie")
}

/// Redact sensitive headers for logging
fn redact_headers(h: &HeaderMap) -> Vec<(String, String)> {
    h.iter()
        .map(|(k, v)| {
            let key = k.as_str().to_string();
            let val = if is_sensitive_header(&key) {
                "<redacted>".to_string()
            } else {
                v.to_str().unwrap_or("").to_string()
            };
            (key, val)
        })
        .collect()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > SNIPPET_MAX {
        let mut cut = SNIPPET_MAX;
        while !snip.is_char_boundary(cut) {
            cut -= 1;
        }
        snip.truncate(cut);
        snip.push_str("...");
    }
    snip
}

// ==============================
// Errors
// ==============================

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("client build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
}

// ==============================
// Request options & response
// ==============================

/// Per-request tuning knobs for the HTTP client.
///
/// ```
/// use mirror_http::RequestOpts;
/// use std::time::Duration;
///
/// let opts = RequestOpts {
///     timeout: Some(Duration::from_secs(3)),
/// };
///
/// assert_eq!(opts.timeout.unwrap().as_secs(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct RequestOpts {
    pub timeout: Option<Duration>,
}

/// A fetched document. The status is informational; callers decide what a
/// non-2xx body is worth.
#[derive(Clone, Debug)]
pub struct FetchedPage {
    pub url: Url,
    pub status: StatusCode,
    pub body: Bytes,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }
}

// ==============================
// Client
// ==============================

#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: Client,
    user_agent: String,
    pub default_timeout: Duration,
}

impl HttpClient {
    /// Construct a client that identifies itself with `user_agent`.
    ///
    /// ```no_run
    /// use mirror_http::{HttpClient, HttpError, DEFAULT_USER_AGENT};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new(DEFAULT_USER_AGENT)?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(10));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(user_agent: &str) -> Result<Self, HttpError> {
        let inner = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .user_agent(user_agent)
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            inner,
            user_agent: user_agent.to_string(),
            default_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Override the default timeout returned by [`HttpClient::new`].
    ///
    /// ```no_run
    /// use mirror_http::{HttpClient, HttpError, DEFAULT_USER_AGENT};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new(DEFAULT_USER_AGENT)?
    ///     .with_timeout(Duration::from_secs(2));
    /// assert_eq!(client.default_timeout, Duration::from_secs(2));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Issue exactly one GET for `url` and return whatever body came back.
    ///
    /// Transport failures (DNS, connect, timeout, body read) are errors. A
    /// non-2xx status is not: it is logged at `warn` and the page is returned.
    pub async fn get(&self, url: &str, opts: RequestOpts) -> Result<FetchedPage, HttpError> {
        let url = Url::parse(url).map_err(|e| HttpError::Url(e.to_string()))?;
        let method = Method::GET;
        let timeout = opts.timeout.unwrap_or(self.default_timeout);
        let req_id = Uuid::new_v4();

        let rb = self.inner.request(method.clone(), url.clone()).timeout(timeout);

        tracing::debug!(
            req_id=%req_id,
            method=%method,
            host_path=%format!("{}{}", url.host_str().unwrap_or("-"), url.path()),
            timeout_ms=timeout.as_millis() as u64,
            "http.request.start"
        );

        if raw_enabled() {
            let shown = vec![("User-Agent".to_string(), self.user_agent.clone())];
            let curl = make_curl(&method, &url, &shown);
            tracing::debug!(target: "http.raw", %req_id, %curl, "request");
        }

        // ----- Send -----
        let t0 = Instant::now();
        let resp = rb.send().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                req_id=%req_id,
                timed_out=err.is_timeout(),
                message=%message,
                "http.network_error.send"
            );
            HttpError::Network(message)
        })?;

        let status = resp.status();
        let headers = resp.headers().clone();
        let body = resp.bytes().await.map_err(|err| {
            let message = err.to_string();
            tracing::warn!(
                req_id=%req_id,
                %status,
                message=%message,
                "http.network_error.body"
            );
            HttpError::Network(message)
        })?;
        let dur_ms = t0.elapsed().as_millis() as u64;

        tracing::debug!(
            req_id=%req_id,
            %status,
            duration_ms=dur_ms,
            body_len=body.len(),
            "http.response"
        );

        if raw_enabled() {
            let hdrs = redact_headers(&headers);
            let truncated = body.len() > RAW_MAX_BODY;
            let shown = &body[..body.len().min(RAW_MAX_BODY)];
            let text = String::from_utf8_lossy(shown);
            tracing::info!(
                target:"http.raw",
                %req_id,
                status=%status,
                duration_ms=dur_ms,
                headers=?hdrs,
                body=%text,
                truncated
            );
        }

        if !status.is_success() {
            tracing::warn!(
                req_id=%req_id,
                %status,
                url=%url,
                body_snippet=%snip_body(&body),
                "http.status_not_success"
            );
        }

        Ok(FetchedPage { url, status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{COOKIE, HeaderValue, USER_AGENT};

    #[test]
    fn snippet_is_truncated_on_char_boundary() {
        let body = "é".repeat(400);
        let snip = snip_body(body.as_bytes());
        assert!(snip.ends_with("..."));
        assert!(snip.len() <= SNIPPET_MAX + 3);
    }

    #[test]
    fn short_bodies_are_not_truncated() {
        assert_eq!(snip_body(b"<html></html>"), "<html></html>");
    }

    #[test]
    fn cookies_are_redacted() {
        let mut h = HeaderMap::new();
        h.insert(COOKIE, HeaderValue::from_static("session=abc"));
        h.insert(USER_AGENT, HeaderValue::from_static("test-agent"));
        let redacted = redact_headers(&h);
        assert!(redacted.contains(&("cookie".to_string(), "<redacted>".to_string())));
        assert!(redacted.contains(&("user-agent".to_string(), "test-agent".to_string())));
    }

    #[test]
    fn curl_line_quotes_url_and_headers() {
        let url = Url::parse("https://linktr.ee/example").unwrap();
        let curl = make_curl(
            &Method::GET,
            &url,
            &[("User-Agent".to_string(), "it's me".to_string())],
        );
        assert!(curl.starts_with("curl -XGET"));
        assert!(curl.contains(r"-H 'User-Agent: it'\''s me'"));
        assert!(curl.ends_with("'https://linktr.ee/example'"));
    }

    #[tokio::test]
    async fn rejects_unparseable_url() {
        let client = HttpClient::new(DEFAULT_USER_AGENT).unwrap();
        let err = client.get("not a url", RequestOpts::default()).await.unwrap_err();
        assert!(matches!(err, HttpError::Url(_)));
    }
}
