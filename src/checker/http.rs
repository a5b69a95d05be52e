// src/checker/http.rs
// =============================================================================
// This module checks if URLs are alive by making HTTP requests.
//
// Key functionality:
// - One GET per unique URL, all running concurrently
// - 429 Too Many Requests: wait a fixed backoff and try again, up to a
//   fixed number of attempts
// - Network failures (timeout, DNS, TLS...) are kept apart from HTTP
//   status codes so a dead host is never mistaken for a bad page
//
// The network itself sits behind the `Probe` trait. `ReqwestProbe` is the
// real one; tests plug in a fake that returns scripted status codes.
// =============================================================================

use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt}; // StreamExt gives us .buffer_unordered()
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::Result;

/// The only status code that counts as a working link
pub const SUCCESS_STATUS: u16 = 200;

/// Status code servers use to say "slow down"
pub const RATE_LIMITED_STATUS: u16 = 429;

/// Why a request got no HTTP response at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransportKind {
    /// Request timed out
    Timeout,
    /// Could not resolve hostname
    Dns,
    /// SSL/TLS certificate error
    Tls,
    /// Connection refused or reset
    Connect,
    /// Too many redirects (redirect loop)
    TooManyRedirects,
    /// Other error
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportError {
    pub kind: TransportKind,
    pub message: String,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Something that can GET a URL and report the status code
#[async_trait]
pub trait Probe: Send + Sync {
    async fn get(&self, url: &str) -> std::result::Result<u16, TransportError>;
}

/// Final state of one URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum LinkStatus {
    /// The server answered with this status code
    Status { code: u16 },
    /// No HTTP response was received
    Transport { kind: TransportKind, message: String },
}

/// The result of checking a single URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    /// The URL that was checked
    pub url: String,
    /// The status of the link
    #[serde(flatten)] // This merges the LinkStatus fields into CheckOutcome
    pub status: LinkStatus,
    /// How many requests were made, retries included
    pub attempts: u32,
}

impl CheckOutcome {
    /// True only for a 200 response
    pub fn is_ok(&self) -> bool {
        matches!(self.status, LinkStatus::Status { code } if code == SUCCESS_STATUS)
    }
}

/// `Probe` backed by a shared reqwest client
#[derive(Debug, Clone)]
pub struct ReqwestProbe {
    client: Client,
}

impl ReqwestProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        // We'll reuse this client for all requests (connection pooling)
        let client = Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5)) // Follow up to 5 redirects
            .user_agent(concat!("doclinks/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Probe for ReqwestProbe {
    async fn get(&self, url: &str) -> std::result::Result<u16, TransportError> {
        match self.client.get(url).send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) => Err(categorize_error(e)),
        }
    }
}

// Checks every URL concurrently
//
// Parameters:
//   probe: does the actual GET
//   urls: unique URLs, each checked exactly once
//   retry: backoff and attempt budget for 429 responses
//   max_concurrency: in-flight cap, None = all at once
//
// Returns: one CheckOutcome per URL, sorted by URL
pub async fn check_links<P>(
    probe: &P,
    urls: Vec<String>,
    retry: RetryPolicy,
    max_concurrency: Option<usize>,
) -> Vec<CheckOutcome>
where
    P: Probe + ?Sized,
{
    let limit = max_concurrency.unwrap_or(urls.len()).max(1);

    // Each future borrows the probe; they all run on this task and are
    // polled together, so a sleeping future never holds up the others
    let futures = urls
        .into_iter()
        .map(|url| check_single_link(probe, url, retry));

    let mut outcomes: Vec<CheckOutcome> = stream::iter(futures)
        .buffer_unordered(limit)
        .collect()
        .await;

    // Completion order is random; sort for stable reports
    outcomes.sort_by(|a, b| a.url.cmp(&b.url));
    outcomes
}

// Checks a single URL, retrying while the server rate-limits us
//
// The last status seen is the result once the attempt budget is spent.
pub async fn check_single_link<P>(probe: &P, url: String, retry: RetryPolicy) -> CheckOutcome
where
    P: Probe + ?Sized,
{
    let max_attempts = retry.max_attempts.max(1);
    let mut attempts = 0;

    loop {
        attempts += 1;

        let status = match probe.get(&url).await {
            Ok(code) if code == RATE_LIMITED_STATUS && attempts < max_attempts => {
                warn!(
                    %url,
                    attempt = attempts,
                    backoff_secs = retry.backoff.as_secs_f64(),
                    "rate limited, backing off"
                );
                tokio::time::sleep(retry.backoff).await;
                continue;
            }
            Ok(code) => LinkStatus::Status { code },
            Err(e) => LinkStatus::Transport {
                kind: e.kind,
                message: e.message,
            },
        };

        debug!(%url, ?status, attempts, "checked");
        return CheckOutcome {
            url,
            status,
            attempts,
        };
    }
}

// Categorizes different error types from reqwest
//
// reqwest errors can happen for many reasons:
// - Network timeout
// - DNS resolution failure
// - SSL certificate issues
// - Too many redirects
fn categorize_error(error: reqwest::Error) -> TransportError {
    // Convert error to string once, lowercase for matching
    let error_string = error.to_string();
    let lowered = format!("{error:?}").to_lowercase();

    let (kind, message) = if error.is_timeout() {
        (TransportKind::Timeout, "Request timed out".to_string())
    } else if error.is_redirect() {
        (TransportKind::TooManyRedirects, "Too many redirects".to_string())
    } else if lowered.contains("certificate") || lowered.contains("tls") || lowered.contains("ssl") {
        (TransportKind::Tls, "SSL certificate error".to_string())
    } else if error.is_connect() {
        // Connection errors often mean DNS issues or host unreachable
        if lowered.contains("dns") || lowered.contains("resolve") {
            (TransportKind::Dns, "Could not resolve hostname".to_string())
        } else {
            (TransportKind::Connect, "Connection failed".to_string())
        }
    } else {
        (TransportKind::Other, error_string)
    };

    TransportError { kind, message }
}

// -----------------------------------------------------------------------------
// NOTES:
//
// 1. Why a loop instead of calling ourselves again on 429?
//    - The attempt counter is explicit and the stack never grows
//
// 2. Why buffer_unordered with limit = number of URLs?
//    - Every URL starts right away, as if each had its own thread
//    - The results come out of the stream one by one and are collected
//      into a Vec, so nothing is ever written from two places at once
//    - --max-concurrency lowers the limit; each URL is still checked once
//
// 3. Why is only 200 OK a success?
//    - Redirects are followed by the client, so a moved page still ends in
//      200; anything else (even 204) is worth a human look
// -----------------------------------------------------------------------------
