//! HTTP fetcher implementation
//!
//! This module handles every HTTP request the archiver makes:
//! - Building the HTTP client with user agent and timeouts
//! - GET requests with redirect following disabled
//! - Classifying responses into success, soft failure and hard failure
//!
//! The site answers requests for missing or restricted items with a
//! redirect instead of an error status, so a 3xx response is never
//! followed and never treated as content.

use crate::config::HttpConfig;
use crate::ArchiveError;
use reqwest::{header::LOCATION, redirect::Policy, Client, StatusCode};
use std::borrow::Cow;
use std::time::Duration;
use url::Url;

/// A successfully fetched response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL the response was served from; base for relative links
    pub final_url: Url,

    /// Raw response body
    pub body: Vec<u8>,
}

impl FetchedPage {
    /// Body decoded as UTF-8, with invalid sequences replaced
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// 2xx response
    Success(FetchedPage),

    /// 3xx response: the site's signal for a missing or inaccessible item
    SoftFailure {
        /// The HTTP status code
        status_code: u16,
        /// Redirect target, if the server sent one
        location: Option<String>,
    },

    /// 4xx or 5xx response
    HardFailure {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection, timeout or body read failure
    TransportError {
        /// Error description
        error: String,
    },
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Converts a non-success outcome into the matching error
    ///
    /// # Arguments
    ///
    /// * `url` - The requested URL, used as error context
    pub fn into_page(self, url: &Url) -> Result<FetchedPage, ArchiveError> {
        match self {
            Self::Success(page) => Ok(page),
            Self::SoftFailure { status_code, .. } => Err(ArchiveError::SoftFailure {
                url: url.to_string(),
                status: status_code,
            }),
            Self::HardFailure { status_code } => Err(ArchiveError::HardFailure {
                url: url.to_string(),
                status: status_code,
            }),
            Self::TransportError { error } => Err(ArchiveError::Transport {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// Redirects are never followed: the fetcher has to see the 3xx status
/// itself to report it as a soft failure.
///
/// # Example
///
/// ```no_run
/// use bookshelf::config::HttpConfig;
/// use bookshelf::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .redirect(Policy::none())
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues GET requests and classifies their responses
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    /// Wraps an existing client
    ///
    /// The client must have redirect following disabled, see [`build_http_client`].
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds a fetcher with its own client
    pub fn from_config(config: &HttpConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(build_http_client(config)?))
    }

    /// Fetches a URL once and classifies the response
    ///
    /// | Response | Outcome |
    /// |----------|---------|
    /// | 3xx | `SoftFailure`, body never read |
    /// | 4xx, 5xx | `HardFailure` |
    /// | connection error, timeout | `TransportError` |
    /// | anything else | `Success` |
    ///
    /// No retries happen here.
    pub async fn fetch(&self, url: &Url) -> FetchOutcome {
        let response = match self.client.get(url.clone()).send().await {
            Ok(response) => response,
            Err(e) => return transport_error(e),
        };

        let status = response.status();

        match classify_status(status) {
            Some(FetchOutcome::SoftFailure { status_code, .. }) => {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string);
                return FetchOutcome::SoftFailure {
                    status_code,
                    location,
                };
            }
            Some(outcome) => return outcome,
            None => {}
        }

        let final_url = response.url().clone();

        match response.bytes().await {
            Ok(body) => FetchOutcome::Success(FetchedPage {
                final_url,
                body: body.to_vec(),
            }),
            Err(e) => transport_error(e),
        }
    }
}

/// Classifies a status code that ends the fetch before the body is read
///
/// Returns `None` for statuses whose body should be read.
pub fn classify_status(status: StatusCode) -> Option<FetchOutcome> {
    if status.is_redirection() {
        Some(FetchOutcome::SoftFailure {
            status_code: status.as_u16(),
            location: None,
        })
    } else if status.is_client_error() || status.is_server_error() {
        Some(FetchOutcome::HardFailure {
            status_code: status.as_u16(),
        })
    } else {
        None
    }
}

fn transport_error(e: reqwest::Error) -> FetchOutcome {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        format!("Connection failed: {}", e)
    } else {
        e.to_string()
    };
    FetchOutcome::TransportError { error }
}
