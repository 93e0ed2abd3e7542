//! Page fetching
//!
//! Two retrieval modes behind one entry point: a plain HTTP GET with a
//! spoofed desktop-browser identity, and a headless-Chrome session for
//! pages that only fill their tables after JavaScript runs. The strategy
//! selector decides which mode a target gets and owns the fallback.

use anyhow::Context;
use headless_chrome::{Browser, LaunchOptions};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, HeaderMap, HeaderValue};
use std::time::Duration;
use tracing::{debug, warn};

/// Identity presented to the site in both modes; requests without a real
/// browser User-Agent get rejected.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/127.0.0.0 Safari/537.36";

/// All errors that can occur while retrieving a page.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    /// HTTP request failed (network, DNS, TLS, timeout).
    #[error("http request failed for {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status code.
    #[error("unexpected status {status} for {url}")]
    Status { url: String, status: StatusCode },

    /// Failed to read the response body as text.
    #[error("failed to read response body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The headless browser session failed at any step.
    #[error("headless browser failed for {url}: {message}")]
    Browser { url: String, message: String },

    /// The rendered fetch exceeded its hard deadline.
    #[error("fetch timed out after {seconds}s for {url}")]
    Timeout { url: String, seconds: u64 },
}

/// How a single fetch retrieves the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Plain HTTP GET
    Static,
    /// Headless browser, fully rendered DOM
    Rendered,
}

/// Per-target policy for picking the fetch mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStrategy {
    /// Plain HTTP only
    Static,
    /// Headless browser only
    Rendered,
    /// Try plain HTTP first, fall back to the browser on any failure
    Auto,
}

impl std::str::FromStr for FetchStrategy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "static" => Ok(Self::Static),
            "rendered" => Ok(Self::Rendered),
            "auto" => Ok(Self::Auto),
            other => anyhow::bail!(
                "unknown fetch strategy '{}', expected 'static', 'rendered' or 'auto'",
                other
            ),
        }
    }
}

/// Page fetcher - owns the HTTP client and the browser launch parameters.
pub struct PageFetcher {
    client: reqwest::Client,
    user_agent: String,
    browser_timeout: Duration,
    browser_settle: Duration,
}

impl PageFetcher {
    pub fn new(
        user_agent: &str,
        http_timeout: Duration,
        browser_timeout: Duration,
        browser_settle: Duration,
    ) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(
            ACCEPT_LANGUAGE,
            HeaderValue::from_static("fr-FR,fr;q=0.9,en;q=0.8"),
        );

        Self {
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .default_headers(headers)
                .timeout(http_timeout)
                .build()
                .expect("Failed to build reqwest client"),
            user_agent: user_agent.to_string(),
            browser_timeout,
            browser_settle,
        }
    }

    /// Retrieve the page text for a URL in the given mode.
    pub async fn fetch(&self, url: &str, mode: FetchMode) -> Result<String, FetchError> {
        match mode {
            FetchMode::Static => self.fetch_static(url).await,
            FetchMode::Rendered => self.fetch_rendered(url).await,
        }
    }

    /// Retrieve the page text for a URL under a strategy.
    ///
    /// `Auto` tries the cheap static GET first and falls back to a full
    /// browser session when the site blocks or breaks it.
    pub async fn fetch_with_strategy(
        &self,
        url: &str,
        strategy: FetchStrategy,
    ) -> Result<String, FetchError> {
        match strategy {
            FetchStrategy::Static => self.fetch(url, FetchMode::Static).await,
            FetchStrategy::Rendered => self.fetch(url, FetchMode::Rendered).await,
            FetchStrategy::Auto => match self.fetch(url, FetchMode::Static).await {
                Ok(html) => Ok(html),
                Err(e) => {
                    warn!(
                        "Static fetch of {} failed ({}), falling back to rendered fetch",
                        url, e
                    );
                    self.fetch(url, FetchMode::Rendered).await
                }
            },
        }
    }

    async fn fetch_static(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {} (static)", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url.to_string(),
            source,
        })
    }

    /// Fetch through a fresh headless-Chrome session.
    ///
    /// The browser lives only inside the blocking closure, so it is torn
    /// down when the closure returns no matter which path it takes. The
    /// timeout bounds the caller; a timed-out session finishes dying in
    /// the background.
    async fn fetch_rendered(&self, url: &str) -> Result<String, FetchError> {
        debug!("Fetching {} (rendered)", url);

        let target = url.to_string();
        let user_agent = self.user_agent.clone();
        let settle = self.browser_settle;
        let seconds = self.browser_timeout.as_secs();

        let task = tokio::task::spawn_blocking(move || render_page(&target, &user_agent, settle));

        match tokio::time::timeout(self.browser_timeout, task).await {
            Ok(Ok(result)) => result.map_err(|e| FetchError::Browser {
                url: url.to_string(),
                message: format!("{:#}", e),
            }),
            Ok(Err(join_error)) => Err(FetchError::Browser {
                url: url.to_string(),
                message: join_error.to_string(),
            }),
            Err(_) => Err(FetchError::Timeout {
                url: url.to_string(),
                seconds,
            }),
        }
    }
}

/// Drive one browser session to a fully rendered DOM and return its HTML.
fn render_page(url: &str, user_agent: &str, settle: Duration) -> anyhow::Result<String> {
    // Sandboxing disabled: the service runs on constrained-memory hosts
    // where the Chrome sandbox cannot start.
    let launch_options = LaunchOptions {
        headless: true,
        sandbox: false,
        ..Default::default()
    };

    let browser = Browser::new(launch_options).context("Failed to launch headless browser")?;

    let tab = browser.new_tab().context("Failed to create new tab")?;

    tab.set_user_agent(user_agent, None, None)
        .context("Failed to set user agent")?;

    tab.navigate_to(url).context("Failed to navigate to URL")?;
    tab.wait_until_navigated()
        .context("Failed to wait for page navigation")?;

    // The tables arrive via late XHR on some pages; give them a moment.
    std::thread::sleep(settle);

    tab.get_content().context("Failed to get page content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_strategy_parses_known_values() {
        assert_eq!("static".parse::<FetchStrategy>().unwrap(), FetchStrategy::Static);
        assert_eq!("Rendered".parse::<FetchStrategy>().unwrap(), FetchStrategy::Rendered);
        assert_eq!("AUTO".parse::<FetchStrategy>().unwrap(), FetchStrategy::Auto);
    }

    #[test]
    fn test_fetch_strategy_rejects_unknown_values() {
        assert!("curl".parse::<FetchStrategy>().is_err());
        assert!("".parse::<FetchStrategy>().is_err());
    }
}
