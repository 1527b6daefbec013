//! HTTP-backed page loader
//!
//! This module handles every network request made during a run:
//! - Building the HTTP client with the identifying user agent
//! - Following redirects so endpoint targets resolve to the final article
//! - Classifying failures into navigation errors
//! - Pacing after each successful navigation

use crate::config::{Config, UserAgentConfig};
use crate::session::{LoadedPage, PageLoader, Pacer};
use crate::{HarvestError, Result};
use async_trait::async_trait;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;

/// Maximum redirect hops followed for one navigation
const MAX_REDIRECTS: usize = 10;

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Upper bound for one complete page load
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wiki_harvest::config::UserAgentConfig;
/// use wiki_harvest::session::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10).min(timeout))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// A browsing session that loads pages over HTTP
pub struct HttpSession {
    client: Client,
    pacer: Pacer,
    current: Option<LoadedPage>,
}

impl HttpSession {
    /// Creates a session from the run configuration
    pub fn new(config: &Config) -> Result<Self> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.pacing.request_timeout_secs),
        )?;
        tracing::info!("HTTP session initialized ({})", config.user_agent.header_value());
        Ok(Self::with_client(
            client,
            Pacer::from_millis(config.pacing.navigation_delay_ms),
        ))
    }

    pub fn with_client(client: Client, pacer: Pacer) -> Self {
        Self {
            client,
            pacer,
            current: None,
        }
    }
}

#[async_trait]
impl PageLoader for HttpSession {
    async fn load(&mut self, target: &str) -> Result<()> {
        let page = fetch_page(&self.client, target).await?;
        tracing::info!("Navigated to {}", page.url);
        self.current = Some(page);
        self.pacer.pause().await;
        Ok(())
    }

    fn current(&self) -> Option<&LoadedPage> {
        self.current.as_ref()
    }
}

/// Fetches one page, following redirects
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with an HTML body | `LoadedPage` at the final URL |
/// | non-2xx status | Navigation failure naming the status |
/// | non-HTML content type | Navigation failure naming the type |
/// | timeout / connection error | Navigation failure |
async fn fetch_page(client: &Client, target: &str) -> Result<LoadedPage> {
    let response = client
        .get(target)
        .send()
        .await
        .map_err(|e| HarvestError::navigation(target, describe_request_error(&e)))?;

    let status = response.status();
    if !status.is_success() {
        return Err(HarvestError::navigation(target, format!("HTTP {}", status)));
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return Err(HarvestError::navigation(
            target,
            format!("expected HTML, got '{}'", content_type),
        ));
    }

    let final_url = response.url().clone();
    let body = response
        .text()
        .await
        .map_err(|e| HarvestError::navigation(target, describe_request_error(&e)))?;

    Ok(LoadedPage::new(final_url, body))
}

fn describe_request_error(error: &reqwest::Error) -> String {
    if error.is_timeout() {
        "request timeout".to_string()
    } else if error.is_connect() {
        "connection refused".to_string()
    } else if error.is_redirect() {
        "too many redirects".to_string()
    } else {
        error.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session() -> HttpSession {
        let client =
            build_http_client(&UserAgentConfig::default(), Duration::from_secs(5)).unwrap();
        HttpSession::with_client(client, Pacer::none())
    }

    fn html(body: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html; charset=UTF-8")
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(10));
        assert!(client.is_ok());
    }

    #[tokio::test]
    async fn test_load_sets_current_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Rust"))
            .respond_with(html("<h1 id=\"firstHeading\">Rust</h1>"))
            .mount(&server)
            .await;

        let mut session = session();
        assert!(session.current().is_none());

        let target = format!("{}/wiki/Rust", server.uri());
        session.load(&target).await.unwrap();

        assert_eq!(session.current_target(), Some(target.as_str()));
        assert!(session.current().unwrap().body.contains("firstHeading"));
    }

    #[tokio::test]
    async fn test_load_follows_redirect_to_final_url() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Special:Random"))
            .respond_with(
                ResponseTemplate::new(302)
                    .insert_header("location", format!("{}/wiki/Ferris", server.uri()).as_str()),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wiki/Ferris"))
            .respond_with(html("<h1 id=\"firstHeading\">Ferris</h1>"))
            .mount(&server)
            .await;

        let mut session = session();
        session
            .load(&format!("{}/wiki/Special:Random", server.uri()))
            .await
            .unwrap();

        assert_eq!(
            session.current_target(),
            Some(format!("{}/wiki/Ferris", server.uri()).as_str())
        );
    }

    #[tokio::test]
    async fn test_http_error_is_navigation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut session = session();
        let result = session.load(&format!("{}/wiki/Missing", server.uri())).await;

        match result {
            Err(HarvestError::Navigation { reason, .. }) => assert!(reason.contains("404")),
            other => panic!("expected navigation failure, got {:?}", other),
        }
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn test_non_html_is_navigation_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw("{}", "application/json"),
            )
            .mount(&server)
            .await;

        let mut session = session();
        let result = session.load(&format!("{}/api", server.uri())).await;
        assert!(matches!(result, Err(HarvestError::Navigation { .. })));
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/wiki/Good"))
            .respond_with(html("<p>good</p>"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/wiki/Bad"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut session = session();
        let good = format!("{}/wiki/Good", server.uri());
        session.load(&good).await.unwrap();
        assert!(session.load(&format!("{}/wiki/Bad", server.uri())).await.is_err());

        assert_eq!(session.current_target(), Some(good.as_str()));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_navigation_failure() {
        let mut session = session();
        let result = session.load("http://127.0.0.1:1/wiki/Nowhere").await;
        assert!(matches!(result, Err(HarvestError::Navigation { .. })));
    }
}
