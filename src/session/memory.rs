use crate::session::{LoadedPage, PageLoader};
use crate::{HarvestError, Result};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use url::Url;

/// An in-memory site serving fixed pages
///
/// Redirect entries map one target to a rotating list of destinations, which
/// is how endpoints such as a random-article page are modelled: every load of
/// the endpoint resolves to the next destination in turn.
#[derive(Debug, Default)]
pub struct StaticSite {
    pages: HashMap<String, String>,
    redirects: HashMap<String, VecDeque<String>>,
    history: Vec<String>,
    current: Option<LoadedPage>,
}

impl StaticSite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `body` at `url`
    pub fn add_page(&mut self, url: impl Into<String>, body: impl Into<String>) -> &mut Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    /// Makes `from` resolve to `to`, appending to any existing rotation
    pub fn add_redirect(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.redirects.entry(from.into()).or_default().push_back(to.into());
        self
    }

    /// Every target requested so far, in order, including failed ones
    pub fn history(&self) -> &[String] {
        &self.history
    }

    fn resolve(&mut self, target: &str) -> String {
        match self.redirects.get_mut(target) {
            Some(rotation) if !rotation.is_empty() => {
                let next = rotation.pop_front().unwrap_or_default();
                rotation.push_back(next.clone());
                next
            }
            _ => target.to_string(),
        }
    }
}

#[async_trait]
impl PageLoader for StaticSite {
    async fn load(&mut self, target: &str) -> Result<()> {
        self.history.push(target.to_string());

        let resolved = self.resolve(target);
        let body = self
            .pages
            .get(&resolved)
            .cloned()
            .ok_or_else(|| HarvestError::navigation(target, "page not found"))?;
        let url = Url::parse(&resolved).map_err(|e| HarvestError::navigation(target, e))?;

        tracing::debug!("Served {} from memory", url);
        self.current = Some(LoadedPage::new(url, body));
        Ok(())
    }

    fn current(&self) -> Option<&LoadedPage> {
        self.current.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serves_registered_pages() {
        let mut site = StaticSite::new();
        site.add_page("https://w.test/wiki/A", "<p>A</p>");

        site.load("https://w.test/wiki/A").await.unwrap();
        assert_eq!(site.current_target(), Some("https://w.test/wiki/A"));
        assert_eq!(site.history(), ["https://w.test/wiki/A".to_string()]);
    }

    #[tokio::test]
    async fn test_unknown_page_keeps_previous() {
        let mut site = StaticSite::new();
        site.add_page("https://w.test/wiki/A", "<p>A</p>");

        site.load("https://w.test/wiki/A").await.unwrap();
        let result = site.load("https://w.test/wiki/Missing").await;

        assert!(matches!(result, Err(HarvestError::Navigation { .. })));
        assert_eq!(site.current_target(), Some("https://w.test/wiki/A"));
        assert_eq!(site.history().len(), 2);
    }

    #[tokio::test]
    async fn test_redirects_rotate() {
        let mut site = StaticSite::new();
        site.add_page("https://w.test/wiki/A", "A")
            .add_page("https://w.test/wiki/B", "B")
            .add_redirect("https://w.test/wiki/Special:Random", "https://w.test/wiki/A")
            .add_redirect("https://w.test/wiki/Special:Random", "https://w.test/wiki/B");

        let mut seen = Vec::new();
        for _ in 0..3 {
            site.load("https://w.test/wiki/Special:Random").await.unwrap();
            seen.push(site.current_target().unwrap().to_string());
        }

        assert_eq!(
            seen,
            vec![
                "https://w.test/wiki/A",
                "https://w.test/wiki/B",
                "https://w.test/wiki/A"
            ]
        );
    }

    #[tokio::test]
    async fn test_document_before_load_fails() {
        let site = StaticSite::new();
        assert!(matches!(site.document(), Err(HarvestError::NoPageLoaded)));
    }
}
