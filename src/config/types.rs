use serde::Deserialize;
use url::Url;

/// Main configuration structure for Wiki-Harvest
///
/// Every section falls back to the English-Wikipedia defaults, so an empty
/// file (or no file at all) is a valid configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    pub sampling: SamplingConfig,
    pub pacing: PacingConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub selectors: SelectorConfig,
}

/// Where the corpus lives and how its addresses are shaped
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SiteConfig {
    /// Scheme and host of the site, e.g. `https://en.wikipedia.org`
    pub base_url: String,

    /// Path of the curated home page
    pub main_page: String,

    /// Path prefix shared by every article, e.g. `/wiki/`
    pub article_path: String,

    /// Endpoint that redirects to a random article
    pub random_page: String,

    /// Search endpoint accepting `search=<term>`
    pub search_path: String,

    /// Listing page used to top up the featured harvest
    pub featured_archive: String,

    /// Path markers identifying non-article namespaces
    pub namespace_denylist: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org".to_string(),
            main_page: "/wiki/Main_Page".to_string(),
            article_path: "/wiki/".to_string(),
            random_page: "/wiki/Special:Random".to_string(),
            search_path: "/w/index.php".to_string(),
            featured_archive: "/wiki/Wikipedia:Today%27s_featured_article/Archives".to_string(),
            namespace_denylist: [
                "Special:",
                "Category:",
                "File:",
                "Help:",
                "Wikipedia:",
                "Talk:",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

impl SiteConfig {
    /// Resolves a site-relative path (or an absolute URL) against the base URL
    pub fn url_for(&self, path: &str) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)?.join(path)
    }

    /// Returns true if the URL lives on this site under the article path
    ///
    /// This is a prefix test only: namespace pages such as `Special:Search`
    /// also pass, mirroring how a browser address bar would be checked.
    pub fn is_article_url(&self, url: &Url) -> bool {
        let same_origin = Url::parse(&self.base_url)
            .map(|base| base.origin() == url.origin())
            .unwrap_or(false);

        same_origin && url.path().starts_with(&self.article_path)
    }

    /// Returns true if the path carries one of the denylisted namespace markers
    pub fn is_denylisted(&self, path: &str) -> bool {
        self.namespace_denylist
            .iter()
            .any(|marker| path.contains(marker.as_str()))
    }
}

/// Breadth-first crawl limits
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the starting page
    pub max_depth: u32,

    /// Maximum number of pages visited in one crawl
    pub max_articles: usize,

    /// Outbound links harvested per visited page
    pub link_fanout: usize,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_articles: 25,
            link_fanout: 10,
        }
    }
}

/// Retry bounds for random sampling
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SamplingConfig {
    /// Give up after this many failed samples in a row
    pub max_consecutive_failures: u32,

    /// Total attempts allowed per requested sample
    pub max_attempts_per_sample: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            max_consecutive_failures: 10,
            max_attempts_per_sample: 5,
        }
    }
}

/// Fixed pauses inserted between remote interactions (milliseconds)
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PacingConfig {
    /// Pause after every successful navigation
    pub navigation_delay_ms: u64,

    /// Pause between random samples
    pub sample_delay_ms: u64,

    /// Pause after submitting a search
    pub search_settle_ms: u64,

    /// Upper bound for a single page load
    pub request_timeout_secs: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            navigation_delay_ms: 2000,
            sample_delay_ms: 1000,
            search_settle_ms: 3000,
            request_timeout_secs: 10,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    /// Name of the harvester
    pub crawler_name: String,

    /// Version of the harvester
    pub crawler_version: String,

    /// URL with information about the harvester
    pub contact_url: String,

    /// Email address for harvester-related contact
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "WikiHarvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://github.com/wiki-harvest/wiki-harvest".to_string(),
            contact_email: "wiki-harvest@example.com".to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the header value: `Name/Version (+ContactURL; ContactEmail)`
    pub fn header_value(&self) -> String {
        format!(
            "{}/{} (+{}; {})",
            self.crawler_name, self.crawler_version, self.contact_url, self.contact_email
        )
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Directory receiving the timestamped CSV export
    pub csv_dir: String,

    /// File name prefix of the CSV export
    pub csv_prefix: String,

    /// Path to the SQLite database file
    pub database_path: String,

    /// Log file mirrored from the console, empty to disable
    pub log_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_dir: ".".to_string(),
            csv_prefix: "wikipedia_articles".to_string(),
            database_path: "wikipedia_data.db".to_string(),
            log_file: "wiki_harvest.log".to_string(),
        }
    }
}

/// CSS selectors describing the structure of article and home pages
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    pub title: String,
    pub content: String,
    pub summary: String,
    pub categories: String,
    pub image: String,
    pub lead_feature: String,
    pub lead_feature_link: String,
    pub news: String,
    pub trivia: String,
    pub on_this_day: String,
    pub digest_item: String,
    pub archive_links: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            title: "#firstHeading".to_string(),
            content: "#mw-content-text".to_string(),
            summary: "#mw-content-text p:not(.mw-empty-elt)".to_string(),
            categories: "#mw-normal-catlinks ul li a".to_string(),
            image: ".infobox img, .thumb img".to_string(),
            lead_feature: "#mp-tfa".to_string(),
            lead_feature_link: "p > b > a".to_string(),
            news: "#mp-itn".to_string(),
            trivia: "#mp-dyk".to_string(),
            on_this_day: "#mp-otd".to_string(),
            digest_item: "ul li".to_string(),
            archive_links: "#mw-content-text ul li a".to_string(),
        }
    }
}
