use crate::config::SelectorConfig;
use crate::session::NamedSelector;
use crate::ConfigError;

/// Every structural selector used during extraction, compiled once per run
#[derive(Debug, Clone)]
pub struct SiteSelectors {
    pub title: NamedSelector,
    pub content: NamedSelector,
    pub summary: NamedSelector,
    pub categories: NamedSelector,
    pub image: NamedSelector,
    pub lead_feature: NamedSelector,
    pub lead_feature_link: NamedSelector,
    pub news: NamedSelector,
    pub trivia: NamedSelector,
    pub on_this_day: NamedSelector,
    pub digest_item: NamedSelector,
    pub archive_links: NamedSelector,

    /// Any anchor carrying a link target
    pub anchor: NamedSelector,

    /// Any paragraph
    pub paragraph: NamedSelector,
}

impl SiteSelectors {
    pub fn new(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            title: NamedSelector::parse(&config.title)?,
            content: NamedSelector::parse(&config.content)?,
            summary: NamedSelector::parse(&config.summary)?,
            categories: NamedSelector::parse(&config.categories)?,
            image: NamedSelector::parse(&config.image)?,
            lead_feature: NamedSelector::parse(&config.lead_feature)?,
            lead_feature_link: NamedSelector::parse(&config.lead_feature_link)?,
            news: NamedSelector::parse(&config.news)?,
            trivia: NamedSelector::parse(&config.trivia)?,
            on_this_day: NamedSelector::parse(&config.on_this_day)?,
            digest_item: NamedSelector::parse(&config.digest_item)?,
            archive_links: NamedSelector::parse(&config.archive_links)?,
            anchor: NamedSelector::parse("a[href]")?,
            paragraph: NamedSelector::parse("p")?,
        })
    }
}
