use crate::config::types::{
    Config, CrawlerConfig, OutputConfig, SamplingConfig, SelectorConfig, SiteConfig,
    UserAgentConfig,
};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawler_config(&config.crawler)?;
    validate_sampling_config(&config.sampling)?;
    validate_user_agent_config(&config.user_agent)?;
    validate_output_config(&config.output)?;
    validate_selector_config(&config.selectors)?;
    Ok(())
}

/// Validates site addressing
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if base.scheme() != "http" && base.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url must use http or https, got '{}'",
            config.base_url
        )));
    }

    for (name, path) in [
        ("main_page", &config.main_page),
        ("article_path", &config.article_path),
        ("random_page", &config.random_page),
        ("search_path", &config.search_path),
        ("featured_archive", &config.featured_archive),
    ] {
        if !path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} must be an absolute path starting with '/', got '{}'",
                name, path
            )));
        }
    }

    if config.article_path.len() < 2 || !config.article_path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article_path must look like '/wiki/', got '{}'",
            config.article_path
        )));
    }

    if config.namespace_denylist.iter().any(|m| m.is_empty()) {
        return Err(ConfigError::Validation(
            "namespace_denylist cannot contain empty markers".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl limits
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    // max_depth >= 0 is always true for u32, so no check needed

    if config.max_articles < 1 {
        return Err(ConfigError::Validation(format!(
            "max_articles must be >= 1, got {}",
            config.max_articles
        )));
    }

    if config.link_fanout < 1 {
        return Err(ConfigError::Validation(format!(
            "link_fanout must be >= 1, got {}",
            config.link_fanout
        )));
    }

    Ok(())
}

/// Validates sampling retry bounds
fn validate_sampling_config(config: &SamplingConfig) -> Result<(), ConfigError> {
    if config.max_consecutive_failures < 1 {
        return Err(ConfigError::Validation(
            "max_consecutive_failures must be >= 1".to_string(),
        ));
    }

    if config.max_attempts_per_sample < 1 {
        return Err(ConfigError::Validation(
            "max_attempts_per_sample must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler_name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler_name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    Url::parse(&config.contact_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid contact_url: {}", e)))?;

    validate_email(&config.contact_email)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_prefix.is_empty() {
        return Err(ConfigError::Validation(
            "csv_prefix cannot be empty".to_string(),
        ));
    }

    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Checks that every structural selector compiles
fn validate_selector_config(config: &SelectorConfig) -> Result<(), ConfigError> {
    for selector in [
        &config.title,
        &config.content,
        &config.summary,
        &config.categories,
        &config.image,
        &config.lead_feature,
        &config.lead_feature_link,
        &config.news,
        &config.trivia,
        &config.on_this_day,
        &config.digest_item,
        &config.archive_links,
    ] {
        compile_selector(selector)?;
    }
    Ok(())
}

/// Compiles a CSS selector, mapping failures into a configuration error
pub fn compile_selector(selector: &str) -> Result<Selector, ConfigError> {
    Selector::parse(selector).map_err(|e| ConfigError::InvalidSelector {
        selector: selector.to_string(),
        message: format!("{:?}", e),
    })
}

/// Basic email validation
fn validate_email(email: &str) -> Result<(), ConfigError> {
    if email.is_empty() {
        return Err(ConfigError::Validation(
            "contact_email cannot be empty".to_string(),
        ));
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 || parts[0].is_empty() || parts[1].is_empty() {
        return Err(ConfigError::Validation(format!(
            "Invalid email format: '{}'",
            email
        )));
    }

    if !parts[1].contains('.') {
        return Err(ConfigError::Validation(format!(
            "Invalid email domain: '{}'",
            email
        )));
    }

    Ok(())
}
