use crate::config::types::{Config, CrawlConfig, HttpConfig, OutputConfig, SiteConfig};
use crate::crawler::selectors::CompiledSelectors;
use crate::ConfigError;
use std::path::{Component, Path};
use url::Url;

/// Upper bound on concurrently archived items
const MAX_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_http_config(&config.http)?;
    validate_crawl_config(&config.crawl)?;
    validate_output_config(&config.output)?;
    CompiledSelectors::compile(&config.selectors)?;
    Ok(())
}

/// Validates site endpoint URLs
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    validate_http_url("catalog-root", &config.catalog_root)?;
    validate_http_url("content-endpoint", &config.content_endpoint)?;
    validate_http_url("detail-base", &config.detail_base)?;
    Ok(())
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", field, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field, value
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "connect-timeout-secs must be >= 1, got {}",
            config.connect_timeout_secs
        )));
    }

    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    // Two workers holding the same identifier would write the same text files.
    if config.concurrency > 1 && !config.dedupe_items {
        return Err(ConfigError::Validation(
            "concurrency above 1 requires dedupe-items = true".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    validate_subdir("content-dir", &config.content_dir)?;
    validate_subdir("cover-dir", &config.cover_dir)?;
    validate_subdir("comments-dir", &config.comments_dir)?;

    if let Some(path) = &config.catalog_path {
        if path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "catalog-path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Subdirectories must stay inside the destination
fn validate_subdir(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }

    let escapes = Path::new(value)
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(ConfigError::Validation(format!(
            "{} must be a relative path inside the destination, got '{}'",
            field, value
        )));
    }

    Ok(())
}
