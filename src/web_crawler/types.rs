// Compiled extraction rules. The site coupling (selectors, keywords, label
// markers) comes in from config as plain strings and is validated here once,
// so the crawler and extractor never parse selectors mid-crawl.
use crate::config::{ContactRulesConfig, ListingRulesConfig};
use crate::models::Result;
use regex::{Regex, RegexBuilder};
use scraper::Selector;
use url::Url;

pub struct ListingRules {
    pub link_selector: Selector,
    pub keyword_filter: Regex,
    pub origin: Url,
}

impl ListingRules {
    pub fn compile(config: &ListingRulesConfig, origin: &str) -> Result<Self> {
        let pattern = config
            .keywords
            .iter()
            .map(|keyword| regex::escape(keyword))
            .collect::<Vec<_>>()
            .join("|");
        let keyword_filter = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .build()?;

        Ok(Self {
            link_selector: parse_selector(&config.link_selector)?,
            keyword_filter,
            origin: Url::parse(origin)?,
        })
    }
}

pub struct ContactRules {
    pub block_selector: Selector,
    pub label_selector: Selector,
    pub email_selector: Selector,
    pub role_marker: String,
    pub phone_marker: String,
    pub sentinel: String,
}

impl ContactRules {
    pub fn compile(config: &ContactRulesConfig) -> Result<Self> {
        Ok(Self {
            block_selector: parse_selector(&config.block_selector)?,
            label_selector: parse_selector("b")?,
            email_selector: parse_selector(r#"a[href^="mailto:"]"#)?,
            role_marker: config.role_marker.clone(),
            phone_marker: config.phone_marker.clone(),
            sentinel: config.sentinel.clone(),
        })
    }
}

fn parse_selector(source: &str) -> Result<Selector> {
    Selector::parse(source).map_err(|e| format!("invalid selector '{}': {}", source, e).into())
}
