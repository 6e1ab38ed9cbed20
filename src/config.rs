use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    pub listing: ListingRulesConfig,
    pub contacts: ContactRulesConfig,
    pub export: ExportConfig,
    pub progress: ProgressConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CrawlConfig {
    /// Listing URL including its own query string; `&page=N` is appended.
    pub base_url: String,
    /// Site origin that relative detail-page hrefs are resolved against.
    pub origin: String,
    /// Last page index, inclusive; pages run 0..=max_pages.
    pub max_pages: u32,
    pub page_delay_ms: u64,
    pub school_delay_ms: u64,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

/// Extraction rules for listing pages. Kept as data so the site coupling
/// lives here instead of in the crawler's control flow.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListingRulesConfig {
    pub link_selector: String,
    /// School-type keywords; an anchor's text must contain one of these
    /// (case-insensitive) to count as a school link.
    pub keywords: Vec<String>,
}

/// Extraction rules for the staff blocks on a detail page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactRulesConfig {
    pub block_selector: String,
    pub role_marker: String,
    pub phone_marker: String,
    /// Placeholder written for fields that could not be extracted.
    pub sentinel: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    pub filename: String,
    pub sheet_name: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProgressConfig {
    /// First index shown by the per-school progress loop.
    pub start: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig {
                base_url: "https://doit-together.ru/head/66/?scroll=school_full_list0"
                    .to_string(),
                origin: "https://doit-together.ru".to_string(),
                max_pages: 7,
                page_delay_ms: 500,
                school_delay_ms: 300,
                request_timeout_secs: 30,
                user_agent: "Mozilla/5.0".to_string(),
            },
            listing: ListingRulesConfig {
                link_selector: r#"a.mainlnk[href^="/school/"]"#.to_string(),
                keywords: vec![
                    "СОШ".to_string(),
                    "НОШ".to_string(),
                    "НОШИ".to_string(),
                    "ООШ".to_string(),
                    "ЦО".to_string(),
                    "Гимназия".to_string(),
                    "школа".to_string(),
                    "лицей".to_string(),
                ],
            },
            contacts: ContactRulesConfig {
                block_selector: ".staff.for_school .contact_block".to_string(),
                role_marker: "Должность:".to_string(),
                phone_marker: "Тел:".to_string(),
                sentinel: "N/A".to_string(),
            },
            export: ExportConfig {
                filename: "schools_data.xlsx".to_string(),
                sheet_name: "Школы и кураторы".to_string(),
            },
            progress: ProgressConfig { start: 1 },
        }
    }
}

pub async fn load_config(
    path: &str,
) -> std::result::Result<Config, Box<dyn std::error::Error + Send + Sync>> {
    let content = tokio::fs::read_to_string(path).await?;
    let config: Config = serde_yaml::from_str(&content)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_the_target_site() {
        let config = Config::default();
        assert_eq!(config.crawl.max_pages, 7);
        assert_eq!(config.crawl.page_delay_ms, 500);
        assert_eq!(config.crawl.school_delay_ms, 300);
        assert_eq!(config.export.filename, "schools_data.xlsx");
        assert_eq!(config.contacts.sentinel, "N/A");
        assert_eq!(config.progress.start, 1);
        assert!(config.crawl.base_url.starts_with(&config.crawl.origin));
    }

    #[test]
    fn config_round_trips_through_yaml() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.listing.keywords, config.listing.keywords);
        assert_eq!(parsed.contacts.block_selector, config.contacts.block_selector);
        assert_eq!(parsed.crawl.base_url, config.crawl.base_url);
    }
}
