use crate::config::CrawlConfig;
use crate::models::{ListingEntry, Result};
use crate::progress;
use crate::web_crawler::types::ListingRules;
use reqwest::Client;
use scraper::Html;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Walks the paginated school directory and collects every link that looks
/// like a school. Failures are per page: a broken page is logged and skipped,
/// entries from earlier pages survive.
pub struct ListingCrawler {
    client: Client,
    rules: ListingRules,
    base_url: String,
    max_pages: u32,
    page_delay: Duration,
}

impl ListingCrawler {
    pub fn new(client: Client, rules: ListingRules, config: &CrawlConfig) -> Self {
        Self {
            client,
            rules,
            base_url: config.base_url.clone(),
            max_pages: config.max_pages,
            page_delay: Duration::from_millis(config.page_delay_ms),
        }
    }

    pub async fn collect(&self) -> Vec<ListingEntry> {
        let mut all_schools = Vec::new();

        println!("\nСбор ссылок на школы со всех страниц:");
        for page in 0..=self.max_pages {
            let url = format!("{}&page={}", self.base_url, page);
            progress::report(
                page as usize,
                self.max_pages as usize,
                "Прогресс страниц:",
                &format!("Страница {}/{}", page, self.max_pages),
            );

            match self.fetch_page(&url).await {
                Ok(html) => {
                    let entries = parse_listing_page(&html, &self.rules);
                    debug!("Страница {}: найдено {} школ", page, entries.len());
                    all_schools.extend(entries);
                    tokio::time::sleep(self.page_delay).await;
                }
                Err(e) => {
                    warn!("Ошибка при обработке страницы {}: {}", page, e);
                }
            }
        }

        println!("\nВсего найдено школ: {}", all_schools.len());
        all_schools
    }

    async fn fetch_page(&self, url: &str) -> Result<String> {
        debug!("Fetching: {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);

        Ok(html)
    }
}

/// Pulls the school links out of one listing page: anchors matching the
/// configured selector whose text contains one of the school-type keywords.
pub fn parse_listing_page(html: &str, rules: &ListingRules) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);
    let mut entries = Vec::new();

    for anchor in document.select(&rules.link_selector) {
        let text: String = anchor.text().collect();
        if !rules.keyword_filter.is_match(&text) {
            continue;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        if let Some(url) = resolve_href(&rules.origin, href) {
            entries.push(ListingEntry {
                full_name: text.trim().to_string(),
                url,
            });
        }
    }

    entries
}

/// Resolves an href against the site origin. Already-absolute URLs pass
/// through unchanged.
fn resolve_href(origin: &Url, href: &str) -> Option<String> {
    origin.join(href).ok().map(|u| u.to_string())
}
