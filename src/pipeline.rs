use crate::config::Config;
use crate::export::XlsxExporter;
use crate::models::{CrawlSummary, EntityRecord, ListingEntry, Result};
use crate::progress;
use crate::web_crawler::{ContactRules, DetailExtractor, ListingCrawler, ListingRules};
use reqwest::Client;
use std::time::Duration;
use tracing::warn;

/// Runs the whole scrape: listing crawl, per-school extraction, export.
/// Schools whose detail fetch fails are dropped; everything else is
/// best-effort and the run always proceeds to the export.
pub struct ScrapePipeline {
    config: Config,
    client: Client,
}

impl ScrapePipeline {
    pub fn new(config: Config) -> Self {
        let client = Client::builder()
            .user_agent(config.crawl.user_agent.clone())
            .timeout(Duration::from_secs(config.crawl.request_timeout_secs))
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    pub async fn run(&self) -> Result<CrawlSummary> {
        let listing_rules = ListingRules::compile(&self.config.listing, &self.config.crawl.origin)?;
        let crawler = ListingCrawler::new(self.client.clone(), listing_rules, &self.config.crawl);
        let schools = crawler.collect().await;

        let records = self.extract_school_details(&schools).await?;

        let exporter = XlsxExporter::new(&self.config.export, &self.config.contacts.sentinel);
        let rows_written = exporter.export(&records)?;
        println!("\nДанные сохранены в файл: {}", self.config.export.filename);

        Ok(CrawlSummary {
            schools_found: schools.len(),
            schools_exported: records.len(),
            rows_written,
        })
    }

    async fn extract_school_details(
        &self,
        schools: &[ListingEntry],
    ) -> Result<Vec<EntityRecord>> {
        let contact_rules = ContactRules::compile(&self.config.contacts)?;
        let extractor = DetailExtractor::new(self.client.clone(), contact_rules);
        let delay = Duration::from_millis(self.config.crawl.school_delay_ms);
        let total = schools.len();

        println!("\nОбработка информации о школах:");
        let mut records = Vec::new();
        for (i, school) in schools.iter().enumerate() {
            let current = self.config.progress.start + i;
            progress::report(
                current,
                total,
                "Прогресс школ:",
                &format!("{}/{}", current, total),
            );

            match extractor.extract(school).await {
                Ok(record) => records.push(record),
                Err(e) => warn!("Ошибка при парсинге {}: {}", school.url, e),
            }

            tokio::time::sleep(delay).await;
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::export::build_rows;
    use crate::models::EntityRecord;
    use crate::web_crawler::detail_extractor::parse_contact_blocks;
    use crate::web_crawler::listing_crawler::parse_listing_page;
    use crate::web_crawler::{ContactRules, ListingRules};

    const INDEX_HTML: &str = r#"
        <a class="mainlnk" href="/school/1">СОШ №1</a>
        <a class="mainlnk" href="/school/2">Лицей №2</a>
        <a class="mainlnk" href="/school/3">Спортивный клуб</a>
    "#;

    const DETAIL_HTML: &str = r#"
        <div class="staff for_school">
            <div class="contact_block">
                <b>Куратор Один</b><br>
                <a href="mailto:a@x.com">a@x.com</a>
            </div>
            <div class="contact_block">
                <b>Куратор Два</b>
            </div>
        </div>
    "#;

    // Full run over the pure cores: listing parse feeds detail parse feeds
    // row flattening, with one school's fetch failing along the way.
    #[test]
    fn parsed_pages_flow_through_to_numbered_rows() {
        let config = Config::default();
        let listing_rules =
            ListingRules::compile(&config.listing, &config.crawl.origin).unwrap();
        let contact_rules = ContactRules::compile(&config.contacts).unwrap();

        let entries = parse_listing_page(INDEX_HTML, &listing_rules);
        assert_eq!(entries.len(), 2);

        // First school resolves, second school's fetch fails and is dropped.
        let records: Vec<EntityRecord> = entries
            .iter()
            .take(1)
            .map(|entry| EntityRecord {
                display_name: entry.full_name.clone(),
                contacts: parse_contact_blocks(DETAIL_HTML, &contact_rules),
                url: entry.url.clone(),
            })
            .collect();

        let rows = build_rows(&records, &config.contacts.sentinel);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].email, "a@x.com");
        assert_eq!(rows[1].email, "N/A");
        assert_eq!(rows[1].index, 2);
        assert!(rows.iter().all(|r| r.display_name == "СОШ №1"));
    }
}
