use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod export;
mod models;
mod pipeline;
mod progress;
mod web_crawler;

use config::{load_config, Config};
use models::Result;
use pipeline::ScrapePipeline;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("school_scraper=info".parse().unwrap()),
        )
        .init();

    let config = match load_config("config.yml").await {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load config.yml: {}. Using defaults.", e);
            Config::default()
        }
    };

    println!("Начинаем сбор данных...");

    let pipeline = ScrapePipeline::new(config);
    let summary = pipeline.run().await?;

    info!(
        "Школ найдено: {}, выгружено: {}, строк записано: {}",
        summary.schools_found, summary.schools_exported, summary.rows_written
    );
    println!("\nОбработка всех данных завершена успешно!");

    Ok(())
}
