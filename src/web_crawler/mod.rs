pub mod detail_extractor;
pub mod listing_crawler;
pub mod types;

pub use detail_extractor::DetailExtractor;
pub use listing_crawler::ListingCrawler;
pub use types::{ContactRules, ListingRules};
