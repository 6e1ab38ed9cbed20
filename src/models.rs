use serde::{Deserialize, Serialize};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// One matching link found on a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingEntry {
    pub full_name: String,
    /// Absolute URL of the school's detail page.
    pub url: String,
}

/// One staff contact block from a detail page. Fields that could not be
/// extracted keep the configured sentinel value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
}

impl ContactRecord {
    pub fn sentinel(value: &str) -> Self {
        Self {
            name: value.to_string(),
            role: value.to_string(),
            phone: value.to_string(),
            email: value.to_string(),
        }
    }
}

/// A school together with its extracted contacts. Only created after a
/// successful detail fetch; a failed fetch leaves no partial record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityRecord {
    pub display_name: String,
    pub contacts: Vec<ContactRecord>,
    pub url: String,
}

/// One spreadsheet row, numbered 1.. across the whole export.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputRow {
    pub index: u32,
    pub display_name: String,
    pub contact_name: String,
    pub role: String,
    pub phone: String,
    pub email: String,
    pub url: String,
}

#[derive(Debug, Clone, Default)]
pub struct CrawlSummary {
    pub schools_found: usize,
    pub schools_exported: usize,
    pub rows_written: usize,
}
