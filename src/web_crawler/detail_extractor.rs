use crate::models::{ContactRecord, EntityRecord, ListingEntry, Result};
use crate::web_crawler::types::ContactRules;
use reqwest::Client;
use scraper::{ElementRef, Html};
use tracing::debug;

/// Fetches one school's detail page and extracts its staff contact blocks.
/// All-or-nothing: a failed fetch yields no record at all, the caller skips
/// the school.
pub struct DetailExtractor {
    client: Client,
    rules: ContactRules,
}

impl DetailExtractor {
    pub fn new(client: Client, rules: ContactRules) -> Self {
        Self { client, rules }
    }

    pub async fn extract(&self, entry: &ListingEntry) -> Result<EntityRecord> {
        debug!("Fetching: {}", entry.url);

        let response = self.client.get(&entry.url).send().await?;
        if !response.status().is_success() {
            return Err(format!("HTTP error: {}", response.status()).into());
        }
        let html = response.text().await?;

        Ok(EntityRecord {
            display_name: entry.full_name.clone(),
            contacts: parse_contact_blocks(&html, &self.rules),
            url: entry.url.clone(),
        })
    }
}

/// Extracts one `ContactRecord` per staff block. A page with no blocks yields
/// a single all-sentinel record so the school still gets an export row.
pub fn parse_contact_blocks(html: &str, rules: &ContactRules) -> Vec<ContactRecord> {
    let document = Html::parse_document(html);
    let mut contacts = Vec::new();

    for block in document.select(&rules.block_selector) {
        let mut record = ContactRecord::sentinel(&rules.sentinel);

        if let Some(name_tag) = block.select(&rules.label_selector).next() {
            let name = name_tag.text().collect::<String>().trim().to_string();
            if !name.is_empty() {
                record.name = name;
            }
        }

        if let Some(role) = text_after_label(block, rules, &rules.role_marker) {
            record.role = role;
        }
        if let Some(phone) = text_after_label(block, rules, &rules.phone_marker) {
            record.phone = phone;
        }

        if let Some(anchor) = block.select(&rules.email_selector).next() {
            if let Some(href) = anchor.value().attr("href") {
                record.email = href.trim_start_matches("mailto:").to_string();
            }
        }

        contacts.push(record);
    }

    if contacts.is_empty() {
        contacts.push(ContactRecord::sentinel(&rules.sentinel));
    }

    contacts
}

/// The one DOM-adjacency rule both role and phone share: the first non-empty
/// text node following a label element whose text contains `marker`.
fn text_after_label(block: ElementRef, rules: &ContactRules, marker: &str) -> Option<String> {
    for label in block.select(&rules.label_selector) {
        let text: String = label.text().collect();
        if !text.contains(marker) {
            continue;
        }
        let mut sibling = label.next_sibling();
        while let Some(node) = sibling {
            if let Some(fragment) = node.value().as_text() {
                let value = fragment.trim();
                if !value.is_empty() {
                    return Some(value.to_string());
                }
            }
            sibling = node.next_sibling();
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn rules() -> ContactRules {
        ContactRules::compile(&Config::default().contacts).unwrap()
    }

    const DETAIL_HTML: &str = r#"
        <div class="staff for_school">
            <div class="contact_block">
                <b>Иванова Мария Петровна</b><br>
                <b>Должность:</b> Директор<br>
                <b>Тел:</b> +7 (900) 123-45-67<br>
                <a href="mailto:a@x.com">a@x.com</a>
            </div>
            <div class="contact_block">
                <b>Сидоров Пётр Иванович</b><br>
                <b>Должность:</b> Завуч<br>
            </div>
        </div>
    "#;

    #[test]
    fn extracts_every_field_from_a_full_block() {
        let contacts = parse_contact_blocks(DETAIL_HTML, &rules());
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].name, "Иванова Мария Петровна");
        assert_eq!(contacts[0].role, "Директор");
        assert_eq!(contacts[0].phone, "+7 (900) 123-45-67");
        assert_eq!(contacts[0].email, "a@x.com");
    }

    #[test]
    fn missing_fields_keep_the_sentinel() {
        let contacts = parse_contact_blocks(DETAIL_HTML, &rules());
        assert_eq!(contacts[1].name, "Сидоров Пётр Иванович");
        assert_eq!(contacts[1].role, "Завуч");
        assert_eq!(contacts[1].phone, "N/A");
        assert_eq!(contacts[1].email, "N/A");
    }

    #[test]
    fn page_without_blocks_yields_one_sentinel_record() {
        let contacts = parse_contact_blocks("<html><body></body></html>", &rules());
        assert_eq!(contacts, vec![ContactRecord::sentinel("N/A")]);
    }

    #[test]
    fn blocks_outside_the_staff_container_are_ignored() {
        let html = r#"
            <div class="contact_block"><b>Посторонний блок</b></div>
        "#;
        let contacts = parse_contact_blocks(html, &rules());
        assert_eq!(contacts, vec![ContactRecord::sentinel("N/A")]);
    }

    #[test]
    fn label_value_skips_intervening_whitespace() {
        let html = r#"
            <div class="staff for_school">
                <div class="contact_block">
                    <b>Тел:</b>
                    8-800-555-35-35
                </div>
            </div>
        "#;
        let contacts = parse_contact_blocks(html, &rules());
        assert_eq!(contacts[0].phone, "8-800-555-35-35");
    }
}
