use crate::config::ExportConfig;
use crate::models::{ContactRecord, EntityRecord, OutputRow, Result};
use rust_xlsxwriter::{Format, Workbook};
use tracing::info;

pub const HEADERS: [&str; 7] = [
    "№",
    "Название школы",
    "ФИО куратора",
    "Должность",
    "Телефон",
    "Email",
    "Ссылка",
];

/// Writes the collected schools to a single-sheet workbook: bold header,
/// one row per (school, contact) pair, auto-sized columns. Overwrites the
/// target file silently.
pub struct XlsxExporter {
    filename: String,
    sheet_name: String,
    sentinel: String,
}

impl XlsxExporter {
    pub fn new(config: &ExportConfig, sentinel: &str) -> Self {
        Self {
            filename: config.filename.clone(),
            sheet_name: config.sheet_name.clone(),
            sentinel: sentinel.to_string(),
        }
    }

    pub fn export(&self, schools: &[EntityRecord]) -> Result<usize> {
        let rows = build_rows(schools, &self.sentinel);
        self.write_workbook(&rows, &self.filename)?;
        info!("Экспортировано строк: {}", rows.len());
        Ok(rows.len())
    }

    fn write_workbook(&self, rows: &[OutputRow], filename: &str) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(self.sheet_name.as_str())?;

        let bold = Format::new().set_bold();
        for (col, title) in HEADERS.iter().enumerate() {
            worksheet.write_string_with_format(0, col as u16, *title, &bold)?;
        }

        for row in rows {
            let r = row.index;
            worksheet.write_number(r, 0, row.index as f64)?;
            worksheet.write_string(r, 1, row.display_name.as_str())?;
            worksheet.write_string(r, 2, row.contact_name.as_str())?;
            worksheet.write_string(r, 3, row.role.as_str())?;
            worksheet.write_string(r, 4, row.phone.as_str())?;
            worksheet.write_string(r, 5, row.email.as_str())?;
            worksheet.write_string(r, 6, row.url.as_str())?;
        }

        for (col, width) in column_widths(rows).iter().enumerate() {
            worksheet.set_column_width(col as u16, *width)?;
        }

        workbook.save(filename)?;
        Ok(())
    }
}

/// Flattens schools into numbered rows. The counter runs across the whole
/// sheet, never resetting between schools. A school with no contacts still
/// produces one sentinel row.
pub fn build_rows(schools: &[EntityRecord], sentinel: &str) -> Vec<OutputRow> {
    let mut rows = Vec::new();
    let mut row_num: u32 = 1;
    let fallback = [ContactRecord::sentinel(sentinel)];

    for school in schools {
        let contacts: &[_] = if school.contacts.is_empty() {
            &fallback
        } else {
            &school.contacts
        };
        for contact in contacts {
            rows.push(OutputRow {
                index: row_num,
                display_name: school.display_name.clone(),
                contact_name: contact.name.clone(),
                role: contact.role.clone(),
                phone: contact.phone.clone(),
                email: contact.email.clone(),
                url: school.url.clone(),
            });
            row_num += 1;
        }
    }

    rows
}

/// Column width = (longest cell text in the column, header included, + 2)
/// scaled by 1.2, mirroring what the sheet needs to avoid truncation.
pub fn column_widths(rows: &[OutputRow]) -> Vec<f64> {
    let mut max_lens: Vec<usize> = HEADERS.iter().map(|h| h.chars().count()).collect();

    for row in rows {
        let cells = [
            row.index.to_string(),
            row.display_name.clone(),
            row.contact_name.clone(),
            row.role.clone(),
            row.phone.clone(),
            row.email.clone(),
            row.url.clone(),
        ];
        for (col, cell) in cells.iter().enumerate() {
            max_lens[col] = max_lens[col].max(cell.chars().count());
        }
    }

    max_lens
        .into_iter()
        .map(|len| (len + 2) as f64 * 1.2)
        .collect()
}
