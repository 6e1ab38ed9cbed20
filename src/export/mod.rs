pub mod exporter;

pub use exporter::{build_rows, XlsxExporter};
