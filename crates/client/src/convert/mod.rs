//! Converter family: raw bytes to displayable artifacts.
//!
//! Each converter is a narrow call contract over an external
//! collaborator:
//! - [`office`] drives a headless office engine subprocess to PDF
//! - [`sheet`] loads a spreadsheet into a serializable workbook model
//! - [`csv`] parses CSV rows for table rendering
//!
//! Converters are deterministic given identical input bytes, which is
//! what makes racing cache overwrites safe upstream.

pub mod csv;
pub mod office;
pub mod sheet;

use docview_core::Error;

pub use office::SofficeEngine;
pub use sheet::{SheetModel, WorkbookModel, load_workbook};

/// Seam for PDF-producing conversion, so the dispatcher can be tested
/// with counting fakes.
#[async_trait::async_trait]
pub trait PdfEngine: Send + Sync {
    /// Convert a document buffer to PDF bytes. `extension` is the
    /// detected source extension (may be empty) and guides the engine's
    /// input filter.
    async fn to_pdf(&self, input: &[u8], extension: &str) -> Result<Vec<u8>, Error>;
}
