//! Presentation wrapper: askama templates for the preview pages.
//!
//! Templating only. Every dynamic value (filenames, sheet names, cell
//! text) passes through askama's default HTML escaping, so untrusted
//! document content is never treated as markup.

use askama::Template;

use docview_client::WorkbookModel;
use docview_core::Error;

/// PDF viewer shell: loading spinner plus the embedded artifact.
#[derive(Template)]
#[template(path = "viewer.html")]
pub struct ViewerPage<'a> {
    pub filename: &'a str,
    pub key: &'a str,
}

/// Spreadsheet page: one tab per sheet, rendered from the workbook model.
#[derive(Template)]
#[template(path = "sheet.html")]
pub struct SheetPage<'a> {
    pub filename: &'a str,
    pub workbook: &'a WorkbookModel,
}

/// CSV table page.
#[derive(Template)]
#[template(path = "table.html")]
pub struct TablePage<'a> {
    pub filename: &'a str,
    pub rows: &'a [Vec<String>],
}

/// "Download instead" page for unconvertible content.
#[derive(Template)]
#[template(path = "download.html")]
pub struct DownloadPage<'a> {
    pub filename: &'a str,
    pub extension: &'a str,
    pub key: &'a str,
}

/// Render a template, folding askama failures into the core error.
pub fn render<T: Template>(template: T) -> Result<String, Error> {
    template
        .render()
        .map_err(|e| Error::Internal(format!("template rendering failed: {e}")))
}
