//! Client code for docview.
//!
//! This crate provides the size-capped HTTP fetch pipeline and the
//! converter family (office engine, spreadsheet model, CSV rows) used by
//! the preview server.

pub mod convert;
pub mod fetch;

pub use convert::{PdfEngine, SheetModel, SofficeEngine, WorkbookModel, load_workbook};

pub use fetch::{
    FetchClient, FetchConfig, FetchResponse, Fetcher, domain_allowed, extension_from_url, filename_from_url,
    validate_source,
};
