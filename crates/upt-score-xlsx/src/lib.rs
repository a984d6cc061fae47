//! # upt-score-xlsx
//!
//! XLSX (Office Open XML) reader for unit report uploads.

pub mod error;
pub mod reader;

pub use error::{XlsxError, XlsxResult};
pub use reader::XlsxReader;
