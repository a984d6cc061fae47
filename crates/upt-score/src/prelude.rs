//! Prelude module - common imports for upt-score users
//!
//! ```rust
//! use upt_score::prelude::*;
//! ```

pub use crate::{
    decode_workbook,
    extract_from_bytes,
    extract_from_path,
    extract_score,
    CellAddress,
    CellValue,
    DecodeError,
    ExtractError,
    ExtractOptions,
    ExtractionResult,
    ScoreExtractor,
    ScoreReport,
    Workbook,
    WorkbookExt,
    Worksheet,
};
