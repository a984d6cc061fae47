//! End-to-end tests for upt-score-xlsx.
//!
//! Each test builds the exact package it needs in memory (or in a temp
//! file), then reads it back with `XlsxReader` and asserts on the values.

mod common;
mod reading;

pub use common::*;
