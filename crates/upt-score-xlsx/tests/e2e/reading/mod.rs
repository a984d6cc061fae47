//! Reading tests - verify that the reader decodes report workbooks.

mod sheets;
mod shared_strings;
mod malformed;
