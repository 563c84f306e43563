//! Output generation for the collected rows.
//!
//! # Submodules
//!
//! - [`xlsx`]: the formatted spreadsheet, always written when rows exist
//! - [`json`]: an optional plain JSON copy of the same rows
//!
//! Both writers are no-ops for an empty row set.

pub mod json;
pub mod xlsx;
