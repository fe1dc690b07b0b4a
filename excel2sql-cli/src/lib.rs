//! excel2sql: change-request Excel workbooks into reviewable SQL scripts
//!
//! The binary in `main.rs` is a thin shell over these modules; integration
//! tests drive the batch driver in [`script`] directly.

pub mod cli;
pub mod config;
pub mod script;
