//! Per-author work reports built from `git log`.
//!
//! The pipeline is: validate arguments into a [`model::ReportRequest`], query
//! commits with [`git::log::query_commits`], render them with
//! [`format::format_table`] or [`format::format_csv`], and write the result
//! through [`report::exec`]. When nothing matches, [`suggest`] lists the
//! authors the search term might have meant.

pub mod cli;
pub mod error;
pub mod format;
pub mod git;
pub mod model;
pub mod report;
pub mod suggest;
pub mod util;
