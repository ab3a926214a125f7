//! `ems-report` — rendering adapters for dispatch results.
//!
//! A thin translation layer: it consumes [`ems_solve::DispatchResult`] (plus
//! the graph, for labels and positions) and produces text or CSV.  No
//! algorithm knowledge lives here.
//!
//! # Crate layout
//!
//! | Module    | Contents                                    |
//! |-----------|---------------------------------------------|
//! | [`text`]  | `write_text_report` — console-style report  |
//! | [`csv`]   | `write_ranking_csv` — one row per hospital  |
//! | [`error`] | `ReportError`, `ReportResult<T>`            |

pub mod csv;
pub mod error;
pub mod text;


pub use error::{ReportError, ReportResult};
pub use text::write_text_report;

pub use crate::csv::write_ranking_csv;
