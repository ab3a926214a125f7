//! `ems-graph` — the dispatch road graph and its reversal.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`network`] | `DispatchGraph` (CSR + R-tree), `DispatchGraphBuilder`    |
//! | [`loader`]  | `load_graph_csv` (feature = `"csv"` only)                 |
//! | [`error`]   | `GraphError`, `GraphResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `csv`   | Enables CSV graph loading via the `csv` crate.          |
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.      |

pub mod error;
pub mod network;

#[cfg(feature = "csv")]
pub mod loader;


pub use error::{GraphError, GraphResult};
pub use network::{DispatchGraph, DispatchGraphBuilder};

#[cfg(feature = "csv")]
pub use loader::{load_graph_csv, load_graph_readers};
