//! `ems-solve` — the dispatch-selection core.
//!
//! Selecting the best hospital for one emergency is transformed into a
//! *single* shortest-path computation: reverse every edge of the dispatch
//! graph, run Dijkstra from the emergency vertex, and read off the
//! distance-to-emergency of every hospital at once.  This amortizes one
//! solve over all hospitals instead of one forward solve per hospital.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`solver`]   | `ReverseSolve` — Dijkstra on the reversed graph           |
//! | [`selector`] | `plan_dispatch` — ranking, selection, path reconstruction |
//! | [`result`]   | `DispatchResult`, `HospitalRank`, `RouteBreakdown`        |
//! | [`batch`]    | Rayon batch queries (feature = `"parallel"` only)         |
//! | [`error`]    | `SolveError`, `SolveResult<T>`                            |
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Enables `plan_dispatch_batch` via the `rayon` crate.   |
//! | `serde`    | Derives `Serialize`/`Deserialize` on result types.     |

pub mod error;
pub mod result;
pub mod selector;
pub mod solver;

#[cfg(feature = "parallel")]
pub mod batch;

#[cfg(test)]
mod tests;

pub use error::{SolveError, SolveResult};
pub use result::{DispatchResult, HospitalOutcome, HospitalRank, RouteBreakdown};
pub use selector::plan_dispatch;
pub use solver::{DistanceTable, ReverseSolve};

#[cfg(feature = "parallel")]
pub use batch::{plan_dispatch_batch, DispatchQuery};
