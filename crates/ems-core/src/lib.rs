//! `ems-core` — foundational types for the `rust_ems` ambulance dispatch
//! planner.
//!
//! This crate is a dependency of every other `ems-*` crate.  It intentionally
//! has no `ems-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module      | Contents                                                |
//! |-------------|---------------------------------------------------------|
//! | [`ids`]     | `VertexId`, `EdgeId`                                    |
//! | [`geo`]     | `GeoPoint`, haversine distance                          |
//! | [`kind`]    | `VertexKind` enum (hospital / emergency / intermediate) |
//! | [`attrs`]   | `EdgeAttrs` — raw per-edge criteria with validation     |
//! | [`weights`] | `AhpWeights`, `ReferenceScale`, `WeightModel`           |
//! | [`error`]   | `CoreError`, `CoreResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                               |
//! |---------|------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.  |

pub mod attrs;
pub mod error;
pub mod geo;
pub mod ids;
pub mod kind;
pub mod weights;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use attrs::EdgeAttrs;
pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{EdgeId, VertexId};
pub use kind::VertexKind;
pub use weights::{AhpWeights, ReferenceScale, RiskShare, WeightModel};
