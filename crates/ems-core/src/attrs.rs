//! Raw per-edge criteria.
//!
//! Every directed edge carries the three AHP criteria in raw form: travel
//! time, an IT-risk triple expressed as *reliabilities* (higher is better),
//! and monetary cost.  An undirected road is modeled as two opposing edges
//! with identical attributes.
//!
//! # Domains
//!
//! | Field                 | Domain   | Unit              |
//! |-----------------------|----------|-------------------|
//! | `travel_time`         | `≥ 0`    | minutes           |
//! | `network_reliability` | `[0, 1]` | fraction          |
//! | `gps_accuracy`        | `[0, 1]` | fraction          |
//! | `data_integrity`      | `[0, 1]` | fraction          |
//! | `cost`                | `≥ 0`    | currency units    |
//!
//! Non-negative time and cost are required for Dijkstra correctness, so the
//! graph builder rejects out-of-domain values eagerly via [`EdgeAttrs::validate`]
//! rather than clamping them.

use crate::{CoreError, CoreResult};

/// Raw attributes of one directed edge.  Fields are `pub` for direct access
/// on hot paths; construct through [`EdgeAttrs::new`] to validate once.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Travel time in minutes.
    pub travel_time: f64,
    /// Mobile-network reliability along the segment, `[0, 1]`.
    pub network_reliability: f64,
    /// GPS accuracy along the segment, `[0, 1]`.
    pub gps_accuracy: f64,
    /// Dispatch-data integrity along the segment, `[0, 1]`.
    pub data_integrity: f64,
    /// Operational cost in currency units.
    pub cost: f64,
}

impl EdgeAttrs {
    /// Validating constructor.
    pub fn new(
        travel_time: f64,
        network_reliability: f64,
        gps_accuracy: f64,
        data_integrity: f64,
        cost: f64,
    ) -> CoreResult<Self> {
        let attrs = Self {
            travel_time,
            network_reliability,
            gps_accuracy,
            data_integrity,
            cost,
        };
        attrs.validate()?;
        Ok(attrs)
    }

    /// Check every field against its documented domain.
    ///
    /// Out-of-domain values (including NaN, which fails every comparison)
    /// yield [`CoreError::InvalidAttribute`] naming the offending field.
    pub fn validate(&self) -> CoreResult<()> {
        fn non_negative(field: &'static str, value: f64) -> CoreResult<()> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CoreError::InvalidAttribute { field, value })
            }
        }
        fn unit_interval(field: &'static str, value: f64) -> CoreResult<()> {
            if value.is_finite() && (0.0..=1.0).contains(&value) {
                Ok(())
            } else {
                Err(CoreError::InvalidAttribute { field, value })
            }
        }

        non_negative("travel_time", self.travel_time)?;
        unit_interval("network_reliability", self.network_reliability)?;
        unit_interval("gps_accuracy", self.gps_accuracy)?;
        unit_interval("data_integrity", self.data_integrity)?;
        non_negative("cost", self.cost)?;
        Ok(())
    }
}
