//! Dispatch query output types.
//!
//! Built once at the end of a query and read-only afterward.  The reporting
//! layer consumes these structures and nothing else.

use ems_core::{RiskShare, VertexId};

// ── RouteBreakdown ────────────────────────────────────────────────────────────

/// Per-criterion totals along one route, summed edge by edge in the
/// original direction.
///
/// `travel_time` and `cost` are **raw** sums (minutes, currency units);
/// `risk` components are already weighted, so `risk.total()` is the risk
/// share of the route's composite cost.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteBreakdown {
    /// Total travel time in minutes.
    pub travel_time: f64,
    /// Total operational cost in currency units.
    pub cost: f64,
    /// Weighted IT-risk contributions, split by sub-factor.
    pub risk: RiskShare,
}

// ── HospitalOutcome / HospitalRank ────────────────────────────────────────────

/// What one query determined about one hospital.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum HospitalOutcome {
    /// Hospital has a route; carries the full priced route.
    Reachable {
        /// Minimal composite cost hospital → emergency.
        composite_cost: f64,
        /// Vertex sequence in forward order: hospital first, emergency last.
        path: Vec<VertexId>,
        /// Per-criterion totals along `path`.
        breakdown: RouteBreakdown,
    },
    /// No directed path to the emergency site.  Excluded from numeric
    /// ranking but still listed, so reports can surface it.
    Unreachable,
}

/// One hospital's entry in the ranked list.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HospitalRank {
    pub hospital: VertexId,
    pub outcome:  HospitalOutcome,
}

impl HospitalRank {
    #[inline]
    pub fn is_reachable(&self) -> bool {
        matches!(self.outcome, HospitalOutcome::Reachable { .. })
    }

    /// Composite cost, or `None` for unreachable hospitals.
    pub fn composite_cost(&self) -> Option<f64> {
        match &self.outcome {
            HospitalOutcome::Reachable { composite_cost, .. } => Some(*composite_cost),
            HospitalOutcome::Unreachable => None,
        }
    }
}

// ── DispatchResult ────────────────────────────────────────────────────────────

/// The answer to one dispatch query.
///
/// `ranking` lists **every** queried hospital: reachable ones first in
/// ascending composite-cost order (ties broken by ascending `VertexId`),
/// then unreachable ones in ascending id order.  `selected` duplicates the
/// head of the ranking for convenient access.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DispatchResult {
    /// The emergency vertex this query was solved for.
    pub emergency: VertexId,
    /// The winning hospital.
    pub selected: VertexId,
    /// Minimal composite cost of the selected dispatch.
    pub total_cost: f64,
    /// Forward path: selected hospital first, emergency site last.
    pub path: Vec<VertexId>,
    /// Per-criterion totals along `path`.
    pub breakdown: RouteBreakdown,
    /// All queried hospitals, ranked.
    pub ranking: Vec<HospitalRank>,
}

impl DispatchResult {
    /// Number of hospitals with a usable route.
    pub fn reachable_count(&self) -> usize {
        self.ranking.iter().filter(|r| r.is_reachable()).count()
    }
}
