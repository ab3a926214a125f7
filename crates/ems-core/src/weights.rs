//! AHP coefficients and the composite weight model.
//!
//! # Composite weight
//!
//! Every edge's scalar cost is a fixed-coefficient combination of the three
//! criteria:
//!
//! ```text
//! w = w_time · (t / scale.time)
//!   + w_risk · (v_network·(1 − rel_net) + v_gps·(1 − acc_gps) + v_data·(1 − int_data))
//!   + w_cost · (c / scale.cost)
//! ```
//!
//! Reliabilities are inverted to risks (`1 − x`) so that higher reliability
//! lowers the edge cost.  Time and cost are divided by a fixed
//! [`ReferenceScale`] to bring them onto the same [0, 1]-ish footing as the
//! risk term; the scale must be the same for every edge of one query so that
//! relative ranking is meaningful.
//!
//! # Validation
//!
//! Each coefficient tier must sum to 1 and the scales must be positive.
//! [`WeightModel::new`] checks this once at startup; [`WeightModel::composite`]
//! itself is a pure, total function over valid attributes and is invoked at
//! most once per edge per query.

use crate::{CoreError, CoreResult, EdgeAttrs};

/// Tolerance for the sum-to-1 check on each coefficient tier.  Published
/// AHP coefficients are rounded to three decimals (the study's own tiers
/// sum to 0.999), so allow that much rounding slack.
const TIER_SUM_TOLERANCE: f64 = 5e-3;

// ── AhpWeights ────────────────────────────────────────────────────────────────

/// Fixed AHP coefficients: the criterion tier (time / IT risk / cost) and the
/// IT-risk sub-tier (network / GPS / data integrity).
///
/// [`AhpWeights::default`] carries the study's pairwise-comparison values.
/// Alternate sets (sensitivity analysis) go through the same validation.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AhpWeights {
    /// Travel-time criterion weight.
    pub w_time: f64,
    /// IT/communication-risk criterion weight.
    pub w_risk: f64,
    /// Operational-cost criterion weight.
    pub w_cost: f64,
    /// Network-reliability sub-weight within the risk tier.
    pub v_network: f64,
    /// GPS-accuracy sub-weight within the risk tier.
    pub v_gps: f64,
    /// Data-integrity sub-weight within the risk tier.
    pub v_data: f64,
}

impl Default for AhpWeights {
    fn default() -> Self {
        Self {
            w_time:    0.619,
            w_risk:    0.284,
            w_cost:    0.096,
            v_network: 0.623,
            v_gps:     0.239,
            v_data:    0.137,
        }
    }
}

impl AhpWeights {
    /// Check that both tiers sum to 1 (within [`TIER_SUM_TOLERANCE`]) and
    /// that every coefficient is non-negative.
    pub fn validate(&self) -> CoreResult<()> {
        fn tier(name: &'static str, coeffs: [f64; 3]) -> CoreResult<()> {
            let sum: f64 = coeffs.iter().sum();
            let ok = coeffs.iter().all(|c| c.is_finite() && *c >= 0.0)
                && (sum - 1.0).abs() <= TIER_SUM_TOLERANCE;
            if ok {
                Ok(())
            } else {
                Err(CoreError::InvalidWeights { tier: name, sum })
            }
        }

        tier("criterion", [self.w_time, self.w_risk, self.w_cost])?;
        tier("risk", [self.v_network, self.v_gps, self.v_data])?;
        Ok(())
    }
}

// ── ReferenceScale ────────────────────────────────────────────────────────────

/// Fixed normalization divisors for raw time and cost.
///
/// Domain constants rather than per-query maxima: a per-query max would make
/// one edge's composite value depend on unrelated edges, so absolute costs
/// would not be comparable across graph snapshots.  Defaults match the
/// source study's reference magnitudes (10 minutes, 10 TND).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReferenceScale {
    /// Divisor for `travel_time`, minutes.
    pub time: f64,
    /// Divisor for `cost`, currency units.
    pub cost: f64,
}

impl Default for ReferenceScale {
    fn default() -> Self {
        Self { time: 10.0, cost: 10.0 }
    }
}

impl ReferenceScale {
    fn validate(&self) -> CoreResult<()> {
        fn positive(field: &'static str, value: f64) -> CoreResult<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CoreError::InvalidScale { field, value })
            }
        }
        positive("time", self.time)?;
        positive("cost", self.cost)?;
        Ok(())
    }
}

// ── RiskShare ─────────────────────────────────────────────────────────────────

/// Weighted risk contributions of one edge (or one whole route), split by
/// sub-factor.  Each component is already multiplied by `w_risk · v_x`, so
/// the three sum to the risk term of the composite weight.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RiskShare {
    pub network: f64,
    pub gps: f64,
    pub data: f64,
}

impl RiskShare {
    /// Sum of the three components — the full risk term.
    #[inline]
    pub fn total(&self) -> f64 {
        self.network + self.gps + self.data
    }

    /// Component-wise accumulation, used when summing a route.
    #[inline]
    pub fn accumulate(&mut self, other: RiskShare) {
        self.network += other.network;
        self.gps += other.gps;
        self.data += other.data;
    }
}

// ── WeightModel ───────────────────────────────────────────────────────────────

/// Validated coefficient set + normalization scale.
///
/// Immutable after construction; share one instance across queries (and
/// across threads — it is `Copy` and read-only).
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightModel {
    weights: AhpWeights,
    scale:   ReferenceScale,
}

impl WeightModel {
    /// Validate both tiers and the scale once, then construct.
    pub fn new(weights: AhpWeights, scale: ReferenceScale) -> CoreResult<Self> {
        weights.validate()?;
        scale.validate()?;
        Ok(Self { weights, scale })
    }

    /// The study's default coefficients and scales.  Infallible because the
    /// defaults are known-valid.
    pub fn standard() -> Self {
        Self {
            weights: AhpWeights::default(),
            scale:   ReferenceScale::default(),
        }
    }

    #[inline]
    pub fn weights(&self) -> &AhpWeights {
        &self.weights
    }

    #[inline]
    pub fn scale(&self) -> &ReferenceScale {
        &self.scale
    }

    /// Composite scalar weight of one edge.
    ///
    /// Pure and total for attributes within their documented domains
    /// (enforced at graph construction); never negative for valid input,
    /// since every term is a product of non-negative factors.
    pub fn composite(&self, attrs: &EdgeAttrs) -> f64 {
        let w = &self.weights;
        w.w_time * (attrs.travel_time / self.scale.time)
            + self.risk_share(attrs).total()
            + w.w_cost * (attrs.cost / self.scale.cost)
    }

    /// Weighted risk contributions of one edge, split by sub-factor.
    /// Used for the per-criterion breakdown in dispatch reports.
    pub fn risk_share(&self, attrs: &EdgeAttrs) -> RiskShare {
        let w = &self.weights;
        RiskShare {
            network: w.w_risk * w.v_network * (1.0 - attrs.network_reliability),
            gps:     w.w_risk * w.v_gps * (1.0 - attrs.gps_accuracy),
            data:    w.w_risk * w.v_data * (1.0 - attrs.data_integrity),
        }
    }
}
