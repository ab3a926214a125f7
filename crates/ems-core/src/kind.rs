//! Vertex role enum shared across all `ems-*` crates.

/// The role a location vertex plays in one dispatch query.
///
/// Roles are a property of the graph snapshot, not of the query: the
/// emergency site is tagged at load time by the data-loading collaborator.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VertexKind {
    /// Ordinary road junction or landmark (default).
    #[default]
    Intermediate,
    /// Hospital that can dispatch an ambulance.
    Hospital,
    /// The emergency location ambulances are dispatched to.
    EmergencySite,
}

impl VertexKind {
    #[inline]
    pub fn is_hospital(self) -> bool {
        matches!(self, VertexKind::Hospital)
    }

    /// Human-readable label, matching the kind names accepted when loading.
    pub fn as_str(self) -> &'static str {
        match self {
            VertexKind::Intermediate  => "intermediate",
            VertexKind::Hospital      => "hospital",
            VertexKind::EmergencySite => "emergency",
        }
    }
}

impl std::fmt::Display for VertexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
