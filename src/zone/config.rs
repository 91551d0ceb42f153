use crate::error::{Result, ZoneError};
use crate::tessellation::TessellationParams;

/// How the convexity check treats a vertex-to-vertex chord that meets the
/// boundary in fewer than two isolated points.
///
/// Such chords run along the boundary (edges, face diagonals) or graze it, and
/// say nothing definite about convexity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AmbiguousChordPolicy {
    /// Ignore the chord and continue with the next pair.
    #[default]
    Skip,
    /// Treat the chord as evidence of non-convexity.
    Reject,
}

/// Parameters for validating and classifying a zone.
#[derive(Debug, Clone)]
pub struct ZoneConfig {
    /// Distance below which points are coincident (model units, usually m).
    pub tolerance: f64,
    /// Treatment of chords with 0 or 1 boundary intersection points.
    pub ambiguous_chord_policy: AmbiguousChordPolicy,
    /// Faces whose outward normal is closer than this to +Z are roofs (degrees).
    pub roof_angle_deg: f64,
    /// Vertex count above which the quadratic convexity check logs a warning.
    pub convexity_warn_vertices: usize,
    /// Vertex count above which the convexity check is skipped entirely and
    /// the zone reported non-convex.
    pub convexity_vertex_limit: Option<usize>,
    /// Facet resolution for curved faces.
    pub tessellation: TessellationParams,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            ambiguous_chord_policy: AmbiguousChordPolicy::Skip,
            roof_angle_deg: 45.0,
            convexity_warn_vertices: 200,
            convexity_vertex_limit: None,
            tessellation: TessellationParams::default(),
        }
    }
}

impl ZoneConfig {
    /// Default configuration with the given tolerance.
    #[must_use]
    pub fn new(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the ambiguous-chord policy.
    #[must_use]
    pub fn with_ambiguous_chord_policy(mut self, policy: AmbiguousChordPolicy) -> Self {
        self.ambiguous_chord_policy = policy;
        self
    }

    /// Sets the roof angle threshold in degrees.
    #[must_use]
    pub fn with_roof_angle_deg(mut self, degrees: f64) -> Self {
        self.roof_angle_deg = degrees;
        self
    }

    /// Sets the vertex count that triggers a convexity warning.
    #[must_use]
    pub fn with_convexity_warn_vertices(mut self, count: usize) -> Self {
        self.convexity_warn_vertices = count;
        self
    }

    /// Sets the vertex count above which convexity is not checked.
    #[must_use]
    pub fn with_convexity_vertex_limit(mut self, limit: Option<usize>) -> Self {
        self.convexity_vertex_limit = limit;
        self
    }

    /// Sets the tessellation parameters for curved faces.
    #[must_use]
    pub fn with_tessellation(mut self, params: TessellationParams) -> Self {
        self.tessellation = params;
        self
    }

    /// Rejects tolerances that cannot drive the geometric predicates.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidArgument`] if the tolerance is not a finite
    /// positive number.
    pub fn check(&self) -> Result<()> {
        if self.tolerance.is_finite() && self.tolerance > 0.0 {
            Ok(())
        } else {
            Err(ZoneError::InvalidArgument(format!(
                "tolerance must be finite and positive, got {}",
                self.tolerance
            ))
            .into())
        }
    }
}
