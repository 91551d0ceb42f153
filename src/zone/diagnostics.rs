use std::fmt;

/// Outcome of the convexity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConvexityReport {
    pub is_convex: bool,
    /// Positionally distinct vertices of the solid.
    pub vertex_count: usize,
    /// Vertex pairs whose chord was intersected with the boundary before the
    /// check concluded.
    pub chords_tested: usize,
    /// Chords that met the boundary in fewer than two isolated points.
    pub ambiguous_chords: usize,
    /// `true` if the check did not run (vertex limit exceeded or an open
    /// solid).
    pub skipped: bool,
}

/// Boolean verdicts of zone validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Diagnostics {
    pub is_closed: bool,
    pub is_linear: bool,
    pub is_planar: bool,
    pub is_convex: bool,
    pub is_windows_on_zone: bool,
    pub is_windows_no_self_intersect: bool,
    pub is_floor_in_zone: bool,
    pub is_valid: bool,
    pub is_valid_eplus: bool,
    pub convexity: ConvexityReport,
}

impl Diagnostics {
    /// Derives both validity gates from the individual checks.
    pub(crate) fn aggregate(&mut self) {
        self.is_valid_eplus = self.is_closed
            && self.is_convex
            && self.is_linear
            && self.is_planar
            && self.is_windows_on_zone
            && self.is_windows_no_self_intersect;
        self.is_valid =
            self.is_closed && self.is_windows_on_zone && self.is_windows_no_self_intersect;
    }
}

/// One `Name: value` line per verdict, in a fixed order.
impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IsClosed: {}", self.is_closed)?;
        writeln!(f, "IsLinear: {}", self.is_linear)?;
        writeln!(f, "IsPlanar: {}", self.is_planar)?;
        writeln!(f, "IsConvex: {}", self.is_convex)?;
        writeln!(f, "IsWindowsOnZone: {}", self.is_windows_on_zone)?;
        writeln!(f, "IsWindowsNoSelfIntersect: {}", self.is_windows_no_self_intersect)?;
        writeln!(f, "IsFloorInZone: {}", self.is_floor_in_zone)?;
        writeln!(f, "IsValid: {}", self.is_valid)?;
        write!(f, "IsValidEPlus: {}", self.is_valid_eplus)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loose_gate_ignores_shape_checks() {
        let mut d = Diagnostics {
            is_closed: true,
            is_windows_on_zone: true,
            is_windows_no_self_intersect: true,
            ..Diagnostics::default()
        };
        d.aggregate();
        assert!(d.is_valid);
        assert!(!d.is_valid_eplus);

        d.is_convex = true;
        d.is_linear = true;
        d.is_planar = true;
        d.aggregate();
        assert!(d.is_valid_eplus);
    }

    #[test]
    fn report_lists_every_verdict() {
        let text = Diagnostics::default().to_string();
        assert_eq!(text.lines().count(), 9);
        assert_eq!(text.lines().next(), Some("IsClosed: false"));
        assert_eq!(text.lines().last(), Some("IsValidEPlus: false"));
    }
}
