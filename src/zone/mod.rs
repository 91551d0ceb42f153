pub mod component;
pub mod config;
pub mod diagnostics;
pub mod envelope;
pub mod geometry_check;
pub mod opening_check;

#[cfg(test)]
pub(crate) mod fixtures;

pub use component::{CeilingResolver, ComponentLists, EnvelopeComponent, Role};
pub use config::{AmbiguousChordPolicy, ZoneConfig};
pub use diagnostics::{ConvexityReport, Diagnostics};

use tracing::{info, instrument};

use crate::error::{Result, ZoneError};
use crate::operations::query::{face_properties, facets_volume};
use crate::tessellation::TessellateSolid;
use crate::topology::{FaceId, SolidId, TopologyStore};

/// Everything needed to build a [`Zone`].
#[derive(Debug, Clone)]
pub struct ZoneInput {
    pub index: usize,
    pub name: String,
    pub solid: SolidId,
    pub config: ZoneConfig,
    pub openings: Vec<FaceId>,
    pub floor_inserts: Vec<FaceId>,
    pub shading: Vec<FaceId>,
}

impl ZoneInput {
    /// Input with the default configuration and no extra faces.
    #[must_use]
    pub fn new(index: usize, name: impl Into<String>, solid: SolidId) -> Self {
        Self {
            index,
            name: name.into(),
            solid,
            config: ZoneConfig::default(),
            openings: Vec::new(),
            floor_inserts: Vec::new(),
            shading: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: ZoneConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_openings(mut self, openings: Vec<FaceId>) -> Self {
        self.openings = openings;
        self
    }

    #[must_use]
    pub fn with_floor_inserts(mut self, floor_inserts: Vec<FaceId>) -> Self {
        self.floor_inserts = floor_inserts;
        self
    }

    #[must_use]
    pub fn with_shading(mut self, shading: Vec<FaceId>) -> Self {
        self.shading = shading;
        self
    }
}

/// Result of [`classify`].
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Boundary faces by role, with accepted floor inserts among the floors.
    pub components: ComponentLists,
    /// Enclosed volume.
    pub volume: f64,
    /// `false` if any floor insert was rejected.
    pub is_floor_in_zone: bool,
}

fn require_solid(store: &TopologyStore, solid: SolidId) -> Result<()> {
    store
        .solid(solid)
        .map(|_| ())
        .map_err(|_| ZoneError::InvalidArgument("unknown zone solid".into()).into())
}

fn require_faces(store: &TopologyStore, faces: &[FaceId], what: &str) -> Result<()> {
    match faces.iter().find(|&&face| store.face(face).is_err()) {
        Some(face) => Err(ZoneError::InvalidArgument(format!("unknown {what} face {face:?}")).into()),
        None => Ok(()),
    }
}

/// Runs every validation check on a zone boundary.
///
/// Closedness is always checked; linearity, planarity and convexity only for
/// closed solids (they stay `false` otherwise). The opening checks run when
/// `openings` is non-empty and pass vacuously otherwise. `is_floor_in_zone`
/// is `true` here; floor inserts are judged by [`classify`].
///
/// # Errors
///
/// Returns [`ZoneError::InvalidArgument`] for an unknown solid or opening or
/// an unusable tolerance, and propagates errors from malformed topology.
#[instrument(skip(store, config, openings), fields(tol = config.tolerance, openings = openings.len()))]
pub fn validate(
    store: &TopologyStore,
    solid: SolidId,
    config: &ZoneConfig,
    openings: &[FaceId],
) -> Result<Diagnostics> {
    config.check()?;
    require_solid(store, solid)?;
    require_faces(store, openings, "opening")?;
    let tol = config.tolerance;

    let mut diagnostics = Diagnostics {
        is_closed: geometry_check::check_closed(store, solid, tol)?,
        is_windows_on_zone: true,
        is_windows_no_self_intersect: true,
        is_floor_in_zone: true,
        ..Diagnostics::default()
    };

    let needs_facets = diagnostics.is_closed || !openings.is_empty();
    let boundary = if needs_facets {
        TessellateSolid::new(solid, config.tessellation).execute(store)?
    } else {
        Vec::new()
    };

    if diagnostics.is_closed {
        diagnostics.is_linear = geometry_check::check_linear(store, solid)?;
        diagnostics.is_planar = geometry_check::check_planar(store, solid, tol)?;
        diagnostics.convexity = geometry_check::check_convex(store, solid, &boundary, config)?;
        diagnostics.is_convex = diagnostics.convexity.is_convex;
    } else {
        diagnostics.convexity.skipped = true;
    }

    if !openings.is_empty() {
        diagnostics.is_windows_on_zone = opening_check::check_windows_on_zone(
            store,
            &boundary,
            openings,
            tol,
            &config.tessellation,
        )?;
        diagnostics.is_windows_no_self_intersect =
            opening_check::check_windows_self_intersect(store, openings, tol, &config.tessellation)?;
    }

    diagnostics.aggregate();
    info!(
        valid = diagnostics.is_valid,
        valid_eplus = diagnostics.is_valid_eplus,
        closed = diagnostics.is_closed,
        convex = diagnostics.is_convex,
        ambiguous_chords = diagnostics.convexity.ambiguous_chords,
        "zone validation complete"
    );
    Ok(diagnostics)
}

/// Classifies the boundary faces of a zone and computes its volume.
///
/// Meant for solids that passed [`validate`]; the outward-normal probe and the
/// volume assume a closed boundary. Accepted floor inserts are appended to
/// the floors; a rejected one clears `is_floor_in_zone`.
///
/// # Errors
///
/// Returns [`ZoneError::InvalidArgument`] for an unknown solid or floor
/// insert or an unusable tolerance, and propagates errors from malformed
/// topology.
#[instrument(skip(store, config, floor_inserts), fields(floor_inserts = floor_inserts.len()))]
pub fn classify(
    store: &TopologyStore,
    solid: SolidId,
    config: &ZoneConfig,
    floor_inserts: &[FaceId],
) -> Result<Classification> {
    config.check()?;
    require_solid(store, solid)?;
    require_faces(store, floor_inserts, "floor insert")?;
    let tol = config.tolerance;

    let boundary = TessellateSolid::new(solid, config.tessellation).execute(store)?;
    let faces = face_properties(store, solid, &boundary, tol)?;

    let mut components = ComponentLists::default();
    for component in envelope::classify_faces(&faces, tol, config.roof_angle_deg) {
        components.push(component);
    }

    let mut is_floor_in_zone = true;
    for &insert in floor_inserts {
        if envelope::accept_floor_insert(store, insert, &boundary, tol)? {
            components.push(EnvelopeComponent::new(Role::Floor, insert, None));
        } else {
            is_floor_in_zone = false;
        }
    }

    let volume = facets_volume(&boundary);
    info!(
        walls = components.walls.len(),
        roofs = components.roofs.len(),
        floors = components.floors.len(),
        volume,
        is_floor_in_zone,
        "zone classification complete"
    );
    Ok(Classification {
        components,
        volume,
        is_floor_in_zone,
    })
}

/// A validated thermal zone: a boundary solid together with the opening,
/// floor-insert and shading faces supplied for it.
///
/// All fields are computed in [`Zone::new`] and read-only afterwards.
/// Component lists are non-empty and the volume is known only when the zone
/// is valid.
#[derive(Debug, Clone)]
pub struct Zone {
    index: usize,
    name: String,
    solid: SolidId,
    tolerance: f64,
    volume: Option<f64>,
    diagnostics: Diagnostics,
    report: String,
    components: ComponentLists,
}

impl Zone {
    /// Validates the zone and, if valid, classifies it.
    ///
    /// Openings and shading faces become components only for valid zones.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidArgument`] for an unknown solid or face id
    /// in any list or an unusable tolerance. Geometric problems are reported
    /// through [`Zone::diagnostics`], never as errors.
    pub fn new(store: &TopologyStore, input: ZoneInput) -> Result<Self> {
        require_faces(store, &input.floor_inserts, "floor insert")?;
        require_faces(store, &input.shading, "shading")?;

        let mut diagnostics = validate(store, input.solid, &input.config, &input.openings)?;
        let mut components = ComponentLists::default();
        let mut volume = None;

        if diagnostics.is_valid {
            let classification = classify(store, input.solid, &input.config, &input.floor_inserts)?;
            diagnostics.is_floor_in_zone = classification.is_floor_in_zone;
            components = classification.components;
            for &face in &input.openings {
                components.push(EnvelopeComponent::new(Role::Opening, face, None));
            }
            for &face in &input.shading {
                components.push(EnvelopeComponent::new(Role::Shading, face, None));
            }
            volume = Some(classification.volume);
        }

        let report = format!("Zone {} \"{}\"\n{}", input.index, input.name, diagnostics);

        Ok(Self {
            index: input.index,
            name: input.name,
            solid: input.solid,
            tolerance: input.config.tolerance,
            volume,
            diagnostics,
            report,
            components,
        })
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn solid(&self) -> SolidId {
        self.solid
    }

    #[must_use]
    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Enclosed volume, `None` unless the zone is valid.
    #[must_use]
    pub fn volume(&self) -> Option<f64> {
        self.volume
    }

    #[must_use]
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Multi-line report: a header line, then one line per verdict.
    #[must_use]
    pub fn report(&self) -> &str {
        &self.report
    }

    #[must_use]
    pub fn components(&self) -> &ComponentLists {
        &self.components
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.diagnostics.is_valid
    }

    #[must_use]
    pub fn is_valid_eplus(&self) -> bool {
        self.diagnostics.is_valid_eplus
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ThermozoneError;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakePolygon};
    use approx::assert_relative_eq;
    use fixtures::half_cylinder_prism;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn curved_zone_passes_loose_gate_only() {
        let mut store = TopologyStore::new();
        let solid = half_cylinder_prism(&mut store, 2.0);
        let zone = Zone::new(&store, ZoneInput::new(0, "apse", solid)).unwrap();

        let d = zone.diagnostics();
        assert!(d.is_closed);
        assert!(!d.is_linear);
        assert!(!d.is_planar);
        assert!(d.is_convex);
        assert!(zone.report().contains("IsConvex: true"));
        assert!(!zone.is_valid_eplus());
        assert!(zone.is_valid());
        assert_eq!(zone.components().floors.len(), 1);
        assert_eq!(zone.components().roofs.len(), 1);
        assert_eq!(zone.components().walls.len(), 2);
        assert_relative_eq!(zone.volume().unwrap(), std::f64::consts::PI, max_relative = 0.02);
    }

    #[test]
    fn open_solid_leaves_components_empty() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut store).unwrap();
        let faces = store.solid_faces(solid).unwrap()[1..].to_vec();
        let shell = crate::operations::creation::MakeShell::new(faces).execute(&mut store).unwrap();
        let open = crate::operations::creation::MakeSolid::new(shell, vec![]).execute(&mut store).unwrap();

        let zone = Zone::new(&store, ZoneInput::new(1, "open", open)).unwrap();
        let d = zone.diagnostics();
        assert!(!d.is_closed);
        assert!(!d.is_linear && !d.is_planar && !d.is_convex);
        assert!(!zone.is_valid());
        assert!(zone.components().is_empty());
        assert!(zone.volume().is_none());
    }

    #[test]
    fn report_has_header_and_every_flag() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut store).unwrap();
        let zone = Zone::new(&store, ZoneInput::new(7, "office", solid)).unwrap();
        let lines: Vec<&str> = zone.report().lines().collect();
        assert_eq!(lines[0], "Zone 7 \"office\"");
        assert_eq!(lines.len(), 10);
        assert!(lines.contains(&"IsValidEPlus: true"));
    }

    #[test]
    fn unknown_ids_and_bad_tolerance_are_errors() {
        let mut store = TopologyStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut store).unwrap();

        // The other store holds more faces, so `stray` has no counterpart here.
        let mut other = TopologyStore::new();
        MakeBox::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 1.0)).execute(&mut other).unwrap();
        let stray = MakePolygon::new(vec![p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)])
            .execute(&mut other)
            .unwrap();

        let cases = [
            ZoneInput::new(0, "a", solid).with_openings(vec![stray]),
            ZoneInput::new(0, "b", solid).with_floor_inserts(vec![stray]),
            ZoneInput::new(0, "c", solid).with_shading(vec![stray]),
            ZoneInput::new(0, "d", solid).with_config(ZoneConfig::new(0.0)),
        ];
        for input in cases {
            let err = Zone::new(&store, input).unwrap_err();
            assert!(matches!(err, ThermozoneError::Zone(ZoneError::InvalidArgument(_))));
        }

        let empty = TopologyStore::new();
        assert!(matches!(
            Zone::new(&empty, ZoneInput::new(0, "e", solid)),
            Err(ThermozoneError::Zone(ZoneError::InvalidArgument(_)))
        ));
    }
}
