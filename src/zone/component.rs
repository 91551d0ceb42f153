use crate::topology::{FaceId, SolidId};

/// Envelope role of a classified face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Wall,
    Roof,
    Floor,
    Ceiling,
    Opening,
    Shading,
}

/// A role-tagged reference to one face.
///
/// Owns no geometry. `solid` is the zone solid when the face is part of its
/// boundary and `None` for caller-supplied faces (openings, floor inserts,
/// shading).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvelopeComponent {
    pub role: Role,
    pub face: FaceId,
    pub solid: Option<SolidId>,
}

impl EnvelopeComponent {
    #[must_use]
    pub fn new(role: Role, face: FaceId, solid: Option<SolidId>) -> Self {
        Self { role, face, solid }
    }
}

/// Re-tags boundary components as ceilings.
///
/// Ceilings depend on adjacency between zones, which a single zone cannot
/// see; an implementation with access to neighbouring zones decides.
pub trait CeilingResolver {
    /// Returns `true` if the wall or roof `component` is a ceiling.
    fn is_ceiling(&self, component: &EnvelopeComponent) -> bool;
}

/// Classified components of a zone, one list per role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentLists {
    pub walls: Vec<EnvelopeComponent>,
    pub roofs: Vec<EnvelopeComponent>,
    pub floors: Vec<EnvelopeComponent>,
    pub ceilings: Vec<EnvelopeComponent>,
    pub openings: Vec<EnvelopeComponent>,
    pub shading: Vec<EnvelopeComponent>,
}

impl ComponentLists {
    /// Appends `component` to the list for its role.
    pub fn push(&mut self, component: EnvelopeComponent) {
        let list = match component.role {
            Role::Wall => &mut self.walls,
            Role::Roof => &mut self.roofs,
            Role::Floor => &mut self.floors,
            Role::Ceiling => &mut self.ceilings,
            Role::Opening => &mut self.openings,
            Role::Shading => &mut self.shading,
        };
        list.push(component);
    }

    /// Total number of components over all roles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.walls.len()
            + self.roofs.len()
            + self.floors.len()
            + self.ceilings.len()
            + self.openings.len()
            + self.shading.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a copy in which walls and roofs accepted by `resolver` are
    /// moved to the ceilings, tagged [`Role::Ceiling`].
    #[must_use]
    pub fn with_ceilings(&self, resolver: &dyn CeilingResolver) -> Self {
        let mut lists = Self {
            floors: self.floors.clone(),
            ceilings: self.ceilings.clone(),
            openings: self.openings.clone(),
            shading: self.shading.clone(),
            ..Self::default()
        };
        for component in self.walls.iter().chain(&self.roofs) {
            if resolver.is_ceiling(component) {
                lists.push(EnvelopeComponent {
                    role: Role::Ceiling,
                    ..*component
                });
            } else {
                lists.push(*component);
            }
        }
        lists
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    struct RoofsAreCeilings;

    impl CeilingResolver for RoofsAreCeilings {
        fn is_ceiling(&self, component: &EnvelopeComponent) -> bool {
            component.role == Role::Roof
        }
    }

    #[test]
    fn push_sorts_by_role_and_resolver_retags_on_copy() {
        let mut keys: SlotMap<FaceId, ()> = SlotMap::with_key();
        let (a, b, c) = (keys.insert(()), keys.insert(()), keys.insert(()));

        let mut lists = ComponentLists::default();
        lists.push(EnvelopeComponent::new(Role::Wall, a, None));
        lists.push(EnvelopeComponent::new(Role::Roof, b, None));
        lists.push(EnvelopeComponent::new(Role::Opening, c, None));
        assert_eq!(lists.len(), 3);
        assert_eq!(lists.walls.len(), 1);

        let resolved = lists.with_ceilings(&RoofsAreCeilings);
        assert!(resolved.roofs.is_empty());
        assert_eq!(resolved.ceilings[0].face, b);
        assert_eq!(resolved.ceilings[0].role, Role::Ceiling);
        assert_eq!(resolved.walls.len(), 1);
        assert_eq!(lists.roofs.len(), 1);
    }
}
