use crate::types::TypeId;

const TYPE_COUNT: usize = TypeId::ALL.len();

/// Single-parent conformance graph over [`TypeId`]s.
///
/// Each type has at most one parent edge. A type conforms to another if the
/// other lies on its parent chain (including itself).
#[derive(Debug, Clone)]
pub struct InheritanceGraph {
    parents: [Option<TypeId>; TYPE_COUNT],
}

static PRIMITIVES: InheritanceGraph = InheritanceGraph::build_primitives();

impl InheritanceGraph {
    /// Graph with no edges.
    pub const fn new() -> Self {
        Self {
            parents: [None; TYPE_COUNT],
        }
    }

    /// The built-in lattice: every concrete type's parent is `Object`.
    pub fn primitives() -> &'static InheritanceGraph {
        &PRIMITIVES
    }

    const fn build_primitives() -> Self {
        let mut graph = Self::new();
        graph.parents[TypeId::Int as usize] = Some(TypeId::Object);
        graph.parents[TypeId::Double as usize] = Some(TypeId::Object);
        graph.parents[TypeId::Bool as usize] = Some(TypeId::Object);
        graph.parents[TypeId::String as usize] = Some(TypeId::Object);
        graph
    }

    /// Sets the parent of `child`, replacing any previous edge.
    pub fn add_edge(&mut self, child: TypeId, parent: TypeId) {
        self.parents[child as usize] = Some(parent);
    }

    pub fn parent(&self, ty: TypeId) -> Option<TypeId> {
        self.parents[ty as usize]
    }

    pub fn edge_count(&self) -> usize {
        self.parents.iter().filter(|p| p.is_some()).count()
    }

    /// Is `ty` equal to `target` or one of its descendants?
    pub fn conforms(&self, ty: TypeId, target: TypeId) -> bool {
        let mut current = Some(ty);
        // The chain is bounded by the number of types, even if edges form a cycle.
        for _ in 0..TYPE_COUNT {
            match current {
                Some(t) if t == target => return true,
                Some(t) => current = self.parent(t),
                None => return false,
            }
        }
        false
    }
}

impl Default for InheritanceGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_edges() {
        let graph = InheritanceGraph::primitives();
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.parent(TypeId::Int), Some(TypeId::Object));
        assert_eq!(graph.parent(TypeId::Object), None);
        assert_eq!(graph.parent(TypeId::Void), None);
    }

    #[test]
    fn test_conformance() {
        let graph = InheritanceGraph::primitives();
        assert!(graph.conforms(TypeId::Int, TypeId::Int));
        assert!(graph.conforms(TypeId::Int, TypeId::Object));
        assert!(graph.conforms(TypeId::String, TypeId::Object));
        assert!(!graph.conforms(TypeId::Int, TypeId::Double));
        assert!(!graph.conforms(TypeId::Object, TypeId::Int));
        assert!(!graph.conforms(TypeId::Void, TypeId::Object));
    }

    #[test]
    fn test_null_conforms_to_everything() {
        for ty in TypeId::ALL {
            assert!(TypeId::Null.conforms_to(ty), "null should conform to {}", ty);
            assert!(TypeId::Null.matches(ty));
        }
        assert!(!TypeId::Int.matches(TypeId::Object));
        assert!(TypeId::Int.conforms_to(TypeId::Object));
    }

    #[test]
    fn test_resolve_surface_names() {
        assert_eq!(TypeId::resolve("int"), Some(TypeId::Int));
        assert_eq!(TypeId::resolve("String"), Some(TypeId::String));
        assert_eq!(TypeId::resolve("void"), Some(TypeId::Void));
        assert_eq!(TypeId::resolve("Int"), None);
        assert_eq!(TypeId::resolve("null"), None);
        for ty in TypeId::ALL.into_iter().filter(|&t| t != TypeId::Null) {
            assert_eq!(TypeId::resolve(ty.name()), Some(ty));
        }
    }

    #[test]
    fn test_cycle_terminates() {
        let mut graph = InheritanceGraph::new();
        graph.add_edge(TypeId::Int, TypeId::Double);
        graph.add_edge(TypeId::Double, TypeId::Int);
        assert!(!graph.conforms(TypeId::Int, TypeId::Object));
    }
}
