//! Overload ordering by parameter specificity.
//!
//! Python overload resolution picks the first matching `@typing.overload`,
//! so more derived parameter types must come first. The depth of a type is
//! one more than the deepest of its base type and interfaces; element and
//! generic-argument depth only break ties.

use netstub_model::{MethodDef, TypeId, TypeKind, TypeUniverse, well_known};
use rustc_hash::FxHashMap;
use std::cmp::Ordering;

/// Ordering key of one parameter type. Compared lexicographically, so
/// element depth never outweighs a difference in the type's own depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Specificity {
    pub depth: u32,
    pub element_depth: u32,
}

#[derive(Debug, Default)]
pub struct SpecificityCache {
    depths: FxHashMap<TypeId, u32>,
}

impl SpecificityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inheritance depth of `ty`; `System.Object` is 1.
    pub fn depth(&mut self, universe: &TypeUniverse, ty: TypeId) -> u32 {
        if let Some(&depth) = self.depths.get(&ty) {
            return depth;
        }
        let depth = match universe.kind(ty) {
            TypeKind::Definition(_) | TypeKind::Constructed { .. } => {
                let mut deepest = universe
                    .base_of(ty)
                    .map_or(0, |base| self.depth(universe, base));
                for &iface in universe.interfaces_of(ty) {
                    deepest = deepest.max(self.depth(universe, iface));
                }
                deepest + 1
            }
            TypeKind::Array { .. } => {
                let array = universe.lookup(well_known::ARRAY);
                1 + array.map_or(0, |array| self.depth(universe, array))
            }
            TypeKind::ByRef(_) | TypeKind::Pointer(_) => 1,
            TypeKind::GenericParam(param) => {
                let mut deepest = universe
                    .lookup(well_known::OBJECT)
                    .map_or(0, |object| self.depth(universe, object));
                for &constraint in &param.constraints {
                    deepest = deepest.max(self.depth(universe, constraint));
                }
                deepest + 1
            }
        };
        self.depths.insert(ty, depth);
        depth
    }

    /// Deepest element or generic argument of `ty`, 0 when it has none.
    pub fn element_depth(&mut self, universe: &TypeUniverse, ty: TypeId) -> u32 {
        let mut deepest = universe
            .element_type(ty)
            .map_or(0, |element| self.depth(universe, element));
        for &arg in universe.generic_arguments(ty) {
            deepest = deepest.max(self.depth(universe, arg));
        }
        deepest
    }

    /// `Char` and `String` both map to `str`, so `Char` takes the key of
    /// `String` and the pair never decides an ordering.
    pub fn specificity(&mut self, universe: &TypeUniverse, ty: TypeId) -> Specificity {
        let ty = match universe.lookup(well_known::STRING) {
            Some(string) if universe.is_named(ty, well_known::CHAR) => string,
            _ => ty,
        };
        Specificity {
            depth: self.depth(universe, ty),
            element_depth: self.element_depth(universe, ty),
        }
    }

    /// Total order over members: name, arity, then the more specific
    /// parameter first, then parameter names.
    pub fn compare_members(
        &mut self,
        universe: &TypeUniverse,
        a: &MethodDef,
        b: &MethodDef,
    ) -> Ordering {
        a.non_generic_name()
            .cmp(b.non_generic_name())
            .then_with(|| a.parameters.len().cmp(&b.parameters.len()))
            .then_with(|| {
                for (pa, pb) in a.parameters.iter().zip(&b.parameters) {
                    let ka = self.specificity(universe, pa.ty);
                    let kb = self.specificity(universe, pb.ty);
                    match kb.cmp(&ka) {
                        Ordering::Equal => {}
                        decided => return decided,
                    }
                }
                Ordering::Equal
            })
            .then_with(|| parameter_names(a).cmp(&parameter_names(b)))
    }
}

fn parameter_names(method: &MethodDef) -> String {
    method.parameters.iter().map(|p| p.name.as_str()).collect()
}
