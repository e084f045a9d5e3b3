//! Overload arrangement: ordering, signature deduplication and the
//! helpers deciding how a generic method can be reached from Python.

use crate::context::StubContext;
use indexmap::IndexSet;
use netstub_model::{MethodDef, MethodId, TypeId, TypeKind, TypeUniverse, well_known};
use rustc_hash::FxHashSet;
use tracing::debug;

/// One member of an arranged overload set, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverloadEntry {
    Member(MethodId),
    /// Shadowed by an earlier member with the same Python signature.
    Collision(MethodId),
}

#[derive(Debug, Clone, Default)]
pub struct OverloadGroup {
    pub entries: Vec<OverloadEntry>,
}

impl OverloadGroup {
    pub fn members(&self) -> impl Iterator<Item = MethodId> + '_ {
        self.entries.iter().filter_map(|entry| match entry {
            OverloadEntry::Member(id) => Some(*id),
            OverloadEntry::Collision(_) => None,
        })
    }

    pub fn member_count(&self) -> usize {
        self.members().count()
    }

    /// More than one member survives, so each needs `@typing.overload`.
    pub fn is_overloaded(&self) -> bool {
        self.member_count() > 1
    }
}

/// Python dunder for a .NET operator method, if Python has one.
pub fn operator_name(name: &str) -> Option<&'static str> {
    Some(match name {
        "op_Addition" => "__add__",
        "op_Subtraction" => "__sub__",
        "op_Multiply" => "__mul__",
        "op_Division" => "__truediv__",
        "op_Modulus" => "__mod__",
        "op_BitwiseAnd" => "__and__",
        "op_BitwiseOr" => "__or__",
        "op_ExclusiveOr" => "__xor__",
        "op_LeftShift" => "__lshift__",
        "op_RightShift" => "__rshift__",
        "op_Equality" => "__eq__",
        "op_Inequality" => "__ne__",
        "op_LessThan" => "__lt__",
        "op_LessThanOrEqual" => "__le__",
        "op_GreaterThan" => "__gt__",
        "op_GreaterThanOrEqual" => "__ge__",
        "op_UnaryNegation" => "__neg__",
        "op_UnaryPlus" => "__pos__",
        "op_OnesComplement" => "__invert__",
        _ => return None,
    })
}

/// Python has a single numeric tower for overload purposes.
fn coalesce_numeric(name: String) -> String {
    match name.as_str() {
        "float" | "bool" => "int".to_string(),
        _ => name.replace("[float]", "[int]").replace("[bool]", "[int]"),
    }
}

/// Parameters rendered as `name : RawType`, the way .NET tooling prints them.
pub fn dotnet_signature(universe: &TypeUniverse, method: &MethodDef, separator: &str) -> String {
    method
        .parameters
        .iter()
        .map(|p| format!("{}{separator}{}", p.name, universe.raw_name(p.ty)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Generic parameters occurring anywhere inside `ty`.
pub fn collect_used_generics(universe: &TypeUniverse, ty: TypeId, out: &mut IndexSet<TypeId>) {
    match universe.kind(ty) {
        TypeKind::GenericParam(_) => {
            out.insert(ty);
        }
        TypeKind::Constructed { args, .. } => {
            for &arg in args {
                collect_used_generics(universe, arg, out);
            }
        }
        TypeKind::Array { element, .. } | TypeKind::ByRef(element) | TypeKind::Pointer(element) => {
            collect_used_generics(universe, *element, out);
        }
        TypeKind::Definition(_) => {}
    }
}

/// A generic method can be called without explicit type arguments when
/// each of its type parameters occurs in some parameter type.
pub fn is_generic_method_callable(universe: &TypeUniverse, method: &MethodDef) -> bool {
    let mut used = IndexSet::new();
    for parameter in &method.parameters {
        collect_used_generics(universe, parameter.ty, &mut used);
    }
    method.generic_params.iter().all(|param| used.contains(param))
}

fn mentions_generic(universe: &TypeUniverse, ty: TypeId) -> bool {
    let mut used = IndexSet::new();
    collect_used_generics(universe, ty, &mut used);
    !used.is_empty()
}

impl<'u> StubContext<'u> {
    /// Sort members with the specificity comparator (stable).
    pub(crate) fn sort_members(&mut self, members: &mut [MethodId]) {
        let universe = self.universe;
        members.sort_by(|&a, &b| {
            self.specificity
                .compare_members(universe, universe.method(a), universe.method(b))
        });
    }

    /// Signature under which Python sees a member. Two members with the
    /// same key cannot both be declared.
    pub fn unique_signature(&mut self, method: MethodId) -> String {
        let universe = self.universe;
        let method = universe.method(method);
        method
            .parameters
            .iter()
            .map(|p| {
                if universe.is_named(p.ty, well_known::CHAR) {
                    "char".to_string()
                } else {
                    coalesce_numeric(self.resolve(p.ty, true))
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Order `members` and drop later members whose signature collides
    /// with an earlier one.
    pub fn arrange_overloads(&mut self, members: &[MethodId]) -> OverloadGroup {
        let mut sorted = members.to_vec();
        self.sort_members(&mut sorted);
        let mut seen = FxHashSet::default();
        let mut group = OverloadGroup::default();
        for id in sorted {
            let signature = self.unique_signature(id);
            if seen.insert(signature) {
                group.entries.push(OverloadEntry::Member(id));
            } else {
                debug!(method = %self.universe.method(id).name, "overload collides with an earlier one");
                group.entries.push(OverloadEntry::Collision(id));
            }
        }
        group
    }

    pub(crate) fn collision_comment(&self, id: MethodId) -> String {
        let method = self.universe.method(id);
        let signature = dotnet_signature(self.universe, method, " : ");
        if method.is_constructor {
            format!("# Constructor .ctor({signature}) was skipped since it collides with above method")
        } else {
            format!(
                "# Method {}({signature}) was skipped since it collides with above method",
                method.name
            )
        }
    }

    /// Bound of a type variable: its constraints other than `ValueType`.
    /// Constraints that mention generic parameters cannot be expressed and
    /// leave the variable unbound.
    pub fn type_var_bound(&mut self, param: TypeId) -> Option<String> {
        let universe = self.universe;
        let constraints: Vec<TypeId> = universe
            .generic_param(param)?
            .constraints
            .iter()
            .copied()
            .filter(|&c| !universe.is_named(c, well_known::VALUE_TYPE))
            .collect();
        if constraints.is_empty() || constraints.iter().any(|&c| mentions_generic(universe, c)) {
            return None;
        }
        let mut rendered: Vec<String> = constraints.iter().map(|&c| self.resolve(c, true)).collect();
        if rendered.len() == 1 {
            return rendered.pop();
        }
        Some(format!("typing.Union[{}]", rendered.join(", ")))
    }

    /// Generic methods with equal bound keys share one accessor class.
    pub(crate) fn bounds_key(&mut self, id: MethodId) -> String {
        let universe = self.universe;
        universe
            .method(id)
            .generic_params
            .iter()
            .map(|&param| self.type_var_bound(param).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
