//! Mapping from reflected types to Python annotation text.
//!
//! Resolution is not a pure function: every named type it touches is
//! registered with the dependency tracker so the import header and the
//! emission worklist stay in sync with what the body references.

use crate::context::StubContext;
use netstub_model::{GenericOwner, MethodDef, TypeId, TypeKind, TypeUniverse, well_known};
use tracing::trace;

/// Python spelling of the built-in primitives, keyed by full .NET name.
pub fn primitive_name(full_name: &str) -> Option<&'static str> {
    Some(match full_name {
        "System.Void" => "None",
        "System.Object" => "typing.Any",
        "System.String" | "System.Char" => "str",
        "System.Double" | "System.Single" => "float",
        "System.Boolean" => "bool",
        "System.Int64" | "System.Int32" | "System.Int16" | "System.Byte" | "System.SByte"
        | "System.UInt64" | "System.UInt32" | "System.UInt16" | "System.IntPtr" => "int",
        "System.Type" => "typing.Type[typing.Any]",
        _ => return None,
    })
}

/// Rename identifiers Python would reject as parameter or member names.
pub fn safe_python_name(name: &str) -> String {
    match name {
        "from" | "del" | "None" => format!("{name}_"),
        _ => name.to_string(),
    }
}

/// Property names that cannot be declared at all.
pub fn is_reserved_property_name(name: &str) -> bool {
    name == "None"
}

/// Non-generic name plus `_N` for generic types: ``Pair`2`` -> `Pair_2`.
pub fn clean_type_name(universe: &TypeUniverse, ty: TypeId) -> String {
    let definition = universe.generic_definition(ty);
    let base = match universe.definition(definition) {
        Some(def) => def.non_generic_name().to_string(),
        None => universe.raw_name(ty).into_owned(),
    };
    match universe.generic_arguments(ty).len() {
        0 => base,
        arity => format!("{base}_{arity}"),
    }
}

/// Method name plus `_N` for generic methods: ``Convert`1`` -> `Convert_1`.
pub fn clean_method_name(method: &MethodDef) -> String {
    let base = method.non_generic_name();
    match method.generic_params.len() {
        0 => base.to_string(),
        arity => format!("{base}_{arity}"),
    }
}

/// How a named type reference must be prefixed.
enum Qualification {
    Unqualified,
    /// Nested type, reached through its (resolved) declaring type.
    Nested(String),
    /// Namespace-qualified because the short name is taken.
    Namespace(String),
}

impl<'u> StubContext<'u> {
    /// Python annotation for `ty`. With `with_generics == false` the bare
    /// class name is returned (``List`1[int]`` -> `List_1`).
    pub fn resolve(&mut self, ty: TypeId, with_generics: bool) -> String {
        let universe = self.universe;
        if let Some(def) = universe.definition(ty) {
            if let Some(primitive) = primitive_name(&def.full_name) {
                return primitive.to_string();
            }
            if def.full_name == well_known::ARRAY {
                self.deps.register_array(universe, false);
                return "Array".to_string();
            }
        }
        match universe.kind(ty) {
            TypeKind::ByRef(element) | TypeKind::Pointer(element) => {
                if !with_generics {
                    return "clr.Reference".to_string();
                }
                let element = self.resolve(*element, true);
                format!("clr.Reference[{element}]")
            }
            TypeKind::Array { element, .. } => {
                self.deps.register_array(universe, true);
                if !with_generics {
                    return "Array_1".to_string();
                }
                let element = self.resolve(*element, true);
                format!("Array_1[{element}]")
            }
            TypeKind::GenericParam(param) => {
                let owner = match param.owner {
                    GenericOwner::Type(owner) => clean_type_name(universe, owner),
                    GenericOwner::Method(owner) => clean_method_name(universe.method(owner)),
                };
                let name = format!("{owner}_{}", param.name);
                match self.class_scopes.current_name() {
                    Some(scope) if scope != owner => format!("{scope}_{name}"),
                    _ => name,
                }
            }
            TypeKind::Definition(_) | TypeKind::Constructed { .. } => {
                self.resolve_named(ty, with_generics)
            }
        }
    }

    /// Return annotation; methods without a return value yield `None`.
    pub fn resolve_return(&mut self, ty: Option<TypeId>) -> String {
        match ty {
            Some(ty) => self.resolve(ty, true),
            None => "None".to_string(),
        }
    }

    fn resolve_named(&mut self, ty: TypeId, with_generics: bool) -> String {
        let universe = self.universe;
        let definition = universe.generic_definition(ty);
        let mut name = clean_type_name(universe, ty);

        if with_generics && universe.is_generic_type(ty) {
            let args: Vec<String> = universe
                .generic_arguments(ty)
                .iter()
                .map(|&arg| self.resolve(arg, true))
                .collect();
            if definition != ty && universe.is_named(definition, well_known::NULLABLE) {
                self.deps.register_global(universe, definition);
                return format!("typing.Optional[{}]", args.join(", "));
            }
            name = format!("{name}[{}]", args.join(", "));
        }

        match self.qualification(ty) {
            Qualification::Unqualified => {
                self.deps.register(universe, definition);
                name
            }
            Qualification::Namespace(prefix) => {
                self.deps.register_global(universe, definition);
                trace!(ty = %universe.display_name(ty), "namespace-qualified reference");
                format!("{prefix}{name}")
            }
            Qualification::Nested(prefix) => format!("{prefix}{name}"),
        }
    }

    fn qualification(&mut self, ty: TypeId) -> Qualification {
        let universe = self.universe;
        if let Some(outer) = universe.declaring_type(ty) {
            let outer = self.resolve(outer, false);
            return Qualification::Nested(format!("{outer}."));
        }
        let namespace = universe.namespace_of(ty);
        if namespace.is_empty() {
            return Qualification::Unqualified;
        }
        let clean = clean_type_name(universe, ty);
        if self.symbol_scopes.has_conflict(&clean, namespace) {
            self.deps.register_namespace(namespace);
            return Qualification::Namespace(format!("{namespace}."));
        }
        Qualification::Unqualified
    }
}
