//! Interning store for every type and method of the loaded assemblies.
//!
//! The universe is built by the [`loader`](crate::loader) in two phases
//! (declare, then populate) and is read-only afterwards. Structural types
//! (constructed generics, arrays, references, pointers) are interned so
//! that a given shape is represented by exactly one [`TypeId`].

use crate::types::{
    GenericParam, MethodDef, MethodId, TypeDef, TypeId, TypeKind, well_known,
};
use indexmap::IndexSet;
use rustc_hash::FxHashMap;
use std::borrow::Cow;

#[derive(Debug, Default)]
pub struct TypeUniverse {
    types: Vec<TypeKind>,
    methods: Vec<MethodDef>,
    by_full_name: FxHashMap<String, TypeId>,
    constructed: FxHashMap<(TypeId, Vec<TypeId>), TypeId>,
    arrays: FxHashMap<(TypeId, u32), TypeId>,
    by_refs: FxHashMap<TypeId, TypeId>,
    pointers: FxHashMap<TypeId, TypeId>,
    /// Transitive interface lists, filled by [`TypeUniverse::finalize`].
    interface_closures: FxHashMap<TypeId, Vec<TypeId>>,
}

impl TypeUniverse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn kind(&self, id: TypeId) -> &TypeKind {
        &self.types[id.index()]
    }

    pub fn method(&self, id: MethodId) -> &MethodDef {
        &self.methods[id.index()]
    }

    /// The definition behind `id`, if `id` is a named type definition.
    pub fn definition(&self, id: TypeId) -> Option<&TypeDef> {
        match self.kind(id) {
            TypeKind::Definition(def) => Some(def),
            _ => None,
        }
    }

    pub fn generic_param(&self, id: TypeId) -> Option<&GenericParam> {
        match self.kind(id) {
            TypeKind::GenericParam(param) => Some(param),
            _ => None,
        }
    }

    pub fn lookup(&self, full_name: &str) -> Option<TypeId> {
        self.by_full_name.get(full_name).copied()
    }

    /// True when `id` is the definition named `full_name`.
    pub fn is_named(&self, id: TypeId, full_name: &str) -> bool {
        self.definition(id).is_some_and(|def| def.full_name == full_name)
    }

    /// All named definitions in declaration order.
    pub fn definitions(&self) -> impl Iterator<Item = (TypeId, &TypeDef)> {
        self.types.iter().enumerate().filter_map(|(idx, kind)| match kind {
            TypeKind::Definition(def) => Some((TypeId(idx as u32), def)),
            _ => None,
        })
    }

    // =========================================================================
    // Construction (loader)
    // =========================================================================

    pub(crate) fn declare_definition(&mut self, def: TypeDef) -> Option<TypeId> {
        if self.by_full_name.contains_key(&def.full_name) {
            return None;
        }
        let full_name = def.full_name.clone();
        let id = self.push(TypeKind::Definition(def));
        self.by_full_name.insert(full_name, id);
        Some(id)
    }

    pub(crate) fn definition_mut(&mut self, id: TypeId) -> Option<&mut TypeDef> {
        match &mut self.types[id.index()] {
            TypeKind::Definition(def) => Some(def),
            _ => None,
        }
    }

    pub(crate) fn add_generic_param(&mut self, param: GenericParam) -> TypeId {
        self.push(TypeKind::GenericParam(param))
    }

    pub(crate) fn generic_param_mut(&mut self, id: TypeId) -> Option<&mut GenericParam> {
        match &mut self.types[id.index()] {
            TypeKind::GenericParam(param) => Some(param),
            _ => None,
        }
    }

    pub(crate) fn add_method(&mut self, method: MethodDef) -> MethodId {
        let id = MethodId(self.methods.len() as u32);
        self.methods.push(method);
        id
    }

    pub(crate) fn method_mut(&mut self, id: MethodId) -> &mut MethodDef {
        &mut self.methods[id.index()]
    }

    fn push(&mut self, kind: TypeKind) -> TypeId {
        let id = TypeId(self.types.len() as u32);
        self.types.push(kind);
        id
    }

    pub fn intern_constructed(&mut self, definition: TypeId, args: Vec<TypeId>) -> TypeId {
        if let Some(&id) = self.constructed.get(&(definition, args.clone())) {
            return id;
        }
        let id = self.push(TypeKind::Constructed {
            definition,
            args: args.clone(),
        });
        self.constructed.insert((definition, args), id);
        id
    }

    pub fn intern_array(&mut self, element: TypeId, rank: u32) -> TypeId {
        if let Some(&id) = self.arrays.get(&(element, rank)) {
            return id;
        }
        let id = self.push(TypeKind::Array { element, rank });
        self.arrays.insert((element, rank), id);
        id
    }

    pub fn intern_by_ref(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.by_refs.get(&element) {
            return id;
        }
        let id = self.push(TypeKind::ByRef(element));
        self.by_refs.insert(element, id);
        id
    }

    pub fn intern_pointer(&mut self, element: TypeId) -> TypeId {
        if let Some(&id) = self.pointers.get(&element) {
            return id;
        }
        let id = self.push(TypeKind::Pointer(element));
        self.pointers.insert(element, id);
        id
    }

    /// Replace every occurrence of `params[i]` inside `ty` with `args[i]`.
    pub fn substitute(&mut self, ty: TypeId, params: &[TypeId], args: &[TypeId]) -> TypeId {
        if let Some(pos) = params.iter().position(|&p| p == ty) {
            return args.get(pos).copied().unwrap_or(ty);
        }
        match self.kind(ty) {
            TypeKind::Constructed {
                definition,
                args: inner,
            } => {
                let (definition, inner) = (*definition, inner.clone());
                let substituted: Vec<TypeId> = inner
                    .into_iter()
                    .map(|arg| self.substitute(arg, params, args))
                    .collect();
                self.intern_constructed(definition, substituted)
            }
            TypeKind::Array { element, rank } => {
                let (element, rank) = (*element, *rank);
                let element = self.substitute(element, params, args);
                self.intern_array(element, rank)
            }
            TypeKind::ByRef(element) => {
                let element = *element;
                let element = self.substitute(element, params, args);
                self.intern_by_ref(element)
            }
            TypeKind::Pointer(element) => {
                let element = *element;
                let element = self.substitute(element, params, args);
                self.intern_pointer(element)
            }
            TypeKind::Definition(_) | TypeKind::GenericParam(_) => ty,
        }
    }

    /// Compute the transitive interface closure of every definition and
    /// constructed type. Called once after all assemblies are populated.
    pub fn finalize(&mut self) {
        // Substitution interns new constructed types; they are visited too.
        let mut index = 0;
        while index < self.types.len() {
            let id = TypeId(index as u32);
            if matches!(
                self.kind(id),
                TypeKind::Definition(_) | TypeKind::Constructed { .. }
            ) {
                self.interface_closure(id);
            }
            index += 1;
        }
        tracing::debug!(
            types = self.types.len(),
            closures = self.interface_closures.len(),
            "type universe finalized"
        );
    }

    fn interface_closure(&mut self, id: TypeId) -> Vec<TypeId> {
        if let Some(done) = self.interface_closures.get(&id) {
            return done.clone();
        }
        let closure: Vec<TypeId> = match self.kind(id) {
            TypeKind::Definition(def) => {
                let (base, declared) = (def.base, def.interfaces.clone());
                let mut all = IndexSet::new();
                if let Some(base) = base {
                    all.extend(self.interface_closure(base));
                }
                for iface in declared {
                    all.insert(iface);
                    all.extend(self.interface_closure(iface));
                }
                all.into_iter().collect()
            }
            TypeKind::Constructed { definition, args } => {
                let (definition, args) = (*definition, args.clone());
                let params = self
                    .definition(definition)
                    .map(|def| def.generic_params.clone())
                    .unwrap_or_default();
                let open = self.interface_closure(definition);
                open.into_iter()
                    .map(|iface| self.substitute(iface, &params, &args))
                    .collect()
            }
            _ => Vec::new(),
        };
        self.interface_closures.insert(id, closure.clone());
        closure
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Every interface `id` implements, transitively, with substitution
    /// applied for constructed types.
    pub fn interfaces_of(&self, id: TypeId) -> &[TypeId] {
        self.interface_closures
            .get(&id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn base_of(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Definition(def) => def.base,
            TypeKind::Constructed { definition, .. } => self.base_of(*definition),
            _ => None,
        }
    }

    /// The generic definition of a constructed type, otherwise `id` itself.
    pub fn generic_definition(&self, id: TypeId) -> TypeId {
        match self.kind(id) {
            TypeKind::Constructed { definition, .. } => *definition,
            _ => id,
        }
    }

    /// Arguments of a constructed type, or the parameters of a definition.
    pub fn generic_arguments(&self, id: TypeId) -> &[TypeId] {
        match self.kind(id) {
            TypeKind::Constructed { args, .. } => args,
            TypeKind::Definition(def) => &def.generic_params,
            _ => &[],
        }
    }

    pub fn is_generic_type(&self, id: TypeId) -> bool {
        !self.generic_arguments(id).is_empty()
    }

    pub fn is_generic_type_definition(&self, id: TypeId) -> bool {
        self.definition(id).is_some_and(TypeDef::is_generic)
    }

    pub fn element_type(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Array { element, .. }
            | TypeKind::ByRef(element)
            | TypeKind::Pointer(element) => Some(*element),
            _ => None,
        }
    }

    /// Namespace a type is imported from.
    pub fn namespace_of(&self, id: TypeId) -> &str {
        match self.kind(id) {
            TypeKind::Definition(def) => &def.namespace,
            TypeKind::Constructed { definition, .. } => self.namespace_of(*definition),
            TypeKind::Array { element, .. }
            | TypeKind::ByRef(element)
            | TypeKind::Pointer(element) => self.namespace_of(*element),
            TypeKind::GenericParam(param) => match param.owner {
                crate::GenericOwner::Type(owner) => self.namespace_of(owner),
                crate::GenericOwner::Method(owner) => {
                    self.namespace_of(self.method(owner).declaring_type)
                }
            },
        }
    }

    pub fn declaring_type(&self, id: TypeId) -> Option<TypeId> {
        match self.kind(id) {
            TypeKind::Definition(def) => def.declaring_type,
            TypeKind::Constructed { definition, .. } => self.declaring_type(*definition),
            _ => None,
        }
    }

    /// Outermost declaring type of `id` (or `id` itself).
    pub fn root_type(&self, id: TypeId) -> TypeId {
        let mut current = self.generic_definition(id);
        while let Some(outer) = self.declaring_type(current) {
            current = outer;
        }
        current
    }

    /// Short .NET name: ``List`1``, `Int32[]`, `Int32&`, `T`.
    pub fn raw_name(&self, id: TypeId) -> Cow<'_, str> {
        match self.kind(id) {
            TypeKind::Definition(def) => Cow::Borrowed(&def.name),
            TypeKind::Constructed { definition, .. } => self.raw_name(*definition),
            TypeKind::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                Cow::Owned(format!("{}[{commas}]", self.raw_name(*element)))
            }
            TypeKind::ByRef(element) => Cow::Owned(format!("{}&", self.raw_name(*element))),
            TypeKind::Pointer(element) => Cow::Owned(format!("{}*", self.raw_name(*element))),
            TypeKind::GenericParam(param) => Cow::Borrowed(&param.name),
        }
    }

    /// Full .NET name, using the type-name grammar for structural types.
    pub fn display_name(&self, id: TypeId) -> String {
        match self.kind(id) {
            TypeKind::Definition(def) => def.full_name.clone(),
            TypeKind::Constructed { definition, args } => {
                let args: Vec<String> = args.iter().map(|&a| self.display_name(a)).collect();
                format!("{}[{}]", self.display_name(*definition), args.join(", "))
            }
            TypeKind::Array { element, rank } => {
                let commas = ",".repeat(rank.saturating_sub(1) as usize);
                format!("{}[{commas}]", self.display_name(*element))
            }
            TypeKind::ByRef(element) => format!("{}&", self.display_name(*element)),
            TypeKind::Pointer(element) => format!("{}*", self.display_name(*element)),
            TypeKind::GenericParam(param) => param.name.clone(),
        }
    }

    /// Effective visibility: the type and every declaring type are public.
    pub fn is_visible(&self, id: TypeId) -> bool {
        match self.definition(id) {
            Some(def) => {
                def.public && def.declaring_type.is_none_or(|outer| self.is_visible(outer))
            }
            None => false,
        }
    }

    pub fn is_void(&self, id: TypeId) -> bool {
        self.is_named(id, well_known::VOID)
    }
}
