//! Assembly loading: manifest discovery, reference resolution, and the
//! two-phase build of a [`TypeUniverse`].
//!
//! Phase one declares a shell for every type of every assembly so that
//! forward and cross-assembly references resolve. Phase two resolves base
//! types, interfaces, constraints and members. The universe is finalized
//! (interface closures computed) once both phases succeed.

use crate::embedded_libs::{CORE_FACADES, CORE_LIBRARY_NAME, core_library_manifest};
use crate::error::{ModelError, Result};
use crate::manifest::{AssemblyManifest, GenericParamRecord, ParameterRecord, TypeRecord, Visibility};
use crate::type_name::TypeName;
use crate::types::{
    EnumValue, FieldDef, GenericOwner, GenericParam, MethodDef, MethodId, ParameterDef,
    PropertyDef, TypeCategory, TypeDef, TypeId, arity_marker, well_known,
};
use crate::universe::TypeUniverse;
use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File extension of manifest files located through search paths.
pub const MANIFEST_EXTENSION: &str = "json";

/// Collects manifests and their transitive references before building.
#[derive(Debug, Default)]
pub struct AssemblyLoader {
    search_paths: Vec<PathBuf>,
    manifests: IndexMap<String, AssemblyManifest>,
}

/// Types declared by one loaded assembly.
#[derive(Debug, Clone)]
pub struct LoadedAssembly {
    pub name: String,
    pub types: Vec<TypeId>,
}

/// A finalized universe plus the assemblies it was built from.
#[derive(Debug)]
pub struct LoadedModel {
    pub universe: TypeUniverse,
    pub assemblies: IndexMap<String, LoadedAssembly>,
}

impl LoadedModel {
    pub fn assembly(&self, name: &str) -> Option<&LoadedAssembly> {
        self.assemblies.get(name)
    }

    /// Visible types of an assembly, in declaration order.
    pub fn exported_types(&self, name: &str) -> Vec<TypeId> {
        self.assembly(name)
            .map(|asm| {
                asm.types
                    .iter()
                    .copied()
                    .filter(|&ty| self.universe.is_visible(ty))
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl AssemblyLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// A loader with the embedded core library already added.
    pub fn with_core_library() -> Result<Self> {
        let mut loader = Self::new();
        loader.add_manifest(core_library_manifest()?)?;
        Ok(loader)
    }

    pub fn add_search_path(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if !self.search_paths.contains(&path) {
            debug!(path = %path.display(), "added search path");
            self.search_paths.push(path);
        }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.manifests.contains_key(name)
    }

    /// Load a manifest file. Its directory becomes a search path for the
    /// references it names. Returns the assembly name.
    pub fn load_file(&mut self, path: &Path) -> Result<String> {
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            self.add_search_path(dir);
        }
        let manifest = AssemblyManifest::from_path(path)?;
        self.add_manifest(manifest)
    }

    /// Add a manifest and resolve its references. Adding an assembly whose
    /// name is already loaded is a no-op.
    pub fn add_manifest(&mut self, manifest: AssemblyManifest) -> Result<String> {
        let name = manifest.name.clone();
        if self.manifests.contains_key(&name) {
            return Ok(name);
        }
        let references = manifest.references.clone();
        info!(assembly = %name, types = manifest.types.len(), "loaded assembly manifest");
        self.manifests.insert(name.clone(), manifest);

        for reference in references {
            if self.manifests.contains_key(&reference) {
                continue;
            }
            if let Some(path) = self.locate(&reference) {
                self.load_file(&path)?;
                continue;
            }
            let is_core = reference == CORE_LIBRARY_NAME || CORE_FACADES.contains(&reference.as_str());
            if is_core && self.manifests.contains_key(CORE_LIBRARY_NAME) {
                continue;
            }
            return Err(ModelError::UnresolvedAssembly {
                name: reference,
                referenced_by: name,
            });
        }
        Ok(name)
    }

    fn locate(&self, assembly: &str) -> Option<PathBuf> {
        let file_name = format!("{assembly}.{MANIFEST_EXTENSION}");
        self.search_paths
            .iter()
            .map(|dir| dir.join(&file_name))
            .find(|candidate| candidate.is_file())
    }

    /// Declare, populate and finalize every collected assembly.
    pub fn build(self) -> Result<LoadedModel> {
        let mut universe = TypeUniverse::new();
        let mut assemblies = IndexMap::new();
        let mut pending: Vec<(&TypeRecord, TypeId)> = Vec::new();

        for (name, manifest) in &self.manifests {
            // Outer types must be declared before the types nested in them.
            let mut records: Vec<&TypeRecord> = manifest.types.iter().collect();
            records.sort_by_key(|record| record.name.matches('+').count());

            let mut types = Vec::with_capacity(records.len());
            for record in records {
                let id = declare_type(&mut universe, name, record)?;
                types.push(id);
                pending.push((record, id));
            }
            assemblies.insert(
                name.clone(),
                LoadedAssembly {
                    name: name.clone(),
                    types,
                },
            );
        }

        for (record, id) in pending {
            populate_type(&mut universe, record, id)?;
        }
        universe.finalize();

        Ok(LoadedModel {
            universe,
            assemblies,
        })
    }
}

/// Build a model from in-memory manifests plus the embedded core library.
pub fn from_manifests(manifests: impl IntoIterator<Item = AssemblyManifest>) -> Result<LoadedModel> {
    let mut loader = AssemblyLoader::with_core_library()?;
    for manifest in manifests {
        loader.add_manifest(manifest)?;
    }
    loader.build()
}

// =============================================================================
// Phase one: declaration
// =============================================================================

fn declare_type(universe: &mut TypeUniverse, assembly: &str, record: &TypeRecord) -> Result<TypeId> {
    let full_name = record.name.trim();
    let (declaring_type, namespace, name) = match full_name.rsplit_once('+') {
        Some((outer, inner)) => {
            let outer_id = universe
                .lookup(outer)
                .ok_or_else(|| ModelError::MissingDeclaringType(full_name.to_string()))?;
            let namespace = universe
                .definition(outer_id)
                .map(|def| def.namespace.clone())
                .unwrap_or_default();
            (Some(outer_id), namespace, inner.to_string())
        }
        None => match full_name.rsplit_once('.') {
            Some((namespace, name)) => (None, namespace.to_string(), name.to_string()),
            None => (None, String::new(), full_name.to_string()),
        },
    };

    let expected = arity_marker(&name).unwrap_or(0);
    if expected != record.generic_params.len() {
        return Err(ModelError::ArityMismatch {
            name: full_name.to_string(),
            expected,
            found: record.generic_params.len(),
        });
    }

    let def = TypeDef {
        namespace,
        name,
        full_name: full_name.to_string(),
        assembly: assembly.to_string(),
        declaring_type,
        category: record.kind,
        public: record.visibility == Visibility::Public,
        is_abstract: record.is_abstract,
        generic_params: Vec::new(),
        base: None,
        interfaces: Vec::new(),
        nested_types: Vec::new(),
        constructors: Vec::new(),
        methods: Vec::new(),
        properties: Vec::new(),
        fields: Vec::new(),
        enum_underlying: None,
        enum_values: Vec::new(),
    };
    let id = universe
        .declare_definition(def)
        .ok_or_else(|| ModelError::DuplicateType(full_name.to_string()))?;

    // Nested types re-declare the generic parameters of their declaring type.
    let inherited: Vec<GenericParam> = declaring_type
        .and_then(|outer| universe.definition(outer))
        .map(|outer| outer.generic_params.clone())
        .unwrap_or_default()
        .into_iter()
        .filter_map(|param| universe.generic_param(param).cloned())
        .collect();

    let mut params = Vec::with_capacity(inherited.len() + record.generic_params.len());
    for param in &inherited {
        params.push(universe.add_generic_param(GenericParam {
            name: param.name.clone(),
            position: params.len() as u32,
            owner: GenericOwner::Type(id),
            variance: param.variance,
            constraints: Vec::new(),
        }));
    }
    for param in &record.generic_params {
        params.push(universe.add_generic_param(GenericParam {
            name: param.name.clone(),
            position: params.len() as u32,
            owner: GenericOwner::Type(id),
            variance: param.variance,
            constraints: Vec::new(),
        }));
    }

    if let Some(def) = universe.definition_mut(id) {
        def.generic_params = params;
    }
    if let Some(outer) = declaring_type.and_then(|outer| universe.definition_mut(outer)) {
        outer.nested_types.push(id);
    }
    Ok(id)
}

// =============================================================================
// Phase two: population
// =============================================================================

fn populate_type(universe: &mut TypeUniverse, record: &TypeRecord, id: TypeId) -> Result<()> {
    let Some(def) = universe.definition(id) else {
        return Ok(());
    };
    let full_name = def.full_name.clone();
    let category = def.category;
    let scope = def.generic_params.clone();
    let inherited: Vec<TypeId> = def
        .declaring_type
        .and_then(|outer| universe.definition(outer))
        .map(|outer| outer.generic_params.clone())
        .unwrap_or_default();

    for (index, &param) in scope.iter().enumerate() {
        let constraints = match inherited.get(index) {
            Some(&outer_param) => universe
                .generic_param(outer_param)
                .map(|outer| outer.constraints.clone())
                .unwrap_or_default(),
            None => {
                let own = &record.generic_params[index - inherited.len()];
                resolve_all(universe, &own.constraints, &scope, &full_name)?
            }
        };
        if let Some(param) = universe.generic_param_mut(param) {
            param.constraints = constraints;
        }
    }

    let base = match &record.base {
        Some(text) => Some(resolve_text(universe, text, &scope, &full_name)?),
        None => default_base(universe, category, &full_name),
    };
    let interfaces = resolve_all(universe, &record.interfaces, &scope, &full_name)?;

    let enum_underlying = if category == TypeCategory::Enum {
        match &record.enum_underlying {
            Some(text) => Some(resolve_text(universe, text, &scope, &full_name)?),
            None => universe.lookup(well_known::INT32),
        }
    } else {
        None
    };
    let enum_values = record
        .enum_values
        .iter()
        .map(|value| EnumValue {
            name: value.name.clone(),
            value: value.value,
        })
        .collect();

    let mut constructors = Vec::with_capacity(record.constructors.len());
    for ctor in &record.constructors {
        let parameters = resolve_parameters(universe, &ctor.parameters, &scope, &full_name)?;
        constructors.push(universe.add_method(MethodDef {
            name: ".ctor".to_string(),
            declaring_type: id,
            is_constructor: true,
            is_static: false,
            is_abstract: false,
            is_special_name: true,
            generic_params: Vec::new(),
            parameters,
            return_type: None,
        }));
    }

    let mut methods = Vec::with_capacity(record.methods.len());
    for method in &record.methods {
        let method_id = universe.add_method(MethodDef {
            name: method.name.clone(),
            declaring_type: id,
            is_constructor: false,
            is_static: method.is_static,
            is_abstract: method.is_abstract,
            is_special_name: method.special_name || method.name.starts_with("op_"),
            generic_params: Vec::new(),
            parameters: Vec::new(),
            return_type: None,
        });
        let context = format!("{full_name}.{}", method.name);
        let method_params = declare_method_generics(universe, method_id, &method.generic_params);
        let mut method_scope = scope.clone();
        method_scope.extend(method_params.iter().copied());

        for (param, record) in method_params.iter().zip(&method.generic_params) {
            let constraints = resolve_all(universe, &record.constraints, &method_scope, &context)?;
            if let Some(param) = universe.generic_param_mut(*param) {
                param.constraints = constraints;
            }
        }
        let parameters = resolve_parameters(universe, &method.parameters, &method_scope, &context)?;
        let return_type = match &method.return_type {
            Some(text) => {
                let ty = resolve_text(universe, text, &method_scope, &context)?;
                (!universe.is_void(ty)).then_some(ty)
            }
            None => None,
        };

        let def = universe.method_mut(method_id);
        def.generic_params = method_params;
        def.parameters = parameters;
        def.return_type = return_type;
        methods.push(method_id);
    }

    let mut properties = Vec::with_capacity(record.properties.len());
    for property in &record.properties {
        properties.push(PropertyDef {
            name: property.name.clone(),
            ty: resolve_text(universe, &property.ty, &scope, &full_name)?,
            is_static: property.is_static,
            can_read: property.can_read,
            can_write: property.can_write,
        });
    }

    let mut fields = Vec::with_capacity(record.fields.len());
    for field in &record.fields {
        fields.push(FieldDef {
            name: field.name.clone(),
            ty: resolve_text(universe, &field.ty, &scope, &full_name)?,
            is_static: field.is_static,
        });
    }

    if let Some(def) = universe.definition_mut(id) {
        def.base = base;
        def.interfaces = interfaces;
        def.enum_underlying = enum_underlying;
        def.enum_values = enum_values;
        def.constructors = constructors;
        def.methods = methods;
        def.properties = properties;
        def.fields = fields;
    }
    Ok(())
}

fn declare_method_generics(
    universe: &mut TypeUniverse,
    method: MethodId,
    records: &[GenericParamRecord],
) -> Vec<TypeId> {
    records
        .iter()
        .enumerate()
        .map(|(position, record)| {
            universe.add_generic_param(GenericParam {
                name: record.name.clone(),
                position: position as u32,
                owner: GenericOwner::Method(method),
                variance: record.variance,
                constraints: Vec::new(),
            })
        })
        .collect()
}

fn default_base(universe: &TypeUniverse, category: TypeCategory, full_name: &str) -> Option<TypeId> {
    match category {
        TypeCategory::Interface => None,
        TypeCategory::Class if full_name == well_known::OBJECT => None,
        TypeCategory::Class => universe.lookup(well_known::OBJECT),
        TypeCategory::Struct => universe.lookup(well_known::VALUE_TYPE),
        TypeCategory::Enum => universe.lookup(well_known::ENUM),
        TypeCategory::Delegate => universe.lookup(well_known::MULTICAST_DELEGATE),
    }
}

fn resolve_parameters(
    universe: &mut TypeUniverse,
    records: &[ParameterRecord],
    scope: &[TypeId],
    context: &str,
) -> Result<Vec<ParameterDef>> {
    records
        .iter()
        .map(|record| {
            Ok(ParameterDef {
                name: record.name.clone(),
                ty: resolve_text(universe, &record.ty, scope, context)?,
                has_default: record.optional,
            })
        })
        .collect()
}

fn resolve_all(
    universe: &mut TypeUniverse,
    texts: &[String],
    scope: &[TypeId],
    context: &str,
) -> Result<Vec<TypeId>> {
    texts
        .iter()
        .map(|text| resolve_text(universe, text, scope, context))
        .collect()
}

/// Parse and resolve a type-name string. Simple identifiers resolve to the
/// innermost generic parameter of that name before any type lookup.
pub fn resolve_text(
    universe: &mut TypeUniverse,
    text: &str,
    scope: &[TypeId],
    context: &str,
) -> Result<TypeId> {
    let name = TypeName::parse(text)?;
    resolve_name(universe, &name, scope, context)
}

fn resolve_name(
    universe: &mut TypeUniverse,
    name: &TypeName,
    scope: &[TypeId],
    context: &str,
) -> Result<TypeId> {
    if let Some(ident) = name.as_simple_identifier() {
        let param = scope
            .iter()
            .rev()
            .copied()
            .find(|&param| universe.generic_param(param).is_some_and(|p| p.name == ident));
        if let Some(param) = param {
            return Ok(param);
        }
    }

    match name {
        TypeName::Named { path, args } => {
            let definition = universe.lookup(path).ok_or_else(|| ModelError::UnknownType {
                name: path.clone(),
                context: context.to_string(),
            })?;
            if args.is_empty() {
                return Ok(definition);
            }
            let expected = universe
                .definition(definition)
                .map_or(0, |def| def.generic_params.len());
            if expected != args.len() {
                return Err(ModelError::ArityMismatch {
                    name: path.clone(),
                    expected,
                    found: args.len(),
                });
            }
            let args = args
                .iter()
                .map(|arg| resolve_name(universe, arg, scope, context))
                .collect::<Result<Vec<_>>>()?;
            Ok(universe.intern_constructed(definition, args))
        }
        TypeName::Array { element, rank } => {
            let element = resolve_name(universe, element, scope, context)?;
            Ok(universe.intern_array(element, *rank))
        }
        TypeName::ByRef(element) => {
            let element = resolve_name(universe, element, scope, context)?;
            Ok(universe.intern_by_ref(element))
        }
        TypeName::Pointer(element) => {
            let element = resolve_name(universe, element, scope, context)?;
            Ok(universe.intern_pointer(element))
        }
    }
}
