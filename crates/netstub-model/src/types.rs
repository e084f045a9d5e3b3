//! Type and member representations of the reflected object model.
//!
//! Every type is interned in a [`TypeUniverse`](crate::TypeUniverse) and
//! referred to by its [`TypeId`]. Two references to the same type always
//! carry the same id, so ids can be compared and hashed directly.

use serde::Deserialize;

/// Interned handle to a type in a [`TypeUniverse`](crate::TypeUniverse).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TypeId(pub u32);

/// Interned handle to a method or constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MethodId(pub u32);

impl TypeId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

impl MethodId {
    #[inline]
    pub(crate) const fn index(self) -> usize {
        self.0 as usize
    }
}

/// The declared category of a type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeCategory {
    #[default]
    Class,
    Interface,
    Struct,
    Enum,
    Delegate,
}

/// Declared variance of a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variance {
    #[default]
    Invariant,
    Covariant,
    Contravariant,
}

/// Who declares a generic parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericOwner {
    Type(TypeId),
    Method(MethodId),
}

/// A generic type or method parameter.
#[derive(Debug, Clone)]
pub struct GenericParam {
    pub name: String,
    /// Zero-based position in the owner's full parameter list.
    pub position: u32,
    pub owner: GenericOwner,
    pub variance: Variance,
    pub constraints: Vec<TypeId>,
}

/// A named type declared by some assembly.
#[derive(Debug, Clone)]
pub struct TypeDef {
    /// Namespace; nested types carry the namespace of their outermost type.
    pub namespace: String,
    /// Raw name including the arity marker, e.g. ``Pair`2``.
    pub name: String,
    /// Fully qualified name, e.g. ``Acme.Outer`1+Inner``.
    pub full_name: String,
    pub assembly: String,
    pub declaring_type: Option<TypeId>,
    pub category: TypeCategory,
    /// Declared visibility of this type alone. See
    /// [`TypeUniverse::is_visible`](crate::TypeUniverse::is_visible) for the
    /// effective visibility of nested types.
    pub public: bool,
    pub is_abstract: bool,
    /// Full generic parameter list, outer-type parameters first.
    pub generic_params: Vec<TypeId>,
    pub base: Option<TypeId>,
    /// Directly declared interfaces only.
    pub interfaces: Vec<TypeId>,
    pub nested_types: Vec<TypeId>,
    pub constructors: Vec<MethodId>,
    pub methods: Vec<MethodId>,
    pub properties: Vec<PropertyDef>,
    pub fields: Vec<FieldDef>,
    pub enum_underlying: Option<TypeId>,
    pub enum_values: Vec<EnumValue>,
}

impl TypeDef {
    /// Name with the arity marker stripped, e.g. `Pair` for ``Pair`2``.
    pub fn non_generic_name(&self) -> &str {
        strip_arity(&self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.category == TypeCategory::Interface
    }

    pub fn is_enum(&self) -> bool {
        self.category == TypeCategory::Enum
    }

    pub fn is_generic(&self) -> bool {
        !self.generic_params.is_empty()
    }
}

/// The shape of an interned type.
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A named type definition (generic definitions included).
    Definition(TypeDef),
    /// A generic definition applied to concrete arguments.
    Constructed { definition: TypeId, args: Vec<TypeId> },
    Array { element: TypeId, rank: u32 },
    ByRef(TypeId),
    Pointer(TypeId),
    GenericParam(GenericParam),
}

/// A method or constructor.
#[derive(Debug, Clone)]
pub struct MethodDef {
    pub name: String,
    pub declaring_type: TypeId,
    pub is_constructor: bool,
    pub is_static: bool,
    pub is_abstract: bool,
    /// Compiler-reserved names: operators and property accessors.
    pub is_special_name: bool,
    pub generic_params: Vec<TypeId>,
    pub parameters: Vec<ParameterDef>,
    /// `None` for methods returning nothing.
    pub return_type: Option<TypeId>,
}

impl MethodDef {
    pub fn non_generic_name(&self) -> &str {
        strip_arity(&self.name)
    }

    pub fn is_generic_definition(&self) -> bool {
        !self.generic_params.is_empty()
    }

    /// Property (`get_`/`set_`) and event (`add_`/`remove_`) accessors.
    pub fn is_property_accessor(&self) -> bool {
        self.is_special_name
            && ["get_", "set_", "add_", "remove_"]
                .iter()
                .any(|prefix| self.name.starts_with(prefix))
    }

    pub fn is_operator(&self) -> bool {
        self.is_special_name && self.name.starts_with("op_")
    }
}

#[derive(Debug, Clone)]
pub struct ParameterDef {
    pub name: String,
    pub ty: TypeId,
    pub has_default: bool,
}

#[derive(Debug, Clone)]
pub struct PropertyDef {
    pub name: String,
    pub ty: TypeId,
    pub is_static: bool,
    pub can_read: bool,
    pub can_write: bool,
}

#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeId,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    pub name: String,
    pub value: i64,
}

/// Strip a trailing ``` `N ``` arity marker from a raw name.
pub fn strip_arity(name: &str) -> &str {
    match name.find('`') {
        Some(idx) => &name[..idx],
        None => name,
    }
}

/// Parse the arity marker of a raw name (``Pair`2`` -> 2, `Pair` -> 0).
pub fn arity_marker(name: &str) -> Option<usize> {
    let (_, digits) = name.split_once('`')?;
    digits.parse().ok()
}

/// Well-known full names the engine treats specially.
pub mod well_known {
    pub const OBJECT: &str = "System.Object";
    pub const VALUE_TYPE: &str = "System.ValueType";
    pub const ENUM: &str = "System.Enum";
    pub const VOID: &str = "System.Void";
    pub const STRING: &str = "System.String";
    pub const CHAR: &str = "System.Char";
    pub const INT32: &str = "System.Int32";
    pub const BOOLEAN: &str = "System.Boolean";
    pub const ARRAY: &str = "System.Array";
    pub const NULLABLE: &str = "System.Nullable`1";
    pub const TYPE: &str = "System.Type";
    pub const ENUMERABLE: &str = "System.Collections.IEnumerable";
    pub const GENERIC_ENUMERABLE: &str = "System.Collections.Generic.IEnumerable`1";
    pub const MULTICAST_DELEGATE: &str = "System.MulticastDelegate";
}
