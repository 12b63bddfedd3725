//! Serde model of the declaration schema consumed by the generator.
//!
//! The JSON layout mirrors what the serde derive side produces: every enum is
//! externally tagged and attribute records are flattened into their owner.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque reference to a span in the schema's originating source.
///
/// Location ids are passed through untouched so diagnostics can point back at
/// whatever produced the schema.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub String);

impl LocationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LocationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Root document: declarations in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Input {
    pub declarations: Vec<Declaration>,
}

/// A top-level named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub id: String,
    pub id_location: LocationId,
    #[serde(flatten)]
    pub attrs: Attrs,
    pub container_kind: ContainerShape,
}

/// Docs, generics and attribute maps shared by declarations, fields and variants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attrs {
    #[serde(default)]
    pub rust_docs: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rust_generics: Vec<(String, LocationId)>,
    /// e.g. `#[serde(rename = "newName")]`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub serde_attrs: BTreeMap<String, (String, LocationId)>,
    /// e.g. `#[serde(transparent)]`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub serde_flags: BTreeMap<String, LocationId>,
    /// e.g. `#[codegen(ts_as = "Date")]`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub codegen_attrs: BTreeMap<String, (String, LocationId)>,
    /// e.g. `#[codegen(hidden)]`
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub codegen_flags: BTreeMap<String, LocationId>,
}

impl Attrs {
    /// Value of a serde attribute such as `rename`.
    pub fn serde_attr(&self, key: &str) -> Option<&str> {
        self.serde_attrs.get(key).map(|(value, _)| value.as_str())
    }

    /// True when `key` is present either as a serde flag or as a serde attribute.
    pub fn has_serde(&self, key: &str) -> bool {
        self.serde_flags.contains_key(key) || self.serde_attrs.contains_key(key)
    }

    pub fn codegen_attr(&self, key: &str) -> Option<&str> {
        self.codegen_attrs.get(key).map(|(value, _)| value.as_str())
    }

    pub fn has_codegen_flag(&self, key: &str) -> bool {
        self.codegen_flags.contains_key(key)
    }

    pub fn generic_names(&self) -> impl Iterator<Item = &str> {
        self.rust_generics.iter().map(|(name, _)| name.as_str())
    }
}

/// Recursive description of a serialized type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// The schema producer could not describe this type.
    Incomplete { debug: String },
    /// Reference to another declaration, possibly with generic arguments.
    TypeName(TypeName),
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    #[serde(rename = "ISIZE")]
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    #[serde(rename = "USIZE")]
    Usize,
    F32,
    F64,
    Char,
    Str,
    Bytes,
    Option(Box<TypeExpr>),
    Never,
    Seq(Box<TypeExpr>),
    Map {
        key: Box<TypeExpr>,
        value: Box<TypeExpr>,
    },
    Tuple(Vec<TypeExpr>),
    #[serde(rename = "TupleArray", alias = "FixedArray")]
    FixedArray { content: Box<TypeExpr>, size: usize },
}

impl TypeExpr {
    pub fn name(ident: impl Into<String>) -> Self {
        Self::TypeName(TypeName {
            ident: ident.into(),
            generics: Vec::new(),
        })
    }

    pub fn option(inner: Self) -> Self {
        Self::Option(Box::new(inner))
    }

    pub fn seq(inner: Self) -> Self {
        Self::Seq(Box::new(inner))
    }

    /// The primitive this node stands for, if it is a scalar leaf.
    pub fn scalar(&self) -> Option<Scalar> {
        let scalar = match self {
            Self::Unit => Scalar::Unit,
            Self::Bool => Scalar::Bool,
            Self::I8 => Scalar::I8,
            Self::I16 => Scalar::I16,
            Self::I32 => Scalar::I32,
            Self::I64 => Scalar::I64,
            Self::I128 => Scalar::I128,
            Self::Isize => Scalar::Isize,
            Self::U8 => Scalar::U8,
            Self::U16 => Scalar::U16,
            Self::U32 => Scalar::U32,
            Self::U64 => Scalar::U64,
            Self::U128 => Scalar::U128,
            Self::Usize => Scalar::Usize,
            Self::F32 => Scalar::F32,
            Self::F64 => Scalar::F64,
            Self::Char => Scalar::Char,
            Self::Str => Scalar::Str,
            Self::Bytes => Scalar::Bytes,
            Self::Incomplete { .. }
            | Self::TypeName(_)
            | Self::Option(_)
            | Self::Never
            | Self::Seq(_)
            | Self::Map { .. }
            | Self::Tuple(_)
            | Self::FixedArray { .. } => return None,
        };
        Some(scalar)
    }
}

/// Primitive leaves of [`TypeExpr`], used as keys into target tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    Unit,
    Bool,
    I8,
    I16,
    I32,
    I64,
    I128,
    Isize,
    U8,
    U16,
    U32,
    U64,
    U128,
    Usize,
    F32,
    F64,
    Char,
    Str,
    Bytes,
}

/// Named type reference.
///
/// Older schema producers write the bare name as a string; both forms are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TypeNameRepr")]
pub struct TypeName {
    pub ident: String,
    pub generics: Vec<TypeExpr>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TypeNameRepr {
    Bare(String),
    Full {
        ident: String,
        #[serde(default)]
        generics: Vec<TypeExpr>,
    },
}

impl From<TypeNameRepr> for TypeName {
    fn from(repr: TypeNameRepr) -> Self {
        match repr {
            TypeNameRepr::Bare(ident) => Self {
                ident,
                generics: Vec::new(),
            },
            TypeNameRepr::Full { ident, generics } => Self { ident, generics },
        }
    }
}

/// Shape of a top-level declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerShape {
    UnitStruct,
    NewTypeStruct(Box<TypeExpr>),
    TupleStruct(Vec<TypeExpr>),
    Struct {
        fields: Vec<Field>,
    },
    Enum {
        repr: EnumRepresentation,
        variants: Vec<Variant>,
    },
}

/// How the variants of an enum are laid out on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnumRepresentation {
    /// `{ "Variant": payload }` or `"Variant"`.
    External,
    Untagged,
    Tagged {
        tag: String,
        tag_location: LocationId,
        content: Option<String>,
        content_location: Option<LocationId>,
    },
}

impl EnumRepresentation {
    pub fn label(&self) -> &'static str {
        match self {
            Self::External => "externally tagged",
            Self::Untagged => "untagged",
            Self::Tagged { content: None, .. } => "internally tagged",
            Self::Tagged {
                content: Some(_), ..
            } => "adjacently tagged",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub id: String,
    pub id_location: LocationId,
    #[serde(flatten)]
    pub attrs: Attrs,
    pub format: TypeExpr,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub id_location: LocationId,
    #[serde(flatten)]
    pub attrs: Attrs,
    pub variant_format: VariantShape,
}

/// Payload carried by an enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariantShape {
    Unit,
    NewType(Box<TypeExpr>),
    Tuple(Vec<TypeExpr>),
    Struct { fields: Vec<Field> },
}
