//! Shared data model for shapegen.
//!
//! This crate holds the schema the generator consumes ([`Input`] and the
//! recursive [`TypeExpr`] tree) and the [`Output`] document it produces. It is
//! used by both the generation core and the command-line front end.

pub mod output;
pub mod schema;

pub use output::{Message, Output, OutputFile};
pub use schema::{
    Attrs, ContainerShape, Declaration, EnumRepresentation, Field, Input, LocationId, Scalar,
    TypeExpr, TypeName, Variant, VariantShape,
};
