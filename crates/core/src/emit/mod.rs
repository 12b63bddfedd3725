//! Declaration emission.
//!
//! An [`Emitter`] turns one [`Declaration`] into a [`Code`] subtree. The shape
//! analysis that every language needs (field names, optionality, flattening,
//! generics, docs) lives here; the layout itself is chosen by the target's
//! [`Syntax`] and implemented in the `typescript` and `go` submodules.

mod go;
mod typescript;

use shapegen_common::{
    Attrs, ContainerShape, Declaration, Field, LocationId, Message, TypeExpr, VariantShape,
};
use std::collections::BTreeSet;
use tracing::debug;

use crate::code::Code;
use crate::docs::DocComment;
use crate::error::Error;
use crate::target::{Syntax, Target};
use crate::translate::{Translated, incomplete_diagnostics, scalars, strip_option, translate};
use crate::validate::check_declaration;

/// Per-run settings that influence emitted text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Prefix for source backlinks in declaration docs; `None` disables them.
    pub locations_relative_to: Option<String>,
}

/// Code for one declaration plus the non-fatal diagnostics found on the way.
#[derive(Debug, Clone, Default)]
pub struct Emitted {
    pub code: Code,
    pub warnings: Vec<Message>,
    /// Packages the rendered types refer to.
    pub imports: BTreeSet<&'static str>,
}

/// Emission context for one run.
///
/// Holds only read-only configuration, so one emitter can be shared across
/// threads and declarations never observe each other.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    target: &'a dyn Target,
    options: &'a EmitOptions,
}

impl<'a> Emitter<'a> {
    pub fn new(target: &'a dyn Target, options: &'a EmitOptions) -> Self {
        Self { target, options }
    }

    pub fn target(&self) -> &'a dyn Target {
        self.target
    }

    /// Emit one declaration.
    ///
    /// Fails only for enum representations no layout can express.
    pub fn emit(&self, decl: &Declaration) -> Result<Emitted, Error> {
        check_declaration(decl)?;
        debug!(declaration = %decl.id, target = self.target.name(), "Emitting declaration.");

        let code = match self.target.syntax() {
            Syntax::TypeScript => typescript::declaration(self, decl),
            Syntax::Go => go::declaration(self, decl),
        };
        let sites = type_sites(decl);
        Ok(Emitted {
            code,
            warnings: incomplete_warnings(&sites),
            imports: self.imports(&sites),
        })
    }

    /// Imports needed by the types at `sites`. Fields whose type is replaced
    /// verbatim never render their own type.
    fn imports(&self, sites: &[Site<'_>]) -> BTreeSet<&'static str> {
        let override_attr = self.target.type_override_attr();
        sites
            .iter()
            .filter(|site| {
                site.attrs
                    .is_none_or(|attrs| attrs.codegen_attr(override_attr).is_none())
            })
            .flat_map(|site| scalars(site.expr))
            .filter_map(|scalar| self.target.scalar_import(scalar))
            .collect()
    }

    pub(crate) fn ident(&self, raw: &str) -> String {
        self.target.ident(raw)
    }

    pub(crate) fn translate(&self, expr: &TypeExpr) -> Translated {
        translate(expr, self.target)
    }

    pub(crate) fn docs(&self, attrs: &Attrs) -> Vec<String> {
        DocComment::new(attrs).render(&self.target.doc_style())
    }

    pub(crate) fn docs_with_extra(&self, attrs: &Attrs, extra: &str) -> Vec<String> {
        DocComment::new(attrs)
            .with_extra(extra)
            .render(&self.target.doc_style())
    }

    /// Declaration docs, with a source backlink when the run asks for one.
    pub(crate) fn declaration_docs(&self, decl: &Declaration) -> Vec<String> {
        DocComment::new(&decl.attrs)
            .with_source(
                self.options.locations_relative_to.as_deref(),
                &decl.id_location,
            )
            .render(&self.target.doc_style())
    }

    /// Analyse a field for a plain (non-flattened) position.
    pub(crate) fn field<'f>(&self, field: &'f Field) -> FieldInfo<'f> {
        let ty = self.translate(&field.format);
        let optional = ty.optional
            || (field.attrs.has_serde("default") && field.attrs.has_serde("skip_serializing_if"));
        FieldInfo {
            field,
            wire_name: wire_name(&field.id, &field.attrs),
            type_override: field.attrs.codegen_attr(self.target.type_override_attr()),
            ty,
            optional,
        }
    }

    /// Rendered type of a flattened field and whether it is optional.
    ///
    /// An optional flattened field yields the type with its options removed,
    /// so the caller can apply its own partial form.
    pub(crate) fn flattened(&self, field: &Field) -> (String, bool) {
        let optional = matches!(field.format, TypeExpr::Option(_));
        let ty = self.translate(strip_option(&field.format));
        (ty.src, optional)
    }
}

/// Everything a layout needs to know about a plain field.
#[derive(Debug, Clone)]
pub(crate) struct FieldInfo<'f> {
    pub field: &'f Field,
    /// Key on the wire: the serde rename if present, else the field id.
    pub wire_name: &'f str,
    pub type_override: Option<&'f str>,
    pub ty: Translated,
    /// The type admits absence, or serde both defaults and skips the field.
    pub optional: bool,
}

/// Wire name of a field or variant.
pub(crate) fn wire_name<'f>(id: &'f str, attrs: &'f Attrs) -> &'f str {
    attrs.serde_attr("rename").unwrap_or(id)
}

/// Split fields into `(plain, flattened)`, keeping their relative order.
pub(crate) fn split_flattened(fields: &[Field]) -> (Vec<&Field>, Vec<&Field>) {
    fields.iter().partition(|field| !field.attrs.has_serde("flatten"))
}

/// Generic parameter names declared on an item.
pub(crate) fn generic_names(attrs: &Attrs) -> Vec<String> {
    attrs.generic_names().map(str::to_string).collect()
}

/// A type expression, where it sits, and how to name its owner in messages.
#[derive(Debug)]
struct Site<'d> {
    owner: String,
    location: &'d LocationId,
    expr: &'d TypeExpr,
    /// Attributes of the field holding `expr`, if it is a field.
    attrs: Option<&'d Attrs>,
}

/// Every type expression a declaration renders, outermost owners first.
fn type_sites(decl: &Declaration) -> Vec<Site<'_>> {
    let mut sites = Vec::new();
    let whole = || format!("`{}`", decl.id);

    match &decl.container_kind {
        ContainerShape::UnitStruct => {}
        ContainerShape::NewTypeStruct(inner) => {
            sites.push(positional(whole(), &decl.id_location, inner.as_ref()));
        }
        ContainerShape::TupleStruct(items) => {
            sites.extend(
                items
                    .iter()
                    .map(|item| positional(whole(), &decl.id_location, item)),
            );
        }
        ContainerShape::Struct { fields } => field_sites(&mut sites, &decl.id, fields),
        ContainerShape::Enum { variants, .. } => {
            for variant in variants {
                let owner = format!("{}::{}", decl.id, variant.id);
                match &variant.variant_format {
                    VariantShape::Unit => {}
                    VariantShape::NewType(inner) => sites.push(positional(
                        format!("`{owner}`"),
                        &variant.id_location,
                        inner.as_ref(),
                    )),
                    VariantShape::Tuple(items) => sites.extend(
                        items
                            .iter()
                            .map(|item| positional(format!("`{owner}`"), &variant.id_location, item)),
                    ),
                    VariantShape::Struct { fields } => field_sites(&mut sites, &owner, fields),
                }
            }
        }
    }
    sites
}

fn positional<'d>(owner: String, location: &'d LocationId, expr: &'d TypeExpr) -> Site<'d> {
    Site {
        owner,
        location,
        expr,
        attrs: None,
    }
}

fn field_sites<'d>(sites: &mut Vec<Site<'d>>, owner: &str, fields: &'d [Field]) {
    sites.extend(fields.iter().map(|field| Site {
        owner: format!("`{owner}.{}`", field.id),
        location: &field.id_location,
        expr: &field.format,
        attrs: Some(&field.attrs),
    }));
}

fn incomplete_warnings(sites: &[Site<'_>]) -> Vec<Message> {
    let mut warnings = Vec::new();
    for site in sites {
        for diagnostic in incomplete_diagnostics(site.expr) {
            warnings.push(
                Message::new(format!("incomplete type in {}: {diagnostic}", site.owner))
                    .with_label(format!("{} declared here", site.owner), site.location.clone()),
            );
        }
    }
    warnings
}
