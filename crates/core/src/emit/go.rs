//! Go declaration layout.
//!
//! Structs carry `json` tags so `encoding/json` reads the same shapes serde
//! writes. Go has no sum types, so an enum becomes a sealed interface with
//! one struct per variant, `New*` constructors, a struct of callbacks and a
//! `Match*` function built on a type switch.

use shapegen_common::{ContainerShape, Declaration, Field, TypeExpr, Variant, VariantShape};

use super::{Emitter, generic_names, split_flattened, wire_name};
use crate::code::Code;
use crate::ident::{positional_name, string_literal};
use crate::translate::strip_option;

pub(super) fn declaration(emitter: &Emitter<'_>, decl: &Declaration) -> Code {
    let ctx = Decl {
        emitter,
        name: emitter.ident(&decl.id),
        generics: generic_names(&decl.attrs),
        docs: emitter.declaration_docs(decl),
    };
    let mut code = Code::new();
    match &decl.container_kind {
        ContainerShape::UnitStruct => ctx.unit_struct(&mut code),
        ContainerShape::NewTypeStruct(inner) => {
            ctx.new_type(&mut code, inner, decl.attrs.has_serde("transparent"));
        }
        ContainerShape::TupleStruct(items) => ctx.tuple_struct(&mut code, items),
        ContainerShape::Struct { fields } => ctx.struct_type(&mut code, fields),
        ContainerShape::Enum { variants, .. } => ctx.sealed_interface(&mut code, variants),
    }
    code
}

/// `[A, B]`, or nothing for an empty list.
fn brackets(items: &[String]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        format!("[{}]", items.join(", "))
    }
}

fn json_tag(wire: &str, omit_empty: bool) -> String {
    let omit = if omit_empty { ",omitempty" } else { "" };
    format!("`json:{}`", string_literal(&format!("{wire}{omit}")))
}

struct Decl<'e, 'a> {
    emitter: &'e Emitter<'a>,
    name: String,
    generics: Vec<String>,
    docs: Vec<String>,
}

impl Decl<'_, '_> {
    /// Type parameter list: `[T any, U any]`.
    fn params(&self) -> String {
        let params: Vec<String> = self.generics.iter().map(|g| format!("{g} any")).collect();
        brackets(&params)
    }

    /// Type arguments: `[T, U]`.
    fn args(&self) -> String {
        brackets(&self.generics)
    }

    fn ty(&self) -> String {
        format!("{}{}", self.name, self.args())
    }

    /// `New<Name>` returning `returns`, with a one-line body.
    fn constructor(&self, code: &mut Code, params: &str, returns: &str, body: &str) {
        code.line("");
        code.line(format!("// New{} returns a new {}.", self.name, self.name));
        code.line(format!(
            "func New{}{}({params}) {returns} {{",
            self.name,
            self.params()
        ));
        code.indented_line(body);
        code.line("}");
    }

    fn unit_struct(&self, code: &mut Code) {
        code.lines(self.docs.iter().cloned());
        code.line(format!("type {}{} struct{{}}", self.name, self.params()));
        let ty = self.ty();
        self.constructor(code, "", &ty, &format!("return {ty}{{}}"));
    }

    fn new_type(&self, code: &mut Code, inner: &TypeExpr, transparent: bool) {
        let inner = self.emitter.translate(inner).src;
        let ty = self.ty();
        code.lines(self.docs.iter().cloned());
        if transparent {
            code.line(format!("type {}{} = {inner}", self.name, self.params()));
            self.constructor(code, &format!("inner {inner}"), &ty, "return inner");
        } else {
            code.line(format!("type {}{} struct {{", self.name, self.params()));
            code.indented_line(format!("A {inner}"));
            code.line("}");
            self.constructor(
                code,
                &format!("inner {inner}"),
                &ty,
                &format!("return {ty}{{A: inner}}"),
            );
        }
    }

    fn tuple_struct(&self, code: &mut Code, items: &[TypeExpr]) {
        let items = self.positional(items);
        code.lines(self.docs.iter().cloned());
        code.line(format!("type {}{} struct {{", self.name, self.params()));
        code.indented()
            .lines(items.iter().map(|(id, ty)| format!("{} {ty}", id.to_ascii_uppercase())));
        code.line("}");

        let params: Vec<String> = items.iter().map(|(id, ty)| format!("{id} {ty}")).collect();
        let ty = self.ty();
        self.constructor(
            code,
            &params.join(", "),
            &ty,
            &format!("return {ty}{{{}}}", positional_literal(&items)),
        );
    }

    /// `(a, int32)`, `(b, string)`, ... for positional items.
    fn positional(&self, items: &[TypeExpr]) -> Vec<(String, String)> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| (positional_name(idx), self.emitter.translate(item).src))
            .collect()
    }

    fn struct_type(&self, code: &mut Code, fields: &[Field]) {
        code.lines(self.docs.iter().cloned());
        self.struct_body(code, &format!("{}{}", self.name, self.params()), fields);
        let ty = self.ty();
        self.constructor(code, &format!("inner {ty}"), &ty, "return inner");
    }

    /// `type <head> struct { ... }` with tagged fields, flattened fields embedded.
    fn struct_body(&self, code: &mut Code, head: &str, fields: &[Field]) {
        let (plain, flattened) = split_flattened(fields);
        code.line(format!("type {head} struct {{"));
        let body = code.indented();
        for field in plain {
            let info = self.emitter.field(field);
            let ty = info
                .type_override
                .map_or_else(|| info.ty.src.clone(), str::to_string);
            body.lines(self.emitter.docs(&field.attrs));
            body.line(format!(
                "{} {ty} {}",
                self.emitter.ident(&field.id),
                json_tag(info.wire_name, info.optional)
            ));
        }
        for field in flattened {
            let (src, optional) = self.emitter.flattened(field);
            let note = format!("Flattened from `.{}`.", field.id);
            body.lines(self.emitter.docs_with_extra(&field.attrs, &note));
            if matches!(strip_option(&field.format), TypeExpr::TypeName(_)) {
                let pointer = if optional { "*" } else { "" };
                body.line(format!("{pointer}{src}"));
            } else {
                // encoding/json only inlines embedded structs
                body.line(format!(
                    "{} {} `json:\"-\"`",
                    self.emitter.ident(&field.id),
                    if optional {
                        self.emitter.target().optional(&src)
                    } else {
                        src
                    }
                ));
            }
        }
        code.line("}");
    }

    fn sealed_interface(&self, code: &mut Code, variants: &[Variant]) {
        let marker = format!("is{}", self.name);
        code.lines(self.docs.iter().cloned());
        code.line(format!("type {}{} interface {{", self.name, self.params()));
        code.indented_line(format!("{marker}()"));
        code.line("}");

        let mut callbacks = Code::group();
        let mut cases = Code::group();
        let mut binds_value = false;
        for variant in variants {
            binds_value |= self.variant(variant, &marker, code, &mut callbacks, &mut cases);
        }

        let fns = format!("{}Fns", self.name);
        let mut fn_params = self.generics.clone();
        fn_params.push("R".to_string());
        let fn_args = brackets(&fn_params);
        let fn_params: Vec<String> = fn_params.iter().map(|g| format!("{g} any")).collect();
        let fn_params = brackets(&fn_params);

        code.line("");
        code.line(format!(
            "// {fns} holds one callback per variant of {}.",
            self.name
        ));
        code.line(format!("type {fns}{fn_params} struct {{"));
        code.indented().push_block(callbacks);
        code.line("}");

        code.line("");
        code.line(format!(
            "// Match{} calls the callback in to that matches the variant held by input.",
            self.name
        ));
        code.line(format!(
            "func Match{}{fn_params}(input {}, to {fns}{fn_args}) R {{",
            self.name,
            self.ty()
        ));
        let body = code.indented();
        if !variants.is_empty() {
            let binding = if binds_value { "v := " } else { "" };
            body.line(format!("switch {binding}input.(type) {{"));
            body.push_block(cases);
            body.line("}");
        }
        body.line(format!(
            "panic({})",
            string_literal(&format!("Unknown object when expected {}", self.name))
        ));
        code.line("}");
    }

    /// Emit a variant's struct, marker method and constructor, and append its
    /// callback and `case` arm. Returns whether the arm reads the switch value.
    fn variant(
        &self,
        variant: &Variant,
        marker: &str,
        code: &mut Code,
        callbacks: &mut Code,
        cases: &mut Code,
    ) -> bool {
        let field = self.emitter.ident(&variant.id);
        let v_name = format!("{}{field}", self.name);
        let v_ty = format!("{v_name}{}", self.args());
        let v_head = format!("{v_name}{}", self.params());
        let tag = json_tag(wire_name(&variant.id, &variant.attrs), false);
        let docs = self.emitter.docs(&variant.attrs);

        code.line("");
        code.lines(docs.iter().cloned());
        let (params, value, callback) = match &variant.variant_format {
            VariantShape::Unit => {
                code.line(format!("type {v_head} struct{{}}"));
                (String::new(), String::new(), format!("{field} func() R"))
            }
            VariantShape::NewType(inner) => {
                let inner = self.emitter.translate(inner).src;
                code.line(format!("type {v_head} struct {{"));
                code.indented_line(format!("{field} {inner} {tag}"));
                code.line("}");
                (
                    format!("value {inner}"),
                    format!("{field}: value"),
                    format!("{field} func(inner {inner}) R"),
                )
            }
            VariantShape::Tuple(items) => {
                let items = self.positional(items);
                let types: Vec<String> = items.iter().map(|(_, ty)| ty.clone()).collect();
                let tuple = self.emitter.target().tuple(&types);
                code.line(format!("type {v_head} struct {{"));
                code.indented_line(format!("{field} {tuple} {tag}"));
                code.line("}");
                let params: Vec<String> =
                    items.iter().map(|(id, ty)| format!("{id} {ty}")).collect();
                (
                    params.join(", "),
                    format!("{field}: {tuple}{{{}}}", positional_literal(&items)),
                    format!("{field} func(inner {tuple}) R"),
                )
            }
            VariantShape::Struct { fields } => {
                let inner_name = format!("{v_name}Fields");
                let inner_ty = format!("{inner_name}{}", self.args());
                self.struct_body(code, &format!("{inner_name}{}", self.params()), fields);
                code.line("");
                code.lines(docs.iter().cloned());
                code.line(format!("type {v_head} struct {{"));
                code.indented_line(format!("{field} {inner_ty} {tag}"));
                code.line("}");
                (
                    format!("value {inner_ty}"),
                    format!("{field}: value"),
                    format!("{field} func(inner {inner_ty}) R"),
                )
            }
        };

        code.line("");
        code.line(format!("func ({v_ty}) {marker}() {{}}"));
        code.line("");
        code.line(format!(
            "// New{v_name} constructs the {} variant of {}.",
            variant.id, self.name
        ));
        code.line(format!(
            "func New{v_name}{}({params}) {} {{",
            self.params(),
            self.ty()
        ));
        code.indented_line(format!("return {v_ty}{{{value}}}"));
        code.line("}");

        callbacks.lines(docs).line(callback);
        cases.line(format!("case {v_ty}:"));
        let binds_value = !matches!(variant.variant_format, VariantShape::Unit);
        if binds_value {
            cases.indented_line(format!("return to.{field}(v.{field})"));
        } else {
            cases.indented_line(format!("return to.{field}()"));
        }
        binds_value
    }
}

/// `A: a, B: b` for a positional struct literal.
fn positional_literal(items: &[(String, String)]) -> String {
    items
        .iter()
        .map(|(id, _)| format!("{}: {id}", id.to_ascii_uppercase()))
        .collect::<Vec<_>>()
        .join(", ")
}
