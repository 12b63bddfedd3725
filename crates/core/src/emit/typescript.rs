//! TypeScript declaration layout.
//!
//! Each declaration becomes a type alias plus a same-named constructor
//! function. Enums additionally get a namespace holding one type and one
//! constructor per variant, and `apply`/`match` helpers that dispatch on the
//! variant with one explicit test each.

use shapegen_common::{ContainerShape, Declaration, Field, TypeExpr, Variant, VariantShape};

use super::{Emitter, FieldInfo, generic_names, split_flattened, wire_name};
use crate::code::Code;
use crate::ident::{positional_name, property_key, string_literal};

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
        ContainerShape::Struct { fields } if decl.attrs.has_codegen_flag("ts_interface_merge") => {
            ctx.interface(&mut code, fields);
        }
        ContainerShape::Struct { fields } => ctx.struct_alias(&mut code, fields),
        ContainerShape::Enum { variants, .. } => ctx.union(&mut code, variants),
    }
    code
}

/// `<A, B>`, or nothing for an empty list.
fn angle<S: AsRef<str>>(items: &[S]) -> String {
    if items.is_empty() {
        String::new()
    } else {
        let items: Vec<&str> = items.iter().map(AsRef::as_ref).collect();
        format!("<{}>", items.join(", "))
    }
}

struct Decl<'e, 'a> {
    emitter: &'e Emitter<'a>,
    name: String,
    generics: Vec<String>,
    docs: Vec<String>,
}

impl Decl<'_, '_> {
    /// Generic parameter list, also used for applying them: `<T, U>`.
    fn params(&self) -> String {
        angle(&self.generics)
    }

    /// The declared type applied to its own parameters.
    fn ty(&self) -> String {
        format!("{}{}", self.name, self.params())
    }

    /// Generic parameters followed by `extra`.
    fn params_with(&self, extra: &str) -> String {
        let mut items = self.generics.clone();
        items.push(extra.to_string());
        angle(&items)
    }

    fn constructor(&self, code: &mut Code, params: &str, body: &str) {
        code.lines(self.docs.iter().cloned());
        code.line(format!(
            "export function {}{}({params}): {} {{",
            self.name,
            self.params(),
            self.ty()
        ));
        code.indented_line(body);
        code.line("}");
    }

    fn unit_struct(&self, code: &mut Code) {
        code.lines(self.docs.iter().cloned());
        code.line(format!("export type {} = {{}};", self.ty()));
        self.constructor(code, "", "return {};");
    }

    fn new_type(&self, code: &mut Code, inner: &TypeExpr, transparent: bool) {
        let inner = self.emitter.translate(inner);
        let optional = if inner.optional { "?" } else { "" };
        code.lines(self.docs.iter().cloned());
        if transparent {
            code.line(format!("export type {} = {};", self.ty(), inner.src));
            self.constructor(code, &format!("inner{optional}: {}", inner.src), "return inner;");
        } else {
            code.line(format!("export type {} = [{}];", self.ty(), inner.src));
            self.constructor(code, &format!("inner{optional}: {}", inner.src), "return [inner];");
        }
    }

    fn tuple_struct(&self, code: &mut Code, items: &[TypeExpr]) {
        let items = self.positional(items);
        let types: Vec<&str> = items.iter().map(|(_, ty)| ty.as_str()).collect();
        let params: Vec<String> = items.iter().map(|(id, ty)| format!("{id}: {ty}")).collect();
        let names: Vec<&str> = items.iter().map(|(id, _)| id.as_str()).collect();

        code.lines(self.docs.iter().cloned());
        code.line(format!("export type {} = [{}];", self.ty(), types.join(", ")));
        self.constructor(
            code,
            &params.join(", "),
            &format!("return [{}];", names.join(", ")),
        );
    }

    /// `(a, number)`, `(b, string)`, ... for positional items.
    fn positional(&self, items: &[TypeExpr]) -> Vec<(String, String)> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| (positional_name(idx), self.emitter.translate(item).src))
            .collect()
    }

    fn struct_alias(&self, code: &mut Code, fields: &[Field]) {
        code.lines(self.docs.iter().cloned());
        code.line(format!("export type {} = {{", self.ty()));
        self.fields(code, fields, "};");
        let ty = self.ty();
        self.constructor(code, &format!("inner: {ty}"), "return inner;");
    }

    /// Struct merged into an interface: flattened fields become `extends`
    /// clauses and no constructor is emitted.
    fn interface(&self, code: &mut Code, fields: &[Field]) {
        let (plain, flattened) = split_flattened(fields);
        let extends: Vec<String> = flattened
            .iter()
            .map(|field| match self.emitter.flattened(field) {
                (src, true) => format!("Partial<{src}>"),
                (src, false) => src,
            })
            .collect();
        let extends = if extends.is_empty() {
            String::new()
        } else {
            format!(" extends {}", extends.join(", "))
        };

        code.lines(self.docs.iter().cloned());
        code.line(format!("export interface {}{extends} {{", self.ty()));
        let body = code.indented();
        for field in plain {
            self.field_lines(body, &self.emitter.field(field));
        }
        code.line("}");
    }

    /// Field block after an opening `{` line, closed with `close`.
    ///
    /// Flattened fields never merge into the block; each one becomes an
    /// intersection member after it.
    fn fields(&self, code: &mut Code, fields: &[Field], close: &str) {
        let (plain, flattened) = split_flattened(fields);
        let body = code.indented();
        for field in plain {
            self.field_lines(body, &self.emitter.field(field));
        }

        if flattened.is_empty() {
            code.line(close);
            return;
        }
        code.line("} // flattened fields:");
        for field in flattened {
            code.lines(
                self.emitter
                    .docs_with_extra(&field.attrs, &format!("Flattened from `.{}`.", field.id)),
            );
            match self.emitter.flattened(field) {
                (src, true) => code.line(format!("& Partial<{src}>")),
                (src, false) => code.line(format!("& {src}")),
            };
        }
        code.append_to_last_line(";");
    }

    fn field_lines(&self, body: &mut Code, info: &FieldInfo<'_>) {
        let target = self.emitter.target();
        let marker = if info.optional { "?" } else { "" };
        let ty = match info.type_override {
            Some(ty) => ty.to_string(),
            None if info.optional && !info.ty.optional => target.optional(&info.ty.src),
            None => info.ty.src.clone(),
        };
        body.lines(self.emitter.docs(&info.field.attrs));
        body.line(format!("{}{marker}: {ty};", property_key(info.wire_name)));
    }

    fn union(&self, code: &mut Code, variants: &[Variant]) {
        let mut ns = Code::new();
        let mut callbacks = Code::group();
        let mut tests = Code::group();
        let mut members = Vec::new();
        let mut local = Vec::new();

        for variant in variants {
            let v_ident = self.emitter.ident(&variant.id);
            members.push(format!("| {}.{v_ident}{}", self.name, self.params()));
            local.push(format!("{v_ident}{}", self.params()));
            self.variant(variant, &v_ident, &mut ns, &mut callbacks, &mut tests);
        }

        // Inside the namespace a variant may shadow the enum's own name.
        let input_ty = if local.is_empty() {
            "never".to_string()
        } else {
            local.join(" | ")
        };

        ns.line(format!("export type ApplyFns{} = {{", self.params_with("R = void")));
        ns.indented().line("// callbacks").push_block(callbacks);
        ns.line("};");
        self.apply_fn(&mut ns, &input_ty, tests);
        self.match_fn(&mut ns, &input_ty);

        code.lines(self.docs.iter().cloned());
        code.line("// eslint-disable-next-line @typescript-eslint/no-namespace");
        code.line(format!("export namespace {} {{", self.name));
        code.push_block(ns);
        code.line("}");
        code.lines(self.docs.iter().cloned());
        if members.is_empty() {
            code.line(format!("export type {} = never;", self.ty()));
        } else {
            if let Some(last) = members.last_mut() {
                last.push(';');
            }
            code.line(format!("export type {} =", self.ty()));
            code.indented().lines(members);
        }
    }

    fn apply_fn(&self, ns: &mut Code, input_ty: &str, tests: Code) {
        let r = self.params_with("R");
        ns.line(format!("/** Match helper for {{@link {}}} */", self.name));
        ns.line(format!("export function apply{r}("));
        ns.indented_line(format!("to: ApplyFns{r},"));
        ns.line(format!("): (input: {input_ty}) => R {{"));
        let body = ns.indented();
        body.line("return function _match(input): R {");
        let inner = body.indented();
        inner.push_block(tests);
        inner.line("const _exhaust: never = input;");
        inner.line(format!(
            "throw new TypeError({});",
            string_literal(&format!("Unknown object when expected {}", self.name))
        ));
        body.line("};");
        ns.line("}");
    }

    fn match_fn(&self, ns: &mut Code, input_ty: &str) {
        let r = self.params_with("R");
        ns.line(format!("/** Match helper for {{@link {}}} */", self.name));
        ns.line(format!("export function match{r}("));
        ns.indented()
            .line(format!("input: {input_ty},"))
            .line(format!("to: ApplyFns{r},"));
        ns.line("): R {");
        ns.indented_line("return apply(to)(input);");
        ns.line("}");
    }

    /// Emit a variant's type and constructor into `ns`, and its callback
    /// signature and dispatch test into the matcher tables.
    fn variant(
        &self,
        variant: &Variant,
        v_ident: &str,
        ns: &mut Code,
        callbacks: &mut Code,
        tests: &mut Code,
    ) {
        let params = self.params();
        let v_ty = format!("{v_ident}{params}");
        let wire = wire_name(&variant.id, &variant.attrs);
        let key = property_key(wire);
        let key_str = string_literal(wire);
        let docs = self.emitter.docs(&variant.attrs);
        let has_key = format!("typeof input === \"object\" && input !== null && {key_str} in input");

        match &variant.variant_format {
            VariantShape::Unit => {
                ns.lines(docs.iter().cloned());
                ns.line(format!("export type {v_ty} = {key_str};"));
                ns.lines(docs.iter().cloned());
                ns.line(format!("export function {v_ident}{params}(): {v_ty} {{"));
                ns.indented_line(format!("return {key_str};"));
                ns.line("}");
                callbacks.lines(docs).line(format!("{v_ident}(): R;"));
                tests.line(format!(
                    "if (input === {key_str}) return to.{v_ident}();"
                ));
            }
            VariantShape::NewType(inner) => {
                let inner = self.emitter.translate(inner);
                let optional = if inner.optional { "?" } else { "" };
                ns.lines(docs.iter().cloned());
                ns.line(format!("export type {v_ty} = {{"));
                ns.indented()
                    .lines(docs.iter().cloned())
                    .line(format!("{key}: {};", inner.src));
                ns.line("};");
                ns.lines(docs.iter().cloned());
                ns.line(format!(
                    "export function {v_ident}{params}(value{optional}: {}): {v_ty} {{",
                    inner.src
                ));
                ns.indented_line(format!("return {{ {key}: value }};"));
                ns.line("}");
                callbacks
                    .lines(docs)
                    .line(format!("{v_ident}(inner: {v_ty}[{key_str}]): R;"));
                tests.line(format!(
                    "if ({has_key}) return to.{v_ident}(input[{key_str}]);"
                ));
            }
            VariantShape::Tuple(items) => {
                let items = self.positional(items);
                let types: Vec<String> = items.iter().map(|(_, ty)| ty.clone()).collect();
                let tuple = self.emitter.target().tuple(&types);
                let args: Vec<String> =
                    items.iter().map(|(id, ty)| format!("{id}: {ty}")).collect();
                let names: Vec<&str> = items.iter().map(|(id, _)| id.as_str()).collect();

                ns.lines(docs.iter().cloned());
                ns.line(format!("export type {v_ty} = {{ {key}: {tuple} }};"));
                ns.lines(docs.iter().cloned());
                ns.line(format!(
                    "export function {v_ident}{params}({}): {v_ty} {{",
                    args.join(", ")
                ));
                ns.indented_line(format!("return {{ {key}: [{}] }};", names.join(", ")));
                ns.line("}");
                callbacks
                    .lines(docs)
                    .line(format!("{v_ident}(inner: {tuple}): R;"));
                tests.line(format!(
                    "if ({has_key}) return to.{v_ident}(input[{key_str}]);"
                ));
            }
            VariantShape::Struct { fields } => {
                ns.lines(docs.iter().cloned());
                ns.line(format!("export type {v_ty} = {{"));
                let body = ns.scope();
                body.lines(docs.iter().cloned());
                body.line(format!("{key}: {{"));
                self.fields(body, fields, "};");
                ns.line("};");
                ns.lines(docs.iter().cloned());
                ns.line(format!(
                    "export function {v_ident}{params}(value: {v_ty}[{key_str}]): {v_ty} {{"
                ));
                ns.indented_line(format!("return {{ {key}: value }};"));
                ns.line("}");
                callbacks
                    .lines(docs)
                    .line(format!("{v_ident}(inner: {v_ty}[{key_str}]): R;"));
                tests.line(format!(
                    "if ({has_key}) return to.{v_ident}(input[{key_str}]);"
                ));
            }
        }
    }
}
