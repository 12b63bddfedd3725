//! Per-language tables the generator renders through.
//!
//! A [`Target`] answers every question that depends on the output language:
//! how scalars and collections are spelled, what comments look like, how deep
//! one indentation level is and how declarations are split into files. The
//! translator and emitters never spell a type themselves.

mod go;
mod typescript;

pub use go::Go;
pub use typescript::TypeScript;

use shapegen_common::Scalar;
use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::docs::DocStyle;
use crate::error::Error;
use crate::ident::sanitize;

/// Declaration layout family a target renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Type aliases, constructor functions and a matcher namespace per union.
    TypeScript,
    /// Structs, `New*` constructors and an interface plus type switch per union.
    Go,
}

/// How generated declarations are partitioned into files.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLayout {
    /// Everything in one file.
    Single { default_name: &'static str },
    /// One file per declaration, grouped into package directories.
    PerDeclaration {
        default_package: &'static str,
        extension: &'static str,
    },
}

pub trait Target: Debug + Send + Sync {
    /// Name used to select the target on the command line.
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn syntax(&self) -> Syntax;

    /// Identifier for a declaration or variant name.
    fn ident(&self, raw: &str) -> String {
        sanitize(raw)
    }

    fn scalar(&self, scalar: Scalar) -> String;

    /// Wrap a non-optional type so it also admits absence.
    fn optional(&self, inner: &str) -> String;

    fn seq(&self, item: &str) -> String;

    fn map(&self, key: &str, value: &str) -> String;

    fn tuple(&self, items: &[String]) -> String;

    fn fixed_array(&self, item: &str, size: usize) -> String;

    /// A named type applied to generic arguments; `args` may be empty.
    fn generic(&self, name: &str, args: &[String]) -> String;

    /// Bottom type, or the closest placeholder the language has.
    fn never(&self) -> String;

    /// Placeholder for a type the schema could not describe.
    fn unknown(&self) -> &'static str;

    /// An inline comment that is safe to embed inside a type expression.
    fn inline_comment(&self, text: &str) -> String {
        format!("/* {} */", text.replace("*/", "* /"))
    }

    fn doc_style(&self) -> DocStyle;

    /// One level of indentation.
    fn indent_unit(&self) -> &'static str;

    /// Codegen attribute that replaces a field's rendered type verbatim.
    fn type_override_attr(&self) -> &'static str;

    fn layout(&self) -> FileLayout;

    /// Package a scalar's rendered type needs imported, if any.
    fn scalar_import(&self, _scalar: Scalar) -> Option<&'static str> {
        None
    }

    /// Lines placed before the declarations of a file that uses `imports`.
    fn file_prelude(&self, package: &str, imports: &BTreeSet<&'static str>) -> Vec<String>;
}

static TYPESCRIPT: TypeScript = TypeScript;
static GO: Go = Go;

/// All targets shipped with the generator.
pub fn builtin_targets() -> [&'static dyn Target; 2] {
    [&TYPESCRIPT, &GO]
}

/// Find a builtin target by name, case-insensitively.
pub fn lookup(name: &str) -> Result<&'static dyn Target, Error> {
    builtin_targets()
        .into_iter()
        .find(|target| target.name().eq_ignore_ascii_case(name))
        .ok_or_else(|| Error::UnknownTarget(name.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_builtin_targets() {
        assert_eq!(lookup("typescript").unwrap().name(), "typescript");
        assert_eq!(lookup("Go").unwrap().name(), "go");
    }

    #[test]
    fn test_lookup_unknown_target() {
        let err = lookup("cobol").unwrap_err();
        assert!(matches!(err, Error::UnknownTarget(ref name) if name == "cobol"));
    }

    #[test]
    fn test_target_names_are_unique() {
        let targets = builtin_targets();
        for (i, a) in targets.iter().enumerate() {
            for b in &targets[i + 1..] {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_inline_comment_cannot_close_early() {
        let target = lookup("typescript").unwrap();
        assert_eq!(target.inline_comment("a */ b"), "/* a * / b */");
    }
}
