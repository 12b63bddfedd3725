use shapegen_common::Scalar;
use std::collections::BTreeSet;

use super::{FileLayout, Syntax, Target};
use crate::docs::DocStyle;
use crate::ident::{positional_name, sanitize};

/// Go structs and interfaces, one file per declaration.
///
/// 128-bit integers have no native width and fall back to `big.Int`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Go;

impl Target for Go {
    fn name(&self) -> &'static str {
        "go"
    }

    fn description(&self) -> &'static str {
        "Go structs, New* constructors and type-switch matchers, one file per declaration"
    }

    fn syntax(&self) -> Syntax {
        Syntax::Go
    }

    /// Exported Go identifier in PascalCase. `$` and `_` separate words, and
    /// names that would not start with a letter get an `X` prefix.
    fn ident(&self, raw: &str) -> String {
        let name: String = sanitize(raw)
            .split(['$', '_'])
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_uppercase().to_string() + chars.as_str()
                })
            })
            .collect();
        if name.starts_with(|c: char| c.is_ascii_alphabetic()) {
            name
        } else {
            format!("X{name}")
        }
    }

    fn scalar(&self, scalar: Scalar) -> String {
        match scalar {
            Scalar::Unit => "struct{}",
            Scalar::Bool => "bool",
            Scalar::I8 => "int8",
            Scalar::I16 => "int16",
            Scalar::I32 => "int32",
            Scalar::I64 => "int64",
            Scalar::I128 | Scalar::U128 => "big.Int",
            Scalar::Isize => "int",
            Scalar::U8 => "uint8",
            Scalar::U16 => "uint16",
            Scalar::U32 => "uint32",
            Scalar::U64 => "uint64",
            Scalar::Usize => "uint",
            Scalar::F32 => "float32",
            Scalar::F64 => "float64",
            Scalar::Char => "rune",
            Scalar::Str => "string",
            Scalar::Bytes => "[]byte",
        }
        .to_string()
    }

    fn optional(&self, inner: &str) -> String {
        format!("*{inner}")
    }

    fn seq(&self, item: &str) -> String {
        format!("[]{item}")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("map[{key}]{value}")
    }

    /// Anonymous struct with positional fields `A`, `B`, ...
    fn tuple(&self, items: &[String]) -> String {
        if items.is_empty() {
            return "struct{}".to_string();
        }
        let fields: Vec<String> = items
            .iter()
            .enumerate()
            .map(|(idx, item)| format!("{} {item}", positional_field(idx)))
            .collect();
        format!("struct {{ {} }}", fields.join("; "))
    }

    fn fixed_array(&self, item: &str, size: usize) -> String {
        format!("[{size}]{item}")
    }

    fn generic(&self, name: &str, args: &[String]) -> String {
        if args.is_empty() {
            name.to_string()
        } else {
            format!("{name}[{}]", args.join(", "))
        }
    }

    fn never(&self) -> String {
        format!("{} any", self.inline_comment("never"))
    }

    fn unknown(&self) -> &'static str {
        "any"
    }

    fn doc_style(&self) -> DocStyle {
        DocStyle::LINE
    }

    fn indent_unit(&self) -> &'static str {
        "\t"
    }

    fn type_override_attr(&self) -> &'static str {
        "go_as"
    }

    fn layout(&self) -> FileLayout {
        FileLayout::PerDeclaration {
            default_package: "generated",
            extension: "go",
        }
    }

    fn scalar_import(&self, scalar: Scalar) -> Option<&'static str> {
        matches!(scalar, Scalar::I128 | Scalar::U128).then_some("math/big")
    }

    fn file_prelude(&self, package: &str, imports: &BTreeSet<&'static str>) -> Vec<String> {
        let mut lines = vec![
            "// Code generated by shapegen. DO NOT EDIT.".to_string(),
            String::new(),
            format!("package {package}"),
        ];
        match imports.len() {
            0 => {}
            1 => {
                lines.push(String::new());
                lines.extend(imports.iter().map(|path| format!("import \"{path}\"")));
            }
            _ => {
                lines.push(String::new());
                lines.push("import (".to_string());
                lines.extend(imports.iter().map(|path| format!("\t\"{path}\"")));
                lines.push(")".to_string());
            }
        }
        lines.push(String::new());
        lines
    }
}

/// Exported field name for the `idx`th element of a tuple: `A`, `B`, ...
pub(crate) fn positional_field(idx: usize) -> String {
    positional_name(idx).to_ascii_uppercase()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_exported_idents() {
        let go = Go;
        assert_eq!(go.ident("Point"), "Point");
        assert_eq!(go.ident("display_name"), "DisplayName");
        assert_eq!(go.ident("2Foo-Bar!"), "X2FooBar");
        assert_eq!(go.ident("_private"), "Private");
        assert_eq!(go.ident("__"), "X");
    }

    #[test]
    fn test_type_table() {
        let go = Go;
        assert_eq!(go.scalar(Scalar::U128), "big.Int");
        assert_eq!(go.optional("int32"), "*int32");
        assert_eq!(go.seq("string"), "[]string");
        assert_eq!(go.map("string", "float64"), "map[string]float64");
        assert_eq!(go.fixed_array("uint8", 4), "[4]uint8");
        assert_eq!(
            go.tuple(&["int32".to_string(), "string".to_string()]),
            "struct { A int32; B string }"
        );
        assert_eq!(go.tuple(&[]), "struct{}");
        assert_eq!(go.generic("Page", &["User".to_string()]), "Page[User]");
        assert_eq!(go.never(), "/* never */ any");
    }

    #[test]
    fn test_positional_fields() {
        assert_eq!(positional_field(0), "A");
        assert_eq!(positional_field(25), "Z");
        assert_eq!(positional_field(26), "A1");
    }

    #[test]
    fn test_prelude_imports() {
        let go = Go;
        let plain = go.file_prelude("models", &BTreeSet::new());
        assert_eq!(plain[2], "package models");
        assert!(!plain.iter().any(|l| l.starts_with("import")));

        let big = go.file_prelude("models", &BTreeSet::from(["math/big"]));
        assert!(big.iter().any(|l| l == "import \"math/big\""));

        let both = go.file_prelude("models", &BTreeSet::from(["time", "math/big"]));
        assert_eq!(&both[4..], ["import (", "\t\"math/big\"", "\t\"time\"", ")", ""]);
    }

    #[test]
    fn test_only_wide_integers_need_big() {
        let go = Go;
        assert_eq!(go.scalar_import(Scalar::I128), Some("math/big"));
        assert_eq!(go.scalar_import(Scalar::U128), Some("math/big"));
        assert_eq!(go.scalar_import(Scalar::U64), None);
    }
}
