use shapegen_common::Scalar;
use std::collections::BTreeSet;

use super::{FileLayout, Syntax, Target};
use crate::docs::DocStyle;

/// TypeScript declarations in a single module.
///
/// All numeric widths map to `number`, matching how JSON numbers are parsed.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScript;

impl Target for TypeScript {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn description(&self) -> &'static str {
        "TypeScript types, constructors and union matchers in one module"
    }

    fn syntax(&self) -> Syntax {
        Syntax::TypeScript
    }

    fn scalar(&self, scalar: Scalar) -> String {
        match scalar {
            Scalar::I8
            | Scalar::I16
            | Scalar::I32
            | Scalar::I64
            | Scalar::I128
            | Scalar::Isize
            | Scalar::U8
            | Scalar::U16
            | Scalar::U32
            | Scalar::U64
            | Scalar::U128
            | Scalar::Usize
            | Scalar::F32
            | Scalar::F64 => "number".to_string(),
            Scalar::Bool => "boolean".to_string(),
            Scalar::Str => "string".to_string(),
            Scalar::Char => format!("{} string", self.inline_comment("char")),
            Scalar::Bytes => format!("{} Array<number>", self.inline_comment("bytes")),
            Scalar::Unit => format!("{} null", self.inline_comment("unit")),
        }
    }

    fn optional(&self, inner: &str) -> String {
        format!("{inner} | undefined | null")
    }

    fn seq(&self, item: &str) -> String {
        format!("Array<{item}>")
    }

    fn map(&self, key: &str, value: &str) -> String {
        format!("Record<{key}, {value}>")
    }

    fn tuple(&self, items: &[String]) -> String {
        format!("[{}]", items.join(", "))
    }

    fn fixed_array(&self, item: &str, size: usize) -> String {
        format!("[{}]", vec![item; size].join(", "))
    }

    fn generic(&self, name: &str, args: &[String]) -> String {
        if args.is_empty() {
            name.to_string()
        } else {
            format!("{name}<{}>", args.join(", "))
        }
    }

    fn never(&self) -> String {
        "never".to_string()
    }

    fn unknown(&self) -> &'static str {
        "unknown"
    }

    fn doc_style(&self) -> DocStyle {
        DocStyle::JSDOC
    }

    fn indent_unit(&self) -> &'static str {
        "  "
    }

    fn type_override_attr(&self) -> &'static str {
        "ts_as"
    }

    fn layout(&self) -> FileLayout {
        FileLayout::Single {
            default_name: "types.ts",
        }
    }

    fn file_prelude(&self, _package: &str, _imports: &BTreeSet<&'static str>) -> Vec<String> {
        Vec::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_scalars() {
        let ts = TypeScript;
        assert_eq!(ts.scalar(Scalar::U128), "number");
        assert_eq!(ts.scalar(Scalar::Bool), "boolean");
        assert_eq!(ts.scalar(Scalar::Char), "/* char */ string");
        assert_eq!(ts.scalar(Scalar::Unit), "/* unit */ null");
    }

    #[test]
    fn test_composites() {
        let ts = TypeScript;
        assert_eq!(ts.fixed_array("number", 3), "[number, number, number]");
        assert_eq!(ts.fixed_array("number", 0), "[]");
        assert_eq!(ts.generic("Page", &["User".to_string()]), "Page<User>");
        assert_eq!(ts.generic("Page", &[]), "Page");
        assert_eq!(ts.map("string", "number"), "Record<string, number>");
    }
}
