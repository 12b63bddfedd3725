//! Type expression translation.
//!
//! [`translate`] is a pure fold over [`TypeExpr`]: the same node always
//! renders the same way for a given target, independent of where it appears.

use shapegen_common::{Scalar, TypeExpr};

use crate::target::Target;

/// A rendered type plus whether it already admits absence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    pub src: String,
    pub optional: bool,
}

impl Translated {
    fn plain(src: String) -> Self {
        Self {
            src,
            optional: false,
        }
    }
}

pub fn translate(expr: &TypeExpr, target: &dyn Target) -> Translated {
    let src = |expr: &TypeExpr| translate(expr, target).src;

    match expr {
        TypeExpr::Incomplete { debug } => Translated::plain(format!(
            "{} {}",
            target.inline_comment(&format!("Incomplete: {debug}")),
            target.unknown()
        )),
        TypeExpr::TypeName(name) => {
            let args: Vec<String> = name.generics.iter().map(src).collect();
            Translated::plain(target.generic(&target.ident(&name.ident), &args))
        }
        TypeExpr::Option(inner) => {
            let inner = translate(inner, target);
            if inner.optional {
                inner
            } else {
                Translated {
                    src: target.optional(&inner.src),
                    optional: true,
                }
            }
        }
        TypeExpr::Never => Translated::plain(target.never()),
        TypeExpr::Seq(item) => Translated::plain(target.seq(&src(item.as_ref()))),
        TypeExpr::Map { key, value } => {
            Translated::plain(target.map(&src(key.as_ref()), &src(value.as_ref())))
        }
        TypeExpr::Tuple(items) => {
            let items: Vec<String> = items.iter().map(src).collect();
            Translated::plain(target.tuple(&items))
        }
        TypeExpr::FixedArray { content, size } => {
            Translated::plain(target.fixed_array(&src(content.as_ref()), *size))
        }
        leaf => Translated::plain(
            leaf.scalar()
                .map_or_else(|| target.unknown().to_string(), |scalar| target.scalar(scalar)),
        ),
    }
}

/// `T` for `Option<T>` (through any number of nested options), else the
/// expression itself.
pub fn strip_option(expr: &TypeExpr) -> &TypeExpr {
    match expr {
        TypeExpr::Option(inner) => strip_option(inner),
        other => other,
    }
}

/// Call `visit` on `expr` and every node below it, outermost first.
pub fn walk<'a>(expr: &'a TypeExpr, visit: &mut impl FnMut(&'a TypeExpr)) {
    visit(expr);
    match expr {
        TypeExpr::TypeName(name) => {
            for arg in &name.generics {
                walk(arg, visit);
            }
        }
        TypeExpr::Option(inner) | TypeExpr::Seq(inner) => walk(inner, visit),
        TypeExpr::FixedArray { content, .. } => walk(content, visit),
        TypeExpr::Map { key, value } => {
            walk(key, visit);
            walk(value, visit);
        }
        TypeExpr::Tuple(items) => {
            for item in items {
                walk(item, visit);
            }
        }
        _ => {}
    }
}

/// Diagnostics of every `Incomplete` node inside `expr`, outermost first.
pub fn incomplete_diagnostics(expr: &TypeExpr) -> Vec<&str> {
    let mut found = Vec::new();
    walk(expr, &mut |node| {
        if let TypeExpr::Incomplete { debug } = node {
            found.push(debug.as_str());
        }
    });
    found
}

/// Scalar leaves inside `expr`, in walk order.
pub fn scalars(expr: &TypeExpr) -> Vec<Scalar> {
    let mut found = Vec::new();
    walk(expr, &mut |node| found.extend(node.scalar()));
    found
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::target::{Go, TypeScript};
    use shapegen_common::TypeName;

    fn ts(expr: &TypeExpr) -> Translated {
        translate(expr, &TypeScript)
    }

    #[test]
    fn test_option_wraps_once() {
        let opt = TypeExpr::option(TypeExpr::I32);
        assert_eq!(
            ts(&opt),
            Translated {
                src: "number | undefined | null".to_string(),
                optional: true
            }
        );

        let double = TypeExpr::option(opt.clone());
        assert_eq!(ts(&double), ts(&opt));
        assert_eq!(translate(&double, &Go).src, "*int32");
    }

    #[test]
    fn test_collections() {
        let expr = TypeExpr::Map {
            key: Box::new(TypeExpr::Str),
            value: Box::new(TypeExpr::seq(TypeExpr::option(TypeExpr::Bool))),
        };
        assert_eq!(
            ts(&expr).src,
            "Record<string, Array<boolean | undefined | null>>"
        );
        assert!(!ts(&expr).optional);
        assert_eq!(translate(&expr, &Go).src, "map[string][]*bool");
    }

    #[test]
    fn test_tuple_and_fixed_array() {
        let tuple = TypeExpr::Tuple(vec![TypeExpr::U8, TypeExpr::Str]);
        assert_eq!(ts(&tuple).src, "[number, string]");

        let fixed = TypeExpr::FixedArray {
            content: Box::new(TypeExpr::F32),
            size: 3,
        };
        assert_eq!(ts(&fixed).src, "[number, number, number]");
        assert_eq!(translate(&fixed, &Go).src, "[3]float32");
    }

    #[test]
    fn test_type_names_are_sanitized_with_generics() {
        let expr = TypeExpr::TypeName(TypeName {
            ident: "my-page".to_string(),
            generics: vec![TypeExpr::name("User"), TypeExpr::I64],
        });
        assert_eq!(ts(&expr).src, "my$page<User, number>");
        assert_eq!(translate(&expr, &Go).src, "MyPage[User, int64]");
    }

    #[test]
    fn test_incomplete_and_never() {
        let expr = TypeExpr::Incomplete {
            debug: "fn() */".to_string(),
        };
        assert_eq!(ts(&expr).src, "/* Incomplete: fn() * / */ unknown");
        assert_eq!(ts(&TypeExpr::Never).src, "never");
        assert_eq!(translate(&TypeExpr::Never, &Go).src, "/* never */ any");
    }

    #[test]
    fn test_translation_is_pure() {
        let expr = TypeExpr::Tuple(vec![TypeExpr::option(TypeExpr::name("A")), TypeExpr::Char]);
        assert_eq!(ts(&expr), ts(&expr));
    }

    #[test]
    fn test_incomplete_diagnostics() {
        let expr = TypeExpr::Map {
            key: Box::new(TypeExpr::Incomplete {
                debug: "k".to_string(),
            }),
            value: Box::new(TypeExpr::option(TypeExpr::Incomplete {
                debug: "v".to_string(),
            })),
        };
        assert_eq!(incomplete_diagnostics(&expr), vec!["k", "v"]);
        assert!(incomplete_diagnostics(&TypeExpr::Str).is_empty());
    }

    #[test]
    fn test_scalars_reach_nested_leaves() {
        let expr = TypeExpr::TypeName(TypeName {
            ident: "Page".to_string(),
            generics: vec![TypeExpr::seq(TypeExpr::option(TypeExpr::U128))],
        });
        assert_eq!(scalars(&expr), vec![Scalar::U128]);
        assert!(scalars(&TypeExpr::name("Plain")).is_empty());
    }

    #[test]
    fn test_every_scalar_uses_the_target_table() {
        for (expr, ts_src) in [
            (TypeExpr::F64, "number"),
            (TypeExpr::Bool, "boolean"),
            (TypeExpr::U128, "number"),
            (TypeExpr::Str, "string"),
        ] {
            let scalar = expr.scalar().unwrap();
            assert_eq!(ts(&expr).src, ts_src);
            assert_eq!(ts(&expr).src, TypeScript.scalar(scalar));
            assert_eq!(translate(&expr, &Go).src, Go.scalar(scalar));
        }
    }

    #[test]
    fn test_strip_option() {
        let nested = TypeExpr::option(TypeExpr::option(TypeExpr::name("Base")));
        assert_eq!(strip_option(&nested), &TypeExpr::name("Base"));
        assert_eq!(strip_option(&TypeExpr::Str), &TypeExpr::Str);
    }
}
