//! Identifier and property-key helpers.
//!
//! Schema names come straight from source identifiers and serde renames, so
//! they may contain characters no target accepts.

/// Map an arbitrary name onto a valid identifier.
///
/// Every character outside `[A-Za-z0-9_$]` becomes `$`, and a leading digit
/// gets a `$` prefix. Distinct inputs may collide (`a-b` and `a.b` both become
/// `a$b`); callers are expected to tolerate that.
pub fn sanitize(raw: &str) -> String {
    let mut out: String = raw
        .chars()
        .map(|c| if is_ident_char(c) { c } else { '$' })
        .collect();
    if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, '$');
    }
    out
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

/// Whether `name` can be written as an object key without quoting.
pub fn is_bare_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(is_ident_char)
}

/// A string literal for `value`, escaped the way JSON escapes strings.
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", u32::from(c))),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The name as an object key: bare when possible, otherwise a string literal.
pub fn property_key(name: &str) -> String {
    if is_bare_identifier(name) {
        name.to_string()
    } else {
        string_literal(name)
    }
}

/// Name for the `idx`th positional item: `a`, `b`, ... `z`, then `a1`, `b1`, ...
pub fn positional_name(idx: usize) -> String {
    let letter = char::from(b'a' + (idx % 26) as u8);
    match idx / 26 {
        0 => letter.to_string(),
        round => format!("{letter}{round}"),
    }
}

/// `snake_case` file stem for a declaration name.
///
/// Word breaks come from lower-to-upper transitions and from characters that
/// [`sanitize`] would replace.
pub fn snake_case(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;
    for c in raw.chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_lower = true;
        } else {
            if !out.ends_with('_') {
                out.push('_');
            }
            prev_lower = false;
        }
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_invalid_characters() {
        assert_eq!(sanitize("Point"), "Point");
        assert_eq!(sanitize("foo-bar"), "foo$bar");
        assert_eq!(sanitize("a.b c"), "a$b$c");
        assert_eq!(sanitize("$already_ok"), "$already_ok");
    }

    #[test]
    fn test_sanitize_leading_digit() {
        let out = sanitize("2Foo-Bar!");
        assert_eq!(out, "$2Foo$Bar$");
        assert!(out.starts_with('$'));
        assert!(!out.contains('-') && !out.contains('!'));
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for raw in ["2Foo-Bar!", "hello world", "ü", "", "$1", "__x__"] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
        }
    }

    #[test]
    fn test_sanitize_collisions_are_allowed() {
        assert_eq!(sanitize("a-b"), sanitize("a.b"));
    }

    #[test]
    fn test_is_bare_identifier() {
        assert!(is_bare_identifier("foo"));
        assert!(is_bare_identifier("_foo"));
        assert!(is_bare_identifier("$foo1"));
        assert!(!is_bare_identifier(""));
        assert!(!is_bare_identifier("1foo"));
        assert!(!is_bare_identifier("foo-bar"));
        assert!(!is_bare_identifier("foo bar"));
    }

    #[test]
    fn test_property_key_quotes_when_needed() {
        assert_eq!(property_key("displayName"), "displayName");
        assert_eq!(property_key("display-name"), "\"display-name\"");
        assert_eq!(property_key("9lives"), "\"9lives\"");
    }

    #[test]
    fn test_positional_names() {
        let names: Vec<String> = (0..3).map(positional_name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(positional_name(25), "z");
        assert_eq!(positional_name(27), "b1");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(snake_case("Point"), "point");
        assert_eq!(snake_case("UserProfile"), "user_profile");
        assert_eq!(snake_case("HTTPServer2"), "httpserver2");
        assert_eq!(snake_case("my-type.v2"), "my_type_v2");
        assert_eq!(snake_case("__"), "_");
    }

    #[test]
    fn test_string_literal_escapes() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("line\nbreak"), "\"line\\nbreak\"");
    }
}
