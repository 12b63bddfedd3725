//! Doc comment rendering for declarations, fields and variants.
//!
//! Free-text docs and the serde/codegen attributes that influenced the output
//! are folded into one comment block so readers of the generated code can see
//! where a shape came from.

use shapegen_common::{Attrs, LocationId};
use std::collections::BTreeMap;

use crate::ident::string_literal;

/// Comment syntax used for doc blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocStyle {
    /// Opening of a one-line comment, e.g. `/** `.
    pub single_prefix: &'static str,
    pub single_suffix: &'static str,
    /// Line opening a multi-line block, if the syntax has one.
    pub block_open: Option<&'static str>,
    /// Prefix for each non-empty line inside a multi-line block.
    pub line_prefix: &'static str,
    /// What an empty line inside a multi-line block looks like.
    pub empty_line: &'static str,
    pub block_close: Option<&'static str>,
}

impl DocStyle {
    /// `/** ... */` blocks with ` * ` continuation lines.
    pub const JSDOC: Self = Self {
        single_prefix: "/** ",
        single_suffix: " */",
        block_open: Some("/**"),
        line_prefix: " * ",
        empty_line: " *",
        block_close: Some(" */"),
    };

    /// `// ...` on every line.
    pub const LINE: Self = Self {
        single_prefix: "// ",
        single_suffix: "",
        block_open: None,
        line_prefix: "// ",
        empty_line: "//",
        block_close: None,
    };

    fn is_block(&self) -> bool {
        self.block_close.is_some()
    }

    /// Comment text that cannot terminate the surrounding comment early.
    fn escape(&self, text: &str) -> String {
        if self.is_block() {
            text.replace("*/", "*\\/")
        } else {
            text.to_string()
        }
    }
}

/// Builds the comment lines for one item.
#[derive(Debug, Clone)]
pub struct DocComment<'a> {
    attrs: &'a Attrs,
    source_link: Option<String>,
    extra: Vec<String>,
}

impl<'a> DocComment<'a> {
    pub fn new(attrs: &'a Attrs) -> Self {
        Self {
            attrs,
            source_link: None,
            extra: Vec::new(),
        }
    }

    /// Link back to the item's source; `prefix` is prepended to the file path.
    pub fn with_source(mut self, prefix: Option<&str>, location: &LocationId) -> Self {
        self.source_link = prefix.map(|prefix| source_link(prefix, location));
        self
    }

    /// An extra paragraph after everything else.
    pub fn with_extra(mut self, line: impl Into<String>) -> Self {
        self.extra.push(line.into());
        self
    }

    /// Plain text of the comment, before any comment syntax is applied.
    pub fn text(&self) -> String {
        let mut sections = Vec::new();
        if let Some(docs) = self.attrs.rust_docs.as_deref() {
            sections.push(normalize_docs(docs));
        }
        if let Some(annotation) =
            annotation("serde", &self.attrs.serde_flags, &self.attrs.serde_attrs)
        {
            sections.push(annotation);
        }
        if let Some(annotation) =
            annotation("codegen", &self.attrs.codegen_flags, &self.attrs.codegen_attrs)
        {
            sections.push(annotation);
        }
        sections.extend(self.source_link.iter().cloned());
        sections.extend(self.extra.iter().cloned());
        sections.join("\n\n").trim().to_string()
    }

    /// Physical comment lines in `style`; empty when there is nothing to say.
    pub fn render(&self, style: &DocStyle) -> Vec<String> {
        let text = style.escape(&self.text());
        if text.is_empty() {
            return Vec::new();
        }
        if !text.contains('\n') {
            return vec![format!("{}{text}{}", style.single_prefix, style.single_suffix)];
        }

        let mut lines = Vec::new();
        lines.extend(style.block_open.map(str::to_string));
        for line in text.lines() {
            if line.is_empty() {
                lines.push(style.empty_line.to_string());
            } else {
                lines.push(format!("{}{line}", style.line_prefix));
            }
        }
        lines.extend(style.block_close.map(str::to_string));
        lines
    }
}

/// Doc text from `///` comments keeps the space after the slashes; drop one
/// leading space per line and any trailing whitespace.
fn normalize_docs(docs: &str) -> String {
    docs.lines()
        .map(|line| line.strip_prefix(' ').unwrap_or(line).trim_end())
        .collect::<Vec<_>>()
        .join("\n")
}

fn annotation(
    name: &str,
    flags: &BTreeMap<String, LocationId>,
    attrs: &BTreeMap<String, (String, LocationId)>,
) -> Option<String> {
    if flags.is_empty() && attrs.is_empty() {
        return None;
    }
    let items: Vec<String> = flags
        .keys()
        .cloned()
        .chain(
            attrs
                .iter()
                .map(|(key, (value, _))| format!("{key} = {}", string_literal(value))),
        )
        .collect();
    Some(format!("`#[{name}({})]`", items.join(", ")))
}

/// Render a location id of the form `L(dir/file.rs:16 #B6019-B6033)` as a
/// markdown link; other ids are quoted verbatim.
pub fn source_link(prefix: &str, location: &LocationId) -> String {
    match parse_location(location.as_str()) {
        Some((display, path)) => format!("[Source `{display}`]({prefix}{path})"),
        None => format!("Source: `{location}`"),
    }
}

/// Split a location id into its `path:line` display text and the bare path.
fn parse_location(id: &str) -> Option<(&str, &str)> {
    let inner = id.strip_prefix("L(")?.strip_suffix(')')?;
    let (head, range) = inner.rsplit_once('#')?;
    if !is_byte_range(range) {
        return None;
    }
    let head = head.trim_end();
    if head.is_empty() || head.contains(char::is_whitespace) {
        return None;
    }
    let file_start = head.rfind('/').map_or(0, |slash| slash + 1);
    let path_end = head[file_start..]
        .find(':')
        .map_or(head.len(), |colon| file_start + colon);
    if path_end == file_start {
        return None;
    }
    Some((head, &head[..path_end]))
}

/// `B<digits>-B<digits>`
fn is_byte_range(range: &str) -> bool {
    let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    range
        .strip_prefix('B')
        .and_then(|rest| rest.split_once("-B"))
        .is_some_and(|(start, end)| digits(start) && digits(end))
}
