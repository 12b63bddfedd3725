//! Indentation-aware tree of emitted source.
//!
//! Emitters never count spaces. They push lines into a [`Code`] node and open
//! nested blocks; indentation is decided once, when the tree is rendered.

/// One entry of a [`Code`] tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Line(String),
    Block(Code),
}

/// Ordered lines and sub-blocks.
///
/// A block is either *indented* (rendered one level deeper than its parent)
/// or *grouped* (rendered at the parent's level, used to splice in related
/// declarations).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Code {
    nodes: Vec<Node>,
    grouped: bool,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty block that renders at its parent's indentation.
    pub fn group() -> Self {
        Self {
            nodes: Vec::new(),
            grouped: true,
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn is_grouped(&self) -> bool {
        self.grouped
    }

    /// True when rendering would produce no text at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.iter().all(|node| match node {
            Node::Line(_) => false,
            Node::Block(code) => code.is_empty(),
        })
    }

    pub fn line(&mut self, text: impl Into<String>) -> &mut Self {
        self.nodes.push(Node::Line(text.into()));
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.nodes.extend(lines.into_iter().map(|l| Node::Line(l.into())));
        self
    }

    /// The indented block directly after the last line.
    ///
    /// Reuses the last child when it already is an indented block, so
    /// consecutive calls keep writing into the same body.
    pub fn indented(&mut self) -> &mut Code {
        let reuse = matches!(self.nodes.last(), Some(Node::Block(code)) if !code.grouped);
        if !reuse {
            self.nodes.push(Node::Block(Code::new()));
        }
        self.last_block()
    }

    /// Push a single line one level deeper than this node.
    pub fn indented_line(&mut self, text: impl Into<String>) -> &mut Self {
        self.indented().line(text);
        self
    }

    /// A fresh indented block, never merged with a previous one.
    pub fn scope(&mut self) -> &mut Code {
        self.push_block(Code::new())
    }

    /// A fresh grouped block at this node's level.
    pub fn grouped(&mut self) -> &mut Code {
        self.push_block(Code::group())
    }

    /// Splice an already-built subtree in as a child.
    pub fn push_block(&mut self, block: Code) -> &mut Code {
        self.nodes.push(Node::Block(block));
        self.last_block()
    }

    /// Append text to the last line, or start a new line when the last child
    /// is a block.
    pub fn append_to_last_line(&mut self, suffix: &str) -> &mut Self {
        match self.nodes.last_mut() {
            Some(Node::Line(line)) => line.push_str(suffix),
            Some(Node::Block(_)) | None => self.nodes.push(Node::Line(suffix.to_string())),
        }
        self
    }

    fn last_block(&mut self) -> &mut Code {
        if self.nodes.is_empty() {
            self.nodes.push(Node::Block(Code::new()));
        }
        let last = self.nodes.len() - 1;
        block_mut(&mut self.nodes[last])
    }

    /// Render the tree with `unit` as one level of indentation.
    ///
    /// Lines with embedded newlines are split and every piece is indented.
    /// Blank lines are emitted without trailing whitespace.
    pub fn render(&self, unit: &str) -> String {
        let mut out = Vec::new();
        self.render_into(unit, 0, &mut out);
        out.join("\n")
    }

    fn render_into(&self, unit: &str, level: usize, out: &mut Vec<String>) {
        for node in &self.nodes {
            match node {
                Node::Line(text) => {
                    for segment in text.split('\n') {
                        if segment.trim().is_empty() {
                            out.push(String::new());
                        } else {
                            out.push(format!("{}{segment}", unit.repeat(level)));
                        }
                    }
                }
                Node::Block(code) => {
                    let level = if code.grouped { level } else { level + 1 };
                    code.render_into(unit, level, out);
                }
            }
        }
    }
}

/// The block held by `node`. A line is replaced by an empty block first.
fn block_mut(node: &mut Node) -> &mut Code {
    match node {
        Node::Block(code) => code,
        Node::Line(_) => {
            *node = Node::Block(Code::new());
            block_mut(node)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_nested_indentation() {
        let mut code = Code::new();
        code.line("export function f() {");
        code.indented().line("if (x) {").indented().line("return 1;");
        code.indented().line("}");
        code.line("}");

        assert_eq!(
            code.render("  "),
            "export function f() {\n  if (x) {\n    return 1;\n  }\n}"
        );
    }

    #[test]
    fn test_grouped_stays_at_level() {
        let mut code = Code::new();
        code.line("a");
        code.grouped().line("b").indented_line("c");
        code.line("d");
        assert_eq!(code.render("  "), "a\nb\n  c\nd");
    }

    #[test]
    fn test_indented_reuses_last_block() {
        let mut code = Code::new();
        code.line("{");
        code.indented_line("one");
        code.indented_line("two");
        code.line("}");
        assert_eq!(code.nodes().len(), 3);
        assert_eq!(code.render("\t"), "{\n\tone\n\ttwo\n}");
    }

    #[test]
    fn test_push_block_returns_spliced_block() {
        let mut code = Code::new();
        code.line("{");
        let mut body = Code::group();
        body.line("a");
        code.push_block(body).line("b");
        code.indented_line("c");
        code.line("}");
        assert_eq!(code.render("  "), "{\na\nb\n  c\n}");
    }

    #[test]
    fn test_block_mut_replaces_line() {
        let mut node = Node::Line("x".to_string());
        block_mut(&mut node).line("y");
        let mut expected = Code::new();
        expected.line("y");
        assert_eq!(node, Node::Block(expected));
    }

    #[test]
    fn test_scope_starts_new_block() {
        let mut code = Code::new();
        code.scope().line("a");
        code.scope().line("b");
        assert_eq!(code.nodes().len(), 2);
        assert_eq!(code.render("  "), "  a\n  b");
    }

    #[test]
    fn test_empty_subtrees_render_nothing() {
        let mut code = Code::new();
        code.line("a");
        code.scope();
        code.grouped().grouped();
        code.line("b");
        assert_eq!(code.render("  "), "a\nb");
        assert!(Code::new().is_empty());
        let mut only_empty = Code::new();
        only_empty.scope();
        assert!(only_empty.is_empty());
    }

    #[test]
    fn test_multiline_text_is_reindented() {
        let mut code = Code::new();
        code.line("ns {");
        code.indented_line("/**\n * doc\n *\n */");
        code.line("}");
        assert_eq!(code.render("  "), "ns {\n  /**\n   * doc\n   *\n   */\n}");
    }

    #[test]
    fn test_blank_lines_have_no_indent() {
        let mut code = Code::new();
        code.indented().line("a").line("").line("b");
        assert_eq!(code.render("    "), "    a\n\n    b");
    }

    #[test]
    fn test_append_to_last_line() {
        let mut code = Code::new();
        code.line("export type A = {");
        code.indented_line("x: number;");
        code.append_to_last_line("} & B;");
        code.line("type C = D");
        code.append_to_last_line(";");
        assert_eq!(
            code.render("  "),
            "export type A = {\n  x: number;\n} & B;\ntype C = D;"
        );
    }
}
