//! Advisory Python well-formedness check backed by tree-sitter.

use tree_sitter::{Node, Parser};

/// Parses `code` as Python and returns a diagnostic for the first syntax
/// problem, or `None` when the tree is well-formed.
///
/// This is informational only: grammars recover aggressively, so the
/// diagnostic points at the first `ERROR`/missing node rather than giving a
/// full compiler-grade message. Rows and columns are reported 1-based.
pub fn python_syntax_diagnostic(code: &str) -> Option<String> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_python::LANGUAGE.into())
        .ok()?;

    let tree = parser.parse(code, None)?;
    let root = tree.root_node();
    if !root.has_error() {
        return None;
    }

    let node = first_error_node(root)?;
    let pos = node.start_position();
    let what = if node.is_missing() {
        format!("missing `{}`", node.kind())
    } else {
        "invalid syntax".to_string()
    };
    Some(format!(
        "{} at line {}, column {}",
        what,
        pos.row + 1,
        pos.column + 1
    ))
}

/// Depth-first search for the first `ERROR` or missing node.
fn first_error_node(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error_node(child) {
            return Some(found);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_python_has_no_diagnostic() {
        assert_eq!(python_syntax_diagnostic("def f(x):\n    return x\n"), None);
    }

    #[test]
    fn broken_python_reports_location() {
        let diag = python_syntax_diagnostic("def f(:\n    pass\n");
        let diag = diag.expect("expected a diagnostic");
        assert!(diag.contains("line"), "diagnostic was: {diag}");
    }
}
