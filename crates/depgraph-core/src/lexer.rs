//! Line classifier for the DOT subset emitted by call-graph generators
//!
//! One line in, one [`Token`] out. Nothing is carried between lines and no
//! input is rejected: anything unrecognised becomes [`TokenKind::Ignored`].

use regex::Regex;
use std::sync::LazyLock;

// `Node12 [label="BAL_Init", ...];`, `Node12;`, `"quoted id" [...];`
static RE_NODE_STMT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:"[^"]*"|[A-Za-z0-9_.]+)\s*(?:\[.*\])?\s*;$"#).unwrap()
});

/// Statement kind of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// `digraph <name> {`
    DigraphDef,
    /// `<id> [<attrs>];`
    NodeStmt,
    /// `<src> -> <dst> [<attrs>];`
    EdgeStmt,
    /// `node [<attrs>];` default node attributes
    NodeAttrStmt,
    /// `edge [<attrs>];` default edge attributes
    EdgeAttrStmt,
    /// `graph [<attrs>];` graph attributes
    GraphAttrStmt,
    LBrace,
    RBrace,
    /// Recognised as content but not one of the supported statements.
    Ignored,
    /// Blank line.
    None,
}

/// A classified line and the part of it the parser needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    /// - `DigraphDef`: the graph name, without quotes
    /// - `NodeStmt`: the statement without its trailing `;`
    /// - `EdgeStmt`: the whole trimmed line
    /// - otherwise: the trimmed line
    pub value: &'a str,
}

impl<'a> Token<'a> {
    fn new(kind: TokenKind, value: &'a str) -> Self {
        Token { kind, value }
    }
}

/// Classify one line. Rules are applied in priority order.
pub fn tokenize(line: &str) -> Token<'_> {
    let line = line.trim();

    if line.is_empty() {
        return Token::new(TokenKind::None, line);
    }
    if let Some(at) = line.find("digraph") {
        return Token::new(TokenKind::DigraphDef, graph_name(&line[at + "digraph".len()..]));
    }
    if line.starts_with("node [") {
        return Token::new(TokenKind::NodeAttrStmt, line);
    }
    if line.starts_with("edge [") {
        return Token::new(TokenKind::EdgeAttrStmt, line);
    }
    // Keyword, not a node id
    if line.starts_with("graph [") {
        return Token::new(TokenKind::GraphAttrStmt, line);
    }
    if line.contains("->") {
        return Token::new(TokenKind::EdgeStmt, line);
    }
    if RE_NODE_STMT.is_match(line) {
        let stmt = line.strip_suffix(';').unwrap_or(line).trim_end();
        return Token::new(TokenKind::NodeStmt, stmt);
    }
    match line {
        "{" => Token::new(TokenKind::LBrace, line),
        "}" => Token::new(TokenKind::RBrace, line),
        _ => Token::new(TokenKind::Ignored, line),
    }
}

/// Text after the `digraph` keyword up to the opening brace, unquoted.
fn graph_name(rest: &str) -> &str {
    let name = match rest.find('{') {
        Some(brace) => &rest[..brace],
        None => rest,
    };
    unquote(name.trim())
}

/// Strip one pair of surrounding double quotes, if present.
pub(crate) fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}
