//! Syntax tree nodes.
//!
//! `SyntaxNode` is the shape a parser builds from the token stream: a kind
//! name, an optional literal, ordered children, and the origin of the
//! construct. Children are owned, so a node can never contain itself.

use std::fmt;

use easy_foundation::{Error, ErrorKind, Value};

use crate::origin::SourceOrigin;
use crate::token::Token;

/// Node kind names used by the parser.
pub mod kinds {
    /// A whole file: children are its top-level expressions.
    pub const MODULE: &str = "Module";
    /// An indented block: children are its expressions.
    pub const BLOCK: &str = "Block";
    /// `if test body [else alternative]`.
    pub const IF: &str = "If";
    /// `while test body`.
    pub const WHILE: &str = "While";
    /// Variable reference; literal is the name.
    pub const NAME: &str = "Name";
    /// Numeric literal.
    pub const NUMBER: &str = "Number";
    /// String literal.
    pub const STRING: &str = "String";
    /// `[a, b, ...]`: children are the elements.
    pub const LIST: &str = "List";
    /// `\ params body`: literal-less; children are parameter names then body.
    pub const FUNCTION: &str = "Function";
    /// `f(args...)`: first child is the callee.
    pub const CALL: &str = "Call";
    /// `target = value`; literal is the target name.
    pub const ASSIGN: &str = "Assign";
    /// Short-circuit `and`.
    pub const AND: &str = "And";
    /// Short-circuit `or`.
    pub const OR: &str = "Or";
    /// `return value`.
    pub const RETURN: &str = "Return";
    /// Application of a syntactic form.
    pub const FORM: &str = "Form";
}

/// A syntax tree node.
#[derive(Clone, Debug)]
pub struct SyntaxNode {
    kind: String,
    literal: Option<Value>,
    children: Vec<SyntaxNode>,
    origin: SourceOrigin,
}

impl SyntaxNode {
    /// Creates a leaf node with no literal.
    #[must_use]
    pub fn new(kind: impl Into<String>, origin: SourceOrigin) -> Self {
        Self {
            kind: kind.into(),
            literal: None,
            children: Vec::new(),
            origin,
        }
    }

    /// Creates a leaf node from a token, copying its literal and origin.
    #[must_use]
    pub fn from_token(kind: impl Into<String>, token: &Token) -> Self {
        Self {
            kind: kind.into(),
            literal: token.literal().cloned(),
            children: Vec::new(),
            origin: token.origin().clone(),
        }
    }

    /// Builder method to set the literal.
    #[must_use]
    pub fn with_literal(mut self, literal: Value) -> Self {
        self.literal = Some(literal);
        self
    }

    /// Builder method to append a child.
    #[must_use]
    pub fn with_child(mut self, child: SyntaxNode) -> Self {
        self.children.push(child);
        self
    }

    /// Builder method to append several children in order.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = SyntaxNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Returns the kind name.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns true if this node has the given kind.
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Returns the literal payload, if any.
    #[must_use]
    pub const fn literal(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    /// Returns the children in order.
    #[must_use]
    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    /// Returns the number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns true if this node has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Returns where this construct began.
    #[must_use]
    pub const fn origin(&self) -> &SourceOrigin {
        &self.origin
    }

    /// Iterates over this node and all descendants in pre-order.
    #[must_use]
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Builds a runtime error located at this node.
    #[must_use]
    pub fn error(&self, kind: ErrorKind) -> Error {
        Error::new(kind).with_context(self.origin.error_context())
    }
}

/// Nodes compare by kind, literal, and children; origins are ignored.
impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.literal == other.literal && self.children == other.children
    }
}

/// Renders the tree as an s-expression: `(Kind literal child...)`.
impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}", self.kind)?;
        if let Some(literal) = &self.literal {
            write!(f, " {}", literal.repr())?;
        }
        for child in &self.children {
            write!(f, " {child}")?;
        }
        write!(f, ")")
    }
}

/// Pre-order iterator returned by [`SyntaxNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a SyntaxNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}
