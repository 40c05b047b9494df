//! Integration tests for syntax nodes
//!
//! Builds small trees from lexer output, the way a parser would.

use easy_foundation::{ErrorKind, Metatables};
use easy_language::{SyntaxNode, Token, TokenKind, kinds, tokenize};

fn literals(tokens: &[Token], kind: &str, token_kind: TokenKind) -> Vec<SyntaxNode> {
    tokens
        .iter()
        .filter(|t| t.kind() == token_kind)
        .map(|t| SyntaxNode::from_token(kind, t))
        .collect()
}

#[test]
fn list_from_tokens() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize("[1, 2, 3]", "list.easy", &mt).unwrap();
    let list = SyntaxNode::new(kinds::LIST, tokens[0].origin().clone())
        .with_children(literals(&tokens, kinds::NUMBER, TokenKind::Number));
    assert_eq!(list.to_string(), "(List (Number 1) (Number 2) (Number 3))");
    assert_eq!(list.origin().column(), 1);
    assert_eq!(list.children()[2].origin().column(), 8);
}

#[test]
fn nested_tree_walks_in_order() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize("while x\n  y = 1", "w.easy", &mt).unwrap();
    let names = literals(&tokens, kinds::NAME, TokenKind::Identifier);
    let body = SyntaxNode::new(kinds::BLOCK, tokens[3].origin().clone()).with_child(
        SyntaxNode::from_token(kinds::ASSIGN, &tokens[4])
            .with_child(SyntaxNode::from_token(kinds::NUMBER, &tokens[6])),
    );
    let tree = SyntaxNode::new(kinds::WHILE, tokens[0].origin().clone())
        .with_child(names[0].clone())
        .with_child(body);

    let visited: Vec<&str> = tree.walk().map(SyntaxNode::kind).collect();
    assert_eq!(visited, vec!["While", "Name", "Block", "Assign", "Number"]);
    assert_eq!(tree.to_string(), r#"(While (Name "x") (Block (Assign "y" (Number 1))))"#);
    assert_eq!(tree.walk().filter(|n| n.is_empty()).count(), 2);
}

#[test]
fn runtime_error_at_node() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize("a\nb(c)", "call.easy", &mt).unwrap();
    let callee = SyntaxNode::from_token(kinds::NAME, &tokens[2]);
    let err = callee.error(ErrorKind::UndefinedName("b".into()));
    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.line, Some(2));
    assert_eq!(ctx.column, Some(1));
    assert!(err.to_string().contains("undefined name: b"));
}
