//! Integration tests for the lexer
//!
//! Tests token production, indentation blocks, and lexical errors.

use easy_foundation::Metatables;
use easy_language::{
    Keyword, LexErrorKind, Lexer, LexerConfig, Symbol, TokenKind, tokenize,
};

fn kinds(source: &str) -> Vec<TokenKind> {
    let mt = Metatables::bootstrap();
    tokenize(source, "test.easy", &mt)
        .unwrap()
        .iter()
        .map(|t| t.kind())
        .collect()
}

fn error_kind(source: &str) -> LexErrorKind {
    let mt = Metatables::bootstrap();
    tokenize(source, "test.easy", &mt).unwrap_err().kind
}

// =============================================================================
// Basic Tokens
// =============================================================================

#[test]
fn lex_empty_input() {
    assert_eq!(kinds(""), vec![TokenKind::Eof]);
}

#[test]
fn lex_identifier_literal() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize("foo_bar1", "test.easy", &mt).unwrap();
    assert_eq!(tokens[0].kind(), TokenKind::Identifier);
    assert_eq!(tokens[0].literal().and_then(|v| v.as_str()), Some("foo_bar1"));
}

#[test]
fn lex_number_literal() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize("3.25", "test.easy", &mt).unwrap();
    assert_eq!(tokens[0].kind(), TokenKind::Number);
    assert_eq!(tokens[0].literal().and_then(|v| v.as_number()), Some(3.25));
}

#[test]
fn lex_string_literal_with_escapes() {
    let mt = Metatables::bootstrap();
    let tokens = tokenize(r#""a\tb\"c""#, "test.easy", &mt).unwrap();
    assert_eq!(tokens[0].kind(), TokenKind::String);
    assert_eq!(tokens[0].literal().and_then(|v| v.as_str()), Some("a\tb\"c"));
}

#[test]
fn literal_tokens_carry_values() {
    let mt = Metatables::bootstrap();
    for token in tokenize("x = 1 + \"s\"\nwhile x", "test.easy", &mt).unwrap() {
        assert_eq!(token.literal().is_some(), token.kind().has_literal(), "{token}");
    }
}

// =============================================================================
// Symbols and Keywords
// =============================================================================

#[test]
fn longest_symbol_wins() {
    use Symbol::{Dot, Ellipsis, EqEq, Eq, LtEq, Lt};
    assert_eq!(
        kinds("... . == = <= <"),
        vec![
            TokenKind::Symbol(Ellipsis),
            TokenKind::Symbol(Dot),
            TokenKind::Symbol(EqEq),
            TokenKind::Symbol(Eq),
            TokenKind::Symbol(LtEq),
            TokenKind::Symbol(Lt),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn adjacent_symbols_split_greedily() {
    use Symbol::{Dot, Ellipsis};
    assert_eq!(
        kinds("...."),
        vec![
            TokenKind::Symbol(Ellipsis),
            TokenKind::Symbol(Dot),
            TokenKind::Eof
        ]
    );
}

#[test]
fn keyword_prefix_is_identifier() {
    assert_eq!(
        kinds("is isX"),
        vec![
            TokenKind::Keyword(Keyword::Is),
            TokenKind::Identifier,
            TokenKind::Eof
        ]
    );
}

#[test]
fn every_keyword_lexes_as_keyword() {
    for keyword in Keyword::ALL {
        assert_eq!(
            kinds(keyword.spelling()),
            vec![TokenKind::Keyword(keyword), TokenKind::Eof]
        );
    }
}

// =============================================================================
// Indentation
// =============================================================================

#[test]
fn indentation_block_round_trip() {
    use TokenKind::{Dedent, Eof, Identifier, Indent, Newline};
    assert_eq!(
        kinds("a\n  b\n  c\nd\n"),
        vec![
            Identifier, Newline, Indent, Identifier, Newline, Identifier, Newline, Dedent,
            Identifier, Newline, Eof,
        ]
    );
}

#[test]
fn open_blocks_close_at_end_of_input() {
    use TokenKind::{Dedent, Eof, Identifier, Indent, Newline};
    assert_eq!(
        kinds("a\n  b\n    c"),
        vec![
            Identifier, Newline, Indent, Identifier, Newline, Indent, Identifier, Dedent, Dedent,
            Eof,
        ]
    );
}

#[test]
fn inconsistent_dedent_is_rejected() {
    assert_eq!(
        error_kind("a\n    b\n  c\n"),
        LexErrorKind::BadIndent { width: 2 }
    );
}

#[test]
fn dedent_between_open_widths_is_rejected() {
    assert_eq!(
        error_kind("a\n    b\n   c\nd\n"),
        LexErrorKind::BadIndent { width: 3 }
    );
}

#[test]
fn indent_depth_follows_blocks() {
    let mt = Metatables::bootstrap();
    let mut lexer = Lexer::new("a\n  b\n", "test.easy", &mt);
    let mut depths = Vec::new();
    loop {
        let token = lexer.next_token().unwrap();
        depths.push(lexer.indent_depth());
        if token.is_eof() {
            break;
        }
    }
    assert_eq!(depths, vec![0, 0, 1, 1, 1, 0, 0]);
}

#[test]
fn brackets_continue_lines() {
    use Symbol::{Comma, LParen, RParen};
    use TokenKind::{Eof, Identifier, Number, Symbol as S};
    assert_eq!(
        kinds("f(1,\n      2)"),
        vec![Identifier, S(LParen), Number, S(Comma), Number, S(RParen), Eof]
    );
}

#[test]
fn comments_are_ignored() {
    use TokenKind::{Eof, Identifier, Newline};
    assert_eq!(
        kinds("# header\na # trailing\n\n# again\nb"),
        vec![Identifier, Newline, Identifier, Eof]
    );
}

#[test]
fn tab_width_is_configurable() {
    let mt = Metatables::bootstrap();
    // Four spaces and a tab are the same block at tab width 4.
    let source = "a\n    b\n\tc\n";
    let config = LexerConfig::default().with_tab_width(4);
    let tokens: Vec<TokenKind> = Lexer::with_config(source, "test.easy", &mt, config)
        .map(|t| t.unwrap().kind())
        .collect();
    assert_eq!(tokens.iter().filter(|k| **k == TokenKind::Indent).count(), 1);

    // At tab width 1 the tab dedents to a width that never opened.
    let err = Lexer::with_config(source, "test.easy", &mt, LexerConfig::strict())
        .find_map(Result::err)
        .unwrap();
    assert_eq!(err.kind, LexErrorKind::BadIndent { width: 1 });
}

#[test]
fn strict_config_disables_comments_and_line_joining() {
    let mt = Metatables::bootstrap();
    let strict = |source: &str| -> Result<Vec<TokenKind>, LexErrorKind> {
        Lexer::with_config(source, "test.easy", &mt, LexerConfig::strict())
            .map(|t| t.map(|t| t.kind()).map_err(|e| e.kind))
            .collect()
    };

    assert_eq!(kinds("(\n)").len(), 3);
    assert_eq!(
        strict("(\n)").unwrap(),
        vec![
            TokenKind::Symbol(Symbol::LParen),
            TokenKind::Newline,
            TokenKind::Symbol(Symbol::RParen),
            TokenKind::Eof
        ]
    );

    assert_eq!(kinds("a # note"), vec![TokenKind::Identifier, TokenKind::Eof]);
    assert_eq!(strict("a # note"), Err(LexErrorKind::UnknownSymbol('#')));
}

// =============================================================================
// Errors
// =============================================================================

#[test]
fn unterminated_string() {
    assert_eq!(error_kind("\"abc"), LexErrorKind::UnterminatedString);
    assert_eq!(error_kind("'abc\n'"), LexErrorKind::UnterminatedString);
}

#[test]
fn unknown_symbol() {
    assert_eq!(error_kind("x = @"), LexErrorKind::UnknownSymbol('@'));
}

#[test]
fn error_message_points_at_token() {
    let mt = Metatables::bootstrap();
    let err = tokenize("ok\nx = $", "main.easy", &mt).unwrap_err();
    assert_eq!(err.origin.line(), 2);
    assert_eq!(err.origin.column(), 5);
    let message = err.to_string();
    assert!(message.contains("in main.easy on line 2 column 5"));
    assert!(message.contains("x = $\n    *"));
}

#[test]
fn lexer_stays_failed_after_error() {
    let mt = Metatables::bootstrap();
    let mut lexer = Lexer::new("@ x", "test.easy", &mt);
    let first = lexer.next_token().unwrap_err();
    assert_eq!(lexer.next_token().unwrap_err(), first);
    assert!(lexer.next().is_none());
}

// =============================================================================
// End of Input
// =============================================================================

#[test]
fn eof_repeats_after_end() {
    let mt = Metatables::bootstrap();
    let mut lexer = Lexer::new("x", "test.easy", &mt);
    assert_eq!(lexer.next_token().unwrap().kind(), TokenKind::Identifier);
    for _ in 0..3 {
        let token = lexer.next_token().unwrap();
        assert!(token.is_eof());
        assert_eq!(token.origin().offset(), 1);
    }
}

#[test]
fn iterator_ends_after_eof() {
    let mt = Metatables::bootstrap();
    let mut lexer = Lexer::new("x", "test.easy", &mt);
    assert!(lexer.next().is_some());
    assert!(lexer.next().unwrap().unwrap().is_eof());
    assert!(lexer.next().is_none());
    assert!(lexer.next().is_none());
}

#[test]
fn lex_small_program() {
    let mt = Metatables::bootstrap();
    let source = "\
count = 0
while count < 10
  count = count + 1
  if count == 5
    return count
";
    let tokens = tokenize(source, "loop.easy", &mt).unwrap();
    let rendered: Vec<String> = tokens.iter().map(ToString::to_string).collect();
    assert_eq!(
        rendered,
        vec![
            "identifier \"count\"",
            "'='",
            "number 0",
            "newline",
            "while",
            "identifier \"count\"",
            "'<'",
            "number 10",
            "newline",
            "indent",
            "identifier \"count\"",
            "'='",
            "identifier \"count\"",
            "'+'",
            "number 1",
            "newline",
            "if",
            "identifier \"count\"",
            "'=='",
            "number 5",
            "newline",
            "indent",
            "return",
            "identifier \"count\"",
            "newline",
            "dedent",
            "dedent",
            "end of input",
        ]
    );
}
