//! End-to-end scanner behaviour through the reference host.

use mojo_scanner::state;
use mojo_scanner::{
    Driver, DriverOptions, IndentStack, Lexer, LexemeKind, Scanner, SourceLexer, Span, TokenKind,
    TokenSet,
};
use pretty_assertions::assert_eq;

use TokenKind::{Comment, Dedent, Indent, Newline};

#[test]
fn three_line_block() {
    let out = Driver::new("a\n    b\nc\n").tokenize();
    assert_eq!(
        out.external_kinds(),
        vec![Newline, Indent, Newline, Dedent, Newline]
    );
    assert!(out.indents.is_empty());
}

#[test]
fn three_line_block_with_crlf() {
    let out = Driver::new("a\r\n    b\r\nc\r\n").tokenize();
    assert_eq!(
        out.external_kinds(),
        vec![Newline, Indent, Newline, Dedent, Newline]
    );
}

#[test]
fn tab_space_indent_measures_nine() {
    let mut scanner = Scanner::new();
    scanner.deserialize(&[1, 4]);
    let mut lexer = SourceLexer::new("\t x\n");
    assert_eq!(scanner.scan(&mut lexer, TokenSet::all()), Some(Indent));
    assert_eq!(scanner.indents().as_slice(), &[4, 9]);
    assert_eq!(lexer.token_span(), Span::point(2));
}

#[test]
fn comment_only_line_keeps_stack() {
    let source = "  # note\n";
    let out = Driver::resume(
        source,
        &mojo_scanner::Checkpoint {
            offset: 0,
            state: state::serialize(&IndentStack::from_widths(&[4])),
        },
    )
    .unwrap_or_else(|e| panic!("{e}"))
    .tokenize();
    assert_eq!(out.external_kinds(), vec![Comment, Newline]);
    assert_eq!(out.lexemes[0].text(source), "# note");
    assert_eq!(out.indents.as_slice(), &[4]);
}

#[test]
fn comment_only_line_without_comment_tokens() {
    let mut scanner = Scanner::new();
    scanner.deserialize(&[1, 4]);
    let valid = TokenSet::all() - TokenSet::COMMENT;

    let mut lexer = SourceLexer::new("  # note\n");
    assert_eq!(scanner.scan(&mut lexer, valid), None);
    assert_eq!(lexer.lookahead(), '#');
    assert_eq!(scanner.indents().as_slice(), &[4]);
}

#[test]
fn snapshot_of_three_levels() {
    let stack = IndentStack::from_widths(&[4, 8, 12]);
    assert_eq!(state::serialize(&stack).as_slice(), &[3, 4, 8, 12]);

    let mut restored = IndentStack::new();
    state::deserialize(&mut restored, &[3, 4, 8, 12]);
    assert_eq!(restored.as_slice(), &[4, 8, 12]);
}

#[test]
fn nested_python_like_program() {
    let source = "\
def f(x):
    if x:
        return 1
    # fallthrough

    return 2
print(f(0))
";
    let out = Driver::new(source).tokenize();
    assert_eq!(
        out.external_kinds(),
        vec![
            Newline, // def f(x):
            Indent, Newline, // if x:
            Indent, Newline, // return 1
            Comment, Newline, // # fallthrough
            Newline, // blank
            Dedent, Newline, // return 2
            Dedent, Newline, // print(f(0))
        ]
    );
    assert_eq!(out.indents_emitted, 2);
    assert_eq!(out.levels_closed, 2);
    assert!(out.indents.is_empty());
}

#[test]
fn multi_level_dedent_is_one_token() {
    let out = Driver::new("a\n  b\n    c\n      d\ne\n").tokenize();
    assert_eq!(
        out.external_kinds(),
        vec![Newline, Indent, Newline, Indent, Newline, Indent, Newline, Dedent, Newline]
    );
    assert_eq!(out.dedents_emitted, 1);
    assert_eq!(out.levels_closed, 3);
}

#[test]
fn grammar_restricted_positions() {
    // Only NEWLINE is admissible: indentation is never reported.
    let options = DriverOptions {
        admissible: TokenSet::NEWLINE,
        record_checkpoints: false,
    };
    let out = Driver::with_options("a\n    b\n", options).tokenize();
    assert_eq!(out.external_kinds(), vec![Newline, Newline]);
    assert!(out.indents.is_empty());
    assert!(out
        .lexemes
        .iter()
        .all(|l| l.kind != LexemeKind::External(Indent)));
}
