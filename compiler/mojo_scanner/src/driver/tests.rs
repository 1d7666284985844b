use super::*;
use pretty_assertions::assert_eq;

/// Helper: tokenize and render each lexeme as `(name, text)`.
fn render(source: &str) -> Vec<(&'static str, &str)> {
    Driver::new(source)
        .tokenize()
        .lexemes
        .iter()
        .map(|lexeme| (lexeme.kind.name(), lexeme.text(source)))
        .collect()
}

#[test]
fn empty_source_has_no_lexemes() {
    let out = Driver::new("").tokenize();
    assert!(out.lexemes.is_empty());
    assert!(out.checkpoints.is_empty());
    assert!(out.indents.is_empty());
}

#[test]
fn block_then_dedent() {
    assert_eq!(
        render("a\n    b\nc\n"),
        vec![
            ("TEXT", "a"),
            ("NEWLINE", "\n"),
            ("INDENT", ""),
            ("TEXT", "b"),
            ("NEWLINE", "\n"),
            ("DEDENT", ""),
            ("TEXT", "c"),
            ("NEWLINE", "\n"),
        ]
    );
}

#[test]
fn text_runs_split_on_whitespace_and_comments() {
    assert_eq!(
        render("x = f(1)# c\n"),
        vec![
            ("TEXT", "x"),
            ("TEXT", "="),
            ("TEXT", "f(1)"),
            ("COMMENT", "# c"),
            ("NEWLINE", "\n"),
        ]
    );
}

#[test]
fn zero_width_tokens_have_point_spans() {
    let out = Driver::new("a\n  b\n").tokenize();
    let indent = out
        .lexemes
        .iter()
        .find(|l| l.kind == LexemeKind::External(TokenKind::Indent))
        .copied();
    assert_eq!(
        indent,
        Some(Lexeme {
            kind: LexemeKind::External(TokenKind::Indent),
            span: Span::point(4),
        })
    );
}

#[test]
fn counts_track_indents_and_closed_levels() {
    let out = Driver::new("a\n  b\n    c\nd\n").tokenize();
    assert_eq!(out.indents_emitted, 2);
    assert_eq!(out.dedents_emitted, 1);
    assert_eq!(out.levels_closed, 2);
    assert!(out.indents.is_empty());
}

#[test]
fn unclosed_blocks_remain_at_eof() {
    let out = Driver::new("a\n  b\n    c").tokenize();
    assert_eq!(out.indents.as_slice(), &[2, 4]);
    assert_eq!(out.dedents_emitted, 0);
}

#[test]
fn inadmissible_newline_falls_back_to_break() {
    let options = DriverOptions {
        admissible: TokenSet::INDENT | TokenSet::DEDENT | TokenSet::COMMENT,
        record_checkpoints: false,
    };
    let source = "a\r\n  b\n";
    let out = Driver::with_options(source, options).tokenize();
    let rendered: Vec<_> = out
        .lexemes
        .iter()
        .map(|l| (l.kind.name(), l.text(source)))
        .collect();
    assert_eq!(
        rendered,
        vec![
            ("TEXT", "a"),
            ("BREAK", "\r\n"),
            ("INDENT", ""),
            ("TEXT", "b"),
            ("BREAK", "\n"),
        ]
    );
    assert!(out.checkpoints.is_empty());
}

#[test]
fn inadmissible_comment_is_lexed_as_text() {
    let options = DriverOptions {
        admissible: TokenSet::all() - TokenSet::COMMENT,
        record_checkpoints: true,
    };
    let source = "#x y\n";
    let out = Driver::with_options(source, options).tokenize();
    let rendered: Vec<_> = out
        .lexemes
        .iter()
        .map(|l| (l.kind.name(), l.text(source)))
        .collect();
    assert_eq!(
        rendered,
        vec![("TEXT", "#"), ("TEXT", "x"), ("TEXT", "y"), ("NEWLINE", "\n")]
    );
}

// === Checkpoints ===

#[test]
fn checkpoint_after_each_structural_token() {
    let out = Driver::new("a\n    b\nc\n").tokenize();
    let offsets: Vec<u32> = out.checkpoints.iter().map(|c| c.offset).collect();
    assert_eq!(offsets, vec![2, 6, 8, 8, 10]);
    let states: Vec<&[u8]> = out.checkpoints.iter().map(|c| c.state.as_slice()).collect();
    assert_eq!(states, vec![&[0][..], &[1, 4], &[1, 4], &[0], &[0]]);
}

#[test]
fn resume_yields_the_suffix() {
    let source = "def f():\n    if x:\n        y\n    # c\n    z\nw\n";
    let full = Driver::new(source).tokenize();
    let external_positions: Vec<usize> = full
        .lexemes
        .iter()
        .enumerate()
        .filter(|(_, l)| matches!(l.kind, LexemeKind::External(_)))
        .map(|(i, _)| i)
        .collect();
    assert_eq!(external_positions.len(), full.checkpoints.len());

    for (k, checkpoint) in full.checkpoints.iter().enumerate() {
        let resumed = Driver::resume(source, checkpoint)
            .unwrap_or_else(|e| panic!("checkpoint {k}: {e}"))
            .tokenize();
        assert_eq!(resumed.lexemes, full.lexemes[external_positions[k] + 1..]);
        assert_eq!(resumed.checkpoints, full.checkpoints[k + 1..]);
        assert_eq!(resumed.indents, full.indents);
    }
}

#[test]
fn resume_past_end_is_an_error() {
    let checkpoint = Checkpoint {
        offset: 10,
        state: Snapshot::from_slice(&[0]),
    };
    let err = Driver::resume("abc", &checkpoint).err();
    assert_eq!(err, Some(DriverError::OffsetOutOfBounds { offset: 10, len: 3 }));
}

#[test]
fn resume_inside_character_is_an_error() {
    let checkpoint = Checkpoint {
        offset: 1,
        state: Snapshot::from_slice(&[0]),
    };
    let err = Driver::resume("\u{e9}", &checkpoint).err();
    assert_eq!(err, Some(DriverError::NotCharBoundary { offset: 1 }));
    assert_eq!(
        err.map(|e| e.to_string()),
        Some("checkpoint offset 1 is not on a character boundary".to_string())
    );
}

#[test]
fn resume_restores_stack_before_scanning() {
    let checkpoint = Checkpoint {
        offset: 0,
        state: Snapshot::from_slice(&[2, 4, 8]),
    };
    let driver = Driver::resume("  x\n", &checkpoint).unwrap_or_else(|e| panic!("{e}"));
    assert_eq!(driver.indents().as_slice(), &[4, 8]);
    let out = driver.tokenize();
    assert_eq!(out.external_kinds(), vec![TokenKind::Dedent, TokenKind::Newline]);
    assert_eq!(out.levels_closed, 2);
    assert!(out.indents.is_empty());
}

#[test]
fn long_single_line_tokenizes_in_one_pass() {
    let source = "a ".repeat(100_000);
    let out = Driver::new(&source).tokenize();
    assert_eq!(out.lexemes.len(), 100_000);
    assert!(out.lexemes.iter().all(|l| l.kind == LexemeKind::Text));
    assert_eq!(out.lexemes.last().map(|l| l.span), Some(Span::new(199_998, 199_999)));
    assert!(out.checkpoints.is_empty());
}
