//! Token classifier and scanner lifecycle.
//!
//! # Decision order
//!
//! Each call to [`Scanner::scan`] looks at the lookahead and, in order:
//!
//! 1. `#` with `COMMENT` admissible: consume up to the line break, emit `COMMENT`.
//! 2. Skip horizontal whitespace as trivia, measuring its width.
//! 3. A line break with `NEWLINE` admissible: consume `\r`? `\n`?, emit `NEWLINE`.
//! 4. A line break or end of input: no token.
//! 5. Mid-line calls stop here: only leading whitespace is indentation.
//! 6. A blank or comment-only line: no token, the stack is untouched.
//! 7. Compare the measured width with the stack top and emit a zero-width
//!    `INDENT` or `DEDENT` if admissible.
//!
//! Whitespace consumed in step 2 stays consumed whatever the outcome. A call
//! that returns `None` tells the host to fall back to its static tokens.

use tracing::trace;

use crate::state::{self, Snapshot};
use crate::{IndentStack, Lexer, TokenKind, TokenSet};

/// Character that opens a line comment.
pub const COMMENT_START: char = '#';

/// Width a tab adds to the indentation. Tabs do not round to tab stops.
pub const TAB_WIDTH: u32 = 8;

#[inline]
fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Width `c` contributes to indentation, or `None` if it is not horizontal
/// whitespace.
///
/// Vertical tab, form feed and the invisible extras the grammar allows
/// (BOM, word joiner, zero-width space) are trivia of width 0. Unicode line
/// terminators such as U+2028 are not whitespace here.
#[inline]
fn indent_width(c: char) -> Option<u32> {
    match c {
        ' ' => Some(1),
        '\t' => Some(TAB_WIDTH),
        '\x0b' | '\x0c' | '\u{feff}' | '\u{2060}' | '\u{200b}' => Some(0),
        _ => None,
    }
}

/// Stateful external scanner.
///
/// One instance per parse. The only state is the [`IndentStack`]; `scan` is a
/// pure function of that stack, the admissible set and the cursor content.
#[derive(Clone, Debug, Default)]
pub struct Scanner {
    indents: IndentStack,
}

impl Scanner {
    /// Create a scanner with no open blocks.
    pub fn new() -> Self {
        Self {
            indents: IndentStack::new(),
        }
    }

    /// Close every open block.
    pub fn reset(&mut self) {
        self.indents.clear();
    }

    /// The open blocks.
    #[inline]
    pub fn indents(&self) -> &IndentStack {
        &self.indents
    }

    /// Classify the upcoming input.
    ///
    /// Returns the produced kind, or `None` when no admissible structural
    /// token applies. On `Some`, the token's span is whatever the cursor
    /// consumed without skipping; `INDENT` and `DEDENT` consume nothing.
    pub fn scan(&mut self, lexer: &mut impl Lexer, valid: TokenSet) -> Option<TokenKind> {
        if valid.contains(TokenSet::COMMENT) && lexer.lookahead() == COMMENT_START {
            lexer.advance(false);
            while !is_line_break(lexer.lookahead()) && !lexer.is_eof() {
                lexer.advance(false);
            }
            return Some(self.emit(TokenKind::Comment, 0));
        }

        // The column only matters for INDENT/DEDENT.
        let at_line_start =
            valid.intersects(TokenSet::INDENT | TokenSet::DEDENT) && lexer.column() == 0;
        let mut width: u32 = 0;
        while let Some(w) = indent_width(lexer.lookahead()) {
            width = width.saturating_add(w);
            lexer.advance(true);
        }

        let next = lexer.lookahead();
        if is_line_break(next) {
            if !valid.contains(TokenSet::NEWLINE) {
                return None;
            }
            if next == '\r' {
                lexer.advance(false);
            }
            if lexer.lookahead() == '\n' {
                lexer.advance(false);
            }
            return Some(self.emit(TokenKind::Newline, width));
        }
        if lexer.is_eof() {
            return None;
        }

        if !at_line_start || next == COMMENT_START {
            return None;
        }

        let current = self.indents.top();
        if width > current && valid.contains(TokenSet::INDENT) {
            self.indents.push(width);
            return Some(self.emit(TokenKind::Indent, width));
        }
        if width < current && valid.contains(TokenSet::DEDENT) {
            let closed = self.indents.pop_to(width);
            trace!(closed, "closed indentation levels");
            return Some(self.emit(TokenKind::Dedent, width));
        }
        None
    }

    fn emit(&self, kind: TokenKind, width: u32) -> TokenKind {
        trace!(%kind, width, depth = self.indents.depth(), "scanned");
        kind
    }

    /// Snapshot of the indent stack (see [`state`] for the layout).
    pub fn serialize(&self) -> Snapshot {
        state::serialize(&self.indents)
    }

    /// Write the snapshot into a host buffer, returning its length.
    pub fn serialize_into(&self, buffer: &mut [u8]) -> usize {
        state::serialize_into(&self.indents, buffer)
    }

    /// Restore the indent stack from a snapshot. Empty input resets it.
    pub fn deserialize(&mut self, bytes: &[u8]) {
        state::deserialize(&mut self.indents, bytes);
    }
}
