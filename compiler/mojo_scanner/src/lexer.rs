//! Host cursor abstraction and a string-backed implementation.
//!
//! The scanner never owns the source. It reads one character of lookahead at a
//! time from a [`Lexer`] and commits to consuming it with [`Lexer::advance`].
//! A character advanced with `skip = true` is trivia: the token start moves past
//! it, so the produced token's span excludes it.

use crate::Span;

/// Lookahead value at end of input.
pub(crate) const EOF_CHAR: char = '\0';

/// Character-level cursor supplied by the host.
pub trait Lexer {
    /// Current character, or `'\0'` at end of input.
    ///
    /// Interior NUL characters also read as `'\0'`; use
    /// [`is_eof()`](Self::is_eof) to tell them apart.
    fn lookahead(&self) -> char;

    /// Consume the current character.
    ///
    /// With `skip = true` the character becomes trivia and the token start
    /// moves past it. Does nothing at end of input.
    fn advance(&mut self, skip: bool);

    /// Characters between the most recent line break and the cursor.
    fn column(&mut self) -> u32;

    /// Returns `true` once every character has been consumed.
    fn is_eof(&self) -> bool;
}

/// Cursor over an in-memory `&str`.
///
/// Tracks the start of the token being scanned so the host can read back the
/// span of whatever the scanner produced.
///
/// # File Size
///
/// Positions are `u32`. Sources above `u32::MAX` bytes are truncated at that
/// length; the scanner never sees past it.
#[derive(Clone, Copy, Debug)]
pub struct SourceLexer<'a> {
    source: &'a str,
    /// Current byte offset (always on a character boundary).
    pos: u32,
    /// Start of the token being scanned (after any skipped trivia).
    token_start: u32,
    /// Length of the visible source.
    source_len: u32,
    /// Characters since the last line break, kept up to date by `advance`.
    column: u32,
}

impl<'a> SourceLexer<'a> {
    /// Create a cursor at offset 0.
    pub fn new(source: &'a str) -> Self {
        let source_len = u32::try_from(source.len()).unwrap_or(u32::MAX);
        Self {
            source,
            pos: 0,
            token_start: 0,
            source_len,
            column: 0,
        }
    }

    /// Current byte offset.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Length of the visible source in bytes.
    #[inline]
    pub fn source_len(&self) -> u32 {
        self.source_len
    }

    /// Span from the token start to the cursor.
    ///
    /// After a scan that produced a zero-width token this is an empty span at
    /// the cursor.
    #[inline]
    pub fn token_span(&self) -> Span {
        Span::new(self.token_start, self.pos)
    }

    /// Begin a new token at the cursor.
    #[inline]
    pub fn reset_token(&mut self) {
        self.token_start = self.pos;
    }

    /// Move the cursor (and token start) to `offset`.
    ///
    /// # Contract
    ///
    /// `offset` is at most [`source_len()`](Self::source_len) and lies on a
    /// character boundary.
    pub fn seek(&mut self, offset: u32) {
        debug_assert!(offset <= self.source_len, "seek past end: {offset}");
        debug_assert!(
            self.source.is_char_boundary(offset as usize),
            "seek into the middle of a character: {offset}"
        );
        self.pos = offset;
        self.token_start = offset;
        self.column = self.column_from_line_start();
    }

    /// Source text covered by `span`.
    ///
    /// Returns an empty string for a span that is out of range or not on
    /// character boundaries.
    pub fn slice(&self, span: Span) -> &'a str {
        self.source
            .get(span.start as usize..span.end as usize)
            .unwrap_or("")
    }

    /// Counts characters back to the last `\n` or `\r`, so a lone carriage
    /// return starts a line just like a line feed does.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "column is bounded by source_len, which fits in u32"
    )]
    fn column_from_line_start(&self) -> u32 {
        let before = self.source.as_bytes().get(..self.pos as usize).unwrap_or(&[]);
        let line_start = memchr::memrchr2(b'\n', b'\r', before).map_or(0, |i| i + 1);
        self.source
            .get(line_start..self.pos as usize)
            .map_or(0, |line| line.chars().count() as u32)
    }

    fn rest(&self) -> &'a str {
        self.source
            .get(self.pos as usize..self.source_len as usize)
            .unwrap_or("")
    }
}

impl Lexer for SourceLexer<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        self.rest().chars().next().unwrap_or(EOF_CHAR)
    }

    #[allow(
        clippy::cast_possible_truncation,
        reason = "len_utf8() is at most 4"
    )]
    fn advance(&mut self, skip: bool) {
        let Some(c) = self.rest().chars().next() else {
            return;
        };
        self.pos += c.len_utf8() as u32;
        self.column = if c == '\n' || c == '\r' {
            0
        } else {
            self.column.saturating_add(1)
        };
        if skip {
            self.token_start = self.pos;
        }
    }

    /// A lone carriage return starts a line just like a line feed does.
    #[inline]
    fn column(&mut self) -> u32 {
        self.column
    }

    #[inline]
    fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }
}
