//! Reference host loop.
//!
//! Plays the part of the incremental-parsing runtime: offers the scanner every
//! position, falls back to a trivial static tokenizer when the scanner declines,
//! and snapshots the scanner state after each structural token so a later run
//! can resume mid-document.
//!
//! # Resuming
//!
//! A [`Checkpoint`] pairs a byte offset with the serialized indent stack at
//! that offset. [`Driver::resume`] restores a fresh scanner from the snapshot
//! and continues from the offset; the lexemes it produces are exactly those the
//! uninterrupted run produced after the checkpoint.

use tracing::debug;

use crate::state::Snapshot;
use crate::{IndentStack, Lexer, Scanner, SourceLexer, Span, TokenKind, TokenSet, COMMENT_START};

/// What produced a [`Lexeme`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum LexemeKind {
    /// Structural token from the scanner.
    External(TokenKind),
    /// Run of non-blank text lexed by the host.
    Text,
    /// Line break the host consumed because `NEWLINE` was not admissible.
    Break,
}

impl LexemeKind {
    /// Short name for dumps.
    pub fn name(self) -> &'static str {
        match self {
            LexemeKind::External(kind) => kind.name(),
            LexemeKind::Text => "TEXT",
            LexemeKind::Break => "BREAK",
        }
    }
}

/// One token of the host's token stream.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Lexeme {
    pub kind: LexemeKind,
    pub span: Span,
}

impl Lexeme {
    /// Source text of this lexeme. Empty for zero-width tokens.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source
            .get(self.span.start as usize..self.span.end as usize)
            .unwrap_or("")
    }
}

/// Scanner state saved right after a structural token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Checkpoint {
    /// Byte offset the scan resumes from.
    pub offset: u32,
    /// Serialized indent stack at `offset`.
    pub state: Snapshot,
}

/// Host behaviour knobs.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DriverOptions {
    /// Kinds offered to the scanner at every position.
    pub admissible: TokenSet,
    /// Record a [`Checkpoint`] after each structural token.
    pub record_checkpoints: bool,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            admissible: TokenSet::all(),
            record_checkpoints: true,
        }
    }
}

/// Error restoring a driver from a checkpoint.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DriverError {
    #[error("checkpoint offset {offset} is past the end of the source ({len} bytes)")]
    OffsetOutOfBounds { offset: u32, len: u32 },
    #[error("checkpoint offset {offset} is not on a character boundary")]
    NotCharBoundary { offset: u32 },
}

/// Result of a driver run.
#[derive(Clone, Debug, Default)]
pub struct Tokenized {
    pub lexemes: Vec<Lexeme>,
    pub checkpoints: Vec<Checkpoint>,
    /// Indent stack when the input ran out.
    pub indents: IndentStack,
    /// `INDENT` tokens emitted.
    pub indents_emitted: usize,
    /// `DEDENT` tokens emitted.
    pub dedents_emitted: usize,
    /// Stack levels closed by those `DEDENT`s (one `DEDENT` may close several).
    pub levels_closed: usize,
}

impl Tokenized {
    /// Kinds of the structural tokens, in order.
    pub fn external_kinds(&self) -> Vec<TokenKind> {
        self.lexemes
            .iter()
            .filter_map(|lexeme| match lexeme.kind {
                LexemeKind::External(kind) => Some(kind),
                LexemeKind::Text | LexemeKind::Break => None,
            })
            .collect()
    }
}

/// Host loop over an in-memory source.
pub struct Driver<'a> {
    lexer: SourceLexer<'a>,
    scanner: Scanner,
    options: DriverOptions,
}

impl<'a> Driver<'a> {
    /// Driver at the start of `source` with default options.
    pub fn new(source: &'a str) -> Self {
        Self::with_options(source, DriverOptions::default())
    }

    pub fn with_options(source: &'a str, options: DriverOptions) -> Self {
        Self {
            lexer: SourceLexer::new(source),
            scanner: Scanner::new(),
            options,
        }
    }

    /// Driver restored from `checkpoint` with default options.
    pub fn resume(source: &'a str, checkpoint: &Checkpoint) -> Result<Self, DriverError> {
        Self::resume_with_options(source, checkpoint, DriverOptions::default())
    }

    pub fn resume_with_options(
        source: &'a str,
        checkpoint: &Checkpoint,
        options: DriverOptions,
    ) -> Result<Self, DriverError> {
        let mut driver = Self::with_options(source, options);
        let offset = checkpoint.offset;
        let len = driver.lexer.source_len();
        if offset > len {
            return Err(DriverError::OffsetOutOfBounds { offset, len });
        }
        if !source.is_char_boundary(offset as usize) {
            return Err(DriverError::NotCharBoundary { offset });
        }
        driver.lexer.seek(offset);
        driver.scanner.deserialize(&checkpoint.state);
        Ok(driver)
    }

    /// Current indent stack.
    pub fn indents(&self) -> &IndentStack {
        self.scanner.indents()
    }

    /// Run to the end of the input.
    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(len = self.lexer.source_len(), from = self.lexer.pos())
    )]
    pub fn tokenize(mut self) -> Tokenized {
        let mut out = Tokenized::default();

        while !self.lexer.is_eof() {
            let before = self.lexer.pos();
            let depth_before = self.scanner.indents().depth();
            self.lexer.reset_token();

            if let Some(kind) = self.scanner.scan(&mut self.lexer, self.options.admissible) {
                out.lexemes.push(Lexeme {
                    kind: LexemeKind::External(kind),
                    span: self.lexer.token_span(),
                });
                match kind {
                    TokenKind::Indent => out.indents_emitted += 1,
                    TokenKind::Dedent => {
                        out.dedents_emitted += 1;
                        out.levels_closed += depth_before - self.scanner.indents().depth();
                    }
                    TokenKind::Newline | TokenKind::Comment => {}
                }
                if self.options.record_checkpoints {
                    out.checkpoints.push(Checkpoint {
                        offset: self.lexer.pos(),
                        state: self.scanner.serialize(),
                    });
                }
                continue;
            }

            // Declined: keep any trivia the scanner consumed, and lex statically
            // only if it consumed nothing.
            if self.lexer.pos() == before {
                out.lexemes.push(self.static_lexeme());
            }
        }

        out.indents = self.scanner.indents().clone();
        debug!(
            lexemes = out.lexemes.len(),
            depth = out.indents.depth(),
            "tokenized"
        );
        out
    }

    /// The host's static fallback. Always consumes at least one character.
    fn static_lexeme(&mut self) -> Lexeme {
        self.lexer.reset_token();
        let first = self.lexer.lookahead();
        let kind = if first == '\r' || first == '\n' {
            self.lexer.advance(false);
            if first == '\r' && self.lexer.lookahead() == '\n' {
                self.lexer.advance(false);
            }
            LexemeKind::Break
        } else {
            self.lexer.advance(false);
            if first != COMMENT_START {
                loop {
                    let c = self.lexer.lookahead();
                    if self.lexer.is_eof() || c.is_whitespace() || c == COMMENT_START {
                        break;
                    }
                    self.lexer.advance(false);
                }
            }
            LexemeKind::Text
        };
        Lexeme {
            kind,
            span: self.lexer.token_span(),
        }
    }
}

#[cfg(test)]
mod tests;
