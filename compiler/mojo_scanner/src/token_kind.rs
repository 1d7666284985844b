//! External token kinds and the admissible-kinds mask.
//!
//! The discriminants of [`TokenKind`] are the indices of the grammar's
//! `externals` array. The host passes one boolean per index to say which
//! kinds the parse state can accept, and reads the produced kind back as a
//! `TSSymbol` (`u16`).

use std::fmt;

use bitflags::bitflags;

/// Structural token produced by the scanner.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u16)]
pub enum TokenKind {
    /// Logical end of line (`\n`, `\r\n` or a lone `\r`).
    Newline = 0,
    /// A deeper block opened. Zero-width.
    Indent = 1,
    /// One or more blocks closed. Zero-width.
    Dedent = 2,
    /// Line comment from `#` up to, not including, the line break.
    Comment = 3,
}

impl TokenKind {
    /// All kinds, in `externals` order.
    pub const ALL: [TokenKind; 4] = [
        TokenKind::Newline,
        TokenKind::Indent,
        TokenKind::Dedent,
        TokenKind::Comment,
    ];

    /// Host symbol index of this kind.
    #[inline]
    pub const fn symbol(self) -> u16 {
        self as u16
    }

    /// Kind for a host symbol index, if it names one.
    pub const fn from_symbol(symbol: u16) -> Option<TokenKind> {
        match symbol {
            0 => Some(TokenKind::Newline),
            1 => Some(TokenKind::Indent),
            2 => Some(TokenKind::Dedent),
            3 => Some(TokenKind::Comment),
            _ => None,
        }
    }

    /// Returns `true` for kinds that never consume input.
    pub const fn is_zero_width(self) -> bool {
        matches!(self, TokenKind::Indent | TokenKind::Dedent)
    }

    /// Upper-case grammar name, as used in dumps.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::Newline => "NEWLINE",
            TokenKind::Indent => "INDENT",
            TokenKind::Dedent => "DEDENT",
            TokenKind::Comment => "COMMENT",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Kinds the grammar accepts at the current position.
    ///
    /// Bit `n` corresponds to the [`TokenKind`] with symbol `n`.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct TokenSet: u8 {
        const NEWLINE = 1 << 0;
        const INDENT = 1 << 1;
        const DEDENT = 1 << 2;
        const COMMENT = 1 << 3;
    }
}

impl TokenSet {
    /// Singleton set for `kind`.
    #[inline]
    pub const fn of(kind: TokenKind) -> TokenSet {
        TokenSet::from_bits_retain(1 << kind.symbol())
    }

    /// Returns `true` if `kind` is admissible.
    #[inline]
    pub const fn contains_kind(self, kind: TokenKind) -> bool {
        self.contains(TokenSet::of(kind))
    }

    /// Build a set from the host's per-symbol boolean array.
    ///
    /// Entries past the last kind are ignored; a short array leaves the
    /// missing kinds inadmissible.
    pub fn from_valid_symbols(valid: &[bool]) -> TokenSet {
        TokenKind::ALL
            .iter()
            .zip(valid)
            .filter(|(_, &ok)| ok)
            .fold(TokenSet::empty(), |set, (&kind, _)| set | TokenSet::of(kind))
    }
}

/// Half-open byte range `start..end` of a token in the source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Zero-width span at `pos`.
    #[inline]
    pub const fn point(pos: u32) -> Self {
        Span {
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub const fn len(self) -> u32 {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}
