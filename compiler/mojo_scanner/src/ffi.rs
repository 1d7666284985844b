//! tree-sitter external scanner entry points.
//!
//! The generated parser looks these symbols up by name
//! (`tree_sitter_<language>_external_scanner_<op>`) and calls them with an
//! opaque payload created by `create`. The payload is a boxed [`Scanner`].
//!
//! # Safety
//!
//! Pointers come from the tree-sitter runtime. Null payloads, lexers and
//! buffers are tolerated; non-null pointers are trusted to be valid for the
//! documented sizes.

#![allow(
    unsafe_code,
    reason = "C ABI boundary with the tree-sitter runtime requires raw pointers"
)]

use std::ffi::{c_char, c_uint, c_void};
use std::ptr::NonNull;

use crate::lexer::EOF_CHAR;
use crate::state::SERIALIZATION_BUFFER_SIZE;
use crate::{Lexer, Scanner, TokenKind, TokenSet};

/// Mirror of tree-sitter's `TSLexer` (`tree_sitter/parser.h`).
///
/// Only the leading fields are declared; the runtime may append more (such as
/// `log`) which the scanner never touches.
#[repr(C)]
pub struct TSLexer {
    pub lookahead: i32,
    pub result_symbol: u16,
    pub advance: Option<unsafe extern "C" fn(*mut TSLexer, bool)>,
    pub mark_end: Option<unsafe extern "C" fn(*mut TSLexer)>,
    pub get_column: Option<unsafe extern "C" fn(*mut TSLexer) -> u32>,
    pub is_at_included_range_start: Option<unsafe extern "C" fn(*const TSLexer) -> bool>,
    pub eof: Option<unsafe extern "C" fn(*const TSLexer) -> bool>,
}

/// Column reported when the runtime gives no `get_column` callback.
const UNKNOWN_COLUMN: u32 = u32::MAX;

/// [`Lexer`] over a runtime-owned `TSLexer`.
struct HostLexer {
    raw: NonNull<TSLexer>,
}

impl Lexer for HostLexer {
    fn lookahead(&self) -> char {
        // SAFETY: `raw` is the non-null lexer passed to `scan`, live for the call.
        let code = unsafe { self.raw.as_ref().lookahead };
        match u32::try_from(code) {
            Ok(0) => EOF_CHAR,
            Ok(code) => char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
            Err(_) => char::REPLACEMENT_CHARACTER,
        }
    }

    fn advance(&mut self, skip: bool) {
        // SAFETY: as above; the callback receives the pointer it was installed for.
        unsafe {
            if let Some(advance) = self.raw.as_ref().advance {
                advance(self.raw.as_ptr(), skip);
            }
        }
    }

    /// A runtime without `get_column` breaks the host contract. The column is
    /// then unknown and never reported as a line start, so such a host gets no
    /// `INDENT` or `DEDENT` tokens at all.
    fn column(&mut self) -> u32 {
        // SAFETY: as above.
        unsafe {
            match self.raw.as_ref().get_column {
                Some(get_column) => get_column(self.raw.as_ptr()),
                None => UNKNOWN_COLUMN,
            }
        }
    }

    fn is_eof(&self) -> bool {
        // SAFETY: as above.
        unsafe {
            match self.raw.as_ref().eof {
                Some(eof) => eof(self.raw.as_ptr()),
                None => self.raw.as_ref().lookahead == 0,
            }
        }
    }
}

/// Allocate a scanner with an empty indent stack.
#[no_mangle]
pub extern "C" fn tree_sitter_mojo_external_scanner_create() -> *mut c_void {
    Box::into_raw(Box::new(Scanner::new())).cast()
}

/// Release a scanner returned by `create`.
///
/// # Safety
///
/// `payload` is null or came from `create` and has not been destroyed.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_mojo_external_scanner_destroy(payload: *mut c_void) {
    if !payload.is_null() {
        // SAFETY: caller contract; ownership returns to the box.
        drop(unsafe { Box::from_raw(payload.cast::<Scanner>()) });
    }
}

/// Scan one token. On `true`, `lexer.result_symbol` holds the [`TokenKind`].
///
/// # Safety
///
/// `payload` came from `create`; `lexer` is the runtime's live lexer;
/// `valid_symbols` points at one `bool` per external token (4 entries).
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_mojo_external_scanner_scan(
    payload: *mut c_void,
    lexer: *mut TSLexer,
    valid_symbols: *const bool,
) -> bool {
    // SAFETY: caller contract.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_mut() }) else {
        return false;
    };
    let Some(raw) = NonNull::new(lexer) else {
        return false;
    };
    if valid_symbols.is_null() {
        return false;
    }
    // SAFETY: the runtime passes one entry per external token.
    let valid = unsafe { std::slice::from_raw_parts(valid_symbols, TokenKind::ALL.len()) };

    let mut host = HostLexer { raw };
    match scanner.scan(&mut host, TokenSet::from_valid_symbols(valid)) {
        Some(kind) => {
            // SAFETY: `raw` is live; no other reference to it is held here.
            unsafe { (*raw.as_ptr()).result_symbol = kind.symbol() };
            true
        }
        None => false,
    }
}

/// Write the scanner state into the runtime's buffer and return its length.
///
/// # Safety
///
/// `payload` came from `create`; `buffer` is null or holds
/// [`SERIALIZATION_BUFFER_SIZE`] writable bytes.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_mojo_external_scanner_serialize(
    payload: *mut c_void,
    buffer: *mut c_char,
) -> c_uint {
    // SAFETY: caller contract.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_ref() }) else {
        return 0;
    };
    if buffer.is_null() {
        return 0;
    }
    // SAFETY: caller contract on buffer size.
    let out = unsafe { std::slice::from_raw_parts_mut(buffer.cast::<u8>(), SERIALIZATION_BUFFER_SIZE) };
    let written = scanner.serialize_into(out);
    c_uint::try_from(written).unwrap_or(0)
}

/// Restore the scanner state from `length` bytes at `buffer`.
///
/// A zero length resets the indent stack.
///
/// # Safety
///
/// `payload` came from `create`; `buffer` is null or holds `length`
/// readable bytes.
#[no_mangle]
pub unsafe extern "C" fn tree_sitter_mojo_external_scanner_deserialize(
    payload: *mut c_void,
    buffer: *const c_char,
    length: c_uint,
) {
    // SAFETY: caller contract.
    let Some(scanner) = (unsafe { payload.cast::<Scanner>().as_mut() }) else {
        return;
    };
    if buffer.is_null() || length == 0 {
        scanner.reset();
        return;
    }
    // SAFETY: caller contract on buffer length.
    let bytes = unsafe { std::slice::from_raw_parts(buffer.cast::<u8>(), length as usize) };
    scanner.deserialize(bytes);
}
