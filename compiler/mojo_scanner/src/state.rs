//! Byte snapshot of an [`IndentStack`].
//!
//! The host copies this snapshot out between scans and hands it back before
//! re-lexing from a saved position, so decoding must reproduce exactly the
//! stack that was encoded.
//!
//! # Layout
//!
//! ```text
//! [count: u8][width_0: u8][width_1: u8]...[width_{count-1}: u8]
//! ```
//!
//! Widths are written bottom-to-top. There is no version field.
//!
//! # Precision
//!
//! Both the count and each width are truncated to a single byte (`as u8`).
//! A stack of 256 levels therefore encodes as count `0`, and a width of 260
//! encodes as `4`. Source indentation stays far below these limits in practice;
//! the truncation is a property of the format and is not reported.

use smallvec::SmallVec;

use crate::IndentStack;

/// Size of the buffer the host provides to [`serialize_into`].
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Largest snapshot the format can produce: one count byte and 255 widths.
pub const MAX_SERIALIZED_LEN: usize = 1 + u8::MAX as usize;

/// Owned snapshot. Typical nesting fits inline.
pub type Snapshot = SmallVec<[u8; 32]>;

/// Encode `stack` into a fresh snapshot.
pub fn serialize(stack: &IndentStack) -> Snapshot {
    let mut buf = [0u8; MAX_SERIALIZED_LEN];
    let len = serialize_into(stack, &mut buf);
    SmallVec::from_slice(&buf[..len])
}

/// Encode `stack` into `buffer`, returning the number of bytes written.
///
/// Writes at most [`MAX_SERIALIZED_LEN`] bytes. If `buffer` is shorter than
/// the encoding, only the prefix that fits is written.
#[allow(
    clippy::cast_possible_truncation,
    reason = "one-byte truncation is the snapshot format"
)]
pub fn serialize_into(stack: &IndentStack, buffer: &mut [u8]) -> usize {
    let Some((count_slot, width_slots)) = buffer.split_first_mut() else {
        return 0;
    };
    let count = stack.depth() as u8;
    *count_slot = count;

    let widths = &stack.as_slice()[..usize::from(count)];
    let written = widths.len().min(width_slots.len());
    for (slot, &width) in width_slots.iter_mut().zip(&widths[..written]) {
        *slot = width as u8;
    }
    1 + written
}

/// Restore `stack` from `bytes`.
///
/// An empty slice resets to the empty stack. A count larger than the bytes
/// that follow restores only the widths present; bytes past the last width
/// are ignored.
pub fn deserialize(stack: &mut IndentStack, bytes: &[u8]) {
    let Some((&count, rest)) = bytes.split_first() else {
        stack.clear();
        return;
    };
    let available = usize::from(count).min(rest.len());
    let widths: SmallVec<[u32; 32]> = rest[..available].iter().map(|&b| u32::from(b)).collect();
    *stack = IndentStack::from_widths(&widths);
}
