//! Widths of the currently open indentation blocks.
//!
//! The stack never holds the baseline: an empty stack means the cursor is at
//! column 0 of the outermost block, and [`IndentStack::top`] reports `0`.

use smallvec::SmallVec;

/// Levels stored inline before the stack spills to the heap.
///
/// Source files rarely nest deeper than this; spilling doubles capacity.
const INLINE_LEVELS: usize = 16;

/// Ordered, strictly increasing sequence of indentation widths.
///
/// # Invariant
///
/// Bottom-to-top the widths are strictly increasing, and every width is
/// greater than the implicit baseline of `0`. The scanner upholds this by only
/// pushing widths above [`top()`](Self::top) and only popping widths above the
/// measured indentation. A stack restored from a snapshot is taken verbatim
/// (see [`from_widths`](Self::from_widths)).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndentStack {
    levels: SmallVec<[u32; INLINE_LEVELS]>,
}

impl IndentStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            levels: SmallVec::new(),
        }
    }

    /// Restore a stack from stored widths, bottom first.
    ///
    /// No ordering check is made: a snapshot must reproduce exactly what was
    /// saved, including any precision lost when it was written.
    pub fn from_widths(widths: &[u32]) -> Self {
        Self {
            levels: SmallVec::from_slice(widths),
        }
    }

    /// Width of the innermost open block, or `0` when no block is open.
    #[inline]
    pub fn top(&self) -> u32 {
        self.levels.last().copied().unwrap_or(0)
    }

    /// Open a block at `width`.
    ///
    /// # Contract
    ///
    /// `width > self.top()`.
    pub fn push(&mut self, width: u32) {
        debug_assert!(
            width > self.top(),
            "pushed width {width} must exceed top {}",
            self.top()
        );
        self.levels.push(width);
    }

    /// Close every block wider than `width`, returning how many were closed.
    ///
    /// # Contract
    ///
    /// Only called to shrink: `width < self.top()`.
    pub fn pop_to(&mut self, width: u32) -> usize {
        debug_assert!(
            width < self.top(),
            "pop_to({width}) must shrink a stack with top {}",
            self.top()
        );
        let before = self.levels.len();
        while self.levels.last().is_some_and(|&top| top > width) {
            self.levels.pop();
        }
        before - self.levels.len()
    }

    /// Number of open blocks.
    #[inline]
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Widths bottom-to-top.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.levels
    }

    /// Drop every level, keeping the allocation.
    pub fn clear(&mut self) {
        self.levels.clear();
    }

    /// Returns `true` if the widths are strictly increasing above `0`.
    pub fn is_strictly_increasing(&self) -> bool {
        let mut prev = 0;
        self.levels.iter().all(|&w| {
            let ok = w > prev;
            prev = w;
            ok
        })
    }
}
