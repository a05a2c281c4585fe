// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bump-pointer arena with block chaining.
//!
//! Allocations are carved out of large blocks and released together by
//! [`Arena::cleanup`]. Handles are offsets into a block tagged with the arena
//! generation, so a [`Span`] that outlives a cleanup resolves to `None`
//! instead of aliasing newer data.
//!
//! - Allocation: O(1), aligns and bumps the tail block's cursor
//! - Cleanup: O(blocks), never O(objects)

use std::mem;

/// Size of a block created when no explicit size was configured.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// Largest alignment an allocation may request (pointer size).
pub const MAX_ALIGN: usize = mem::size_of::<usize>();

/// Slack added to request-sized blocks so any alignment up to [`MAX_ALIGN`] fits.
pub const BLOCK_PADDING: usize = MAX_ALIGN;

/// Error during arena allocation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArenaError {
    /// Alignment is not a power of two or exceeds pointer size.
    #[error("invalid alignment {0}: must be a power of two no larger than pointer size")]
    InvalidAlignment(usize),

    /// Request size overflows the block size accounting.
    #[error("allocation of {size} bytes overflows block accounting")]
    SizeOverflow { size: usize },

    /// The platform allocator could not provide a new block.
    #[error("out of memory allocating a {size} byte block")]
    OutOfMemory { size: usize },
}

/// Handle to a byte range handed out by an [`Arena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    generation: u64,
    block: usize,
    offset: usize,
    len: usize,
}

impl Span {
    /// Zero-length span; resolves to an empty slice in every arena.
    pub const EMPTY: Span = Span {
        generation: 0,
        block: 0,
        offset: 0,
        len: 0,
    };

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

#[derive(Debug)]
struct Block {
    data: Box<[u8]>,
    /// Next free offset; the block ends at `data.len()`.
    free: usize,
}

impl Block {
    fn with_capacity(size: usize) -> Result<Self, ArenaError> {
        let mut data = Vec::new();
        data.try_reserve_exact(size)
            .map_err(|_| ArenaError::OutOfMemory { size })?;
        data.resize(size, 0);
        Ok(Self {
            data: data.into_boxed_slice(),
            free: 0,
        })
    }

    /// Offset at which `size` bytes aligned to `align` would start, if they fit.
    fn fit(&self, size: usize, align: usize) -> Result<Option<usize>, ArenaError> {
        let overflow = ArenaError::SizeOverflow { size };
        let base = self.data.as_ptr() as usize;
        let cursor = base.checked_add(self.free).ok_or(overflow.clone())?;
        let aligned = cursor.checked_add(align - 1).ok_or(overflow.clone())? & !(align - 1);
        let start = aligned - base;
        let end = start.checked_add(size).ok_or(overflow)?;
        Ok((end <= self.data.len()).then_some(start))
    }

    fn release(&mut self) {
        self.data = Box::default();
        self.free = 0;
    }
}

/// Bump allocator handing out aligned ranges of chained blocks.
#[derive(Debug)]
pub struct Arena {
    block_size: usize,
    pooling: bool,
    blocks: Vec<Block>,
    generation: u64,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new()
    }
}

impl Arena {
    /// Create a pooled arena with [`DEFAULT_BLOCK_SIZE`] blocks.
    pub fn new() -> Self {
        Self::with_block_size(DEFAULT_BLOCK_SIZE)
    }

    /// Create a pooled arena with the given block size.
    ///
    /// A size of zero selects [`DEFAULT_BLOCK_SIZE`].
    pub fn with_block_size(block_size: usize) -> Self {
        Self {
            block_size: normalize_block_size(block_size),
            pooling: true,
            blocks: Vec::new(),
            generation: 0,
        }
    }

    /// Create an arena that gives every request its own allocation.
    ///
    /// Used for diagnostics: [`Arena::free`] actually releases memory in
    /// this mode, so allocator tooling sees each object separately.
    pub fn unpooled() -> Self {
        Self {
            pooling: false,
            ..Self::new()
        }
    }

    pub fn is_pooling(&self) -> bool {
        self.pooling
    }

    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Change the size of blocks created from now on.
    ///
    /// Existing blocks keep their capacity.
    pub fn set_block_size(&mut self, block_size: usize) {
        self.block_size = normalize_block_size(block_size);
    }

    /// Number of blocks currently in the chain.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Capacity of each block in chain order.
    pub fn block_capacities(&self) -> impl Iterator<Item = usize> + '_ {
        self.blocks.iter().map(|block| block.data.len())
    }

    /// Allocate `size` bytes aligned to `align`.
    ///
    /// Returns `Ok(None)` for a zero-size request, which has no side
    /// effects. The returned span stays valid until [`Arena::cleanup`].
    pub fn alloc(&mut self, size: usize, align: usize) -> Result<Option<Span>, ArenaError> {
        if size == 0 {
            return Ok(None);
        }
        if !align.is_power_of_two() || align > MAX_ALIGN {
            return Err(ArenaError::InvalidAlignment(align));
        }

        if self.pooling
            && let Some(tail) = self.blocks.len().checked_sub(1)
            && let Some(offset) = self.blocks[tail].fit(size, align)?
        {
            return Ok(Some(self.commit(tail, offset, size)));
        }

        let padded = size
            .checked_add(BLOCK_PADDING)
            .ok_or(ArenaError::SizeOverflow { size })?;
        let capacity = if self.pooling {
            padded.max(self.block_size)
        } else {
            padded
        };
        self.blocks.push(Block::with_capacity(capacity)?);

        let tail = self.blocks.len() - 1;
        match self.blocks[tail].fit(size, align)? {
            Some(offset) => Ok(Some(self.commit(tail, offset, size))),
            None => Err(ArenaError::SizeOverflow { size }),
        }
    }

    /// Allocate like [`Arena::alloc`], with the range zero-filled.
    pub fn alloc0(&mut self, size: usize, align: usize) -> Result<Option<Span>, ArenaError> {
        let span = self.alloc(size, align)?;
        if let Some(bytes) = span.and_then(|span| self.get_mut(span)) {
            bytes.fill(0);
        }
        Ok(span)
    }

    /// Return a span to the arena.
    ///
    /// A no-op while pooling; space is only reclaimed by [`Arena::cleanup`].
    /// Without pooling the span's dedicated allocation is released.
    pub fn free(&mut self, span: Span) {
        if self.pooling || span.is_empty() || span.generation != self.generation {
            return;
        }
        if let Some(block) = self.blocks.get_mut(span.block) {
            block.release();
        }
    }

    /// Release every block and start over with an empty chain.
    ///
    /// Spans handed out before the call no longer resolve.
    pub fn cleanup(&mut self) {
        if !self.blocks.is_empty() {
            tracing::trace!(blocks = self.blocks.len(), "arena cleanup");
        }
        self.blocks.clear();
        self.generation = self.generation.wrapping_add(1);
    }

    /// Copy `text` into the arena.
    ///
    /// Absent input yields absent output; empty input yields [`Span::EMPTY`].
    pub fn duplicate_string(&mut self, text: Option<&[u8]>) -> Result<Option<Span>, ArenaError> {
        let Some(text) = text else {
            return Ok(None);
        };
        if text.is_empty() {
            return Ok(Some(Span::EMPTY));
        }
        let span = self.alloc(text.len(), 1)?;
        if let Some(bytes) = span.and_then(|span| self.get_mut(span)) {
            bytes.copy_from_slice(text);
        }
        Ok(span)
    }

    /// Resolve a span to its bytes.
    ///
    /// Returns `None` for spans from before the last cleanup, from another
    /// arena's chain, or released by [`Arena::free`].
    pub fn get(&self, span: Span) -> Option<&[u8]> {
        if span.is_empty() {
            return Some(&[]);
        }
        if span.generation != self.generation {
            return None;
        }
        let end = span.offset.checked_add(span.len)?;
        self.blocks.get(span.block)?.data.get(span.offset..end)
    }

    pub fn get_mut(&mut self, span: Span) -> Option<&mut [u8]> {
        if span.is_empty() {
            return Some(&mut []);
        }
        if span.generation != self.generation {
            return None;
        }
        let end = span.offset.checked_add(span.len)?;
        self.blocks.get_mut(span.block)?.data.get_mut(span.offset..end)
    }

    fn commit(&mut self, block: usize, offset: usize, size: usize) -> Span {
        self.blocks[block].free = offset + size;
        Span {
            generation: self.generation,
            block,
            offset,
            len: size,
        }
    }
}

fn normalize_block_size(size: usize) -> usize {
    if size == 0 { DEFAULT_BLOCK_SIZE } else { size }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
