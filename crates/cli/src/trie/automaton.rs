// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Suffix-linked automaton compiled from the record list.
//!
//! States are addressed by index. Each state that has children owns a
//! 256-slot transition table allocated from the automaton's [`Arena`], so
//! invalidating the automaton is one vector clear plus one arena cleanup.

use std::mem;

use super::record::{RecordId, Records};
use crate::arena::{Arena, ArenaError, Span};

/// Size of one transition slot (a `u32` state index, 0 = no child).
const SLOT: usize = mem::size_of::<u32>();

/// Bytes in a full transition table.
pub(crate) const TABLE_BYTES: usize = 256 * SLOT;

/// Pattern byte total above which table blocks switch to the large size.
pub(crate) const LARGE_THRESHOLD: usize = 70;

/// Tables per block for small pattern sets.
pub(crate) const SMALL_BLOCK_TABLES: usize = 30;

/// Tables per block for large pattern sets.
pub(crate) const LARGE_BLOCK_TABLES: usize = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct StateId(u32);

impl StateId {
    pub(crate) const ROOT: StateId = StateId(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug)]
struct State {
    parent: Option<StateId>,
    /// Longest proper suffix that is also a prefix in the automaton.
    suffix: StateId,
    /// Deepest registered pattern that is a suffix of this prefix.
    found: Option<RecordId>,
    children: Option<Span>,
}

impl State {
    fn new(parent: Option<StateId>) -> Self {
        Self {
            parent,
            suffix: StateId::ROOT,
            found: None,
            children: None,
        }
    }
}

struct Cursor<'a> {
    record: RecordId,
    pattern: &'a [u8],
    state: StateId,
}

#[derive(Debug)]
pub(crate) struct Automaton {
    states: Vec<State>,
    tables: Arena,
    built: bool,
}

impl Automaton {
    pub(crate) fn new(pooling: bool) -> Self {
        let tables = if pooling {
            Arena::with_block_size(SMALL_BLOCK_TABLES * TABLE_BYTES)
        } else {
            Arena::unpooled()
        };
        Self {
            states: Vec::new(),
            tables,
            built: false,
        }
    }

    pub(crate) fn is_built(&self) -> bool {
        self.built
    }

    pub(crate) fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Discard every state and transition table.
    pub(crate) fn invalidate(&mut self) {
        if self.built {
            tracing::trace!(states = self.states.len(), "automaton invalidated");
        }
        self.states.clear();
        self.tables.cleanup();
        self.built = false;
    }

    /// Compile `records` into a fresh automaton.
    ///
    /// Patterns are walked together one prefix length at a time, so when a
    /// level's new states are linked every shorter state is final.
    pub(crate) fn build<T>(&mut self, records: &Records<T>) -> Result<(), ArenaError> {
        self.invalidate();

        let tables = if records.total_len() > LARGE_THRESHOLD {
            LARGE_BLOCK_TABLES
        } else {
            SMALL_BLOCK_TABLES
        };
        self.tables.set_block_size(tables * TABLE_BYTES);
        self.states.push(State::new(None));

        let mut pending: Vec<Cursor<'_>> = records
            .iter()
            .map(|(record, pattern, _)| Cursor {
                record,
                pattern,
                state: StateId::ROOT,
            })
            .collect();
        pending.retain(|cursor| !cursor.pattern.is_empty());

        let mut created = Vec::new();
        let mut depth = 0;
        while !pending.is_empty() {
            created.clear();
            for cursor in &mut pending {
                let Some(&byte) = cursor.pattern.get(depth) else {
                    continue;
                };
                let next = match self.child(cursor.state, byte) {
                    Some(next) => next,
                    None => {
                        let next = self.add_child(cursor.state, byte)?;
                        created.push((next, byte));
                        next
                    }
                };
                cursor.state = next;
                if cursor.pattern.len() == depth + 1 {
                    self.mark_found(next, cursor.record);
                }
            }
            for &(state, byte) in &created {
                self.link(state, byte);
            }
            depth += 1;
            pending.retain(|cursor| cursor.pattern.len() > depth);
        }

        self.built = true;
        tracing::debug!(
            patterns = records.len(),
            states = self.states.len(),
            table_blocks = self.tables.block_count(),
            block_size = self.tables.block_size(),
            "automaton built"
        );
        Ok(())
    }

    /// Transition on `byte`, following suffix links on mismatch.
    pub(crate) fn next_state(&self, mut state: StateId, byte: u8) -> StateId {
        loop {
            if let Some(next) = self.child(state, byte) {
                return next;
            }
            match self.states.get(state.index()) {
                Some(current) if state != StateId::ROOT => state = current.suffix,
                _ => return StateId::ROOT,
            }
        }
    }

    /// Pattern reported when the scan stands on `state`.
    pub(crate) fn found(&self, state: StateId) -> Option<RecordId> {
        self.states.get(state.index())?.found
    }

    #[cfg(test)]
    pub(crate) fn table_block_size(&self) -> usize {
        self.tables.block_size()
    }

    #[cfg(test)]
    pub(crate) fn table_block_count(&self) -> usize {
        self.tables.block_count()
    }

    #[cfg(test)]
    pub(crate) fn suffix(&self, state: StateId) -> Option<StateId> {
        Some(self.states.get(state.index())?.suffix)
    }

    #[cfg(test)]
    pub(crate) fn parent(&self, state: StateId) -> Option<StateId> {
        self.states.get(state.index())?.parent
    }

    /// State reached from the root by spelling `prefix`, if it exists.
    #[cfg(test)]
    pub(crate) fn state_for(&self, prefix: &[u8]) -> Option<StateId> {
        prefix
            .iter()
            .try_fold(StateId::ROOT, |state, &byte| self.child(state, byte))
    }

    fn child(&self, state: StateId, byte: u8) -> Option<StateId> {
        let span = self.states.get(state.index())?.children?;
        let table = self.tables.get(span)?;
        let at = usize::from(byte) * SLOT;
        let raw = u32::from_ne_bytes(table.get(at..at + SLOT)?.try_into().ok()?);
        (raw != 0).then_some(StateId(raw))
    }

    fn add_child(&mut self, parent: StateId, byte: u8) -> Result<StateId, ArenaError> {
        let count = self.states.len();
        let id = StateId(u32::try_from(count).map_err(|_| ArenaError::SizeOverflow { size: count })?);

        let span = match self.states[parent.index()].children {
            Some(span) => span,
            None => {
                let span = self
                    .tables
                    .alloc0(TABLE_BYTES, SLOT)?
                    .ok_or(ArenaError::SizeOverflow { size: TABLE_BYTES })?;
                self.states[parent.index()].children = Some(span);
                span
            }
        };

        let at = usize::from(byte) * SLOT;
        let slot = self
            .tables
            .get_mut(span)
            .and_then(|table| table.get_mut(at..at + SLOT));
        debug_assert!(slot.is_some(), "transition table missing for state {parent:?}");
        if let Some(slot) = slot {
            slot.copy_from_slice(&id.0.to_ne_bytes());
        }

        self.states.push(State::new(Some(parent)));
        Ok(id)
    }

    fn mark_found(&mut self, state: StateId, record: RecordId) {
        let state = &mut self.states[state.index()];
        match state.found {
            Some(existing) if existing != record => {
                tracing::warn!("two patterns end on the same state; keeping the first");
            }
            _ => state.found = Some(record),
        }
    }

    /// Set the suffix link of a freshly created state and inherit its match.
    fn link(&mut self, state: StateId, byte: u8) {
        let parent = self.states[state.index()].parent.unwrap_or(StateId::ROOT);
        let suffix = if parent == StateId::ROOT {
            StateId::ROOT
        } else {
            let mut candidate = self.states[parent.index()].suffix;
            loop {
                if let Some(next) = self.child(candidate, byte) {
                    break next;
                }
                if candidate == StateId::ROOT {
                    break StateId::ROOT;
                }
                candidate = self.states[candidate.index()].suffix;
            }
        };

        let inherited = self.states[suffix.index()].found;
        let state = &mut self.states[state.index()];
        state.suffix = suffix;
        if state.found.is_none() {
            state.found = inherited;
        }
    }
}

#[cfg(test)]
#[path = "automaton_tests.rs"]
mod tests;
