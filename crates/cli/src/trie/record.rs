// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Pattern records: an insertion-ordered list with an exact-match index.
//!
//! Pattern bytes live in a dedicated string [`Arena`]; the index hashes
//! those bytes in place, so each pattern is stored once.

use std::hash::{BuildHasher, RandomState};

use hashbrown::HashTable;

use crate::arena::{Arena, ArenaError, Span};

/// Slot of a record in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RecordId(usize);

#[derive(Debug)]
struct Record<T> {
    pattern: Span,
    data: T,
    prev: Option<RecordId>,
    next: Option<RecordId>,
}

/// Doubly linked record list, newest first.
#[derive(Debug)]
pub(crate) struct Records<T> {
    slots: Vec<Option<Record<T>>>,
    vacant: Vec<RecordId>,
    head: Option<RecordId>,
    index: HashTable<RecordId>,
    hasher: RandomState,
    strings: Arena,
    total_len: usize,
}

impl<T> Records<T> {
    pub(crate) fn new(strings: Arena) -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
            head: None,
            index: HashTable::new(),
            hasher: RandomState::new(),
            strings,
            total_len: 0,
        }
    }

    /// Number of records.
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    /// Sum of all pattern lengths in bytes.
    pub(crate) fn total_len(&self) -> usize {
        self.total_len
    }

    pub(crate) fn lookup(&self, pattern: &[u8]) -> Option<RecordId> {
        let hash = self.hasher.hash_one(pattern);
        self.index
            .find(hash, |&id| pattern_of(&self.slots, &self.strings, id) == pattern)
            .copied()
    }

    /// Link a new record at the head of the list.
    ///
    /// Returns `Ok(None)` without touching the list when `pattern` is
    /// already present. Nothing is linked if the string copy fails.
    pub(crate) fn insert(&mut self, pattern: &[u8], data: T) -> Result<Option<RecordId>, ArenaError> {
        if self.lookup(pattern).is_some() {
            return Ok(None);
        }
        let span = self
            .strings
            .duplicate_string(Some(pattern))?
            .unwrap_or(Span::EMPTY);

        let record = Record {
            pattern: span,
            data,
            prev: None,
            next: self.head,
        };
        let id = match self.vacant.pop() {
            Some(id) => {
                self.slots[id.0] = Some(record);
                id
            }
            None => {
                self.slots.push(Some(record));
                RecordId(self.slots.len() - 1)
            }
        };
        if let Some(old_head) = self.head.and_then(|head| self.slot_mut(head)) {
            old_head.prev = Some(id);
        }
        self.head = Some(id);

        let hash = self.hasher.hash_one(pattern);
        let Self {
            index,
            slots,
            strings,
            hasher,
            ..
        } = self;
        index.insert_unique(hash, id, |&id| {
            hasher.hash_one(pattern_of(slots, strings, id))
        });
        self.total_len += pattern.len();
        Ok(Some(id))
    }

    /// Unlink the record for `pattern`, returning its data.
    pub(crate) fn remove(&mut self, pattern: &[u8]) -> Option<T> {
        let hash = self.hasher.hash_one(pattern);
        let Self {
            index,
            slots,
            strings,
            ..
        } = self;
        let entry = index
            .find_entry(hash, |&id| pattern_of(slots, strings, id) == pattern)
            .ok()?;
        let (id, _) = entry.remove();
        let record = self.slots.get_mut(id.0)?.take()?;

        match record.prev {
            Some(prev) => {
                if let Some(prev) = self.slot_mut(prev) {
                    prev.next = record.next;
                }
            }
            None => self.head = record.next,
        }
        if let Some(next) = record.next.and_then(|next| self.slot_mut(next)) {
            next.prev = record.prev;
        }
        self.vacant.push(id);
        self.total_len -= pattern.len();
        self.strings.free(record.pattern);

        if self.index.is_empty() {
            self.slots.clear();
            self.vacant.clear();
            self.strings.cleanup();
        }
        Some(record.data)
    }

    /// Pattern bytes and data of a record.
    pub(crate) fn get(&self, id: RecordId) -> Option<(&[u8], &T)> {
        let record = self.slots.get(id.0)?.as_ref()?;
        Some((self.strings.get(record.pattern)?, &record.data))
    }

    /// Records in list order (newest first).
    pub(crate) fn iter(&self) -> Iter<'_, T> {
        Iter {
            records: self,
            next: self.head,
        }
    }

    fn slot_mut(&mut self, id: RecordId) -> Option<&mut Record<T>> {
        self.slots.get_mut(id.0)?.as_mut()
    }
}

fn pattern_of<'a, T>(slots: &'a [Option<Record<T>>], strings: &'a Arena, id: RecordId) -> &'a [u8] {
    slots
        .get(id.0)
        .and_then(Option::as_ref)
        .and_then(|record| strings.get(record.pattern))
        .unwrap_or_default()
}

pub(crate) struct Iter<'a, T> {
    records: &'a Records<T>,
    next: Option<RecordId>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (RecordId, &'a [u8], &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let record = self.records.slots.get(id.0)?.as_ref()?;
        self.next = record.next;
        let pattern = self.records.strings.get(record.pattern).unwrap_or_default();
        Some((id, pattern, &record.data))
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
