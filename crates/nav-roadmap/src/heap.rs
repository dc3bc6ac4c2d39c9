//! Flat-array open set for A*.
//!
//! Not a binary heap: open vertices sit unordered in a slot array and the
//! slot holding the minimum is tracked incrementally.
//!
//! | Operation    | Cost | Notes                                              |
//! |--------------|------|----------------------------------------------------|
//! | `push`       | O(1) | compares against the cached minimum                |
//! | `pop`        | O(n) | swap-remove, then rescan for the new minimum       |
//! | `set_f`      | O(n) worst | locate the slot only if the key becomes the new minimum |
//! | `is_open`    | O(1) | flag array keyed by vertex id                      |
//! | `is_closed`  | O(1) | flag array keyed by vertex id                      |
//!
//! On the small-to-medium graphs typical of roadmaps the linear rescans are
//! cheaper than heap bookkeeping.  Keys compare as `(f, vertex id)`, so equal
//! `f` values always resolve to the lowest id and search results do not depend
//! on slot order.

use nav_core::VertexId;

use crate::scratch::SearchScratch;

pub(crate) struct OpenSet<'s> {
    s:        &'s mut SearchScratch,
    len:      usize,
    min_slot: usize,
}

impl<'s> OpenSet<'s> {
    /// Reset `scratch` for a graph of `vertex_count` vertices and wrap it.
    pub fn new(scratch: &'s mut SearchScratch, vertex_count: usize) -> Self {
        scratch.reset(vertex_count);
        Self { s: scratch, len: 0, min_slot: 0 }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // ── Per-vertex search values ──────────────────────────────────────────

    #[inline]
    pub fn g(&self, v: VertexId) -> f32 {
        self.s.g[v.index()]
    }

    #[inline]
    pub fn set_g(&mut self, v: VertexId, g: f32) {
        self.s.g[v.index()] = g;
    }

    #[inline]
    pub fn h(&self, v: VertexId) -> f32 {
        self.s.h[v.index()]
    }

    #[inline]
    pub fn set_h(&mut self, v: VertexId, h: f32) {
        self.s.h[v.index()] = h;
    }

    #[inline]
    pub fn came_from(&self, v: VertexId) -> VertexId {
        self.s.came_from[v.index()]
    }

    #[inline]
    pub fn set_came_from(&mut self, v: VertexId, from: VertexId) {
        self.s.came_from[v.index()] = from;
    }

    #[inline]
    pub fn is_open(&self, v: VertexId) -> bool {
        self.s.open[v.index()]
    }

    #[inline]
    pub fn is_closed(&self, v: VertexId) -> bool {
        self.s.closed[v.index()]
    }

    // ── Open-set maintenance ──────────────────────────────────────────────

    /// Insert an unseen vertex with key `f`.
    pub fn push(&mut self, v: VertexId, f: f32) {
        debug_assert!(!self.is_open(v) && !self.is_closed(v));
        self.s.f[v.index()] = f;
        self.s.open[v.index()] = true;

        let slot = self.len;
        self.s.slots[slot] = v;
        self.len += 1;

        if slot == 0 || self.precedes(v, self.s.slots[self.min_slot]) {
            self.min_slot = slot;
        }
    }

    /// Remove and close the vertex with the minimum key.
    pub fn pop(&mut self) -> Option<VertexId> {
        if self.is_empty() {
            return None;
        }
        let v = self.s.slots[self.min_slot];
        self.s.open[v.index()] = false;
        self.s.closed[v.index()] = true;

        self.len -= 1;
        if self.min_slot != self.len {
            self.s.slots[self.min_slot] = self.s.slots[self.len];
        }
        self.rescan();
        Some(v)
    }

    /// Change the key of a vertex already in the open set.
    pub fn set_f(&mut self, v: VertexId, f: f32) {
        debug_assert!(self.is_open(v));
        self.s.f[v.index()] = f;

        let current = self.s.slots[self.min_slot];
        if v == current {
            // The minimum itself moved; only an increase can unseat it.
            self.rescan();
        } else if self.precedes(v, current) {
            if let Some(slot) = self.s.slots[..self.len].iter().position(|&x| x == v) {
                self.min_slot = slot;
            }
        }
    }

    /// `(f, id)` ordering.
    #[inline]
    fn precedes(&self, a: VertexId, b: VertexId) -> bool {
        let fa = self.s.f[a.index()];
        let fb = self.s.f[b.index()];
        fa < fb || (fa == fb && a < b)
    }

    fn rescan(&mut self) {
        self.min_slot = 0;
        for slot in 1..self.len {
            if self.precedes(self.s.slots[slot], self.s.slots[self.min_slot]) {
                self.min_slot = slot;
            }
        }
    }
}
