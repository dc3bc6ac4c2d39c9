//! Reusable A* working memory.
//!
//! One search over an N-vertex roadmap needs 3N floats (`f`, `g`, `h`), 2N
//! flags (open, closed), N open-set slots and N predecessor links.  A
//! [`SearchScratch`] holds exactly that and is reinitialised at the start of
//! every search, so steady-state path queries never allocate.
//!
//! Concurrent searches must not share a block.  [`ScratchPool`] owns one
//! block per search context and lends each in-flight search exclusive access
//! to one of them.

use parking_lot::Mutex;

use nav_core::VertexId;

/// Working memory for one A* search at a time.
#[derive(Debug, Default)]
pub struct SearchScratch {
    pub(crate) f:         Vec<f32>,
    pub(crate) g:         Vec<f32>,
    pub(crate) h:         Vec<f32>,
    pub(crate) open:      Vec<bool>,
    pub(crate) closed:    Vec<bool>,
    pub(crate) slots:     Vec<VertexId>,
    pub(crate) came_from: Vec<VertexId>,
}

impl SearchScratch {
    /// Allocate a block sized for a graph of `vertex_count` vertices.
    pub fn new(vertex_count: usize) -> Self {
        Self {
            f:         vec![f32::INFINITY; vertex_count],
            g:         vec![f32::INFINITY; vertex_count],
            h:         vec![f32::INFINITY; vertex_count],
            open:      vec![false; vertex_count],
            closed:    vec![false; vertex_count],
            slots:     vec![VertexId::INVALID; vertex_count],
            came_from: vec![VertexId::INVALID; vertex_count],
        }
    }

    /// Number of vertices this block can serve without reallocating.
    pub fn capacity(&self) -> usize {
        self.f.len()
    }

    /// Reset every cell to the "unseen" state, resizing if the block was sized
    /// for a different graph.
    pub(crate) fn reset(&mut self, vertex_count: usize) {
        if self.capacity() != vertex_count {
            *self = Self::new(vertex_count);
            return;
        }
        self.f.fill(f32::INFINITY);
        self.g.fill(f32::INFINITY);
        self.h.fill(f32::INFINITY);
        self.open.fill(false);
        self.closed.fill(false);
        self.came_from.fill(VertexId::INVALID);
    }
}

/// One scratch block per search context.
///
/// The caller's home slot is its Rayon worker index (slot 0 outside the
/// pool).  Rayon workers therefore never contend; a search arriving from a
/// foreign thread whose home slot is busy takes any free slot, and only
/// blocks when every slot is in use.
pub struct ScratchPool {
    slots: Box<[Mutex<SearchScratch>]>,
}

impl ScratchPool {
    pub fn new(vertex_count: usize, contexts: usize) -> Self {
        let slots = (0..contexts.max(1))
            .map(|_| Mutex::new(SearchScratch::new(vertex_count)))
            .collect();
        Self { slots }
    }

    /// Number of independent search contexts.
    pub fn contexts(&self) -> usize {
        self.slots.len()
    }

    /// Run `f` with exclusive access to one scratch block.
    pub fn with_scratch<T>(&self, f: impl FnOnce(&mut SearchScratch) -> T) -> T {
        let home = rayon::current_thread_index().unwrap_or(0) % self.slots.len();

        if let Some(mut scratch) = self.slots[home].try_lock() {
            return f(&mut scratch);
        }
        for slot in self.slots.iter() {
            if let Some(mut scratch) = slot.try_lock() {
                return f(&mut scratch);
            }
        }
        let mut scratch = self.slots[home].lock();
        f(&mut scratch)
    }
}
