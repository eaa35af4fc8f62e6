//! Index-addressed node storage for A* parent chains.
//!
//! Each [`SearchNode`] stores its parent as a [`NodeRef`] into the same
//! [`NodeArena`] instead of an owning pointer.  Parents are never mutated
//! after creation, so a chain can be walked at any time, and clearing the
//! arena between searches keeps its allocation.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::{FxHashMap, FxHashSet};

use mapf_core::SpaceTimeState;

// ── NodeRef / SearchNode ──────────────────────────────────────────────────────

/// Index of a node in a [`NodeArena`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct NodeRef(usize);

impl NodeRef {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// One expanded or frontier state.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SearchNode {
    pub state:  SpaceTimeState,
    /// Steps taken from the start.
    pub g:      u64,
    /// Manhattan distance to the goal.
    pub h:      u64,
    pub parent: Option<NodeRef>,
}

impl SearchNode {
    #[inline]
    pub fn f(&self) -> u64 {
        self.g + self.h
    }
}

// ── NodeArena ─────────────────────────────────────────────────────────────────

/// Append-only node storage for one search.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeRef {
        self.nodes.push(node);
        NodeRef(self.nodes.len() - 1)
    }

    /// # Panics
    /// Panics if `r` was not issued by this arena since its last `clear`.
    #[inline]
    pub fn get(&self, r: NodeRef) -> &SearchNode {
        &self.nodes[r.0]
    }

    /// States from the root of the chain to `r`, in order.
    pub fn path_to(&self, r: NodeRef) -> Vec<SpaceTimeState> {
        let mut states = Vec::new();
        let mut cur = Some(r);
        while let Some(idx) = cur {
            let node = self.get(idx);
            states.push(node.state);
            cur = node.parent;
        }
        states.reverse();
        states
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }
}

// ── SearchScratch ─────────────────────────────────────────────────────────────

/// Reusable working memory for one search at a time.
///
/// Frontier entries are `(f, sequence, node)`: ties on `f` resolve in
/// insertion order, so identical inputs always expand identical nodes.
#[derive(Debug, Default)]
pub struct SearchScratch {
    pub(crate) arena:    NodeArena,
    pub(crate) open:     BinaryHeap<Reverse<(u64, u64, NodeRef)>>,
    pub(crate) best_g:   FxHashMap<SpaceTimeState, u64>,
    pub(crate) closed:   FxHashSet<SpaceTimeState>,
    sequence:            u64,
    pub(crate) expanded: usize,
}

impl SearchScratch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all state from the previous search, keeping allocations.
    pub fn reset(&mut self) {
        self.arena.clear();
        self.open.clear();
        self.best_g.clear();
        self.closed.clear();
        self.sequence = 0;
        self.expanded = 0;
    }

    /// Store `node` and put it on the frontier.
    pub(crate) fn push(&mut self, node: SearchNode) -> NodeRef {
        let f = node.f();
        let r = self.arena.push(node);
        self.open.push(Reverse((f, self.sequence, r)));
        self.sequence += 1;
        r
    }

    /// Next frontier node by `(f, sequence)`.
    pub(crate) fn pop(&mut self) -> Option<NodeRef> {
        self.open.pop().map(|Reverse((_, _, r))| r)
    }

    /// Nodes expanded by the most recent search.
    pub fn expanded(&self) -> usize {
        self.expanded
    }

    /// Nodes generated by the most recent search.
    pub fn generated(&self) -> usize {
        self.arena.len()
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }
}
