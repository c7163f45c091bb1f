//! Disjoint-set forest over cell indices, union-by-rank with path compression.
//!
//! Ranks are negative-encoded in the same slot that otherwise holds a parent
//! index: a root's slot holds `-(rank + 1)`, a non-root's slot holds its
//! parent's index. This mirrors the reference `DisjSets` rather than the
//! separate parent/rank arrays used elsewhere in the retrieval pack, since
//! `Maze::generate`'s invariant description assumes the single-array form.

pub struct UnionFind {
    slots: Vec<i64>,
}

impl UnionFind {
    pub fn new(n: usize) -> Self {
        let mut uf = UnionFind { slots: Vec::new() };
        uf.reset(n);
        uf
    }

    /// Resets to `n` singleton sets, each slot set to `-1`.
    pub fn reset(&mut self, n: usize) {
        self.slots.clear();
        self.slots.resize(n, -1);
    }

    /// Finds the root of `x`, compressing the path in a second pass.
    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.slots[root] >= 0 {
            root = self.slots[root] as usize;
        }
        let mut cur = x;
        while self.slots[cur] >= 0 {
            let next = self.slots[cur] as usize;
            self.slots[cur] = root as i64;
            cur = next;
        }
        root
    }

    /// Unions two roots by rank. Both arguments must already be roots (as
    /// returned by `find`); this does not call `find` itself so callers can
    /// reuse roots they already computed.
    pub fn union(&mut self, r1: usize, r2: usize) {
        if self.slots[r2] < self.slots[r1] {
            // r2 has strictly greater rank (more negative).
            self.slots[r1] = r2 as i64;
        } else {
            if self.slots[r1] == self.slots[r2] {
                self.slots[r1] -= 1;
            }
            self.slots[r2] = r1 as i64;
        }
    }

    pub fn same_set(&mut self, x: usize, y: usize) -> bool {
        self.find(x) == self.find(y)
    }
}
