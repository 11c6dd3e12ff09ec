//! Disjoint-set (union-find) over a sparse voxel index space.
//!
//! Path compression plus union by rank give near-constant amortized cost per
//! operation. External indices need not be contiguous: each one is mapped to a
//! dense internal slot on first use, and only external indices are returned.

use std::collections::HashMap;

/// Union-find over arbitrary `usize` indices, tracking component sizes.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u32>,
    size: Vec<usize>,
    /// External index -> internal slot
    slots: HashMap<usize, usize>,
    /// Internal slot -> external index
    indices: Vec<usize>,
    num_components: usize,
}

impl UnionFind {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed with every element as its own singleton.
    pub fn with_elements<I>(elements: I) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let elements = elements.into_iter();
        let (lower, _) = elements.size_hint();
        let mut uf = Self {
            parent: Vec::with_capacity(lower),
            rank: Vec::with_capacity(lower),
            size: Vec::with_capacity(lower),
            slots: HashMap::with_capacity(lower),
            indices: Vec::with_capacity(lower),
            num_components: 0,
        };
        for x in elements {
            uf.add(x);
        }
        uf
    }

    /// Register `x` as a singleton. Does nothing if already present.
    pub fn add(&mut self, x: usize) {
        self.slot_or_insert(x);
    }

    pub fn contains(&self, x: usize) -> bool {
        self.slots.contains_key(&x)
    }

    /// Representative of the component containing `x`, registering `x` if unknown.
    pub fn find(&mut self, x: usize) -> usize {
        let slot = self.slot_or_insert(x);
        let root = self.find_slot(slot);
        self.indices[root]
    }

    /// Merge the components of `x` and `y`.
    ///
    /// Returns `false` if they were already the same component.
    pub fn unite(&mut self, x: usize, y: usize) -> bool {
        let slot_x = self.slot_or_insert(x);
        let slot_y = self.slot_or_insert(y);
        let root_x = self.find_slot(slot_x);
        let root_y = self.find_slot(slot_y);
        if root_x == root_y {
            return false;
        }

        let (root, child) = if self.rank[root_x] < self.rank[root_y] {
            (root_y, root_x)
        } else {
            // Ties attach the second root under the first
            if self.rank[root_x] == self.rank[root_y] {
                self.rank[root_x] += 1;
            }
            (root_x, root_y)
        };
        self.parent[child] = root;
        self.size[root] += self.size[child];
        self.num_components -= 1;
        true
    }

    /// True if both are known and share a component.
    pub fn connected(&mut self, x: usize, y: usize) -> bool {
        match (self.slots.get(&x).copied(), self.slots.get(&y).copied()) {
            (Some(sx), Some(sy)) => self.find_slot(sx) == self.find_slot(sy),
            _ => false,
        }
    }

    /// Size of the component containing `x`, 0 if unknown.
    pub fn size(&mut self, x: usize) -> usize {
        match self.slots.get(&x).copied() {
            Some(slot) => {
                let root = self.find_slot(slot);
                self.size[root]
            }
            None => 0,
        }
    }

    /// Inclusive size check: `min_size <= size(x) <= max_size`.
    pub fn check_size(&mut self, x: usize, min_size: usize, max_size: usize) -> bool {
        (min_size..=max_size).contains(&self.size(x))
    }

    /// Number of disjoint components.
    pub fn count(&self) -> usize {
        self.num_components
    }

    /// Number of registered elements.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Representatives of all current components.
    pub fn roots(&self) -> Vec<usize> {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(slot, &parent)| slot == parent)
            .map(|(slot, _)| self.indices[slot])
            .collect()
    }

    /// All elements sharing a component with `x`, empty if unknown.
    ///
    /// Linear in the number of registered elements.
    pub fn component_members(&mut self, x: usize) -> Vec<usize> {
        let Some(slot) = self.slots.get(&x).copied() else {
            return Vec::new();
        };
        let root = self.find_slot(slot);
        let mut members = Vec::with_capacity(self.size[root]);
        for s in 0..self.parent.len() {
            if self.find_slot(s) == root {
                members.push(self.indices[s]);
            }
        }
        members
    }

    pub fn clear(&mut self) {
        self.parent.clear();
        self.rank.clear();
        self.size.clear();
        self.slots.clear();
        self.indices.clear();
        self.num_components = 0;
    }

    fn slot_or_insert(&mut self, x: usize) -> usize {
        if let Some(&slot) = self.slots.get(&x) {
            return slot;
        }
        let slot = self.parent.len();
        self.slots.insert(x, slot);
        self.indices.push(x);
        self.parent.push(slot);
        self.rank.push(0);
        self.size.push(1);
        self.num_components += 1;
        slot
    }

    /// Walk to the root, then point every node on the path at it.
    fn find_slot(&mut self, slot: usize) -> usize {
        let mut root = slot;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut node = slot;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }

        root
    }
}
