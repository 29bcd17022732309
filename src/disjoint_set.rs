/// Union-find over cell IDs `0..n`, stored as a parent-index arena.
///
/// A node is a root iff it is its own parent. `union` always hangs the
/// second root under the first; `root` halves paths as it walks, which only
/// rewrites links of non-root nodes.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    sets: usize,
}

impl DisjointSet {
    /// One singleton set per node
    pub fn new(n: usize) -> Self {
        DisjointSet {
            parent: (0..n).collect(),
            sets: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of distinct roots
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Follow parent links to the representative of `node`, pointing every
    /// other node on the way at its grandparent
    pub fn root(&mut self, node: usize) -> usize {
        let mut current = node;
        while self.parent[current] != current {
            let grandparent = self.parent[self.parent[current]];
            self.parent[current] = grandparent;
            current = grandparent;
        }
        current
    }

    pub fn is_connected(&mut self, a: usize, b: usize) -> bool {
        self.root(a) == self.root(b)
    }

    /// Merge the sets of `a` and `b`; the root of `a` becomes parent of the root of `b`.
    /// Returns false if they were already in the same set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.root(a);
        let root_b = self.root(b);
        if root_a == root_b {
            return false;
        }
        self.parent[root_b] = root_a;
        self.sets -= 1;
        true
    }
}
