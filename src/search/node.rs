//! Search states for the frontier-based strategies.
//!
//! A partial path is stored as a persistent linked list: each node holds the
//! city it appended, the accumulated cost and a back-reference to its parent.
//! Siblings share their common prefix, so expanding a state copies no path, and
//! a prefix is freed as soon as no pending state refers to it.

use std::rc::Rc;

/// Fixed-capacity bit set of city indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CitySet {
    words: Vec<u64>,
    capacity: usize,
    len: usize,
}

impl CitySet {
    /// An empty set able to hold cities `0..capacity`.
    pub fn new(capacity: usize) -> Self {
        CitySet {
            words: vec![0; capacity.div_ceil(64)],
            capacity,
            len: 0,
        }
    }

    /// Build a set from an iterator of cities.
    pub fn from_cities<I: IntoIterator<Item = usize>>(capacity: usize, cities: I) -> Self {
        let mut set = Self::new(capacity);
        for city in cities {
            set.insert(city);
        }
        set
    }

    /// Insert a city, returning `true` if it was not already present.
    ///
    /// Panics if `city >= capacity`.
    pub fn insert(&mut self, city: usize) -> bool {
        assert!(city < self.capacity, "city {} outside set of capacity {}", city, self.capacity);
        let (word, bit) = (city / 64, city % 64);
        let mask = 1u64 << bit;
        if self.words[word] & mask != 0 {
            return false;
        }
        self.words[word] |= mask;
        self.len += 1;
        true
    }

    #[inline]
    pub fn contains(&self, city: usize) -> bool {
        city < self.capacity && self.words[city / 64] & (1u64 << (city % 64)) != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether every city `0..capacity` is in the set.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Cities not in the set, ascending.
    pub fn missing(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.capacity).filter(move |&c| !self.contains(c))
    }
}

/// One state of the frontier searches: the last city of a partial path.
#[derive(Debug)]
pub(crate) struct PathNode {
    pub city: usize,
    /// Accumulated cost `g` of the open path
    pub cost: f64,
    /// Heuristic estimate `h` of the remaining cost
    pub estimate: f64,
    /// Number of cities on the path
    pub depth: usize,
    pub visited: CitySet,
    parent: Option<Rc<PathNode>>,
}

impl PathNode {
    pub fn root(origin: usize, num_cities: usize, estimate: f64) -> Rc<Self> {
        let mut visited = CitySet::new(num_cities);
        visited.insert(origin);
        Rc::new(PathNode {
            city: origin,
            cost: 0.0,
            estimate,
            depth: 1,
            visited,
            parent: None,
        })
    }

    /// A child node that appends `city` reached over an edge of `edge_cost`.
    /// The caller computes `estimate` against the child's visited set.
    pub fn extend(self: &Rc<Self>, city: usize, edge_cost: f64, visited: CitySet, estimate: f64) -> Rc<Self> {
        Rc::new(PathNode {
            city,
            cost: self.cost + edge_cost,
            estimate,
            depth: self.depth + 1,
            visited,
            parent: Some(Rc::clone(self)),
        })
    }

    /// Priority `f = g + h`
    #[inline]
    pub fn f(&self) -> f64 {
        self.cost + self.estimate
    }

    /// The cities of the path, origin first.
    pub fn path(&self) -> Vec<usize> {
        let mut path = Vec::with_capacity(self.depth + 1);
        path.push(self.city);
        let mut cursor = self.parent.as_deref();
        while let Some(node) = cursor {
            path.push(node.city);
            cursor = node.parent.as_deref();
        }
        path.reverse();
        path
    }
}
