//! Intermediate representation produced by the key parser.

/// One bracket segment of a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// `[]`: append at the next free index.
    Auto,
    /// `[3]`: explicit list index.
    Index(usize),
    /// `[name]`: map key.
    Named(String),
}

/// A tokenized key: `a[b][2]` is root `a` with `[Named("b"), Index(2)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPath {
    pub root: String,
    pub segments: Vec<Segment>,
}

impl KeyPath {
    /// Largest explicit index in the path, if any.
    pub fn max_index(&self) -> Option<usize> {
        self.segments
            .iter()
            .filter_map(|seg| match seg {
                Segment::Index(i) => Some(*i),
                _ => None,
            })
            .max()
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

/// A single step of a navigation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathElement {
    Key(String),
    Index(usize),
}

impl From<&str> for PathElement {
    fn from(key: &str) -> Self {
        PathElement::Key(key.to_string())
    }
}

impl From<String> for PathElement {
    fn from(key: String) -> Self {
        PathElement::Key(key)
    }
}

impl From<usize> for PathElement {
    fn from(index: usize) -> Self {
        PathElement::Index(index)
    }
}
