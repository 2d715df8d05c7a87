use std::collections::HashMap;

use tracing::{debug, trace};

use crate::error::FormError;
use crate::parser::parse_key;
use crate::path::{KeyPath, Segment};
use crate::tree::{FormNode, NodeKind};

/// Flat form input: each key maps to the values submitted for it, in order.
pub type FormValues = HashMap<String, Vec<String>>;

/// Default cap on explicit list indices. Gaps below an index are filled with
/// nil nodes, so the cap bounds the allocation a single key can cause.
pub const DEFAULT_MAX_INDEX: usize = 10_000;

/// Limits applied while building a tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Largest explicit list index accepted in a key. Defaults to
    /// [`DEFAULT_MAX_INDEX`]; `None` removes the cap.
    pub max_index: Option<usize>,
    /// Largest number of bracket segments accepted in a key.
    pub max_depth: Option<usize>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            max_index: Some(DEFAULT_MAX_INDEX),
            max_depth: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_index(mut self, max: usize) -> Self {
        self.max_index = Some(max);
        self
    }

    pub fn max_depth(mut self, max: usize) -> Self {
        self.max_depth = Some(max);
        self
    }

    fn check(&self, key: &str, path: &KeyPath) -> Result<(), FormError> {
        if path.max_index() == Some(usize::MAX) {
            return Err(FormError::LimitExceeded {
                key: key.to_string(),
                reason: format!("index {} is not addressable", usize::MAX),
            });
        }
        if let (Some(max), Some(found)) = (self.max_index, path.max_index()) {
            if found > max {
                return Err(FormError::LimitExceeded {
                    key: key.to_string(),
                    reason: format!("index {found} exceeds limit {max}"),
                });
            }
        }
        if let Some(max) = self.max_depth {
            if path.depth() > max {
                return Err(FormError::LimitExceeded {
                    key: key.to_string(),
                    reason: format!("depth {} exceeds limit {max}", path.depth()),
                });
            }
        }
        Ok(())
    }
}

/// Build a tree from flat form values, returning the root map and every
/// pair that was dropped along the way.
///
/// Keys are processed in byte-wise sorted order so the same input always
/// yields the same tree, whatever order the collection iterates in.
pub fn build(values: &FormValues, options: &ParseOptions) -> (FormNode, Vec<FormError>) {
    let mut root = FormNode::root();
    let mut errors = Vec::new();

    let mut keys: Vec<&String> = values.keys().collect();
    keys.sort();

    for key in keys {
        trace!(key = key.as_str(), "applying pair");
        if let Err(err) = apply_pair(&mut root, key, &values[key], options) {
            debug!(key = key.as_str(), error = %err, "dropping pair");
            errors.push(err);
        }
    }

    (root, errors)
}

fn apply_pair(
    root: &mut FormNode,
    key: &str,
    values: &[String],
    options: &ParseOptions,
) -> Result<(), FormError> {
    let Some(first) = values.first() else {
        return Err(FormError::EmptyValues {
            key: key.to_string(),
        });
    };
    let path = parse_key(key)?;
    options.check(key, &path)?;

    // A trailing `[]` with several values appends one element per value.
    if let Some((Segment::Auto, parents)) = path.segments.split_last() {
        if values.len() > 1 {
            let list = descend(root, &path.root, parents)?;
            list.coerce(NodeKind::List)?;
            for value in values {
                list.child_at_index(None)?.set_scalar(value)?;
            }
            return Ok(());
        }
    }

    let leaf = descend(root, &path.root, &path.segments)?;
    leaf.set_scalar(first)
}

/// Walk from the root through `segments`, creating nodes as needed.
fn descend<'a>(
    root: &'a mut FormNode,
    name: &str,
    segments: &[Segment],
) -> Result<&'a mut FormNode, FormError> {
    let mut current = root.child_for_key(name)?;
    for segment in segments {
        current = match segment {
            Segment::Named(key) => current.child_for_key(key)?,
            Segment::Index(index) => current.child_at_index(Some(*index))?,
            Segment::Auto => current.child_at_index(None)?,
        };
    }
    Ok(current)
}
