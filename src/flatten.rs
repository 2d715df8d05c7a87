use std::collections::BTreeMap;

use tracing::trace;

use crate::error::FormError;
use crate::tree::{FormNode, NodeValue};

/// Call `each` for every child of a container node, depth first.
///
/// List children are visited in index order; map children in key order,
/// which callers should not rely on. After a child is handed to `each`,
/// its own children are visited if it is a container. The first error
/// returned by `each` stops the walk and is returned.
pub fn visit<'a, F>(node: &'a FormNode, each: &mut F) -> Result<(), FormError>
where
    F: FnMut(&'a FormNode) -> Result<(), FormError>,
{
    let children: Box<dyn Iterator<Item = &'a FormNode>> = match node.value() {
        NodeValue::List(items) => Box::new(items.iter()),
        NodeValue::Map(map) => Box::new(map.values()),
        NodeValue::Nil | NodeValue::Scalar(_) => {
            return Err(FormError::NotAContainer {
                label: node.label().to_string(),
                kind: node.kind(),
            })
        }
    };
    for child in children {
        each(child)?;
        if child.is_container() {
            visit(child, each)?;
        }
    }
    Ok(())
}

/// Collect every scalar and nil node below `root` as `label -> text`.
///
/// Labels spell out list indices explicitly, so `a[]=x&a[]=y` flattens to
/// `a[0]=x, a[1]=y`. Nil gaps flatten to an empty string, and a scalar or
/// nil `root` flattens to an empty map.
///
/// Children of the empty root key (`[x]`) are labeled like top-level keys,
/// so `[x]=1&x=2` yields a single `x` entry; the later node in traversal
/// order wins.
pub fn flatten(root: &FormNode) -> BTreeMap<String, String> {
    let mut out = BTreeMap::new();
    if let Err(err) = visit(root, &mut |node: &FormNode| {
        if !node.is_container() {
            out.insert(node.label().to_string(), node.scalar_or_empty().to_string());
        }
        Ok(())
    }) {
        trace!(error = %err, "nothing to flatten");
    }
    out
}

impl FormNode {
    /// See [`visit`].
    pub fn each<'a, F>(&'a self, mut each: F) -> Result<(), FormError>
    where
        F: FnMut(&'a FormNode) -> Result<(), FormError>,
    {
        visit(self, &mut each)
    }

    /// See [`flatten`].
    pub fn key_values(&self) -> BTreeMap<String, String> {
        flatten(self)
    }
}
