use std::collections::BTreeMap;
use std::fmt;

use crate::error::FormError;

/// The kind of a node, without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Nil,
    Scalar,
    List,
    Map,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            NodeKind::Nil => "nil",
            NodeKind::Scalar => "scalar",
            NodeKind::List => "list",
            NodeKind::Map => "map",
        })
    }
}

/// The content of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// Placeholder: never assigned, or a gap in a list.
    Nil,
    Scalar(String),
    List(Vec<FormNode>),
    Map(BTreeMap<String, FormNode>),
}

/// A node in the form tree.
///
/// Nodes are only mutated while a tree is being built; the public API is
/// read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormNode {
    label: String,
    value: NodeValue,
}

impl FormNode {
    /// An empty root map.
    pub(crate) fn root() -> Self {
        FormNode {
            label: String::new(),
            value: NodeValue::Map(BTreeMap::new()),
        }
    }

    fn nil(label: String) -> Self {
        FormNode {
            label,
            value: NodeValue::Nil,
        }
    }

    /// Canonical bracket path of this node, e.g. `input[key2][1]`.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn value(&self) -> &NodeValue {
        &self.value
    }

    pub fn kind(&self) -> NodeKind {
        match self.value {
            NodeValue::Nil => NodeKind::Nil,
            NodeValue::Scalar(_) => NodeKind::Scalar,
            NodeValue::List(_) => NodeKind::List,
            NodeValue::Map(_) => NodeKind::Map,
        }
    }

    pub fn is(&self, kind: NodeKind) -> bool {
        self.kind() == kind
    }

    pub fn is_nil(&self) -> bool {
        self.is(NodeKind::Nil)
    }

    pub fn is_container(&self) -> bool {
        matches!(self.value, NodeValue::List(_) | NodeValue::Map(_))
    }

    /// The scalar text, if this is a scalar.
    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            NodeValue::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[FormNode]> {
        match &self.value {
            NodeValue::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&BTreeMap<String, FormNode>> {
        match &self.value {
            NodeValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Scalar text, or `""` for every other kind.
    pub fn scalar_or_empty(&self) -> &str {
        self.as_str().unwrap_or("")
    }

    // ── Build primitives ────────────────────────────────────────────

    /// Commit a `Nil` node to `kind`. Succeeds without change if the node
    /// already has that kind.
    pub(crate) fn coerce(&mut self, kind: NodeKind) -> Result<(), FormError> {
        let found = self.kind();
        if found == kind {
            return Ok(());
        }
        if found != NodeKind::Nil {
            return Err(FormError::KindConflict {
                label: self.label.clone(),
                expected: kind,
                found,
            });
        }
        self.value = match kind {
            NodeKind::Nil => NodeValue::Nil,
            NodeKind::Scalar => NodeValue::Scalar(String::new()),
            NodeKind::List => NodeValue::List(Vec::new()),
            NodeKind::Map => NodeValue::Map(BTreeMap::new()),
        };
        Ok(())
    }

    /// Get or create the map child `name`.
    pub(crate) fn child_for_key(&mut self, name: &str) -> Result<&mut FormNode, FormError> {
        self.coerce(NodeKind::Map)?;
        let label = if self.label.is_empty() {
            name.to_string()
        } else {
            format!("{}[{}]", self.label, name)
        };
        match &mut self.value {
            NodeValue::Map(map) => Ok(map
                .entry(name.to_string())
                .or_insert_with(|| FormNode::nil(label))),
            _ => unreachable!("coerced to map"),
        }
    }

    /// Get the list child at `index`, growing the list with `Nil`
    /// placeholders as needed. `None` appends at the next free index.
    pub(crate) fn child_at_index(
        &mut self,
        index: Option<usize>,
    ) -> Result<&mut FormNode, FormError> {
        if index == Some(usize::MAX) {
            return Err(FormError::LimitExceeded {
                key: self.label.clone(),
                reason: format!("index {} is not addressable", usize::MAX),
            });
        }
        self.coerce(NodeKind::List)?;
        let parent = &self.label;
        match &mut self.value {
            NodeValue::List(items) => {
                let target = index.unwrap_or(items.len());
                while items.len() <= target {
                    let label = format!("{}[{}]", parent, items.len());
                    items.push(FormNode::nil(label));
                }
                Ok(&mut items[target])
            }
            _ => unreachable!("coerced to list"),
        }
    }

    pub(crate) fn set_scalar(&mut self, text: &str) -> Result<(), FormError> {
        self.coerce(NodeKind::Scalar)?;
        self.value = NodeValue::Scalar(text.to_string());
        Ok(())
    }
}

impl Default for FormNode {
    fn default() -> Self {
        Self::root()
    }
}
