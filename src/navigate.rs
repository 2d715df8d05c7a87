use serde_json::Value;

use crate::error::FormError;
use crate::path::PathElement;
use crate::tree::{FormNode, NodeValue};

impl FormNode {
    /// Descend through `path`, one element per step.
    ///
    /// ```
    /// use formtree::{parse_values, FormValues};
    /// use formtree::path::PathElement;
    ///
    /// let mut values = FormValues::new();
    /// values.insert("form[4][key]".into(), vec!["A".into()]);
    /// let tree = parse_values(&values).value;
    ///
    /// let node = tree
    ///     .get(&["form".into(), PathElement::Index(4), "key".into()])
    ///     .unwrap();
    /// assert_eq!(node.as_str(), Some("A"));
    /// assert!(tree.get(&["form".into(), PathElement::Index(9)]).is_err());
    /// ```
    pub fn get(&self, path: &[PathElement]) -> Result<&FormNode, FormError> {
        let mut current = self;
        for (position, element) in path.iter().enumerate() {
            current = match element {
                PathElement::Key(key) => match current.value() {
                    NodeValue::Map(map) => {
                        map.get(key).ok_or_else(|| FormError::UnknownKey {
                            path: current.label().to_string(),
                            position,
                            key: key.clone(),
                        })?
                    }
                    _ => {
                        return Err(FormError::NotAMap {
                            path: current.label().to_string(),
                            position,
                        })
                    }
                },
                PathElement::Index(index) => match current.value() {
                    NodeValue::List(items) => {
                        items.get(*index).ok_or_else(|| FormError::IndexOutOfRange {
                            path: current.label().to_string(),
                            position,
                            index: *index,
                            len: items.len(),
                        })?
                    }
                    _ => {
                        return Err(FormError::NotAList {
                            path: current.label().to_string(),
                            position,
                        })
                    }
                },
            };
        }
        Ok(current)
    }

    /// Like [`FormNode::get`], with path elements given as JSON values
    /// (strings and non-negative integers), e.g. parsed from `["a", 1]`.
    pub fn get_json(&self, path: &[Value]) -> Result<&FormNode, FormError> {
        let elements = path
            .iter()
            .enumerate()
            .map(|(position, v)| path_element_from_json(position, v))
            .collect::<Result<Vec<_>, _>>()?;
        self.get(&elements)
    }

    /// Scalar text at `path`, or `""` if the path misses or is not a scalar.
    pub fn get_scalar(&self, path: &[PathElement]) -> &str {
        self.get(path).map_or("", FormNode::scalar_or_empty)
    }

    /// Scalar texts of the list at `path`; `""` stands in for elements that
    /// are not scalars. Empty if the path does not resolve to a list.
    pub fn get_scalar_list(&self, path: &[PathElement]) -> Vec<String> {
        match self.get(path).map(FormNode::value) {
            Ok(NodeValue::List(items)) => items
                .iter()
                .map(|item| item.scalar_or_empty().to_string())
                .collect(),
            _ => Vec::new(),
        }
    }
}

fn path_element_from_json(position: usize, value: &Value) -> Result<PathElement, FormError> {
    match value {
        Value::String(key) => Ok(PathElement::Key(key.clone())),
        Value::Number(n) => n
            .as_u64()
            .and_then(|i| usize::try_from(i).ok())
            .map(PathElement::Index)
            .ok_or_else(|| FormError::InvalidKeyType {
                position,
                found: n.to_string(),
            }),
        other => Err(FormError::InvalidKeyType {
            position,
            found: other.to_string(),
        }),
    }
}
