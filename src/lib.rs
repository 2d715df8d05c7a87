//! Turn flat form key/value pairs such as `a[b][2]=x` into a typed tree of
//! scalars, lists and maps, and navigate it by path.
//!
//! ```
//! use formtree::parse_query;
//! use formtree::path::PathElement;
//!
//! let result = parse_query("form[]=A&form[]=B&user[name]=ann");
//! let tree = result.value;
//!
//! assert_eq!(tree.get_scalar_list(&["form".into()]), vec!["A", "B"]);
//! assert_eq!(tree.get_scalar(&["user".into(), "name".into()]), "ann");
//! assert_eq!(tree.get_scalar(&["form".into(), PathElement::Index(1)]), "B");
//! ```

pub mod builder;
pub mod error;
pub mod flatten;
pub mod json;
pub mod navigate;
pub mod parser;
pub mod path;
pub mod tree;

pub use builder::{FormValues, ParseOptions, DEFAULT_MAX_INDEX};
pub use error::FormError;
pub use flatten::{flatten, visit};
pub use path::PathElement;
pub use tree::{FormNode, NodeKind, NodeValue};

// ── Core API ───────────────────────────────────────────────────────

/// The result of building a tree.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    /// Root map of the tree.
    pub value: FormNode,
    /// One entry per dropped pair. Dropped pairs leave no trace in `value`.
    pub errors: Vec<FormError>,
}

/// Build a tree from flat form values with default options.
pub fn parse_values(values: &FormValues) -> ParseResult {
    parse_values_with(values, &ParseOptions::default())
}

/// Build a tree from flat form values.
pub fn parse_values_with(values: &FormValues, options: &ParseOptions) -> ParseResult {
    let (value, errors) = builder::build(values, options);
    ParseResult { value, errors }
}

/// Decode an `application/x-www-form-urlencoded` payload into flat form
/// values. Repeated keys keep their values in order of appearance.
pub fn form_values_from_query(query: &str) -> FormValues {
    let mut values = FormValues::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    values
}

/// Decode a query string and build a tree from it.
pub fn parse_query(query: &str) -> ParseResult {
    parse_values(&form_values_from_query(query))
}

/// Decode a query string and build a tree from it.
pub fn parse_query_with(query: &str, options: &ParseOptions) -> ParseResult {
    parse_values_with(&form_values_from_query(query), options)
}
