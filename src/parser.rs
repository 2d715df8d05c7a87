use std::sync::LazyLock;

use regex::Regex;

use crate::error::FormError;
use crate::path::{KeyPath, Segment};

/// A single `[...]` segment anchored at the scan position. The content runs
/// up to the first `]`, so `[b[c]` has content `b[c`.
static SEGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[([^\]]*)\]").expect("segment pattern is valid"));

/// Scanner state: tracks position in the key string.
struct KeyScanner<'a> {
    input: &'a str,
    pos: usize,
}

/// Split a raw form key into its root and bracket segments.
///
/// Segments are read while the next character is `[`. Anything after the
/// last segment is ignored (`a[b]c` is `a[b]`), unless it opens a bracket
/// that is never closed.
///
/// ```
/// use formtree::parser::parse_key;
/// use formtree::path::Segment;
///
/// let path = parse_key("a[b][2][]").unwrap();
/// assert_eq!(path.root, "a");
/// assert_eq!(
///     path.segments,
///     vec![Segment::Named("b".into()), Segment::Index(2), Segment::Auto]
/// );
/// ```
pub fn parse_key(key: &str) -> Result<KeyPath, FormError> {
    let mut scanner = KeyScanner { input: key, pos: 0 };
    let root = scanner.scan_root();
    let mut segments = Vec::new();

    while scanner.remaining().starts_with('[') {
        segments.push(scanner.scan_segment()?);
    }
    scanner.check_trailing()?;

    Ok(KeyPath {
        root: root.to_string(),
        segments,
    })
}

impl<'a> KeyScanner<'a> {
    fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn advance(&mut self, n: usize) {
        self.pos += n;
    }

    fn error(&self, reason: &'static str) -> FormError {
        FormError::MalformedKey {
            key: self.input.to_string(),
            reason,
        }
    }

    /// Everything before the first `[`.
    fn scan_root(&mut self) -> &'a str {
        let end = self.remaining().find('[').unwrap_or(self.remaining().len());
        let root = &self.remaining()[..end];
        self.advance(end);
        root
    }

    fn scan_segment(&mut self) -> Result<Segment, FormError> {
        let Some(caps) = SEGMENT.captures(self.remaining()) else {
            return Err(self.error("unbalanced '['"));
        };
        let whole = caps.get(0).map_or(0, |m| m.len());
        let content = caps.get(1).map_or("", |m| m.as_str());
        self.advance(whole);
        Ok(classify(content))
    }

    /// Trailing text is dropped, but a `[` in it still needs a `]`.
    fn check_trailing(&self) -> Result<(), FormError> {
        let rest = self.remaining();
        match rest.rfind('[') {
            Some(open) if !rest[open..].contains(']') => Err(self.error("unbalanced '['")),
            _ => Ok(()),
        }
    }
}

fn classify(content: &str) -> Segment {
    if content.is_empty() {
        return Segment::Auto;
    }
    if content.bytes().all(|b| b.is_ascii_digit()) {
        if let Ok(index) = content.parse::<usize>() {
            return Segment::Index(index);
        }
    }
    Segment::Named(content.to_string())
}
