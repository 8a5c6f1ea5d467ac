//! Locations inside a value being decoded, used for diagnostics.

use std::fmt;

/// One step from a container to one of its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

/// Path from the root of a decode call to a node, rendered as `$`, `$.a`, `$.a[1]`.
///
/// Keys that are not plain identifiers are rendered in bracket form: `$["a b"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodePath {
    segments: Vec<PathSegment>,
}

impl DecodePath {
    /// The root path `$`.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// A new path one step below `self`.
    pub(crate) fn child(&self, segment: PathSegment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }
}

impl fmt::Display for DecodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        for segment in &self.segments {
            match segment {
                PathSegment::Index(index) => write!(f, "[{index}]")?,
                PathSegment::Key(key) if is_identifier(key) => write!(f, ".{key}")?,
                PathSegment::Key(key) => write!(f, "[{key:?}]")?,
            }
        }
        Ok(())
    }
}

fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_renders_as_dollar() {
        assert_eq!(DecodePath::root().to_string(), "$");
        assert!(DecodePath::root().is_root());
    }

    #[test]
    fn keys_and_indices_render_in_order() {
        let path = DecodePath::root()
            .child(PathSegment::Key("items".into()))
            .child(PathSegment::Index(2))
            .child(PathSegment::Key("meta_data".into()));
        assert_eq!(path.to_string(), "$.items[2].meta_data");
    }

    #[test]
    fn unusual_keys_use_bracket_form() {
        let path = DecodePath::root()
            .child(PathSegment::Key("a b".into()))
            .child(PathSegment::Key("0".into()))
            .child(PathSegment::Key(String::new()));
        assert_eq!(path.to_string(), r#"$["a b"]["0"][""]"#);
    }
}
