use core::fmt;

use crate::prelude_internal::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// Key of a mapping.
    Key(String),
    /// Position in a list.
    Index(usize),
    /// The value of a freeform item.
    ItemValue,
}

/// Location of a value relative to the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Plural)]
#[plural(len, is_empty, iter, into_iter, into_iter_ref, new)]
pub struct DocPath(pub Vec<PathSegment>);

impl DocPath {
    pub fn root() -> Self {
        Self::new()
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub fn key(&mut self, key: impl Into<String>) {
        self.push(PathSegment::Key(key.into()));
    }

    /// A copy of this path extended with `segment`.
    pub fn join(&self, segment: PathSegment) -> Self {
        let mut path = self.clone();
        path.push(segment);
        path
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl FromIterator<PathSegment> for DocPath {
    fn from_iter<T: IntoIterator<Item = PathSegment>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, ".{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
            PathSegment::ItemValue => write!(f, "#value"),
        }
    }
}

impl fmt::Display for DocPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            return write!(f, ".");
        }
        for segment in self.iter() {
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(DocPath::root().to_string(), ".");
        let path = DocPath::from_iter([
            PathSegment::Key("body".to_string()),
            PathSegment::Index(2),
            PathSegment::ItemValue,
            PathSegment::Key("by".to_string()),
        ]);
        assert_eq!(path.to_string(), ".body[2]#value.by");
    }

    #[test]
    fn test_join_leaves_original_untouched() {
        let base = DocPath::from_iter([PathSegment::Key("a".to_string())]);
        let joined = base.join(PathSegment::Index(0));
        assert_eq!(base.len(), 1);
        assert_eq!(joined.to_string(), ".a[0]");
    }
}
