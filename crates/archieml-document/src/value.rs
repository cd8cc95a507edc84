use crate::prelude_internal::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Mapping,
    List,
    FreeformItem,
}

impl core::fmt::Display for ValueKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Scalar => write!(f, "scalar"),
            Self::Mapping => write!(f, "mapping"),
            Self::List => write!(f, "list"),
            Self::FreeformItem => write!(f, "freeform item"),
        }
    }
}

/// A node of a parsed document. The document root is always a `Mapping`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Scalar(String),
    Mapping(Map),
    List(List),
    /// An element of a freeform array.
    FreeformItem(FreeformItem),
}

/// A `{type, value}` element of a freeform array.
///
/// Narrative text is stored with the `text` type and a scalar value; named
/// fields keep their key as the type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeformItem {
    pub kind: String,
    pub value: Box<Value>,
}

impl FreeformItem {
    /// Type used for narrative text inside freeform arrays.
    pub const TEXT: &'static str = "text";

    pub fn new(kind: impl Into<String>, value: Value) -> Self {
        Self {
            kind: kind.into(),
            value: Box::new(value),
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(Self::TEXT, Value::Scalar(text.into()))
    }
}

impl Default for Value {
    fn default() -> Self {
        Value::empty_mapping()
    }
}

impl Value {
    pub fn empty_mapping() -> Self {
        Value::Mapping(Map::new())
    }

    pub fn empty_list() -> Self {
        Value::List(List::new())
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Scalar(_) => ValueKind::Scalar,
            Value::Mapping(_) => ValueKind::Mapping,
            Value::List(_) => ValueKind::List,
            Value::FreeformItem(_) => ValueKind::FreeformItem,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Map> {
        match self {
            Value::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut List> {
        match self {
            Value::List(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_freeform(&self) -> Option<&FreeformItem> {
        match self {
            Value::FreeformItem(item) => Some(item),
            _ => None,
        }
    }

    /// Make this value a mapping, replacing anything else, and borrow it.
    pub(crate) fn require_mapping(&mut self) -> &mut Map {
        if !matches!(self, Value::Mapping(_)) {
            *self = Value::empty_mapping();
        }
        let Value::Mapping(map) = self else {
            unreachable!();
        };
        map
    }

    /// Look up a key when this value is a mapping.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|map| map.get(key))
    }

    /// Resolve a path relative to this value.
    pub fn pointer(&self, path: &DocPath) -> Option<&Value> {
        path.iter().try_fold(self, |value, segment| match (segment, value) {
            (PathSegment::Key(key), Value::Mapping(map)) => map.get(key),
            (PathSegment::Index(index), Value::List(list)) => list.get(*index),
            (PathSegment::ItemValue, Value::FreeformItem(item)) => Some(&*item.value),
            _ => None,
        })
    }

    /// Mutable counterpart of [`Value::pointer`].
    pub fn pointer_mut(&mut self, path: &DocPath) -> Option<&mut Value> {
        let mut value = self;
        for segment in path.iter() {
            value = match value {
                Value::Mapping(map) => match segment {
                    PathSegment::Key(key) => map.get_mut(key)?,
                    _ => return None,
                },
                Value::List(list) => match segment {
                    PathSegment::Index(index) => list.get_mut(*index)?,
                    _ => return None,
                },
                Value::FreeformItem(item) => match segment {
                    PathSegment::ItemValue => &mut *item.value,
                    _ => return None,
                },
                Value::Scalar(_) => return None,
            };
        }
        Some(value)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Scalar(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Scalar(s)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Mapping(map)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Value::List(list)
    }
}

impl From<FreeformItem> for Value {
    fn from(item: FreeformItem) -> Self {
        Value::FreeformItem(item)
    }
}
