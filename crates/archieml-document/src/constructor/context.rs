/// One frame of the constructor's scope stack.
///
/// Keys are stored without the leading `.` of relative commands and may
/// contain further `.` separators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// An open `{block}`.
    Namespace { key: String },
    /// An open `[array]` whose element kind is not known yet.
    AmbiguousList { key: String },
    /// An array holding scalars.
    StringList { key: String },
    /// An array holding records. A pair keyed `first_key` starts a new record.
    ObjectList { key: String, first_key: String },
    /// An open `[+array]` of freeform items.
    FreeformList { key: String },
}

impl Context {
    pub fn namespace(key: impl Into<String>) -> Self {
        Context::Namespace { key: key.into() }
    }

    /// Frame for a freshly opened array.
    pub fn list(key: impl Into<String>, freeform: bool) -> Self {
        let key = key.into();
        if freeform {
            Context::FreeformList { key }
        } else {
            Context::AmbiguousList { key }
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Context::Namespace { key }
            | Context::AmbiguousList { key }
            | Context::StringList { key }
            | Context::ObjectList { key, .. }
            | Context::FreeformList { key } => key,
        }
    }

    pub fn is_list(&self) -> bool {
        !matches!(self, Context::Namespace { .. })
    }

    pub fn is_freeform(&self) -> bool {
        matches!(self, Context::FreeformList { .. })
    }

    /// The frame an ambiguous list becomes once its first element is a scalar.
    pub fn into_string_list(self) -> Self {
        match self {
            Context::AmbiguousList { key } => Context::StringList { key },
            other => other,
        }
    }

    /// The frame an ambiguous list becomes once its first element is a record
    /// whose first key is `first_key`.
    pub fn into_object_list(self, first_key: impl Into<String>) -> Self {
        match self {
            Context::AmbiguousList { key } => Context::ObjectList {
                key,
                first_key: first_key.into(),
            },
            other => other,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Context::Namespace { .. } => "namespace",
            Context::AmbiguousList { .. } => "ambiguous_list",
            Context::StringList { .. } => "string_list",
            Context::ObjectList { .. } => "object_list",
            Context::FreeformList { .. } => "freeform_list",
        }
    }
}
