/// How freeform items are written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FreeformRepr {
    /// `{"type": "quote", "value": {...}}`
    Adjacent { tag: String, content: String },
    /// `{"type": "quote", ...fields}`. Items whose value is not a mapping
    /// are written as [`FreeformRepr::External`].
    Internal { tag: String },
    /// `{"quote": {...}}`
    External,
}

impl Default for FreeformRepr {
    fn default() -> Self {
        FreeformRepr::Adjacent {
            tag: "type".to_string(),
            content: "value".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    pub freeform_repr: FreeformRepr,
}
