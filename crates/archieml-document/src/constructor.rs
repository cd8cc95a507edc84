use tracing::trace;

use crate::prelude_internal::*;

mod context;

pub use context::Context;

/// Owns the document under construction and the stack of open scopes.
///
/// Nothing holds references into the document between calls. Every write
/// resolves the current scope from the root by walking the stack, and the
/// locations it hands back are [`DocPath`]s.
#[derive(Debug, Clone, Default)]
pub struct DocumentConstructor {
    root: Value,
    stack: Vec<Context>,
}

impl DocumentConstructor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn document(&self) -> &Value {
        &self.root
    }

    pub fn finish(self) -> Value {
        self.root
    }

    pub fn stack(&self) -> &[Context] {
        &self.stack
    }

    /// The innermost open scope.
    pub fn top(&self) -> Option<&Context> {
        self.stack.last()
    }
}

impl DocumentConstructor {
    pub fn push(&mut self, context: Context) {
        trace!(
            context = context.name(),
            key = context.key(),
            depth = self.stack.len() + 1,
            "push scope"
        );
        self.stack.push(context);
    }

    pub fn pop(&mut self) -> Option<Context> {
        let context = self.stack.pop()?;
        trace!(
            context = context.name(),
            key = context.key(),
            depth = self.stack.len(),
            "pop scope"
        );
        Some(context)
    }

    /// Close every open scope.
    pub fn reset(&mut self) {
        if !self.stack.is_empty() {
            trace!(depth = self.stack.len(), "reset scopes");
        }
        self.stack.clear();
    }

    /// Rewrite the innermost frame in place.
    pub fn map_top(&mut self, f: impl FnOnce(Context) -> Context) {
        if let Some(top) = self.stack.pop() {
            self.stack.push(f(top));
        }
    }
}

impl DocumentConstructor {
    /// Path of the value the innermost scope writes into.
    ///
    /// Each frame's key is followed from the previous scope, stepping into the
    /// last element whenever a list is met. The frame after a freeform list
    /// addresses the value of that list's last item instead, and the item's
    /// type has to match the frame's key.
    pub fn scope_path(&self) -> Result<DocPath, BuildError> {
        let mut path = DocPath::root();
        let mut current = &self.root;
        let mut in_freeform = false;
        for context in &self.stack {
            if in_freeform {
                let (index, last) = last_element(current, &path)?;
                let Value::FreeformItem(item) = last else {
                    return Err(BuildError::FreeformTagMismatch {
                        expected: context.key().to_string(),
                        found: last.kind().to_string(),
                        path: path.join(PathSegment::Index(index)),
                    });
                };
                path.push(PathSegment::Index(index));
                if item.kind != context.key() {
                    return Err(BuildError::FreeformTagMismatch {
                        expected: context.key().to_string(),
                        found: item.kind.clone(),
                        path,
                    });
                }
                path.push(PathSegment::ItemValue);
                current = &item.value;
            } else {
                for level in context.key().split('.') {
                    if let Value::List(_) = current {
                        let (index, last) = last_element(current, &path)?;
                        path.push(PathSegment::Index(index));
                        current = last;
                    }
                    let Value::Mapping(map) = current else {
                        return Err(BuildError::ExpectedMapping {
                            path,
                            found: current.kind(),
                        });
                    };
                    current = map.get(level).ok_or_else(|| BuildError::ScopeNotFound {
                        key: level.to_string(),
                        path: path.clone(),
                    })?;
                    path.key(level);
                }
            }
            in_freeform = context.is_freeform();
        }
        Ok(path)
    }

    fn scope_mut(&mut self) -> Result<(DocPath, &mut Value), BuildError> {
        let path = self.scope_path()?;
        match self.root.pointer_mut(&path) {
            Some(scope) => Ok((path, scope)),
            None => Err(BuildError::ScopeNotFound {
                key: path.to_string(),
                path: DocPath::root(),
            }),
        }
    }

    /// Set a dotted key path in the current scope, replacing whatever is
    /// stored at the leaf. Returns the leaf's path.
    ///
    /// When the scope is a list, the write goes into its last record, which
    /// is created when the list is empty.
    pub fn assign(&mut self, keys: &[&str], value: Value) -> Result<DocPath, BuildError> {
        self.write(keys, value, true)
    }

    /// Like [`DocumentConstructor::assign`] with an empty mapping, but an
    /// existing mapping at the leaf is kept.
    pub fn open_mapping(&mut self, keys: &[&str]) -> Result<DocPath, BuildError> {
        self.write(keys, Value::empty_mapping(), false)
    }

    fn write(
        &mut self,
        keys: &[&str],
        value: Value,
        replace: bool,
    ) -> Result<DocPath, BuildError> {
        let (mut path, scope) = self.scope_mut()?;
        let Some((leaf, parents)) = keys.split_last() else {
            return Ok(path);
        };
        let mut record = record_of(scope, &mut path);
        for key in parents {
            path.key(*key);
            record = record.mapping_entry(key);
        }
        path.key(*leaf);
        let keep = !replace
            && record
                .get(leaf)
                .is_some_and(|existing| existing.kind() == value.kind());
        if !keep {
            record.insert(*leaf, value);
        }
        Ok(path)
    }

    /// Append to the list the current scope addresses.
    pub fn append(&mut self, value: Value) -> Result<DocPath, BuildError> {
        let (path, scope) = self.scope_mut()?;
        let found = scope.kind();
        let Value::List(list) = scope else {
            return Err(BuildError::ExpectedList { path, found });
        };
        list.push(value);
        Ok(path.join(PathSegment::Index(list.len() - 1)))
    }

    /// Append a `{type, value}` item to the current freeform list.
    pub fn append_item(&mut self, kind: &str, value: Value) -> Result<DocPath, BuildError> {
        self.append(FreeformItem::new(kind, value).into())
    }

    /// Start a new record in the current list.
    pub fn new_record(&mut self) -> Result<DocPath, BuildError> {
        self.append(Value::empty_mapping())
    }

    /// Replace the value stored at `path`.
    pub fn overwrite(&mut self, path: &DocPath, value: Value) -> Result<(), BuildError> {
        let slot = self
            .root
            .pointer_mut(path)
            .ok_or_else(|| BuildError::DanglingAssignment { path: path.clone() })?;
        *slot = value;
        Ok(())
    }
}

fn last_element<'v>(
    value: &'v Value,
    path: &DocPath,
) -> Result<(usize, &'v Value), BuildError> {
    let Value::List(list) = value else {
        return Err(BuildError::ExpectedList {
            path: path.clone(),
            found: value.kind(),
        });
    };
    match list.last() {
        Some(last) => Ok((list.len() - 1, last)),
        None => Err(BuildError::EmptyList { path: path.clone() }),
    }
}

/// The mapping a keyed write lands in: the value itself, or the last record
/// of a list. Anything else is replaced by an empty mapping.
fn record_of<'v>(value: &'v mut Value, path: &mut DocPath) -> &'v mut Map {
    let value = match value {
        Value::List(list) => {
            // An empty list gets its first record at index 0.
            path.push(PathSegment::Index(list.len().saturating_sub(1)));
            list.last_or_push_with(Value::empty_mapping)
        }
        other => other,
    };
    value.require_mapping()
}
