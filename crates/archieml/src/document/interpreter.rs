use std::borrow::Cow;

use archieml_document::{
    BuildError, Context, DocPath, DocumentConstructor, FreeformItem, Value, squash_prefix,
};
use archieml_grammar::{Command, Statement, StatementKind};
use tracing::{debug, trace};

enum Flow {
    Continue,
    Stop,
}

/// Folds recognized statements into a document.
///
/// Besides the constructor's scope stack it keeps the pending multiline
/// buffer, the location of the last scalar assignment and the skip flag.
pub(crate) struct StatementInterpreter {
    document: DocumentConstructor,
    // Raw text accumulated for the last assignment, line terminators included
    buffer: String,
    last_assignment: Option<DocPath>,
    skipping: bool,
}

impl StatementInterpreter {
    pub fn new() -> Self {
        Self {
            document: DocumentConstructor::new(),
            buffer: String::new(),
            last_assignment: None,
            skipping: false,
        }
    }

    pub fn interpret(&mut self, statements: &[Statement<'_>]) -> Result<(), BuildError> {
        for statement in statements {
            if let Flow::Stop = self.statement(statement)? {
                debug!(line = statement.line, "ignore directive, stopping");
                break;
            }
        }
        Ok(())
    }

    pub fn into_document(self) -> Value {
        self.document.finish()
    }

    fn statement(&mut self, statement: &Statement<'_>) -> Result<Flow, BuildError> {
        if self.skipping && !matches!(statement.kind, StatementKind::Command(Command::EndSkip)) {
            trace!(line = statement.line, kind = statement.kind_name(), "skipped");
            return Ok(Flow::Continue);
        }
        trace!(line = statement.line, kind = statement.kind_name(), "statement");

        match &statement.kind {
            StatementKind::Pair { key, raw_value } => self.pair(statement, key, raw_value)?,
            StatementKind::ListItem { raw_value } => self.list_item(statement, raw_value)?,
            StatementKind::Comment { raw_text } => self.comment(raw_text)?,
            StatementKind::Command(command) => return self.command(statement.line, command),
        }
        Ok(Flow::Continue)
    }

    fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.last_assignment = None;
    }

    /// Make `path` the target of a later `:end`, seeding the buffer with the
    /// untrimmed value.
    fn remember(&mut self, path: DocPath, raw_value: &str) {
        self.last_assignment = Some(path);
        self.buffer.push_str(raw_value);
    }
}

impl StatementInterpreter {
    fn pair(
        &mut self,
        statement: &Statement<'_>,
        key: &str,
        raw_value: &str,
    ) -> Result<(), BuildError> {
        let keys: Vec<&str> = key.split('.').collect();
        let value = Value::from(raw_value.trim());

        match self.document.top() {
            None | Some(Context::Namespace { .. }) => {
                self.clear_buffer();
                let path = self.document.assign(&keys, value)?;
                self.remember(path, raw_value);
            }
            Some(Context::AmbiguousList { .. }) => {
                self.clear_buffer();
                self.document.map_top(|top| top.into_object_list(key));
                let path = self.document.assign(&keys, value)?;
                self.remember(path, raw_value);
            }
            Some(Context::ObjectList { first_key, .. }) => {
                let starts_record = first_key == key;
                self.clear_buffer();
                if starts_record {
                    self.document.new_record()?;
                }
                let path = self.document.assign(&keys, value)?;
                self.remember(path, raw_value);
            }
            Some(Context::FreeformList { .. }) => {
                self.clear_buffer();
                self.document.append_item(key, value)?;
            }
            Some(Context::StringList { .. }) => {
                debug!(line = statement.line, key, "pair inside a string list, read as text");
                self.comment(statement.raw)?;
            }
        }
        Ok(())
    }

    fn list_item(
        &mut self,
        statement: &Statement<'_>,
        raw_value: &str,
    ) -> Result<(), BuildError> {
        match self.document.top() {
            Some(Context::AmbiguousList { .. } | Context::StringList { .. }) => {
                self.clear_buffer();
                self.document.map_top(Context::into_string_list);
                let path = self.document.append(Value::from(raw_value.trim()))?;
                self.remember(path, raw_value);
            }
            _ => {
                debug!(line = statement.line, "list item outside a list, read as text");
                self.comment(statement.raw)?;
            }
        }
        Ok(())
    }

    fn comment(&mut self, raw_text: &str) -> Result<(), BuildError> {
        let text = unescape(raw_text);
        if self.document.top().is_some_and(Context::is_freeform) {
            let text = text.trim();
            if !text.is_empty() {
                self.document.append_item(FreeformItem::TEXT, Value::from(text))?;
            }
        } else {
            self.buffer.push_str(&text);
        }
        Ok(())
    }
}

impl StatementInterpreter {
    fn command(&mut self, line: usize, command: &Command<'_>) -> Result<Flow, BuildError> {
        match command {
            Command::StartBlock { key } => self.start_block(line, key)?,
            Command::EndBlock => {
                if self.document.pop().is_none() {
                    debug!(line, "end of block with no open scope");
                }
            }
            Command::StartArray { key, freeform } => self.start_array(key, *freeform)?,
            Command::EndArray => {
                if self.document.top().is_some_and(Context::is_list) {
                    self.document.pop();
                } else {
                    debug!(line, "end of array outside an array");
                }
            }
            Command::Skip => {
                self.skipping = true;
                self.clear_buffer();
            }
            Command::EndSkip => self.skipping = false,
            Command::Ignore => return Ok(Flow::Stop),
            Command::EndMultiline => self.end_multiline()?,
        }
        Ok(Flow::Continue)
    }

    fn start_block(&mut self, line: usize, key: &str) -> Result<(), BuildError> {
        self.clear_buffer();
        let key = squash_prefix(".", key);

        match key.strip_prefix('.') {
            Some(relative) => {
                if self.document.top().is_some_and(Context::is_freeform) {
                    self.document.append_item(relative, Value::empty_mapping())?;
                    self.document.push(Context::namespace(relative));
                } else {
                    debug!(line, key = relative, "relative block outside a freeform array");
                }
            }
            None => {
                self.document.reset();
                let keys: Vec<&str> = key.split('.').collect();
                self.document.open_mapping(&keys)?;
                self.document.push(Context::namespace(&*key));
            }
        }
        Ok(())
    }

    fn start_array(&mut self, key: &str, freeform: bool) -> Result<(), BuildError> {
        self.clear_buffer();
        let key = squash_prefix(".", key);

        let Some(relative) = key.strip_prefix('.') else {
            self.document.reset();
            let keys: Vec<&str> = key.split('.').collect();
            self.document.assign(&keys, Value::empty_list())?;
            self.document.push(Context::list(&*key, freeform));
            return Ok(());
        };

        let keys: Vec<&str> = relative.split('.').collect();
        match self.document.top() {
            None | Some(Context::Namespace { .. }) => {
                self.document.assign(&keys, Value::empty_list())?;
            }
            Some(Context::AmbiguousList { .. }) => {
                self.document.assign(&keys, Value::empty_list())?;
                self.document.map_top(|top| top.into_object_list(relative));
            }
            Some(Context::ObjectList { first_key, .. }) => {
                if first_key == relative {
                    self.document.new_record()?;
                }
                self.document.assign(&keys, Value::empty_list())?;
            }
            Some(Context::FreeformList { .. }) => {
                self.document.append_item(relative, Value::empty_list())?;
            }
            Some(Context::StringList { .. }) => {
                // A string list cannot hold the field; open it in the enclosing scope.
                self.document.pop();
                return self.start_array(&key, freeform);
            }
        }
        self.document.push(Context::list(relative, freeform));
        Ok(())
    }

    fn end_multiline(&mut self) -> Result<(), BuildError> {
        if let Some(path) = self.last_assignment.take() {
            self.document.overwrite(&path, Value::from(self.buffer.trim()))?;
            self.buffer.clear();
        }
        Ok(())
    }
}

/// Drop the backslash that escapes a line, keeping its indentation.
fn unescape(text: &str) -> Cow<'_, str> {
    let body = text.trim_start();
    match body.strip_prefix('\\') {
        Some(rest) => {
            let indent = &text[..text.len() - body.len()];
            Cow::Owned(format!("{indent}{rest}"))
        }
        None => Cow::Borrowed(text),
    }
}
