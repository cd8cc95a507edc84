/// One recognized source line.
///
/// Text fields borrow from the normalized source and are kept literal:
/// values include their trailing line terminator and are never trimmed here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement<'a> {
    /// 1-based line number in the normalized source.
    pub line: usize,
    /// The whole line, including its terminating `\n` when present.
    pub raw: &'a str,
    pub kind: StatementKind<'a>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind<'a> {
    /// `key: value`
    Pair { key: &'a str, raw_value: &'a str },
    /// `* value`
    ListItem { raw_value: &'a str },
    Command(Command<'a>),
    /// Anything else, including blank and backslash-escaped lines.
    Comment { raw_text: &'a str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command<'a> {
    /// `{key}`
    StartBlock { key: &'a str },
    /// `{}`
    EndBlock,
    /// `[key]`, or `[+key]` when `freeform` is set. The freeform marker is
    /// already removed from `key`; leading `.` separators are kept.
    StartArray { key: String, freeform: bool },
    /// `[]`
    EndArray,
    /// `:skip`
    Skip,
    /// `:endskip`
    EndSkip,
    /// `:ignore`
    Ignore,
    /// `:end`
    EndMultiline,
}

impl Statement<'_> {
    /// Short name of the statement kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            StatementKind::Pair { .. } => "pair",
            StatementKind::ListItem { .. } => "list_item",
            StatementKind::Command(command) => command.name(),
            StatementKind::Comment { .. } => "comment",
        }
    }
}

impl Command<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Command::StartBlock { .. } => "start_block",
            Command::EndBlock => "end_block",
            Command::StartArray { .. } => "start_array",
            Command::EndArray => "end_array",
            Command::Skip => "skip",
            Command::EndSkip => "end_skip",
            Command::Ignore => "ignore",
            Command::EndMultiline => "end_multiline",
        }
    }
}
