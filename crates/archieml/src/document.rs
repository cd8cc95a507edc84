mod interpreter;

use archieml_document::Value;
use archieml_grammar::{RecognizerConfig, decode, normalize_newlines, recognize_with_config};

use crate::document::interpreter::StatementInterpreter;
use crate::error::Error;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    pub recognizer: RecognizerConfig,
}

/// Parse a complete text into a document. The result is always a mapping.
pub fn parse(text: &str) -> Result<Value, Error> {
    parse_with_options(text, &ParseOptions::default())
}

pub fn parse_with_options(text: &str, options: &ParseOptions) -> Result<Value, Error> {
    let source = normalize_newlines(text);
    let statements = recognize_with_config(&source, &options.recognizer)?;
    let mut interpreter = StatementInterpreter::new();
    interpreter.interpret(&statements)?;
    Ok(interpreter.into_document())
}

/// Parse UTF-8 encoded bytes.
pub fn parse_bytes(bytes: &[u8]) -> Result<Value, Error> {
    parse(decode(bytes)?)
}
