use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::statement::{Command, Statement, StatementKind};
use crate::{GrammarError, RecognizerConfig, Result};

// Grammar: WS_INLINE* KEY WS_INLINE* ":" WS_INLINE* VALUE
static PAIR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*([A-Za-z0-9_.\-]+)[ \t]*:[ \t]*").unwrap());

// Grammar: WS_INLINE* "*" WS_INLINE* VALUE
static LIST_ITEM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\*[ \t]*").unwrap());

// Grammar: "{" WS_INLINE* KEY? WS_INLINE* "}" VALUE*
static BLOCK_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\{[ \t]*([A-Za-z0-9_.\-]*)[ \t]*\}").unwrap());

// Grammar: "[" WS_INLINE* [.+]* KEY? WS_INLINE* "]" VALUE*
static ARRAY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*\[[ \t]*([.+]*)([A-Za-z0-9_.\-]*)[ \t]*\]").unwrap());

// Alternation is leftmost-first, so `endskip` must come before `end`.
static DIRECTIVE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[ \t]*:(endskip|ignore|skip|end)").unwrap());

/// Decode raw bytes into text for recognition.
pub fn decode(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes).map_err(|e| GrammarError::InvalidEncoding {
        valid_up_to: e.valid_up_to(),
    })
}

/// Convert `\r\n` and lone `\r` to `\n`, and make sure the text ends with a
/// line terminator so the final statement is well-terminated.
pub fn normalize_newlines(text: &str) -> Cow<'_, str> {
    if !text.contains('\r') && text.ends_with('\n') {
        return Cow::Borrowed(text);
    }
    let mut normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    if !normalized.ends_with('\n') {
        normalized.push('\n');
    }
    Cow::Owned(normalized)
}

/// Recognize a normalized source with the default configuration.
///
/// See [`normalize_newlines`] for the expected input shape.
pub fn recognize(source: &str) -> Result<Vec<Statement<'_>>> {
    recognize_with_config(source, &RecognizerConfig::default())
}

/// Recognize a normalized source. Every line yields exactly one statement.
pub fn recognize_with_config<'a>(
    source: &'a str,
    config: &RecognizerConfig,
) -> Result<Vec<Statement<'a>>> {
    let mut statements = Vec::new();
    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line = index + 1;
        let body = raw.strip_suffix('\n').unwrap_or(raw);
        if let Some(max) = config.max_line_len {
            let len = body.chars().count();
            if len > max {
                return Err(GrammarError::LineTooLong { line, len, max });
            }
        }
        statements.push(Statement {
            line,
            raw,
            kind: classify(raw, body),
        });
    }
    debug!(statements = statements.len(), "recognized source");
    Ok(statements)
}

/// Classification priority: pair, list item, command, then comment.
fn classify<'a>(raw: &'a str, body: &'a str) -> StatementKind<'a> {
    if let Some(caps) = PAIR_REGEX.captures(body)
        && let (Some(whole), Some(key)) = (caps.get(0), caps.get(1))
    {
        return StatementKind::Pair {
            key: key.as_str(),
            raw_value: &raw[whole.end()..],
        };
    }

    if let Some(bullet) = LIST_ITEM_REGEX.find(body) {
        return StatementKind::ListItem {
            raw_value: &raw[bullet.end()..],
        };
    }

    if let Some(command) = recognize_command(body) {
        return StatementKind::Command(command);
    }

    StatementKind::Comment { raw_text: raw }
}

fn recognize_command(body: &str) -> Option<Command<'_>> {
    if let Some(caps) = BLOCK_REGEX.captures(body) {
        let key = caps.get(1)?.as_str();
        if key.trim_start_matches('.').is_empty() {
            return Some(Command::EndBlock);
        }
        return Some(Command::StartBlock { key });
    }

    if let Some(caps) = ARRAY_REGEX.captures(body) {
        let prefix = caps.get(1)?.as_str();
        let name = caps.get(2)?.as_str();
        if name.trim_start_matches('.').is_empty() {
            return Some(Command::EndArray);
        }
        let freeform = prefix.contains('+');
        let mut key = prefix.replacen('+', "", 1);
        key.push_str(name);
        return Some(Command::StartArray { key, freeform });
    }

    let caps = DIRECTIVE_REGEX.captures(body)?;
    let keyword = caps.get(1)?.as_str().to_ascii_lowercase();
    match keyword.as_str() {
        "endskip" => Some(Command::EndSkip),
        "ignore" => Some(Command::Ignore),
        "skip" => Some(Command::Skip),
        "end" => Some(Command::EndMultiline),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(source: &str) -> Vec<StatementKind<'_>> {
        recognize(source)
            .expect("recognition failed")
            .into_iter()
            .map(|statement| statement.kind)
            .collect()
    }

    fn single(source: &str) -> StatementKind<'_> {
        let mut kinds = kinds(source);
        assert_eq!(kinds.len(), 1, "expected a single statement");
        kinds.remove(0)
    }

    #[test]
    fn test_pair_keeps_raw_value() {
        assert_eq!(
            single("  title :  A Headline  \n"),
            StatementKind::Pair {
                key: "title",
                raw_value: "A Headline  \n"
            }
        );
    }

    #[test]
    fn test_pair_with_dotted_key() {
        assert_eq!(
            single("a.b-c_d.9: x\n"),
            StatementKind::Pair {
                key: "a.b-c_d.9",
                raw_value: "x\n"
            }
        );
    }

    #[test]
    fn test_pair_with_empty_value() {
        assert_eq!(
            single("key:\n"),
            StatementKind::Pair {
                key: "key",
                raw_value: "\n"
            }
        );
    }

    #[test]
    fn test_url_like_line_is_a_pair() {
        assert_eq!(
            single("http://example.com\n"),
            StatementKind::Pair {
                key: "http",
                raw_value: "//example.com\n"
            }
        );
    }

    #[test]
    fn test_key_with_embedded_space_is_comment() {
        assert_eq!(
            single("my key: value\n"),
            StatementKind::Comment {
                raw_text: "my key: value\n"
            }
        );
    }

    #[test]
    fn test_key_with_punctuation_is_comment() {
        assert_eq!(
            single("#key: value\n"),
            StatementKind::Comment {
                raw_text: "#key: value\n"
            }
        );
    }

    #[test]
    fn test_line_starting_with_colon_is_comment() {
        assert_eq!(
            single(": nothing\n"),
            StatementKind::Comment {
                raw_text: ": nothing\n"
            }
        );
    }

    #[test]
    fn test_list_item() {
        assert_eq!(
            single("  *   Jane \n"),
            StatementKind::ListItem {
                raw_value: "Jane \n"
            }
        );
    }

    #[test]
    fn test_pair_has_priority_over_bullet_text() {
        assert_eq!(
            single("* name: Jane\n"),
            StatementKind::ListItem {
                raw_value: "name: Jane\n"
            }
        );
    }

    #[test]
    fn test_blocks() {
        assert_eq!(
            single("{ scope.inner }\n"),
            StatementKind::Command(Command::StartBlock { key: "scope.inner" })
        );
        assert_eq!(single("{}\n"), StatementKind::Command(Command::EndBlock));
        assert_eq!(single("{ }\n"), StatementKind::Command(Command::EndBlock));
        assert_eq!(
            single("{.quote}\n"),
            StatementKind::Command(Command::StartBlock { key: ".quote" })
        );
    }

    #[test]
    fn test_block_with_invalid_key_is_comment() {
        assert_eq!(
            single("{a b}\n"),
            StatementKind::Comment {
                raw_text: "{a b}\n"
            }
        );
    }

    #[test]
    fn test_arrays() {
        assert_eq!(
            single("[crew]\n"),
            StatementKind::Command(Command::StartArray {
                key: "crew".to_string(),
                freeform: false
            })
        );
        assert_eq!(
            single("[+body]\n"),
            StatementKind::Command(Command::StartArray {
                key: "body".to_string(),
                freeform: true
            })
        );
        assert_eq!(
            single("[.+nested]\n"),
            StatementKind::Command(Command::StartArray {
                key: ".nested".to_string(),
                freeform: true
            })
        );
        assert_eq!(
            single("[..tags]\n"),
            StatementKind::Command(Command::StartArray {
                key: "..tags".to_string(),
                freeform: false
            })
        );
        assert_eq!(single("[]\n"), StatementKind::Command(Command::EndArray));
        assert_eq!(single("[ ]\n"), StatementKind::Command(Command::EndArray));
    }

    #[test]
    fn test_command_trailing_text_is_discarded() {
        assert_eq!(
            single("[] end of list\n"),
            StatementKind::Command(Command::EndArray)
        );
        assert_eq!(
            single("{meta} trailing\n"),
            StatementKind::Command(Command::StartBlock { key: "meta" })
        );
    }

    #[test]
    fn test_directives_are_case_insensitive() {
        assert_eq!(single(":SKIP\n"), StatementKind::Command(Command::Skip));
        assert_eq!(single(":EndSkip\n"), StatementKind::Command(Command::EndSkip));
        assert_eq!(single(":ignore\n"), StatementKind::Command(Command::Ignore));
        assert_eq!(
            single(":end\n"),
            StatementKind::Command(Command::EndMultiline)
        );
        assert_eq!(
            single(":END of the value\n"),
            StatementKind::Command(Command::EndMultiline)
        );
    }

    #[test]
    fn test_directive_keyword_must_follow_colon() {
        assert_eq!(
            single(": skip this part\n"),
            StatementKind::Comment {
                raw_text: ": skip this part\n"
            }
        );
        assert_eq!(
            single(": end\n"),
            StatementKind::Comment { raw_text: ": end\n" }
        );
        assert_eq!(
            single("  :\tignore\n"),
            StatementKind::Comment {
                raw_text: "  :\tignore\n"
            }
        );
        assert_eq!(single("  :skip\n"), StatementKind::Command(Command::Skip));
    }

    #[test]
    fn test_endskip_wins_over_end() {
        assert_eq!(
            single(":endskipping\n"),
            StatementKind::Command(Command::EndSkip)
        );
        assert_eq!(
            single(":ending\n"),
            StatementKind::Command(Command::EndMultiline)
        );
    }

    #[test]
    fn test_escaped_line_is_comment() {
        assert_eq!(
            single("\\:end\n"),
            StatementKind::Comment {
                raw_text: "\\:end\n"
            }
        );
        assert_eq!(
            single("\\key: value\n"),
            StatementKind::Comment {
                raw_text: "\\key: value\n"
            }
        );
    }

    #[test]
    fn test_blank_line_is_comment() {
        assert_eq!(
            single("   \n"),
            StatementKind::Comment { raw_text: "   \n" }
        );
    }

    #[test]
    fn test_statements_cover_every_line() {
        let source = "title: A\n\n[crew]\n* Jane\n[]\nprose\n";
        let statements = recognize(source).unwrap();
        assert_eq!(statements.len(), 6);
        let joined: String = statements.iter().map(|s| s.raw).collect();
        assert_eq!(joined, source);
        assert_eq!(
            statements.iter().map(|s| s.line).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
    }

    #[test]
    fn test_normalize_newlines() {
        assert_eq!(normalize_newlines("a\r\nb\rc"), "a\nb\nc\n");
        assert!(matches!(normalize_newlines("a\n"), Cow::Borrowed("a\n")));
        assert_eq!(normalize_newlines(""), "\n");
    }

    #[test]
    fn test_line_limit() {
        let config = RecognizerConfig::with_max_line_len(4);
        assert_eq!(
            recognize_with_config("ok\ntoo long\n", &config),
            Err(GrammarError::LineTooLong {
                line: 2,
                len: 8,
                max: 4
            })
        );
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        assert_eq!(
            decode(b"ab\xffcd"),
            Err(GrammarError::InvalidEncoding { valid_up_to: 2 })
        );
        assert_eq!(decode(b"key: value"), Ok("key: value"));
    }
}
