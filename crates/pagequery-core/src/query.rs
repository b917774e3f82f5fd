//! Raw query text -> [`StructuredQuery`].
//!
//! Recognised token forms:
//!
//! | Token            | Meaning                         |
//! |------------------|---------------------------------|
//! | `ns:wiki:syntax` | restrict to namespace (first wins) |
//! | `@wiki`          | same as `ns:wiki`               |
//! | `-ns:playground` | exclude namespace               |
//! | `^playground`    | same as `-ns:playground`        |
//! | `"two words"`    | one literal highlight term      |
//! | anything else    | highlight term                  |

use crate::models::StructuredQuery;
use crate::page_id::NAMESPACE_SEPARATOR;

const SCOPE_PREFIX: &str = "ns:";
const EXCLUDE_PREFIX: &str = "-ns:";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Phrase(String),
}

/// Never fails; empty input gives `StructuredQuery::default()`. Namespace
/// paths are split but not validated.
#[must_use]
pub fn parse_query(raw: &str) -> StructuredQuery {
    let mut query = StructuredQuery::default();

    for token in tokenize(raw) {
        let word = match token {
            Token::Phrase(phrase) => {
                query.highlight_terms.push(phrase);
                continue;
            }
            Token::Word(word) => word,
        };

        if let Some(path) = strip_prefix_ignore_case(&word, SCOPE_PREFIX).or_else(|| word.strip_prefix('@')) {
            let segments = namespace_segments(path);
            if query.namespace_scope.is_none() && !segments.is_empty() {
                query.namespace_scope = Some(segments);
            }
            continue;
        }

        if let Some(path) = strip_prefix_ignore_case(&word, EXCLUDE_PREFIX).or_else(|| word.strip_prefix('^')) {
            let segments = namespace_segments(path);
            if !segments.is_empty() && !query.excluded_namespaces.contains(&segments) {
                query.excluded_namespaces.push(segments);
            }
            continue;
        }

        query.highlight_terms.push(word);
    }

    query
}

fn tokenize(raw: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in raw.chars() {
        if ch == '"' {
            flush(&mut tokens, &mut current, quoted);
            quoted = !quoted;
            continue;
        }
        if ch.is_whitespace() && !quoted {
            flush(&mut tokens, &mut current, false);
            continue;
        }
        current.push(ch);
    }
    flush(&mut tokens, &mut current, quoted);

    tokens
}

fn flush(tokens: &mut Vec<Token>, current: &mut String, phrase: bool) {
    let text = std::mem::take(current);
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return;
    }
    if phrase {
        tokens.push(Token::Phrase(trimmed.to_string()));
    } else {
        tokens.push(Token::Word(text));
    }
}

fn strip_prefix_ignore_case<'a>(word: &'a str, prefix: &str) -> Option<&'a str> {
    let head = word.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        word.get(prefix.len()..)
    } else {
        None
    }
}

fn namespace_segments(path: &str) -> Vec<String> {
    path.split(NAMESPACE_SEPARATOR)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(ToString::to_string)
        .collect()
}
