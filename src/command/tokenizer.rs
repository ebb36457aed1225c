//! Command-line tokenizer: quote protection, splitting, and token
//! classification against the flag grammar.

use crate::command::spec::{Value, ValueKind};

/// Stand-in for spaces inside quoted runs while the line is split. A control
/// character no terminal line feeds us, so restoring it is unambiguous.
const SPACE_PLACEHOLDER: char = '\u{1}';

/// Split a raw command line into tokens.
///
/// Runs quoted with matching `"…"` or `'…'` keep their embedded spaces; the
/// quote characters themselves are stripped. Outside quotes the line splits
/// on single spaces and empty tokens are dropped. An unterminated quote
/// extends to the end of the line.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut protected = String::with_capacity(line.len());
    let mut quote: Option<char> = None;

    for ch in line.chars() {
        match quote {
            None if ch == '"' || ch == '\'' => quote = Some(ch),
            None => protected.push(ch),
            Some(open) if ch == open => quote = None,
            Some(_) if ch == ' ' => protected.push(SPACE_PLACEHOLDER),
            Some(_) => protected.push(ch),
        }
    }

    protected
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| token.replace(SPACE_PLACEHOLDER, " "))
        .collect()
}

/// A token classified against the flag grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `-name`, `--name`, `--name=value`, or `--name:value`.
    Flag { name: String, value: Option<String> },
    /// Anything else, collected in positional order.
    Positional(String),
}

/// Classify one token. The flag pattern is `--?[A-Za-z0-9-]+([=:].*)?`;
/// everything else is positional.
pub fn classify(token: &str) -> Token {
    let body = token
        .strip_prefix("--")
        .or_else(|| token.strip_prefix('-'));
    let Some(body) = body else {
        return Token::Positional(token.to_owned());
    };

    let (name, value) = match body.find(['=', ':']) {
        Some(position) => (&body[..position], Some(body[position + 1..].to_owned())),
        None => (body, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Token::Positional(token.to_owned());
    }

    Token::Flag {
        name: name.to_owned(),
        value,
    }
}

/// Generic value coercion: the literals `true`/`false` become booleans, a
/// token that parses as a number becomes a number, anything else stays a
/// string.
pub fn coerce(raw: &str) -> Value {
    match raw {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => match raw.parse::<f64>() {
            Ok(number) => Value::Num(number),
            Err(_) => Value::Str(raw.to_owned()),
        },
    }
}

/// Coerce a raw token against a declared kind.
///
/// String-kinded specs take the token verbatim, so a directory named `42` or
/// `true` stays a name. Boolean and numeric kinds go through the generic
/// rules.
pub fn coerce_as(kind: ValueKind, raw: &str) -> Value {
    match kind {
        ValueKind::Str => Value::Str(raw.to_owned()),
        ValueKind::Bool | ValueKind::Num => coerce(raw),
    }
}
