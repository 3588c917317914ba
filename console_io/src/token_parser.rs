//! Decompose input lines into tokens, sets, pairs and integers.
//!
//! Every `TokenReader::read_*` method consumes exactly one line from the
//! underlying [`LineReader`] and interprets it with one of the free functions
//! of this module. The functions can be used directly on text that did not
//! come from a stream.
//!
//! Separators are matched literally; there is no escaping.

use std::collections::{HashMap, HashSet};
use std::convert::Infallible;
use std::io::{BufRead, BufReader, Stdin};

use crate::error::ConsoleError;
use crate::line_reader::LineReader;

/// Split `line` on the literal separator `sep`, keeping empty tokens.
///
/// An empty separator splits the line into its characters.
#[must_use]
pub fn split_tokens(line: &str, sep: &str) -> Vec<String> {
    if sep.is_empty() {
        return line.chars().map(String::from).collect();
    }
    line.split(sep).map(str::to_string).collect()
}

/// Drop tokens that are empty or equal to the separator, keeping order.
#[must_use]
pub fn clean_tokens(tokens: Vec<String>, sep: &str) -> Vec<String> {
    tokens
        .into_iter()
        .filter(|token| !token.is_empty() && token != sep)
        .collect()
}

/// Deduplicate tokens; the empty string and the separator are never members.
#[must_use]
pub fn token_set(tokens: Vec<String>, sep: &str) -> HashSet<String> {
    let mut out: HashSet<String> = tokens.into_iter().collect();
    out.remove(sep);
    out.remove("");
    out
}

/// Pair tokens as `key value key value ...` after skipping `skip` tokens.
///
/// An unmatched trailing token becomes a key with an empty value, unless a
/// full pair uses the same key. Among full pairs, the last one wins.
#[must_use]
pub fn pair_tokens(tokens: &[String], skip: usize) -> HashMap<String, String> {
    let pairs = pair_up(tokens, skip, String::new(), |value| {
        Ok::<_, Infallible>(value.to_string())
    });
    match pairs {
        Ok(pairs) => pairs,
        Err(never) => match never {},
    }
}

/// Same pairing as [`pair_tokens`], but every value must be an integer.
/// An unmatched trailing token maps to `0`.
///
/// # Errors
/// Fails on the first value that is not a base-10 integer; no partial
/// result is returned.
pub fn pair_int_tokens(
    tokens: &[String],
    skip: usize,
) -> Result<HashMap<String, i64>, ConsoleError> {
    pair_up(tokens, skip, 0, parse_int)
}

fn pair_up<V, E>(
    tokens: &[String],
    skip: usize,
    trailing: V,
    mut value_of: impl FnMut(&str) -> Result<V, E>,
) -> Result<HashMap<String, V>, E> {
    let rest = tokens.get(skip..).unwrap_or_default();
    let mut out = HashMap::with_capacity(rest.len() / 2 + 1);

    // The unmatched trailing key goes in first, so a full pair with the
    // same key overrides it.
    let pairs = rest.chunks_exact(2);
    if let [key] = pairs.remainder() {
        out.insert(key.clone(), trailing);
    }
    for pair in pairs {
        if let [key, value] = pair {
            out.insert(key.clone(), value_of(value.as_str())?);
        }
    }
    Ok(out)
}

/// # Errors
/// Returns `ConsoleError::Parse` if `token` is not a base-10 integer.
pub fn parse_int(token: &str) -> Result<i64, ConsoleError> {
    token
        .parse::<i64>()
        .map_err(|e| ConsoleError::parse(token, e))
}

/// # Errors
/// Fails on the first token that is not a base-10 integer.
pub fn parse_int_tokens(tokens: &[String]) -> Result<Vec<i64>, ConsoleError> {
    tokens.iter().map(|token| parse_int(token)).collect()
}

/// Case-insensitive exact match of a response against the positive answer.
#[must_use]
pub fn is_positive_response(line: &str, positive: &str) -> bool {
    line.to_lowercase() == positive.to_lowercase()
}

/// Token-level reader built on top of [`LineReader`]
pub struct TokenReader<R> {
    lines: LineReader<R>,
}

impl<R: BufRead> TokenReader<R> {
    #[must_use]
    pub fn new(inner: R) -> Self {
        Self {
            lines: LineReader::new(inner),
        }
    }

    #[must_use]
    pub fn from_line_reader(lines: LineReader<R>) -> Self {
        Self { lines }
    }

    pub fn read_line(&mut self) -> String {
        self.lines.read_line()
    }

    pub fn next_line(&mut self) -> Option<String> {
        self.lines.next_line()
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.lines.is_exhausted()
    }

    pub fn read_array(&mut self, sep: &str) -> Vec<String> {
        split_tokens(&self.lines.read_line(), sep)
    }

    pub fn read_array_clean(&mut self, sep: &str) -> Vec<String> {
        clean_tokens(self.read_array(sep), sep)
    }

    pub fn read_hashset(&mut self, sep: &str) -> HashSet<String> {
        token_set(self.read_array(sep), sep)
    }

    pub fn read_pairs(&mut self, sep: &str, skip: usize) -> HashMap<String, String> {
        pair_tokens(&self.read_array_clean(sep), skip)
    }

    /// # Errors
    /// Fails if any value token is not an integer.
    pub fn read_string_int_pairs(
        &mut self,
        sep: &str,
        skip: usize,
    ) -> Result<HashMap<String, i64>, ConsoleError> {
        pair_int_tokens(&self.read_array_clean(sep), skip)
    }

    pub fn read_boolean(&mut self, positive_response: &str) -> bool {
        is_positive_response(&self.lines.read_line(), positive_response)
    }

    /// # Errors
    /// Fails if the line is not a base-10 integer.
    pub fn read_int(&mut self) -> Result<i64, ConsoleError> {
        parse_int(&self.lines.read_line())
    }

    /// # Errors
    /// Fails on the first token that is not an integer.
    pub fn read_int_array(&mut self, sep: &str) -> Result<Vec<i64>, ConsoleError> {
        parse_int_tokens(&self.read_array_clean(sep))
    }

    pub fn into_inner(self) -> R {
        self.lines.into_inner()
    }
}

impl TokenReader<BufReader<Stdin>> {
    #[must_use]
    pub fn stdin() -> Self {
        Self::from_line_reader(LineReader::stdin())
    }
}
