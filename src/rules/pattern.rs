use fancy_regex::Regex;

use super::Candidate;
use crate::error::{Error, Result};

const WORD: &str = "0-9A-Za-z_";
const DIGIT: &str = "0-9";
const SPACE: &str = r"\t\n\x0B\x0C\r ";

/// A regular expression compiled once when its directive is built.
///
/// Matching is a search: the pattern may match anywhere in the name unless
/// it anchors itself with `^`/`$`. Lookaround and backreferences are
/// available. `\w`, `\d` and `\s` are ASCII-only, as under C collation.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn compile(source: &str) -> Result<Self> {
        let regex = Regex::new(&ascii_classes(source)).map_err(|e| Error::InvalidPattern {
            pattern: source.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// The pattern source text, as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, candidate: &Candidate) -> Result<bool> {
        let text = candidate.text()?;
        self.regex
            .is_match(text)
            .map_err(|e| Error::match_failure(candidate.display(), e))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

/// Rewrite the class escapes `\w \d \s` (and negations) as explicit ASCII sets.
///
/// Inside a bracket expression only the positive escapes are rewritten; a
/// negated escape there has no bracket-free ASCII spelling and is kept.
fn ascii_classes(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut chars = source.chars().peekable();
    let mut depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let Some(next) = chars.next() else {
                    out.push(c);
                    break;
                };
                let set = match next.to_ascii_lowercase() {
                    'w' => Some(WORD),
                    'd' => Some(DIGIT),
                    's' => Some(SPACE),
                    _ => None,
                };
                match (set, next.is_ascii_uppercase(), depth) {
                    (Some(set), false, 0) => {
                        out.push('[');
                        out.push_str(set);
                        out.push(']');
                    }
                    (Some(set), false, _) => out.push_str(set),
                    (Some(set), true, 0) => {
                        out.push_str("[^");
                        out.push_str(set);
                        out.push(']');
                    }
                    _ => {
                        out.push('\\');
                        out.push(next);
                    }
                }
            }
            '[' => {
                out.push('[');
                depth += 1;
                // a `]` right after the opening bracket (or `[^`) is literal
                if depth == 1 {
                    if chars.peek() == Some(&'^') {
                        out.push('^');
                        chars.next();
                    }
                    if chars.peek() == Some(&']') {
                        out.push(']');
                        chars.next();
                    }
                }
            }
            ']' if depth > 0 => {
                depth -= 1;
                out.push(']');
            }
            _ => out.push(c),
        }
    }
    out
}
