use std::borrow::Cow;
use std::cell::OnceCell;
use std::str::Utf8Error;

use crate::error::{Error, Result};

/// Anything the catalog can hand us a bare relation name for.
///
/// Names are bytes in the host's text encoding (UTF-8). Exact directives
/// compare the bytes directly; pattern directives need them as text.
pub trait Relation {
    /// The relation's bare (unqualified) name.
    fn relation_name(&self) -> &[u8];
}

impl Relation for str {
    fn relation_name(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Relation for String {
    fn relation_name(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Relation for [u8] {
    fn relation_name(&self) -> &[u8] {
        self
    }
}

/// A relation name being tested against a directive list.
#[derive(Debug)]
pub struct Candidate<'a> {
    /// The raw name bytes.
    pub raw: &'a [u8],
    /// UTF-8 view, decoded on first use by a pattern directive.
    text: OnceCell<std::result::Result<&'a str, Utf8Error>>,
}

impl<'a> Candidate<'a> {
    pub fn new(raw: &'a [u8]) -> Self {
        Self {
            raw,
            text: OnceCell::new(),
        }
    }

    pub fn from_relation<R: Relation + ?Sized>(relation: &'a R) -> Self {
        Self::new(relation.relation_name())
    }

    /// Byte-for-byte, case-sensitive comparison with a literal name.
    pub fn is(&self, name: &str) -> bool {
        self.raw == name.as_bytes()
    }

    /// The name as text, for the regex engine.
    pub fn text(&self) -> Result<&'a str> {
        let decoded = *self.text.get_or_init(|| std::str::from_utf8(self.raw));
        decoded.map_err(|source| Error::match_failure(self.display(), source))
    }

    /// Lossy rendering for log lines and error messages.
    pub fn display(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.raw)
    }
}
