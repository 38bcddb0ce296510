use log::debug;

use super::{Candidate, Directive};
use crate::error::Result;
use crate::parse::parse_entry;

/// Ordered, append-only sequence of directives. Later directives override
/// earlier ones for the same candidate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectiveList {
    directives: Vec<Directive>,
}

impl DirectiveList {
    pub fn iter(&self) -> std::slice::Iter<'_, Directive> {
        self.directives.iter()
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    fn push(&mut self, directive: Directive) {
        debug!("appending {} directive", directive.as_str());
        self.directives.push(directive);
    }

    /// Fold every directive over `candidate`, starting from `false`.
    ///
    /// All directives are visited; only an evaluation error stops the fold.
    pub fn evaluate(&self, candidate: &Candidate) -> Result<bool> {
        self.directives
            .iter()
            .try_fold(false, |decision, directive| directive.apply(decision, candidate))
    }
}

impl FromIterator<Directive> for DirectiveList {
    fn from_iter<I: IntoIterator<Item = Directive>>(iter: I) -> Self {
        Self {
            directives: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DirectiveList {
    type Item = &'a Directive;
    type IntoIter = std::slice::Iter<'a, Directive>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Append the directive for an `include` entry, allocating the list if needed.
///
/// The entry is parsed and compiled before the list is touched, so on error
/// `list` is left exactly as it was.
pub fn add_include(raw: &str, list: &mut Option<DirectiveList>) -> Result<()> {
    let directive = Directive::include(parse_entry("include", raw)?)?;
    list.get_or_insert_with(DirectiveList::default).push(directive);
    Ok(())
}

/// Append the directive for an `exclude` entry.
///
/// When the list is absent or empty at the start of this call an
/// `IncludeAll` goes in first, so excludes alone mean "everything but these".
pub fn add_exclude(raw: &str, list: &mut Option<DirectiveList>) -> Result<()> {
    let directive = Directive::exclude(parse_entry("exclude", raw)?)?;
    let list = list.get_or_insert_with(DirectiveList::default);
    if list.is_empty() {
        list.push(Directive::IncludeAll);
    }
    list.push(directive);
    Ok(())
}
