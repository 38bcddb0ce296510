use super::{Candidate, Pattern};
use crate::error::Result;
use crate::parse::TableSpec;

/// One rule in a [`DirectiveList`](super::DirectiveList).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    IncludeAll,
    IncludeExact(String),
    ExcludeExact(String),
    IncludePattern(Pattern),
    ExcludePattern(Pattern),
}

impl Directive {
    /// Build the include form of a parsed entry, compiling `tables` patterns.
    pub fn include(spec: TableSpec) -> Result<Self> {
        Ok(match spec {
            TableSpec::Table(name) => Directive::IncludeExact(name),
            TableSpec::Tables(source) => Directive::IncludePattern(Pattern::compile(&source)?),
        })
    }

    /// Build the exclude form of a parsed entry.
    pub fn exclude(spec: TableSpec) -> Result<Self> {
        Ok(match Self::include(spec)? {
            Directive::IncludeExact(name) => Directive::ExcludeExact(name),
            Directive::IncludePattern(pattern) => Directive::ExcludePattern(pattern),
            other => other,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Directive::IncludeAll => "include_all",
            Directive::IncludeExact(_) => "include_table",
            Directive::ExcludeExact(_) => "exclude_table",
            Directive::IncludePattern(_) => "include_table_pattern",
            Directive::ExcludePattern(_) => "exclude_table_pattern",
        }
    }

    /// Transition the running decision for `candidate`.
    ///
    /// Directives whose condition does not hold leave `decision` unchanged.
    pub fn apply(&self, decision: bool, candidate: &Candidate) -> Result<bool> {
        Ok(match self {
            Directive::IncludeAll => true,
            Directive::IncludeExact(name) if candidate.is(name) => true,
            Directive::ExcludeExact(name) if candidate.is(name) => false,
            Directive::IncludePattern(p) if p.is_match(candidate)? => true,
            Directive::ExcludePattern(p) if p.is_match(candidate)? => false,
            _ => decision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn apply(d: &Directive, decision: bool, name: &str) -> bool {
        d.apply(decision, &Candidate::from_relation(name)).unwrap()
    }

    #[test]
    fn include_all_always_sets() {
        assert!(apply(&Directive::IncludeAll, false, "anything"));
        assert!(apply(&Directive::IncludeAll, true, "anything"));
    }

    #[test]
    fn exact_directives() {
        let inc = Directive::IncludeExact("t".into());
        let exc = Directive::ExcludeExact("t".into());
        assert!(apply(&inc, false, "t"));
        assert!(!apply(&inc, false, "t2"));
        assert!(apply(&inc, true, "t2"));
        assert!(!apply(&exc, true, "t"));
        assert!(apply(&exc, true, "T"));
    }

    #[test]
    fn pattern_search_is_unanchored() {
        let inc = Directive::IncludePattern(Pattern::compile("log").unwrap());
        assert!(apply(&inc, false, "audit_log_2024"));
        assert!(!apply(&inc, false, "audit"));
    }

    #[test]
    fn anchored_pattern() {
        let exc = Directive::ExcludePattern(Pattern::compile("^tmp_").unwrap());
        assert!(!apply(&exc, true, "tmp_x"));
        assert!(apply(&exc, true, "x_tmp_"));
    }

    #[test]
    fn exclude_remaps_kind() {
        let d = Directive::exclude(TableSpec::Table("t".into())).unwrap();
        assert_eq!(d, Directive::ExcludeExact("t".into()));
        let d = Directive::exclude(TableSpec::Tables("^a".into())).unwrap();
        assert_eq!(d.as_str(), "exclude_table_pattern");
    }

    #[test]
    fn bad_pattern_fails_at_build() {
        let err = Directive::include(TableSpec::Tables("(".into())).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { ref pattern, .. } if pattern == "("));
    }

    #[test]
    fn pattern_on_invalid_utf8_is_match_failure() {
        let inc = Directive::IncludePattern(Pattern::compile("x").unwrap());
        let raw: &[u8] = b"\xfex";
        let err = inc.apply(false, &Candidate::from_relation(raw)).unwrap_err();
        assert!(matches!(err, Error::MatchFailure { .. }));
    }

    #[test]
    fn exact_on_invalid_utf8_does_not_fail() {
        let exc = Directive::ExcludeExact("x".into());
        let raw: &[u8] = b"\xfex";
        assert!(exc.apply(true, &Candidate::from_relation(raw)).unwrap());
    }
}
