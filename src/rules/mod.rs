pub mod candidate;
pub mod directive;
pub mod list;
pub mod pattern;

pub use candidate::{Candidate, Relation};
pub use directive::Directive;
pub use list::{DirectiveList, add_exclude, add_include};
pub use pattern::Pattern;

use log::{debug, trace};

use crate::error::{Error, Result};

/// Decide whether changes to `relation` should be emitted.
///
/// With no directive list at all everything is emitted. Otherwise the list
/// is folded from `false` and the last applicable directive wins.
pub fn should_emit<R: Relation + ?Sized>(
    list: Option<&DirectiveList>,
    relation: &R,
) -> Result<bool> {
    let Some(list) = list else {
        return Ok(true);
    };

    let candidate = Candidate::from_relation(relation);
    let emit = list.evaluate(&candidate)?;

    debug!(
        "table \"{}\" matches include commands: {}",
        candidate.display(),
        if emit { "yes" } else { "no" }
    );
    Ok(emit)
}

/// The inclusion rules of one replication session.
///
/// Built from the session's options before decoding starts, then only read.
/// It is `Sync`, so filtering calls may share it by reference.
#[derive(Debug, Clone, Default)]
pub struct RuleSet {
    tables: Option<DirectiveList>,
}

impl RuleSet {
    /// A rule set with no directives: every relation is emitted.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from ordered `(name, value)` session options.
    ///
    /// `include` and `exclude` options become directives in the order given;
    /// other option names belong to other layers and are skipped.
    pub fn from_options<I, K, V>(options: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, Option<V>)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut rules = Self::new();
        for (name, value) in options {
            rules.apply_option(name.as_ref(), value.as_ref().map(|v| v.as_ref()))?;
        }
        Ok(rules)
    }

    /// Apply a single session option.
    pub fn apply_option(&mut self, name: &str, value: Option<&str>) -> Result<()> {
        match (name, value) {
            ("include", Some(raw)) => self.include(raw),
            ("exclude", Some(raw)) => self.exclude(raw),
            ("include" | "exclude", None) => Err(Error::invalid_config(
                name,
                "",
                "a json object value is required",
            )),
            _ => {
                trace!("option \"{name}\" is not an inclusion rule; skipped");
                Ok(())
            }
        }
    }

    pub fn include(&mut self, raw: &str) -> Result<()> {
        add_include(raw, &mut self.tables)
    }

    pub fn exclude(&mut self, raw: &str) -> Result<()> {
        add_exclude(raw, &mut self.tables)
    }

    /// The directive list, or `None` when no rule was ever configured.
    pub fn directives(&self) -> Option<&DirectiveList> {
        self.tables.as_ref()
    }

    pub fn should_emit<R: Relation + ?Sized>(&self, relation: &R) -> Result<bool> {
        should_emit(self.directives(), relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules(options: &[(&str, &str)]) -> RuleSet {
        RuleSet::from_options(options.iter().map(|(k, v)| (*k, Some(*v)))).unwrap()
    }

    #[test]
    fn absent_list_emits_everything() {
        assert!(should_emit(None, "anything").unwrap());
        assert!(RuleSet::new().should_emit("other").unwrap());
    }

    #[test]
    fn include_pattern_then_exclude_exact() {
        let rs = rules(&[
            ("include", r#"{"tables": "^pub_"}"#),
            ("exclude", r#"{"table": "pub_secret"}"#),
        ]);
        assert!(rs.should_emit("pub_users").unwrap());
        assert!(!rs.should_emit("pub_secret").unwrap());
        assert!(!rs.should_emit("other").unwrap());
    }

    #[test]
    fn unrelated_options_skipped() {
        let rs = RuleSet::from_options([
            ("pretty-print", None),
            ("include", Some(r#"{"table": "a"}"#)),
            ("write-in-chunks", Some("1")),
        ])
        .unwrap();
        assert_eq!(rs.directives().map(DirectiveList::len), Some(1));
    }

    #[test]
    fn only_unrelated_options_leaves_list_absent() {
        let rs = RuleSet::from_options([("pretty-print", Some("1"))]).unwrap();
        assert!(rs.directives().is_none());
        assert!(rs.should_emit("x").unwrap());
    }

    #[test]
    fn include_without_value_rejected() {
        let err = RuleSet::from_options([("include", None::<&str>)]).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { ref option, .. } if option == "include"));
    }

    #[test]
    fn first_bad_option_aborts_build() {
        let err = RuleSet::from_options([
            ("include", Some(r#"{"table": "a"}"#)),
            ("exclude", Some(r#"{"tables": "(unclosed"}"#)),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::InvalidPattern { .. }));
    }

    #[test]
    fn evaluation_is_repeatable() {
        let rs = rules(&[("exclude", r#"{"tables": "_audit$"}"#)]);
        for _ in 0..3 {
            assert!(!rs.should_emit("orders_audit").unwrap());
            assert!(rs.should_emit("orders").unwrap());
        }
    }

    #[test]
    fn owned_and_byte_names() {
        let rs = rules(&[("include", r#"{"table": "t"}"#)]);
        assert!(rs.should_emit(&String::from("t")).unwrap());
        assert!(rs.should_emit(b"t".as_slice()).unwrap());
    }
}
