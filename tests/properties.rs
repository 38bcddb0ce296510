use proptest::prelude::*;
use tablegate::rules::{Directive, DirectiveList, Pattern, add_exclude};
use tablegate::should_emit;

fn name() -> impl Strategy<Value = String> {
    "[a-z_]{0,12}"
}

proptest! {
    #[test]
    fn absent_list_emits_every_name(candidate in any::<String>()) {
        prop_assert!(should_emit(None, candidate.as_str()).unwrap());
    }

    #[test]
    fn single_exact_include(literal in "[a-z_]{1,8}", candidate in name()) {
        let list: DirectiveList = [Directive::IncludeExact(literal.clone())].into_iter().collect();
        prop_assert_eq!(should_emit(Some(&list), candidate.as_str()).unwrap(), candidate == literal);
    }

    #[test]
    fn single_pattern_include(candidate in name()) {
        let list: DirectiveList = [Directive::IncludePattern(Pattern::compile("^t_.*").unwrap())]
            .into_iter()
            .collect();
        prop_assert_eq!(
            should_emit(Some(&list), candidate.as_str()).unwrap(),
            candidate.starts_with("t_")
        );
    }

    #[test]
    fn exclude_only_spares_everything_else(excluded in "[a-z_]{1,8}", candidate in name()) {
        let mut list = None;
        let raw = serde_json::json!({ "table": excluded }).to_string();
        add_exclude(&raw, &mut list).unwrap();
        prop_assert_eq!(should_emit(list.as_ref(), candidate.as_str()).unwrap(), candidate != excluded);
    }

    #[test]
    fn last_matching_directive_wins(literal in "[a-z]{1,6}", include_last in any::<bool>()) {
        let inc = Directive::IncludeExact(literal.clone());
        let exc = Directive::ExcludeExact(literal.clone());
        let ordered = if include_last { [exc, inc] } else { [inc, exc] };
        let list: DirectiveList = ordered.into_iter().collect();
        prop_assert_eq!(should_emit(Some(&list), literal.as_str()).unwrap(), include_last);
    }

    #[test]
    fn evaluation_is_idempotent(candidate in name()) {
        let list: DirectiveList = [
            Directive::IncludeAll,
            Directive::ExcludePattern(Pattern::compile("a").unwrap()),
            Directive::IncludeExact("banana".into()),
        ]
        .into_iter()
        .collect();
        let first = should_emit(Some(&list), candidate.as_str()).unwrap();
        let second = should_emit(Some(&list), candidate.as_str()).unwrap();
        prop_assert_eq!(first, second);
    }
}
