//! Property-based tests for admission rule scoping
//!
//! Uses proptest to check the decision invariants over random rules and requests

use admission_rbac::{
    AdmissionMatcher, AdmissionUserInfo, Criteria, ExcludeEvaluation, MatcherConfig, RequestInfo,
    Rule, Subject,
};
use proptest::prelude::*;

const NAMES: &[&str] = &["admin", "viewer", "editor", "ops", "devs", "bob", "sa1"];
const NAMESPACES: &[&str] = &["ns1", "ns2", "kube-system"];

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(NAMES).prop_map(str::to_string)
}

fn names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(name(), 0..3)
}

fn subject() -> impl Strategy<Value = Subject> {
    prop_oneof![
        name().prop_map(|name| Subject::user(name)),
        name().prop_map(|name| Subject::group(name)),
        (prop::sample::select(NAMESPACES), name())
            .prop_map(|(ns, name)| Subject::service_account(ns, name)),
    ]
}

fn criteria() -> impl Strategy<Value = Criteria> {
    (names(), names(), prop::collection::vec(subject(), 0..3)).prop_map(
        |(roles, cluster_roles, subjects)| Criteria {
            roles,
            cluster_roles,
            subjects,
        },
    )
}

fn rule() -> impl Strategy<Value = Rule> {
    (criteria(), criteria()).prop_map(|(m, e)| Rule::new("generated").with_match(m).with_exclude(e))
}

fn username() -> impl Strategy<Value = String> {
    prop_oneof![
        name(),
        (prop::sample::select(NAMESPACES), name())
            .prop_map(|(ns, name)| format!("system:serviceaccount:{}:{}", ns, name)),
    ]
}

fn request() -> impl Strategy<Value = RequestInfo> {
    (names(), names(), username(), names()).prop_map(|(roles, cluster_roles, username, groups)| {
        let mut user_info = AdmissionUserInfo::new(username);
        user_info.groups = groups;
        RequestInfo {
            roles,
            cluster_roles,
            admission_user_info: user_info,
        }
    })
}

fn matcher(mode: ExcludeEvaluation) -> AdmissionMatcher {
    AdmissionMatcher::with_config(MatcherConfig::default().with_exclude_evaluation(mode)).unwrap()
}

proptest! {
    #[test]
    fn prop_empty_request_always_applies(rule in rule()) {
        prop_assert!(AdmissionMatcher::new().applies(&rule, &RequestInfo::default()));
    }

    #[test]
    fn prop_empty_match_is_satisfied(request in request()) {
        prop_assert!(AdmissionMatcher::new().match_satisfied(&Criteria::new(), &request));
    }

    #[test]
    fn prop_empty_exclude_never_excludes(request in request()) {
        for mode in [ExcludeEvaluation::Sequential, ExcludeEvaluation::Parallel] {
            prop_assert!(!matcher(mode).exclude_satisfied(&Criteria::new(), &request));
        }
    }

    #[test]
    fn prop_applies_is_match_and_not_exclude(rule in rule(), request in request()) {
        let matcher = AdmissionMatcher::new();
        let expected = matcher.match_satisfied(&rule.match_resources, &request)
            && !matcher.exclude_satisfied(&rule.exclude_resources, &request);

        prop_assert_eq!(matcher.applies(&rule, &request), expected);
    }

    #[test]
    fn prop_match_is_conjunction_of_groups(match_criteria in criteria(), request in request()) {
        let matcher = AdmissionMatcher::new();
        let group = |criteria: Criteria| criteria.is_empty() || matcher.match_satisfied(&criteria, &request);

        let expected = group(Criteria { roles: match_criteria.roles.clone(), ..Criteria::new() })
            && group(Criteria { cluster_roles: match_criteria.cluster_roles.clone(), ..Criteria::new() })
            && group(Criteria { subjects: match_criteria.subjects.clone(), ..Criteria::new() });

        prop_assert_eq!(matcher.match_satisfied(&match_criteria, &request), expected);
    }

    #[test]
    fn prop_parallel_matches_sequential(rule in rule(), request in request()) {
        let sequential = matcher(ExcludeEvaluation::Sequential);
        let parallel = matcher(ExcludeEvaluation::Parallel);

        prop_assert_eq!(
            sequential.exclude_satisfied(&rule.exclude_resources, &request),
            parallel.exclude_satisfied(&rule.exclude_resources, &request)
        );
        prop_assert_eq!(sequential.applies(&rule, &request), parallel.applies(&rule, &request));
    }

    #[test]
    fn prop_subject_order_does_not_matter(rule in rule(), request in request()) {
        let matcher = AdmissionMatcher::new();
        let mut reordered = rule.clone();
        reordered.match_resources.subjects.reverse();
        reordered.exclude_resources.subjects.reverse();

        prop_assert_eq!(matcher.applies(&reordered, &request), matcher.applies(&rule, &request));
    }

    #[test]
    fn prop_idempotent(rule in rule(), request in request()) {
        let matcher = AdmissionMatcher::new();
        let first = matcher.applies(&rule, &request);
        prop_assert_eq!(matcher.applies(&rule, &request), first);
    }
}
