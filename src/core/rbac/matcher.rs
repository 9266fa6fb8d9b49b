//! Admission matcher
//!
//! Top-level entry point: combines the match and exclude decisions of a rule
//! for one resolved request.

use super::criteria::CriteriaEvaluator;
use super::policy::{ExcludeResources, MatchResources, Rule};
use super::request::RequestInfo;
use crate::config::MatcherConfig;
use crate::error::Result;
use tracing::debug;
use validator::Validate;

/// Decides whether policy rules are in scope for admission requests
#[derive(Debug, Clone, Default)]
pub struct AdmissionMatcher {
    config: MatcherConfig,
}

impl AdmissionMatcher {
    /// Create a matcher with the default config
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a matcher from a config, rejecting invalid settings
    pub fn with_config(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(AdmissionMatcher { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Return true if the rule applies to the request
    ///
    /// An empty `request` means there is no live requester (resources that
    /// already exist are being processed), so role bindings cannot narrow
    /// the rule and it always applies.
    ///
    /// # Examples
    ///
    /// ```
    /// use admission_rbac::{AdmissionMatcher, AdmissionUserInfo, Criteria, RequestInfo, Rule, Subject};
    ///
    /// let matcher = AdmissionMatcher::new();
    /// let rule = Rule::new("require-labels")
    ///     .with_match(Criteria::new().with_role("admin"))
    ///     .with_exclude(Criteria::new().with_subject(Subject::user("bob")));
    ///
    /// let alice = RequestInfo::new(AdmissionUserInfo::new("alice")).with_role("admin");
    /// let bob = RequestInfo::new(AdmissionUserInfo::new("bob")).with_role("admin");
    ///
    /// assert!(matcher.applies(&rule, &alice));
    /// assert!(!matcher.applies(&rule, &bob));
    /// assert!(matcher.applies(&rule, &RequestInfo::default()));
    /// ```
    pub fn applies(&self, rule: &Rule, request: &RequestInfo) -> bool {
        if request.is_empty() {
            debug!(rule = %rule.name, "no request context, rule applies");
            return true;
        }

        let evaluator = self.evaluator(request);
        if !evaluator.match_satisfied(&rule.match_resources) {
            debug!(rule = %rule.name, "match criteria not satisfied, rule skipped");
            return false;
        }

        if evaluator.exclude_satisfied(&rule.exclude_resources, self.config.exclude_evaluation) {
            debug!(rule = %rule.name, "request excluded, rule skipped");
            return false;
        }

        debug!(rule = %rule.name, "rule applies");
        true
    }

    /// Return true if every non-empty group of `criteria` intersects the request
    pub fn match_satisfied(&self, criteria: &MatchResources, request: &RequestInfo) -> bool {
        self.evaluator(request).match_satisfied(criteria)
    }

    /// Return true if the request falls under a non-empty exclude set
    pub fn exclude_satisfied(&self, criteria: &ExcludeResources, request: &RequestInfo) -> bool {
        self.evaluator(request)
            .exclude_satisfied(criteria, self.config.exclude_evaluation)
    }

    fn evaluator<'r>(&'r self, request: &'r RequestInfo) -> CriteriaEvaluator<'r> {
        CriteriaEvaluator::new(request, &self.config.service_account_prefix)
    }
}

/// Return true if the rule applies to the request, using default settings
pub fn match_admission_info(rule: &Rule, request: &RequestInfo) -> bool {
    AdmissionMatcher::default().applies(rule, request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExcludeEvaluation;
    use crate::error::RbacError;
    use crate::rbac::{AdmissionUserInfo, Criteria, Subject};

    #[test]
    fn test_match_then_exclude() {
        let matcher = AdmissionMatcher::new();
        let rule = Rule::new("ops-only")
            .with_match(Criteria::new().with_cluster_role("ops"))
            .with_exclude(Criteria::new().with_subject(Subject::group("break-glass")));

        let ops = RequestInfo::new(AdmissionUserInfo::new("carol")).with_cluster_role("ops");
        assert!(matcher.applies(&rule, &ops));

        let dev = RequestInfo::new(AdmissionUserInfo::new("dave")).with_cluster_role("dev");
        assert!(!matcher.applies(&rule, &dev));

        let emergency = RequestInfo::new(AdmissionUserInfo::new("erin").with_group("break-glass"))
            .with_cluster_role("ops");
        assert!(!matcher.applies(&rule, &emergency));
    }

    #[test]
    fn test_with_config_rejects_empty_prefix() {
        let config = MatcherConfig::default().with_service_account_prefix("");
        assert!(matches!(
            AdmissionMatcher::with_config(config),
            Err(RbacError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_custom_prefix_is_used() {
        let matcher = AdmissionMatcher::with_config(
            MatcherConfig::default()
                .with_service_account_prefix("svc/")
                .with_exclude_evaluation(ExcludeEvaluation::Parallel),
        )
        .unwrap();

        let rule = Rule::new("sa").with_exclude(
            Criteria::new().with_subject(Subject::service_account("ns1", "sa1")),
        );
        let request = RequestInfo::new(AdmissionUserInfo::new("svc/ns1:sa1"));

        assert!(matcher.exclude_satisfied(&rule.exclude_resources, &request));
        assert!(!matcher.applies(&rule, &request));
        assert!(match_admission_info(&rule, &request));
    }
}
