//! # Admission RBAC - role-binding scope checks for policy rules
//!
//! `admission-rbac` decides whether a declarative policy rule applies to an
//! incoming admission request, given the requester's resolved role bindings:
//!
//! - **Match criteria**: named roles, cluster roles and subjects that must be bound
//! - **Exclude criteria**: the same groups, overriding an otherwise applicable rule
//! - **Subjects**: users, groups and service accounts
//!
//! Resolving role bindings, storing rules and transporting admission
//! reviews all happen upstream; this crate is a pure decision function over
//! already resolved data.
//!
//! ## Quick Start
//!
//! ```rust
//! use admission_rbac::{match_admission_info, AdmissionUserInfo, Criteria, RequestInfo, Rule, Subject};
//!
//! let rule = Rule::new("deployers")
//!     .with_match(Criteria::new().with_cluster_role("deployer"))
//!     .with_exclude(Criteria::new().with_subject(Subject::service_account("kube-system", "gc")));
//!
//! let request = RequestInfo::new(AdmissionUserInfo::new("system:serviceaccount:ci:pipeline"))
//!     .with_cluster_role("deployer");
//!
//! assert!(match_admission_info(&rule, &request));
//! ```
//!
//! ## Configuration
//!
//! ```rust,no_run
//! use admission_rbac::{AdmissionMatcher, MatcherConfig, Result};
//!
//! # fn main() -> Result<()> {
//! let config = MatcherConfig::load("/etc/admission/rbac.toml")?;
//! let matcher = AdmissionMatcher::with_config(config)?;
//! # Ok(())
//! # }
//! ```

pub mod core;

#[allow(unused_imports)]
pub(crate) use crate::core::{config, error, rbac};

pub use crate::core::{
    config::{ExcludeEvaluation, MatcherConfig},
    error::{RbacError, Result},
    rbac::{
        match_admission_info, AdmissionMatcher, AdmissionUserInfo, Criteria, CriteriaEvaluator,
        CriteriaOutcomes, CriterionOutcome, ExcludeResources, MatchResources, Membership, NameSet,
        RequestInfo, Rule, Subject, SubjectKind, SERVICE_ACCOUNT_PREFIX,
    },
};
