//! Role-binding scope checks for admission policy rules
//!
//! Decides whether a rule's `match` / `exclude` criteria put an incoming
//! request in scope, based on the requester's resolved roles, cluster roles,
//! username and groups:
//! - Roles, cluster roles and subjects are each an OR over their entries
//! - Non-empty groups of a criteria set are ANDed together
//! - A rule applies when `match` is satisfied and `exclude` is not
//! - An empty request (no live requester) always applies

mod criteria;
mod matcher;
mod membership;
mod policy;
mod request;
mod subject;

pub use criteria::{group_outcome, CriteriaEvaluator, CriteriaOutcomes, CriterionOutcome};
pub use matcher::{match_admission_info, AdmissionMatcher};
pub use membership::{intersects, Membership, NameSet};
pub use policy::{Criteria, ExcludeResources, MatchResources, Rule, Subject, SubjectKind};
pub use request::{AdmissionUserInfo, RequestInfo};
pub use subject::{Identity, SERVICE_ACCOUNT_PREFIX};
