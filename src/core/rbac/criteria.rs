//! Criteria evaluation
//!
//! Each group of a criteria set (roles, cluster roles, subjects) evaluates to
//! a [`CriterionOutcome`]. An empty group is `NotApplicable`, which is kept
//! distinct from `NotMatched`: the match and exclude paths combine the three
//! outcomes differently and both depend on that distinction.

use super::membership::{intersects, Membership, NameSet};
use super::policy::Criteria;
use super::request::RequestInfo;
use super::subject::Identity;
use crate::config::ExcludeEvaluation;
use std::panic;
use tracing::trace;

/// Result of evaluating one criteria group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CriterionOutcome {
    /// The group is empty and does not constrain anything
    NotApplicable,
    /// At least one entry of the group is bound to the requester
    Matched,
    /// No entry of the group is bound to the requester
    NotMatched,
}

impl CriterionOutcome {
    fn of<T>(group: &[T], check: impl FnOnce(&[T]) -> bool) -> Self {
        if group.is_empty() {
            CriterionOutcome::NotApplicable
        } else if check(group) {
            CriterionOutcome::Matched
        } else {
            CriterionOutcome::NotMatched
        }
    }

    pub fn is_applicable(self) -> bool {
        self != CriterionOutcome::NotApplicable
    }
}

/// Outcomes of all three groups of one criteria set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaOutcomes {
    pub roles: CriterionOutcome,
    pub cluster_roles: CriterionOutcome,
    pub subjects: CriterionOutcome,
}

impl CriteriaOutcomes {
    fn iter(&self) -> impl Iterator<Item = CriterionOutcome> {
        [self.roles, self.cluster_roles, self.subjects].into_iter()
    }

    /// Match semantics: every applicable group matched (vacuously true)
    pub fn satisfies_match(&self) -> bool {
        self.iter().all(|outcome| outcome != CriterionOutcome::NotMatched)
    }

    /// Exclude semantics: at least one group applicable and every applicable group matched
    pub fn satisfies_exclude(&self) -> bool {
        let mut applicable = self.iter().filter(|outcome| outcome.is_applicable()).peekable();
        applicable.peek().is_some() && applicable.all(|outcome| outcome == CriterionOutcome::Matched)
    }
}

/// Evaluates criteria sets against one resolved request
///
/// The requester's lists are indexed once on construction; the evaluator can
/// then be reused for the match and exclude sets of any number of rules.
#[derive(Debug, Clone)]
pub struct CriteriaEvaluator<'r> {
    roles: NameSet<'r>,
    cluster_roles: NameSet<'r>,
    identity: Identity<'r>,
    sa_prefix: &'r str,
}

impl<'r> CriteriaEvaluator<'r> {
    pub fn new(request: &'r RequestInfo, sa_prefix: &'r str) -> Self {
        CriteriaEvaluator {
            roles: NameSet::new(&request.roles),
            cluster_roles: NameSet::new(&request.cluster_roles),
            identity: Identity::new(&request.admission_user_info),
            sa_prefix,
        }
    }

    pub fn role_outcome(&self, criteria: &Criteria) -> CriterionOutcome {
        group_outcome(&criteria.roles, &self.roles)
    }

    pub fn cluster_role_outcome(&self, criteria: &Criteria) -> CriterionOutcome {
        group_outcome(&criteria.cluster_roles, &self.cluster_roles)
    }

    pub fn subject_outcome(&self, criteria: &Criteria) -> CriterionOutcome {
        CriterionOutcome::of(&criteria.subjects, |subjects| {
            self.identity.matches_any(subjects, self.sa_prefix)
        })
    }

    /// Evaluate all three groups on the calling thread
    pub fn outcomes(&self, criteria: &Criteria) -> CriteriaOutcomes {
        CriteriaOutcomes {
            roles: self.role_outcome(criteria),
            cluster_roles: self.cluster_role_outcome(criteria),
            subjects: self.subject_outcome(criteria),
        }
    }

    /// Evaluate the three groups concurrently and join before combining
    ///
    /// Roles and cluster roles run on scoped threads while subjects run on
    /// the calling thread. A panic in a worker is resumed on the caller.
    pub fn outcomes_parallel(&self, criteria: &Criteria) -> CriteriaOutcomes {
        let joined = crossbeam::scope(|scope| {
            let roles = scope.spawn(|_| self.role_outcome(criteria));
            let cluster_roles = scope.spawn(|_| self.cluster_role_outcome(criteria));
            let subjects = self.subject_outcome(criteria);

            CriteriaOutcomes {
                roles: roles.join().unwrap_or_else(|e| panic::resume_unwind(e)),
                cluster_roles: cluster_roles
                    .join()
                    .unwrap_or_else(|e| panic::resume_unwind(e)),
                subjects,
            }
        });

        joined.unwrap_or_else(|e| panic::resume_unwind(e))
    }

    /// Conjunction over the non-empty groups, short-circuiting on the first miss
    pub fn match_satisfied(&self, criteria: &Criteria) -> bool {
        let checks: [fn(&Self, &Criteria) -> CriterionOutcome; 3] = [
            Self::role_outcome,
            Self::cluster_role_outcome,
            Self::subject_outcome,
        ];

        for check in checks {
            if check(self, criteria) == CriterionOutcome::NotMatched {
                trace!(?criteria, "match criteria not satisfied");
                return false;
            }
        }

        true
    }

    /// True when the request falls under a non-empty exclude set
    pub fn exclude_satisfied(&self, criteria: &Criteria, mode: ExcludeEvaluation) -> bool {
        if criteria.is_empty() {
            return false;
        }

        let outcomes = match mode {
            ExcludeEvaluation::Sequential => self.outcomes(criteria),
            ExcludeEvaluation::Parallel => self.outcomes_parallel(criteria),
        };
        trace!(?outcomes, ?mode, "evaluated exclude criteria");

        outcomes.satisfies_exclude()
    }
}

/// Outcome of a role or cluster role group against any membership lookup
pub fn group_outcome<M>(wanted: &[String], bound: &M) -> CriterionOutcome
where
    M: Membership + ?Sized,
{
    CriterionOutcome::of(wanted, |wanted| intersects(wanted, bound))
}
