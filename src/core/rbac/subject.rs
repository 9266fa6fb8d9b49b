//! Subject matching against a requester's user info
//!
//! - `User` / `Group`: the subject name must be the username or one of the groups
//! - `ServiceAccount`: the username must be `<prefix><namespace>:<name>`

use super::membership::{Membership, NameSet};
use super::policy::{Subject, SubjectKind};
use super::request::AdmissionUserInfo;
use tracing::trace;

/// Username prefix the platform gives service account identities
pub const SERVICE_ACCOUNT_PREFIX: &str = "system:serviceaccount:";

/// Requester identity prepared for subject lookups
#[derive(Debug, Clone)]
pub struct Identity<'a> {
    username: &'a str,
    names: NameSet<'a>,
}

impl<'a> Identity<'a> {
    /// Index `{username} ∪ groups`
    pub fn new(user_info: &'a AdmissionUserInfo) -> Self {
        let mut names = NameSet::new(&user_info.groups);
        names.insert(&user_info.username);

        Identity {
            username: &user_info.username,
            names,
        }
    }

    pub fn username(&self) -> &str {
        self.username
    }

    /// Check one subject descriptor
    pub fn matches(&self, subject: &Subject, sa_prefix: &str) -> bool {
        match subject.kind {
            SubjectKind::ServiceAccount => {
                if self.username.len() <= sa_prefix.len() {
                    trace!(
                        username = self.username,
                        "username too short for a service account, skipping subject"
                    );
                    return false;
                }

                self.username
                    .strip_prefix(sa_prefix)
                    .and_then(|rest| rest.strip_prefix(subject.namespace.as_str()))
                    .and_then(|rest| rest.strip_prefix(':'))
                    .is_some_and(|name| name == subject.name)
            }
            SubjectKind::User | SubjectKind::Group => self.names.contains_name(&subject.name),
            SubjectKind::Other => false,
        }
    }

    /// True on the first subject that matches
    pub fn matches_any(&self, subjects: &[Subject], sa_prefix: &str) -> bool {
        subjects.iter().any(|subject| self.matches(subject, sa_prefix))
    }
}
