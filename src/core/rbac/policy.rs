//! Policy rule criteria
//!
//! A rule narrows its applicability with two criteria sets over the
//! requester's role bindings: `match` (must be satisfied) and `exclude`
//! (must not be satisfied). Field names follow the Kubernetes policy JSON
//! layout (`clusterRoles`, `apiGroup`, ...).

use crate::error::{RbacError, Result};
use serde::{Deserialize, Serialize};

/// Kind of identity a subject descriptor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubjectKind {
    /// In-cluster service account, identified by namespace and name
    ServiceAccount,
    /// Authenticated user name
    User,
    /// Group the requester belongs to
    Group,
    /// Any other kind; never matches a requester
    #[serde(other)]
    Other,
}

/// Identity reference a rule can match against
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub kind: SubjectKind,

    pub name: String,

    /// Only meaningful for service accounts
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub namespace: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_group: Option<String>,
}

impl Subject {
    pub fn user(name: impl Into<String>) -> Self {
        Self::new(SubjectKind::User, name, "")
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(SubjectKind::Group, name, "")
    }

    pub fn service_account(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(SubjectKind::ServiceAccount, name, namespace)
    }

    fn new(kind: SubjectKind, name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Subject {
            kind,
            name: name.into(),
            namespace: namespace.into(),
            api_group: None,
        }
    }

    /// Check the descriptor is well formed before a rule is stored
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.name.is_empty() {
            return Err("subject name must not be empty".to_string());
        }

        match self.kind {
            SubjectKind::ServiceAccount if self.namespace.is_empty() => Err(format!(
                "service account '{}' requires a namespace",
                self.name
            )),
            SubjectKind::Other => Err(format!(
                "subject '{}' has an unsupported kind (expected ServiceAccount, User or Group)",
                self.name
            )),
            _ => Ok(()),
        }
    }
}

/// One criteria set: named roles, named cluster roles and subjects
///
/// An empty set imposes no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Criteria {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cluster_roles: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subjects: Vec<Subject>,
}

/// Must-satisfy criteria of a rule
pub type MatchResources = Criteria;

/// Must-not-satisfy criteria of a rule
pub type ExcludeResources = Criteria;

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when all three groups are empty
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.cluster_roles.is_empty() && self.subjects.is_empty()
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_cluster_role(mut self, cluster_role: impl Into<String>) -> Self {
        self.cluster_roles.push(cluster_role.into());
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// A policy rule as seen by the admission matcher
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rule {
    pub name: String,

    #[serde(rename = "match", skip_serializing_if = "Criteria::is_empty")]
    pub match_resources: MatchResources,

    #[serde(rename = "exclude", skip_serializing_if = "Criteria::is_empty")]
    pub exclude_resources: ExcludeResources,
}

impl Rule {
    pub fn new(name: impl Into<String>) -> Self {
        Rule {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_match(mut self, criteria: MatchResources) -> Self {
        self.match_resources = criteria;
        self
    }

    pub fn with_exclude(mut self, criteria: ExcludeResources) -> Self {
        self.exclude_resources = criteria;
        self
    }

    /// Parse rule from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize rule to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate subject descriptors in both criteria sets
    ///
    /// Indexes in errors count match subjects first, then exclude subjects.
    pub fn validate(&self) -> Result<()> {
        let subjects = self
            .match_resources
            .subjects
            .iter()
            .chain(&self.exclude_resources.subjects);

        for (index, subject) in subjects.enumerate() {
            subject
                .validate()
                .map_err(|reason| RbacError::InvalidSubject { index, reason })?;
        }

        Ok(())
    }
}
