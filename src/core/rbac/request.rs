//! Resolved requester identity for one admission request
//!
//! Produced upstream once role bindings have been resolved for the live
//! requester. The zero value marks "no live request", e.g. a background
//! scan over resources that already exist.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Authenticated user information attached to an admission request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdmissionUserInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,

    #[serde(skip_serializing_if = "String::is_empty")]
    pub uid: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,

    /// Authenticator-provided attributes; carried along, never matched on
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub extra: BTreeMap<String, Vec<String>>,
}

impl AdmissionUserInfo {
    pub fn new(username: impl Into<String>) -> Self {
        AdmissionUserInfo {
            username: username.into(),
            ..Default::default()
        }
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_empty()
            && self.uid.is_empty()
            && self.groups.is_empty()
            && self.extra.is_empty()
    }
}

/// Roles, cluster roles and user info resolved for the requester
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestInfo {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cluster_roles: Vec<String>,

    #[serde(rename = "userInfo", skip_serializing_if = "AdmissionUserInfo::is_empty")]
    pub admission_user_info: AdmissionUserInfo,
}

impl RequestInfo {
    pub fn new(user_info: AdmissionUserInfo) -> Self {
        RequestInfo {
            admission_user_info: user_info,
            ..Default::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.push(role.into());
        self
    }

    pub fn with_cluster_role(mut self, cluster_role: impl Into<String>) -> Self {
        self.cluster_roles.push(cluster_role.into());
        self
    }

    /// True for the zero value, i.e. there is no live requester
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty() && self.cluster_roles.is_empty() && self.admission_user_info.is_empty()
    }

    /// Parse request info from JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize request info to JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
