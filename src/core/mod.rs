//! Core implementation

pub mod config;
pub mod error;
pub mod rbac;
