//! Capability checks for gating quick actions.
//!
//! A capability is a permission string such as `contacts:write`. The
//! org-admin capability satisfies every check.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// Capability that satisfies any requirement.
pub const ORG_ADMIN: &str = "org:admin";

/// A permission string granted to the current user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(pub String);

impl Capability {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Capability {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Answers capability questions for the current user.
pub trait CapabilityProvider: Send + Sync {
    /// Whether the user holds `cap` (or is an org admin).
    fn has_capability(&self, cap: &str) -> bool;

    /// Whether the user holds at least one of `caps`.
    fn has_any_capability(&self, caps: &[&str]) -> bool {
        self.has_capability(ORG_ADMIN) || caps.iter().any(|cap| self.has_capability(cap))
    }

    /// Whether the user holds every one of `caps`.
    fn has_all_capabilities(&self, caps: &[&str]) -> bool {
        self.has_capability(ORG_ADMIN) || caps.iter().all(|cap| self.has_capability(cap))
    }

    /// Check a declarative requirement.
    fn satisfies(&self, requirement: &Requirement) -> bool {
        match requirement {
            Requirement::One(cap) => {
                self.has_capability(ORG_ADMIN) || self.has_capability(cap.as_str())
            }
            Requirement::Any(caps) => self.has_any_capability(&as_strs(caps)),
            Requirement::All(caps) => self.has_all_capabilities(&as_strs(caps)),
        }
    }
}

fn as_strs(caps: &[Capability]) -> Vec<&str> {
    caps.iter().map(Capability::as_str).collect()
}

/// What a quick action needs before it is offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    One(Capability),
    Any(Vec<Capability>),
    All(Vec<Capability>),
}

impl Requirement {
    pub fn one(cap: &str) -> Self {
        Requirement::One(cap.into())
    }

    pub fn any(caps: &[&str]) -> Self {
        Requirement::Any(caps.iter().map(|c| Capability::from(*c)).collect())
    }

    pub fn all(caps: &[&str]) -> Self {
        Requirement::All(caps.iter().map(|c| Capability::from(*c)).collect())
    }
}

/// In-memory capability set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    caps: HashSet<Capability>,
}

impl CapabilitySet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from permission strings.
    pub fn from_strs<'a>(caps: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            caps: caps.into_iter().map(Capability::from).collect(),
        }
    }

    /// Parse a comma separated list, ignoring blanks.
    pub fn parse_list(list: &str) -> Self {
        Self::from_strs(list.split(',').map(str::trim).filter(|s| !s.is_empty()))
    }

    pub fn insert(&mut self, cap: impl Into<String>) {
        self.caps.insert(Capability(cap.into()));
    }

    pub fn len(&self) -> usize {
        self.caps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.caps.is_empty()
    }
}

impl CapabilityProvider for CapabilitySet {
    fn has_capability(&self, cap: &str) -> bool {
        self.caps.contains(ORG_ADMIN) || self.caps.contains(cap)
    }
}
