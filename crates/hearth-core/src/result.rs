//! Search result types shown in the palette.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable result identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultId(pub String);

impl From<String> for ResultId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ResultId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for ResultId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResultId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The kind of entity a result points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultKind {
    Contact,
    Company,
    Deal,
    Ticket,
    Activity,
    /// A quick action. Never recorded as a recent item.
    Action,
}

impl ResultKind {
    /// Lowercase label used in rendering and serialization.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResultKind::Contact => "contact",
            ResultKind::Company => "company",
            ResultKind::Deal => "deal",
            ResultKind::Ticket => "ticket",
            ResultKind::Activity => "activity",
            ResultKind::Action => "action",
        }
    }
}

/// What happens when a result is activated.
///
/// Exactly one target exists per result, so a result can never carry both a
/// URL and an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultTarget {
    /// Navigate to a route inside the console.
    Url(String),
    /// Invoke the quick action handler registered under this id.
    Action(String),
}

/// A single row in the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Unique identifier within the current result set.
    pub id: ResultId,

    #[serde(rename = "type")]
    pub kind: ResultKind,

    /// Primary display text.
    pub title: String,

    /// Secondary display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,

    /// Right-aligned detail (deal amount, ticket status).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,

    /// Named icon.
    pub icon: String,

    #[serde(flatten)]
    pub target: ResultTarget,
}

impl SearchResult {
    /// Create a result that navigates to `url` when activated.
    pub fn link(
        id: impl Into<ResultId>,
        kind: ResultKind,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            title: title.into(),
            subtitle: None,
            meta: None,
            icon: default_icon(kind).to_string(),
            target: ResultTarget::Url(url.into()),
        }
    }

    /// Create a result that invokes the quick action `action_id`.
    pub fn action(
        id: impl Into<ResultId>,
        title: impl Into<String>,
        action_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ResultKind::Action,
            title: title.into(),
            subtitle: None,
            meta: None,
            icon: default_icon(ResultKind::Action).to_string(),
            target: ResultTarget::Action(action_id.into()),
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.meta = Some(meta.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Navigation URL, if this result is a link.
    pub fn url(&self) -> Option<&str> {
        match &self.target {
            ResultTarget::Url(url) => Some(url),
            ResultTarget::Action(_) => None,
        }
    }

    /// Bound action id, if this result is a quick action.
    pub fn action_id(&self) -> Option<&str> {
        match &self.target {
            ResultTarget::Action(id) => Some(id),
            ResultTarget::Url(_) => None,
        }
    }

    /// Whether this result may be stored in the recent-items list.
    pub fn is_recordable(&self) -> bool {
        self.kind != ResultKind::Action && matches!(self.target, ResultTarget::Url(_))
    }

    /// Case-insensitive prefix test on the title.
    pub fn title_starts_with(&self, query: &str) -> bool {
        self.title.to_lowercase().starts_with(&query.to_lowercase())
    }
}

/// Icon used when a result does not name one.
pub fn default_icon(kind: ResultKind) -> &'static str {
    match kind {
        ResultKind::Contact => "user",
        ResultKind::Company => "building",
        ResultKind::Deal => "handshake",
        ResultKind::Ticket => "ticket",
        ResultKind::Activity => "calendar",
        ResultKind::Action => "plus",
    }
}
