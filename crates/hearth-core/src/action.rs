//! Quick action types.

use serde::{Deserialize, Serialize};

use crate::result::{ResultTarget, SearchResult};

/// A capability-gated shortcut offered by the palette.
///
/// Quick actions are declared statically; the handler that runs on
/// activation is registered separately under `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickAction {
    /// Unique identifier, also the handler key.
    pub id: String,

    /// Display text.
    pub title: String,

    /// Secondary display text.
    pub subtitle: String,

    /// Named icon.
    pub icon: String,
}

impl QuickAction {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            icon: icon.into(),
        }
    }

    /// Project the action into a palette row.
    pub fn to_result(&self) -> SearchResult {
        SearchResult::action(format!("action:{}", self.id), &self.title, &self.id)
            .with_subtitle(&self.subtitle)
            .with_icon(&self.icon)
    }
}

/// What the palette did when a result was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A link result was recorded and navigated to.
    Navigated { url: String },

    /// A quick action handler was invoked.
    ActionInvoked { action_id: String },
}

impl Activation {
    /// Build the activation outcome for a result.
    pub fn for_result(result: &SearchResult) -> Self {
        match &result.target {
            ResultTarget::Url(url) => Activation::Navigated { url: url.clone() },
            ResultTarget::Action(id) => Activation::ActionInvoked {
                action_id: id.clone(),
            },
        }
    }
}
