//! Hotkey and hotkey set types.

use crate::{error::Result, Error, Order, SetId, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A single shortcut definition inside a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotkey {
    /// Identifier, unique within the owning set
    pub id: String,
    /// Key combination, e.g. "Ctrl+Shift+P"
    pub key: String,
    /// What the shortcut does
    pub description: String,
    /// Optional action label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

/// A named collection of hotkeys for one application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeySet {
    /// Server-assigned identifier
    pub id: SetId,
    pub name: String,
    /// Target application label
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub hotkeys: Vec<Hotkey>,
    /// Position in the display sequence
    pub order: Order,
    /// Milliseconds since epoch
    pub created_at: Timestamp,
    /// Milliseconds since epoch
    pub updated_at: Timestamp,
}

impl HotkeySet {
    /// Create an empty set with the given order and creation time.
    pub fn new(
        id: impl Into<SetId>,
        name: impl Into<String>,
        application: impl Into<String>,
        order: Order,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            application: application.into(),
            description: None,
            hotkeys: Vec::new(),
            order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Build a set from a validated draft.
    pub fn from_draft(
        id: impl Into<SetId>,
        draft: HotkeySetDraft,
        order: Order,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id: id.into(),
            name: draft.name,
            application: draft.application,
            description: draft.description,
            hotkeys: draft.hotkeys,
            order,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Replace the editable fields. `order` is left untouched.
    pub fn apply_draft(&mut self, draft: HotkeySetDraft, timestamp: Timestamp) {
        self.name = draft.name;
        self.application = draft.application;
        self.description = draft.description;
        self.hotkeys = draft.hotkeys;
        self.updated_at = timestamp;
    }

    /// Set a new position.
    pub fn reposition(&mut self, order: Order, timestamp: Timestamp) {
        self.order = order;
        self.updated_at = timestamp;
    }

    fn sort_key(&self) -> (Order, Timestamp, &str) {
        (self.order, self.created_at, self.id.as_str())
    }
}

/// Editable fields of a hotkey set, as sent on create and update.
///
/// There is no `order` field: an `order` key in the request body is ignored,
/// so generic edits can never move a set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotkeySetDraft {
    #[serde(default, deserialize_with = "text_or_blank")]
    pub name: String,
    #[serde(default, deserialize_with = "text_or_blank")]
    pub application: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub hotkeys: Vec<Hotkey>,
}

impl HotkeySetDraft {
    pub fn new(name: impl Into<String>, application: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            application: application.into(),
            description: None,
            hotkeys: Vec::new(),
        }
    }

    /// Check the required fields are present and non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() || self.application.trim().is_empty() {
            return Err(Error::MissingRequiredFields);
        }
        Ok(())
    }
}

/// Read a required text field; `null` and non-strings become blank and fail
/// [`HotkeySetDraft::validate`].
fn text_or_blank<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        _ => String::new(),
    })
}

/// Sort sets into display order: `order` ascending, then creation time, then id.
pub fn sort_canonical(sets: &mut [HotkeySet]) {
    sets.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
