use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::account::AccountId;

/// Which confirmed notes are hidden once the host exposes a rating outcome.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum NoteTypeFilter {
    #[default]
    All,
    Helpful,
}

/// User settings, in the shape the settings store persists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub enabled: bool,
    pub hide_proposed_notes: bool,
    pub note_type_filter: NoteTypeFilter,
    pub whitelisted_accounts: BTreeSet<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            hide_proposed_notes: true,
            note_type_filter: NoteTypeFilter::All,
            whitelisted_accounts: BTreeSet::new(),
        }
    }
}

impl Settings {
    /// Whitelist membership. Stored entries are compared case-insensitively.
    pub fn is_whitelisted(&self, account: &AccountId) -> bool {
        self.whitelisted_accounts.contains(account.as_str())
            || self
                .whitelisted_accounts
                .iter()
                .any(|entry| entry.eq_ignore_ascii_case(account.as_str()))
    }
}

/// Partial settings write. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SettingsPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hide_proposed_notes: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_type_filter: Option<NoteTypeFilter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whitelisted_accounts: Option<BTreeSet<String>>,
}

impl SettingsPatch {
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }

    pub fn hide_proposed_notes(hide: bool) -> Self {
        Self {
            hide_proposed_notes: Some(hide),
            ..Default::default()
        }
    }

    pub fn note_type_filter(filter: NoteTypeFilter) -> Self {
        Self {
            note_type_filter: Some(filter),
            ..Default::default()
        }
    }

    pub fn whitelisted_accounts<I, S>(accounts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            whitelisted_accounts: Some(accounts.into_iter().map(Into::into).collect()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_none()
            && self.hide_proposed_notes.is_none()
            && self.note_type_filter.is_none()
            && self.whitelisted_accounts.is_none()
    }
}

/// Storage area a change notification belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    Sync,
    Local,
    Managed,
}

impl StorageScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Local => "local",
            Self::Managed => "managed",
        }
    }
}

/// Change notification emitted by a settings store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsChange {
    pub changed_keys: Vec<String>,
    pub scope: StorageScope,
}
