//! Whitelist editing: handle normalization and read-modify-write of the
//! `whitelistedAccounts` key.

use notehide_core::constants::MAX_HANDLE_LEN;
use notehide_core::errors::{NotehideResult, SettingsError};
use notehide_core::models::{Settings, SettingsPatch};
use notehide_core::traits::ISettingsStore;
use tracing::info;

/// Trim, lowercase, strip one leading `@`, then validate as a handle.
pub fn normalize_handle(raw: &str) -> Result<String, SettingsError> {
    let lowered = raw.trim().to_lowercase();
    let handle = lowered.strip_prefix('@').unwrap_or(&lowered);
    if handle.is_empty() {
        return Err(SettingsError::EmptyHandle);
    }
    let valid = handle.len() <= MAX_HANDLE_LEN
        && handle
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(SettingsError::InvalidHandle {
            handle: handle.to_string(),
        });
    }
    Ok(handle.to_string())
}

/// Add a handle to the whitelist. Returns the normalized handle.
pub fn add_to_whitelist(store: &dyn ISettingsStore, raw: &str) -> NotehideResult<String> {
    let handle = normalize_handle(raw)?;
    let mut accounts = store.get(&Settings::default())?.whitelisted_accounts;
    if !accounts.insert(handle.clone()) {
        return Err(SettingsError::AlreadyWhitelisted { handle }.into());
    }
    store.set(&SettingsPatch {
        whitelisted_accounts: Some(accounts),
        ..Default::default()
    })?;
    info!(handle = %handle, "account whitelisted");
    Ok(handle)
}

/// Remove a handle from the whitelist. Returns whether it was present;
/// removing an absent handle writes nothing.
pub fn remove_from_whitelist(store: &dyn ISettingsStore, raw: &str) -> NotehideResult<bool> {
    let handle = normalize_handle(raw)?;
    let mut accounts = store.get(&Settings::default())?.whitelisted_accounts;
    if !accounts.remove(&handle) {
        return Ok(false);
    }
    store.set(&SettingsPatch {
        whitelisted_accounts: Some(accounts),
        ..Default::default()
    })?;
    info!(handle = %handle, "account removed from whitelist");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization() {
        assert_eq!(normalize_handle("  @Jack_01 ").unwrap(), "jack_01");
        assert_eq!(normalize_handle("plain").unwrap(), "plain");
        assert!(matches!(normalize_handle("   "), Err(SettingsError::EmptyHandle)));
        assert!(matches!(normalize_handle("@"), Err(SettingsError::EmptyHandle)));
        assert!(matches!(
            normalize_handle("@@double"),
            Err(SettingsError::InvalidHandle { .. })
        ));
        assert!(matches!(
            normalize_handle("has space"),
            Err(SettingsError::InvalidHandle { .. })
        ));
        assert!(matches!(
            normalize_handle("sixteen_chars_xx"),
            Err(SettingsError::InvalidHandle { .. })
        ));
        assert!(matches!(
            normalize_handle("ümlaut"),
            Err(SettingsError::InvalidHandle { .. })
        ));
    }
}
