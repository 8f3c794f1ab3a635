use notehide_core::errors::*;

#[test]
fn selector_error_carries_offset_and_char() {
    let err = SelectorError::UnexpectedChar {
        selector: "div > a".into(),
        offset: 4,
        found: '>',
    };
    let msg = err.to_string();
    assert!(msg.contains("'>'"));
    assert!(msg.contains('4'));
}

#[test]
fn invalid_handle_carries_handle() {
    let err = SettingsError::InvalidHandle {
        handle: "bad handle".into(),
    };
    assert!(err.to_string().contains("bad handle"));
}

#[test]
fn stale_handle_carries_index_and_generation() {
    let err = DocumentError::StaleHandle {
        index: 7,
        generation: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains('7'));
    assert!(msg.contains('3'));
}

// --- From impls ---

#[test]
fn subsystem_errors_convert_to_notehide_error() {
    let err: NotehideError = SelectorError::Empty.into();
    assert!(matches!(err, NotehideError::Selector(SelectorError::Empty)));

    let err: NotehideError = SettingsError::EmptyHandle.into();
    assert!(matches!(err, NotehideError::Settings(SettingsError::EmptyHandle)));

    let err: NotehideError = DocumentError::NotAnElement { index: 1 }.into();
    assert!(err.to_string().contains("not an element"));
}

#[test]
fn serde_error_converts_to_notehide_error() {
    let serde_err = serde_json::from_str::<u32>("nope").unwrap_err();
    let err: NotehideError = serde_err.into();
    assert!(matches!(err, NotehideError::SerializationError(_)));
}
