// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settings from JSON configuration.

#![cfg(feature = "serde")]

mod common;

use std::time::Duration;

use common::document;
use littlefoot::{Littlefoot, SettingValue, Settings};

#[test]
fn camel_case_keys_with_millisecond_delays() {
    let settings: Settings = serde_json::from_str(
        r#"{
            "activateDelay": 0,
            "dismissDelay": 250,
            "allowMultiple": true,
            "buttonSelector": "button.fn"
        }"#,
    )
    .unwrap();
    assert_eq!(settings.activate_delay, Duration::ZERO);
    assert_eq!(settings.dismiss_delay, Duration::from_millis(250));
    assert!(settings.allow_multiple);
    assert_eq!(settings.button_selector, "button.fn");
    // Everything else keeps its default.
    assert_eq!(settings.hover_delay, Settings::default().hover_delay);
    assert_eq!(settings.max_height, 240.0);
}

#[test]
fn empty_object_is_the_default() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
}

#[test]
fn serialized_settings_read_back() {
    let json = serde_json::to_value(Settings::default()).unwrap();
    assert_eq!(json["activateDelay"], 100);
    assert_eq!(json["dismissOnDocumentTouch"], true);
    let settings: Settings = serde_json::from_value(json).unwrap();

    let lf = Littlefoot::mount(document(), settings).unwrap();
    assert_eq!(lf.get_setting("dismissDelay"), Some(SettingValue::Millis(500)));
}
