// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine configuration.

use std::time::Duration;

use littlefoot_document::Selector;
use regex::{Regex, RegexBuilder};

use crate::Error;

/// Selector matching the buttons the setup pass creates.
pub const DEFAULT_BUTTON_SELECTOR: &str = "button.littlefoot-footnote__button";

/// Selector matching popover roots.
pub(crate) const POPOVER_SELECTOR: &str = ".littlefoot-footnote";

/// Immutable configuration of one engine.
///
/// Build one with struct update syntax over [`Settings::default`]:
///
/// ```
/// use std::time::Duration;
/// use littlefoot::Settings;
///
/// let settings = Settings {
///     activate_delay: Duration::ZERO,
///     allow_multiple: true,
///     ..Settings::default()
/// };
/// assert_eq!(settings.dismiss_delay, Duration::from_millis(500));
/// ```
///
/// With the `serde` feature, settings deserialize from camelCase keys with delays in
/// milliseconds. Missing keys take their default.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct Settings {
    /// Time between an activation request and the popover becoming active.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub activate_delay: Duration,
    /// Time between a dismissal request and the popover being removed.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub dismiss_delay: Duration,
    /// Time the pointer may spend outside a button and its popover before an unhover dismissal.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub hover_delay: Duration,
    /// Minimum time between two reflows during a burst of scroll or resize events.
    #[cfg_attr(feature = "serde", serde(with = "millis"))]
    pub reflow_interval: Duration,
    /// Activate a button when the pointer enters it.
    pub activate_on_hover: bool,
    /// Dismiss a popover when the pointer leaves it and its button.
    pub dismiss_on_unhover: bool,
    /// Dismiss popovers on a click outside every button and popover.
    pub dismiss_on_document_touch: bool,
    /// Allow more than one popover to be open.
    pub allow_multiple: bool,
    /// Create a button for every reference to a footnote, not only the first.
    pub allow_duplicates: bool,
    /// Selector for footnote buttons.
    pub button_selector: String,
    /// Selector a footnote must match to be processed.
    pub footnote_selector: String,
    /// Selector for the element wrapping a footnote reference, replaced by the button.
    pub anchor_parent_selector: String,
    /// Case-insensitive pattern a reference's `href` must match.
    pub anchor_pattern: String,
    /// Selector limiting where footnotes are processed and activated; empty for the whole document.
    pub scope: String,
    /// Largest height of popover content before it scrolls.
    pub max_height: f64,
    /// Gap between a button and its popover.
    pub margin: f64,
    /// Gap kept between a popover and the viewport edge.
    pub edge_gap: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            activate_delay: Duration::from_millis(100),
            dismiss_delay: Duration::from_millis(500),
            hover_delay: Duration::from_millis(250),
            reflow_interval: Duration::from_millis(16),
            activate_on_hover: false,
            dismiss_on_unhover: false,
            dismiss_on_document_touch: true,
            allow_multiple: false,
            allow_duplicates: true,
            button_selector: DEFAULT_BUTTON_SELECTOR.to_string(),
            footnote_selector: "li".to_string(),
            anchor_parent_selector: "sup".to_string(),
            anchor_pattern: r"(fn|footnote|note)[:\-_\d]".to_string(),
            scope: String::new(),
            max_height: 240.0,
            margin: 10.0,
            edge_gap: 15.0,
        }
    }
}

/// A setting read through [`Settings::get`].
#[derive(Clone, Debug, PartialEq)]
pub enum SettingValue {
    /// A delay, in milliseconds.
    Millis(u64),
    /// A toggle.
    Bool(bool),
    /// A selector or pattern.
    Text(String),
    /// A length in pixels.
    Number(f64),
}

impl SettingValue {
    /// The delay in milliseconds, if this is a delay.
    pub fn as_millis(&self) -> Option<u64> {
        match *self {
            Self::Millis(ms) => Some(ms),
            _ => None,
        }
    }

    /// The delay as a [`Duration`], if this is a delay.
    pub fn as_duration(&self) -> Option<Duration> {
        self.as_millis().map(Duration::from_millis)
    }

    /// The toggle, if this is one.
    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            Self::Bool(b) => Some(b),
            _ => None,
        }
    }

    /// The text, if this is a selector or pattern.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The length, if this is one.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Number(n) => Some(n),
            _ => None,
        }
    }
}

fn millis_value(d: Duration) -> SettingValue {
    SettingValue::Millis(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

impl Settings {
    /// Read a setting by its camelCase name, as used in configuration objects.
    ///
    /// Returns `None` for unknown names.
    pub fn get(&self, name: &str) -> Option<SettingValue> {
        let value = match name {
            "activateDelay" => millis_value(self.activate_delay),
            "dismissDelay" => millis_value(self.dismiss_delay),
            "hoverDelay" => millis_value(self.hover_delay),
            "reflowInterval" => millis_value(self.reflow_interval),
            "activateOnHover" => SettingValue::Bool(self.activate_on_hover),
            "dismissOnUnhover" => SettingValue::Bool(self.dismiss_on_unhover),
            "dismissOnDocumentTouch" => SettingValue::Bool(self.dismiss_on_document_touch),
            "allowMultiple" => SettingValue::Bool(self.allow_multiple),
            "allowDuplicates" => SettingValue::Bool(self.allow_duplicates),
            "buttonSelector" => SettingValue::Text(self.button_selector.clone()),
            "footnoteSelector" => SettingValue::Text(self.footnote_selector.clone()),
            "anchorParentSelector" => SettingValue::Text(self.anchor_parent_selector.clone()),
            "anchorPattern" => SettingValue::Text(self.anchor_pattern.clone()),
            "scope" => SettingValue::Text(self.scope.clone()),
            "maxHeight" => SettingValue::Number(self.max_height),
            "margin" => SettingValue::Number(self.margin),
            "edgeGap" => SettingValue::Number(self.edge_gap),
            _ => return None,
        };
        Some(value)
    }
}

/// Selectors and patterns parsed once per engine.
#[derive(Clone, Debug)]
pub(crate) struct Compiled {
    pub(crate) button: Selector,
    pub(crate) popover: Selector,
    pub(crate) footnote: Selector,
    pub(crate) anchor: Selector,
    pub(crate) anchor_parent: Selector,
    pub(crate) back_link: Selector,
    pub(crate) footnotes: Selector,
    pub(crate) scope: Option<Selector>,
    pub(crate) anchor_pattern: Regex,
}

fn selector(setting: &'static str, source: &str) -> Result<Selector, Error> {
    Selector::parse(source).map_err(|error| Error::InvalidSelector {
        setting,
        selector: source.to_string(),
        source: error,
    })
}

impl Compiled {
    pub(crate) fn new(settings: &Settings) -> Result<Self, Error> {
        let scope = if settings.scope.trim().is_empty() {
            None
        } else {
            Some(selector("scope", &settings.scope)?)
        };
        Ok(Self {
            button: selector("buttonSelector", &settings.button_selector)?,
            popover: selector("popover", POPOVER_SELECTOR)?,
            footnote: selector("footnoteSelector", &settings.footnote_selector)?,
            anchor: selector("anchor", r##"a[href^="#"]"##)?,
            anchor_parent: selector("anchorParentSelector", &settings.anchor_parent_selector)?,
            back_link: selector("backLink", "a.reversefootnote, a[rev=footnote]")?,
            footnotes: selector("footnotes", ".footnotes")?,
            scope,
            anchor_pattern: RegexBuilder::new(&settings.anchor_pattern)
                .case_insensitive(true)
                .build()?,
        })
    }
}

#[cfg(feature = "serde")]
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_readable_by_name() {
        let s = Settings::default();
        assert_eq!(s.get("activateDelay"), Some(SettingValue::Millis(100)));
        assert_eq!(s.get("dismissDelay"), Some(SettingValue::Millis(500)));
        assert_eq!(s.get("activateOnHover"), Some(SettingValue::Bool(false)));
        assert_eq!(s.get("dismissOnDocumentTouch"), Some(SettingValue::Bool(true)));
        assert_eq!(s.get("allowMultiple"), Some(SettingValue::Bool(false)));
        assert_eq!(
            s.get("buttonSelector").as_ref().and_then(SettingValue::as_str),
            Some(DEFAULT_BUTTON_SELECTOR)
        );
        assert_eq!(s.get("maxHeight"), Some(SettingValue::Number(240.0)));
        assert_eq!(s.get("nope"), None);
        // Names are camelCase only.
        assert_eq!(s.get("activate_delay"), None);
    }

    #[test]
    fn value_accessors() {
        let v = SettingValue::Millis(250);
        assert_eq!(v.as_millis(), Some(250));
        assert_eq!(v.as_duration(), Some(Duration::from_millis(250)));
        assert_eq!(v.as_bool(), None);
        assert_eq!(SettingValue::Bool(true).as_bool(), Some(true));
        assert_eq!(SettingValue::Number(10.0).as_f64(), Some(10.0));
        assert_eq!(SettingValue::Text("li".into()).as_str(), Some("li"));
    }

    #[test]
    fn compiles_default_selectors_and_pattern() {
        let c = Compiled::new(&Settings::default()).unwrap();
        assert!(c.scope.is_none());
        assert!(c.anchor_pattern.is_match("#fn:1"));
        assert!(c.anchor_pattern.is_match("#FOOTNOTE-2"));
        assert!(c.anchor_pattern.is_match("#note_3"));
        assert!(!c.anchor_pattern.is_match("#section-2"));
    }

    #[test]
    fn bad_configuration_is_an_error() {
        let s = Settings {
            button_selector: "button[".into(),
            ..Settings::default()
        };
        assert!(matches!(
            Compiled::new(&s),
            Err(Error::InvalidSelector {
                setting: "buttonSelector",
                ..
            })
        ));

        let s = Settings {
            anchor_pattern: "(fn".into(),
            ..Settings::default()
        };
        assert!(matches!(
            Compiled::new(&s),
            Err(Error::InvalidAnchorPattern(_))
        ));
    }
}
