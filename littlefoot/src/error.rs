// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use littlefoot_document::SelectorError;

/// Errors raised while building an engine from [`Settings`](crate::Settings).
///
/// Nothing after construction fails: requests that match nothing are ignored.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A configured selector does not parse.
    #[error("invalid selector `{selector}` in `{setting}`")]
    InvalidSelector {
        /// Name of the setting holding the selector.
        setting: &'static str,
        /// The selector text.
        selector: String,
        /// Why it does not parse.
        #[source]
        source: SelectorError,
    },
    /// The configured anchor pattern is not a valid regular expression.
    #[error("invalid anchor pattern")]
    InvalidAnchorPattern(#[from] regex::Error),
}
