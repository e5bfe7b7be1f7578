// Copyright 2025 the Littlefoot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other Littlefoot crates.
//!
//! Enabled via feature flags to keep the core small and `no_std` by default.

#[cfg(feature = "document_adapter")]
pub mod document;
