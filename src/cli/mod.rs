// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshsym Inc.

//! CLI subsystem for Meshsym

pub mod reporter;

pub use reporter::Reporter;

use clap::ValueEnum;

/// How `classify` prints its result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Colored, grouped by classification
    #[default]
    Terminal,
    /// Full JSON report
    Json,
}
