// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Vision Gateway

use crate::vision::FeatureSet;

/// Semantic version number
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    let features: Vec<&str> = FeatureSet::all().iter().map(|f| f.as_str()).collect();
    format!("Vision Gateway v{} ({})", VERSION, features.join(", "))
}
