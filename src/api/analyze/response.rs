// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Analyze endpoint response envelope

use serde::{Deserialize, Serialize};

use crate::vision::StableAnalysisResult;

/// Successful analysis envelope: `{"success": true, "data": {...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    pub data: StableAnalysisResult,
}

impl AnalyzeResponse {
    pub fn new(data: StableAnalysisResult) -> Self {
        Self {
            success: true,
            data,
        }
    }
}
