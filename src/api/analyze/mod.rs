// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image analysis endpoint module
//!
//! Provides POST /api/analyze for label, text and safe-search analysis.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::analyze_handler;
pub use request::{read_image_upload, IMAGE_FIELD};
pub use response::AnalyzeResponse;
