// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use clap::Args;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::api::analyze::IMAGE_FIELD;
use crate::api::{AnalyzeResponse, ErrorResponse};
use crate::vision::{Likelihood, SafetyRating, StableAnalysisResult};

/// Arguments for analyze command
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Image file to upload
    pub image: PathBuf,

    /// Base URL of the gateway
    #[arg(long, env = "GATEWAY_URL", default_value = "http://localhost:5000")]
    pub gateway_url: String,

    /// Print the raw JSON envelope instead of a report
    #[arg(long)]
    pub json: bool,
}

/// Upload an image and print the gateway's analysis
pub async fn analyze_image(args: AnalyzeArgs) -> Result<()> {
    let bytes = tokio::fs::read(&args.image)
        .await
        .with_context(|| format!("Failed to read {}", args.image.display()))?;
    let file_name = args
        .image
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let url = format!("{}/api/analyze", args.gateway_url.trim_end_matches('/'));
    info!("Uploading {} ({} bytes) to {}", file_name, bytes.len(), url);

    let form = Form::new().part(IMAGE_FIELD, Part::bytes(bytes).file_name(file_name));
    let response = Client::new().post(&url).multipart(form).send().await?;
    let status = response.status();
    let body = response.text().await?;
    debug!("Gateway returned {} ({} bytes)", status, body.len());

    if !status.is_success() {
        return Err(anyhow!(
            "Gateway returned {}: {}",
            status,
            describe_error_body(&body)
        ));
    }

    if args.json {
        println!("{}", body);
        return Ok(());
    }

    let response: AnalyzeResponse =
        serde_json::from_str(&body).context("Unexpected gateway response")?;
    print!("{}", render_report(&response.data));
    Ok(())
}

fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<ErrorResponse>(body) {
        Ok(ErrorResponse {
            error,
            details: Some(details),
        }) => format!("{} ({})", error, details),
        Ok(ErrorResponse { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}

fn rating_marker(likelihood: Likelihood) -> &'static str {
    match likelihood.rating() {
        SafetyRating::Safe => "✅",
        SafetyRating::Caution => "⚠️",
        SafetyRating::Unsafe => "❌",
        SafetyRating::Unknown => "❔",
    }
}

/// Human-readable report of an analysis result
pub fn render_report(result: &StableAnalysisResult) -> String {
    let mut out = String::from("🏷️  Detected Labels\n");
    if result.labels.is_empty() {
        out.push_str("   (none)\n");
    }
    for label in &result.labels {
        out.push_str(&format!(
            "   {:<32} {:>7}\n",
            label.description, label.confidence
        ));
    }

    out.push_str("\n🔤 Text Extraction (OCR)\n");
    for line in result.text.lines() {
        out.push_str(&format!("   {}\n", line));
    }

    out.push_str("\n🛡️  Content Safety\n");
    match &result.safety {
        Some(safety) => {
            for (axis, likelihood) in [
                ("adult", safety.adult),
                ("violence", safety.violence),
                ("racy", safety.racy),
            ] {
                out.push_str(&format!(
                    "   {} {:<10} {}\n",
                    rating_marker(likelihood),
                    axis,
                    likelihood.display_label()
                ));
            }
        }
        None => out.push_str("   (not reported)\n"),
    }

    out
}
