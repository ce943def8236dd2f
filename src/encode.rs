// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Avatar embedding as data URIs.
//!
//! Downloads avatar bytes over HTTP and encodes them into
//! `data:<mime>;base64,<payload>` references so the generated SVG is fully
//! self-contained. The mime type is taken from the response content type with
//! a PNG fallback.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::header::CONTENT_TYPE;

use crate::{error::Error, svg::AvatarEncoder};

/// Mime type assumed when the image server does not report one.
const FALLBACK_MIME: &str = "image/png";

/// [`AvatarEncoder`] that inlines downloaded images as base64 data URIs.
#[derive(Debug, Clone, Default)]
pub struct DataUriEncoder {
    http: reqwest::Client
}

impl DataUriEncoder {
    /// Creates an encoder with a fresh HTTP client.
    pub fn new() -> Self {
        Self::default()
    }
}

impl AvatarEncoder for DataUriEncoder {
    async fn encode(&self, avatar_url: &str) -> Result<String, Error> {
        let response = self
            .http
            .get(avatar_url)
            .send()
            .await
            .map_err(|e| Error::service(format!("avatar request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::service(format!(
                "avatar request for {avatar_url} returned status {}",
                response.status()
            )));
        }

        let mime = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or(FALLBACK_MIME)
            .to_owned();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::service(format!("avatar download failed: {e}")))?;

        Ok(data_uri(&mime, &bytes))
    }
}

/// Formats raw image bytes as a base64 data URI.
fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}
