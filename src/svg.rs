// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! SVG rendering of one actor bucket as absolute-positioned avatar tiles.
//!
//! Every actor becomes a profile link wrapping an embedded image at its
//! computed bounding box. Fragments are concatenated in bucket order and
//! substituted into a caller-supplied template at three placeholders: the
//! overall width, the computed canvas height and the fragment string.

use std::{borrow::Cow, fmt::Write as _, future::Future};

use tracing::debug;

use crate::{
    actor::Actor,
    error::Error,
    fanout::{MAX_IN_FLIGHT, map_ordered},
    layout::LayoutConfig
};

/// Width placeholder recognized in SVG templates.
pub const WIDTH_PLACEHOLDER: &str = "{{ width }}";
/// Height placeholder recognized in SVG templates.
pub const HEIGHT_PLACEHOLDER: &str = "{{ contributorsHeight }}";
/// Fragment placeholder recognized in SVG templates.
pub const CONTRIBUTORS_PLACEHOLDER: &str = "{{{ contributors }}}";

/// Template used when the caller does not supply one.
pub const DEFAULT_TEMPLATE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{{ width }}" height="{{ contributorsHeight }}">
  <style>.contributor-link { cursor: pointer; }</style>
  {{{ contributors }}}
</svg>
"#;

/// Produces an embeddable image reference for an avatar URL.
///
/// Implementations typically download the image and encode it as a data URI
/// so the final SVG is self-contained.
pub trait AvatarEncoder {
    /// Encodes the image behind `avatar_url` into an embeddable reference.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the source image is unreachable or its
    /// format is unsupported.
    fn encode(&self, avatar_url: &str) -> impl Future<Output = Result<String, Error>> + Send;
}

/// Renders the bucket into a complete SVG document.
///
/// All avatar encodings for the bucket are issued concurrently and joined by
/// original index, so fragment order always matches bucket order. A single
/// failed encoding aborts the whole render; the per-actor encodings are
/// joined as one unit.
///
/// # Errors
///
/// Returns [`Error::Encode`] naming the first actor whose avatar could not
/// be embedded.
pub async fn render_svg<E>(
    bucket: &[Actor],
    layout: &LayoutConfig,
    template: &str,
    encoder: &E
) -> Result<String, Error>
where
    E: AvatarEncoder + Clone + Send + 'static
{
    debug!("rendering svg for {} actors", bucket.len());

    let sources: Vec<(String, String)> = bucket
        .iter()
        .map(|actor| (actor.login.clone(), actor.avatar_url.clone()))
        .collect();

    let images = map_ordered(sources, MAX_IN_FLIGHT, |_, (login, avatar_url)| {
        let encoder = encoder.clone();
        async move {
            encoder.encode(&avatar_url).await.map_err(|error| match error {
                Error::Encode {
                    ..
                } => error,
                other => Error::encode(login, other.to_display_string())
            })
        }
    })
    .await?;

    let mut fragments = String::new();
    for (index, (actor, image)) in bucket.iter().zip(images.iter()).enumerate() {
        let bounding_box = layout.bounding_box(index);
        let login = escape_markup(&actor.login);
        let _ = write!(
            fragments,
            "<a xlink:href=\"{profile}\" class=\"contributor-link\" target=\"_blank\" rel=\"nofollow sponsored\" id=\"{login}\">\n<image x=\"{x}\" y=\"{y}\" width=\"{width}\" height=\"{height}\" xlink:href=\"{image}\"/>\n</a>",
            profile = escape_markup(&actor.profile_url()),
            x = bounding_box.x,
            y = bounding_box.y,
            width = bounding_box.width,
            height = bounding_box.height,
        );
    }

    let height = layout.canvas_height(bucket.len());

    Ok(template
        .replace(WIDTH_PLACEHOLDER, &layout.canvas_width.to_string())
        .replace(HEIGHT_PLACEHOLDER, &height.to_string())
        .replace(CONTRIBUTORS_PLACEHOLDER, &fragments))
}

/// Escapes markup-significant characters for embedding in SVG or HTML.
pub(crate) fn escape_markup(value: &str) -> Cow<'_, str> {
    if value
        .chars()
        .any(|character| matches!(character, '&' | '<' | '>' | '\"' | '\''))
    {
        let mut escaped = String::with_capacity(value.len());
        for character in value.chars() {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '\"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                other => escaped.push(other)
            }
        }
        Cow::Owned(escaped)
    } else {
        Cow::Borrowed(value)
    }
}
