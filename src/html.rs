// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! HTML rendering of one actor bucket as table and inline-list fragments.
//!
//! The table arranges link+avatar cells into rows of `column_count` entries
//! with an optional name caption per cell; the list is a flat sequence of
//! link+avatar fragments without captions. Display names are resolved through
//! an external profile lookup with a per-actor fallback chain, so a single
//! failed lookup never aborts the bucket.

use std::{fmt::Write as _, future::Future};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    actor::Actor,
    error::Error,
    fanout::{MAX_IN_FLIGHT, map_ordered},
    layout::LayoutConfig,
    svg::escape_markup
};

/// Per-user profile details resolved from the hosting platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Preferred display name, when the user has set one.
    pub display_name: Option<String>,
    /// Fresher avatar URL, when the profile endpoint returns one.
    pub avatar_url:   Option<String>
}

/// Resolves per-user profile details.
///
/// A failed lookup is a non-fatal condition; callers fall back to the data
/// already known from the source list.
pub trait ProfileLookup {
    /// Fetches the profile for `login`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error`] when the user cannot be found or the request
    /// fails; callers recover locally.
    fn profile(&self, login: &str) -> impl Future<Output = Result<Profile, Error>> + Send;
}

/// HTML markup produced for one bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlRender {
    /// Table markup with `column_count` cells per row.
    pub table:        String,
    /// Flat link+avatar fragments without table structure.
    pub list:         String,
    /// Number of cells per table row.
    pub column_count: u32
}

/// Display data for one actor after profile resolution.
struct ResolvedActor {
    login:      String,
    name:       String,
    avatar_url: String
}

/// Renders the bucket into parallel table and list markup.
///
/// Profile lookups for the bucket are issued concurrently and joined by
/// original index. The display name fallback order is lookup result, then
/// the actor's known name, then the login. An empty bucket short-circuits to
/// empty strings.
///
/// # Errors
///
/// Returns [`Error::Service`] only when a lookup worker task fails;
/// individual lookup errors are recovered with a warning.
pub async fn render_html<L>(
    bucket: &[Actor],
    layout: &LayoutConfig,
    hide_name: bool,
    profiles: &L
) -> Result<HtmlRender, Error>
where
    L: ProfileLookup + Clone + Send + Sync + 'static
{
    let column_count = layout.column_count();

    if bucket.is_empty() {
        return Ok(HtmlRender {
            table: String::new(),
            list: String::new(),
            column_count
        });
    }

    debug!("rendering html for {} actors", bucket.len());

    let resolved = map_ordered(bucket.to_vec(), MAX_IN_FLIGHT, |_, actor| {
        let profiles = profiles.clone();
        async move { Ok(resolve_actor(actor, &profiles).await) }
    })
    .await?;

    let mut table = String::from("<table><tbody><tr>");
    let mut list = String::new();

    for (index, actor) in resolved.iter().enumerate() {
        if index > 0 && index % column_count as usize == 0 {
            table.push_str("</tr><tr>");
        }

        let image = actor_image(actor, layout.avatar_size);
        let caption = if hide_name {
            String::new()
        } else {
            format!("<br /><sub>{}</sub>", escape_markup(&actor.name))
        };

        let _ = write!(
            table,
            "<td align=\"center\"><a href=\"https://github.com/{login}\" title=\"{name}\">{image}{caption}</a></td>",
            login = escape_markup(&actor.login),
            name = escape_markup(&actor.name),
        );
        let _ = write!(
            list,
            "<a href=\"https://github.com/{login}\" title=\"{name}\">{image}</a>",
            login = escape_markup(&actor.login),
            name = escape_markup(&actor.name),
        );
    }

    table.push_str("</tr></tbody></table>");

    Ok(HtmlRender {
        table,
        list,
        column_count
    })
}

/// Resolves the display data for one actor, recovering lookup failures.
async fn resolve_actor<L>(actor: Actor, profiles: &L) -> ResolvedActor
where
    L: ProfileLookup
{
    let profile = match profiles.profile(&actor.login).await {
        Ok(profile) => profile,
        Err(error) => {
            warn!("profile lookup for {} failed: {}", actor.login, error);
            Profile::default()
        }
    };

    let name = profile
        .display_name
        .or(actor.display_name)
        .unwrap_or_else(|| actor.login.clone());
    let avatar_url = profile.avatar_url.unwrap_or(actor.avatar_url);

    ResolvedActor {
        login: actor.login,
        name,
        avatar_url
    }
}

fn actor_image(actor: &ResolvedActor, avatar_size: u32) -> String {
    format!(
        "<img src=\"{avatar}\" width=\"{avatar_size}\" height=\"{avatar_size}\" alt=\"{name}\" />",
        avatar = escape_markup(&actor.avatar_url),
        name = escape_markup(&actor.name),
    )
}
