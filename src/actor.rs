// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Actor records returned by the hosting platform.
//!
//! An actor is a contributor or collaborator account. The bot classification
//! is derived, never provided directly: the platform type flag wins, and a
//! known automation-account login pattern catches machine users that report
//! themselves as regular users.

use serde::{Deserialize, Serialize};

/// Suffix GitHub appends to machine-user logins such as `dependabot[bot]`.
const BOT_LOGIN_SUFFIX: &str = "[bot]";

/// Derived classification of an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    /// Regular user account.
    Human,
    /// Automation account reported by the platform or matched by login.
    Bot
}

/// A contributor or collaborator account with derived classification.
///
/// Ordering of `Actor` values inside a list is meaningful: contributor lists
/// arrive sorted by contribution count descending and collaborator lists in
/// platform order. Nothing downstream may re-sort them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Login unique within a source list.
    pub login:         String,
    /// Preferred display name when the platform knows one.
    pub display_name:  Option<String>,
    /// URL of the avatar image.
    pub avatar_url:    String,
    /// Derived human/bot classification.
    pub kind:          ActorKind,
    /// Contribution count for contributor lists; absent for collaborators.
    pub contributions: Option<u64>
}

impl Actor {
    /// Builds an actor from raw platform fields, deriving [`ActorKind`].
    ///
    /// # Parameters
    ///
    /// * `login` - Account login.
    /// * `display_name` - Optional preferred name.
    /// * `avatar_url` - Avatar image URL.
    /// * `user_type` - Platform-reported type flag (`"User"`, `"Bot"`, ...).
    /// * `contributions` - Contribution count when the source provides one.
    pub fn from_platform(
        login: String,
        display_name: Option<String>,
        avatar_url: String,
        user_type: &str,
        contributions: Option<u64>
    ) -> Self {
        let kind = derive_kind(user_type, &login);
        Self {
            login,
            display_name,
            avatar_url,
            kind,
            contributions
        }
    }

    /// Returns `true` when the actor is classified as a bot.
    pub fn is_bot(&self) -> bool {
        self.kind == ActorKind::Bot
    }

    /// URL of the actor's profile page on the hosting platform.
    pub fn profile_url(&self) -> String {
        format!("https://github.com/{}", self.login)
    }
}

/// Derives the actor kind from the platform type flag and the login.
///
/// The platform flag is authoritative; the login suffix check catches
/// automation accounts that predate the dedicated type flag.
fn derive_kind(user_type: &str, login: &str) -> ActorKind {
    if user_type == "Bot" || login.ends_with(BOT_LOGIN_SUFFIX) {
        ActorKind::Bot
    } else {
        ActorKind::Human
    }
}
