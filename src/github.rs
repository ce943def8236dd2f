// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

/// GitHub API access for contributor wall generation.
///
/// Fetches contributor and collaborator lists plus per-user profile details
/// from the GitHub REST API, with pagination and retry on transient
/// failures.
use octocrab::Octocrab;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    actor::Actor,
    error::Error,
    html::{Profile, ProfileLookup},
    retry::{RetryConfig, retry_with_backoff}
};

/// Largest page size accepted by the GitHub list endpoints.
pub const MAX_PAGE_SIZE: u8 = 100;

/// Platform-defined relationship of a collaborator to a repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Affiliation {
    /// All collaborators.
    #[default]
    All,
    /// Collaborators with direct access.
    Direct,
    /// Outside collaborators.
    Outside
}

impl Affiliation {
    /// Query-parameter value understood by the collaborators endpoint.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Direct => "direct",
            Self::Outside => "outside"
        }
    }
}

impl std::fmt::Display for Affiliation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Affiliation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "all" => Ok(Self::All),
            "direct" => Ok(Self::Direct),
            "outside" => Ok(Self::Outside),
            other => Err(Error::validation(format!(
                "affiliation must be one of all, direct, outside; got '{other}'"
            )))
        }
    }
}

/// Actor record as returned by the list endpoints.
#[derive(Debug, Clone, Deserialize)]
struct RawActor {
    login:         String,
    avatar_url:    String,
    #[serde(rename = "type")]
    user_type:     String,
    #[serde(default)]
    name:          Option<String>,
    #[serde(default)]
    contributions: Option<u64>
}

impl From<RawActor> for Actor {
    fn from(raw: RawActor) -> Self {
        Actor::from_platform(
            raw.login,
            raw.name,
            raw.avatar_url,
            &raw.user_type,
            raw.contributions
        )
    }
}

/// Profile record as returned by the users endpoint.
#[derive(Debug, Clone, Deserialize)]
struct RawProfile {
    #[serde(default)]
    name:       Option<String>,
    #[serde(default)]
    avatar_url: Option<String>
}

/// Authenticated GitHub API client for the contributor wall pipeline.
#[derive(Clone)]
pub struct GithubClient {
    octocrab: Octocrab,
    retry:    RetryConfig
}

impl GithubClient {
    /// Builds a client, authenticating with `token` when provided.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Service`] when the underlying client cannot be
    /// constructed.
    pub fn new(token: Option<&str>, retry: RetryConfig) -> Result<Self, Error> {
        let builder = Octocrab::builder();
        let octocrab = match token {
            Some(token) => builder.personal_token(token.to_owned()).build(),
            None => builder.build()
        }
        .map_err(|e| Error::service(format!("failed to build github client: {e}")))?;

        Ok(Self {
            octocrab,
            retry
        })
    }

    /// Fetches the full contributor list, ordered by contribution count
    /// descending as returned by the platform.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when a page request ultimately fails.
    pub async fn contributors(
        &self,
        owner: &str,
        repo: &str,
        page_size: Option<u8>
    ) -> Result<Vec<Actor>, Error> {
        debug!("fetching contributors for {}/{}", owner, repo);

        let raw = self
            .fetch_paginated(
                &format!("/repos/{owner}/{repo}/contributors"),
                page_size,
                &format!("contributors for {owner}/{repo}")
            )
            .await?;

        info!("fetched {} contributors for {}/{}", raw.len(), owner, repo);
        Ok(raw.into_iter().map(Actor::from).collect())
    }

    /// Fetches the collaborator list filtered server-side by `affiliation`,
    /// in platform order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Fetch`] when a page request ultimately fails; the
    /// endpoint requires push access on the repository.
    pub async fn collaborators(
        &self,
        owner: &str,
        repo: &str,
        affiliation: Affiliation,
        page_size: Option<u8>
    ) -> Result<Vec<Actor>, Error> {
        debug!("fetching {} collaborators for {}/{}", affiliation, owner, repo);

        let raw = self
            .fetch_paginated(
                &format!("/repos/{owner}/{repo}/collaborators?affiliation={affiliation}"),
                page_size,
                &format!("collaborators for {owner}/{repo}")
            )
            .await?;

        info!("fetched {} collaborators for {}/{}", raw.len(), owner, repo);
        Ok(raw.into_iter().map(Actor::from).collect())
    }

    /// Walks a paginated list endpoint until a short page signals the end.
    async fn fetch_paginated(
        &self,
        base_route: &str,
        page_size: Option<u8>,
        context: &str
    ) -> Result<Vec<RawActor>, Error> {
        let page_size = page_size.unwrap_or(MAX_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
        let separator = if base_route.contains('?') { '&' } else { '?' };

        let mut actors = Vec::new();
        let mut page = 1u32;

        loop {
            let route = format!("{base_route}{separator}per_page={page_size}&page={page}");
            let context = context.to_owned();

            let batch: Vec<RawActor> = retry_with_backoff(&self.retry, &context, || {
                let octocrab = self.octocrab.clone();
                let route = route.clone();
                let context = context.clone();
                async move {
                    octocrab
                        .get(route, None::<&()>)
                        .await
                        .map_err(|e| Error::fetch(format!("failed to fetch {context}: {e}")))
                }
            })
            .await?;

            let batch_len = batch.len();
            actors.extend(batch);

            if batch_len < page_size as usize {
                return Ok(actors);
            }
            page += 1;
        }
    }
}

impl ProfileLookup for GithubClient {
    async fn profile(&self, login: &str) -> Result<Profile, Error> {
        debug!("fetching profile for {}", login);

        let raw: RawProfile = self
            .octocrab
            .get(format!("/users/{login}"), None::<&()>)
            .await
            .map_err(|e| Error::fetch(format!("failed to fetch profile for {login}: {e}")))?;

        Ok(Profile {
            display_name: raw.name,
            avatar_url:   raw.avatar_url
        })
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::{Affiliation, RawActor, RawProfile};
    use crate::actor::{Actor, ActorKind};

    #[test]
    fn raw_actor_deserializes_contributor_payload() {
        let json = r#"{
            "login": "octocat",
            "avatar_url": "https://avatars.githubusercontent.com/u/1?v=4",
            "type": "User",
            "contributions": 42
        }"#;

        let raw: RawActor = serde_json::from_str(json).expect("deserialization failed");
        let actor = Actor::from(raw);

        assert_eq!(actor.login, "octocat");
        assert_eq!(actor.kind, ActorKind::Human);
        assert_eq!(actor.contributions, Some(42));
    }

    #[test]
    fn raw_actor_deserializes_collaborator_payload_without_contributions() {
        let json = r#"{
            "login": "deploy-bot",
            "avatar_url": "https://avatars.githubusercontent.com/u/2?v=4",
            "type": "Bot"
        }"#;

        let raw: RawActor = serde_json::from_str(json).expect("deserialization failed");
        let actor = Actor::from(raw);

        assert_eq!(actor.kind, ActorKind::Bot);
        assert_eq!(actor.contributions, None);
    }

    #[test]
    fn raw_profile_tolerates_null_name() {
        let json = r#"{"name": null, "avatar_url": "https://example.com/a.png"}"#;
        let raw: RawProfile = serde_json::from_str(json).expect("deserialization failed");
        assert_eq!(raw.name, None);
        assert_eq!(raw.avatar_url.as_deref(), Some("https://example.com/a.png"));
    }

    #[test]
    fn affiliation_round_trips_through_str() {
        for affiliation in [Affiliation::All, Affiliation::Direct, Affiliation::Outside] {
            let parsed = Affiliation::from_str(affiliation.as_str()).expect("parse failed");
            assert_eq!(parsed, affiliation);
        }
    }

    #[test]
    fn affiliation_rejects_unknown_values() {
        assert!(Affiliation::from_str("member").is_err());
    }

    #[test]
    fn affiliation_defaults_to_all() {
        assert_eq!(Affiliation::default(), Affiliation::All);
    }
}
