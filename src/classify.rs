// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Partitioning of raw actor lists into disjoint render buckets.
//!
//! Each source list (contributors, collaborators) is split by the bot
//! predicate into a primary human bucket and a bot bucket. The split is
//! unconditional so the bot buckets always reflect true bot status; author
//! filtering and truncation only ever narrow the primary buckets. The two
//! source lists never interact.

use regex::Regex;

use crate::{actor::Actor, error::Error};

/// Author filter compiled at configuration time.
///
/// The user-supplied pattern is anchored against the full login string, so
/// `octo-.*` matches `octo-admin` but never `my-octo-admin`. Malformed
/// patterns fail fast during validation instead of at first use.
#[derive(Debug, Clone)]
pub struct AuthorFilter {
    pattern: Regex
}

impl AuthorFilter {
    /// Compiles the provided pattern into an anchored filter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the pattern is not a valid regular
    /// expression.
    ///
    /// # Examples
    ///
    /// ```
    /// use contributor_wall::AuthorFilter;
    ///
    /// let filter = AuthorFilter::new("octo-.*").expect("valid pattern");
    /// assert!(filter.matches("octo-admin"));
    /// assert!(!filter.matches("my-octo-admin"));
    /// ```
    pub fn new(pattern: &str) -> Result<Self, Error> {
        let anchored = format!("^(?:{pattern})$");
        let pattern = Regex::new(&anchored)
            .map_err(|e| Error::validation(format!("invalid author filter pattern: {e}")))?;
        Ok(Self {
            pattern
        })
    }

    /// Returns `true` when the full login matches the filter pattern.
    pub fn matches(&self, login: &str) -> bool {
        self.pattern.is_match(login)
    }
}

/// Filtering knobs applied to each primary bucket.
#[derive(Debug, Clone, Default)]
pub struct FilterOptions {
    /// Cap on primary bucket size after filtering; `0` means unlimited.
    /// Bot buckets are never truncated.
    pub truncate:      usize,
    /// Optional login filter removing matching humans entirely.
    pub author_filter: Option<AuthorFilter>
}

/// Immutable result of classifying both source lists.
///
/// Within each source pair the buckets are disjoint and, before truncation,
/// their union equals the filtered source list. Ordering inside every bucket
/// is the upstream order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Human contributors, contribution count descending.
    pub contributors:      Vec<Actor>,
    /// Bot contributors, contribution count descending.
    pub contributor_bots:  Vec<Actor>,
    /// Human collaborators in platform order.
    pub collaborators:     Vec<Actor>,
    /// Bot collaborators in platform order.
    pub collaborator_bots: Vec<Actor>
}

/// Classifies both source lists into the four render buckets.
///
/// # Parameters
///
/// * `contributors` - Contributor list as returned upstream.
/// * `collaborators` - Collaborator list as returned upstream.
/// * `options` - Author filter and truncation settings.
pub fn classify(
    contributors: Vec<Actor>,
    collaborators: Vec<Actor>,
    options: &FilterOptions
) -> Classification {
    let (contributors, contributor_bots) = classify_source(contributors, options);
    let (collaborators, collaborator_bots) = classify_source(collaborators, options);

    Classification {
        contributors,
        contributor_bots,
        collaborators,
        collaborator_bots
    }
}

/// Splits one source list into its primary and bot buckets.
fn classify_source(list: Vec<Actor>, options: &FilterOptions) -> (Vec<Actor>, Vec<Actor>) {
    let (bots, humans): (Vec<Actor>, Vec<Actor>) =
        list.into_iter().partition(Actor::is_bot);

    let mut primary: Vec<Actor> = match options.author_filter.as_ref() {
        Some(filter) => humans
            .into_iter()
            .filter(|actor| !filter.matches(&actor.login))
            .collect(),
        None => humans
    };

    if options.truncate > 0 {
        primary.truncate(options.truncate);
    }

    (primary, bots)
}

#[cfg(test)]
mod tests {
    use super::{AuthorFilter, Classification, FilterOptions, classify};
    use crate::actor::Actor;

    fn human(login: &str) -> Actor {
        Actor::from_platform(
            login.to_owned(),
            None,
            format!("https://avatars.example.com/{login}"),
            "User",
            Some(1)
        )
    }

    fn bot(login: &str) -> Actor {
        Actor::from_platform(
            login.to_owned(),
            None,
            format!("https://avatars.example.com/{login}"),
            "Bot",
            Some(1)
        )
    }

    fn logins(bucket: &[Actor]) -> Vec<&str> {
        bucket.iter().map(|actor| actor.login.as_str()).collect()
    }

    #[test]
    fn partition_is_disjoint_and_union_preserving() {
        let contributors = vec![human("alice"), bot("deploy-bot"), human("carol")];
        let classification = classify(contributors, Vec::new(), &FilterOptions::default());

        assert_eq!(logins(&classification.contributors), ["alice", "carol"]);
        assert_eq!(logins(&classification.contributor_bots), ["deploy-bot"]);

        for bot in &classification.contributor_bots {
            assert!(!classification.contributors.contains(bot));
        }
        let total =
            classification.contributors.len() + classification.contributor_bots.len();
        assert_eq!(total, 3);
    }

    #[test]
    fn bots_are_isolated_even_without_filtering() {
        let classification =
            classify(vec![bot("deploy-bot")], Vec::new(), &FilterOptions::default());

        assert!(classification.contributors.is_empty());
        assert_eq!(logins(&classification.contributor_bots), ["deploy-bot"]);
    }

    #[test]
    fn author_filter_removes_humans_without_reclassifying_them() {
        let options = FilterOptions {
            truncate:      0,
            author_filter: Some(AuthorFilter::new("octo-.*").expect("valid pattern"))
        };
        let contributors =
            vec![human("octo-admin"), human("alice"), human("octo-ci"), bot("deploy-bot")];
        let classification = classify(contributors, Vec::new(), &options);

        assert_eq!(logins(&classification.contributors), ["alice"]);
        assert_eq!(logins(&classification.contributor_bots), ["deploy-bot"]);
    }

    #[test]
    fn author_filter_is_anchored_against_the_full_login() {
        let filter = AuthorFilter::new("bot").expect("valid pattern");
        assert!(filter.matches("bot"));
        assert!(!filter.matches("robotics"));
        assert!(!filter.matches("bots"));
    }

    #[test]
    fn malformed_pattern_is_a_configuration_error() {
        assert!(AuthorFilter::new("[").is_err());
    }

    #[test]
    fn truncation_caps_primary_buckets_only() {
        let options = FilterOptions {
            truncate:      2,
            author_filter: None
        };
        let contributors = vec![
            human("first"),
            bot("a[bot]"),
            human("second"),
            human("third"),
            bot("b[bot]"),
        ];
        let classification = classify(contributors, Vec::new(), &options);

        assert_eq!(logins(&classification.contributors), ["first", "second"]);
        assert_eq!(logins(&classification.contributor_bots), ["a[bot]", "b[bot]"]);
    }

    #[test]
    fn source_lists_never_interact() {
        let classification = classify(
            vec![human("contributor"), bot("ci[bot]")],
            vec![human("collaborator"), bot("deploy-bot")],
            &FilterOptions::default()
        );

        let expected = Classification {
            contributors:      vec![human("contributor")],
            contributor_bots:  vec![bot("ci[bot]")],
            collaborators:     vec![human("collaborator")],
            collaborator_bots: vec![bot("deploy-bot")]
        };
        assert_eq!(classification, expected);
    }

    #[test]
    fn classification_preserves_upstream_order() {
        let contributors: Vec<Actor> =
            ["zeta", "alpha", "mike", "delta"].iter().map(|login| human(login)).collect();
        let classification = classify(contributors, Vec::new(), &FilterOptions::default());

        assert_eq!(logins(&classification.contributors), ["zeta", "alpha", "mike", "delta"]);
    }
}
