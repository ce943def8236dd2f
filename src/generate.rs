// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Orchestration of the contributor wall pipeline.
//!
//! Sequences classification and rendering over already-fetched actor lists:
//! the SVG image is rendered for the human contributors bucket only, HTML is
//! rendered for all four buckets, and everything is collected into named
//! outputs. Fetching and output emission stay with the caller.

use std::{fs, path::Path};

use serde::Serialize;
use tracing::{debug, info};

use crate::{
    actor::Actor,
    classify::{AuthorFilter, FilterOptions, classify},
    error::{self, Error},
    html::{HtmlRender, ProfileLookup, render_html},
    layout::LayoutConfig,
    svg::{AvatarEncoder, DEFAULT_TEMPLATE, render_svg}
};

/// Full configuration surface of a generation run.
#[derive(Debug, Clone)]
pub struct GeneratorOptions {
    /// Grid geometry for both output formats.
    pub layout:                LayoutConfig,
    /// Suppress name captions in HTML table cells.
    pub hide_name:             bool,
    /// Omit bots from every output; bot buckets render as empty strings.
    pub exclude_bots:          bool,
    /// Cap on primary bucket size after filtering; `0` means unlimited.
    pub truncate:              usize,
    /// Optional anchored regular expression removing matching logins.
    pub author_filter_pattern: Option<String>,
    /// SVG template carrying the width, height and contributors
    /// placeholders.
    pub svg_template:          String,
    /// Destination path for the persisted SVG artifact.
    pub output_path:           std::path::PathBuf
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            layout:                LayoutConfig::default(),
            hide_name:             false,
            exclude_bots:          false,
            truncate:              0,
            author_filter_pattern: None,
            svg_template:          DEFAULT_TEMPLATE.to_owned(),
            output_path:           std::path::PathBuf::from("./contributors.svg")
        }
    }
}

impl GeneratorOptions {
    /// Compiles the filtering options, validating the author pattern.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the author filter pattern is
    /// malformed.
    pub fn filter_options(&self) -> Result<FilterOptions, Error> {
        let author_filter = match self.author_filter_pattern.as_deref() {
            Some(pattern) => Some(AuthorFilter::new(pattern)?),
            None => None
        };

        Ok(FilterOptions {
            truncate: self.truncate,
            author_filter
        })
    }

    /// Checks the whole configuration before any fetch happens.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for a zero-column layout, an empty SVG
    /// template or a malformed author filter pattern.
    pub fn validate(&self) -> Result<(), Error> {
        self.layout.validate()?;
        if self.svg_template.trim().is_empty() {
            return Err(Error::validation("svg template must not be empty"));
        }
        self.filter_options()?;
        Ok(())
    }
}

/// Named outputs of one generation run.
///
/// Field names serialize to the output names consumed downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outputs {
    /// Complete SVG document for the human contributors bucket.
    pub svg: String,
    /// Contributor HTML table.
    pub html_table: String,
    /// Contributor HTML inline list.
    pub html_list: String,
    /// Contributor bot HTML table.
    pub html_table_bots: String,
    /// Contributor bot HTML inline list.
    pub html_list_bots: String,
    /// Collaborator HTML table.
    pub html_collaborators_table: String,
    /// Collaborator HTML inline list.
    pub html_collaborators_list: String,
    /// Collaborator bot HTML table.
    pub html_collaborators_table_bots: String,
    /// Collaborator bot HTML inline list.
    pub html_collaborators_list_bots: String
}

impl Outputs {
    /// Pairs every output with its downstream name, in a stable order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("svg", &self.svg),
            ("htmlTable", &self.html_table),
            ("htmlList", &self.html_list),
            ("htmlTableBots", &self.html_table_bots),
            ("htmlListBots", &self.html_list_bots),
            ("htmlCollaboratorsTable", &self.html_collaborators_table),
            ("htmlCollaboratorsList", &self.html_collaborators_list),
            ("htmlCollaboratorsTableBots", &self.html_collaborators_table_bots),
            ("htmlCollaboratorsListBots", &self.html_collaborators_list_bots),
        ]
    }
}

/// Runs classification and both renderers over the fetched actor lists.
///
/// Bots and collaborators are never drawn in the SVG image; they only appear
/// in their dedicated HTML outputs. With `exclude_bots` set the bot buckets
/// are rendered as empty strings so bots appear nowhere.
///
/// # Errors
///
/// Returns [`Error::Validation`] for an invalid configuration and
/// [`Error::Encode`] when an avatar cannot be embedded; a failed profile
/// lookup is recovered per actor and never aborts the run.
pub async fn generate<L, E>(
    options: &GeneratorOptions,
    contributors: Vec<Actor>,
    collaborators: Vec<Actor>,
    profiles: &L,
    encoder: &E
) -> Result<Outputs, Error>
where
    L: ProfileLookup + Clone + Send + Sync + 'static,
    E: AvatarEncoder + Clone + Send + 'static
{
    options.validate()?;
    let filter = options.filter_options()?;

    let classification = classify(contributors, collaborators, &filter);
    debug!(
        "classified {} contributors, {} contributor bots, {} collaborators, {} collaborator bots",
        classification.contributors.len(),
        classification.contributor_bots.len(),
        classification.collaborators.len(),
        classification.collaborator_bots.len()
    );

    let svg = render_svg(
        &classification.contributors,
        &options.layout,
        &options.svg_template,
        encoder
    )
    .await?;

    let contributor_bots: &[Actor] = if options.exclude_bots {
        &[]
    } else {
        &classification.contributor_bots
    };
    let collaborator_bots: &[Actor] = if options.exclude_bots {
        &[]
    } else {
        &classification.collaborator_bots
    };

    let contributors_html = render_bucket(&classification.contributors, options, profiles).await?;
    let contributor_bots_html = render_bucket(contributor_bots, options, profiles).await?;
    let collaborators_html = render_bucket(&classification.collaborators, options, profiles).await?;
    let collaborator_bots_html = render_bucket(collaborator_bots, options, profiles).await?;

    info!(
        "generated contributor wall: {} tiles in svg, {} columns",
        classification.contributors.len(),
        contributors_html.column_count
    );

    Ok(Outputs {
        svg,
        html_table: contributors_html.table,
        html_list: contributors_html.list,
        html_table_bots: contributor_bots_html.table,
        html_list_bots: contributor_bots_html.list,
        html_collaborators_table: collaborators_html.table,
        html_collaborators_list: collaborators_html.list,
        html_collaborators_table_bots: collaborator_bots_html.table,
        html_collaborators_list_bots: collaborator_bots_html.list
    })
}

async fn render_bucket<L>(
    bucket: &[Actor],
    options: &GeneratorOptions,
    profiles: &L
) -> Result<HtmlRender, Error>
where
    L: ProfileLookup + Clone + Send + Sync + 'static
{
    render_html(bucket, &options.layout, options.hide_name, profiles).await
}

/// Persists the SVG document, creating parent directories as needed.
///
/// # Errors
///
/// Returns [`Error::Io`] when directories or the file cannot be written.
pub fn write_svg(path: &Path, svg: &str) -> Result<(), Error> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent).map_err(|source| error::io_error(parent, source))?;
    }

    fs::write(path, svg).map_err(|source| error::io_error(path, source))?;
    info!("generated {:?}", path);
    Ok(())
}
