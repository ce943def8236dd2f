// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Command-line interface for the contributor wall binary.
//!
//! Resolves configuration from arguments and environment, fetches both actor
//! lists, runs the generation pipeline and emits the named outputs. When a
//! `GITHUB_OUTPUT` file is present the outputs are appended there in the
//! multiline format understood by GitHub Actions.

use std::{
    env, fs,
    io::Write as _,
    path::{Path, PathBuf},
    process
};

use clap::{ArgAction, Parser};
use contributor_wall::{
    Affiliation, DEFAULT_AVATAR_MARGIN, DEFAULT_AVATAR_SIZE, DEFAULT_CANVAS_WIDTH, DEFAULT_TEMPLATE,
    DataUriEncoder, Error, GeneratorOptions, GithubClient, LayoutConfig, Outputs, generate,
    io_error, retry::RetryConfig, write_svg
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Delimiter used for multiline values in the GitHub Actions output file.
const OUTPUT_DELIMITER: &str = "CONTRIBUTOR_WALL_EOF";

/// Command line interface for rendering repository contributor walls.
#[derive(Debug, Parser)]
#[command(name = "contributor-wall", version, about = "Render repository contributor walls")]
struct Cli {
    /// Repository owner; combined with --repo.
    #[arg(long, value_name = "OWNER")]
    owner: Option<String>,

    /// Repository name; combined with --owner.
    #[arg(long, value_name = "REPO")]
    repo: Option<String>,

    /// Combined owner/repo slug, as provided by GitHub Actions.
    #[arg(long = "repository", env = "GITHUB_REPOSITORY", value_name = "OWNER/REPO")]
    repository: Option<String>,

    /// API token used for authenticated requests; required, the
    /// collaborators endpoint rejects anonymous access.
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Page size hint for list fetches (1-100).
    #[arg(long, value_name = "N")]
    count: Option<u8>,

    /// Cap each primary bucket to its first N entries (0 = unlimited).
    #[arg(long, value_name = "N", default_value_t = 0)]
    truncate: usize,

    /// Omit bots from every output.
    #[arg(long = "exclude-bots", action = ArgAction::SetTrue)]
    exclude_bots: bool,

    /// Suppress name captions in HTML table cells.
    #[arg(long = "hide-name", action = ArgAction::SetTrue)]
    hide_name: bool,

    /// Collaborator affiliation filter: all, direct or outside.
    #[arg(long, value_name = "AFFILIATION", default_value = "all")]
    affiliation: String,

    /// Anchored regular expression removing matching logins.
    #[arg(long = "filter-author", value_name = "PATTERN")]
    filter_author: Option<String>,

    /// Canvas width in pixels.
    #[arg(long = "svg-width", value_name = "PX", default_value_t = DEFAULT_CANVAS_WIDTH)]
    svg_width: u32,

    /// Avatar tile edge length in pixels.
    #[arg(long = "avatar-size", value_name = "PX", default_value_t = DEFAULT_AVATAR_SIZE)]
    avatar_size: u32,

    /// Margin around each avatar in pixels.
    #[arg(long = "avatar-margin", value_name = "PX", default_value_t = DEFAULT_AVATAR_MARGIN)]
    avatar_margin: u32,

    /// Vertical space reserved below each tile for a name caption.
    #[arg(long = "name-height", value_name = "PX", default_value_t = 0)]
    name_height: u32,

    /// Path to a custom SVG template; the built-in template is used when
    /// omitted.
    #[arg(long = "template", value_name = "PATH")]
    template: Option<PathBuf>,

    /// Destination path for the generated SVG.
    #[arg(long, value_name = "PATH", default_value = "./contributors.svg")]
    output: PathBuf,

    /// Print all outputs as a JSON object to stdout.
    #[arg(long, action = ArgAction::SetTrue)]
    json: bool
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("{}", error.to_display_string());
        process::exit(1);
    }
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, transport and rendering errors; configuration
/// problems are surfaced before the first fetch.
async fn run() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let (owner, repo) = resolve_slug(&cli)?;
    let token = resolve_token(&cli)?;
    let affiliation: Affiliation = cli.affiliation.parse()?;
    let options = build_options(&cli)?;
    options.validate()?;

    info!("owner/repo: {}/{}", owner, repo);
    info!("output: {:?}", options.output_path);

    let client = GithubClient::new(Some(token), RetryConfig::default())?;
    let contributors = client.contributors(&owner, &repo, cli.count).await?;
    let collaborators = client.collaborators(&owner, &repo, affiliation, cli.count).await?;

    let encoder = DataUriEncoder::new();
    let outputs = generate(&options, contributors, collaborators, &client, &encoder).await?;

    write_svg(&options.output_path, &outputs.svg)?;
    emit_outputs(&outputs)?;

    if cli.json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer(&mut handle, &outputs)
            .map_err(|e| Error::service(format!("failed to serialize outputs: {e}")))?;
    }

    Ok(())
}

/// Requires a non-empty API token before any request is issued.
fn resolve_token(cli: &Cli) -> Result<&str, Error> {
    cli.token
        .as_deref()
        .filter(|token| !token.is_empty())
        .ok_or_else(|| Error::validation("an api token is required (set --token or GITHUB_TOKEN)"))
}

/// Resolves the owner/repo pair from explicit flags or the combined slug.
fn resolve_slug(cli: &Cli) -> Result<(String, String), Error> {
    if let (Some(owner), Some(repo)) = (cli.owner.as_deref(), cli.repo.as_deref()) {
        if owner.is_empty() || repo.is_empty() {
            return Err(Error::validation("owner and repo must not be empty"));
        }
        return Ok((owner.to_owned(), repo.to_owned()));
    }

    let combined = cli.repository.as_deref().filter(|value| !value.is_empty()).ok_or_else(|| {
        Error::validation("owner and repo must be provided (flags or GITHUB_REPOSITORY)")
    })?;

    let (owner, repo) = combined
        .split_once('/')
        .filter(|(owner, repo)| !owner.is_empty() && !repo.is_empty())
        .ok_or_else(|| Error::validation("repository slug must use the owner/repo format"))?;

    Ok((owner.to_owned(), repo.to_owned()))
}

/// Builds generator options from CLI values, loading the template file when
/// one is given.
fn build_options(cli: &Cli) -> Result<GeneratorOptions, Error> {
    let svg_template = match cli.template.as_deref() {
        Some(path) => fs::read_to_string(path).map_err(|source| io_error(path, source))?,
        None => DEFAULT_TEMPLATE.to_owned()
    };

    Ok(GeneratorOptions {
        layout: LayoutConfig {
            canvas_width:    cli.svg_width,
            avatar_size:     cli.avatar_size,
            avatar_margin:   cli.avatar_margin,
            name_row_height: cli.name_height
        },
        hide_name: cli.hide_name,
        exclude_bots: cli.exclude_bots,
        truncate: cli.truncate,
        author_filter_pattern: cli.filter_author.clone(),
        svg_template,
        output_path: cli.output.clone()
    })
}

/// Appends the named outputs to the GitHub Actions output file when present,
/// or logs a summary otherwise.
fn emit_outputs(outputs: &Outputs) -> Result<(), Error> {
    let Some(path) = env::var_os("GITHUB_OUTPUT") else {
        for (name, value) in outputs.entries() {
            info!("output {}: {} bytes", name, value.len());
        }
        return Ok(());
    };

    append_outputs(&PathBuf::from(path), outputs)
}

/// Appends all nine outputs to `path` as heredoc blocks.
fn append_outputs(path: &Path, outputs: &Outputs) -> Result<(), Error> {
    let mut file = fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(path)
        .map_err(|source| io_error(path, source))?;

    for (name, value) in outputs.entries() {
        let delimiter = heredoc_delimiter(value);
        writeln!(file, "{name}<<{delimiter}\n{value}\n{delimiter}")
            .map_err(|source| io_error(path, source))?;
    }

    Ok(())
}

/// Picks a heredoc delimiter that never appears inside `value`.
fn heredoc_delimiter(value: &str) -> String {
    let mut delimiter = OUTPUT_DELIMITER.to_owned();
    while value.contains(&delimiter) {
        delimiter.push('_');
    }
    delimiter
}
