// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Contributor wall generation for repository documentation.
//!
//! The library turns contributor and collaborator lists fetched from GitHub
//! into embeddable artifacts: an SVG image of avatar tiles and equivalent
//! HTML table/list fragments. The core is pure and deterministic: grid
//! geometry, bucket classification and markup rendering. Fetching, avatar
//! embedding and artifact persistence sit behind narrow interfaces.
//! All public APIs are documented with invariants, error semantics and
//! minimal examples to facilitate integration in automation tooling.

mod actor;
mod classify;
mod encode;
mod error;
mod fanout;
mod generate;
mod github;
mod html;
mod layout;
pub mod retry;
mod svg;

pub use actor::{Actor, ActorKind};
pub use classify::{AuthorFilter, Classification, FilterOptions, classify};
pub use encode::DataUriEncoder;
pub use error::{Error, io_error};
pub use generate::{GeneratorOptions, Outputs, generate, write_svg};
pub use github::{Affiliation, GithubClient, MAX_PAGE_SIZE};
pub use html::{HtmlRender, Profile, ProfileLookup, render_html};
pub use layout::{
    BoundingBox, DEFAULT_AVATAR_MARGIN, DEFAULT_AVATAR_SIZE, DEFAULT_CANVAS_WIDTH, LayoutConfig
};
pub use svg::{AvatarEncoder, DEFAULT_TEMPLATE, render_svg};
