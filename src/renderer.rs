// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Markdown rendering for grouped Insomnia requests.
//!
//! This module turns a [`RequestGroup`] into a documentation page and a list
//! of [`IndexEntry`] values into the landing page that links them.
//!
//! # Output Format
//!
//! A group page contains:
//! - The group name as a setext (`===`-underlined) title
//! - A bullet menu linking to each request's section
//! - One `##` section per request with description, method, URL, query
//!   parameters, payload, and empty response placeholders
//!
//! The index page repeats the workspace title and lists every group page
//! under a `## Indice` heading.
//!
//! # Example
//!
//! ```
//! use insomnia2md::grouper::{Request, RequestGroup};
//! use insomnia2md::renderer::render_group_page;
//!
//! let group = RequestGroup {
//!     name: "Users".into(),
//!     requests: vec![Request {
//!         name: "List Users".into(),
//!         method: "GET".into(),
//!         url: "/users".into(),
//!         description: "List all".into(),
//!         parameters: vec![],
//!         body: None,
//!     }],
//! };
//!
//! let markdown = render_group_page(&group);
//!
//! assert!(markdown.starts_with("Users\n=====\n\n"));
//! assert!(markdown.contains("* [List Users](#list-users)\n"));
//! assert!(markdown.contains("__Method__: `GET`  \n"));
//! ```

use crate::grouper::{Request, RequestGroup};
use std::fmt::Write;

/// Heading of the list of pages on the index page.
const INDEX_HEADING: &str = "Indice";

/// One link on the index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    /// Display name of the group.
    pub name: String,

    /// File name of the group's page, relative to the index.
    pub file_name: String,
}

/// Writes `title` underlined with `=`, followed by a blank line.
///
/// The underline is as long as the title in characters, not bytes.
fn write_title(out: &mut String, title: &str) {
    writeln!(out, "{title}").unwrap();
    writeln!(out, "{}\n", "=".repeat(title.chars().count())).unwrap();
}

/// Returns the in-page anchor a Markdown renderer derives for a heading.
///
/// Only lowercasing and space-to-hyphen replacement are applied.
#[must_use]
pub fn anchor(name: &str) -> String {
    name.to_lowercase().replace(' ', "-")
}

/// Renders the documentation page for one request group.
#[must_use]
pub fn render_group_page(group: &RequestGroup) -> String {
    let mut out = String::new();
    write_title(&mut out, &group.name);

    for req in &group.requests {
        writeln!(out, "* [{}](#{})", req.name, anchor(&req.name)).unwrap();
    }
    out.push_str("\n\n");

    for req in &group.requests {
        render_request(&mut out, req);
    }

    out
}

fn render_request(out: &mut String, req: &Request) {
    writeln!(out, "## {}\n", req.name).unwrap();
    writeln!(out, "__Description__: {}.  ", req.description).unwrap();
    writeln!(out, "__Method__: `{}`  ", req.method).unwrap();
    writeln!(out, "__URL__: `{}`  ", req.url).unwrap();
    if !req.parameters.is_empty() {
        writeln!(out, "__Query parameters__: `{}`  ", req.parameters.join("&")).unwrap();
    }

    out.push_str("__Payload__:  \n");
    if let Some(body) = req.body.as_deref().filter(|b| !b.is_empty()) {
        out.push_str("```  \n");
        writeln!(out, "{body}").unwrap();
        out.push_str("```  \n");
    }

    out.push_str("\n__Response ok:__\n\n");
    out.push_str("```  \n```  \n");
    out.push_str("\n__Response error:__\n\n");
    out.push_str("```  \n[]   \n```  \n\n");
}

/// Renders the index page linking every group page.
///
/// Entries are listed in the order given, each as a `1.` ordered-list item
/// so that Markdown renderers number them automatically.
///
/// # Example
///
/// ```
/// use insomnia2md::renderer::{render_index, IndexEntry};
///
/// let entries = vec![IndexEntry {
///     name: "Users".into(),
///     file_name: "users.md".into(),
/// }];
///
/// let markdown = render_index("Shop API", &entries);
/// assert_eq!(
///     markdown,
///     "Shop API\n========\n\n## Indice\n\n1. [Users](./users.md)\n"
/// );
/// ```
#[must_use]
pub fn render_index(title: &str, entries: &[IndexEntry]) -> String {
    let mut out = String::new();
    write_title(&mut out, title);

    writeln!(out, "## {INDEX_HEADING}\n").unwrap();
    for entry in entries {
        writeln!(out, "1. [{}](./{})", entry.name, entry.file_name).unwrap();
    }

    out
}
