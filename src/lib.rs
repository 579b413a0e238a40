// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Convert Insomnia REST client workspace exports to Markdown documentation.
//!
//! This crate reads the JSON produced by Insomnia's "Export Data" feature
//! and generates one Markdown page per request group plus a `README.md`
//! index linking them.
//!
//! # Overview
//!
//! 1. [`parser`] reads the export into typed resource records
//! 2. [`grouper`] attaches every request to its request group
//! 3. [`renderer`] renders group pages and the index page
//! 4. [`export`] names the pages with [`filename`] and writes them out
//!
//! # Example
//!
//! ```no_run
//! use insomnia2md::{export, parser};
//! use std::path::Path;
//!
//! let workspace = parser::load_workspace(Path::new("insomnia.json")).unwrap();
//! let written =
//!     export::export_workspace(&workspace, Path::new("docs"), Default::default()).unwrap();
//!
//! for path in written {
//!     println!("{}", path.display());
//! }
//! ```
//!
//! # Modules
//!
//! - [`parser`]: JSON loading and typed records for Insomnia exports
//! - [`grouper`]: Request-to-group attachment in source order
//! - [`filename`]: Page file names derived from group names
//! - [`renderer`]: Markdown generation for group and index pages
//! - [`export`]: Planning and writing the output files

#![deny(missing_docs)]

pub mod export;
pub mod filename;
pub mod grouper;
pub mod parser;
pub mod renderer;
