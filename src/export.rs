// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Writing the generated documentation to disk.
//!
//! [`plan_documents`] is pure and decides what every output file contains;
//! [`write_documents`] puts those files into a directory. [`export_workspace`]
//! chains grouping, planning and writing for a parsed export.

use crate::filename::md_filename;
use crate::grouper::{self, GroupError, GroupMap};
use crate::parser::WorkspaceExport;
use crate::renderer::{self, IndexEntry};
use snafu::prelude::*;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name of the generated index page.
pub const INDEX_FILE_NAME: &str = "README.md";

/// Error type for export failures.
#[derive(Debug, Snafu)]
pub enum ExportError {
    /// Requests could not be attached to their groups.
    #[snafu(display("failed to group requests: {source}"))]
    Group {
        /// The underlying grouping error.
        source: GroupError,
    },

    /// The output directory could not be created.
    #[snafu(display("failed to create output directory {}: {source}", path.display()))]
    CreateOutputDir {
        /// The directory that could not be created.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// A generated file could not be written.
    #[snafu(display("failed to write {}: {source}", path.display()))]
    WriteFile {
        /// The file that could not be written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

/// Options controlling how documents are written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Report what would be written without touching the filesystem.
    pub dry_run: bool,
}

/// A generated output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    /// File name relative to the output directory.
    pub file_name: String,

    /// Full Markdown content.
    pub contents: String,
}

/// Renders every group page followed by the index page.
///
/// Pages come in group order; the index is always last. Two groups whose
/// names map to the same file name both get a document, and the later one
/// wins when written.
#[must_use]
pub fn plan_documents(title: &str, groups: &GroupMap) -> Vec<Document> {
    let mut documents = Vec::with_capacity(groups.len() + 1);
    let mut entries = Vec::with_capacity(groups.len());
    let mut seen = HashSet::new();

    for group in groups.values() {
        let file_name = md_filename(&group.name);
        if !seen.insert(file_name.clone()) {
            tracing::warn!(
                group = %group.name,
                file = %file_name,
                "page file name collides with an earlier group"
            );
        }

        entries.push(IndexEntry {
            name: group.name.clone(),
            file_name: file_name.clone(),
        });
        documents.push(Document {
            file_name,
            contents: renderer::render_group_page(group),
        });
    }

    documents.push(Document {
        file_name: INDEX_FILE_NAME.to_owned(),
        contents: renderer::render_index(title, &entries),
    });

    documents
}

/// Writes `documents` into `dir`, creating the directory if needed.
///
/// Existing files are overwritten. Writing stops at the first failure and
/// files written before it are left in place.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or a file cannot be
/// written.
pub fn write_documents(
    dir: &Path,
    documents: &[Document],
    opts: ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    if !opts.dry_run {
        std::fs::create_dir_all(dir).context(CreateOutputDirSnafu { path: dir })?;
    }

    let mut written = Vec::with_capacity(documents.len());
    for doc in documents {
        let path = dir.join(&doc.file_name);
        if opts.dry_run {
            tracing::info!("Would write {}", path.display());
        } else {
            std::fs::write(&path, &doc.contents).context(WriteFileSnafu { path: &path })?;
            tracing::info!("Wrote {}", path.display());
        }
        written.push(path);
    }

    Ok(written)
}

/// Groups, renders and writes a parsed export into `dir`.
///
/// Returns the paths of the files written (or that would be written in a
/// dry run), index page last.
///
/// # Errors
///
/// Returns [`ExportError::Group`] before anything is written if a request
/// references an unknown group; otherwise any error from
/// [`write_documents`].
pub fn export_workspace(
    workspace: &WorkspaceExport,
    dir: &Path,
    opts: ExportOptions,
) -> Result<Vec<PathBuf>, ExportError> {
    let groups = grouper::group_requests(workspace).context(GroupSnafu)?;
    let documents = plan_documents(&workspace.title, &groups);
    write_documents(dir, &documents, opts)
}
