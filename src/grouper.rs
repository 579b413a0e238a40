// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! Grouping of requests under their owning request groups.
//!
//! The export lists groups and requests as siblings in one flat array, with
//! each request pointing at its group through `parentId`. [`group_requests`]
//! folds that list into one [`RequestGroup`] per group, keyed by group id and
//! ordered by first appearance.

use crate::parser::{Resource, WorkspaceExport};
use indexmap::IndexMap;
use snafu::prelude::*;

/// Error type for grouping failures.
#[derive(Debug, Snafu)]
pub enum GroupError {
    /// A request names a parent that is not a known request group.
    #[snafu(display("request {request:?} references unknown request group {parent_id:?}"))]
    UnknownParent {
        /// Name of the orphaned request.
        request: String,
        /// The `parentId` that could not be resolved.
        parent_id: String,
    },
}

/// Request groups keyed by group id, in first-appearance order.
pub type GroupMap = IndexMap<String, RequestGroup>;

/// A request group together with the requests attached to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestGroup {
    /// Display name of the group.
    pub name: String,

    /// Requests in source order.
    pub requests: Vec<Request>,
}

/// A request prepared for documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// Display name of the request.
    pub name: String,

    /// HTTP method.
    pub method: String,

    /// URL template.
    pub url: String,

    /// Description text.
    pub description: String,

    /// Query parameters rendered as `name=value`, in source order.
    pub parameters: Vec<String>,

    /// Body text, if any.
    pub body: Option<String>,
}

/// Builds the group map from a parsed export.
///
/// Groups are collected in a first pass so that a request may appear before
/// its group in the source list. A repeated group id keeps its first name.
///
/// # Errors
///
/// Returns [`GroupError::UnknownParent`] if any request's `parentId` does not
/// match a request group. Orphaned requests are never dropped silently.
pub fn group_requests(workspace: &WorkspaceExport) -> Result<GroupMap, GroupError> {
    let mut groups = GroupMap::new();

    for resource in &workspace.resources {
        if let Resource::Group(group) = resource {
            groups
                .entry(group.id.clone())
                .or_insert_with(|| RequestGroup {
                    name: group.name.clone(),
                    requests: Vec::new(),
                });
        }
    }

    for resource in &workspace.resources {
        let Resource::Request(req) = resource else {
            continue;
        };

        let group = groups.get_mut(&req.parent_id).context(UnknownParentSnafu {
            request: &req.name,
            parent_id: &req.parent_id,
        })?;

        group.requests.push(Request {
            name: req.name.clone(),
            method: req.method.clone(),
            url: req.url.clone(),
            description: req.description.clone(),
            parameters: req
                .parameters
                .iter()
                .map(|p| format!("{}={}", p.name, p.value))
                .collect(),
            body: req.body.clone(),
        });
    }

    tracing::debug!(
        groups = groups.len(),
        requests = groups.values().map(|g| g.requests.len()).sum::<usize>(),
        "grouped requests"
    );

    Ok(groups)
}
