// SPDX-License-Identifier: GPL-3.0-only
// Copyright (C) 2025 Brian Hetro <whee@smaertness.net>

//! JSON parsing for Insomnia workspace exports.
//!
//! This module handles reading and deserializing the JSON document produced
//! by the Insomnia REST client's "Export Data" feature. The document holds a
//! flat `resources` list in which request groups, requests, environments and
//! other records appear side by side, distinguished by their `_type` field.
//!
//! Only request groups and requests are kept as typed records; every other
//! kind is retained as [`Resource::Other`] so that resource positions still
//! line up with the source document.
//!
//! # Example
//!
//! ```
//! use insomnia2md::parser::{parse_workspace, Resource};
//!
//! let json = r#"{
//!     "resources": [
//!         { "_type": "request_group", "_id": "fld_1", "name": "Users" }
//!     ]
//! }"#;
//!
//! let workspace = parse_workspace(json).unwrap();
//! assert_eq!(workspace.title, "Users");
//! assert!(matches!(workspace.resources[0], Resource::Group(_)));
//! ```

use serde::Deserialize;
use serde_json::Value;
use snafu::prelude::*;
use std::path::{Path, PathBuf};

/// Error type for JSON parsing failures.
#[derive(Debug, Snafu)]
pub enum ParseError {
    /// The content is not valid JSON, or it lacks a `resources` array.
    #[snafu(display("failed to parse JSON: {source}"))]
    Json {
        /// The underlying JSON parsing error.
        source: serde_json::Error,
    },

    /// The `resources` array is empty, so there is no workspace title.
    #[snafu(display("export contains no resources"))]
    EmptyWorkspace,

    /// A resource lacks a field its `_type` requires.
    #[snafu(display("resource {index} is missing field `{field}`"))]
    MissingField {
        /// Position of the offending resource in the `resources` array.
        index: usize,
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Error type for reading an export from disk.
#[derive(Debug, Snafu)]
pub enum LoadError {
    /// The input path does not exist or is not a regular file.
    #[snafu(display("{} does not exist or is not a regular file", path.display()))]
    NotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[snafu(display("failed to read {}: {source}", path.display()))]
    Read {
        /// The path that was read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The file was read but its content is not a usable export.
    #[snafu(display("failed to parse {}: {source}", path.display()))]
    Parse {
        /// The path that was parsed.
        path: PathBuf,
        /// The underlying parse error.
        source: ParseError,
    },
}

/// The top-level shape of the export file before resources are typed.
#[derive(Deserialize)]
struct RawExport {
    resources: Vec<Value>,
}

/// A parsed Insomnia workspace export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceExport {
    /// The `name` of the first resource, used as the documentation title.
    pub title: String,

    /// Every resource in source order.
    pub resources: Vec<Resource>,
}

/// One entry of the export's `resources` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    /// A `request_group` record (a folder of requests).
    Group(GroupResource),

    /// A `request` record.
    Request(RequestResource),

    /// Any other record kind (workspace, environment, cookie jar, ...).
    Other,
}

/// A `request_group` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResource {
    /// Unique identifier referenced by requests' `parentId`.
    pub id: String,

    /// Display name of the group.
    pub name: String,
}

/// A `request` record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResource {
    /// Identifier of the owning request group.
    pub parent_id: String,

    /// Display name of the request.
    pub name: String,

    /// HTTP method (e.g., "GET").
    pub method: String,

    /// URL template, possibly containing unexpanded variables.
    pub url: String,

    /// Free-form description text.
    pub description: String,

    /// Query parameters in source order.
    pub parameters: Vec<Parameter>,

    /// The body's `text` field, when the body has one.
    pub body: Option<String>,
}

/// A single query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,

    /// Parameter value.
    pub value: String,
}

impl Resource {
    /// Types a raw resource according to its `_type` discriminator.
    fn from_value(index: usize, value: &Value) -> Result<Self, ParseError> {
        Ok(match require_str(value, index, "_type")? {
            "request_group" => Self::Group(GroupResource {
                id: require_string(value, index, "_id")?,
                name: require_string(value, index, "name")?,
            }),
            "request" => Self::Request(RequestResource::from_value(index, value)?),
            _ => Self::Other,
        })
    }
}

impl RequestResource {
    fn from_value(index: usize, value: &Value) -> Result<Self, ParseError> {
        let parameters = value
            .get("parameters")
            .and_then(Value::as_array)
            .context(MissingFieldSnafu {
                index,
                field: "parameters",
            })?
            .iter()
            .map(|param| -> Result<Parameter, ParseError> {
                Ok(Parameter {
                    name: param.get("name").map(json_text).context(MissingFieldSnafu {
                        index,
                        field: "parameters.name",
                    })?,
                    value: param.get("value").map(json_text).context(MissingFieldSnafu {
                        index,
                        field: "parameters.value",
                    })?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let body = value
            .get("body")
            .and_then(Value::as_object)
            .context(MissingFieldSnafu {
                index,
                field: "body",
            })?
            .get("text")
            .and_then(Value::as_str)
            .map(str::to_owned);

        Ok(Self {
            parent_id: require_string(value, index, "parentId")?,
            name: require_string(value, index, "name")?,
            method: require_string(value, index, "method")?,
            url: require_string(value, index, "url")?,
            description: require_string(value, index, "description")?,
            parameters,
            body,
        })
    }
}

/// Returns the string at `field`, or a [`ParseError::MissingField`].
fn require_str<'a>(
    value: &'a Value,
    index: usize,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    value
        .get(field)
        .and_then(Value::as_str)
        .context(MissingFieldSnafu { index, field })
}

/// Like [`require_str`] but returns an owned `String`.
fn require_string(value: &Value, index: usize, field: &'static str) -> Result<String, ParseError> {
    require_str(value, index, field).map(str::to_owned)
}

/// Renders a JSON scalar as plain text: strings verbatim, anything else as JSON.
fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parses a JSON string into a [`WorkspaceExport`].
///
/// The title is taken from the first resource's `name`, whatever its type.
///
/// # Errors
///
/// Returns an error if the JSON is malformed, has no `resources` array, has
/// an empty `resources` array, or contains a group or request lacking one of
/// its required fields.
///
/// # Example
///
/// ```
/// use insomnia2md::parser::parse_workspace;
///
/// let json = r#"{"resources": [{"_type": "workspace", "name": "My API"}]}"#;
///
/// let workspace = parse_workspace(json).unwrap();
/// assert_eq!(workspace.title, "My API");
/// ```
pub fn parse_workspace(json_str: &str) -> Result<WorkspaceExport, ParseError> {
    let raw: RawExport = serde_json::from_str(json_str).context(JsonSnafu)?;

    let first = raw.resources.first().context(EmptyWorkspaceSnafu)?;
    let title = require_string(first, 0, "name")?;

    let resources = raw
        .resources
        .iter()
        .enumerate()
        .map(|(index, value)| Resource::from_value(index, value))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WorkspaceExport { title, resources })
}

/// Reads and parses the export file at `path`.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if `path` is not an existing regular file,
/// [`LoadError::Read`] if it cannot be read, and [`LoadError::Parse`] if its
/// content is rejected by [`parse_workspace`].
pub fn load_workspace(path: &Path) -> Result<WorkspaceExport, LoadError> {
    ensure!(path.is_file(), NotFoundSnafu { path });

    let json = std::fs::read_to_string(path).context(ReadSnafu { path })?;
    tracing::debug!(path = %path.display(), bytes = json.len(), "read export");

    parse_workspace(&json).context(ParseSnafu { path })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_json(resources_json: &str) -> String {
        format!(r#"{{ "_type": "export", "resources": [{resources_json}] }}"#)
    }

    const WORKSPACE: &str = r#"{ "_type": "workspace", "_id": "wrk_1", "name": "Shop API" }"#;

    fn request_json(parameters: &str, body: &str) -> String {
        format!(
            r#"{{
                "_type": "request",
                "_id": "req_1",
                "parentId": "fld_1",
                "name": "List Users",
                "method": "GET",
                "url": "{{{{ base_url }}}}/users",
                "description": "List all",
                "parameters": [{parameters}],
                "body": {body}
            }}"#
        )
    }

    #[test]
    fn takes_title_from_first_resource() {
        let json = export_json(WORKSPACE);
        let workspace = parse_workspace(&json).unwrap();

        assert_eq!(workspace.title, "Shop API");
        assert_eq!(workspace.resources, vec![Resource::Other]);
    }

    #[test]
    fn parses_request_group() {
        let json = export_json(&format!(
            r#"{WORKSPACE}, {{ "_type": "request_group", "_id": "fld_1", "name": "Users" }}"#
        ));
        let workspace = parse_workspace(&json).unwrap();

        assert_eq!(
            workspace.resources[1],
            Resource::Group(GroupResource {
                id: "fld_1".into(),
                name: "Users".into(),
            })
        );
    }

    #[test]
    fn parses_request() {
        let json = export_json(&format!(
            "{WORKSPACE}, {}",
            request_json(r#"{"name": "q", "value": "1"}"#, r#"{"text": "{}"}"#)
        ));
        let workspace = parse_workspace(&json).unwrap();

        match &workspace.resources[1] {
            Resource::Request(req) => {
                assert_eq!(req.parent_id, "fld_1");
                assert_eq!(req.name, "List Users");
                assert_eq!(req.method, "GET");
                assert_eq!(req.url, "{{ base_url }}/users");
                assert_eq!(req.description, "List all");
                assert_eq!(
                    req.parameters,
                    vec![Parameter {
                        name: "q".into(),
                        value: "1".into(),
                    }]
                );
                assert_eq!(req.body.as_deref(), Some("{}"));
            }
            other => panic!("Expected Request, got {other:?}"),
        }
    }

    #[test]
    fn body_without_text_is_none() {
        let json = export_json(&format!("{WORKSPACE}, {}", request_json("", "{}")));
        let workspace = parse_workspace(&json).unwrap();

        match &workspace.resources[1] {
            Resource::Request(req) => assert!(req.body.is_none()),
            other => panic!("Expected Request, got {other:?}"),
        }
    }

    #[test]
    fn renders_non_string_parameter_values_as_json() {
        let json = export_json(&format!(
            "{WORKSPACE}, {}",
            request_json(
                r#"{"name": "page", "value": 2}, {"name": "all", "value": true}"#,
                "{}"
            )
        ));
        let workspace = parse_workspace(&json).unwrap();

        match &workspace.resources[1] {
            Resource::Request(req) => {
                assert_eq!(req.parameters[0].value, "2");
                assert_eq!(req.parameters[1].value, "true");
            }
            other => panic!("Expected Request, got {other:?}"),
        }
    }

    #[test]
    fn ignores_unknown_resource_types() {
        let json = export_json(&format!(
            r#"{WORKSPACE}, {{ "_type": "environment", "_id": "env_1", "data": {{}} }}"#
        ));
        let workspace = parse_workspace(&json).unwrap();

        assert_eq!(workspace.resources, vec![Resource::Other, Resource::Other]);
    }

    #[test]
    fn returns_error_for_invalid_json() {
        let result = parse_workspace("not valid json");
        assert!(matches!(result, Err(ParseError::Json { .. })));
    }

    #[test]
    fn returns_error_for_missing_resources() {
        let result = parse_workspace(r#"{"_type": "export"}"#);
        assert!(matches!(result, Err(ParseError::Json { .. })));
    }

    #[test]
    fn returns_error_for_empty_resources() {
        let result = parse_workspace(r#"{"resources": []}"#);
        assert!(matches!(result, Err(ParseError::EmptyWorkspace)));
    }

    #[test]
    fn returns_error_for_untitled_first_resource() {
        let result = parse_workspace(r#"{"resources": [{"_type": "workspace"}]}"#);
        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                index: 0,
                field: "name"
            })
        ));
    }

    #[test]
    fn returns_error_for_request_missing_method() {
        let json = export_json(&format!(
            r#"{WORKSPACE}, {{
                "_type": "request",
                "parentId": "fld_1",
                "name": "Broken",
                "url": "/broken",
                "description": "",
                "parameters": [],
                "body": {{}}
            }}"#
        ));
        let result = parse_workspace(&json);

        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                index: 1,
                field: "method"
            })
        ));
    }

    #[test]
    fn returns_error_for_missing_type() {
        let json = export_json(&format!(r#"{WORKSPACE}, {{ "name": "anonymous" }}"#));
        let result = parse_workspace(&json);

        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                index: 1,
                field: "_type"
            })
        ));
    }

    #[test]
    fn returns_error_for_parameter_missing_value() {
        let json = export_json(&format!(
            "{WORKSPACE}, {}",
            request_json(r#"{"name": "q"}"#, "{}")
        ));
        let result = parse_workspace(&json);

        assert!(matches!(
            result,
            Err(ParseError::MissingField {
                field: "parameters.value",
                ..
            })
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_workspace(&dir.path().join("absent.json"));

        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn load_rejects_directory() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_workspace(dir.path());

        assert!(matches!(result, Err(LoadError::NotFound { .. })));
    }

    #[test]
    fn load_reads_and_parses_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        std::fs::write(&path, export_json(WORKSPACE)).unwrap();

        let workspace = load_workspace(&path).unwrap();
        assert_eq!(workspace.title, "Shop API");
    }
}
