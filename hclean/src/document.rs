use hclean_types::ReadError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub const PROJECTS_KEY: &str = "projects";
pub const HISTORY_KEY: &str = "history";

/// The config file as a JSON object.
///
/// Only `projects.<path>.history` is ever touched; every other field, and the
/// original key order, survives a load/save round trip. The shape is checked
/// once on construction so the accessors below never fail.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigDocument {
    root: Map<String, Value>,
}

/// Mutable view of one entry in `projects`.
pub struct ProjectEntry<'a> {
    fields: &'a mut Map<String, Value>,
}

impl ConfigDocument {
    pub fn from_value(value: Value) -> Result<Self, ReadError> {
        match value {
            Value::Object(root) => {
                validate(&root)?;
                Ok(Self { root })
            }
            other => Err(ReadError::Shape(format!(
                "expected a JSON object at the top level, found {}",
                kind(&other)
            ))),
        }
    }

    pub fn parse(bytes: &[u8]) -> Result<Self, ReadError> {
        let value: Value = serde_json::from_slice(bytes)?;
        Self::from_value(value)
    }

    pub fn load(path: &Path) -> Result<Self, ReadError> {
        let bytes = fs::read(path)?;
        Self::parse(&bytes)
    }

    /// Two-space indented JSON; non-ASCII text is written as-is.
    pub fn to_pretty_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.root)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }

    /// History of a single project, `None` if the project or its history is absent.
    pub fn history(&self, project: &str) -> Option<&Vec<Value>> {
        self.root
            .get(PROJECTS_KEY)?
            .as_object()?
            .get(project)?
            .get(HISTORY_KEY)?
            .as_array()
    }

    /// Projects in document order.
    pub fn projects_mut(&mut self) -> impl Iterator<Item = (&str, ProjectEntry<'_>)> + '_ {
        self.root
            .get_mut(PROJECTS_KEY)
            .and_then(Value::as_object_mut)
            .into_iter()
            .flat_map(|projects| projects.iter_mut())
            .filter_map(|(path, entry)| {
                entry
                    .as_object_mut()
                    .map(|fields| (path.as_str(), ProjectEntry { fields }))
            })
    }
}

impl ProjectEntry<'_> {
    /// Number of history entries, zero when `history` is absent.
    pub fn history_len(&self) -> usize {
        self.fields
            .get(HISTORY_KEY)
            .and_then(Value::as_array)
            .map_or(0, Vec::len)
    }

    /// Drop the oldest entries so at most `max_entries` remain.
    /// Returns how many were removed.
    pub fn retain_latest(&mut self, max_entries: usize) -> usize {
        match self.fields.get_mut(HISTORY_KEY) {
            Some(Value::Array(history)) if history.len() > max_entries => {
                let removed = history.len() - max_entries;
                history.drain(..removed);
                removed
            }
            _ => 0,
        }
    }
}

fn validate(root: &Map<String, Value>) -> Result<(), ReadError> {
    let projects = match root.get(PROJECTS_KEY) {
        None | Some(Value::Null) => return Ok(()),
        Some(Value::Object(projects)) => projects,
        Some(other) => {
            return Err(ReadError::Shape(format!(
                "\"{PROJECTS_KEY}\" must be an object, found {}",
                kind(other)
            )));
        }
    };

    for (path, entry) in projects {
        let Some(fields) = entry.as_object() else {
            return Err(ReadError::Shape(format!(
                "project {path:?} must be an object, found {}",
                kind(entry)
            )));
        };
        match fields.get(HISTORY_KEY) {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(other) => {
                return Err(ReadError::Shape(format!(
                    "history of project {path:?} must be an array, found {}",
                    kind(other)
                )));
            }
        }
    }
    Ok(())
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
