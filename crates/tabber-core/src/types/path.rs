//! Slash-delimited node paths.
//!
//! A path is `segment/segment/.../segment`, always interpreted relative to a
//! user's root folder. The empty string is the root itself. Every segment
//! must be non-empty, so leading, trailing, and doubled separators are all
//! rejected rather than collapsed.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::AppError;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '/';

/// A parsed, validated path relative to a root folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The path that names the root folder.
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a textual path.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        if raw.is_empty() {
            return Ok(Self::root());
        }

        let segments = raw
            .split(PATH_SEPARATOR)
            .map(|segment| {
                if segment.is_empty() {
                    Err(AppError::malformed_path(format!(
                        "Path '{raw}' contains an empty segment"
                    )))
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Whether this path names the root folder.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The segments of this path, outermost first.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The final segment, or `None` for the root.
    pub fn name(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path without its final segment, or `None` for the root.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, rest) = self.segments.split_last()?;
        Some(Self {
            segments: rest.to_vec(),
        })
    }

    /// Splits into `(parent, name)`, or `None` for the root.
    pub fn split_last(&self) -> Option<(NodePath, &str)> {
        let (last, rest) = self.segments.split_last()?;
        Some((
            Self {
                segments: rest.to_vec(),
            },
            last.as_str(),
        ))
    }

    /// Returns a new path with `name` appended.
    pub fn join(&self, name: &str) -> Result<NodePath, AppError> {
        validate_name(name)?;
        let mut segments = self.segments.clone();
        segments.push(name.to_string());
        Ok(Self { segments })
    }
}

/// Validate a single node name against the segment grammar.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() {
        return Err(AppError::malformed_path("Name cannot be empty"));
    }
    if name.contains(PATH_SEPARATOR) {
        return Err(AppError::malformed_path(format!(
            "Name '{name}' cannot contain '{PATH_SEPARATOR}'"
        )));
    }
    Ok(())
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for segment in &self.segments {
            if !first {
                write!(f, "{PATH_SEPARATOR}")?;
            }
            write!(f, "{segment}")?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for NodePath {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for NodePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NodePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}
