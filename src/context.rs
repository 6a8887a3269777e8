use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DotError;
use crate::parser::{self, Path};

/// How `get` resolves a path that does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GetMode {
    /// Return the caller-supplied default value.
    #[default]
    #[serde(rename = "default")]
    ReturnDefault,
    /// Leave misses out of wildcard results; a miss outside a wildcard raises.
    #[serde(rename = "found")]
    ReturnFound,
    /// Raise `PathNotFound` on any miss.
    #[serde(rename = "exception")]
    ThrowException,
}

impl GetMode {
    pub const ALL: [GetMode; 3] = [
        GetMode::ReturnDefault,
        GetMode::ReturnFound,
        GetMode::ThrowException,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GetMode::ReturnDefault => "default",
            GetMode::ReturnFound => "found",
            GetMode::ThrowException => "exception",
        }
    }
}

impl fmt::Display for GetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GetMode {
    type Err = DotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GetMode::ALL
            .into_iter()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| DotError::InvalidMode(s.to_string()))
    }
}

/// Accessor configuration: notation delimiter, wildcard token and get mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Context {
    pub delimiter: String,
    pub wildcard: String,
    pub get_mode: GetMode,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            delimiter: ".".to_string(),
            wildcard: "*".to_string(),
            get_mode: GetMode::default(),
        }
    }
}

impl Context {
    /// Split `notation` with this context's delimiter and wildcard.
    pub fn parse(&self, notation: &str) -> Path {
        parser::parse(notation, &self.delimiter, &self.wildcard)
    }
}
