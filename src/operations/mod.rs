use serde_json::{Map, Value};
use tracing::trace;

use crate::context::GetMode;
use crate::engine::{self, FanOut, Lookup, Mutation};
use crate::errors::{DotError, Result};

pub mod merge;

/// Read a value; wildcard levels produce an array with one entry per key.
pub struct Get {
    default: Value,
    mode: GetMode,
}

impl Get {
    pub fn new(default: Value, mode: GetMode) -> Self {
        Self { default, mode }
    }
}

impl Lookup for Get {
    type Output = Value;

    fn found(&self, value: &Value) -> Result<Value> {
        Ok(value.clone())
    }

    fn missing(&self, key: &str) -> Result<Value> {
        match self.mode {
            GetMode::ReturnDefault => Ok(self.default.clone()),
            GetMode::ReturnFound | GetMode::ThrowException => Err(DotError::PathNotFound(key.to_string())),
        }
    }

    fn fan_out(&self, level: &FanOut<'_>, branch: &mut dyn FnMut(&str) -> Result<Value>) -> Result<Value> {
        let mut out = Vec::with_capacity(level.len());
        for key in level.keys() {
            match branch(key.as_str()) {
                Ok(value) => out.push(value),
                Err(DotError::PathNotFound(missing)) if self.mode == GetMode::ReturnFound => {
                    trace!(branch = %level.notation_for(key), %missing, "dropping unmatched branch");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(Value::Array(out))
    }
}

/// Presence test. Never fails: every miss is `false`.
pub struct Has;

impl Lookup for Has {
    type Output = bool;

    fn found(&self, _value: &Value) -> Result<bool> {
        Ok(true)
    }

    fn missing(&self, _key: &str) -> Result<bool> {
        Ok(false)
    }

    fn fan_out(&self, level: &FanOut<'_>, branch: &mut dyn FnMut(&str) -> Result<bool>) -> Result<bool> {
        for key in level.keys() {
            if branch(key.as_str())? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Assign a value, creating missing intermediate objects. A wildcard before
/// the last segment only reaches keys that already exist; as the last segment
/// it is an ordinary key.
pub struct Set {
    value: Value,
}

impl Set {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl Mutation for Set {
    fn terminal(&self, target: &mut Value, key: &str) -> Result<()> {
        engine::insert(target, key, self.value.clone())
    }

    fn absent(&self, target: &mut Value, key: &str) -> Result<()> {
        engine::insert(target, key, Value::Object(Map::new()))
    }

    fn fan_out(&self, level: &FanOut<'_>, branch: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        for key in level.keys() {
            branch(key.as_str())?;
        }
        Ok(())
    }

    fn expands_trailing_wildcard(&self) -> bool {
        false
    }
}

/// Delete a key. A wildcard level succeeds when at least one branch removed
/// something.
pub struct Remove;

impl Mutation for Remove {
    fn terminal(&self, target: &mut Value, key: &str) -> Result<()> {
        engine::remove_key(target, key)
            .map(|_| ())
            .ok_or_else(|| DotError::PathNotFound(key.to_string()))
    }

    fn absent(&self, _target: &mut Value, key: &str) -> Result<()> {
        Err(DotError::PathNotFound(key.to_string()))
    }

    fn fan_out(&self, level: &FanOut<'_>, branch: &mut dyn FnMut(&str) -> Result<()>) -> Result<()> {
        if level.is_empty() {
            return Err(DotError::PathNotFound(level.notation()));
        }
        let mut not_found = Vec::new();
        // Last key first so removing a trailing array position never shifts one still to visit.
        for key in level.keys().iter().rev() {
            match branch(key.as_str()) {
                Ok(()) => {}
                Err(DotError::PathNotFound(_)) => not_found.push(level.notation_for(key)),
                Err(e) => return Err(e),
            }
        }
        if not_found.len() == level.len() {
            not_found.reverse();
            return Err(DotError::PathNotFound(not_found.join(", ")));
        }
        trace!(path = %level.notation(), missed = not_found.len(), "partial wildcard remove");
        Ok(())
    }
}
