pub mod context;
pub mod engine;
pub mod errors;
pub mod operations; // get / has / set / remove / merge
pub mod parser;

use serde_json::{Map, Value};
use tracing::debug;

use engine::Mutation;
use operations::{merge::deep_merge, Get, Has, Remove, Set};
use parser::Path;

pub use context::{Context, GetMode};
pub use errors::{DotError, Result};

/// Path-based access to a nested JSON document, e.g. `a.b.c` or `a.*.c`.
///
/// The accessor owns its document. Reads hand back copies; `set`, `remove`
/// and `merge` work on a copy and only replace the stored document when they
/// succeed.
#[derive(Debug, Clone)]
pub struct PathAccessor {
    data: Value,
    ctx: Context,
}

// A null document is an empty one.
fn normalize(data: Value) -> Value {
    if data.is_null() {
        Value::Object(Map::new())
    } else {
        data
    }
}

impl PathAccessor {
    pub fn new(data: Value) -> Self {
        Self { data: normalize(data), ctx: Context::default() }
    }

    /// Alias for [`PathAccessor::new`].
    pub fn with(data: Value) -> Self {
        Self::new(data)
    }

    /// Parse a JSON document and wrap it.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::new(serde_json::from_str(json)?))
    }

    pub fn data(&self) -> &Value {
        &self.data
    }

    pub fn into_data(self) -> Value {
        self.data
    }

    pub fn replace_data(&mut self, data: Value) -> &mut Self {
        self.data = normalize(data);
        self
    }

    /// Resolve `notation`, with `null` as the default for misses.
    pub fn get(&self, notation: &str) -> Result<Value> {
        self.get_or(notation, Value::Null)
    }

    /// Resolve `notation`. What a miss produces depends on the get mode.
    pub fn get_or(&self, notation: &str, default: Value) -> Result<Value> {
        debug!(notation, mode = %self.ctx.get_mode, "get");
        let op = Get::new(default, self.ctx.get_mode);
        engine::lookup(&op, &self.data, &self.parse(notation))
    }

    pub fn has(&self, notation: &str) -> bool {
        debug!(notation, "has");
        // Has never reports an error; treat one as absence all the same.
        engine::lookup(&Has, &self.data, &self.parse(notation)).unwrap_or(false)
    }

    pub fn set(&mut self, notation: &str, value: impl Into<Value>) -> Result<&mut Self> {
        debug!(notation, "set");
        let path = self.parse(notation);
        self.commit(&Set::new(value.into()), &path)?;
        Ok(self)
    }

    pub fn remove(&mut self, notation: &str) -> Result<&mut Self> {
        debug!(notation, "remove");
        let path = self.parse(notation);
        self.commit(&Remove, &path)?;
        Ok(self)
    }

    /// Deep-merge `value` into the collection at `notation`.
    ///
    /// An absent target starts out empty, whatever the get mode. Arrays on
    /// both sides are concatenated.
    pub fn merge(&mut self, notation: &str, value: Value) -> Result<&mut Self> {
        debug!(notation, "merge");
        if !engine::is_collection(&value) {
            return Err(DotError::SourceNotCollection);
        }
        let path = self.parse(notation);
        let read = Get::new(Value::Object(Map::new()), GetMode::ReturnDefault);
        let target = engine::lookup(&read, &self.data, &path)?;
        if !engine::is_collection(&target) {
            return Err(DotError::TargetNotCollection(notation.to_string()));
        }
        self.commit(&Set::new(deep_merge(target, value)), &path)?;
        Ok(self)
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn with_context(&mut self, ctx: Context) -> &mut Self {
        self.ctx = ctx;
        self
    }

    pub fn delimiter(&self) -> &str {
        &self.ctx.delimiter
    }

    /// Change the notation delimiter (`.` by default).
    pub fn set_delimiter(&mut self, delimiter: impl Into<String>) -> &mut Self {
        self.ctx.delimiter = delimiter.into();
        self
    }

    pub fn wildcard(&self) -> &str {
        &self.ctx.wildcard
    }

    pub fn set_wildcard(&mut self, wildcard: impl Into<String>) -> &mut Self {
        self.ctx.wildcard = wildcard.into();
        self
    }

    pub fn get_mode(&self) -> GetMode {
        self.ctx.get_mode
    }

    pub fn set_get_mode(&mut self, mode: GetMode) -> &mut Self {
        self.ctx.get_mode = mode;
        self
    }

    /// Set the get mode from its name: `default`, `found` or `exception`.
    pub fn set_get_mode_str(&mut self, mode: &str) -> Result<&mut Self> {
        let mode = mode.parse()?;
        Ok(self.set_get_mode(mode))
    }

    fn parse(&self, notation: &str) -> Path {
        self.ctx.parse(notation)
    }

    fn commit<M: Mutation>(&mut self, op: &M, path: &Path) -> Result<()> {
        let mut data = self.data.clone();
        engine::mutate(op, &mut data, path)?;
        self.data = data;
        Ok(())
    }
}

impl Default for PathAccessor {
    fn default() -> Self {
        Self::new(Value::Null)
    }
}

impl From<Value> for PathAccessor {
    fn from(data: Value) -> Self {
        Self::new(data)
    }
}
