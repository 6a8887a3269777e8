use serde_json::{Map, Value};
use tracing::trace;

use crate::errors::{DotError, Result};
use crate::parser::{Path, Segment};

/// =========================
/// Container helpers
/// =========================

/// Objects and arrays can be descended into; everything else is a leaf.
pub fn is_collection(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Array(_))
}

/// Array positions only match their canonical decimal form ("01" is not 1).
fn index_of(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|i| i.to_string() == key)
}

/// Keys of a collection in iteration order; empty for leaves.
pub fn keys(value: &Value) -> Vec<String> {
    match value {
        Value::Object(map) => map.keys().cloned().collect(),
        Value::Array(items) => (0..items.len()).map(|i| i.to_string()).collect(),
        _ => Vec::new(),
    }
}

pub fn child<'a>(value: &'a Value, key: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(key),
        Value::Array(items) => index_of(key).and_then(|i| items.get(i)),
        _ => None,
    }
}

pub fn child_mut<'a>(value: &'a mut Value, key: &str) -> Option<&'a mut Value> {
    match value {
        Value::Object(map) => map.get_mut(key),
        Value::Array(items) => index_of(key).and_then(move |i| items.get_mut(i)),
        _ => None,
    }
}

/// Assign `key` in a collection.
///
/// Arrays take an existing index or the next free one; any other key turns the
/// array into an object keyed by position first. Leaves cannot hold keys.
pub fn insert(target: &mut Value, key: &str, value: Value) -> Result<()> {
    if let Value::Array(items) = target {
        match index_of(key) {
            Some(i) if i < items.len() => {
                items[i] = value;
                return Ok(());
            }
            Some(i) if i == items.len() => {
                items.push(value);
                return Ok(());
            }
            _ => {
                let items = std::mem::take(items);
                *target = Value::Object(promote(items));
            }
        }
    }
    match target {
        Value::Object(map) => {
            map.insert(key.to_string(), value);
            Ok(())
        }
        _ => Err(DotError::PathNotTraversable(key.to_string())),
    }
}

fn promote(items: Vec<Value>) -> Map<String, Value> {
    items
        .into_iter()
        .enumerate()
        .map(|(i, v)| (i.to_string(), v))
        .collect()
}

/// Delete `key` from a collection, returning what was there.
/// Array removal closes the gap.
pub fn remove_key(target: &mut Value, key: &str) -> Option<Value> {
    match target {
        Value::Object(map) => map.shift_remove(key),
        Value::Array(items) => index_of(key)
            .filter(|i| *i < items.len())
            .map(|i| items.remove(i)),
        _ => None,
    }
}

/// =========================
/// Wildcard fan-out
/// =========================

/// One wildcard level: the keys present there plus the segments around the
/// wildcard, so an operation can name any branch it gives up on.
pub struct FanOut<'p> {
    keys: Vec<String>,
    prefix: &'p [Segment],
    tail: &'p [Segment],
    path: &'p Path,
}

impl<'p> FanOut<'p> {
    fn new(value: &Value, tail: &'p [Segment], path: &'p Path) -> Self {
        let keys = keys(value);
        let all = path.segments();
        let prefix = &all[..all.len() - tail.len() - 1];
        trace!(path = %path, branches = keys.len(), "wildcard fan-out");
        Self { keys, prefix, tail, path }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Notation of the branch through `key`, e.g. `users.3.email`.
    pub fn notation_for(&self, key: &str) -> String {
        self.path.render_branch(self.prefix, key, self.tail)
    }

    /// Notation of the level itself, e.g. `users.*.email`.
    pub fn notation(&self) -> String {
        self.path.render_branch(self.prefix, self.path.text(&Segment::Wildcard), self.tail)
    }
}

/// =========================
/// Read traversal
/// =========================

/// Leaf behavior of a read-only operation.
pub trait Lookup {
    type Output;

    /// The final segment resolved to `value`.
    fn found(&self, value: &Value) -> Result<Self::Output>;

    /// `key` is absent, or the value it had to be looked up in is a leaf.
    fn missing(&self, key: &str) -> Result<Self::Output>;

    /// Combine the branches of a wildcard level. `branch` resolves the rest of
    /// the path through one key.
    fn fan_out(
        &self,
        level: &FanOut<'_>,
        branch: &mut dyn FnMut(&str) -> Result<Self::Output>,
    ) -> Result<Self::Output>;
}

pub fn lookup<L: Lookup>(op: &L, data: &Value, path: &Path) -> Result<L::Output> {
    descend(op, data, path, path.segments())
}

fn descend<L: Lookup>(op: &L, data: &Value, path: &Path, segments: &[Segment]) -> Result<L::Output> {
    let Some((head, tail)) = segments.split_first() else {
        return op.found(data);
    };
    if *head == Segment::Wildcard && is_collection(data) {
        let level = FanOut::new(data, tail, path);
        return op.fan_out(&level, &mut |key: &str| resolve(op, data, key, tail, path));
    }
    resolve(op, data, path.text(head), tail, path)
}

fn resolve<L: Lookup>(op: &L, data: &Value, key: &str, tail: &[Segment], path: &Path) -> Result<L::Output> {
    match child(data, key) {
        Some(value) if tail.is_empty() => op.found(value),
        Some(value) => descend(op, value, path, tail),
        None => op.missing(key),
    }
}

/// =========================
/// Write traversal
/// =========================

/// Leaf behavior of a mutating operation.
pub trait Mutation {
    /// The final segment names `key` inside `target`.
    fn terminal(&self, target: &mut Value, key: &str) -> Result<()>;

    /// A non-final `key` is absent from `target`. Returning `Ok` means the
    /// operation created it and descent continues.
    fn absent(&self, target: &mut Value, key: &str) -> Result<()>;

    fn fan_out(&self, level: &FanOut<'_>, branch: &mut dyn FnMut(&str) -> Result<()>) -> Result<()>;

    /// Whether a wildcard in final position fans out. When it does not, the
    /// wildcard token is applied as a literal key.
    fn expands_trailing_wildcard(&self) -> bool {
        true
    }
}

pub fn mutate<M: Mutation>(op: &M, data: &mut Value, path: &Path) -> Result<()> {
    descend_mut(op, data, path, path.segments())
}

fn descend_mut<M: Mutation>(op: &M, target: &mut Value, path: &Path, segments: &[Segment]) -> Result<()> {
    let Some((head, tail)) = segments.split_first() else {
        return Ok(());
    };
    match head {
        Segment::Wildcard if !tail.is_empty() || op.expands_trailing_wildcard() => {
            let level = FanOut::new(target, tail, path);
            op.fan_out(&level, &mut |key: &str| apply(op, target, key, tail, path))
        }
        _ => apply(op, target, path.text(head), tail, path),
    }
}

fn apply<M: Mutation>(op: &M, target: &mut Value, key: &str, tail: &[Segment], path: &Path) -> Result<()> {
    if tail.is_empty() {
        return op.terminal(target, key);
    }
    if child(target, key).is_none() {
        op.absent(target, key)?;
    }
    match child_mut(target, key) {
        Some(next) if is_collection(next) => descend_mut(op, next, path, tail),
        Some(_) => Err(DotError::PathNotTraversable(key.to_string())),
        None => Err(DotError::PathNotFound(key.to_string())),
    }
}
