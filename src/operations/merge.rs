use serde_json::Value;

/// Structural deep merge of `source` into `target`.
///
/// Objects merge key by key, recursing where both sides hold a value. Two
/// arrays concatenate, source elements last. Any other pairing takes the
/// source value.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut into), Value::Object(from)) => {
            for (key, incoming) in from {
                match into.get_mut(&key) {
                    Some(slot) => {
                        let current = slot.take();
                        *slot = deep_merge(current, incoming);
                    }
                    None => {
                        into.insert(key, incoming);
                    }
                }
            }
            Value::Object(into)
        }
        (Value::Array(mut into), Value::Array(from)) => {
            into.extend(from);
            Value::Array(into)
        }
        (_, source) => source,
    }
}
