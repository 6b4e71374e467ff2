use serde_json::Value;

/// Returns true if `document` contains `query`, following PostgreSQL's
/// `jsonb @> jsonb` rules.
///
/// Objects match when every key of `query` is present in `document` with a
/// contained value; arrays match when every element of `query` is contained
/// in some element of `document`; scalars must be equal. As in PostgreSQL, a
/// top-level array also contains a bare scalar equal to one of its elements.
pub fn contains(document: &Value, query: &Value) -> bool {
    match (document, query) {
        (Value::Object(doc), Value::Object(q)) => q
            .iter()
            .all(|(key, expected)| doc.get(key).is_some_and(|actual| contains(actual, expected))),
        (Value::Array(doc), Value::Array(q)) => q
            .iter()
            .all(|expected| doc.iter().any(|actual| contains(actual, expected))),
        (Value::Array(doc), scalar) if !scalar.is_object() => {
            doc.iter().any(|actual| actual == scalar)
        }
        (doc, q) => doc == q,
    }
}
