//! Canonicalizer: turns loosely shaped input into a [`Document`].

use serde_json::{Map, Value};

use crate::render::error::RenderError;
use crate::render::escape::value_to_text;
use crate::render::model::{Document, Metadata};
use crate::render::template::DEFAULT_SECTION_ORDER;

/// Normalizes `input` into the canonical `{ metadata, sections }` shape.
///
/// - An object with a `sections` key is taken as already canonical; a missing
///   `metadata.section_order` gets the default order.
/// - Any other object is a bare section map and is wrapped. A `metadata` key
///   inside it is lifted out rather than treated as a section.
/// - Anything that is not an object is rejected.
pub fn canonicalize(input: &Value) -> Result<Document, RenderError> {
    let root = input.as_object().ok_or_else(|| {
        RenderError::InvalidDocument(format!(
            "expected a mapping at the top level, found {}",
            json_kind(input)
        ))
    })?;

    let section_order = section_order(root.get("metadata"))?;

    let sections = match root.get("sections") {
        Some(Value::Object(sections)) => sections.clone(),
        Some(other) => {
            return Err(RenderError::InvalidDocument(format!(
                "'sections' must be a mapping, found {}",
                json_kind(other)
            )))
        }
        None => {
            let mut sections: Map<String, Value> = root.clone();
            sections.remove("metadata");
            sections
        }
    };

    Ok(Document {
        metadata: Metadata { section_order },
        sections,
    })
}

fn section_order(metadata: Option<&Value>) -> Result<Vec<String>, RenderError> {
    let order = match metadata {
        None | Some(Value::Null) => None,
        Some(Value::Object(meta)) => meta.get("section_order"),
        Some(other) => {
            return Err(RenderError::InvalidDocument(format!(
                "'metadata' must be a mapping, found {}",
                json_kind(other)
            )))
        }
    };

    match order {
        None | Some(Value::Null) => Ok(default_section_order()),
        Some(Value::Array(keys)) => keys
            .iter()
            .map(|key| match key {
                Value::Array(_) | Value::Object(_) => Err(RenderError::InvalidDocument(
                    format!("section_order entries must be keys, found {}", json_kind(key)),
                )),
                scalar => Ok(value_to_text(scalar)),
            })
            .collect(),
        Some(other) => Err(RenderError::InvalidDocument(format!(
            "'section_order' must be a list, found {}",
            json_kind(other)
        ))),
    }
}

pub fn default_section_order() -> Vec<String> {
    DEFAULT_SECTION_ORDER.iter().map(|k| k.to_string()).collect()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_canonical_input_passes_through() {
        let input = json!({
            "metadata": { "section_order": ["experience", "education"] },
            "sections": { "experience": { "items": [] } }
        });
        let doc = canonicalize(&input).unwrap();
        assert_eq!(doc.metadata.section_order, vec!["experience", "education"]);
        assert_eq!(doc.sections.len(), 1);
        assert!(doc.sections.contains_key("experience"));
    }

    #[test]
    fn test_canonical_input_without_order_gets_default() {
        let doc = canonicalize(&json!({ "sections": {} })).unwrap();
        assert_eq!(doc.metadata.section_order, default_section_order());
    }

    #[test]
    fn test_bare_map_is_wrapped_with_default_order() {
        let input = json!({
            "header": { "name": "Jane Doe" },
            "skills": { "categories": [] }
        });
        let doc = canonicalize(&input).unwrap();
        assert_eq!(
            doc.metadata.section_order,
            vec!["education", "experience", "projects", "skills", "interests", "certifications"]
        );
        assert!(doc.sections.contains_key("header"));
        assert!(doc.sections.contains_key("skills"));
    }

    #[test]
    fn test_bare_map_metadata_is_lifted_out() {
        let input = json!({
            "metadata": { "section_order": ["skills"] },
            "skills": { "categories": [] }
        });
        let doc = canonicalize(&input).unwrap();
        assert_eq!(doc.metadata.section_order, vec!["skills"]);
        assert!(!doc.sections.contains_key("metadata"));
    }

    #[test]
    fn test_scalar_and_list_roots_are_rejected() {
        for input in [json!("resume"), json!(42), json!(null), json!([{"header": {}}])] {
            let err = canonicalize(&input).unwrap_err();
            assert!(matches!(err, RenderError::InvalidDocument(_)), "{input}");
        }
    }

    #[test]
    fn test_malformed_wrapper_is_rejected() {
        assert!(canonicalize(&json!({ "sections": [] })).is_err());
        assert!(canonicalize(&json!({ "metadata": { "section_order": "skills" } })).is_err());
        assert!(canonicalize(&json!({ "metadata": 3, "sections": {} })).is_err());
    }

    #[test]
    fn test_scalar_order_entries_are_coerced() {
        let doc = canonicalize(&json!({
            "metadata": { "section_order": ["skills", 7] },
            "sections": {}
        }))
        .unwrap();
        assert_eq!(doc.metadata.section_order, vec!["skills", "7"]);
    }
}
