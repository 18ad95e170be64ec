//! Document assembler: preamble, header, ordered sections, closing marker.
//!
//! Section failures are isolated here: a section whose payload cannot be
//! decoded is logged, omitted, and reported in [`RenderReport::skipped`].
//! Nothing else in the render pipeline logs.

use std::collections::HashSet;
use std::fmt::Write;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::render::canonical::canonicalize;
use crate::render::error::RenderError;
use crate::render::kind::SectionKind;
use crate::render::model::Document;
use crate::render::renderers::render_section;
use crate::render::template::{CLOSING, PREAMBLE};

/// The rendered markup plus an account of every section that did not make it
/// into the output.
#[derive(Debug, Clone, Serialize)]
pub struct RenderReport {
    pub latex: String,
    /// Sections that produced output, in emission order.
    pub rendered: Vec<SectionKind>,
    pub skipped: Vec<SkippedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedSection {
    /// The key as it appeared in the input.
    pub key: String,
    #[serde(flatten)]
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum SkipReason {
    /// Not a known section kind.
    UnknownKey,
    /// Listed in the order but absent from `sections`.
    Missing,
    /// Present but rendered to nothing.
    Empty,
    /// Listed more than once; only the first occurrence renders.
    Duplicate,
    /// The payload could not be decoded.
    Malformed { error: String },
}

/// Canonicalizes arbitrary input and assembles it into a full document.
pub fn render_document(input: &Value) -> Result<RenderReport, RenderError> {
    let document = canonicalize(input)?;
    assemble(&document)
}

/// Assembles a canonical document.
///
/// `header` renders first whenever it is present, whether or not it is listed
/// in `section_order`. Every other section renders in listed order, at most
/// once.
pub fn assemble(document: &Document) -> Result<RenderReport, RenderError> {
    let mut assembly = Assembly {
        latex: String::with_capacity(PREAMBLE.len() + 4096),
        rendered: Vec::new(),
        skipped: Vec::new(),
    };
    assembly.latex.push_str(PREAMBLE);

    let header = SectionKind::Header;
    if let Some(payload) = document.sections.get(header.key()) {
        assembly.emit(header, header.key(), payload)?;
    }

    let mut seen = HashSet::new();
    for key in &document.metadata.section_order {
        let Some(kind) = SectionKind::from_key(key) else {
            debug!("Skipping unknown section key '{}'", key);
            assembly.skip(key, SkipReason::UnknownKey);
            continue;
        };
        if kind == SectionKind::Header {
            continue;
        }
        if !seen.insert(kind) {
            assembly.skip(key, SkipReason::Duplicate);
            continue;
        }

        let payload = document
            .sections
            .get(kind.key())
            .or_else(|| document.sections.get(key.as_str()));
        match payload {
            Some(payload) => assembly.emit(kind, key, payload)?,
            None => assembly.skip(key, SkipReason::Missing),
        }
    }

    assembly.latex.push_str(CLOSING);

    debug!(
        "Assembled document: {} sections rendered, {} skipped",
        assembly.rendered.len(),
        assembly.skipped.len()
    );

    Ok(RenderReport {
        latex: assembly.latex,
        rendered: assembly.rendered,
        skipped: assembly.skipped,
    })
}

struct Assembly {
    latex: String,
    rendered: Vec<SectionKind>,
    skipped: Vec<SkippedSection>,
}

impl Assembly {
    fn emit(&mut self, kind: SectionKind, key: &str, payload: &Value) -> Result<(), RenderError> {
        match render_section(kind, payload) {
            Ok(fragment) if fragment.trim().is_empty() => {
                self.skip(key, SkipReason::Empty);
            }
            Ok(fragment) => {
                writeln!(self.latex, "{fragment}")?;
                self.rendered.push(kind);
            }
            Err(e) => {
                warn!("Omitting section '{}': {}", key, e);
                self.skip(
                    key,
                    SkipReason::Malformed {
                        error: e.source.to_string(),
                    },
                );
            }
        }
        Ok(())
    }

    fn skip(&mut self, key: &str, reason: SkipReason) {
        self.skipped.push(SkippedSection {
            key: key.to_string(),
            reason,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn jane_doe() -> Value {
        json!({
            "metadata": { "section_order": ["experience"] },
            "sections": {
                "header": {
                    "name": "Jane Doe",
                    "contact": { "email": { "value": "j@x.com" } }
                },
                "experience": {
                    "items": [{
                        "company": "Acme",
                        "title": "Engineer",
                        "dates": { "start": "Jan 2020", "end": "", "is_current": true },
                        "achievements": ["Shipped feature A", "Reduced latency by 30%"]
                    }]
                }
            }
        })
    }

    #[test]
    fn test_end_to_end_scenario() {
        let report = render_document(&jane_doe()).unwrap();
        let latex = &report.latex;

        assert!(latex.starts_with(PREAMBLE));
        assert!(latex.ends_with(CLOSING));
        assert!(latex.contains("Jane Doe"));
        assert!(latex.contains("\\href{mailto:j@x.com}{j@x.com}"));
        assert!(latex.contains("Acme"));
        assert!(latex.contains("Jan 2020 -- Present"));
        assert_eq!(latex.matches("\\item{} ").count(), 2);
        assert!(latex.contains("\\item{} Shipped feature A"));
        assert!(latex.contains("\\item{} Reduced latency by 30\\%"));
        assert_eq!(
            report.rendered,
            vec![SectionKind::Header, SectionKind::Experience]
        );
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn test_sections_follow_listed_order_after_header() {
        let input = json!({
            "metadata": { "section_order": ["education", "experience"] },
            "sections": {
                "experience": { "items": [{ "company": "Acme" }] },
                "education": { "items": [{ "institution": "MIT" }] },
                "header": { "name": "Jane Doe" }
            }
        });
        let latex = render_document(&input).unwrap().latex;

        let header = latex.find("Jane Doe").unwrap();
        let education = latex.find("\\section*{Education}").unwrap();
        let experience = latex.find("\\section*{Experience}").unwrap();
        assert!(header < education);
        assert!(education < experience);
    }

    #[test]
    fn test_reversed_order_reverses_output() {
        let input = json!({
            "metadata": { "section_order": ["experience", "education"] },
            "sections": {
                "experience": { "items": [{ "company": "Acme" }] },
                "education": { "items": [{ "institution": "MIT" }] }
            }
        });
        let latex = render_document(&input).unwrap().latex;
        assert!(latex.find("\\section*{Experience}") < latex.find("\\section*{Education}"));
    }

    #[test]
    fn test_unknown_key_contributes_nothing() {
        let input = json!({
            "metadata": { "section_order": ["hobbies", "experience"] },
            "sections": {
                "hobbies": { "items": [{ "title": "Chess" }] },
                "experience": { "items": [{ "company": "Acme" }] }
            }
        });
        let report = render_document(&input).unwrap();
        assert!(!report.latex.contains("Chess"));
        assert!(!report.latex.contains("Hobbies"));
        assert!(report.latex.contains("Acme"));
        assert_eq!(
            report.skipped,
            vec![SkippedSection {
                key: "hobbies".to_string(),
                reason: SkipReason::UnknownKey,
            }]
        );
    }

    #[test]
    fn test_unlisted_sections_are_not_rendered() {
        let input = json!({
            "metadata": { "section_order": ["experience"] },
            "sections": {
                "experience": { "items": [{ "company": "Acme" }] },
                "education": { "items": [{ "institution": "MIT" }] }
            }
        });
        let latex = render_document(&input).unwrap().latex;
        assert!(!latex.contains("MIT"));
    }

    #[test]
    fn test_empty_section_title_is_hidden() {
        let input = json!({
            "metadata": { "section_order": ["education", "experience"] },
            "sections": {
                "education": { "section_title": "Schooling", "items": [] },
                "experience": { "items": [{ "company": "Acme" }] }
            }
        });
        let report = render_document(&input).unwrap();
        assert!(!report.latex.contains("Schooling"));
        assert!(!report.latex.contains("\\section*{Education}"));
        assert!(report.skipped.contains(&SkippedSection {
            key: "education".to_string(),
            reason: SkipReason::Empty,
        }));
    }

    #[test]
    fn test_malformed_section_is_isolated_and_reported() {
        let input = json!({
            "metadata": { "section_order": ["skills", "experience"] },
            "sections": {
                "skills": { "categories": "Rust, Go" },
                "experience": { "items": [{ "company": "Acme" }] }
            }
        });
        let report = render_document(&input).unwrap();
        assert!(report.latex.contains("Acme"));
        assert!(!report.latex.contains("\\section*{Skills}"));
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].key, "skills");
        assert!(matches!(report.skipped[0].reason, SkipReason::Malformed { .. }));
    }

    #[test]
    fn test_header_listed_in_order_renders_once_and_first() {
        let input = json!({
            "metadata": { "section_order": ["experience", "header"] },
            "sections": {
                "header": { "name": "Jane Doe" },
                "experience": { "items": [{ "company": "Acme" }] }
            }
        });
        let report = render_document(&input).unwrap();
        assert_eq!(report.latex.matches("Jane Doe").count(), 1);
        assert!(report.latex.find("Jane Doe") < report.latex.find("Acme"));
        assert_eq!(report.rendered[0], SectionKind::Header);
    }

    #[test]
    fn test_duplicate_and_missing_keys_are_reported() {
        let input = json!({
            "metadata": { "section_order": ["experience", "Experience", "projects"] },
            "sections": { "experience": { "items": [{ "company": "Acme" }] } }
        });
        let report = render_document(&input).unwrap();
        assert_eq!(report.latex.matches("Acme").count(), 1);
        assert_eq!(
            report.skipped,
            vec![
                SkippedSection {
                    key: "Experience".to_string(),
                    reason: SkipReason::Duplicate,
                },
                SkippedSection {
                    key: "projects".to_string(),
                    reason: SkipReason::Missing,
                },
            ]
        );
    }

    #[test]
    fn test_bare_map_uses_default_order() {
        let input = json!({
            "skills": { "categories": [{ "name": "Languages", "items": ["Rust"] }] },
            "education": { "items": [{ "institution": "MIT" }] },
            "summary": "Not in the default order"
        });
        let report = render_document(&input).unwrap();
        assert_eq!(
            report.rendered,
            vec![SectionKind::Education, SectionKind::Skills]
        );
        assert!(!report.latex.contains("Not in the default order"));
    }

    #[test]
    fn test_invalid_document_is_fatal() {
        assert!(matches!(
            render_document(&json!(["header"])),
            Err(RenderError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_empty_document_is_still_well_formed() {
        let latex = render_document(&json!({})).unwrap().latex;
        assert_eq!(latex, format!("{PREAMBLE}{CLOSING}"));
    }

    #[test]
    fn test_renders_concurrently() {
        let input = jane_doe();
        let expected = render_document(&input).unwrap().latex;
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let input = input.clone();
                std::thread::spawn(move || render_document(&input).unwrap().latex)
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_skip_reason_serializes_flat() {
        let skipped = SkippedSection {
            key: "skills".to_string(),
            reason: SkipReason::Malformed {
                error: "bad".to_string(),
            },
        };
        assert_eq!(
            serde_json::to_value(&skipped).unwrap(),
            json!({ "key": "skills", "reason": "malformed", "error": "bad" })
        );
    }
}
