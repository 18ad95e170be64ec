use thiserror::Error;

use crate::render::kind::SectionKind;

/// Whole-document failures. Either one aborts rendering.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The input is not a mapping at the top level, or its canonical wrapper
    /// is the wrong shape.
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// Writing into the output buffer failed.
    #[error("Document assembly failed: {0}")]
    Assembly(#[from] std::fmt::Error),
}

/// A single section's payload could not be decoded. Recovered by the
/// assembler, which omits the section and records it as skipped.
#[derive(Debug, Error)]
#[error("Section '{}' could not be rendered: {source}", .section.key())]
pub struct SectionRenderError {
    pub section: SectionKind,
    pub source: serde_json::Error,
}
