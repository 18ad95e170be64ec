// Resume markup engine: canonicalize → escape/format → per-section render → assemble.
// Pure and synchronous. Compilation and upload live in `compile` and `storage`.

pub mod assembler;
pub mod canonical;
pub mod error;
pub mod escape;
pub mod format;
pub mod handlers;
pub mod kind;
pub mod model;
pub mod renderers;
pub mod template;

// Re-export the public API consumed by handlers and other modules.
pub use assembler::{render_document, RenderReport, SkippedSection};
pub use error::RenderError;
pub use kind::SectionKind;
