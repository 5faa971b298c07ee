// Resume rendering: WinAnsi encoding, Helvetica metrics, line wrapping,
// pagination and PDF serialization.
// Rendering is CPU-bound and must run inside tokio::task::spawn_blocking.

pub mod font_metrics;
pub mod layout;
pub mod pdf;

// Re-export the public API consumed by the generation pipeline.
pub use layout::{default_page_config, PageConfig};
pub use pdf::{render_pdf, RenderError};
