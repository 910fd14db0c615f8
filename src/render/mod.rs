//! Brief document rendering.
//!
//! Rendering is split in two: [`layout::build`] decides *what* appears
//! (pure, unit-tested against [`layout::DocumentTree`]) and [`pdf::render`]
//! decides *where* it is drawn.

pub mod file_name;
pub mod layout;
pub mod pdf;

use chrono::NaiveDate;

use crate::brief::BriefData;
use crate::error::AppError;

pub use file_name::{artifact_file_name, sanitize};
pub use layout::DocumentTree;

/// Render `data` as a one-page A4 PDF. `today` fills the request date when
/// the brief has none and the footer year.
pub fn render_brief(data: &BriefData, today: NaiveDate) -> Result<Vec<u8>, AppError> {
    let tree = layout::build(data, today);
    let bytes = pdf::render(&tree)?;
    tracing::debug!(bytes = bytes.len(), "brief rendered");
    Ok(bytes)
}
