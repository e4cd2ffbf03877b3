//! rtfdoc - A Rust library for composing RTF documents
//!
//! This library builds a structured document in memory and encodes it as
//! Rich Text Format markup readable by common word processors.
//!
//! # Features
//!
//! - **Styled text**: font, size, color, bold and italic runs with full
//!   Unicode support through `\u` escapes
//! - **Page geometry**: named paper formats (A0-A6, Letter, Legal),
//!   orientation and margins
//! - **Tables**: ratio-based cell widths, borders, padding and vertical merges
//! - **Pictures**: embedded JPEG and PNG images with optional display size
//!
//! # Example
//!
//! ```rust
//! use rtfdoc::rtf::{Alignment, Color, Document, Orientation};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut doc = Document::new();
//! doc.set_orientation(Orientation::Landscape).set_format("A4")?;
//!
//! let arial = doc.add_font("Arial");
//! let red = doc.add_color(Color::new(255, 0, 0));
//!
//! let p = doc.add_paragraph();
//! p.set_alignment(Alignment::Justify);
//! p.add_text("Red bold text", 32, arial, red).set_bold();
//! p.add_new_line();
//! p.add_text("Кириллица", 32, arial, red).set_italic();
//!
//! let rtf = doc.export()?;
//! assert!(rtf.is_ascii());
//! # Ok(())
//! # }
//! ```

/// Shared helpers such as unit conversion.
pub mod common;

/// RTF document model and composer.
///
/// See [`rtf::Document`] for the entry point.
pub mod rtf;

// Re-export commonly used types for convenience
pub use rtf::{Document, RtfError, RtfResult};
