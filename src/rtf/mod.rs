//! RTF (Rich Text Format) composition module.
//!
//! This module builds an in-memory document tree (paragraphs, styled runs,
//! pictures, tables with merged cells) and encodes it as RTF 1.x markup.
//! It only writes RTF; reading existing markup is not supported.
//!
//! # Architecture
//!
//! - **Control**: structured control words and the escaping writer
//! - **Geometry**: named page formats, orientation and margins
//! - **Types**: font and color tables, alignment, indentation
//! - **Paragraph / Text / Picture**: inline content
//! - **Layout / Merge / Table**: cell widths, vertical merges and rows
//! - **Document**: the root that owns everything and produces the bytes
//!
//! # Example
//!
//! ```rust
//! use rtfdoc::rtf::{Color, Document, ImageFormat};
//!
//! let mut doc = Document::new();
//! doc.set_format("A4")?;
//! let font = doc.add_font("Times New Roman");
//! let blue = doc.add_color(Color::new(0, 0, 255));
//!
//! let table = doc.add_table(10000);
//! let widths = table.cell_widths_by_ratio(&[1.0, 3.0])?;
//! let row = table.add_row();
//! row.add_cell(widths[0])
//!     .mark_merge_first()
//!     .add_paragraph()
//!     .add_text("Merged", 24, font, blue);
//! row.add_cell(widths[1]);
//! let row = table.add_row();
//! row.add_cell(widths[0]).mark_merge_next();
//! row.add_cell(widths[1]);
//!
//! let rtf = doc.export()?;
//! assert!(rtf.ends_with(b"}"));
//! # Ok::<(), rtfdoc::rtf::RtfError>(())
//! ```

mod border;
mod control;
mod document;
mod error;
mod geometry;
mod layout;
mod merge;
mod options;
mod paragraph;
mod picture;
mod table;
mod text;
mod types;

// Re-exports
pub use border::{BORDER_WIDTH, CellBorders};
pub use control::{ControlWord, RtfWriter, Side};
pub use document::{Block, DEFAULT_MARGIN, Document};
pub use error::{RtfError, RtfResult};
pub use geometry::{Margins, Orientation, PageFormat, PageSize, resolve_page_size};
pub use layout::{cell_boundaries, compute_cell_widths};
pub use merge::{MergeTracker, VerticalMerge};
pub use options::{DEFAULT_FONT_SIZE, WriterOptions};
pub use paragraph::{InlineItem, Paragraph};
pub use picture::{ImageFormat, Picture};
pub use table::{DEFAULT_ROW_PADDING, DataCell, Table, TableAlignment, TableRow};
pub use text::TextRun;
pub use types::{
    Alignment, Color, ColorRef, ColorTable, Font, FontFamily, FontRef, FontTable, Indentation,
};
