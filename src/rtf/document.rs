//! RTF document builder and composer.

use std::borrow::Cow;
use std::io::Write;

use super::control::{ControlWord, RtfWriter};
use super::error::RtfResult;
use super::geometry::{Margins, Orientation, PageFormat, PageSize};
use super::options::WriterOptions;
use super::paragraph::Paragraph;
use super::table::Table;
use super::types::{Color, ColorRef, ColorTable, FontRef, FontTable};

/// Default page margin on every side, in twips (0.5 inch).
pub const DEFAULT_MARGIN: i32 = 720;

/// Top-level content block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

/// RTF Document.
///
/// The document exclusively owns its style tables and content blocks. Blocks
/// can only be appended; [`Document::export`] is a read-only traversal and
/// may be called any number of times.
///
/// # Examples
///
/// ```rust
/// use rtfdoc::rtf::{Alignment, Color, Document, Orientation};
///
/// let mut doc = Document::new();
/// doc.set_orientation(Orientation::Landscape);
/// let arial = doc.add_font("Arial");
/// let green = doc.add_color(Color::new(0, 128, 0));
///
/// doc.add_paragraph()
///     .set_alignment(Alignment::Center)
///     .add_text("Hello", 48, arial, green)
///     .set_bold();
///
/// let bytes = doc.export()?;
/// assert!(bytes.starts_with(b"{\\rtf1"));
/// # Ok::<(), rtfdoc::rtf::RtfError>(())
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    options: WriterOptions,
    orientation: Orientation,
    format: PageFormat,
    /// Derived from `format` and `orientation`
    page_size: PageSize,
    margins: Margins,
    font_table: FontTable,
    color_table: ColorTable,
    blocks: Vec<Block>,
}

impl Document {
    /// Create an A4 portrait document with 720-twip margins.
    pub fn new() -> Self {
        Self::with_options(WriterOptions::default())
    }

    pub fn with_options(options: WriterOptions) -> Self {
        let format = PageFormat::A4;
        let orientation = Orientation::Portrait;
        Self {
            options,
            orientation,
            format,
            page_size: format.size(orientation),
            margins: Margins::uniform(DEFAULT_MARGIN),
            font_table: FontTable::new(),
            color_table: ColorTable::new(),
            blocks: Vec::new(),
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> &mut Self {
        self.orientation = orientation;
        self.page_size = self.format.size(orientation);
        self
    }

    /// Set the page format by name (`"A4"`, `"letter"`, ...).
    ///
    /// An unknown name is reported and leaves the current geometry untouched.
    pub fn set_format(&mut self, name: &str) -> RtfResult<&mut Self> {
        let format = PageFormat::from_name(name)?;
        Ok(self.set_page_format(format))
    }

    pub fn set_page_format(&mut self, format: PageFormat) -> &mut Self {
        self.format = format;
        self.page_size = format.size(self.orientation);
        self
    }

    /// Set page margins in twips. All-zero margins are omitted from the output.
    pub fn set_margins(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> &mut Self {
        self.margins = Margins::new(left, top, right, bottom);
        self
    }

    #[inline]
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    #[inline]
    pub fn page_format(&self) -> PageFormat {
        self.format
    }

    #[inline]
    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    #[inline]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    #[inline]
    pub fn options(&self) -> &WriterOptions {
        &self.options
    }

    /// Page width minus the left and right margins, never negative.
    pub fn max_content_width(&self) -> i32 {
        (self.page_size.width - self.margins.left - self.margins.right).max(0)
    }

    /// Register a font and return its index.
    pub fn add_font(&mut self, name: impl Into<Cow<'static, str>>) -> FontRef {
        self.font_table.add(name)
    }

    /// Register a color and return its index. Index 0 is always black.
    pub fn add_color(&mut self, color: Color) -> ColorRef {
        self.color_table.add(color)
    }

    #[inline]
    pub fn font_table(&self) -> &FontTable {
        &self.font_table
    }

    #[inline]
    pub fn font_table_mut(&mut self) -> &mut FontTable {
        &mut self.font_table
    }

    #[inline]
    pub fn color_table(&self) -> &ColorTable {
        &self.color_table
    }

    #[inline]
    pub fn color_table_mut(&mut self) -> &mut ColorTable {
        &mut self.color_table
    }

    /// Append a paragraph to the document body.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.blocks.push(Block::Paragraph(Paragraph::new()));
        match self.blocks.last_mut() {
            Some(Block::Paragraph(p)) => p,
            _ => unreachable!(),
        }
    }

    /// Append a table. `width` is clamped to [`Document::max_content_width`].
    pub fn add_table(&mut self, width: i32) -> &mut Table {
        let max = self.max_content_width();
        if width > max {
            log::trace!("table width {width} clamped to content width {max}");
        }
        self.blocks.push(Block::Table(Table::new(width.min(max))));
        match self.blocks.last_mut() {
            Some(Block::Table(t)) => t,
            _ => unreachable!(),
        }
    }

    /// Split `table_width` (clamped to the content width) by `ratios`.
    pub fn cell_widths_by_ratio(&self, table_width: i32, ratios: &[f64]) -> RtfResult<Vec<i32>> {
        super::layout::compute_cell_widths(table_width.min(self.max_content_width()), ratios)
    }

    /// Get all top-level blocks in insertion order.
    #[inline]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Check table invariants that the builder cannot enforce: cell widths are
    /// non-negative, row boundaries fit in an `i32`, and merges line up.
    pub fn validate(&self) -> RtfResult<()> {
        let tables = self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            Block::Paragraph(_) => None,
        });
        for (index, table) in tables.enumerate() {
            if let Err(e) = table.validate(index) {
                log::warn!("refusing to compose document: {e}");
                return Err(e);
            }
        }
        Ok(())
    }

    /// Validate and stream the document to `writer`.
    ///
    /// Nothing is written when validation fails.
    pub fn write_to<W: Write>(&self, writer: W) -> RtfResult<()> {
        self.validate()?;
        let mut out = RtfWriter::new(writer, self.options.pretty);
        self.compose(&mut out)?;
        out.flush()?;
        Ok(())
    }

    /// Compose the document into a byte buffer.
    pub fn export(&self) -> RtfResult<Vec<u8>> {
        let mut buffer = Vec::new();
        self.write_to(&mut buffer)?;
        log::debug!(
            "exported {} blocks as {} bytes",
            self.blocks.len(),
            buffer.len()
        );
        Ok(buffer)
    }

    fn compose<W: Write>(&self, out: &mut RtfWriter<W>) -> std::io::Result<()> {
        out.open_group()?;
        self.compose_header(out)?;

        if self.orientation == Orientation::Landscape {
            out.line_break()?;
            out.write_control_word(ControlWord::landscape())?;
        }

        out.line_break()?;
        out.write_control_words(&[
            ControlWord::paper_width(self.page_size.width),
            ControlWord::paper_height(self.page_size.height),
        ])?;

        if !self.margins.is_zero() {
            out.line_break()?;
            out.write_control_words(&[
                ControlWord::margin_left(self.margins.left),
                ControlWord::margin_right(self.margins.right),
                ControlWord::margin_top(self.margins.top),
                ControlWord::margin_bottom(self.margins.bottom),
            ])?;
        }

        for block in &self.blocks {
            out.line_break()?;
            match block {
                Block::Paragraph(p) => p.compose(out, &self.options)?,
                Block::Table(t) => t.compose(out, &self.options)?,
            }
        }

        out.line_break()?;
        out.close_group()
    }

    fn compose_header<W: Write>(&self, out: &mut RtfWriter<W>) -> std::io::Result<()> {
        out.write_control_words(&[
            ControlWord::rtf(1),
            ControlWord::ansi(),
            ControlWord::ansi_code_page(self.options.code_page),
            ControlWord::default_font(self.options.default_font),
            ControlWord::default_tab(self.options.default_tab_width),
        ])?;

        if !self.font_table.is_empty() {
            out.line_break()?;
            out.open_group()?;
            out.write_control_word(ControlWord::font_table())?;
            for (idx, font) in self.font_table.fonts().iter().enumerate() {
                out.open_group()?;
                out.write_control_word(ControlWord::font(idx as FontRef))?;
                out.write_control_word(ControlWord::font_family(font.family))?;
                if font.charset != 0 {
                    out.write_control_word(ControlWord::font_charset(font.charset))?;
                }
                // `;` terminates the entry
                if font.name.contains(';') {
                    out.write_text(&font.name.replace(';', ""))?;
                } else {
                    out.write_text(&font.name)?;
                }
                out.write_list_terminator()?;
                out.close_group()?;
            }
            out.close_group()?;
        }

        out.line_break()?;
        out.open_group()?;
        out.write_control_word(ControlWord::color_table())?;
        for color in self.color_table.colors() {
            out.write_control_words(&[
                ControlWord::red(color.red),
                ControlWord::green(color.green),
                ControlWord::blue(color.blue),
            ])?;
            out.write_list_terminator()?;
        }
        out.close_group()?;

        out.line_break()?;
        out.write_control_words(&[ControlWord::view_kind(4), ControlWord::unicode_skip(1)])
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
