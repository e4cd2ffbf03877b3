//! RTF tables.
//!
//! RTF has no table object: a table is a run of rows, each of which first
//! declares all of its cells (merge state, padding, borders, right edge) and
//! only then lists the cell contents in the same order.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::border::CellBorders;
use super::control::{ControlWord, RtfWriter, Side};
use super::error::{RtfError, RtfResult};
use super::geometry::Margins;
use super::layout::{cell_boundaries, compute_cell_widths};
use super::merge::{MergeTracker, VerticalMerge};
use super::options::WriterOptions;
use super::paragraph::Paragraph;
use super::types::ColorRef;

/// Default row padding on every side, in twips.
pub const DEFAULT_ROW_PADDING: i32 = 100;

/// Horizontal placement of table rows on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum TableAlignment {
    Left,
    #[default]
    Center,
    Right,
}

/// A table in an RTF document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    /// Total width in twips, already clamped to the page content width
    width: i32,
    alignment: TableAlignment,
    /// Row padding (`\trpadd*`)
    margins: Margins,
    /// Color applied to every cell border
    border_color: Option<ColorRef>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Create a new table `width` twips wide.
    pub fn new(width: i32) -> Self {
        Self {
            width,
            alignment: TableAlignment::default(),
            margins: Margins::uniform(DEFAULT_ROW_PADDING),
            border_color: None,
            rows: Vec::new(),
        }
    }

    /// Add a row to the table.
    pub fn add_row(&mut self) -> &mut TableRow {
        self.rows.push(TableRow::default());
        let last = self.rows.len() - 1;
        &mut self.rows[last]
    }

    /// Cell widths for this table's width split by `ratios`.
    pub fn cell_widths_by_ratio(&self, ratios: &[f64]) -> RtfResult<Vec<i32>> {
        compute_cell_widths(self.width, ratios)
    }

    pub fn set_alignment(&mut self, alignment: TableAlignment) -> &mut Self {
        self.alignment = alignment;
        self
    }

    /// Set row padding in twips. Zero sides are not written.
    pub fn set_margins(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> &mut Self {
        self.margins = Margins::new(left, top, right, bottom);
        self
    }

    pub fn set_margin_left(&mut self, twips: i32) -> &mut Self {
        self.margins.left = twips;
        self
    }

    pub fn set_margin_top(&mut self, twips: i32) -> &mut Self {
        self.margins.top = twips;
        self
    }

    pub fn set_margin_right(&mut self, twips: i32) -> &mut Self {
        self.margins.right = twips;
        self
    }

    pub fn set_margin_bottom(&mut self, twips: i32) -> &mut Self {
        self.margins.bottom = twips;
        self
    }

    pub fn set_border_color(&mut self, color: ColorRef) -> &mut Self {
        self.border_color = Some(color);
        self
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn alignment(&self) -> TableAlignment {
        self.alignment
    }

    #[inline]
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Get all rows.
    #[inline]
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Get the number of rows.
    #[inline]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check the row layout, then the vertical merges.
    pub(crate) fn validate(&self, index: usize) -> RtfResult<()> {
        self.validate_layout(index)?;
        self.validate_merges(index)
    }

    /// Check that every row's `\cellx` boundaries increase and fit in an `i32`.
    fn validate_layout(&self, index: usize) -> RtfResult<()> {
        for (row_index, row) in self.rows.iter().enumerate() {
            let mut edge = 0i32;
            for (column, cell) in row.cells.iter().enumerate() {
                if cell.width < 0 {
                    return Err(RtfError::NegativeCellWidth {
                        table: index,
                        row: row_index,
                        column,
                        width: cell.width,
                    });
                }
                edge = edge
                    .checked_add(cell.width)
                    .ok_or(RtfError::RowWidthOverflow {
                        table: index,
                        row: row_index,
                        column,
                    })?;
            }
        }
        Ok(())
    }

    /// Check that every merge continuation lines up with a span above it.
    fn validate_merges(&self, index: usize) -> RtfResult<()> {
        let mut tracker = MergeTracker::new(index);
        for row in &self.rows {
            let states = row.cells.iter().map(|c| c.merge);
            tracker.advance(states.zip(row.boundaries()))?;
        }
        Ok(())
    }

    pub(crate) fn compose<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                out.line_break()?;
            }
            self.compose_row(row, out, options)?;
        }
        Ok(())
    }

    fn compose_row<W: Write>(
        &self,
        row: &TableRow,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        out.open_group()?;
        out.write_control_word(ControlWord::row_defaults())?;
        out.write_control_word(match self.alignment {
            TableAlignment::Left => ControlWord::row_align_left(),
            TableAlignment::Center => ControlWord::row_align_center(),
            TableAlignment::Right => ControlWord::row_align_right(),
        })?;
        for (side, twips) in sides(&self.margins) {
            if twips == 0 {
                continue;
            }
            let padding = match side {
                Side::Left => ControlWord::row_padding_left(twips),
                Side::Top => ControlWord::row_padding_top(twips),
                Side::Right => ControlWord::row_padding_right(twips),
                Side::Bottom => ControlWord::row_padding_bottom(twips),
            };
            out.write_control_words(&[padding, ControlWord::row_padding_units(side)])?;
        }

        // Cell definitions
        for (cell, edge) in row.cells.iter().zip(row.boundaries()) {
            out.line_break()?;
            cell.compose_definition(out, self.border_color, edge)?;
        }

        // Cell contents
        for cell in &row.cells {
            out.line_break()?;
            cell.compose_content(out, options)?;
        }

        out.line_break()?;
        out.write_control_word(ControlWord::row_end())?;
        out.close_group()
    }
}

fn sides(margins: &Margins) -> [(Side, i32); 4] {
    [
        (Side::Left, margins.left),
        (Side::Top, margins.top),
        (Side::Right, margins.right),
        (Side::Bottom, margins.bottom),
    ]
}

/// A table row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableRow {
    cells: Vec<DataCell>,
}

impl TableRow {
    /// Add a cell `width` twips wide.
    pub fn add_cell(&mut self, width: i32) -> &mut DataCell {
        self.cells.push(DataCell::new(width));
        let last = self.cells.len() - 1;
        &mut self.cells[last]
    }

    /// Get all cells.
    #[inline]
    pub fn cells(&self) -> &[DataCell] {
        &self.cells
    }

    /// Get the number of cells.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Right edge of each cell measured from the row's left edge.
    pub fn boundaries(&self) -> SmallVec<[i32; 8]> {
        cell_boundaries(self.cells.iter().map(|c| c.width)).collect()
    }
}

/// A table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCell {
    /// Width in twips
    width: i32,
    /// Cell padding (`\clpad*`)
    margins: Margins,
    borders: CellBorders,
    merge: VerticalMerge,
    content: Vec<Paragraph>,
}

impl DataCell {
    /// Create a cell with borders on every side.
    pub fn new(width: i32) -> Self {
        Self {
            width,
            margins: Margins::default(),
            borders: CellBorders::default(),
            merge: VerticalMerge::None,
            content: Vec::new(),
        }
    }

    /// Start a vertical merge that the cells below may continue.
    pub fn mark_merge_first(&mut self) -> &mut Self {
        self.merge = VerticalMerge::First;
        self
    }

    /// Continue the vertical merge of the cell above (same column index).
    pub fn mark_merge_next(&mut self) -> &mut Self {
        self.merge = VerticalMerge::Continuation;
        self
    }

    pub fn set_borders(&mut self, left: bool, top: bool, right: bool, bottom: bool) -> &mut Self {
        self.borders = CellBorders::from_sides(left, top, right, bottom);
        self
    }

    /// Set cell padding in twips. Zero sides are not written.
    pub fn set_margins(&mut self, left: i32, top: i32, right: i32, bottom: i32) -> &mut Self {
        self.margins = Margins::new(left, top, right, bottom);
        self
    }

    /// Add a paragraph to the cell.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.content.push(Paragraph::new());
        let last = self.content.len() - 1;
        &mut self.content[last]
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn merge(&self) -> VerticalMerge {
        self.merge
    }

    #[inline]
    pub fn borders(&self) -> CellBorders {
        self.borders
    }

    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.content
    }

    fn compose_definition<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        border_color: Option<ColorRef>,
        edge: i32,
    ) -> io::Result<()> {
        if let Some(word) = self.merge.control_word() {
            out.write_control_word(word)?;
        }
        for (side, twips) in sides(&self.margins) {
            if twips != 0 {
                out.write_control_words(&[
                    ControlWord::cell_padding(side, twips),
                    ControlWord::cell_padding_units(side),
                ])?;
            }
        }
        self.borders.compose(out, border_color)?;
        out.write_control_word(ControlWord::cell_boundary(edge))
    }

    fn compose_content<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        if self.content.is_empty() {
            out.write_control_words(&[ControlWord::paragraph_reset(), ControlWord::in_table()])?;
        }
        for (i, paragraph) in self.content.iter().enumerate() {
            if i > 0 {
                out.write_control_word(ControlWord::paragraph_end())?;
            }
            paragraph.compose_body(out, options, true)?;
        }
        out.write_control_word(ControlWord::cell_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(table: &Table) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        table.compose(&mut writer, &WriterOptions::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_single_row_layout() {
        let mut table = Table::new(10000);
        table.set_margins(0, 0, 0, 0);
        let widths = table.cell_widths_by_ratio(&[1.0, 3.0]).unwrap();
        let row = table.add_row();
        row.add_cell(widths[0]).add_paragraph().add_text("a", 24, 0, 0);
        row.add_cell(widths[1]).set_borders(false, false, false, false);

        assert_eq!(
            render(&table),
            "{\\trowd\\trqc\
             \\clbrdrl\\brdrw15\\brdrs\\clbrdrt\\brdrw15\\brdrs\
             \\clbrdrr\\brdrw15\\brdrs\\clbrdrb\\brdrw15\\brdrs\\cellx2500\
             \\cellx10000\
             \\pard\\intbl\\ql{a}\\cell\
             \\pard\\intbl\\cell\
             \\row}"
        );
    }

    #[test]
    fn test_definitions_precede_contents() {
        let mut table = Table::new(6000);
        let row = table.add_row();
        row.add_cell(2000).add_paragraph().add_text("first", 24, 0, 0);
        row.add_cell(4000).add_paragraph().add_text("second", 24, 0, 0);

        let out = render(&table);
        let last_cellx = out.rfind("\\cellx6000").unwrap();
        assert!(out.contains("\\cellx2000"));
        assert!(last_cellx < out.find("first").unwrap());
        assert!(out.find("first").unwrap() < out.find("second").unwrap());
    }

    #[test]
    fn test_row_and_cell_padding() {
        let mut table = Table::new(1000);
        table
            .set_margin_left(50)
            .set_margin_right(50)
            .set_margin_top(0)
            .set_margin_bottom(0)
            .set_alignment(TableAlignment::Right)
            .set_border_color(2);
        table
            .add_row()
            .add_cell(1000)
            .set_margins(30, 0, 0, 0)
            .set_borders(false, true, false, false);

        let out = render(&table);
        assert!(out.starts_with(
            "{\\trowd\\trqr\\trpaddl50\\trpaddfl3\\trpaddr50\\trpaddfr3\
             \\clpadl30\\clpadfl3\\clbrdrt\\brdrw15\\brdrs\\brdrcf2\\cellx1000"
        ));
    }

    #[test]
    fn test_vertical_merge_markers() {
        let mut table = Table::new(10000);
        let row = table.add_row();
        row.add_cell(2500).mark_merge_first().add_paragraph().add_text("tall", 24, 0, 0);
        row.add_cell(7500);
        let row = table.add_row();
        row.add_cell(2500).mark_merge_next();
        row.add_cell(3750);
        row.add_cell(3750);

        assert!(table.validate(0).is_ok());

        let out = render(&table);
        let first = out.find("\\clvmgf").unwrap();
        let next = out.find("\\clvmrg").unwrap();
        assert!(first < next);
        // The continuation still owns a cell slot with an empty paragraph
        assert_eq!(out.matches("\\cell").count() - out.matches("\\cellx").count(), 5);
        assert!(out.contains("\\cellx6250"));
    }

    #[test]
    fn test_misaligned_merge_is_rejected() {
        let mut table = Table::new(10000);
        table.add_row().add_cell(5000).mark_merge_first();
        table.add_row().add_cell(4000).mark_merge_next();
        assert!(matches!(
            table.validate(3),
            Err(RtfError::MergeBoundaryMismatch { table: 3, row: 1, column: 0, .. })
        ));
    }

    #[test]
    fn test_multiple_paragraphs_in_cell() {
        let mut table = Table::new(1000);
        table.set_margins(0, 0, 0, 0);
        let cell = table.add_row().add_cell(1000);
        cell.set_borders(false, false, false, false);
        cell.add_paragraph().add_text("a", 24, 0, 0);
        cell.add_paragraph().add_text("b", 24, 0, 0);

        assert_eq!(
            render(&table),
            "{\\trowd\\trqc\\cellx1000\\pard\\intbl\\ql{a}\\par\\pard\\intbl\\ql{b}\\cell\\row}"
        );
    }

    #[test]
    fn test_negative_width_is_rejected() {
        let mut table = Table::new(5000);
        table.add_row().add_cell(5000);
        let row = table.add_row();
        row.add_cell(3000);
        row.add_cell(-2000);
        assert!(matches!(
            table.validate(1),
            Err(RtfError::NegativeCellWidth { table: 1, row: 1, column: 1, width: -2000 })
        ));
    }

    #[test]
    fn test_zero_width_cell_is_allowed() {
        let mut table = Table::new(5000);
        let row = table.add_row();
        row.add_cell(0);
        row.add_cell(5000);
        assert!(table.validate(0).is_ok());
        assert_eq!(table.rows()[0].boundaries().as_slice(), &[0, 5000]);
    }

    #[test]
    fn test_row_width_overflow_is_rejected() {
        let mut table = Table::new(5000);
        let row = table.add_row();
        row.add_cell(i32::MAX);
        row.add_cell(1);
        assert!(matches!(
            table.validate(0),
            Err(RtfError::RowWidthOverflow { table: 0, row: 0, column: 1 })
        ));
    }
}
