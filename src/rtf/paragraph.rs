//! Paragraphs and their inline content.

use std::io::{self, Read, Write};

use super::control::{ControlWord, RtfWriter};
use super::error::RtfResult;
use super::options::WriterOptions;
use super::picture::{ImageFormat, Picture};
use super::text::TextRun;
use super::types::{Alignment, ColorRef, FontRef, Indentation};

/// Elements that can appear in a paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InlineItem {
    Text(TextRun),
    NewLine,
    Picture(Picture),
}

impl InlineItem {
    fn compose<W: Write>(&self, out: &mut RtfWriter<W>, options: &WriterOptions) -> io::Result<()> {
        match self {
            InlineItem::Text(run) => run.compose(out, options),
            InlineItem::NewLine => out.write_control_word(ControlWord::line_break()),
            InlineItem::Picture(picture) => picture.compose(out, options),
        }
    }
}

/// A paragraph: alignment, indentation and an ordered list of inline items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    alignment: Alignment,
    indent: Indentation,
    items: Vec<InlineItem>,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a styled text run. `size` is in half-points.
    pub fn add_text(
        &mut self,
        text: impl Into<String>,
        size: u16,
        font: FontRef,
        color: ColorRef,
    ) -> &mut TextRun {
        self.items
            .push(InlineItem::Text(TextRun::new(text, size, font, color)));
        match self.items.last_mut() {
            Some(InlineItem::Text(run)) => run,
            _ => unreachable!(),
        }
    }

    /// Add a line break inside the paragraph.
    pub fn add_new_line(&mut self) -> &mut Self {
        self.items.push(InlineItem::NewLine);
        self
    }

    /// Add a picture from bytes the caller has already read.
    pub fn add_picture(&mut self, data: Vec<u8>, format: ImageFormat) -> &mut Picture {
        self.push_picture(Picture::new(data, format))
    }

    /// Add a picture read from `reader`.
    ///
    /// On failure the paragraph is left unchanged.
    pub fn add_picture_from_reader<R: Read>(
        &mut self,
        reader: R,
        format: ImageFormat,
    ) -> RtfResult<&mut Picture> {
        let picture = Picture::from_reader(reader, format)?;
        Ok(self.push_picture(picture))
    }

    fn push_picture(&mut self, picture: Picture) -> &mut Picture {
        self.items.push(InlineItem::Picture(picture));
        match self.items.last_mut() {
            Some(InlineItem::Picture(picture)) => picture,
            _ => unreachable!(),
        }
    }

    pub fn set_alignment(&mut self, alignment: Alignment) -> &mut Self {
        self.alignment = alignment;
        self
    }

    /// Set indentation in twips.
    pub fn set_indent(&mut self, first_line: i32, left: i32, right: i32) -> &mut Self {
        self.indent = Indentation {
            left,
            right,
            first_line,
        };
        self
    }

    #[inline]
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    #[inline]
    pub fn indent(&self) -> Indentation {
        self.indent
    }

    #[inline]
    pub fn items(&self) -> &[InlineItem] {
        &self.items
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Concatenated text of all runs; line breaks become `\n`.
    pub fn text(&self) -> String {
        let mut text = String::new();
        for item in &self.items {
            match item {
                InlineItem::Text(run) => text.push_str(run.text()),
                InlineItem::NewLine => text.push('\n'),
                InlineItem::Picture(_) => {},
            }
        }
        text
    }

    /// Top-level paragraph: `{\pard ... \par}`.
    pub(crate) fn compose<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        out.open_group()?;
        self.compose_body(out, options, false)?;
        out.write_control_word(ControlWord::paragraph_end())?;
        out.close_group()
    }

    /// Paragraph properties and items, without the terminating control word.
    pub(crate) fn compose_body<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
        in_table: bool,
    ) -> io::Result<()> {
        out.write_control_word(ControlWord::paragraph_reset())?;
        if in_table {
            out.write_control_word(ControlWord::in_table())?;
        }

        out.write_control_word(match self.alignment {
            Alignment::Left => ControlWord::align_left(),
            Alignment::Center => ControlWord::align_center(),
            Alignment::Right => ControlWord::align_right(),
            Alignment::Justify => ControlWord::align_justify(),
        })?;

        if self.indent.left != 0 {
            out.write_control_word(ControlWord::indent_left(self.indent.left))?;
        }
        if self.indent.right != 0 {
            out.write_control_word(ControlWord::indent_right(self.indent.right))?;
        }
        if self.indent.first_line != 0 {
            out.write_control_word(ControlWord::indent_first_line(self.indent.first_line))?;
        }

        for item in &self.items {
            item.compose(out, options)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(paragraph: &Paragraph) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        paragraph
            .compose(&mut writer, &WriterOptions::default())
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_items_keep_insertion_order() {
        let mut p = Paragraph::new();
        p.add_text("one", 24, 0, 0);
        p.add_new_line();
        p.add_text("two", 24, 0, 0);
        p.set_alignment(Alignment::Justify);

        assert_eq!(render(&p), "{\\pard\\qj{one}\\line{two}\\par}");
        assert_eq!(p.text(), "one\ntwo");
    }

    #[test]
    fn test_only_nonzero_indents_are_written() {
        let mut p = Paragraph::new();
        p.set_indent(40, 0, 0).set_alignment(Alignment::Center);
        p.add_text("x", 24, 0, 0);
        assert_eq!(render(&p), "{\\pard\\qc\\fi40{x}\\par}");

        p.set_indent(-20, 100, 200);
        assert!(render(&p).starts_with("{\\pard\\qc\\li100\\ri200\\fi-20"));
    }

    #[test]
    fn test_in_table_body() {
        let mut p = Paragraph::new();
        p.add_text("cell", 24, 0, 0);
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        p.compose_body(&mut writer, &WriterOptions::default(), true)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\\pard\\intbl\\ql{cell}");
    }

    #[test]
    fn test_failed_picture_leaves_paragraph_unchanged() {
        let mut p = Paragraph::new();
        p.add_text("before", 24, 0, 0);
        assert!(p.add_picture_from_reader(io::empty(), ImageFormat::Png).is_err());
        assert_eq!(p.items().len(), 1);

        let pic = p
            .add_picture_from_reader(&[0xFF, 0xD8, 0xFF][..], ImageFormat::Jpeg)
            .unwrap();
        pic.set_width(100);
        assert_eq!(p.items().len(), 2);
    }
}
