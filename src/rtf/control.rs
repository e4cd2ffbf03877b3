//! Low-level RTF emission.
//!
//! [`ControlWord`] values can only be built through the named constructors
//! below, so every control word that reaches the output has a letters-only
//! name. [`RtfWriter`] owns the delimiter rule: a control word followed by
//! literal text gets exactly one separating space, and nothing else.

use std::io::{self, Write};

use memchr::memchr3;

use super::types::{ColorRef, FontFamily, FontRef};

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// A single RTF control word with an optional numeric parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlWord {
    name: &'static str,
    param: Option<i32>,
}

impl ControlWord {
    #[inline]
    const fn flag(name: &'static str) -> Self {
        Self { name, param: None }
    }

    #[inline]
    const fn value(name: &'static str, param: i32) -> Self {
        Self {
            name,
            param: Some(param),
        }
    }

    /// Control word name without the leading backslash.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn param(&self) -> Option<i32> {
        self.param
    }

    // Document header

    pub const fn rtf(version: i32) -> Self {
        Self::value("rtf", version)
    }
    pub const fn ansi() -> Self {
        Self::flag("ansi")
    }
    pub const fn ansi_code_page(code_page: u16) -> Self {
        Self::value("ansicpg", code_page as i32)
    }
    pub const fn default_font(font: FontRef) -> Self {
        Self::value("deff", font as i32)
    }
    pub const fn default_tab(twips: i32) -> Self {
        Self::value("deftab", twips)
    }
    pub const fn unicode_skip(count: i32) -> Self {
        Self::value("uc", count)
    }
    pub const fn view_kind(kind: i32) -> Self {
        Self::value("viewkind", kind)
    }

    // Style tables

    pub const fn font_table() -> Self {
        Self::flag("fonttbl")
    }
    pub const fn color_table() -> Self {
        Self::flag("colortbl")
    }
    pub const fn font_family(family: FontFamily) -> Self {
        match family {
            FontFamily::Nil => Self::flag("fnil"),
            FontFamily::Roman => Self::flag("froman"),
            FontFamily::Swiss => Self::flag("fswiss"),
            FontFamily::Modern => Self::flag("fmodern"),
            FontFamily::Script => Self::flag("fscript"),
            FontFamily::Decor => Self::flag("fdecor"),
            FontFamily::Tech => Self::flag("ftech"),
        }
    }
    pub const fn font_charset(charset: u8) -> Self {
        Self::value("fcharset", charset as i32)
    }
    pub const fn red(v: u8) -> Self {
        Self::value("red", v as i32)
    }
    pub const fn green(v: u8) -> Self {
        Self::value("green", v as i32)
    }
    pub const fn blue(v: u8) -> Self {
        Self::value("blue", v as i32)
    }

    // Page geometry

    pub const fn landscape() -> Self {
        Self::flag("landscape")
    }
    pub const fn paper_width(twips: i32) -> Self {
        Self::value("paperw", twips)
    }
    pub const fn paper_height(twips: i32) -> Self {
        Self::value("paperh", twips)
    }
    pub const fn margin_left(twips: i32) -> Self {
        Self::value("margl", twips)
    }
    pub const fn margin_right(twips: i32) -> Self {
        Self::value("margr", twips)
    }
    pub const fn margin_top(twips: i32) -> Self {
        Self::value("margt", twips)
    }
    pub const fn margin_bottom(twips: i32) -> Self {
        Self::value("margb", twips)
    }

    // Character formatting

    pub const fn font(font: FontRef) -> Self {
        Self::value("f", font as i32)
    }
    pub const fn font_size(half_points: u16) -> Self {
        Self::value("fs", half_points as i32)
    }
    pub const fn color(color: ColorRef) -> Self {
        Self::value("cf", color as i32)
    }
    pub const fn bold() -> Self {
        Self::flag("b")
    }
    pub const fn italic() -> Self {
        Self::flag("i")
    }

    // Paragraph formatting

    pub const fn paragraph_reset() -> Self {
        Self::flag("pard")
    }
    pub const fn paragraph_end() -> Self {
        Self::flag("par")
    }
    pub const fn in_table() -> Self {
        Self::flag("intbl")
    }
    pub const fn align_left() -> Self {
        Self::flag("ql")
    }
    pub const fn align_center() -> Self {
        Self::flag("qc")
    }
    pub const fn align_right() -> Self {
        Self::flag("qr")
    }
    pub const fn align_justify() -> Self {
        Self::flag("qj")
    }
    pub const fn indent_left(twips: i32) -> Self {
        Self::value("li", twips)
    }
    pub const fn indent_right(twips: i32) -> Self {
        Self::value("ri", twips)
    }
    pub const fn indent_first_line(twips: i32) -> Self {
        Self::value("fi", twips)
    }
    pub const fn line_break() -> Self {
        Self::flag("line")
    }
    pub const fn tab() -> Self {
        Self::flag("tab")
    }

    // Pictures

    pub const fn picture() -> Self {
        Self::flag("pict")
    }
    pub const fn jpeg_blip() -> Self {
        Self::flag("jpegblip")
    }
    pub const fn png_blip() -> Self {
        Self::flag("pngblip")
    }
    pub const fn picture_width(px: i32) -> Self {
        Self::value("picw", px)
    }
    pub const fn picture_height(px: i32) -> Self {
        Self::value("pich", px)
    }
    pub const fn picture_goal_width(twips: i32) -> Self {
        Self::value("picwgoal", twips)
    }
    pub const fn picture_goal_height(twips: i32) -> Self {
        Self::value("pichgoal", twips)
    }

    // Tables

    pub const fn row_defaults() -> Self {
        Self::flag("trowd")
    }
    pub const fn row_end() -> Self {
        Self::flag("row")
    }
    pub const fn row_align_left() -> Self {
        Self::flag("trql")
    }
    pub const fn row_align_center() -> Self {
        Self::flag("trqc")
    }
    pub const fn row_align_right() -> Self {
        Self::flag("trqr")
    }
    pub const fn row_padding_left(twips: i32) -> Self {
        Self::value("trpaddl", twips)
    }
    pub const fn row_padding_top(twips: i32) -> Self {
        Self::value("trpaddt", twips)
    }
    pub const fn row_padding_right(twips: i32) -> Self {
        Self::value("trpaddr", twips)
    }
    pub const fn row_padding_bottom(twips: i32) -> Self {
        Self::value("trpaddb", twips)
    }
    /// Unit selectors (3 = twips) for the row paddings, in l/t/r/b order.
    pub const fn row_padding_units(side: Side) -> Self {
        match side {
            Side::Left => Self::value("trpaddfl", 3),
            Side::Top => Self::value("trpaddft", 3),
            Side::Right => Self::value("trpaddfr", 3),
            Side::Bottom => Self::value("trpaddfb", 3),
        }
    }
    pub const fn cell_padding(side: Side, twips: i32) -> Self {
        match side {
            Side::Left => Self::value("clpadl", twips),
            Side::Top => Self::value("clpadt", twips),
            Side::Right => Self::value("clpadr", twips),
            Side::Bottom => Self::value("clpadb", twips),
        }
    }
    pub const fn cell_padding_units(side: Side) -> Self {
        match side {
            Side::Left => Self::value("clpadfl", 3),
            Side::Top => Self::value("clpadft", 3),
            Side::Right => Self::value("clpadfr", 3),
            Side::Bottom => Self::value("clpadfb", 3),
        }
    }
    pub const fn cell_border(side: Side) -> Self {
        match side {
            Side::Left => Self::flag("clbrdrl"),
            Side::Top => Self::flag("clbrdrt"),
            Side::Right => Self::flag("clbrdrr"),
            Side::Bottom => Self::flag("clbrdrb"),
        }
    }
    pub const fn border_single() -> Self {
        Self::flag("brdrs")
    }
    pub const fn border_width(twips: i32) -> Self {
        Self::value("brdrw", twips)
    }
    pub const fn border_color(color: ColorRef) -> Self {
        Self::value("brdrcf", color as i32)
    }
    pub const fn merge_first() -> Self {
        Self::flag("clvmgf")
    }
    pub const fn merge_continue() -> Self {
        Self::flag("clvmrg")
    }
    pub const fn cell_boundary(twips: i32) -> Self {
        Self::value("cellx", twips)
    }
    pub const fn cell_end() -> Self {
        Self::flag("cell")
    }
}

/// Box side, used by the padding and border control word families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Top,
    Right,
    Bottom,
}

impl Side {
    /// Left, top, right, bottom.
    pub const ALL: [Side; 4] = [Side::Left, Side::Top, Side::Right, Side::Bottom];
}

/// Streaming RTF writer.
pub struct RtfWriter<W: Write> {
    /// Output writer
    writer: W,
    /// Insert line breaks between structural elements
    pretty: bool,
    /// The last token was a control word; literal text needs a space first
    pending_delimiter: bool,
}

impl<W: Write> RtfWriter<W> {
    /// Create a new RTF writer
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            pending_delimiter: false,
        }
    }

    /// Open a group (`{`)
    pub fn open_group(&mut self) -> io::Result<()> {
        self.pending_delimiter = false;
        self.writer.write_all(b"{")
    }

    /// Close a group (`}`)
    pub fn close_group(&mut self) -> io::Result<()> {
        self.pending_delimiter = false;
        self.writer.write_all(b"}")
    }

    /// Write a control word
    pub fn write_control_word(&mut self, word: ControlWord) -> io::Result<()> {
        self.writer.write_all(b"\\")?;
        self.writer.write_all(word.name.as_bytes())?;
        if let Some(p) = word.param {
            let mut buf = itoa::Buffer::new();
            self.writer.write_all(buf.format(p).as_bytes())?;
        }
        self.pending_delimiter = true;
        Ok(())
    }

    /// Write several control words back to back
    pub fn write_control_words(&mut self, words: &[ControlWord]) -> io::Result<()> {
        for word in words {
            self.write_control_word(*word)?;
        }
        Ok(())
    }

    /// Write a literal `;` list terminator as used by the style tables.
    pub fn write_list_terminator(&mut self) -> io::Result<()> {
        self.pending_delimiter = false;
        self.writer.write_all(b";")
    }

    /// Insert a cosmetic line break. RTF readers ignore bare CR/LF.
    pub fn line_break(&mut self) -> io::Result<()> {
        if self.pretty {
            self.pending_delimiter = false;
            self.writer.write_all(b"\n")?;
        }
        Ok(())
    }

    /// Write plain text (with proper escaping)
    pub fn write_text(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        let bytes = text.as_bytes();
        if bytes.iter().all(|b| is_printable_ascii(*b)) && memchr3(b'\\', b'{', b'}', bytes).is_none()
        {
            return self.write_literal(bytes);
        }

        let mut start = 0;
        for (idx, ch) in text.char_indices() {
            if ch.is_ascii() && is_printable_ascii(ch as u8) && !matches!(ch, '\\' | '{' | '}') {
                continue;
            }
            if start < idx {
                self.write_literal(&bytes[start..idx])?;
            }
            start = idx + ch.len_utf8();

            match ch {
                '\\' | '{' | '}' => {
                    self.pending_delimiter = false;
                    self.writer.write_all(&[b'\\', ch as u8])?;
                },
                '\t' => self.write_control_word(ControlWord::tab())?,
                '\n' => self.write_control_word(ControlWord::line_break())?,
                '\r' => {},
                c => self.write_unicode(c)?,
            }
        }
        if start < bytes.len() {
            self.write_literal(&bytes[start..])?;
        }
        Ok(())
    }

    /// Write a character as `\uN?`, one escape per UTF-16 code unit.
    fn write_unicode(&mut self, c: char) -> io::Result<()> {
        let mut units = [0u16; 2];
        let mut buf = itoa::Buffer::new();
        for unit in c.encode_utf16(&mut units) {
            self.writer.write_all(b"\\u")?;
            // \u takes a signed 16-bit parameter
            self.writer.write_all(buf.format(*unit as i16).as_bytes())?;
            self.writer.write_all(b"?")?;
        }
        self.pending_delimiter = false;
        Ok(())
    }

    /// Write binary data as lowercase hex, `line_width` source bytes per line.
    pub fn write_hex(&mut self, data: &[u8], line_width: usize) -> io::Result<()> {
        let line_width = line_width.max(1);
        let mut line = Vec::with_capacity(line_width * 2 + 1);
        for chunk in data.chunks(line_width) {
            line.clear();
            line.push(b'\n');
            for byte in chunk {
                line.push(HEX_DIGITS[(byte >> 4) as usize]);
                line.push(HEX_DIGITS[(byte & 0x0F) as usize]);
            }
            self.writer.write_all(&line)?;
        }
        self.pending_delimiter = false;
        Ok(())
    }

    fn write_literal(&mut self, bytes: &[u8]) -> io::Result<()> {
        if self.pending_delimiter {
            self.writer.write_all(b" ")?;
            self.pending_delimiter = false;
        }
        self.writer.write_all(bytes)
    }

    /// Flush the writer
    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[inline]
fn is_printable_ascii(b: u8) -> bool {
    (0x20..=0x7E).contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn render(f: impl FnOnce(&mut RtfWriter<&mut Vec<u8>>) -> io::Result<()>) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, true);
        f(&mut writer).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_control_words() {
        let result = render(|w| {
            w.write_control_word(ControlWord::font_size(42))?;
            w.write_control_word(ControlWord::bold())
        });
        assert_eq!(result, "\\fs42\\b");
    }

    #[test]
    fn test_text_after_control_word_is_delimited() {
        let result = render(|w| {
            w.write_control_word(ControlWord::bold())?;
            w.write_text("Hello")?;
            w.write_control_word(ControlWord::cell_end())
        });
        assert_eq!(result, "\\b Hello\\cell");
    }

    #[test]
    fn test_escapes_specials() {
        let result = render(|w| w.write_text(r"a\b{c}d"));
        assert_eq!(result, r"a\\b\{c\}d");
    }

    #[test]
    fn test_cyrillic_is_unicode_escaped() {
        let result = render(|w| w.write_text("Б"));
        assert_eq!(result, "\\u1041?");
    }

    #[test]
    fn test_astral_plane_uses_surrogate_pair() {
        // U+1F600 -> D83D DE00, both above i16::MAX
        let result = render(|w| w.write_text("\u{1F600}"));
        assert_eq!(result, "\\u-10179?\\u-8704?");
    }

    #[test]
    fn test_tab_and_newline() {
        let result = render(|w| w.write_text("a\tb\nc"));
        assert_eq!(result, "a\\tab b\\line c");
    }

    #[test]
    fn test_hex_lines() {
        let result = render(|w| {
            w.write_control_word(ControlWord::picture_goal_height(100))?;
            w.write_hex(&[0x89, 0x50, 0x4E, 0x47, 0xFF], 2)
        });
        assert_eq!(result, "\\pichgoal100\n8950\n4e47\nff");
    }

    #[test]
    fn test_compact_mode_skips_line_breaks() {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        writer.write_control_word(ControlWord::paragraph_end()).unwrap();
        writer.line_break().unwrap();
        writer.write_text("x").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "\\par x");
    }

    proptest! {
        #[test]
        fn prop_escaped_text_is_printable_ascii(text in "\\PC*") {
            let result = render(|w| w.write_text(&text));
            prop_assert!(result.bytes().all(|b| (0x20..=0x7E).contains(&b)));
        }
    }
}
