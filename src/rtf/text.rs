//! Styled text runs.

use std::io::{self, Write};

use super::control::{ControlWord, RtfWriter};
use super::options::{DEFAULT_FONT_SIZE, WriterOptions};
use super::types::{ColorRef, FontRef};

/// A fragment of text with uniform character formatting.
///
/// Font and color are references into the owning document's style tables;
/// the run never stores the font name or RGB value itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    text: String,
    /// Font size in half-points
    size: u16,
    font: FontRef,
    color: ColorRef,
    bold: bool,
    italic: bool,
}

impl TextRun {
    /// Create a new run. `size` is in half-points (24 = 12pt).
    pub fn new(text: impl Into<String>, size: u16, font: FontRef, color: ColorRef) -> Self {
        Self {
            text: text.into(),
            size,
            font,
            color,
            bold: false,
            italic: false,
        }
    }

    pub fn set_bold(&mut self) -> &mut Self {
        self.bold = true;
        self
    }

    pub fn set_italic(&mut self) -> &mut Self {
        self.italic = true;
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn size(&self) -> u16 {
        self.size
    }

    #[inline]
    pub fn font(&self) -> FontRef {
        self.font
    }

    #[inline]
    pub fn color(&self) -> ColorRef {
        self.color
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    #[inline]
    pub fn is_italic(&self) -> bool {
        self.italic
    }

    /// Write the run as its own group so formatting does not leak.
    pub(crate) fn compose<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        out.open_group()?;

        if self.font != options.default_font {
            out.write_control_word(ControlWord::font(self.font))?;
        }
        if self.size != DEFAULT_FONT_SIZE {
            out.write_control_word(ControlWord::font_size(self.size))?;
        }
        if self.color != 0 {
            out.write_control_word(ControlWord::color(self.color))?;
        }
        if self.bold {
            out.write_control_word(ControlWord::bold())?;
        }
        if self.italic {
            out.write_control_word(ControlWord::italic())?;
        }

        out.write_text(&self.text)?;
        out.close_group()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(run: &TextRun) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        run.compose(&mut writer, &WriterOptions::default()).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_styled_run() {
        let mut run = TextRun::new("Red text", 16, 1, 2);
        run.set_bold().set_italic();
        assert_eq!(render(&run), "{\\f1\\fs16\\cf2\\b\\i Red text}");
    }

    #[test]
    fn test_defaults_are_not_repeated() {
        let run = TextRun::new("plain", DEFAULT_FONT_SIZE, 0, 0);
        assert_eq!(render(&run), "{plain}");
    }

    #[test]
    fn test_non_ascii_is_escaped() {
        let run = TextRun::new("Б{x}", 24, 0, 0);
        let out = render(&run);
        assert_eq!(out, "{\\u1041?\\{x\\}}");
        assert!(out.is_ascii());
    }
}
