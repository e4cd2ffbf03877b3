//! Embedded pictures.
//!
//! Pictures are written as `{\pict\jpegblip ...}` / `{\pict\pngblip ...}`
//! groups with the image bytes hex-encoded. An explicit width/height becomes
//! `\picwgoal`/`\pichgoal` (twips); without one the reader falls back to the
//! image's natural size.

use std::io::{self, Read, Write};

use serde::{Deserialize, Serialize};

use super::control::{ControlWord, RtfWriter};
use super::error::{RtfError, RtfResult};
use super::options::WriterOptions;

/// Image formats that can be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

impl ImageFormat {
    /// Detect image format from binary signature.
    pub fn detect(data: &[u8]) -> Option<Self> {
        // JPEG starts with FFD8
        if data.len() >= 2 && data[0] == 0xFF && data[1] == 0xD8 {
            return Some(ImageFormat::Jpeg);
        }
        if data.starts_with(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]) {
            return Some(ImageFormat::Png);
        }
        None
    }

    fn blip(self) -> ControlWord {
        match self {
            ImageFormat::Jpeg => ControlWord::jpeg_blip(),
            ImageFormat::Png => ControlWord::png_blip(),
        }
    }
}

/// An embedded picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Picture {
    /// Raw encoded image bytes
    data: Vec<u8>,
    format: ImageFormat,
    /// Goal width (in twips)
    width: Option<i32>,
    /// Goal height (in twips)
    height: Option<i32>,
}

impl Picture {
    /// Create a picture from already-read bytes.
    pub fn new(data: Vec<u8>, format: ImageFormat) -> Self {
        match ImageFormat::detect(&data) {
            Some(detected) if detected != format => log::warn!(
                "picture declared as {format:?} but its signature looks like {detected:?}"
            ),
            None => log::warn!("picture declared as {format:?} has an unrecognized signature"),
            _ => {},
        }
        Self {
            data,
            format,
            width: None,
            height: None,
        }
    }

    /// Read the picture bytes from `reader`.
    ///
    /// The reader is only borrowed for the duration of the call; closing the
    /// underlying resource stays with the caller.
    pub fn from_reader<R: Read>(mut reader: R, format: ImageFormat) -> RtfResult<Self> {
        let mut data = Vec::new();
        reader
            .read_to_end(&mut data)
            .map_err(RtfError::ImageSourceUnreadable)?;
        if data.is_empty() {
            return Err(RtfError::ImageSourceUnreadable(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "image source produced no data",
            )));
        }
        Ok(Self::new(data, format))
    }

    /// Set the displayed width in twips.
    pub fn set_width(&mut self, twips: i32) -> &mut Self {
        self.width = Some(twips);
        self
    }

    /// Set the displayed height in twips.
    pub fn set_height(&mut self, twips: i32) -> &mut Self {
        self.height = Some(twips);
        self
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn width(&self) -> Option<i32> {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Option<i32> {
        self.height
    }

    /// Natural pixel size decoded from the image header.
    #[cfg(feature = "imgconv")]
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        let format = match self.format {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
        };
        image::ImageReader::with_format(io::Cursor::new(&self.data), format)
            .into_dimensions()
            .ok()
    }

    #[cfg(not(feature = "imgconv"))]
    pub fn natural_size(&self) -> Option<(u32, u32)> {
        None
    }

    pub(crate) fn compose<W: Write>(
        &self,
        out: &mut RtfWriter<W>,
        options: &WriterOptions,
    ) -> io::Result<()> {
        out.open_group()?;
        out.write_control_word(ControlWord::picture())?;
        out.write_control_word(self.format.blip())?;

        if let Some((w, h)) = self.natural_size() {
            out.write_control_word(ControlWord::picture_width(w as i32))?;
            out.write_control_word(ControlWord::picture_height(h as i32))?;
        }
        if let Some(w) = self.width {
            out.write_control_word(ControlWord::picture_goal_width(w))?;
        }
        if let Some(h) = self.height {
            out.write_control_word(ControlWord::picture_goal_height(h))?;
        }

        out.write_hex(&self.data, options.hex_line_width)?;
        out.close_group()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIG: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        }
    }

    #[test]
    fn test_detect() {
        assert_eq!(ImageFormat::detect(&PNG_SIG), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::detect(&[0xFF, 0xD8, 0xFF, 0xE0]), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::detect(b"GIF89a"), None);
    }

    #[test]
    fn test_compose_with_goal_size() {
        let mut pic = Picture::new(vec![0xFF, 0xD8, 0x01], ImageFormat::Jpeg);
        pic.set_width(100).set_height(50);

        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        pic.compose(&mut writer, &WriterOptions::default()).unwrap();
        let out = String::from_utf8(output).unwrap();

        assert!(out.starts_with("{\\pict\\jpegblip"));
        assert!(out.contains("\\picwgoal100\\pichgoal50"));
        assert!(out.ends_with("\nffd801}"));
    }

    #[test]
    fn test_from_reader() {
        let pic = Picture::from_reader(&PNG_SIG[..], ImageFormat::Png).unwrap();
        assert_eq!(pic.data(), &PNG_SIG);
        assert_eq!(pic.width(), None);
    }

    #[test]
    fn test_unreadable_source() {
        let err = Picture::from_reader(FailingReader, ImageFormat::Png).unwrap_err();
        assert!(matches!(err, RtfError::ImageSourceUnreadable(ref e) if e.kind() == io::ErrorKind::PermissionDenied));

        let err = Picture::from_reader(io::empty(), ImageFormat::Jpeg).unwrap_err();
        assert!(matches!(err, RtfError::ImageSourceUnreadable(_)));
    }
}
