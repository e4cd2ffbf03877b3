//! Style tables and shared formatting types.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Font reference (index into font table).
pub type FontRef = u16;

/// Color reference (index into color table).
pub type ColorRef = u16;

/// RTF color representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub red: u8,
    /// Green component (0-255)
    pub green: u8,
    /// Blue component (0-255)
    pub blue: u8,
}

impl Color {
    /// Create a new color.
    #[inline]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create a color from a `0xRRGGBB` value.
    #[inline]
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::new((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Black color.
    #[inline]
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// White color.
    #[inline]
    pub const fn white() -> Self {
        Self::new(255, 255, 255)
    }
}

/// Color table containing document colors.
///
/// Entries are positional: the index returned by [`ColorTable::add`] is the
/// value written after `\cf`. Black always occupies index 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorTable {
    colors: Vec<Color>,
}

impl ColorTable {
    /// Create a new color table seeded with black.
    #[inline]
    pub fn new() -> Self {
        Self {
            colors: vec![Color::black()],
        }
    }

    /// Add a color to the table and return its index.
    ///
    /// No deduplication happens: adding the same color twice yields two
    /// distinct indices.
    #[inline]
    pub fn add(&mut self, color: Color) -> ColorRef {
        let index = self.colors.len() as ColorRef;
        self.colors.push(color);
        index
    }

    /// Get a color by reference.
    #[inline]
    pub fn get(&self, color_ref: ColorRef) -> Option<&Color> {
        self.colors.get(color_ref as usize)
    }

    /// Get all colors in the table.
    #[inline]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; black is present from construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::new()
    }
}

/// Font family categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontFamily {
    /// Nil (unknown or default)
    #[default]
    Nil,
    /// Roman (serif) fonts
    Roman,
    /// Swiss (sans-serif) fonts
    Swiss,
    /// Modern (monospace) fonts
    Modern,
    /// Script fonts
    Script,
    /// Decorative fonts
    Decor,
    /// Technical, symbol, and mathematical fonts
    Tech,
}

/// Font definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Font {
    /// Font name
    pub name: Cow<'static, str>,
    /// Font family category
    pub family: FontFamily,
    /// Character set (Windows codepage); 0 is ANSI and is not written
    pub charset: u8,
}

impl Font {
    /// Create a new font.
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>, family: FontFamily, charset: u8) -> Self {
        Self {
            name: name.into(),
            family,
            charset,
        }
    }
}

/// Font table containing document fonts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FontTable {
    fonts: Vec<Font>,
}

impl FontTable {
    /// Create a new, empty font table.
    #[inline]
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Append a font by name and return its index.
    #[inline]
    pub fn add(&mut self, name: impl Into<Cow<'static, str>>) -> FontRef {
        self.add_font(Font::new(name, FontFamily::Nil, 0))
    }

    /// Append a font with an explicit family and return its index.
    #[inline]
    pub fn add_with_family(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        family: FontFamily,
    ) -> FontRef {
        self.add_font(Font::new(name, family, 0))
    }

    /// Append a fully specified font and return its index.
    #[inline]
    pub fn add_font(&mut self, font: Font) -> FontRef {
        let index = self.fonts.len() as FontRef;
        self.fonts.push(font);
        index
    }

    /// Get a font by reference.
    #[inline]
    pub fn get(&self, font_ref: FontRef) -> Option<&Font> {
        self.fonts.get(font_ref as usize)
    }

    /// Get all fonts in the table.
    #[inline]
    pub fn fonts(&self) -> &[Font] {
        &self.fonts
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }
}

/// Text alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Alignment {
    /// Left-aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right-aligned
    Right,
    /// Justified
    Justify,
}

/// Indentation information for paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Indentation {
    /// Left indent (in twips)
    pub left: i32,
    /// Right indent (in twips)
    pub right: i32,
    /// First line indent (in twips)
    pub first_line: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_table_starts_with_black() {
        let mut table = ColorTable::new();
        assert_eq!(table.get(0), Some(&Color::black()));
        assert_eq!(table.add(Color::new(0, 128, 0)), 1);
        assert_eq!(table.add(Color::from_rgb(0x0000FF)), 2);
        assert_eq!(table.get(2), Some(&Color::new(0, 0, 255)));
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_duplicate_entries_get_distinct_indices() {
        let mut fonts = FontTable::new();
        assert_eq!(fonts.add("Arial"), 0);
        assert_eq!(fonts.add("Arial"), 1);
        assert_eq!(fonts.add_with_family("Times New Roman", FontFamily::Roman), 2);
        assert_eq!(fonts.get(2).map(|f| f.family), Some(FontFamily::Roman));

        let mut colors = ColorTable::new();
        let red = Color::new(255, 0, 0);
        assert_ne!(colors.add(red), colors.add(red));
    }
}
