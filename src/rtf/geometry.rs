//! Page geometry: named paper formats, orientation and margins.
//!
//! Page size is always derived from a (format, orientation) pair and is never
//! set directly. Resolution of an unknown format name is an error; the
//! document keeps its previous geometry and the caller decides what to do.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::error::{RtfError, RtfResult};
use crate::common::unit::{inch_to_twip, mm_to_twip};

/// Page orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// Named paper formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageFormat {
    A0,
    A1,
    A2,
    A3,
    A4,
    A5,
    A6,
    /// US Letter, 8.5" x 11"
    Letter,
    /// US Legal, 8.5" x 14"
    Legal,
}

/// Format lookup keyed by upper-case name.
static PAGE_FORMATS: phf::Map<&'static str, PageFormat> = phf_map! {
    "A0" => PageFormat::A0,
    "A1" => PageFormat::A1,
    "A2" => PageFormat::A2,
    "A3" => PageFormat::A3,
    "A4" => PageFormat::A4,
    "A5" => PageFormat::A5,
    "A6" => PageFormat::A6,
    "LETTER" => PageFormat::Letter,
    "LEGAL" => PageFormat::Legal,
};

impl PageFormat {
    /// Look up a format by name, ignoring case and surrounding whitespace.
    pub fn from_name(name: &str) -> RtfResult<Self> {
        let key = name.trim().to_ascii_uppercase();
        PAGE_FORMATS
            .get(key.as_str())
            .copied()
            .ok_or_else(|| RtfError::UnknownPageFormat(name.to_string()))
    }

    pub fn name(self) -> &'static str {
        match self {
            PageFormat::A0 => "A0",
            PageFormat::A1 => "A1",
            PageFormat::A2 => "A2",
            PageFormat::A3 => "A3",
            PageFormat::A4 => "A4",
            PageFormat::A5 => "A5",
            PageFormat::A6 => "A6",
            PageFormat::Letter => "Letter",
            PageFormat::Legal => "Legal",
        }
    }

    /// Portrait dimensions in twips.
    pub fn portrait_size(self) -> PageSize {
        let (width, height) = match self {
            PageFormat::A0 => (mm_to_twip(841), mm_to_twip(1189)),
            PageFormat::A1 => (mm_to_twip(594), mm_to_twip(841)),
            PageFormat::A2 => (mm_to_twip(420), mm_to_twip(594)),
            PageFormat::A3 => (mm_to_twip(297), mm_to_twip(420)),
            PageFormat::A4 => (mm_to_twip(210), mm_to_twip(297)),
            PageFormat::A5 => (mm_to_twip(148), mm_to_twip(210)),
            PageFormat::A6 => (mm_to_twip(105), mm_to_twip(148)),
            PageFormat::Letter => (inch_to_twip(8.5), inch_to_twip(11.0)),
            PageFormat::Legal => (inch_to_twip(8.5), inch_to_twip(14.0)),
        };
        PageSize { width, height }
    }

    /// Dimensions in twips for the given orientation.
    pub fn size(self, orientation: Orientation) -> PageSize {
        let size = self.portrait_size();
        match orientation {
            Orientation::Portrait => size,
            Orientation::Landscape => size.rotated(),
        }
    }
}

impl FromStr for PageFormat {
    type Err = RtfError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for PageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Page dimensions in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageSize {
    pub width: i32,
    pub height: i32,
}

impl PageSize {
    /// Swap width and height.
    #[inline]
    pub fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Resolve a named format and orientation into a page size.
pub fn resolve_page_size(format: &str, orientation: Orientation) -> RtfResult<PageSize> {
    PageFormat::from_name(format).map(|f| f.size(orientation))
}

/// Page margins in twips.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct Margins {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Margins {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Same margin on every side.
    pub const fn uniform(twips: i32) -> Self {
        Self::new(twips, twips, twips, twips)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}
