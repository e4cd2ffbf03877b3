//! Writer configuration.

use serde::{Deserialize, Serialize};

use super::types::FontRef;

/// Default font size in half-points (12pt).
pub const DEFAULT_FONT_SIZE: u16 = 24;

/// RTF writer options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WriterOptions {
    /// ANSI code page number (default 1252 for Western European)
    pub code_page: u16,
    /// Default font index
    pub default_font: FontRef,
    /// Default tab width (in twips)
    pub default_tab_width: i32,
    /// Put structural elements on their own lines
    pub pretty: bool,
    /// Picture bytes per line of hex output
    pub hex_line_width: usize,
}

impl Default for WriterOptions {
    fn default() -> Self {
        Self {
            code_page: 1252,
            default_font: 0,
            default_tab_width: 720, // 0.5 inch
            pretty: true,
            hex_line_width: 64,
        }
    }
}
