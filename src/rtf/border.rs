//! Table cell borders.

use std::io::{self, Write};

use bitflags::bitflags;

use super::control::{ControlWord, RtfWriter, Side};
use super::types::ColorRef;

/// Width of a drawn cell border, in twips (0.75pt).
pub const BORDER_WIDTH: i32 = 15;

bitflags! {
    /// Which sides of a cell carry a single-line border.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CellBorders: u8 {
        const LEFT = 0x01;
        const TOP = 0x02;
        const RIGHT = 0x04;
        const BOTTOM = 0x08;
    }
}

impl CellBorders {
    pub fn from_sides(left: bool, top: bool, right: bool, bottom: bool) -> Self {
        let mut borders = Self::empty();
        borders.set(Self::LEFT, left);
        borders.set(Self::TOP, top);
        borders.set(Self::RIGHT, right);
        borders.set(Self::BOTTOM, bottom);
        borders
    }

    #[inline]
    pub fn has(self, side: Side) -> bool {
        self.contains(Self::for_side(side))
    }

    fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Self::LEFT,
            Side::Top => Self::TOP,
            Side::Right => Self::RIGHT,
            Side::Bottom => Self::BOTTOM,
        }
    }

    /// Write `\clbrdrX\brdrw15\brdrs` for each present side, in l/t/r/b order.
    pub(crate) fn compose<W: Write>(
        self,
        out: &mut RtfWriter<W>,
        color: Option<ColorRef>,
    ) -> io::Result<()> {
        for side in Side::ALL {
            if !self.has(side) {
                continue;
            }
            out.write_control_words(&[
                ControlWord::cell_border(side),
                ControlWord::border_width(BORDER_WIDTH),
                ControlWord::border_single(),
            ])?;
            if let Some(color) = color {
                out.write_control_word(ControlWord::border_color(color))?;
            }
        }
        Ok(())
    }
}

impl Default for CellBorders {
    /// New cells are boxed on every side.
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(borders: CellBorders, color: Option<ColorRef>) -> String {
        let mut output = Vec::new();
        let mut writer = RtfWriter::new(&mut output, false);
        borders.compose(&mut writer, color).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_from_sides() {
        let b = CellBorders::from_sides(true, false, false, true);
        assert!(b.has(Side::Left) && b.has(Side::Bottom));
        assert!(!b.has(Side::Top) && !b.has(Side::Right));
        assert_eq!(CellBorders::default(), CellBorders::all());
    }

    #[test]
    fn test_compose_order_and_color() {
        assert_eq!(
            render(CellBorders::TOP | CellBorders::LEFT, None),
            "\\clbrdrl\\brdrw15\\brdrs\\clbrdrt\\brdrw15\\brdrs"
        );
        assert_eq!(
            render(CellBorders::RIGHT, Some(3)),
            "\\clbrdrr\\brdrw15\\brdrs\\brdrcf3"
        );
        assert_eq!(render(CellBorders::empty(), Some(3)), "");
    }
}
