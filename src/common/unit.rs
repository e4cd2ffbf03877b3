//! Unit conversion utilities.
//!
//! Twips (1/20 of a point, 1/1440 of an inch) are the base length unit of
//! RTF: page size, margins, indents and cell widths are all expressed in them.

pub const TWIPS_PER_INCH: i32 = 1440;

/// Millimeters per inch, scaled by 10 so the ISO sizes stay in integers.
const TENTH_MM_PER_INCH: i64 = 254;

/// Convert millimeters to twips, rounding to nearest.
#[inline]
pub const fn mm_to_twip(mm: i32) -> i32 {
    ((mm as i64 * 10 * TWIPS_PER_INCH as i64 + TENTH_MM_PER_INCH / 2) / TENTH_MM_PER_INCH) as i32
}

#[inline]
pub fn inch_to_twip(inches: f64) -> i32 {
    (inches * TWIPS_PER_INCH as f64) as i32
}
