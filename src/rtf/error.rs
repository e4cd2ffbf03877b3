//! Error types for RTF composition.

use thiserror::Error;

/// Result type for RTF operations.
pub type RtfResult<T> = Result<T, RtfError>;

/// RTF composition errors.
#[derive(Error, Debug)]
pub enum RtfError {
    /// Page format name is not present in the lookup table
    #[error("Unknown page format: {0}")]
    UnknownPageFormat(String),

    /// The image byte source failed or produced no data
    #[error("Image source unreadable: {0}")]
    ImageSourceUnreadable(#[source] std::io::Error),

    /// Ratio list cannot be turned into cell widths
    #[error("Malformed ratio input: {0}")]
    MalformedRatioInput(String),

    /// A merge continuation has no First/Continuation cell above it
    #[error(
        "Vertical merge continuation without anchor: table {table}, row {row}, column {column}"
    )]
    MergeWithoutAnchor {
        table: usize,
        row: usize,
        column: usize,
    },

    /// A merge continuation does not line up with the cell it continues
    #[error(
        "Vertical merge boundary mismatch: table {table}, row {row}, column {column}: expected cellx {expected}, found {found}"
    )]
    MergeBoundaryMismatch {
        table: usize,
        row: usize,
        column: usize,
        expected: i32,
        found: i32,
    },

    /// A table cell was given a negative width
    #[error("Negative cell width {width}: table {table}, row {row}, column {column}")]
    NegativeCellWidth {
        table: usize,
        row: usize,
        column: usize,
        width: i32,
    },

    /// The running cell boundary of a row does not fit in an `i32`
    #[error("Row width overflow: table {table}, row {row}, column {column}")]
    RowWidthOverflow {
        table: usize,
        row: usize,
        column: usize,
    },

    /// IO error while writing the composed document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
