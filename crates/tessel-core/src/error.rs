//! Error types for decoding and executing tessel programs

use crate::isa::Pattern;
use crate::thread::ThreadId;

/// Result type for tessel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building tables, decoding images, or running a machine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ============================================================================================
    // Malformed programs
    // ============================================================================================
    /// Pixel grid dimensions are not multiples of the block size
    #[error("pixel grid {width}x{height} is not a multiple of 3 in each dimension")]
    GridDimensions { width: usize, height: usize },

    /// Pixel buffer length disagrees with the declared dimensions
    #[error("pixel grid {width}x{height} expects {expected} pixels, got {actual}")]
    PixelCount {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    /// A block matched no registered template
    #[error("malformed program: block ({x}, {y}) matches no instruction template ({pattern})")]
    MalformedProgram { x: usize, y: usize, pattern: Pattern },

    // ============================================================================================
    // Instruction table defects
    // ============================================================================================
    /// Two variants binarize to the same template
    #[error("instruction table defect: {first} and {second} share template {pattern}")]
    OverlappingTemplates {
        first: &'static str,
        second: &'static str,
        pattern: Pattern,
    },

    /// The same variant was registered twice
    #[error("instruction table defect: {0} registered twice")]
    DuplicateVariant(&'static str),

    /// A declared data cell is out of range or sits on a white template cell
    #[error("instruction table defect: {mnemonic} declares data cell ({x}, {y}) outside its non-white cells")]
    InvalidDataCell { mnemonic: &'static str, x: u8, y: u8 },

    /// No variants were registered
    #[error("instruction table defect: no variants registered")]
    EmptyTable,

    // ============================================================================================
    // Runtime
    // ============================================================================================
    /// Direction index outside {up, right, down, left}
    #[error("invalid direction index: {0} (must be < 4)")]
    InvalidDirection(usize),

    /// A thread stands outside the program grid under the `Fault` edge policy
    #[error("thread {thread} left the program grid at ({x}, {y})")]
    OutOfBounds { thread: ThreadId, x: i64, y: i64 },

    /// No live thread carries this id
    #[error("unknown thread: {0}")]
    UnknownThread(ThreadId),

    /// Integer division or remainder by zero inside an instruction effect
    #[error("division by zero in thread {0}")]
    DivisionByZero(ThreadId),

    /// Invalid machine configuration value
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Instruction effect failure
    #[error("execution error: {0}")]
    Execution(String),
}

impl Error {
    /// Create an execution error
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create a configuration error
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// True for errors raised while decoding a program image
    pub fn is_malformed_program(&self) -> bool {
        matches!(
            self,
            Error::GridDimensions { .. } | Error::PixelCount { .. } | Error::MalformedProgram { .. }
        )
    }

    /// True for errors that indicate a defect in the instruction library rather than the program
    pub fn is_table_defect(&self) -> bool {
        matches!(
            self,
            Error::OverlappingTemplates { .. }
                | Error::DuplicateVariant(_)
                | Error::InvalidDataCell { .. }
                | Error::EmptyTable
        )
    }
}
