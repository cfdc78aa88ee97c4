// error.rs - Error types for grid setup and cell access

use std::fmt;

use crate::renderer::Phase;

/// Why a configuration value (or colour channel) was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// Window width or height is zero.
    ZeroWindowDimension { width: u32, height: u32 },
    /// Cell width or height is zero.
    ZeroCellDimension { width: u32, height: u32 },
    /// Border leaves no visible interior (must be < half the smaller cell side).
    BorderTooThick { border: u32, cell_width: u32, cell_height: u32 },
    /// The window is smaller than one cell along some axis.
    EmptyGrid { columns: u32, rows: u32 },
    /// A colour channel outside 0..=255.
    ChannelOutOfRange { value: i32 },
    /// A decay probability outside [0, 1].
    InvalidProbability { value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroWindowDimension { width, height } => {
                write!(f, "window dimensions must be positive (got {width}x{height})")
            }
            Self::ZeroCellDimension { width, height } => {
                write!(f, "cell dimensions must be positive (got {width}x{height})")
            }
            Self::BorderTooThick { border, cell_width, cell_height } => write!(
                f,
                "cell border {border} leaves no interior in a {cell_width}x{cell_height} cell"
            ),
            Self::EmptyGrid { columns, rows } => {
                write!(f, "window holds no complete cell ({columns} columns x {rows} rows)")
            }
            Self::ChannelOutOfRange { value } => {
                write!(f, "colour channel {value} is outside 0..=255")
            }
            Self::InvalidProbability { value } => {
                write!(f, "decay probability {value} is outside [0, 1]")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Every failure the grid can report. All of them are recoverable by the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    Config(ConfigError),
    /// `operation` needs a later setup phase than the grid has reached.
    NotInitialized { operation: &'static str, phase: Phase },
    /// Coordinate outside `columns x rows`.
    OutOfBounds { col: i32, row: i32, columns: u32, rows: u32 },
    /// A setup phase was repeated, or a frozen setting was changed.
    AlreadyInitialized { operation: &'static str, phase: Phase },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "invalid grid configuration: {err}"),
            Self::NotInitialized { operation, phase } => {
                write!(f, "{operation} called too early (grid is {phase})")
            }
            Self::OutOfBounds { col, row, columns, rows } => write!(
                f,
                "cell ({col}, {row}) is outside the {columns}x{rows} grid"
            ),
            Self::AlreadyInitialized { operation, phase } => {
                write!(f, "{operation} not allowed once the grid is {phase}")
            }
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for GridError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}
