//! Error types for startup failures.
//!
//! Nothing inside the running loop can fail except the draw target itself;
//! everything here is raised before the first frame.

use core::fmt;

/// The output surface could not be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceError {
    /// Requested canvas is smaller than the plot can be resampled onto
    TooSmall { width: u32, height: u32 },
    /// The windowing backend failed to open a window
    Unavailable(String),
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SurfaceError::TooSmall { width, height } => write!(
                f,
                "canvas {}x{} is too small (need at least 2x1 pixels)",
                width, height
            ),
            SurfaceError::Unavailable(reason) => {
                write!(f, "output surface unavailable: {}", reason)
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// A tuning parameter is outside the range the loop can run with.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigError {
    pub field: &'static str,
    pub reason: &'static str,
}

impl ConfigError {
    pub(crate) fn new(field: &'static str, reason: &'static str) -> Self {
        Self { field, reason }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid `{}`: {}", self.field, self.reason)
    }
}

impl std::error::Error for ConfigError {}

/// Any fatal startup error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    Config(ConfigError),
    Surface(SurfaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => e.fmt(f),
            Error::Surface(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Config(e) => Some(e),
            Error::Surface(e) => Some(e),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<SurfaceError> for Error {
    fn from(e: SurfaceError) -> Self {
        Error::Surface(e)
    }
}
