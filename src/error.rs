//! Error types for field generation, configuration and previews.

use std::fmt;

/// Errors raised before any particle is generated.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// A generation parameter is outside its valid range.
    InvalidParameter {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl GenerationError {
    pub(crate) fn invalid(
        field: &'static str,
        value: impl fmt::Display,
        reason: &'static str,
    ) -> Self {
        GenerationError::InvalidParameter {
            field,
            value: value.to_string(),
            reason,
        }
    }

    /// Name of the offending parameter.
    pub fn field(&self) -> &'static str {
        match self {
            GenerationError::InvalidParameter { field, .. } => field,
        }
    }
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::InvalidParameter {
                field,
                value,
                reason,
            } => write!(f, "invalid parameter `{}` = {}: {}", field, value, reason),
        }
    }
}

impl std::error::Error for GenerationError {}

/// Errors produced while turning command-line input into an `AppConfig`.
#[derive(Debug)]
pub enum ConfigError {
    /// A color flag was not a `#RRGGBB` string.
    InvalidColor { flag: &'static str, message: &'static str },
    /// The assembled parameters failed validation.
    Parameters(GenerationError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidColor { flag, message } => {
                write!(f, "invalid color for --{}: {}", flag, message)
            }
            ConfigError::Parameters(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parameters(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GenerationError> for ConfigError {
    fn from(e: GenerationError) -> Self {
        ConfigError::Parameters(e)
    }
}

/// Errors that can occur while presenting or saving a preview.
#[derive(Debug)]
pub enum PreviewError {
    /// Failed to encode or write the preview image.
    Image(image::ImageError),
    /// Failed to write to the terminal.
    Io(std::io::Error),
}

impl fmt::Display for PreviewError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreviewError::Image(e) => write!(f, "Failed to save preview image: {}", e),
            PreviewError::Io(e) => write!(f, "Failed to present preview: {}", e),
        }
    }
}

impl std::error::Error for PreviewError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PreviewError::Image(e) => Some(e),
            PreviewError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for PreviewError {
    fn from(e: image::ImageError) -> Self {
        PreviewError::Image(e)
    }
}

impl From<std::io::Error> for PreviewError {
    fn from(e: std::io::Error) -> Self {
        PreviewError::Io(e)
    }
}
