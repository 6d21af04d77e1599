//! Error types and handling for the `NightSky` application

use thiserror::Error;

use crate::dashboard::MISSING_LOCATION_ALERT;
use crate::models::CoordinateField;

/// Name carried by every upstream service failure.
pub const SERVICES_ERROR: &str = "servicesError";

/// Main error type for the `NightSky` application
#[derive(Error, Debug)]
pub enum NightSkyError {
    /// Latitude and/or longitude input is blank or not a number
    #[error("Invalid input: {}", join_fields(.fields))]
    Validation { fields: Vec<CoordinateField> },

    /// No usable input and nothing saved to fall back on
    #[error("No saved location to fall back on (invalid input: {})", join_fields(.fields))]
    MissingPreference { fields: Vec<CoordinateField> },

    /// Upstream service returned a non-success status or an unusable body
    #[error("{name}: {message}")]
    Service {
        name: &'static str,
        status: Option<u16>,
        message: String,
    },

    /// Preference store errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

fn join_fields(fields: &[CoordinateField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl NightSkyError {
    /// Create a new validation error
    #[must_use]
    pub fn validation(fields: Vec<CoordinateField>) -> Self {
        Self::Validation { fields }
    }

    /// Create a new missing preference error
    #[must_use]
    pub fn missing_preference(fields: Vec<CoordinateField>) -> Self {
        Self::MissingPreference { fields }
    }

    /// Create a service error for a non-success HTTP status
    pub fn service<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Service {
            name: SERVICES_ERROR,
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a service error that never got a status (transport, decoding)
    pub fn service_unavailable<S: Into<String>>(message: S) -> Self {
        Self::Service {
            name: SERVICES_ERROR,
            status: None,
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            NightSkyError::Validation { fields } => fields
                .iter()
                .map(|field| field.invalid_message())
                .collect::<Vec<_>>()
                .join("\n"),
            NightSkyError::MissingPreference { .. } => MISSING_LOCATION_ALERT.to_string(),
            NightSkyError::Service { .. } => {
                "Unable to reach the weather services. Please try again later.".to_string()
            }
            NightSkyError::Store { .. } => {
                "Saved preferences could not be read or written. You may need to clear them."
                    .to_string()
            }
            NightSkyError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            NightSkyError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}
