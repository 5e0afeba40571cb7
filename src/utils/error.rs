use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Missing required field: {field}")]
    MissingFieldError { field: String },

    #[error("Invalid value for '{field}': '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        let err = CatalogError::invalid_argument("Property type cannot be empty");
        assert!(err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "Invalid argument: Property type cannot be empty"
        );
    }

    #[test]
    fn test_other_variants_are_not_invalid_argument() {
        let err = CatalogError::MissingFieldError {
            field: "listings[0].id".to_string(),
        };
        assert!(!err.is_invalid_argument());
        assert_eq!(err.to_string(), "Missing required field: listings[0].id");
    }
}
