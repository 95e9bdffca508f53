use thiserror::Error;

use crate::domain::product::ProductId;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("quantity overflow for product {0}")]
    QuantityOverflow(ProductId),
    #[error("cart amount overflow for product {0}")]
    AmountOverflow(ProductId),
    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),
    #[error("invalid action `{0}` (expected select:<category>, add:<id>, or remove:<id>)")]
    InvalidAction(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("action #{position} `{action}`: {source}")]
    Action { position: usize, action: String, source: DomainError },
    #[error("fixture failure: {0}")]
    Fixture(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
    #[error("render failure: {0}")]
    Render(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check inputs and try again."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } | Self::Internal { message, .. } => message,
        }
    }

    pub fn correlation_id(&self) -> &str {
        match self {
            Self::BadRequest { correlation_id, .. } | Self::Internal { correlation_id, .. } => {
                correlation_id
            }
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(_) | ApplicationError::Action { .. } => Self::BadRequest {
                message: value.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Fixture(message)
            | ApplicationError::Configuration(message)
            | ApplicationError::Render(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::product::ProductId;
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn domain_error_maps_to_bad_request_interface_error() {
        let interface = ApplicationError::from(DomainError::ProductNotFound(ProductId(99)))
            .into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message == "product not found: 99"
        ));
    }

    #[test]
    fn action_error_keeps_position_in_message() {
        let interface = ApplicationError::Action {
            position: 2,
            action: "add:7".to_owned(),
            source: DomainError::ProductNotFound(ProductId(7)),
        }
        .into_interface("req-2");

        assert_eq!(interface.message(), "action #2 `add:7`: product not found: 7");
        assert_eq!(interface.correlation_id(), "req-2");
        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check inputs and try again."
        );
    }

    #[test]
    fn fixture_and_configuration_errors_map_to_internal() {
        for error in [
            ApplicationError::Fixture("duplicate product id 3".to_owned()),
            ApplicationError::Configuration("bad currency".to_owned()),
        ] {
            let interface = error.into_interface("req-3");
            assert!(matches!(interface, InterfaceError::Internal { .. }));
            assert_eq!(interface.user_message(), "An unexpected internal error occurred.");
        }
    }
}
