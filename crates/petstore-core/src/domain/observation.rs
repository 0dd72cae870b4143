use std::fmt;

use super::pet::Pet;

/// HTTP status reported when a pet is found
pub const STATUS_OK: u16 = 200;

/// HTTP status reported when a pet is missing
pub const STATUS_NOT_FOUND: u16 = 404;

/// What one fetch of the remote store returned
#[derive(Debug, Clone, PartialEq)]
pub enum Observation {
    /// Success status with a decodable pet
    Found {
        /// HTTP status of the response
        status: u16,
        /// Decoded pet
        pet: Pet,
        /// Raw response body
        body: String,
    },
    /// The store reported the pet as missing
    NotFound {
        /// Raw response body
        body: String,
    },
    /// Any other status, or a success status whose body is not a pet
    Unexpected {
        /// HTTP status of the response
        status: u16,
        /// Raw response body
        body: String,
    },
}

impl Observation {
    /// HTTP status code behind this observation.
    pub fn status_code(&self) -> u16 {
        match self {
            Observation::Found { status, .. } | Observation::Unexpected { status, .. } => *status,
            Observation::NotFound { .. } => STATUS_NOT_FOUND,
        }
    }

    /// Raw response body.
    pub fn body(&self) -> &str {
        match self {
            Observation::Found { body, .. }
            | Observation::NotFound { body }
            | Observation::Unexpected { body, .. } => body,
        }
    }

    /// The decoded pet, if one was found.
    pub fn pet(&self) -> Option<&Pet> {
        match self {
            Observation::Found { pet, .. } => Some(pet),
            _ => None,
        }
    }

    /// True when the store answered "not found".
    pub fn is_not_found(&self) -> bool {
        matches!(self, Observation::NotFound { .. })
    }
}

impl fmt::Display for Observation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "status {}, body: {}", self.status_code(), self.body())
    }
}
