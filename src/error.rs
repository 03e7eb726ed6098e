use thiserror::Error;

/// Everything that can go wrong between a finalized descriptor and a
/// completed HTTP exchange.
///
/// Variants split into two families: request-construction failures (the
/// descriptor could not be realized into a legal request) and transport
/// failures (the request was sent, or sending was attempted, and the exchange
/// itself failed). Cancellation is its own outcome, belonging to neither.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to create HTTP client: {reason}")]
    ClientBuild { reason: String },
    #[error("Missing value for path parameter '{name}'")]
    MissingPathParameter { name: String },
    #[error("Invalid header format: '{header}' (expected 'Name: Value')")]
    InvalidHeaderFormat { header: String },
    #[error("Header name cannot be empty")]
    EmptyHeaderName,
    #[error("Invalid header name '{name}': {reason}")]
    InvalidHeaderName { name: String, reason: String },
    #[error("Invalid header value for '{name}': {reason}")]
    InvalidHeaderValue { name: String, reason: String },
    #[error("Failed to encode request body: {reason}")]
    BodyEncoding { reason: String },
    #[error("Request cancelled")]
    Cancelled,
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Failed to read response body: {reason}")]
    ResponseRead { reason: String },
}

impl Error {
    /// True for failures in realizing the descriptor into a request —
    /// unresolvable path placeholders, malformed or illegal headers,
    /// unencodable bodies, or a client that could not be built.
    #[must_use]
    pub const fn is_construction(&self) -> bool {
        matches!(
            self,
            Self::ClientBuild { .. }
                | Self::MissingPathParameter { .. }
                | Self::InvalidHeaderFormat { .. }
                | Self::EmptyHeaderName
                | Self::InvalidHeaderName { .. }
                | Self::InvalidHeaderValue { .. }
                | Self::BodyEncoding { .. }
        )
    }

    /// True for failures of the HTTP exchange itself.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::ResponseRead { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_and_transport_are_disjoint() {
        let construction = Error::MissingPathParameter { name: "id".to_string() };
        assert!(construction.is_construction());
        assert!(!construction.is_transport());

        let transport = Error::ResponseRead { reason: "connection reset".to_string() };
        assert!(transport.is_transport());
        assert!(!transport.is_construction());
    }

    #[test]
    fn cancellation_is_neither_construction_nor_transport() {
        assert!(!Error::Cancelled.is_construction());
        assert!(!Error::Cancelled.is_transport());
    }
}
