use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LeadsError {
    #[error("Request failed with status {status}")]
    Http { status: u16 },

    #[error("Network error: {0}")]
    Transport(String),

    #[error("Failed to decode lead: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Missing element: {0}")]
    MissingElement(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            LeadsError::Http { status: 500 }.to_string(),
            "Request failed with status 500"
        );
        assert_eq!(
            LeadsError::Transport("offline".into()).to_string(),
            "Network error: offline"
        );
    }
}
