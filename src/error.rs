// Error types shared across the client.
//
// Each enum's `Display` text is what the interactive user sees, so the
// messages are written as sentences rather than debug dumps.

use reqwest::StatusCode;

/// A single line of user input that a field validator refused. The
/// prompt loops in `validate` print this and ask again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    #[error("The car id must contain only digits.")]
    Id,

    #[error("Car {0} must not be empty and may only contain letters, digits and spaces.")]
    Name(&'static str),

    #[error("Year must be a four-digit value from 1900 to 2000.")]
    Year,

    #[error("Answer y if the car is convertible, n otherwise.")]
    Convertible,

    #[error("Please enter a number 0..4")]
    MenuChoice,
}

/// Startup argument validation failures. These end the process with
/// exit code 2.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Port number must be an integer between 1 and 65536, but got {0}")]
    Port(String),

    #[error("Car id must be a numeric integer, but got {0}")]
    CarId(String),

    #[error("Timeout must be a whole number of seconds, at least 1, but got {0}")]
    Timeout(String),
}

/// Anything that went wrong before a status code came back.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("The URL is invalid: {0}")]
    InvalidUrl(String),

    #[error("Connection taking longer than expected: {0}")]
    Timeout(String),

    #[error("Could not connect to the server: {0}")]
    Connect(String),

    #[error("Bad request made: {0}")]
    Protocol(String),

    #[error("Could not read the server reply: {0}")]
    Body(String),

    #[error("Could not encode the request body: {0}")]
    Encode(String),

    #[error("Error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let text = err.to_string();
        // A connect timeout is both `is_timeout` and `is_connect`; report
        // it as a timeout.
        if err.is_builder() {
            TransportError::InvalidUrl(text)
        } else if err.is_timeout() {
            TransportError::Timeout(text)
        } else if err.is_connect() {
            TransportError::Connect(text)
        } else if err.is_body() || err.is_decode() {
            TransportError::Body(text)
        } else if err.is_request() || err.is_redirect() || err.is_status() {
            TransportError::Protocol(text)
        } else {
            TransportError::Other(text)
        }
    }
}

/// Why the availability probe considered the store unreachable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeFailure {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("The server answered the collection read with status {0}.")]
    UnexpectedStatus(StatusCode),

    #[error("The server returned a collection that could not be read: {0}")]
    MalformedSnapshot(String),
}
