use serde::{Deserialize, Serialize};

/// Error body carried by non-success server replies.
#[derive(Debug, Serialize, Deserialize)]
pub struct Error {
    pub error_msg: String,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.error_msg)
    }
}

impl std::error::Error for Error {}
