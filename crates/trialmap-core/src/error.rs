//! Error type for registry requests

/// Error from fetching one page of studies from the registry.
///
/// Only transport and HTTP failures are errors. A study that is not found, or
/// a trial that matches no governorate, is an ordinary empty result.
#[derive(Debug)]
pub enum FetchError {
    /// Registry answered with a non-success status
    Status { status: u16, context: String },
    /// Request never produced a response (connect, timeout, body read)
    Transport { message: String },
    /// Response body was not a page of studies
    Decode { message: String },
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Status { status, context } => write!(f, "{context}: HTTP {status}"),
            Self::Transport { message } => write!(f, "HTTP error: {message}"),
            Self::Decode { message } => write!(f, "invalid registry response: {message}"),
        }
    }
}

impl std::error::Error for FetchError {}

impl FetchError {
    /// Create transport error from reqwest error.
    ///
    /// The URL is stripped so query strings never end up in logs.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        match e.status() {
            Some(s) => Self::Status {
                status: s.as_u16(),
                context: "Failed to fetch studies".to_string(),
            },
            None => Self::Transport {
                message: e.without_url().to_string(),
            },
        }
    }

    /// HTTP status carried by the error, if the registry answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport { .. } | Self::Decode { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_err(status: u16) -> FetchError {
        FetchError::Status {
            status,
            context: "Failed to fetch studies".to_string(),
        }
    }

    #[test]
    fn status_is_exposed() {
        assert_eq!(status_err(500).status(), Some(500));
        assert_eq!(status_err(404).status(), Some(404));
    }

    #[test]
    fn transport_has_no_status() {
        let err = FetchError::Transport {
            message: "connection refused".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn decode_has_no_status() {
        let err = FetchError::Decode {
            message: "expected value".to_string(),
        };
        assert_eq!(err.status(), None);
    }

    #[test]
    fn display_status() {
        assert_eq!(
            format!("{}", status_err(500)),
            "Failed to fetch studies: HTTP 500"
        );
    }

    #[test]
    fn display_transport() {
        let err = FetchError::Transport {
            message: "timeout".to_string(),
        };
        assert_eq!(format!("{err}"), "HTTP error: timeout");
    }

    #[test]
    fn display_decode() {
        let err = FetchError::Decode {
            message: "expected value at line 1".to_string(),
        };
        assert!(format!("{err}").contains("invalid registry response"));
    }
}
