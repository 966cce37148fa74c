//! Error types for message delivery.

use thiserror::Error;

/// A single failed delivery attempt against one candidate endpoint.
///
/// Transient by design: the prober records the cause and moves on to the
/// next candidate, keeping only the last one for the exhaustion error.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The endpoint answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The request itself failed (connection refused, DNS, TLS).
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// The attempt exceeded its deadline.
    #[error("timed out after {timeout_secs}s waiting for {url}")]
    Timeout { url: String, timeout_secs: u64 },
}

/// Errors from probing the backend's candidate endpoints.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Every candidate endpoint failed for this call. Carries the cause
    /// recorded from the last candidate attempted.
    #[error("bot backend unreachable: {0}")]
    BackendUnreachable(TransportError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = TransportError::Status {
            status: 404,
            url: "http://localhost:8075/api/bots/b1/chat".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 from http://localhost:8075/api/bots/b1/chat"
        );
    }

    #[test]
    fn test_timeout_error_display() {
        let err = TransportError::Timeout {
            url: "http://localhost:8075/api/bots/b1/chat".to_string(),
            timeout_secs: 10,
        };
        assert!(err.to_string().contains("timed out after 10s"));
    }

    #[test]
    fn test_probe_error_carries_last_cause() {
        let err = ProbeError::BackendUnreachable(TransportError::Network {
            url: "http://localhost:8075".to_string(),
            message: "connection refused".to_string(),
        });
        let msg = err.to_string();
        assert!(msg.contains("unreachable"));
        assert!(msg.contains("connection refused"));
    }
}
