//! Error classification of an upstream reply
//!
//! Runs before any capability-specific extraction. The order matters:
//! transport problems win over anything the body says, and the
//! 404/"Service not found." pair is carved out of the general domain-status
//! passthrough.

use crate::error::{NormalizeError, NormalizeResult};
use crate::upstream::{TransportResult, UpstreamEnvelope};

const HTTP_OK: u16 = 200;
const DOMAIN_OK: i64 = 200;
const DOMAIN_NOT_FOUND: i64 = 404;

/// Reason the vendor gives when the requested service path does not exist.
/// Literal match only: this is the one reason we know to be our own defect.
pub const SERVICE_NOT_FOUND_REASON: &str = "Service not found.";

/// Classify a transport outcome.
///
/// Returns the parsed envelope only when both the HTTP status and the
/// domain status are 200.
pub fn classify(outcome: TransportResult) -> NormalizeResult<UpstreamEnvelope> {
    let reply = match outcome {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "Upstream call failed");
            return Err(NormalizeError::Transport(e.to_string()));
        }
    };

    if reply.status != HTTP_OK {
        tracing::error!(status = reply.status, "Upstream returned non-200 HTTP status");
        return Err(NormalizeError::TransportStatus(reply.status));
    }

    let envelope: UpstreamEnvelope = serde_json::from_str(&reply.body).map_err(|e| {
        tracing::error!(error = %e, "Upstream body is not a JSON object");
        NormalizeError::MalformedResponse(format!("invalid body: {}", e))
    })?;

    let status = envelope.domain_status().ok_or_else(|| {
        tracing::error!(status = ?envelope.status, "Upstream body has no usable status");
        NormalizeError::MalformedResponse("missing domain status".to_string())
    })?;

    if status == DOMAIN_OK {
        return Ok(envelope);
    }

    let reason = envelope.reason_text();
    if status == DOMAIN_NOT_FOUND && reason.as_deref() == Some(SERVICE_NOT_FOUND_REASON) {
        tracing::error!("Invalid service provided to upstream");
        return Err(NormalizeError::ServiceNotFound);
    }

    tracing::warn!(status, reason = ?reason, "Non-200 domain status from upstream");
    Err(NormalizeError::Upstream { status, reason })
}
