//! Response normalization
//!
//! Pure, synchronous mapping from a transport outcome to a client payload:
//! [`classify`] decides whether the reply is an error, and the rules in
//! [`extract`] build the typed payload when it is not.

pub mod classify;
pub mod decode;
pub mod extract;

pub use classify::classify;
pub use decode::{decode_boolean, decode_optional_number, decode_string};

use crate::error::NormalizeResult;
use crate::upstream::{TransportResult, UpstreamEnvelope};

/// Classify `outcome`, then apply `rule` to a successful envelope
pub fn normalize<T, F>(outcome: TransportResult, rule: F) -> NormalizeResult<T>
where
    F: FnOnce(&UpstreamEnvelope) -> NormalizeResult<T>,
{
    let envelope = classify(outcome)?;
    rule(&envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NormalizeError;
    use crate::models::EngineStatus;
    use crate::upstream::{TransportError, UpstreamReply};
    use serde_json::json;

    #[test]
    fn test_rule_not_applied_on_error() {
        let body = json!({"status": "404", "reason": "Vehicle id: 9 not found."});
        let result = normalize(Ok(UpstreamReply::ok_json(&body)), |_| -> NormalizeResult<()> {
            panic!("rule must not run")
        });
        assert_eq!(result.unwrap_err().status_code(), 404);
    }

    #[test]
    fn test_engine_success_path() {
        let body = json!({"service": "actionEngine", "status": "200", "actionResult": {"status": "EXECUTED"}});
        let result = normalize(Ok(UpstreamReply::ok_json(&body)), extract::engine_action_result)
            .unwrap();
        assert_eq!(result.status, EngineStatus::Success);
    }

    #[test]
    fn test_transport_error_short_circuits() {
        let err = normalize(
            Err(TransportError::Connection("refused".to_string())),
            extract::fuel_percent,
        )
        .unwrap_err();
        assert!(matches!(err, NormalizeError::Transport(_)));
    }
}
