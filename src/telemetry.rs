//! Telemetry helpers for hosts embedding `bullet-chart-rs`.
//!
//! This module keeps tracing setup explicit and opt-in.
//! Hosts can either call `init_default_tracing` or wire their own
//! `tracing` subscriber and filters.

use tracing::error;

use crate::error::BulletResult;

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

/// Runs `f` and logs any error it returns before handing it back unchanged.
///
/// The error is never swallowed or rewrapped: callers observe exactly what
/// `f` produced.
pub fn log_errors<T>(scope: &str, f: impl FnOnce() -> BulletResult<T>) -> BulletResult<T> {
    f().inspect_err(|err| {
        error!(scope, error = %err, "bullet chart pass failed");
    })
}

#[cfg(test)]
mod tests {
    use super::log_errors;
    use crate::error::BulletError;

    #[test]
    fn log_errors_returns_error_unchanged() {
        let result: Result<(), BulletError> =
            log_errors("test", || Err(BulletError::InvalidData("boom".to_owned())));
        match result {
            Err(BulletError::InvalidData(message)) => assert_eq!(message, "boom"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn log_errors_passes_values_through() {
        let value = log_errors("test", || Ok(7)).expect("ok value");
        assert_eq!(value, 7);
    }
}
