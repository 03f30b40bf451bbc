//! Error handling and exit codes.

use pibench_core::constants::exit_codes;
use pibench_core::kernel::PiError;

/// Map a run error to its exit code.
pub fn handle_error(err: &PiError) -> i32 {
    match err {
        PiError::Config(_) => exit_codes::ERROR_CONFIG,
        PiError::Mismatch => exit_codes::ERROR_MISMATCH,
        PiError::WorkerLost { .. }
        | PiError::WorkerFailed { .. }
        | PiError::Collective(_)
        | PiError::PrecisionMismatch { .. }
        | PiError::Coverage(_) => exit_codes::ERROR_WORKER,
        PiError::Calculation(_) => exit_codes::ERROR_GENERIC,
    }
}

/// Exit code for an application error, looking through any added context.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.chain()
        .find_map(|cause| cause.downcast_ref::<PiError>())
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn error_codes() {
        assert_eq!(handle_error(&PiError::Mismatch), 3);
        assert_eq!(handle_error(&PiError::Config("bad".into())), 4);
        assert_eq!(handle_error(&PiError::WorkerLost { worker: 2 }), 5);
        assert_eq!(
            handle_error(&PiError::WorkerFailed {
                worker: 0,
                reason: "panicked".into()
            }),
            5
        );
        assert_eq!(handle_error(&PiError::Collective("closed".into())), 5);
        assert_eq!(handle_error(&PiError::Calculation("none".into())), 1);
    }

    #[test]
    fn exit_code_sees_through_context() {
        let err = Err::<(), _>(PiError::WorkerLost { worker: 1 })
            .context("Distributed run failed")
            .unwrap_err();
        assert_eq!(exit_code(&err), 5);
    }

    #[test]
    fn exit_code_for_foreign_error() {
        let err = anyhow::anyhow!("disk on fire");
        assert_eq!(exit_code(&err), exit_codes::ERROR_GENERIC);
    }
}
