use gloo::timers::future::TimeoutFuture;
use shared::SubmissionError;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// How long the confirmation stays on the button before the form resets
pub const SUCCESS_DISPLAY_MS: u32 = 3_000;

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionStatus {
    Idle,
    Sending,
    Sent,
    Failed(SubmissionError),
}

impl SubmissionStatus {
    pub fn is_sending(&self) -> bool {
        matches!(self, SubmissionStatus::Sending)
    }

    pub fn is_sent(&self) -> bool {
        matches!(self, SubmissionStatus::Sent)
    }

    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            SubmissionStatus::Failed(error) => Some(error.user_message()),
            _ => None,
        }
    }

    /// Invalid phone is shown on the field itself
    pub fn phone_invalid(&self) -> bool {
        matches!(self, SubmissionStatus::Failed(SubmissionError::InvalidPhone))
    }

    pub fn area_invalid(&self) -> bool {
        matches!(self, SubmissionStatus::Failed(SubmissionError::InvalidArea))
    }
}

#[derive(Clone)]
pub struct SubmissionActions {
    pub start: Callback<()>,
    pub finish: Callback<Result<(), SubmissionError>>,
}

pub struct UseSubmissionResult {
    pub status: SubmissionStatus,
    pub actions: SubmissionActions,
}

/// Tracks one form's send cycle. `on_reset` fires when the confirmation
/// has been shown long enough and the form should be cleared.
#[hook]
pub fn use_submission(on_reset: Callback<()>) -> UseSubmissionResult {
    let status = use_state(|| SubmissionStatus::Idle);

    let start = {
        let status = status.clone();
        use_callback((), move |_: (), _| status.set(SubmissionStatus::Sending))
    };

    let finish = {
        let status = status.clone();
        use_callback(on_reset, move |result: Result<(), SubmissionError>, on_reset| {
            match result {
                Ok(()) => {
                    status.set(SubmissionStatus::Sent);
                    let status = status.clone();
                    let on_reset = on_reset.clone();
                    spawn_local(async move {
                        TimeoutFuture::new(SUCCESS_DISPLAY_MS).await;
                        status.set(SubmissionStatus::Idle);
                        on_reset.emit(());
                    });
                }
                Err(error) => {
                    log::info!("submission not completed: {}", error);
                    status.set(SubmissionStatus::Failed(error));
                }
            }
        })
    };

    UseSubmissionResult {
        status: (*status).clone(),
        actions: SubmissionActions { start, finish },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_queries() {
        assert!(SubmissionStatus::Sending.is_sending());
        assert!(SubmissionStatus::Sent.is_sent());
        assert_eq!(SubmissionStatus::Idle.error_message(), None);

        let failed = SubmissionStatus::Failed(SubmissionError::InvalidPhone);
        assert!(failed.phone_invalid());
        assert_eq!(
            failed.error_message(),
            Some("Пожалуйста, введите корректный номер телефона")
        );
    }
}
