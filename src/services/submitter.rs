//! submitter.rs
//!
//! Одна попытка бронирования: проверка формы, отправка и применение результата
//! к схеме зала.
//!
//! Попытка разбита на две фазы, чтобы во время ожидания ответа пользователь мог
//! продолжать кликать по местам:
//! 1.  **begin**: сбрасывает статус, обрезает поля, валидирует и переводит в
//!     `Pending`. Сети не касается.
//! 2.  **finish**: принимает результат запроса и переводит в `Success` или
//!     `Failed`. При успехе замораживает ровно отправленные места.
//!
//! Повторов нет: любая ошибка завершает попытку, повтор - новым `submit`.

use std::fmt;

use tracing::{error, info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::{
    backend_client::BookingBackend,
    error::BookingError,
    models::{BookingRequest, ContactInfo, SubmitResponse},
    services::SeatBoard,
};

/// Текст, который показывается после успешной отправки.
pub const SUCCESS_MESSAGE: &str = "Booking saved to Google Sheet.";

/// Подставляется, если бэкенд отказал без `message`.
const UNKNOWN_REJECTION: &str = "unknown error";

/// Состояние формы отправки.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    /// Форма не прошла проверку, запрос не отправлялся.
    Invalid(BookingError),
    Pending,
    Success,
    /// Бэкенд отказал или запрос не дошёл.
    Failed(BookingError),
}

/// Цвет строки статуса.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Neutral,
    /// Зелёный.
    Positive,
    /// Малиновый (crimson).
    Negative,
}

impl SubmissionStatus {
    /// Текст для строки статуса, пустой в `Idle`.
    pub fn message(&self) -> String {
        match self {
            SubmissionStatus::Idle => String::new(),
            SubmissionStatus::Pending => "Submitting booking...".to_string(),
            SubmissionStatus::Success => SUCCESS_MESSAGE.to_string(),
            SubmissionStatus::Invalid(e) | SubmissionStatus::Failed(e) => e.to_string(),
        }
    }

    pub fn tone(&self) -> StatusTone {
        match self {
            SubmissionStatus::Idle | SubmissionStatus::Pending => StatusTone::Neutral,
            SubmissionStatus::Success => StatusTone::Positive,
            SubmissionStatus::Invalid(_) | SubmissionStatus::Failed(_) => StatusTone::Negative,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionStatus::Pending)
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

/// Исполнитель попыток бронирования. Одновременно не больше одной попытки.
#[derive(Debug, Default)]
pub struct BookingSubmitter {
    status: SubmissionStatus,
    /// Идентификатор текущей попытки для логов.
    attempt: Option<Uuid>,
}

impl BookingSubmitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Кнопка отправки "занята", пока ждём ответ.
    pub fn is_busy(&self) -> bool {
        self.status.is_pending()
    }

    /// Первая фаза попытки: проверка формы и подготовка запроса.
    ///
    /// При `Busy` статус не меняется: предыдущая попытка ещё в полёте.
    pub fn begin(
        &mut self,
        board: &SeatBoard,
        contact: &ContactInfo,
    ) -> Result<BookingRequest, BookingError> {
        if self.is_busy() {
            warn!("Submit ignored: attempt {:?} is still pending", self.attempt);
            return Err(BookingError::Busy);
        }

        self.status = SubmissionStatus::Idle;

        let request = BookingRequest {
            contact: contact.trimmed(),
            seat_ids: board.current_selection(),
        };

        if let Err(e) = request.validate() {
            info!("Booking form rejected: {}", e);
            self.status = SubmissionStatus::Invalid(BookingError::InputInvalid);
            return Err(BookingError::InputInvalid);
        }

        let attempt = Uuid::new_v4();
        info!(
            "Booking attempt {} started: seats={:?}",
            attempt, request.seat_ids
        );
        self.attempt = Some(attempt);
        self.status = SubmissionStatus::Pending;
        Ok(request)
    }

    /// Вторая фаза: применяет результат запроса, отправленного по `request`.
    pub fn finish(
        &mut self,
        board: &mut SeatBoard,
        request: &BookingRequest,
        outcome: Result<SubmitResponse, BookingError>,
    ) -> &SubmissionStatus {
        let attempt = self.attempt.take();

        self.status = match outcome {
            Ok(SubmitResponse { ok: true, .. }) => {
                let frozen = board.mark_booked(&request.seat_ids);
                info!(
                    "Booking attempt {:?} succeeded, {} seats booked",
                    attempt, frozen
                );
                SubmissionStatus::Success
            }
            Ok(SubmitResponse { ok: false, message }) => {
                let message = message.unwrap_or_else(|| UNKNOWN_REJECTION.to_string());
                warn!("Booking attempt {:?} rejected by backend: {}", attempt, message);
                SubmissionStatus::Failed(BookingError::BackendRejected(message))
            }
            Err(e) => {
                error!("Booking attempt {:?} failed: {}", attempt, e);
                SubmissionStatus::Failed(e)
            }
        };
        &self.status
    }

    /// Полная попытка: `begin`, запрос к бэкенду, `finish`.
    pub async fn submit<B: BookingBackend>(
        &mut self,
        board: &mut SeatBoard,
        backend: &B,
        contact: &ContactInfo,
    ) -> &SubmissionStatus {
        let request = match self.begin(board, contact) {
            Ok(request) => request,
            Err(_) => return &self.status,
        };

        let outcome = backend.submit_booking(&request).await;
        self.finish(board, &request, outcome)
    }
}
