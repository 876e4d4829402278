use thiserror::Error;

/// Ошибки попытки бронирования.
///
/// `Display` каждого варианта - это ровно тот текст, который видит пользователь
/// в строке статуса.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// Не заполнено имя / телефон или не выбрано ни одного места.
    #[error("Please enter Name, Mobile and select at least one seat.")]
    InputInvalid,
    /// Запрос дошёл до сервера, но тот ответил `ok: false`.
    #[error("Error: {0}")]
    BackendRejected(String),
    /// Запрос не завершился: сеть недоступна, ответ не JSON и т.п.
    #[error("Network error: {0}")]
    Transport(String),
    /// Предыдущая попытка ещё не завершилась.
    #[error("A booking is already being submitted.")]
    Busy,
}

impl From<reqwest::Error> for BookingError {
    fn from(e: reqwest::Error) -> Self {
        BookingError::Transport(e.to_string())
    }
}
