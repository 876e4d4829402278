//! backend_client.rs
//!
//! Сетевой шов между виджетом и сервисом бронирования.
//!
//! 1.  **BookingBackend**: трейт с двумя операциями бэкенда - получить уже занятые
//!     места и отправить бронирование. Состояние виджета зависит только от трейта,
//!     поэтому его можно проверять без сети.
//! 2.  **BookingApiClient**: реализация поверх `reqwest` для `GET /booked-seats`
//!     и `POST /submit`.
//!
//! Ни повторов, ни таймаутов здесь нет: каждая ошибка возвращается вызывающему
//! как есть, повтор - только ручной.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::{
    config::BackendConfig,
    error::BookingError,
    models::{BookedSeatsResponse, BookingRequest, SubmitResponse},
};

/// Операции сервиса бронирования, которыми пользуется виджет.
pub trait BookingBackend {
    /// Номера уже занятых мест. Нецелые элементы списка отбрасываются здесь,
    /// номера за пределами зала фильтрует вызывающий.
    fn booked_seats(&self) -> impl Future<Output = Result<Vec<i64>, BookingError>> + Send;

    /// Отправляет одно бронирование. `Ok` означает, что ответ получен и разобран,
    /// независимо от значения `ok` внутри него. Ошибка всегда
    /// `BookingError::Transport`.
    fn submit_booking(
        &self,
        request: &BookingRequest,
    ) -> impl Future<Output = Result<SubmitResponse, BookingError>> + Send;
}

/// HTTP-клиент сервиса бронирования.
#[derive(Debug, Clone)]
pub struct BookingApiClient {
    /// Базовый URL бэкенда без завершающего `/`.
    base_url: String,
    /// Асинхронный HTTP-клиент.
    http_client: reqwest::Client,
}

impl BookingApiClient {
    pub fn new(base_url: impl Into<String>) -> reqwest::Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let http_client = reqwest::Client::builder().build()?;
        Ok(Self {
            base_url,
            http_client,
        })
    }

    /// Создает клиент на основе настроек приложения.
    pub fn from_config(config: &BackendConfig) -> reqwest::Result<Self> {
        Self::new(config.base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl BookingBackend for BookingApiClient {
    async fn booked_seats(&self) -> Result<Vec<i64>, BookingError> {
        let url = format!("{}/booked-seats", self.base_url);
        debug!("Fetching booked seats from {}", url);

        let body = self
            .http_client
            .get(&url)
            .send()
            .await?
            .json::<BookedSeatsResponse>()
            .await?;

        // Бэкенд сообщает о своих сбоях в поле `error`, но всё равно отдает список.
        if let Some(err) = &body.error {
            warn!("Backend reported an error while listing booked seats: {}", err);
        }

        let booked = body.seat_ids();
        info!("Backend reports {} booked seats", booked.len());
        Ok(booked)
    }

    async fn submit_booking(&self, request: &BookingRequest) -> Result<SubmitResponse, BookingError> {
        let url = format!("{}/submit", self.base_url);
        info!("Submitting booking for seats {:?}", request.seat_ids);

        // Статус ответа не проверяем: отказы приходят как 400/500 с JSON-телом.
        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();
        let body = response.json::<SubmitResponse>().await?;

        debug!("Submit answered with HTTP {} ok={}", status, body.ok);
        Ok(body)
    }
}
