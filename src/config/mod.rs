use anyhow::{bail, Context};
use serde::Deserialize;
use std::env;

// Главная структура конфигурации - контейнер для всех настроек
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub app: AppConfig,
    pub backend: BackendConfig,
    pub board: BoardConfig,
}

// Настройки приложения
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub environment: String,
    pub rust_log: String,
}

// Адрес сервиса бронирования
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    pub base_url: String,
}

// Схема зала
#[derive(Debug, Clone, Deserialize)]
pub struct BoardConfig {
    /// Общее число мест, фиксируется при старте.
    pub seat_count: u32,
    /// Сколько мест выводить в одном ряду.
    pub grid_columns: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Собирает конфигурацию из произвольного источника переменных.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let seat_count = positive(&var("SEAT_COUNT", "300"), "SEAT_COUNT")?;
        let grid_columns = positive(&var("GRID_COLUMNS", "20"), "GRID_COLUMNS")?;

        Ok(Config {
            app: AppConfig {
                environment: var("ENVIRONMENT", "development"),
                rust_log: var("RUST_LOG", "seat_booking=info"),
            },
            backend: BackendConfig {
                base_url: var("BOOKING_API_URL", "http://localhost:5000"),
            },
            board: BoardConfig {
                seat_count,
                grid_columns,
            },
        })
    }
}

fn positive(raw: &str, key: &str) -> anyhow::Result<u32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("{} must be a valid number, got {:?}", key, raw))?;
    if value == 0 {
        bail!("{} must be greater than zero", key);
    }
    Ok(value)
}
