pub mod config;
pub mod error;
pub mod models;
pub mod backend_client;
pub mod services;
pub mod render;

pub use backend_client::{BookingApiClient, BookingBackend};
pub use error::BookingError;
pub use services::{BookingSubmitter, SeatBoard, StatusTone, SubmissionStatus};
