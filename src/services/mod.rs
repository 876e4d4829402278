pub mod board;
pub mod submitter;

pub use board::SeatBoard;
pub use submitter::{BookingSubmitter, StatusTone, SubmissionStatus};
