pub mod seat;
pub mod booking;

pub use seat::{Seat, SeatState, SeatView};
pub use booking::{BookedSeatsResponse, BookingRequest, ContactInfo, SubmitResponse};
