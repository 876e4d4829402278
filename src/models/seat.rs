use serde::{Deserialize, Serialize};

/// Состояние одного места на схеме зала.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeatState {
    Free,
    Selected,
    /// Терминальное состояние в пределах сессии.
    Booked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub id: u32,
    pub state: SeatState,
}

impl Seat {
    pub fn is_booked(&self) -> bool {
        self.state == SeatState::Booked
    }
}

/// Элемент схемы для отрисовки: одно место и можно ли на него нажать.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SeatView {
    pub id: u32,
    pub state: SeatState,
    pub interactive: bool,
}

impl From<Seat> for SeatView {
    fn from(seat: Seat) -> Self {
        SeatView {
            id: seat.id,
            state: seat.state,
            interactive: !seat.is_booked(),
        }
    }
}
