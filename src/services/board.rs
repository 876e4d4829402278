//! Схема зала: локальное состояние мест и выбор пользователя.
//!
//! `SeatBoard` - единственный владелец состояния мест в сессии. Переходы:
//! `Free <-> Selected` по клику, `Selected -> Booked` после успешной отправки.
//! Из `Booked` выхода нет.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::{
    backend_client::BookingBackend,
    models::{Seat, SeatState, SeatView},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatBoard {
    /// Места по порядку, `seats[i].id == i + 1`.
    seats: Vec<Seat>,
    /// Номера мест в состоянии `Selected`.
    selection: BTreeSet<u32>,
}

impl SeatBoard {
    /// Зал из `seat_count` свободных мест.
    pub fn new(seat_count: u32) -> Self {
        let seats = (1..=seat_count)
            .map(|id| Seat {
                id,
                state: SeatState::Free,
            })
            .collect();
        Self {
            seats,
            selection: BTreeSet::new(),
        }
    }

    /// Зал, в котором места из `booked` уже заняты.
    ///
    /// Номера вне `1..=seat_count` пропускаются.
    pub fn with_booked(seat_count: u32, booked: &[i64]) -> Self {
        let mut board = Self::new(seat_count);
        for &raw in booked {
            match u32::try_from(raw).ok().and_then(|id| board.index_of(id)) {
                Some(idx) => board.seats[idx].state = SeatState::Booked,
                None => warn!("Ignoring booked seat {} outside 1..={}", raw, seat_count),
            }
        }
        board
    }

    /// Загружает занятые места с бэкенда и строит зал.
    ///
    /// Если загрузка не удалась, считаем, что занятых мест нет: отрисовка не
    /// блокируется, а окончательную проверку делает бэкенд при отправке.
    pub async fn initialize<B: BookingBackend>(seat_count: u32, backend: &B) -> Self {
        let booked = match backend.booked_seats().await {
            Ok(booked) => booked,
            Err(e) => {
                warn!("Failed to fetch booked seats, assuming none are booked: {}", e);
                Vec::new()
            }
        };

        let board = Self::with_booked(seat_count, &booked);
        info!(
            "Seat board ready: {} seats, {} booked",
            board.seat_count(),
            board.booked_ids().len()
        );
        board
    }

    pub fn seat_count(&self) -> u32 {
        self.seats.len() as u32
    }

    pub fn seat(&self, id: u32) -> Option<Seat> {
        self.index_of(id).map(|idx| self.seats[idx])
    }

    pub fn state(&self, id: u32) -> Option<SeatState> {
        self.seat(id).map(|seat| seat.state)
    }

    /// Переключает `Free <-> Selected` для одного места.
    ///
    /// Возвращает новое состояние, либо `None`, если место занято или такого
    /// номера нет.
    pub fn toggle_seat(&mut self, id: u32) -> Option<SeatState> {
        let idx = self.index_of(id)?;
        let seat = &mut self.seats[idx];

        let next = match seat.state {
            SeatState::Booked => {
                debug!("Seat {} is booked, toggle ignored", id);
                return None;
            }
            SeatState::Free => {
                self.selection.insert(id);
                SeatState::Selected
            }
            SeatState::Selected => {
                self.selection.remove(&id);
                SeatState::Free
            }
        };
        seat.state = next;
        Some(next)
    }

    /// Выбранные места по возрастанию номера.
    pub fn current_selection(&self) -> Vec<u32> {
        self.selection.iter().copied().collect()
    }

    /// Переводит выбранные места из `ids` в `Booked`.
    ///
    /// Места, которые сейчас не `Selected`, не трогаем. Возвращает число
    /// переведённых мест.
    pub fn mark_booked(&mut self, ids: &[u32]) -> usize {
        let mut frozen = 0;
        for &id in ids {
            if !self.selection.remove(&id) {
                continue;
            }
            if let Some(idx) = self.index_of(id) {
                self.seats[idx].state = SeatState::Booked;
                frozen += 1;
            }
        }
        debug!("Marked {} of {} submitted seats as booked", frozen, ids.len());
        frozen
    }

    pub fn booked_ids(&self) -> Vec<u32> {
        self.seats
            .iter()
            .filter(|seat| seat.is_booked())
            .map(|seat| seat.id)
            .collect()
    }

    /// Один элемент на место, по возрастанию номера.
    pub fn render(&self) -> Vec<SeatView> {
        self.seats.iter().copied().map(SeatView::from).collect()
    }

    fn index_of(&self, id: u32) -> Option<usize> {
        let idx = (id as usize).checked_sub(1)?;
        (idx < self.seats.len()).then_some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn booked_ids_become_non_interactive() {
        let board = SeatBoard::with_booked(10, &[3, 7]);
        let views = board.render();

        assert_eq!(views.len(), 10);
        assert_eq!(
            views.iter().map(|v| v.id).collect::<Vec<_>>(),
            (1..=10).collect::<Vec<_>>()
        );
        for view in views {
            assert_eq!(view.interactive, view.id != 3 && view.id != 7, "seat {}", view.id);
        }
    }

    #[test]
    fn out_of_range_booked_ids_are_ignored() {
        let board = SeatBoard::with_booked(5, &[0, -4, 6, 99, 2, 2]);
        assert_eq!(board.booked_ids(), vec![2]);
        assert_eq!(board.seat_count(), 5);
    }

    #[test]
    fn toggle_flips_only_the_target_seat() {
        let mut board = SeatBoard::new(4);
        assert_eq!(board.toggle_seat(2), Some(SeatState::Selected));
        assert_eq!(board.toggle_seat(4), Some(SeatState::Selected));
        assert_eq!(board.current_selection(), vec![2, 4]);
        assert_eq!(board.state(1), Some(SeatState::Free));
        assert_eq!(board.state(3), Some(SeatState::Free));

        assert_eq!(board.toggle_seat(2), Some(SeatState::Free));
        assert_eq!(board.current_selection(), vec![4]);
    }

    #[test]
    fn toggle_ignores_booked_and_unknown_seats() {
        let mut board = SeatBoard::with_booked(3, &[1]);
        assert_eq!(board.toggle_seat(1), None);
        assert_eq!(board.toggle_seat(0), None);
        assert_eq!(board.toggle_seat(4), None);
        assert_eq!(board.state(1), Some(SeatState::Booked));
        assert!(board.current_selection().is_empty());
    }

    #[test]
    fn mark_booked_only_freezes_selected_seats() {
        let mut board = SeatBoard::new(6);
        board.toggle_seat(2);
        board.toggle_seat(5);
        board.toggle_seat(6);

        let frozen = board.mark_booked(&[2, 3, 5, 42]);

        assert_eq!(frozen, 2);
        assert_eq!(board.state(2), Some(SeatState::Booked));
        assert_eq!(board.state(5), Some(SeatState::Booked));
        assert_eq!(board.state(3), Some(SeatState::Free));
        assert_eq!(board.current_selection(), vec![6]);
        assert_eq!(board.toggle_seat(2), None);
    }

    #[test]
    fn selection_is_ascending_regardless_of_click_order() {
        let mut board = SeatBoard::new(10);
        for id in [9, 1, 5] {
            board.toggle_seat(id);
        }
        assert_eq!(board.current_selection(), vec![1, 5, 9]);
    }

    fn assert_selection_matches_states(board: &SeatBoard) {
        let selected: Vec<u32> = board
            .render()
            .into_iter()
            .filter(|v| v.state == SeatState::Selected)
            .map(|v| v.id)
            .collect();
        assert_eq!(selected, board.current_selection());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 128,
            .. ProptestConfig::default()
        })]

        #[test]
        fn double_toggle_restores_selection(
            booked in proptest::collection::vec(1i64..=20, 0..8),
            clicks in proptest::collection::vec(1u32..=20, 0..30),
            target in 1u32..=20,
        ) {
            let mut board = SeatBoard::with_booked(20, &booked);
            for id in clicks {
                board.toggle_seat(id);
            }
            let before = board.clone();

            board.toggle_seat(target);
            board.toggle_seat(target);

            prop_assert_eq!(board, before);
        }

        #[test]
        fn booked_seats_never_leave_booked(
            booked in proptest::collection::vec(1i64..=20, 1..8),
            clicks in proptest::collection::vec(1u32..=20, 0..40),
        ) {
            let mut board = SeatBoard::with_booked(20, &booked);
            for id in clicks {
                board.toggle_seat(id);
                assert_selection_matches_states(&board);
            }
            for id in &booked {
                prop_assert_eq!(board.state(*id as u32), Some(SeatState::Booked));
                prop_assert!(!board.current_selection().contains(&(*id as u32)));
            }
        }

        #[test]
        fn mark_booked_affects_exactly_the_selected_submitted_ids(
            clicks in proptest::collection::vec(1u32..=15, 0..20),
            submitted in proptest::collection::vec(1u32..=15, 0..10),
        ) {
            let mut board = SeatBoard::new(15);
            for id in clicks {
                board.toggle_seat(id);
            }
            let before = board.clone();

            board.mark_booked(&submitted);

            for id in 1..=15u32 {
                let was_selected = before.state(id) == Some(SeatState::Selected);
                let expected = if was_selected && submitted.contains(&id) {
                    SeatState::Booked
                } else {
                    before.state(id).unwrap()
                };
                prop_assert_eq!(board.state(id), Some(expected));
            }
            assert_selection_matches_states(&board);
        }
    }
}
