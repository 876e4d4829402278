use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use validator::Validate;

/// Контактные данные из формы бронирования.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactInfo {
    /// Необязательный код пользователя, может быть пустой строкой.
    pub user_code: String,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub mobile: String,
}

impl ContactInfo {
    pub fn new(
        user_code: impl Into<String>,
        name: impl Into<String>,
        mobile: impl Into<String>,
    ) -> Self {
        Self {
            user_code: user_code.into(),
            name: name.into(),
            mobile: mobile.into(),
        }
    }

    /// Копия с обрезанными пробелами во всех полях.
    pub fn trimmed(&self) -> Self {
        Self {
            user_code: self.user_code.trim().to_string(),
            name: self.name.trim().to_string(),
            mobile: self.mobile.trim().to_string(),
        }
    }
}

/// Тело `POST /submit`: `{ user_code, name, mobile, seats }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct BookingRequest {
    #[serde(flatten)]
    #[validate(nested)]
    pub contact: ContactInfo,
    #[serde(rename = "seats")]
    #[validate(length(min = 1))]
    pub seat_ids: Vec<u32>,
}

/// Ответ `POST /submit`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitResponse {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Ответ `GET /booked-seats`.
///
/// Бэкенд при собственной ошибке отвечает `{"booked": [], "error": "..."}`,
/// поэтому оба поля необязательные. Элементы списка разбираются по одному:
/// мусорный элемент не должен обнулять весь список.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookedSeatsResponse {
    #[serde(default)]
    pub booked: Option<Vec<Value>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BookedSeatsResponse {
    /// Целочисленные номера из `booked`, остальные элементы пропускаются.
    pub fn seat_ids(&self) -> Vec<i64> {
        let Some(booked) = &self.booked else {
            return Vec::new();
        };
        booked
            .iter()
            .filter_map(|entry| match entry.as_i64() {
                Some(id) => Some(id),
                None => {
                    warn!("Ignoring non-integer booked seat entry {}", entry);
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serializes_to_flat_wire_shape() {
        let request = BookingRequest {
            contact: ContactInfo::new("", "Ann", "555-0100"),
            seat_ids: vec![2, 5],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "user_code": "",
                "name": "Ann",
                "mobile": "555-0100",
                "seats": [2, 5]
            })
        );
    }

    #[test]
    fn validation_rejects_blank_fields_and_empty_selection() {
        let valid = BookingRequest {
            contact: ContactInfo::new("", "Ann", "555"),
            seat_ids: vec![1],
        };
        assert!(valid.validate().is_ok());

        let mut no_name = valid.clone();
        no_name.contact.name.clear();
        assert!(no_name.validate().is_err());

        let mut no_mobile = valid.clone();
        no_mobile.contact.mobile.clear();
        assert!(no_mobile.validate().is_err());

        let mut no_seats = valid;
        no_seats.seat_ids.clear();
        assert!(no_seats.validate().is_err());
    }

    #[test]
    fn booked_response_tolerates_missing_and_null_list() {
        let missing: BookedSeatsResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.seat_ids(), Vec::<i64>::new());

        let null: BookedSeatsResponse = serde_json::from_str(r#"{"booked": null}"#).unwrap();
        assert_eq!(null.seat_ids(), Vec::<i64>::new());

        let with_error: BookedSeatsResponse =
            serde_json::from_str(r#"{"booked": [], "error": "sheet unavailable"}"#).unwrap();
        assert_eq!(with_error.seat_ids(), Vec::<i64>::new());
        assert_eq!(with_error.error.as_deref(), Some("sheet unavailable"));
    }

    #[test]
    fn booked_response_keeps_integers_and_skips_other_entries() {
        let mixed: BookedSeatsResponse =
            serde_json::from_str(r#"{"booked": [3, "7", null, 2.5, -1, 12]}"#).unwrap();
        assert_eq!(mixed.seat_ids(), vec![3, -1, 12]);
    }

    #[test]
    fn trimmed_strips_every_field() {
        let contact = ContactInfo::new("  A1 ", " Ann\t", "\n555 ");
        assert_eq!(contact.trimmed(), ContactInfo::new("A1", "Ann", "555"));
    }
}
