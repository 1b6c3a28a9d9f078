//! Passenger and order records as the booking API exchanges them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{OrderId, PassengerId, PnrNumber, UserId};

/// A traveller saved under a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Passenger {
    /// Absent until the server has stored the passenger.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<PassengerId>,
    /// Owning account.
    pub user_id: UserId,
    /// Full name as printed on the identity document.
    pub name: String,
    /// Fare category (adult, child, student, ...), as the server labels it.
    #[serde(rename = "type", default)]
    pub passenger_type: String,
    /// Identity document kind.
    #[serde(default)]
    pub id_card_type: String,
    /// Identity document number.
    #[serde(default)]
    pub id_card_number: String,
    /// Contact phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl Passenger {
    /// Creates an unsaved passenger with the required fields.
    pub fn new(user_id: UserId, name: impl Into<String>) -> Self {
        Self {
            id: None,
            user_id,
            name: name.into(),
            passenger_type: String::new(),
            id_card_type: String::new(),
            id_card_number: String::new(),
            phone: None,
        }
    }
}

/// A booked order.
///
/// Only the fields the client acts on are typed; everything else the server
/// sends is kept in [`Order::extra`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order identifier.
    pub id: OrderId,
    /// Owning account.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// PNR locator, present once the booking is confirmed upstream.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnr_number: Option<PnrNumber>,
    /// Server-side order status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Total price.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passenger_uses_camel_case_and_type_key() {
        let mut p = Passenger::new(UserId(7), "张三");
        p.passenger_type = "ADULT".to_owned();
        p.id_card_number = "110101199001011234".to_owned();
        let v = match serde_json::to_value(&p) {
            Ok(v) => v,
            Err(e) => panic!("serialize failed: {e}"),
        };
        assert_eq!(v["userId"], 7);
        assert_eq!(v["type"], "ADULT");
        assert_eq!(v["idCardNumber"], "110101199001011234");
        assert!(v.get("id").is_none(), "unsaved passenger must not send an id");
        assert!(v.get("phone").is_none());
    }

    #[test]
    fn passenger_tolerates_missing_optional_fields() {
        let p: Passenger = match serde_json::from_value(json!({"id": 1, "userId": 7, "name": "A"})) {
            Ok(p) => p,
            Err(e) => panic!("deserialize failed: {e}"),
        };
        assert_eq!(p.id, Some(PassengerId(1)));
        assert!(p.passenger_type.is_empty());
    }

    #[test]
    fn order_keeps_unknown_fields() {
        let o: Order = match serde_json::from_value(json!({
            "id": 10,
            "pnrNumber": "E12345",
            "status": "UNPAID",
            "trainNumber": "G101",
        })) {
            Ok(o) => o,
            Err(e) => panic!("deserialize failed: {e}"),
        };
        assert_eq!(o.id, OrderId(10));
        assert_eq!(o.pnr_number, Some(PnrNumber::new("E12345")));
        assert_eq!(o.extra.get("trainNumber"), Some(&json!("G101")));
        assert!(o.user_id.is_none());
    }
}
