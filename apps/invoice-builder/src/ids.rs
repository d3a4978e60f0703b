//! Line item id generation.

use chrono::Utc;
use uuid::Uuid;

/// Generates a fresh line item id: `item-<unix millis>-<9 random hex chars>`.
pub fn new_line_item_id() -> String {
    let millis = Utc::now().timestamp_millis();
    let random = Uuid::new_v4().simple().to_string();
    format!("item-{}-{}", millis, &random[..9])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_shape() {
        let id = new_line_item_id();
        let parts: Vec<&str> = id.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "item");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 9);
    }

    #[test]
    fn test_ids_unique() {
        let a = new_line_item_id();
        let b = new_line_item_id();
        assert_ne!(a, b);
    }
}
