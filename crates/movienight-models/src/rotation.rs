use serde::{Deserialize, Serialize};
use crate::user::UserId;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NextPicker {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// Server-computed pointer to whoever picks next. `None` means the roster is empty.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct RotationNext {
    #[serde(default)]
    pub next: Option<NextPicker>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_next() {
        let next: RotationNext = serde_json::from_str(r#"{"next": null}"#).unwrap();
        assert!(next.next.is_none());
    }

    #[test]
    fn test_next_picker() {
        let next: RotationNext =
            serde_json::from_str(r#"{"next": {"id": 2, "name": "Sam", "avatar_url": "/uploads/a.png"}}"#)
                .unwrap();
        let picker = next.next.unwrap();
        assert_eq!(picker.id, 2);
        assert_eq!(picker.avatar_url.as_deref(), Some("/uploads/a.png"));
    }
}
