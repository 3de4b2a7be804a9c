use serde::{Deserialize, Serialize};

pub type UserId = i64;

/// A household member taking part in the pick rotation.
///
/// `position` defines the rotation order. The server owns it; the client only
/// ever sends a complete new order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub position: i64,
    // Absent from the create/patch responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct UsersResponse {
    #[serde(default)]
    pub items: Vec<User>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_without_created_at() {
        let user: User = serde_json::from_str(
            r#"{"id": 4, "name": "Kim", "email": null, "avatar_url": null, "position": 2}"#,
        )
        .unwrap();
        assert_eq!(user.id, 4);
        assert_eq!(user.position, 2);
        assert!(user.created_at.is_none());
    }

    #[test]
    fn test_users_response_ordering_preserved() {
        let resp: UsersResponse = serde_json::from_str(
            r#"{"items": [
                {"id": 3, "name": "C", "position": 0, "created_at": "2024-01-01T10:00:00"},
                {"id": 1, "name": "A", "position": 1, "created_at": "2024-01-01T10:00:00"}
            ]}"#,
        )
        .unwrap();
        let ids: Vec<UserId> = resp.items.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
