use serde::{Deserialize, Serialize};

use crate::domain::entities::users::user::User;

/// 사용자 응답 DTO (회원가입, 프로필)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.map(|id| id.to_hex()).unwrap_or_default(),
            email: user.email,
            name: user.name,
        }
    }
}

/// 관리자 API용 사용자 응답 DTO
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: String,
}

impl From<User> for AdminUserResponse {
    fn from(user: User) -> Self {
        let User {
            id,
            email,
            name,
            is_active,
            is_staff,
            is_superuser,
            created_at,
            ..
        } = user;

        Self {
            id: id.map(|id| id.to_hex()).unwrap_or_default(),
            email,
            name,
            is_active,
            is_staff,
            is_superuser,
            created_at: created_at.try_to_rfc3339_string().unwrap_or_default(),
        }
    }
}

/// 토큰 발급 응답
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::oid::ObjectId;

    #[test]
    fn test_user_response_never_contains_password() {
        let mut user = User::new("a@b.com".to_string(), "A".to_string(), "secret-hash".to_string());
        user.id = Some(ObjectId::new());

        let json = serde_json::to_value(UserResponse::from(user)).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object.len(), 3);
        assert!(!json.to_string().contains("secret-hash"));
    }
}
