//! User Entity Implementation
//!
//! 이메일/패스워드 기반 사용자 계정 엔티티입니다.
//! 이메일은 저장 전에 도메인 부분만 소문자로 정규화됩니다.

use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};

use super::roles;

/// 사용자 엔티티
///
/// `password_hash`는 엔티티 내부에만 존재하며 어떤 응답 DTO로도 노출되지 않습니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    /// 사용자 이메일 (unique, 도메인 소문자 정규화)
    pub email: String,
    /// 표시 이름 (빈 문자열 허용)
    pub name: String,
    /// bcrypt 해시
    pub password_hash: String,
    /// 계정 활성화 여부. 비활성 계정은 토큰 발급/인증이 거부됩니다.
    pub is_active: bool,
    /// 관리자 API 접근 가능 여부
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 일반 사용자 생성
    pub fn new(email: String, name: String, password_hash: String) -> Self {
        let now = DateTime::now();

        Self {
            id: None,
            email,
            name,
            password_hash,
            is_active: true,
            is_staff: false,
            is_superuser: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// 계정 플래그에서 파생된 역할 목록
    pub fn roles(&self) -> Vec<String> {
        let mut granted = vec![roles::USER.to_string()];
        if self.is_staff {
            granted.push(roles::STAFF.to_string());
        }
        if self.is_superuser {
            granted.push(roles::SUPERUSER.to_string());
        }
        granted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_defaults() {
        let user = User::new("a@b.com".to_string(), String::new(), "hash".to_string());

        assert!(user.is_active);
        assert!(!user.is_staff);
        assert!(!user.is_superuser);
        assert_eq!(user.roles(), vec!["user".to_string()]);
    }

    #[test]
    fn test_superuser_flags_and_roles() {
        let mut user = User::new("root@b.com".to_string(), String::new(), "hash".to_string());
        user.is_staff = true;
        user.is_superuser = true;

        assert_eq!(user.roles(), vec!["user", "staff", "superuser"]);
    }
}
