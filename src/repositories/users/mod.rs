//! 사용자 리포지토리
//!
//! [`UserRepository`] 트레이트와 MongoDB 구현([`user_repo::MongoUserRepository`])을 제공합니다.
//! 메모리 구현은 [`crate::repositories::memory::MemoryStore`]에 있습니다.

use async_trait::async_trait;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};

use crate::core::errors::AppResult;
use crate::domain::entities::users::user::User;

pub mod user_repo;

pub use user_repo::MongoUserRepository;

/// 사용자 부분 수정 내용
///
/// `None` 필드는 변경하지 않습니다. 이메일은 변경 대상이 아닙니다.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UserChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.password_hash.is_none()
            && self.is_active.is_none()
            && self.is_staff.is_none()
            && self.is_superuser.is_none()
    }

    /// 메모리 상의 엔티티에 변경 내용을 적용합니다.
    pub fn apply(&self, user: &mut User) {
        if let Some(name) = &self.name {
            user.name = name.clone();
        }
        if let Some(hash) = &self.password_hash {
            user.password_hash = hash.clone();
        }
        if let Some(active) = self.is_active {
            user.is_active = active;
        }
        if let Some(staff) = self.is_staff {
            user.is_staff = staff;
        }
        if let Some(superuser) = self.is_superuser {
            user.is_superuser = superuser;
        }
        user.updated_at = DateTime::now();
    }

    /// MongoDB `$set` 문서로 변환합니다.
    pub fn to_set_document(&self) -> Document {
        let mut set = doc! { "updated_at": DateTime::now() };
        if let Some(name) = &self.name {
            set.insert("name", name.clone());
        }
        if let Some(hash) = &self.password_hash {
            set.insert("password_hash", hash.clone());
        }
        if let Some(active) = self.is_active {
            set.insert("is_active", active);
        }
        if let Some(staff) = self.is_staff {
            set.insert("is_staff", staff);
        }
        if let Some(superuser) = self.is_superuser {
            set.insert("is_superuser", superuser);
        }
        set
    }
}

/// 사용자 저장소
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>>;

    /// 정규화된 이메일로 정확히 일치하는 사용자를 찾습니다.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// 가입 순서(오래된 것부터)로 모든 사용자를 반환합니다.
    async fn list(&self) -> AppResult<Vec<User>>;

    /// 새 사용자를 저장합니다. 이메일이 이미 존재하면 `ConflictError`.
    async fn create(&self, user: User) -> AppResult<User>;

    /// 변경 후 사용자를 반환합니다. 사용자가 없으면 `None`.
    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_apply_only_given_fields() {
        let mut user = User::new("a@b.com".to_string(), "Old".to_string(), "hash".to_string());
        let changes = UserChanges {
            name: Some("New".to_string()),
            is_staff: Some(true),
            ..UserChanges::default()
        };

        changes.apply(&mut user);

        assert_eq!(user.name, "New");
        assert!(user.is_staff);
        assert!(!user.is_superuser);
        assert_eq!(user.password_hash, "hash");
    }

    #[test]
    fn test_set_document_contains_given_fields() {
        let set = UserChanges {
            password_hash: Some("h2".to_string()),
            ..UserChanges::default()
        }
        .to_set_document();

        assert_eq!(set.get_str("password_hash").unwrap(), "h2");
        assert!(set.contains_key("updated_at"));
        assert!(!set.contains_key("name"));
    }
}
