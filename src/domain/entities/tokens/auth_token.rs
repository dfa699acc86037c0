use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::TokenConfig;

/// 사용자별 불투명(opaque) API 토큰
///
/// 사용자당 하나만 존재하며, 최초 로그인 시 생성된 뒤 이후 로그인에서 재사용됩니다.
/// 토큰 키 자체가 문서의 `_id`입니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "_id")]
    pub key: String,
    pub user_id: ObjectId,
    pub created_at: DateTime,
}

impl AuthToken {
    /// 새 토큰 키를 생성합니다.
    pub fn issue(user_id: ObjectId) -> Self {
        Self {
            key: generate_key(),
            user_id,
            created_at: DateTime::now(),
        }
    }
}

/// 40자리 16진수 랜덤 키 (UUID v4 두 개에서 추출)
fn generate_key() -> String {
    let mut key = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
    key.truncate(TokenConfig::KEY_LENGTH);
    key
}
