//! MongoDB 사용자 리포지토리
//!
//! `users` 컬렉션을 사용하며, id 기반 조회 결과를 Redis에 10분간 캐싱합니다.
//! 인증 미들웨어가 요청마다 토큰 소유자를 조회하므로 id 조회가 가장 빈번합니다.
//! 수정 시 해당 사용자의 캐시를 무효화합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use super::{UserChanges, UserRepository};
use crate::caching::redis::RedisClient;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::users::user::User;
use crate::repositories::is_duplicate_key;

const COLLECTION: &str = "users";
const CACHE_TTL_SECONDS: u64 = 600;

pub struct MongoUserRepository {
    db: Arc<Database>,

    /// `None`이면 캐시 없이 동작합니다.
    redis: Option<Arc<RedisClient>>,
}

impl MongoUserRepository {
    pub fn new(db: Arc<Database>, redis: Option<Arc<RedisClient>>) -> Self {
        Self { db, redis }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(COLLECTION)
    }

    fn cache_key(id: &ObjectId) -> String {
        format!("user:{}", id.to_hex())
    }

    async fn invalidate_cache(&self, id: &ObjectId) {
        if let Some(redis) = &self.redis {
            if let Err(e) = redis.del(&Self::cache_key(id)).await {
                log::warn!("사용자 캐시 무효화 실패 ({}): {}", id, e);
            }
        }
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        // 이메일 유니크 인덱스
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for MongoUserRepository {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        let cache_key = Self::cache_key(id);

        // 캐시 확인
        if let Some(redis) = &self.redis {
            if let Ok(Some(cached)) = redis.get::<User>(&cache_key).await {
                return Ok(Some(cached));
            }
        }

        // DB 조회
        let user = self.collection()
            .find_one(doc! { "_id": *id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 저장
        if let (Some(redis), Some(user)) = (&self.redis, &user) {
            if let Err(e) = redis.set_with_expiry(&cache_key, user, CACHE_TTL_SECONDS).await {
                log::debug!("사용자 캐시 저장 실패: {}", e);
            }
        }

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        let options = FindOptions::builder().sort(doc! { "_id": 1 }).build();

        self.collection()
            .find(doc! {})
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let result = self.collection()
            .insert_one(&user)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError("이미 사용 중인 이메일입니다".to_string())
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 사용자 ID 형식이 올바르지 않습니다".to_string()))?;
        user.id = Some(id);

        Ok(user)
    }

    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let updated_user = self.collection()
            .find_one_and_update(
                doc! { "_id": *id },
                doc! { "$set": changes.to_set_document() },
            )
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        // 캐시 무효화
        if updated_user.is_some() {
            self.invalidate_cache(id).await;
        }

        Ok(updated_user)
    }
}
