//! MongoDB 토큰 리포지토리
//!
//! `tokens` 컬렉션에 `{_id: key, user_id, created_at}` 형태로 저장합니다.
//! `user_id` 유니크 인덱스로 사용자당 토큰이 하나임을 보장하며,
//! 발급은 `$setOnInsert` upsert 한 번으로 원자적으로 처리됩니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use super::TokenRepository;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::tokens::AuthToken;
use crate::repositories::is_duplicate_key;

const COLLECTION: &str = "tokens";

pub struct MongoTokenRepository {
    db: Arc<Database>,
}

impl MongoTokenRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<AuthToken> {
        self.db.collection::<AuthToken>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([user_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}

#[async_trait]
impl TokenRepository for MongoTokenRepository {
    async fn get_or_create(&self, candidate: AuthToken) -> AppResult<AuthToken> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self.collection()
            .find_one_and_update(
                doc! { "user_id": candidate.user_id },
                doc! {
                    "$setOnInsert": {
                        "_id": &candidate.key,
                        "user_id": candidate.user_id,
                        "created_at": candidate.created_at,
                    }
                },
            )
            .with_options(options)
            .await;

        match result {
            Ok(Some(token)) => Ok(token),
            Ok(None) => Err(AppError::DatabaseError("토큰 upsert 결과가 비어 있습니다".to_string())),
            // 동시 발급 경쟁에서 진 경우 먼저 저장된 토큰을 사용
            Err(e) if is_duplicate_key(&e) => self.collection()
                .find_one(doc! { "user_id": candidate.user_id })
                .await
                .map_err(|e| AppError::DatabaseError(e.to_string()))?
                .ok_or_else(|| AppError::DatabaseError("토큰을 찾을 수 없습니다".to_string())),
            Err(e) => Err(AppError::DatabaseError(e.to_string())),
        }
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<AuthToken>> {
        self.collection()
            .find_one(doc! { "_id": key })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}
