//! MongoDB 레이블 리포지토리
//!
//! 태그와 재료는 컬렉션만 다르고 동작이 같으므로 [`LabelKind`]로
//! 컬렉션을 선택하는 하나의 구현을 공유합니다.
//! `(owner_id, name)` 유니크 인덱스가 이름 중복을 막습니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
    Collection, IndexModel,
};

use super::LabelRepository;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::recipes::{Label, LabelKind};
use crate::repositories::is_duplicate_key;

pub struct MongoLabelRepository {
    db: Arc<Database>,
    kind: LabelKind,
}

impl MongoLabelRepository {
    pub fn new(db: Arc<Database>, kind: LabelKind) -> Self {
        Self { db, kind }
    }

    fn collection(&self) -> Collection<Label> {
        self.db.collection::<Label>(self.kind.collection())
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let name_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "name": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("owner_name_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([name_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    async fn find_all(&self, query: Document) -> AppResult<Vec<Label>> {
        let options = FindOptions::builder()
            .sort(doc! { "name": -1, "_id": -1 })
            .build();

        self.collection()
            .find(query)
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_by_name(&self, owner_id: &ObjectId, name: &str) -> AppResult<Option<Label>> {
        self.collection()
            .find_one(doc! { "owner_id": *owner_id, "name": name })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }
}

#[async_trait]
impl LabelRepository for MongoLabelRepository {
    fn kind(&self) -> LabelKind {
        self.kind
    }

    async fn list(&self, owner_id: &ObjectId, only: Option<&[ObjectId]>) -> AppResult<Vec<Label>> {
        let mut query = doc! { "owner_id": *owner_id };
        if let Some(ids) = only {
            query.insert("_id", doc! { "$in": ids.to_vec() });
        }

        self.find_all(query).await
    }

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Label>> {
        self.collection()
            .find_one(doc! { "_id": *id, "owner_id": *owner_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find_many(&self, owner_id: &ObjectId, ids: &[ObjectId]) -> AppResult<Vec<Label>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.find_all(doc! { "owner_id": *owner_id, "_id": { "$in": ids.to_vec() } }).await
    }

    async fn get_or_create(&self, owner_id: &ObjectId, name: &str) -> AppResult<Label> {
        let options = FindOneAndUpdateOptions::builder()
            .upsert(true)
            .return_document(ReturnDocument::After)
            .build();

        let result = self.collection()
            .find_one_and_update(
                doc! { "owner_id": *owner_id, "name": name },
                doc! { "$setOnInsert": { "owner_id": *owner_id, "name": name } },
            )
            .with_options(options)
            .await;

        let label = match result {
            Ok(label) => label,
            // 동시 요청이 같은 이름을 먼저 생성한 경우
            Err(e) if is_duplicate_key(&e) => self.find_by_name(owner_id, name).await?,
            Err(e) => return Err(AppError::DatabaseError(e.to_string())),
        };

        label.ok_or_else(|| {
            AppError::DatabaseError(format!("{} upsert 결과가 비어 있습니다", self.kind.display_name()))
        })
    }

    async fn rename(&self, owner_id: &ObjectId, id: &ObjectId, name: &str) -> AppResult<Option<Label>> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        self.collection()
            .find_one_and_update(
                doc! { "_id": *id, "owner_id": *owner_id },
                doc! { "$set": { "name": name } },
            )
            .with_options(options)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::ConflictError(format!(
                        "같은 이름의 {}가 이미 있습니다",
                        self.kind.display_name()
                    ))
                } else {
                    AppError::DatabaseError(e.to_string())
                }
            })
    }

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection()
            .delete_one(doc! { "_id": *id, "owner_id": *owner_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }
}
