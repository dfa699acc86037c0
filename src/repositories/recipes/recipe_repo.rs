//! MongoDB 레시피 리포지토리
//!
//! 레이블 연결은 레시피 문서의 id 배열로 저장되므로 필터 조회가
//! 조인 없이 `$in` 한 번으로 처리되고, 결과에 중복이 생기지 않습니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, Bson, Document},
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use super::RecipeRepository;
use crate::core::errors::{AppError, AppResult};
use crate::db::Database;
use crate::domain::entities::recipes::{LabelKind, Recipe};
use crate::domain::models::recipes::RecipeFilter;

const COLLECTION: &str = "recipes";

pub struct MongoRecipeRepository {
    db: Arc<Database>,
}

impl MongoRecipeRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Recipe> {
        self.db.collection::<Recipe>(COLLECTION)
    }

    pub async fn create_indexes(&self) -> AppResult<()> {
        let owner_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "_id": -1 })
            .options(IndexOptions::builder().name("owner_newest".to_string()).build())
            .build();

        let tag_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "tag_ids": 1 })
            .options(IndexOptions::builder().name("owner_tags".to_string()).build())
            .build();

        let ingredient_index = IndexModel::builder()
            .keys(doc! { "owner_id": 1, "ingredient_ids": 1 })
            .options(IndexOptions::builder().name("owner_ingredients".to_string()).build())
            .build();

        self.collection()
            .create_indexes([owner_index, tag_index, ingredient_index])
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }

    fn filter_document(owner_id: &ObjectId, filter: &RecipeFilter) -> Document {
        let mut query = doc! { "owner_id": *owner_id };

        for kind in [LabelKind::Tag, LabelKind::Ingredient] {
            if let Some(ids) = filter.ids(kind) {
                query.insert(kind.recipe_field(), doc! { "$in": ids.to_vec() });
            }
        }

        query
    }
}

#[async_trait]
impl RecipeRepository for MongoRecipeRepository {
    async fn list(&self, owner_id: &ObjectId, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        let options = FindOptions::builder().sort(doc! { "_id": -1 }).build();

        self.collection()
            .find(Self::filter_document(owner_id, filter))
            .with_options(options)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?
            .try_collect()
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Recipe>> {
        self.collection()
            .find_one(doc! { "_id": *id, "owner_id": *owner_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))
    }

    async fn insert(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        let result = self.collection()
            .insert_one(&recipe)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        let id = result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| AppError::DatabaseError("삽입된 레시피 ID 형식이 올바르지 않습니다".to_string()))?;
        recipe.id = Some(id);

        Ok(recipe)
    }

    async fn replace(&self, recipe: &Recipe) -> AppResult<bool> {
        let id = recipe
            .id
            .ok_or_else(|| AppError::InternalError("저장되지 않은 레시피는 교체할 수 없습니다".to_string()))?;

        let result = self.collection()
            .replace_one(doc! { "_id": id, "owner_id": recipe.owner_id }, recipe)
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.matched_count > 0)
    }

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool> {
        let result = self.collection()
            .delete_one(doc! { "_id": *id, "owner_id": *owner_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(result.deleted_count > 0)
    }

    async fn assigned_label_ids(&self, owner_id: &ObjectId, kind: LabelKind) -> AppResult<Vec<ObjectId>> {
        let values = self.collection()
            .distinct(kind.recipe_field(), doc! { "owner_id": *owner_id })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(values
            .into_iter()
            .filter_map(|value| match value {
                Bson::ObjectId(id) => Some(id),
                _ => None,
            })
            .collect())
    }

    async fn detach_label(&self, owner_id: &ObjectId, kind: LabelKind, label_id: &ObjectId) -> AppResult<()> {
        let field = kind.recipe_field();

        let mut query = doc! { "owner_id": *owner_id };
        query.insert(field, *label_id);

        let mut pull = Document::new();
        pull.insert(field, *label_id);

        self.collection()
            .update_many(query, doc! { "$pull": pull })
            .await
            .map_err(|e| AppError::DatabaseError(e.to_string()))?;

        Ok(())
    }
}
