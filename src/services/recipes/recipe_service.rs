//! # 레시피 서비스
//!
//! 소유자 범위의 레시피 CRUD, 중첩 태그/재료 해석, 이미지 업로드를 담당합니다.
//!
//! ## 중첩 레이블 해석
//!
//! ```text
//! {"tags": [{"name": "Thai"}, {"name": "Dinner"}]}
//!     │
//!     ▼  이름 정규화 + 중복 제거 (RecipePayload::into_changes)
//! ["Thai", "Dinner"]
//!     │
//!     ▼  소유자 범위 get_or_create (LabelRepository)
//! [ObjectId, ObjectId]  →  recipe.tag_ids 교체
//! ```
//!
//! 다른 사용자의 같은 이름 레이블은 재사용되지 않습니다.
//! 존재하지 않거나 다른 사용자 소유의 레시피는 모두 `NotFound`입니다.

use std::collections::BTreeSet;
use std::sync::Arc;

use mongodb::bson::{oid::ObjectId, DateTime};
use rust_decimal::Decimal;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::recipes::request::{RecipeChanges, RecipePayload, WriteMode};
use crate::domain::dto::recipes::response::{
    LabelIndex, RecipeDetailResponse, RecipeImageResponse, RecipeResponse,
};
use crate::domain::entities::recipes::{LabelKind, Recipe};
use crate::domain::models::recipes::RecipeFilter;
use crate::repositories::recipes::{LabelRepository, RecipeRepository};
use crate::services::recipes::image_service::ImageStore;
use crate::utils::string_utils::parse_object_id;

const LABEL_KINDS: [LabelKind; 2] = [LabelKind::Tag, LabelKind::Ingredient];

pub struct RecipeService {
    recipes: Arc<dyn RecipeRepository>,
    tags: Arc<dyn LabelRepository>,
    ingredients: Arc<dyn LabelRepository>,
    images: Arc<ImageStore>,
}

impl RecipeService {
    pub fn new(
        recipes: Arc<dyn RecipeRepository>,
        tags: Arc<dyn LabelRepository>,
        ingredients: Arc<dyn LabelRepository>,
        images: Arc<ImageStore>,
    ) -> Self {
        Self {
            recipes,
            tags,
            ingredients,
            images,
        }
    }

    fn labels(&self, kind: LabelKind) -> &Arc<dyn LabelRepository> {
        match kind {
            LabelKind::Tag => &self.tags,
            LabelKind::Ingredient => &self.ingredients,
        }
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    /// 소유자의 레시피 목록 (최신순)
    pub async fn list(&self, owner_id: &ObjectId, filter: &RecipeFilter) -> AppResult<Vec<RecipeResponse>> {
        let recipes = self.recipes.list(owner_id, filter).await?;
        let labels = self.label_index(owner_id, &recipes).await?;

        Ok(recipes
            .iter()
            .map(|recipe| RecipeResponse::build(recipe, &labels))
            .collect())
    }

    pub async fn get(&self, owner_id: &ObjectId, id: &str) -> AppResult<RecipeDetailResponse> {
        let recipe = self.find(owner_id, id).await?;
        self.detail(owner_id, &recipe).await
    }

    /// 레시피 생성
    ///
    /// 소유자는 항상 호출자이며, 요청 본문의 소유자/id 필드는 무시됩니다.
    pub async fn create(&self, owner_id: &ObjectId, payload: RecipePayload) -> AppResult<RecipeDetailResponse> {
        let changes = payload.into_changes(WriteMode::Create)?;

        let mut recipe = Recipe::new(*owner_id, String::new(), 0, Decimal::ZERO);
        self.apply(owner_id, &mut recipe, changes).await?;

        let recipe = self.recipes.insert(recipe).await?;
        log::info!(
            "레시피 생성: {} ({})",
            recipe.title,
            recipe.id.map(|id| id.to_hex()).unwrap_or_default()
        );

        self.detail(owner_id, &recipe).await
    }

    /// 레시피 수정 (`PUT` = `WriteMode::Replace`, `PATCH` = `WriteMode::Partial`)
    ///
    /// 요청에 `tags`/`ingredients`가 있으면 연결 목록 전체를 교체합니다.
    pub async fn update(
        &self,
        owner_id: &ObjectId,
        id: &str,
        payload: RecipePayload,
        mode: WriteMode,
    ) -> AppResult<RecipeDetailResponse> {
        let mut recipe = self.find(owner_id, id).await?;
        let changes = payload.into_changes(mode)?;

        self.apply(owner_id, &mut recipe, changes).await?;
        recipe.updated_at = DateTime::now();

        if !self.recipes.replace(&recipe).await? {
            return Err(not_found());
        }

        self.detail(owner_id, &recipe).await
    }

    /// 레시피 삭제. 연결된 레이블은 삭제되지 않습니다.
    pub async fn delete(&self, owner_id: &ObjectId, id: &str) -> AppResult<()> {
        let recipe = self.find(owner_id, id).await?;
        let recipe_id = recipe.id.ok_or_else(not_found)?;

        if !self.recipes.delete(owner_id, &recipe_id).await? {
            return Err(not_found());
        }

        if let Some(image) = &recipe.image {
            self.images.remove(image).await;
        }

        log::info!("레시피 삭제: {} ({})", recipe.title, recipe_id);

        Ok(())
    }

    /// 레시피 이미지 교체
    ///
    /// 레시피 소유 여부를 먼저 확인한 뒤 이미지를 검증/저장합니다.
    /// 교체에 성공하면 이전 이미지 파일을 삭제합니다.
    pub async fn upload_image(&self, owner_id: &ObjectId, id: &str, bytes: Vec<u8>) -> AppResult<RecipeImageResponse> {
        let mut recipe = self.find(owner_id, id).await?;

        let stored = self.images.store(bytes).await?;
        let previous = recipe.image.replace(stored.clone());
        recipe.updated_at = DateTime::now();

        if !self.recipes.replace(&recipe).await? {
            // 업로드 중에 레시피가 삭제된 경우
            self.images.remove(&stored).await;
            return Err(not_found());
        }

        if let Some(previous) = previous {
            self.images.remove(&previous).await;
        }

        Ok(RecipeImageResponse::build(&recipe, self.images.media_url()))
    }

    async fn find(&self, owner_id: &ObjectId, id: &str) -> AppResult<Recipe> {
        let id = parse_object_id(id, "레시피")?;

        self.recipes
            .find(owner_id, &id)
            .await?
            .ok_or_else(not_found)
    }

    async fn apply(&self, owner_id: &ObjectId, recipe: &mut Recipe, changes: RecipeChanges) -> AppResult<()> {
        for kind in LABEL_KINDS {
            if let Some(names) = changes.label_names(kind) {
                *recipe.label_ids_mut(kind) = self.resolve_labels(owner_id, kind, names).await?;
            }
        }

        if let Some(title) = changes.title {
            recipe.title = title;
        }
        if let Some(time_minutes) = changes.time_minutes {
            recipe.time_minutes = time_minutes;
        }
        if let Some(price) = changes.price {
            recipe.price = price;
        }
        if let Some(description) = changes.description {
            recipe.description = description;
        }
        if let Some(link) = changes.link {
            recipe.link = link;
        }

        Ok(())
    }

    /// 이름 목록을 소유자의 레이블 id로 해석합니다. 없는 이름은 생성합니다.
    async fn resolve_labels(&self, owner_id: &ObjectId, kind: LabelKind, names: &[String]) -> AppResult<Vec<ObjectId>> {
        let repository = self.labels(kind);
        let mut ids = Vec::with_capacity(names.len());

        for name in names {
            let label = repository.get_or_create(owner_id, name).await?;
            let id = label
                .id
                .ok_or_else(|| AppError::InternalError(format!("{} id가 없습니다", kind.display_name())))?;

            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Ok(ids)
    }

    async fn label_index(&self, owner_id: &ObjectId, recipes: &[Recipe]) -> AppResult<LabelIndex> {
        let mut index = LabelIndex::default();

        for kind in LABEL_KINDS {
            let ids: Vec<ObjectId> = recipes
                .iter()
                .flat_map(|recipe| recipe.label_ids(kind).iter().copied())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let labels = self.labels(kind).find_many(owner_id, &ids).await?;
            index.insert_all(kind, labels);
        }

        Ok(index)
    }

    async fn detail(&self, owner_id: &ObjectId, recipe: &Recipe) -> AppResult<RecipeDetailResponse> {
        let labels = self.label_index(owner_id, std::slice::from_ref(recipe)).await?;
        Ok(RecipeDetailResponse::build(recipe, &labels, self.images.media_url()))
    }
}

fn not_found() -> AppError {
    AppError::NotFound("레시피를 찾을 수 없습니다".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::memory::MemoryStore;

    fn service(store: &MemoryStore) -> RecipeService {
        let images = ImageStore::new(
            std::env::temp_dir().join("recipe-service-tests"),
            "/media/".to_string(),
            1024,
        );

        RecipeService::new(
            Arc::new(store.clone()),
            Arc::new(store.labels(LabelKind::Tag)),
            Arc::new(store.labels(LabelKind::Ingredient)),
            Arc::new(images),
        )
    }

    fn payload(json: serde_json::Value) -> RecipePayload {
        serde_json::from_value(json).unwrap()
    }

    #[actix_web::test]
    async fn test_create_reuses_own_tags_only() {
        let store = MemoryStore::new();
        let service = service(&store);
        let owner = ObjectId::new();
        let stranger = ObjectId::new();

        let tags = store.labels(LabelKind::Tag);
        let existing = tags.get_or_create(&owner, "Thai").await.unwrap();
        let foreign = tags.get_or_create(&stranger, "Dinner").await.unwrap();

        let created = service
            .create(
                &owner,
                payload(serde_json::json!({
                    "title": "Curry",
                    "time_minutes": 30,
                    "price": "7.50",
                    "tags": [{"name": "Thai"}, {"name": "Dinner"}]
                })),
            )
            .await
            .unwrap();

        let tag_ids: Vec<String> = created.summary.tags.iter().map(|t| t.id.clone()).collect();
        assert_eq!(tag_ids.len(), 2);
        assert!(tag_ids.contains(&existing.id.unwrap().to_hex()));
        assert!(!tag_ids.contains(&foreign.id.unwrap().to_hex()));
        assert_eq!(tags.list(&owner, None).await.unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_patch_empty_tags_clears_associations() {
        let store = MemoryStore::new();
        let service = service(&store);
        let owner = ObjectId::new();

        let created = service
            .create(
                &owner,
                payload(serde_json::json!({
                    "title": "Salad",
                    "time_minutes": 5,
                    "price": "3.00",
                    "tags": [{"name": "Light"}]
                })),
            )
            .await
            .unwrap();

        let updated = service
            .update(&owner, &created.summary.id, payload(serde_json::json!({"tags": []})), WriteMode::Partial)
            .await
            .unwrap();

        assert!(updated.summary.tags.is_empty());
        assert_eq!(updated.summary.title, "Salad");
        assert_eq!(store.labels(LabelKind::Tag).list(&owner, None).await.unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_foreign_recipe_is_hidden() {
        let store = MemoryStore::new();
        let service = service(&store);
        let owner = ObjectId::new();
        let stranger = ObjectId::new();

        let created = service
            .create(
                &owner,
                payload(serde_json::json!({"title": "Pie", "time_minutes": 60, "price": "5"})),
            )
            .await
            .unwrap();

        assert!(matches!(
            service.delete(&stranger, &created.summary.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(service.get(&owner, &created.summary.id).await.is_ok());
        assert!(service.list(&stranger, &RecipeFilter::default()).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_put_requires_core_fields() {
        let store = MemoryStore::new();
        let service = service(&store);
        let owner = ObjectId::new();

        let created = service
            .create(
                &owner,
                payload(serde_json::json!({"title": "Pie", "time_minutes": 60, "price": "5"})),
            )
            .await
            .unwrap();

        let err = service
            .update(&owner, &created.summary.id, payload(serde_json::json!({"title": "Tart"})), WriteMode::Replace)
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidFields(_)));
    }
}
