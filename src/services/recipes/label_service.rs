//! # 태그 / 재료 서비스
//!
//! 태그와 재료는 동작이 같으므로 [`LabelKind`]별 인스턴스 두 개로 구성됩니다.
//! 레이블은 레시피 생성/수정 시 중첩 입력으로만 만들어지며,
//! 이 서비스는 조회, 이름 변경, 삭제를 담당합니다.

use std::sync::Arc;

use mongodb::bson::oid::ObjectId;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::recipes::request::{LabelUpdateRequest, WriteMode};
use crate::domain::dto::recipes::response::LabelResponse;
use crate::domain::entities::recipes::{Label, LabelKind};
use crate::repositories::recipes::{LabelRepository, RecipeRepository};
use crate::utils::string_utils::parse_object_id;

pub struct LabelService {
    labels: Arc<dyn LabelRepository>,
    recipes: Arc<dyn RecipeRepository>,
}

impl LabelService {
    pub fn new(labels: Arc<dyn LabelRepository>, recipes: Arc<dyn RecipeRepository>) -> Self {
        Self { labels, recipes }
    }

    pub fn kind(&self) -> LabelKind {
        self.labels.kind()
    }

    /// 소유자의 레이블을 이름 내림차순으로 반환합니다.
    ///
    /// `assigned_only`이면 레시피 하나 이상에 연결된 레이블만 한 번씩 포함합니다.
    pub async fn list(&self, owner_id: &ObjectId, assigned_only: bool) -> AppResult<Vec<LabelResponse>> {
        let labels = if assigned_only {
            let assigned = self.recipes.assigned_label_ids(owner_id, self.kind()).await?;
            if assigned.is_empty() {
                Vec::new()
            } else {
                self.labels.list(owner_id, Some(&assigned)).await?
            }
        } else {
            self.labels.list(owner_id, None).await?
        };

        Ok(labels.into_iter().map(LabelResponse::from).collect())
    }

    pub async fn get(&self, owner_id: &ObjectId, id: &str) -> AppResult<LabelResponse> {
        let id = self.parse_id(id)?;
        Ok(LabelResponse::from(self.find(owner_id, &id).await?))
    }

    /// 이름 변경 (`PUT`은 이름 필수, `PATCH`는 생략 가능)
    ///
    /// 같은 소유자에게 같은 이름의 레이블이 있으면 `name` 필드 에러입니다.
    pub async fn update(
        &self,
        owner_id: &ObjectId,
        id: &str,
        request: LabelUpdateRequest,
        mode: WriteMode,
    ) -> AppResult<LabelResponse> {
        let id = self.parse_id(id)?;
        let label = self.find(owner_id, &id).await?;

        let Some(name) = request.into_name(mode)? else {
            return Ok(LabelResponse::from(label));
        };
        if name == label.name {
            return Ok(LabelResponse::from(label));
        }

        let renamed = self
            .labels
            .rename(owner_id, &id, &name)
            .await
            .map_err(|e| match e {
                AppError::ConflictError(_) => AppError::field(
                    "name",
                    format!("같은 이름의 {}가 이미 있습니다", self.kind().display_name()),
                ),
                other => other,
            })?
            .ok_or_else(|| self.not_found())?;

        log::info!("{} 이름 변경: {} -> {}", self.kind().display_name(), label.name, renamed.name);

        Ok(LabelResponse::from(renamed))
    }

    /// 레이블을 삭제하고 소유자의 모든 레시피에서 연결을 제거합니다.
    pub async fn delete(&self, owner_id: &ObjectId, id: &str) -> AppResult<()> {
        let id = self.parse_id(id)?;
        let label = self.find(owner_id, &id).await?;

        self.recipes.detach_label(owner_id, self.kind(), &id).await?;

        if !self.labels.delete(owner_id, &id).await? {
            return Err(self.not_found());
        }

        log::info!("{} 삭제: {}", self.kind().display_name(), label.name);

        Ok(())
    }

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Label> {
        self.labels
            .find(owner_id, id)
            .await?
            .ok_or_else(|| self.not_found())
    }

    fn parse_id(&self, id: &str) -> AppResult<ObjectId> {
        parse_object_id(id, self.kind().display_name())
    }

    fn not_found(&self) -> AppError {
        AppError::NotFound(format!("{}을(를) 찾을 수 없습니다", self.kind().display_name()))
    }
}

/// 태그 서비스와 재료 서비스 묶음
pub struct LabelServices {
    pub tags: LabelService,
    pub ingredients: LabelService,
}

impl LabelServices {
    pub fn get(&self, kind: LabelKind) -> &LabelService {
        match kind {
            LabelKind::Tag => &self.tags,
            LabelKind::Ingredient => &self.ingredients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::recipes::Recipe;
    use crate::repositories::memory::MemoryStore;
    use rust_decimal::Decimal;

    fn service(store: &MemoryStore) -> LabelService {
        LabelService::new(Arc::new(store.labels(LabelKind::Tag)), Arc::new(store.clone()))
    }

    #[actix_web::test]
    async fn test_assigned_only_lists_each_label_once() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let tags = store.labels(LabelKind::Tag);

        let used = tags.get_or_create(&owner, "Dinner").await.unwrap();
        tags.get_or_create(&owner, "Unused").await.unwrap();

        for title in ["Soup", "Stew"] {
            let mut recipe = Recipe::new(owner, title.to_string(), 5, Decimal::ONE);
            recipe.tag_ids.push(used.id.unwrap());
            store.insert(recipe).await.unwrap();
        }

        let service = service(&store);
        let all = service.list(&owner, false).await.unwrap();
        let assigned = service.list(&owner, true).await.unwrap();

        assert_eq!(all.len(), 2);
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].name, "Dinner");
    }

    #[actix_web::test]
    async fn test_rename_to_existing_name_is_field_error() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let tags = store.labels(LabelKind::Tag);

        tags.get_or_create(&owner, "Vegan").await.unwrap();
        let other = tags.get_or_create(&owner, "Keto").await.unwrap();

        let request = LabelUpdateRequest { name: Some("Vegan".to_string()) };
        let err = service(&store)
            .update(&owner, &other.id.unwrap().to_hex(), request, WriteMode::Replace)
            .await
            .unwrap_err();

        match err {
            AppError::InvalidFields(fields) => assert!(fields.contains("name")),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[actix_web::test]
    async fn test_foreign_label_is_not_found() {
        let store = MemoryStore::new();
        let label = store
            .labels(LabelKind::Tag)
            .get_or_create(&ObjectId::new(), "Mine")
            .await
            .unwrap();
        let id = label.id.unwrap().to_hex();

        let service = service(&store);
        let stranger = ObjectId::new();

        assert!(matches!(service.get(&stranger, &id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.delete(&stranger, &id).await, Err(AppError::NotFound(_))));
        assert!(matches!(service.get(&stranger, "bogus").await, Err(AppError::NotFound(_))));
    }

    #[actix_web::test]
    async fn test_delete_detaches_from_recipes() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let tag = store
            .labels(LabelKind::Tag)
            .get_or_create(&owner, "Spicy")
            .await
            .unwrap();
        let tag_id = tag.id.unwrap();

        let mut recipe = Recipe::new(owner, "Curry".to_string(), 30, Decimal::ONE);
        recipe.tag_ids.push(tag_id);
        let recipe = store.insert(recipe).await.unwrap();

        service(&store).delete(&owner, &tag_id.to_hex()).await.unwrap();

        let reloaded = RecipeRepository::find(&store, &owner, &recipe.id.unwrap())
            .await
            .unwrap()
            .unwrap();
        assert!(reloaded.tag_ids.is_empty());
    }
}
