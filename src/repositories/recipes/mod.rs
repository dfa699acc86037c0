//! 레시피 / 레이블 리포지토리
//!
//! 모든 조회와 변경은 소유자 id를 함께 받습니다. 다른 사용자의 문서는
//! 존재하지 않는 것과 동일하게 취급됩니다.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::core::errors::AppResult;
use crate::domain::entities::recipes::{Label, LabelKind, Recipe};
use crate::domain::models::recipes::RecipeFilter;

pub mod recipe_repo;
pub mod label_repo;

pub use recipe_repo::MongoRecipeRepository;
pub use label_repo::MongoLabelRepository;

/// 레시피 저장소
#[async_trait]
pub trait RecipeRepository: Send + Sync {
    /// 소유자의 레시피를 최신순(id 내림차순)으로 반환합니다. 중복은 없습니다.
    async fn list(&self, owner_id: &ObjectId, filter: &RecipeFilter) -> AppResult<Vec<Recipe>>;

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Recipe>>;

    async fn insert(&self, recipe: Recipe) -> AppResult<Recipe>;

    /// `recipe.id`와 `recipe.owner_id`가 일치하는 문서를 교체합니다. 대상이 없으면 `false`.
    async fn replace(&self, recipe: &Recipe) -> AppResult<bool>;

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool>;

    /// 소유자의 레시피 중 하나 이상에 연결된 레이블 id (중복 제거)
    async fn assigned_label_ids(&self, owner_id: &ObjectId, kind: LabelKind) -> AppResult<Vec<ObjectId>>;

    /// 소유자의 모든 레시피에서 해당 레이블 연결을 제거합니다.
    async fn detach_label(&self, owner_id: &ObjectId, kind: LabelKind, label_id: &ObjectId) -> AppResult<()>;
}

/// 태그 또는 재료 저장소
///
/// 같은 소유자 안에서 이름은 종류별로 유일합니다.
#[async_trait]
pub trait LabelRepository: Send + Sync {
    fn kind(&self) -> LabelKind;

    /// 이름 내림차순. `only`가 주어지면 해당 id만 반환합니다.
    async fn list(&self, owner_id: &ObjectId, only: Option<&[ObjectId]>) -> AppResult<Vec<Label>>;

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Label>>;

    async fn find_many(&self, owner_id: &ObjectId, ids: &[ObjectId]) -> AppResult<Vec<Label>>;

    /// 같은 이름의 레이블이 있으면 반환하고, 없으면 생성합니다.
    async fn get_or_create(&self, owner_id: &ObjectId, name: &str) -> AppResult<Label>;

    /// 이름을 변경합니다. 같은 이름이 이미 있으면 `ConflictError`, 대상이 없으면 `None`.
    async fn rename(&self, owner_id: &ObjectId, id: &ObjectId, name: &str) -> AppResult<Option<Label>>;

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool>;
}
