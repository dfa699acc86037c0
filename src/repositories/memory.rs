//! 메모리 저장소
//!
//! `STORAGE_BACKEND=memory`일 때와 통합 테스트에서 사용합니다.
//! 하나의 [`MemoryStore`]가 모든 컬렉션을 하나의 뮤텍스 아래에 보관하므로
//! 각 연산은 원자적으로 수행됩니다. 잠금은 `await` 지점을 넘어 유지되지 않습니다.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use super::recipes::{LabelRepository, RecipeRepository};
use super::tokens::TokenRepository;
use super::users::{UserChanges, UserRepository};
use crate::core::errors::{AppError, AppResult};
use crate::domain::entities::recipes::{Label, LabelKind, Recipe};
use crate::domain::entities::tokens::AuthToken;
use crate::domain::entities::users::user::User;
use crate::domain::models::recipes::RecipeFilter;

#[derive(Default)]
struct MemoryState {
    users: BTreeMap<ObjectId, User>,
    tokens: BTreeMap<String, AuthToken>,
    recipes: BTreeMap<ObjectId, Recipe>,
    tags: BTreeMap<ObjectId, Label>,
    ingredients: BTreeMap<ObjectId, Label>,
}

impl MemoryState {
    fn labels(&self, kind: LabelKind) -> &BTreeMap<ObjectId, Label> {
        match kind {
            LabelKind::Tag => &self.tags,
            LabelKind::Ingredient => &self.ingredients,
        }
    }

    fn labels_mut(&mut self, kind: LabelKind) -> &mut BTreeMap<ObjectId, Label> {
        match kind {
            LabelKind::Tag => &mut self.tags,
            LabelKind::Ingredient => &mut self.ingredients,
        }
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 같은 상태를 공유하는 레이블 저장소를 반환합니다.
    pub fn labels(&self, kind: LabelKind) -> MemoryLabelRepository {
        MemoryLabelRepository {
            store: self.clone(),
            kind,
        }
    }

    fn lock(&self) -> AppResult<MutexGuard<'_, MemoryState>> {
        self.state
            .lock()
            .map_err(|_| AppError::InternalError("메모리 저장소 잠금이 손상되었습니다".to_string()))
    }
}

/// 레이블 목록 정렬: 이름 내림차순, 같은 이름이면 최신 id 먼저
fn sort_labels(labels: &mut [Label]) {
    labels.sort_by(|a, b| b.name.cmp(&a.name).then_with(|| b.id.cmp(&a.id)));
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &ObjectId) -> AppResult<Option<User>> {
        Ok(self.lock()?.users.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self
            .lock()?
            .users
            .values()
            .find(|user| user.email == email)
            .cloned())
    }

    async fn list(&self) -> AppResult<Vec<User>> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn create(&self, mut user: User) -> AppResult<User> {
        let mut state = self.lock()?;

        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::ConflictError("이미 사용 중인 이메일입니다".to_string()));
        }

        let id = ObjectId::new();
        user.id = Some(id);
        state.users.insert(id, user.clone());

        Ok(user)
    }

    async fn update(&self, id: &ObjectId, changes: UserChanges) -> AppResult<Option<User>> {
        let mut state = self.lock()?;

        Ok(state.users.get_mut(id).map(|user| {
            changes.apply(user);
            user.clone()
        }))
    }
}

#[async_trait]
impl TokenRepository for MemoryStore {
    async fn get_or_create(&self, candidate: AuthToken) -> AppResult<AuthToken> {
        let mut state = self.lock()?;

        if let Some(existing) = state
            .tokens
            .values()
            .find(|token| token.user_id == candidate.user_id)
        {
            return Ok(existing.clone());
        }

        state.tokens.insert(candidate.key.clone(), candidate.clone());
        Ok(candidate)
    }

    async fn find_by_key(&self, key: &str) -> AppResult<Option<AuthToken>> {
        Ok(self.lock()?.tokens.get(key).cloned())
    }
}

#[async_trait]
impl RecipeRepository for MemoryStore {
    async fn list(&self, owner_id: &ObjectId, filter: &RecipeFilter) -> AppResult<Vec<Recipe>> {
        Ok(self
            .lock()?
            .recipes
            .values()
            .rev()
            .filter(|recipe| recipe.owner_id == *owner_id && filter.matches(recipe))
            .cloned()
            .collect())
    }

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Recipe>> {
        Ok(self
            .lock()?
            .recipes
            .get(id)
            .filter(|recipe| recipe.owner_id == *owner_id)
            .cloned())
    }

    async fn insert(&self, mut recipe: Recipe) -> AppResult<Recipe> {
        let id = ObjectId::new();
        recipe.id = Some(id);
        self.lock()?.recipes.insert(id, recipe.clone());
        Ok(recipe)
    }

    async fn replace(&self, recipe: &Recipe) -> AppResult<bool> {
        let Some(id) = recipe.id else {
            return Ok(false);
        };

        let mut state = self.lock()?;
        match state.recipes.get_mut(&id) {
            Some(stored) if stored.owner_id == recipe.owner_id => {
                *stored = recipe.clone();
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool> {
        let mut state = self.lock()?;

        let owned = state
            .recipes
            .get(id)
            .is_some_and(|recipe| recipe.owner_id == *owner_id);
        if owned {
            state.recipes.remove(id);
        }

        Ok(owned)
    }

    async fn assigned_label_ids(&self, owner_id: &ObjectId, kind: LabelKind) -> AppResult<Vec<ObjectId>> {
        let state = self.lock()?;

        let mut ids: Vec<ObjectId> = state
            .recipes
            .values()
            .filter(|recipe| recipe.owner_id == *owner_id)
            .flat_map(|recipe| recipe.label_ids(kind).iter().copied())
            .collect();
        ids.sort();
        ids.dedup();

        Ok(ids)
    }

    async fn detach_label(&self, owner_id: &ObjectId, kind: LabelKind, label_id: &ObjectId) -> AppResult<()> {
        let mut state = self.lock()?;

        for recipe in state
            .recipes
            .values_mut()
            .filter(|recipe| recipe.owner_id == *owner_id)
        {
            recipe.label_ids_mut(kind).retain(|id| id != label_id);
        }

        Ok(())
    }
}

/// [`MemoryStore`]의 태그 또는 재료 뷰
#[derive(Clone)]
pub struct MemoryLabelRepository {
    store: MemoryStore,
    kind: LabelKind,
}

#[async_trait]
impl LabelRepository for MemoryLabelRepository {
    fn kind(&self) -> LabelKind {
        self.kind
    }

    async fn list(&self, owner_id: &ObjectId, only: Option<&[ObjectId]>) -> AppResult<Vec<Label>> {
        let state = self.store.lock()?;

        let mut labels: Vec<Label> = state
            .labels(self.kind)
            .iter()
            .filter(|(id, label)| {
                label.owner_id == *owner_id && only.is_none_or(|ids| ids.contains(id))
            })
            .map(|(_, label)| label.clone())
            .collect();
        sort_labels(&mut labels);

        Ok(labels)
    }

    async fn find(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<Option<Label>> {
        Ok(self
            .store
            .lock()?
            .labels(self.kind)
            .get(id)
            .filter(|label| label.owner_id == *owner_id)
            .cloned())
    }

    async fn find_many(&self, owner_id: &ObjectId, ids: &[ObjectId]) -> AppResult<Vec<Label>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.list(owner_id, Some(ids)).await
    }

    async fn get_or_create(&self, owner_id: &ObjectId, name: &str) -> AppResult<Label> {
        let mut state = self.store.lock()?;
        let labels = state.labels_mut(self.kind);

        if let Some(existing) = labels
            .values()
            .find(|label| label.owner_id == *owner_id && label.name == name)
        {
            return Ok(existing.clone());
        }

        let id = ObjectId::new();
        let mut label = Label::new(*owner_id, name.to_string());
        label.id = Some(id);
        labels.insert(id, label.clone());

        Ok(label)
    }

    async fn rename(&self, owner_id: &ObjectId, id: &ObjectId, name: &str) -> AppResult<Option<Label>> {
        let mut state = self.store.lock()?;
        let labels = state.labels_mut(self.kind);

        let taken = labels
            .iter()
            .any(|(other_id, label)| other_id != id && label.owner_id == *owner_id && label.name == name);

        match labels.get_mut(id) {
            Some(label) if label.owner_id == *owner_id => {
                if taken {
                    return Err(AppError::ConflictError(format!(
                        "같은 이름의 {}가 이미 있습니다",
                        self.kind.display_name()
                    )));
                }
                label.name = name.to_string();
                Ok(Some(label.clone()))
            }
            _ => Ok(None),
        }
    }

    async fn delete(&self, owner_id: &ObjectId, id: &ObjectId) -> AppResult<bool> {
        let mut state = self.store.lock()?;
        let labels = state.labels_mut(self.kind);

        let owned = labels
            .get(id)
            .is_some_and(|label| label.owner_id == *owner_id);
        if owned {
            labels.remove(id);
        }

        Ok(owned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn recipe(owner: ObjectId, title: &str) -> Recipe {
        Recipe::new(owner, title.to_string(), 10, Decimal::new(500, 2))
    }

    #[actix_web::test]
    async fn test_user_email_is_unique() {
        let store = MemoryStore::new();
        let user = User::new("cook@example.com".into(), "Cook".into(), "hash".into());

        store.create(user.clone()).await.unwrap();
        let err = store.create(user).await.unwrap_err();

        assert!(matches!(err, AppError::ConflictError(_)));
    }

    #[actix_web::test]
    async fn test_token_reused_per_user() {
        let store = MemoryStore::new();
        let user_id = ObjectId::new();

        let first = store.get_or_create(AuthToken::issue(user_id)).await.unwrap();
        let second = store.get_or_create(AuthToken::issue(user_id)).await.unwrap();

        assert_eq!(first.key, second.key);
        assert!(store.find_by_key(&first.key).await.unwrap().is_some());
    }

    #[actix_web::test]
    async fn test_recipes_newest_first_and_owner_scoped() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let other = ObjectId::new();

        store.insert(recipe(owner, "First")).await.unwrap();
        store.insert(recipe(other, "Foreign")).await.unwrap();
        store.insert(recipe(owner, "Second")).await.unwrap();

        let titles: Vec<String> = RecipeRepository::list(&store, &owner, &RecipeFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();

        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[actix_web::test]
    async fn test_foreign_recipe_cannot_be_deleted() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let saved = store.insert(recipe(owner, "Mine")).await.unwrap();
        let id = saved.id.unwrap();

        assert!(!RecipeRepository::delete(&store, &ObjectId::new(), &id).await.unwrap());
        assert!(RecipeRepository::delete(&store, &owner, &id).await.unwrap());
    }

    #[actix_web::test]
    async fn test_label_get_or_create_is_idempotent() {
        let tags = MemoryStore::new().labels(LabelKind::Tag);
        let owner = ObjectId::new();

        let a = tags.get_or_create(&owner, "Vegan").await.unwrap();
        let b = tags.get_or_create(&owner, "Vegan").await.unwrap();
        let other_owner = tags.get_or_create(&ObjectId::new(), "Vegan").await.unwrap();

        assert_eq!(a.id, b.id);
        assert_ne!(a.id, other_owner.id);
    }

    #[actix_web::test]
    async fn test_label_kinds_are_separate() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();

        store.labels(LabelKind::Tag).get_or_create(&owner, "Salt").await.unwrap();

        let ingredients = store.labels(LabelKind::Ingredient).list(&owner, None).await.unwrap();
        assert!(ingredients.is_empty());
    }

    #[actix_web::test]
    async fn test_label_list_sorted_by_name_descending() {
        let tags = MemoryStore::new().labels(LabelKind::Tag);
        let owner = ObjectId::new();

        for name in ["Breakfast", "Vegan", "Dessert"] {
            tags.get_or_create(&owner, name).await.unwrap();
        }

        let names: Vec<String> = tags
            .list(&owner, None)
            .await
            .unwrap()
            .into_iter()
            .map(|l| l.name)
            .collect();

        assert_eq!(names, vec!["Vegan", "Dessert", "Breakfast"]);
    }

    #[actix_web::test]
    async fn test_label_rename_conflict() {
        let tags = MemoryStore::new().labels(LabelKind::Tag);
        let owner = ObjectId::new();

        tags.get_or_create(&owner, "Vegan").await.unwrap();
        let dessert = tags.get_or_create(&owner, "Dessert").await.unwrap();
        let id = dessert.id.unwrap();

        let err = tags.rename(&owner, &id, "Vegan").await.unwrap_err();
        assert!(matches!(err, AppError::ConflictError(_)));

        let renamed = tags.rename(&owner, &id, "Sweets").await.unwrap().unwrap();
        assert_eq!(renamed.name, "Sweets");

        assert!(tags.rename(&ObjectId::new(), &id, "Stolen").await.unwrap().is_none());
    }

    #[actix_web::test]
    async fn test_assigned_ids_and_detach() {
        let store = MemoryStore::new();
        let owner = ObjectId::new();
        let tag = ObjectId::new();

        for title in ["One", "Two"] {
            let mut r = recipe(owner, title);
            r.tag_ids.push(tag);
            store.insert(r).await.unwrap();
        }

        let assigned = store.assigned_label_ids(&owner, LabelKind::Tag).await.unwrap();
        assert_eq!(assigned, vec![tag]);

        store.detach_label(&owner, LabelKind::Tag, &tag).await.unwrap();
        assert!(store.assigned_label_ids(&owner, LabelKind::Tag).await.unwrap().is_empty());
    }
}
