//! 데이터 액세스 계층을 담당하는 리포지토리 모듈
//!
//! 각 저장소는 `async_trait` 트레이트로 정의되고, 서비스 계층은 `Arc<dyn ...>`로만
//! 접근합니다. 구현은 두 가지입니다.
//!
//! - MongoDB 구현 ([`users::MongoUserRepository`] 등): 운영 환경용.
//!   사용자 조회는 Redis 캐시를 선택적으로 사용합니다.
//! - 메모리 구현 ([`memory::MemoryStore`]): 로컬 개발과 통합 테스트용.
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::repositories::Repositories;
//!
//! let repositories = Repositories::in_memory();
//! let user = repositories.users.find_by_email("cook@example.com").await?;
//! ```

use std::sync::Arc;

use mongodb::error::{ErrorKind, WriteFailure};

use crate::caching::redis::RedisClient;
use crate::core::errors::AppResult;
use crate::db::Database;
use crate::domain::entities::recipes::LabelKind;

pub mod users;
pub mod tokens;
pub mod recipes;
pub mod memory;

use memory::MemoryStore;
use recipes::{LabelRepository, MongoLabelRepository, MongoRecipeRepository, RecipeRepository};
use tokens::{MongoTokenRepository, TokenRepository};
use users::{MongoUserRepository, UserRepository};

/// MongoDB 유니크 인덱스 위반(E11000) 여부
pub fn is_duplicate_key(error: &mongodb::error::Error) -> bool {
    const DUPLICATE_KEY: i32 = 11000;

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(e)) => e.code == DUPLICATE_KEY,
        ErrorKind::Command(e) => e.code == DUPLICATE_KEY,
        _ => false,
    }
}

/// 서비스 계층에 주입되는 리포지토리 묶음
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenRepository>,
    pub recipes: Arc<dyn RecipeRepository>,
    pub tags: Arc<dyn LabelRepository>,
    pub ingredients: Arc<dyn LabelRepository>,
}

impl Repositories {
    /// MongoDB 저장소를 구성하고 필요한 인덱스를 생성합니다.
    pub async fn mongo(db: Arc<Database>, redis: Option<Arc<RedisClient>>) -> AppResult<Self> {
        let users = MongoUserRepository::new(db.clone(), redis);
        let tokens = MongoTokenRepository::new(db.clone());
        let recipes = MongoRecipeRepository::new(db.clone());
        let tags = MongoLabelRepository::new(db.clone(), LabelKind::Tag);
        let ingredients = MongoLabelRepository::new(db, LabelKind::Ingredient);

        users.create_indexes().await?;
        tokens.create_indexes().await?;
        recipes.create_indexes().await?;
        tags.create_indexes().await?;
        ingredients.create_indexes().await?;

        Ok(Self {
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            recipes: Arc::new(recipes),
            tags: Arc::new(tags),
            ingredients: Arc::new(ingredients),
        })
    }

    /// 프로세스 메모리에만 존재하는 저장소를 구성합니다.
    pub fn in_memory() -> Self {
        let store = MemoryStore::new();

        Self {
            users: Arc::new(store.clone()),
            tokens: Arc::new(store.clone()),
            recipes: Arc::new(store.clone()),
            tags: Arc::new(store.labels(LabelKind::Tag)),
            ingredients: Arc::new(store.labels(LabelKind::Ingredient)),
        }
    }

    pub fn labels(&self, kind: LabelKind) -> Arc<dyn LabelRepository> {
        match kind {
            LabelKind::Tag => self.tags.clone(),
            LabelKind::Ingredient => self.ingredients.clone(),
        }
    }
}
