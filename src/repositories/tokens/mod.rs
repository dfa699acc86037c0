//! 인증 토큰 리포지토리

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::entities::tokens::AuthToken;

pub mod token_repository;

pub use token_repository::MongoTokenRepository;

/// 사용자당 하나의 토큰을 보관하는 저장소
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// 후보 토큰의 사용자에게 이미 토큰이 있으면 기존 토큰을, 없으면 후보를 저장해 반환합니다.
    async fn get_or_create(&self, candidate: AuthToken) -> AppResult<AuthToken>;

    async fn find_by_key(&self, key: &str) -> AppResult<Option<AuthToken>>;
}
