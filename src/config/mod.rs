//! # Configuration Module
//!
//! 레시피 서비스의 설정 관리를 담당하는 모듈입니다.
//! 모든 설정값은 환경 변수(`.env.{PROFILE}` 파일 포함)에서 읽어옵니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, 저장소, 미디어, bcrypt 설정
//! - [`auth_config`] - API 토큰 형식, 초기 관리자 계정 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="8080"
//! export WORKERS="4"
//!
//! # 저장소
//! export STORAGE_BACKEND="mongo"          # mongo | memory
//! export MONGODB_URI="mongodb://localhost:27017"
//! export DATABASE_NAME="recipe_service"
//! export REDIS_URL="redis://localhost:6379"
//! export CACHE_ENABLED="true"
//!
//! # 미디어
//! export MEDIA_ROOT="./media"
//! export MEDIA_URL="/media/"
//! export MAX_UPLOAD_BYTES="10485760"
//!
//! # 보안
//! export ENVIRONMENT="production"         # development, test, staging, production
//! export BCRYPT_COST="12"                 # 4-15 범위
//! export SUPERUSER_EMAIL="admin@example.com"
//! export SUPERUSER_PASSWORD="change-me-please"
//! ```

pub mod data_config;
pub mod auth_config;

pub use data_config::*;
pub use auth_config::*;
