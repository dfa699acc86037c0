//! 레시피 서비스 백엔드
//!
//! 사용자별 레시피, 태그, 재료를 관리하는 REST API 서비스입니다.
//! 불투명 API 토큰 인증, 중첩 태그/재료 해석, 목록 필터링,
//! 레시피 이미지 업로드를 제공합니다.
//!
//! # Features
//!
//! - **사용자 관리**: 회원가입, 토큰 발급, 프로필 수정, staff 전용 관리 API
//! - **소유자 범위 데이터**: 모든 레시피/태그/재료 조회는 호출자 소유로 제한
//! - **중첩 레이블**: 레시피 요청의 태그/재료 이름을 찾거나 생성
//! - **이미지 업로드**: 디코딩 검증 후 `MEDIA_ROOT`에 원자적으로 저장
//! - **MongoDB + Redis**: 영구 저장과 사용자 조회 캐싱 (메모리 백엔드 선택 가능)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트, AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청/응답 처리
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← 데이터 액세스 (트레이트)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소 (또는 메모리)
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use recipe_service_backend::repositories::Repositories;
//! use recipe_service_backend::services::{recipes::ImageStore, AppServices};
//!
//! let services = AppServices::new(Repositories::in_memory(), 4, ImageStore::from_config());
//! let app = App::new()
//!     .configure(|cfg| services.register(cfg))
//!     .configure(configure_all_routes);
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;
