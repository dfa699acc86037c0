//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 저장되는 엔티티와 API 계약(DTO),
//! 요청 처리 중에 쓰이는 값 객체를 정의합니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서 (User, AuthToken, Recipe, Label)
//! ├── dto       - 요청/응답 구조체와 검증 규칙
//! └── models    - AuthenticatedUser, RequiredRole, RecipeFilter
//!      │
//!      ▼
//! Services → Repositories → MongoDB / Memory
//! ```
//!
//! 엔티티는 외부로 직접 직렬화되지 않습니다. 응답은 항상 `dto::*::response`의
//! 구조체를 거치며, 비밀번호 해시 같은 내부 필드는 그 단계에서 제거됩니다.

pub mod entities;
pub mod dto;
pub mod models;
