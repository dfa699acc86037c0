//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용되는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Token`/`Bearer` 스킴의 불투명 토큰 검증
//! - 비활성 사용자의 토큰 거부
//! - 사용자 정보를 request extension에 저장
//! - 라우트별 역할 요구 (관리자 API는 `staff`)
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/recipe")
//!             .wrap(AuthMiddleware::required())
//!             .route("/recipes", web::get().to(list_recipes))
//!     )
//!     .service(
//!         web::scope("/admin")
//!             .wrap(AuthMiddleware::staff())
//!             .route("/users", web::get().to(list_users))
//!     )
//! ```
//!
//! 미들웨어는 `web::Data<TokenService>`가 앱 데이터로 등록되어 있어야 합니다.

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
