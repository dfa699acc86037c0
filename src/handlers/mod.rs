//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 서비스 호출로 연결하는 핸들러 함수들입니다.
//! 핸들러는 비즈니스 규칙을 갖지 않고 다음 순서만 수행합니다.
//!
//! 1. 추출자(`web::Json`, `web::Path`, `web::Query`, `Multipart`)로 입력 파싱
//! 2. 인증 미들웨어가 넣어 둔 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser) 추출
//! 3. `web::Data<Service>`로 주입된 서비스 호출
//! 4. 상태 코드를 정해 JSON 응답 반환
//!
//! ```text
//! Client ─▶ routes ─▶ AuthMiddleware ─▶ handlers ─▶ services ─▶ repositories
//! ```
//!
//! 모든 핸들러는 `Result<HttpResponse, AppError>`를 반환하며, 에러는
//! [`AppError`](crate::core::errors::AppError)의 `ResponseError` 구현으로
//! JSON 응답이 됩니다.
//!
//! 라우트 등록은 [`crate::routes`]에서 `web::resource`로 명시적으로 이루어집니다.

pub mod users;
pub mod auth;
pub mod recipes;
pub mod labels;
pub mod admin;
