//! # Token HTTP Handlers
//!
//! `POST /user/token`으로 이메일/비밀번호를 보내 API 토큰을 발급받습니다.
//! 같은 사용자는 항상 같은 토큰을 받습니다.
//!
//! ```bash
//! curl -X POST http://localhost:8080/user/token \
//!   -H "Content-Type: application/json" \
//!   -d '{"email":"cook@example.com","password":"1234567890"}'
//! # {"token":"9944b09199c62bcf9418ad846dd0e4bbdfc6ee4b"}
//! ```

use actix_web::{web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::users::request::TokenRequest;
use crate::services::auth::TokenService;

pub async fn create_token(
    token_service: web::Data<TokenService>,
    payload: web::Json<TokenRequest>,
) -> Result<HttpResponse, AppError> {
    let response = token_service.create_token(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
