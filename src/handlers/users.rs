//! # User HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `POST` | `/user/create` | 회원가입 | 201 Created |
//! | `GET` | `/user/me` | 내 프로필 조회 | 200 OK |
//! | `PATCH` | `/user/me` | 내 프로필 수정 (이름, 비밀번호) | 200 OK |
//!
//! `/user/me`는 인증 미들웨어 뒤에 등록되며, 비밀번호는 응답에 포함되지 않습니다.

use actix_web::{web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::users::request::{CreateUserRequest, UpdateProfileRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

/// 회원가입
///
/// ```bash
/// curl -X POST http://localhost:8080/user/create \
///   -H "Content-Type: application/json" \
///   -d '{"email":"cook@example.com","password":"1234567890","name":"Cook"}'
/// ```
pub async fn create_user(
    user_service: web::Data<UserService>,
    payload: web::Json<CreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let response = user_service.create_user(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(response))
}

pub async fn get_me(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let profile = user_service.get_profile(&user.user_id).await?;
    Ok(HttpResponse::Ok().json(profile))
}

/// 내 프로필 부분 수정. 이메일과 계정 플래그는 변경할 수 없습니다.
pub async fn update_me(
    user_service: web::Data<UserService>,
    user: AuthenticatedUser,
    payload: web::Json<UpdateProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let profile = user_service
        .update_profile(&user.user_id, payload.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(profile))
}
