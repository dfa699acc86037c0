//! # Admin HTTP Handlers
//!
//! `staff` 역할 사용자만 접근할 수 있는 사용자 관리 엔드포인트입니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/admin/users` | 사용자 목록 |
//! | `POST` | `/admin/users` | 사용자 생성 (계정 플래그 지정) |
//! | `GET` | `/admin/users/{id}` | 사용자 조회 |
//! | `PATCH` | `/admin/users/{id}` | 이름, 비밀번호, 계정 플래그 수정 |

use actix_web::{web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::users::request::{AdminCreateUserRequest, AdminUpdateUserRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::users::UserService;

pub async fn list_users(user_service: web::Data<UserService>) -> Result<HttpResponse, AppError> {
    let users = user_service.list_users().await?;
    Ok(HttpResponse::Ok().json(users))
}

pub async fn create_user(
    user_service: web::Data<UserService>,
    admin: AuthenticatedUser,
    payload: web::Json<AdminCreateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let created = user_service.create_user_as_admin(payload.into_inner()).await?;
    log::info!("관리자 {}가 사용자 생성: {}", admin.email, created.email);

    Ok(HttpResponse::Created().json(created))
}

pub async fn get_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.get_user(&path).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub async fn update_user(
    user_service: web::Data<UserService>,
    path: web::Path<String>,
    payload: web::Json<AdminUpdateUserRequest>,
) -> Result<HttpResponse, AppError> {
    let user = user_service.update_user(&path, payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}
