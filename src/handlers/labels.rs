//! # Tag / Ingredient HTTP Handlers
//!
//! 태그(`/recipe/tags`)와 재료(`/recipe/ingredients`)는 같은 핸들러를
//! [`LabelRoute`] 타입 인자로 구분해 사용합니다.
//!
//! | 메서드 | 경로 | 설명 |
//! |--------|------|------|
//! | `GET` | `/recipe/tags` | 목록 (`?assigned_only=1`) |
//! | `GET` | `/recipe/tags/{id}` | 상세 |
//! | `PUT` / `PATCH` | `/recipe/tags/{id}` | 이름 변경 |
//! | `DELETE` | `/recipe/tags/{id}` | 삭제 (모든 레시피에서 연결 해제) |
//!
//! 생성 엔드포인트는 없습니다. 레이블은 레시피 요청의 중첩 입력으로만 생성됩니다.

use actix_web::{web, HttpResponse};

use crate::core::errors::AppError;
use crate::domain::dto::recipes::request::{LabelListQuery, LabelUpdateRequest, WriteMode};
use crate::domain::entities::recipes::LabelKind;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::recipes::LabelServices;

/// 라우트가 다루는 레이블 종류
pub trait LabelRoute: 'static {
    const KIND: LabelKind;
}

pub struct Tags;
pub struct Ingredients;

impl LabelRoute for Tags {
    const KIND: LabelKind = LabelKind::Tag;
}

impl LabelRoute for Ingredients {
    const KIND: LabelKind = LabelKind::Ingredient;
}

pub async fn list_labels<R: LabelRoute>(
    label_services: web::Data<LabelServices>,
    user: AuthenticatedUser,
    query: web::Query<LabelListQuery>,
) -> Result<HttpResponse, AppError> {
    let assigned_only = query.assigned_only()?;
    let labels = label_services
        .get(R::KIND)
        .list(&user.user_id, assigned_only)
        .await?;
    Ok(HttpResponse::Ok().json(labels))
}

pub async fn get_label<R: LabelRoute>(
    label_services: web::Data<LabelServices>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let label = label_services.get(R::KIND).get(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(label))
}

pub async fn replace_label<R: LabelRoute>(
    label_services: web::Data<LabelServices>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<LabelUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let label = label_services
        .get(R::KIND)
        .update(&user.user_id, &path, payload.into_inner(), WriteMode::Replace)
        .await?;
    Ok(HttpResponse::Ok().json(label))
}

pub async fn patch_label<R: LabelRoute>(
    label_services: web::Data<LabelServices>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<LabelUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let label = label_services
        .get(R::KIND)
        .update(&user.user_id, &path, payload.into_inner(), WriteMode::Partial)
        .await?;
    Ok(HttpResponse::Ok().json(label))
}

pub async fn delete_label<R: LabelRoute>(
    label_services: web::Data<LabelServices>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    label_services.get(R::KIND).delete(&user.user_id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}
