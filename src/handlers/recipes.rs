//! # Recipe HTTP Handlers
//!
//! | 메서드 | 경로 | 설명 | 상태 코드 |
//! |--------|------|------|-----------|
//! | `GET` | `/recipe/recipes` | 목록 (`?tags=`, `?ingredients=` 필터) | 200 |
//! | `POST` | `/recipe/recipes` | 생성 | 201 |
//! | `GET` | `/recipe/recipes/{id}` | 상세 | 200 |
//! | `PUT` | `/recipe/recipes/{id}` | 전체 수정 | 200 |
//! | `PATCH` | `/recipe/recipes/{id}` | 부분 수정 | 200 |
//! | `DELETE` | `/recipe/recipes/{id}` | 삭제 | 204 |
//! | `POST` | `/recipe/recipes/{id}/upload-image` | 이미지 업로드 (multipart `image`) | 200 |
//!
//! 모든 엔드포인트는 호출자 소유의 레시피만 다룹니다.

use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::TryStreamExt;

use crate::core::errors::{AppError, AppResult};
use crate::domain::dto::recipes::request::{RecipeListQuery, RecipePayload, WriteMode};
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::recipes::image_service::too_large;
use crate::services::recipes::RecipeService;

/// 업로드 이미지가 담기는 multipart 필드 이름
const IMAGE_FIELD: &str = "image";

pub async fn list_recipes(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    query: web::Query<RecipeListQuery>,
) -> Result<HttpResponse, AppError> {
    let filter = query.filter()?;
    let recipes = recipe_service.list(&user.user_id, &filter).await?;
    Ok(HttpResponse::Ok().json(recipes))
}

pub async fn create_recipe(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipe_service.create(&user.user_id, payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(recipe))
}

pub async fn get_recipe(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipe_service.get(&user.user_id, &path).await?;
    Ok(HttpResponse::Ok().json(recipe))
}

pub async fn replace_recipe(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipe_service
        .update(&user.user_id, &path, payload.into_inner(), WriteMode::Replace)
        .await?;
    Ok(HttpResponse::Ok().json(recipe))
}

pub async fn patch_recipe(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<RecipePayload>,
) -> Result<HttpResponse, AppError> {
    let recipe = recipe_service
        .update(&user.user_id, &path, payload.into_inner(), WriteMode::Partial)
        .await?;
    Ok(HttpResponse::Ok().json(recipe))
}

pub async fn delete_recipe(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    recipe_service.delete(&user.user_id, &path).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// 레시피 이미지 업로드
///
/// 응답의 `image`는 절대 URI가 아니라 `MEDIA_URL` 접두사가 붙은 경로
/// (`/media/uploads/recipe/<uuid>.png`)입니다. 이 경로의 정적 파일 제공은
/// 앞단 웹 서버가 `MEDIA_ROOT`를 노출하는 것으로 처리합니다.
///
/// ```bash
/// curl -X POST http://localhost:8080/recipe/recipes/<id>/upload-image \
///   -H "Authorization: Token <key>" \
///   -F "image=@pie.png"
/// ```
pub async fn upload_image(
    recipe_service: web::Data<RecipeService>,
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse, AppError> {
    let bytes = read_image_field(payload, recipe_service.images().max_upload_bytes()).await?;
    let response = recipe_service.upload_image(&user.user_id, &path, bytes).await?;
    Ok(HttpResponse::Ok().json(response))
}

/// multipart 본문에서 `image` 필드의 바이트를 읽습니다.
///
/// 다른 필드는 읽고 버립니다. 크기 상한을 넘으면 즉시 중단합니다.
async fn read_image_field(mut payload: Multipart, max_bytes: usize) -> AppResult<Vec<u8>> {
    let mut image: Option<Vec<u8>> = None;

    while let Some(mut field) = payload.try_next().await.map_err(malformed)? {
        let wanted = image.is_none() && field.name() == Some(IMAGE_FIELD);
        let mut bytes = Vec::new();

        while let Some(chunk) = field.try_next().await.map_err(malformed)? {
            if !wanted {
                continue;
            }
            if bytes.len() + chunk.len() > max_bytes {
                return Err(too_large(max_bytes));
            }
            bytes.extend_from_slice(&chunk);
        }

        if wanted {
            image = Some(bytes);
        }
    }

    match image {
        Some(bytes) if !bytes.is_empty() => Ok(bytes),
        Some(_) => Err(AppError::field(IMAGE_FIELD, "제출된 파일이 비어 있습니다")),
        None => Err(AppError::field(IMAGE_FIELD, "파일이 제출되지 않았습니다")),
    }
}

fn malformed(error: actix_multipart::MultipartError) -> AppError {
    AppError::ValidationError(format!("잘못된 multipart 요청입니다: {}", error))
}
