//! # Route Table
//!
//! 모든 엔드포인트를 `web::resource` 단위로 등록합니다. 한 경로의 메서드들이
//! 하나의 리소스에 모여 있으므로 지원하지 않는 메서드는 405로 응답합니다.
//!
//! | 범위 | 인증 |
//! |------|------|
//! | `/health`, `/user/create`, `/user/token` | 없음 |
//! | `/user/me`, `/recipe/*` | 토큰 필요 |
//! | `/admin/*` | 토큰 + staff |
//!
//! JSON 본문, 쿼리 문자열, 경로 파라미터 파싱 실패는 모두 `AppError::ValidationError`(400)로
//! 변환됩니다.

use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::config::StorageBackend;
use crate::core::errors::AppError;
use crate::handlers::{self, labels::LabelRoute};
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
///
/// 서비스(`web::Data`)는 별도로 등록되어 있어야 합니다.
///
/// ```rust,ignore
/// let app = App::new()
///     .configure(|cfg| services.register(cfg))
///     .configure(configure_all_routes);
/// ```
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    configure_extractors(cfg);

    cfg.service(web::resource("/health").route(web::get().to(health_check)));

    configure_user_routes(cfg);
    configure_recipe_routes(cfg);
    configure_admin_routes(cfg);
}

fn configure_extractors(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("잘못된 JSON 본문입니다: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("잘못된 쿼리 문자열입니다: {}", err)).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("잘못된 경로입니다: {}", err)).into()
    }));
}

/// 사용자 라우트
///
/// - `POST /user/create` - 회원가입
/// - `POST /user/token` - 토큰 발급
/// - `GET|PATCH /user/me` - 내 프로필 (인증 필요)
fn configure_user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/user")
            .service(web::resource("/create").route(web::post().to(handlers::users::create_user)))
            .service(web::resource("/token").route(web::post().to(handlers::auth::create_token)))
            .service(
                web::resource("/me")
                    .route(web::get().to(handlers::users::get_me))
                    .route(web::patch().to(handlers::users::update_me))
                    .wrap(AuthMiddleware::required()),
            ),
    );
}

/// 레시피/태그/재료 라우트. 전부 인증이 필요합니다.
fn configure_recipe_routes(cfg: &mut web::ServiceConfig) {
    use handlers::labels::{Ingredients, Tags};
    use handlers::recipes;

    cfg.service(
        web::scope("/recipe")
            .wrap(AuthMiddleware::required())
            .service(
                web::resource("/recipes")
                    .route(web::get().to(recipes::list_recipes))
                    .route(web::post().to(recipes::create_recipe)),
            )
            .service(
                web::resource("/recipes/{id}")
                    .route(web::get().to(recipes::get_recipe))
                    .route(web::put().to(recipes::replace_recipe))
                    .route(web::patch().to(recipes::patch_recipe))
                    .route(web::delete().to(recipes::delete_recipe)),
            )
            .service(
                web::resource("/recipes/{id}/upload-image")
                    .route(web::post().to(recipes::upload_image)),
            )
            .configure(label_routes::<Tags>("/tags"))
            .configure(label_routes::<Ingredients>("/ingredients")),
    );
}

/// 레이블 종류 하나의 목록/상세 리소스를 만듭니다. 생성(POST)은 제공하지 않습니다.
fn label_routes<R: LabelRoute>(prefix: &'static str) -> impl FnOnce(&mut web::ServiceConfig) {
    use handlers::labels;

    move |cfg| {
        cfg.service(web::resource(prefix).route(web::get().to(labels::list_labels::<R>)))
            .service(
                web::resource(format!("{}/{{id}}", prefix))
                    .route(web::get().to(labels::get_label::<R>))
                    .route(web::put().to(labels::replace_label::<R>))
                    .route(web::patch().to(labels::patch_label::<R>))
                    .route(web::delete().to(labels::delete_label::<R>)),
            );
    }
}

/// 관리자 라우트 (staff 전용)
fn configure_admin_routes(cfg: &mut web::ServiceConfig) {
    use handlers::admin;

    cfg.service(
        web::scope("/admin")
            .wrap(AuthMiddleware::staff())
            .service(
                web::resource("/users")
                    .route(web::get().to(admin::list_users))
                    .route(web::post().to(admin::create_user)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::get().to(admin::get_user))
                    .route(web::patch().to(admin::update_user)),
            ),
    );
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "recipe_service_backend",
///   "version": "0.1.0",
///   "timestamp": "2024-01-01T00:00:00+00:00",
///   "storage": "mongodb"
/// }
/// ```
async fn health_check(storage: Option<web::Data<StorageBackend>>) -> HttpResponse {
    let storage = storage.map_or("unknown", |backend| backend.as_str());

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "storage": storage,
    }))
}
