//! 통합 테스트 공용 헬퍼
//!
//! 메모리 저장소, bcrypt cost 4, 임시 `MEDIA_ROOT`로 전체 앱을 구성합니다.
#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::test::TestRequest;
use actix_web::{middleware, web, App};
use serde_json::json;
use uuid::Uuid;

use recipe_service_backend::config::StorageBackend;
use recipe_service_backend::repositories::Repositories;
use recipe_service_backend::routes::configure_all_routes;
use recipe_service_backend::services::recipes::ImageStore;
use recipe_service_backend::services::AppServices;

pub const PASSWORD: &str = "correct-horse-battery";
pub const MEDIA_URL: &str = "/media/";
pub const MAX_UPLOAD_BYTES: usize = 64 * 1024;
pub const BOUNDARY: &str = "----recipe-test-boundary";

pub struct TestContext {
    pub services: AppServices,
    pub media_root: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let media_root = std::env::temp_dir().join(format!("recipe-media-{}", Uuid::new_v4()));
        let images = ImageStore::new(media_root.clone(), MEDIA_URL.to_string(), MAX_UPLOAD_BYTES);

        Self {
            services: AppServices::new(Repositories::in_memory(), 4, images),
            media_root,
        }
    }

    /// 운영 서버와 같은 라우트 구성을 가진 앱
    ///
    /// 서비스는 복제되어 들어가므로 반환된 앱은 `self`를 빌리지 않습니다.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse<impl MessageBody + use<>>,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        let services = self.services.clone();

        App::new()
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::Data::new(StorageBackend::Memory))
            .configure(move |cfg| services.register(cfg))
            .configure(configure_all_routes)
    }

    /// `STAFF_EMAIL`로 staff 계정을 미리 만들어 둡니다.
    pub async fn with_staff(self) -> Self {
        self.services
            .users
            .create_superuser(STAFF_EMAIL, PASSWORD, "Staff")
            .await
            .expect("superuser");
        self
    }
}

pub const STAFF_EMAIL: &str = "staff@example.com";

impl Drop for TestContext {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.media_root);
    }
}

pub fn create_user_request(email: &str) -> TestRequest {
    TestRequest::post()
        .uri("/user/create")
        .set_json(json!({ "email": email, "password": PASSWORD, "name": "Test Cook" }))
}

pub fn token_request(email: &str, password: &str) -> TestRequest {
    TestRequest::post()
        .uri("/user/token")
        .set_json(json!({ "email": email, "password": password }))
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Token {}", token))
}

/// 10x10 PNG 바이트
pub fn png_bytes() -> Vec<u8> {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(10, 10, image::Rgb([200, 80, 40])));
    let mut buffer = Cursor::new(Vec::new());
    image
        .write_to(&mut buffer, image::ImageFormat::Png)
        .expect("encode png");
    buffer.into_inner()
}

/// 필드 하나짜리 multipart/form-data 본문
pub fn multipart_body(field: &str, filename: &str, bytes: &[u8]) -> Vec<u8> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> (&'static str, String) {
    ("Content-Type", format!("multipart/form-data; boundary={}", BOUNDARY))
}

/// 회원가입 후 토큰을 발급받아 반환합니다.
macro_rules! signup {
    ($app:expr, $email:expr) => {{
        let resp = actix_web::test::call_service(
            &$app,
            $crate::common::create_user_request($email).to_request(),
        )
        .await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::CREATED);
        login!($app, $email)
    }};
}

/// 기존 계정으로 토큰을 발급받아 반환합니다.
macro_rules! login {
    ($app:expr, $email:expr) => {{
        let body: serde_json::Value = actix_web::test::call_and_read_body_json(
            &$app,
            $crate::common::token_request($email, $crate::common::PASSWORD).to_request(),
        )
        .await;
        body["token"].as_str().expect("token").to_string()
    }};
}
