//! 레시피 서비스 메인 애플리케이션
//!
//! 설정을 읽고 저장소(MongoDB 또는 메모리)를 연결한 뒤 서비스를 구성하고
//! Actix-web HTTP 서버를 구동합니다.

use std::io;
use std::sync::Arc;

use actix_cors::Cors;
use actix_governor::{Governor, GovernorConfigBuilder};
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info, warn};

use recipe_service_backend::caching::redis::RedisClient;
use recipe_service_backend::config::{
    PasswordConfig, ServerConfig, StorageBackend, StorageConfig, SuperuserConfig,
};
use recipe_service_backend::db::Database;
use recipe_service_backend::repositories::Repositories;
use recipe_service_backend::routes::configure_all_routes;
use recipe_service_backend::services::recipes::ImageStore;
use recipe_service_backend::services::AppServices;
use recipe_service_backend::utils::display_terminal;

/// Rate Limiting 설정 구조체
#[derive(Debug)]
struct RateLimitConfig {
    per_second: u64,
    burst_size: u32,
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    // 환경 설정 및 로깅 초기화
    load_env_file();
    init_logging();

    display_terminal::print_boxed_title("🍳 RECIPE SERVICE BOOTSTRAP");

    let backend = StorageConfig::backend();

    display_terminal::print_step_start(1, "저장소 초기화");
    let (repositories, cache) = initialize_repositories(backend).await?;
    display_terminal::print_step_complete(1, "저장소 초기화", backend.as_str());

    display_terminal::print_step_start(2, "서비스 구성");
    let services = AppServices::new(
        repositories,
        PasswordConfig::bcrypt_cost(),
        ImageStore::from_config(),
    );
    display_terminal::print_sub_task("bcrypt cost", &PasswordConfig::bcrypt_cost().to_string());
    display_terminal::print_sub_task(
        "media root",
        &services.recipes.images().media_root().display().to_string(),
    );
    display_terminal::print_step_complete(2, "서비스 구성", "users, tokens, recipes, labels");

    display_terminal::print_step_start(3, "관리자 계정 확인");
    ensure_superuser(&services).await?;

    let bind_address = format!("{}:{}", ServerConfig::host(), ServerConfig::port());
    display_terminal::print_startup_summary(backend.as_str(), cache, &bind_address);

    start_http_server(services, backend, bind_address).await
}

/// HTTP 서버를 구성하고 실행합니다
///
/// 미들웨어는 바깥쪽부터 Rate Limiting, CORS, 요청 로깅, 경로 정규화 순서로 적용됩니다.
///
/// # Errors
///
/// * `io::Error` - 포트 바인딩 실패 또는 서버 실행 오류
async fn start_http_server(
    services: AppServices,
    backend: StorageBackend,
    bind_address: String,
) -> io::Result<()> {
    info!("🌐 서버가 http://{} 에서 실행중입니다", bind_address);
    info!("📍 Health check: http://{}/health", bind_address);

    // Rate Limiting 설정
    let rate_limit_config = load_rate_limit_config();
    let governor_conf = GovernorConfigBuilder::default()
        .requests_per_second(rate_limit_config.per_second)
        .burst_size(rate_limit_config.burst_size)
        .use_headers()
        .finish()
        .ok_or_else(|| io::Error::other("Rate Limiting 설정이 올바르지 않습니다"))?;

    info!(
        "🛡️ Rate Limiting 활성화: 초당 {}요청, 버스트 {}개",
        rate_limit_config.per_second,
        rate_limit_config.burst_size
    );

    let allowed_origins = ServerConfig::allowed_origins();
    let storage = web::Data::new(backend);

    HttpServer::new(move || {
        let services = services.clone();

        App::new()
            // Rate Limiting 미들웨어 (가장 먼저 적용)
            .wrap(Governor::new(&governor_conf))
            .wrap(configure_cors(&allowed_origins))
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(storage.clone())
            .configure(|cfg| services.register(cfg))
            .configure(configure_all_routes)
    })
    .bind(bind_address)?
    .workers(ServerConfig::workers())
    .run()
    .await
}

/// 환경별 설정 파일을 로드합니다
///
/// * `PROFILE=dev` - .env.dev 파일 로드 (기본값)
/// * `PROFILE=prod` - .env.prod 파일 로드
/// * 기타 - 기본 .env 파일 로드
fn load_env_file() {
    let profile = std::env::var("PROFILE").unwrap_or_else(|_| "dev".to_string());

    // 로거 초기화 전이므로 결과는 터미널에 직접 출력합니다.
    let loaded = match profile.as_str() {
        "prod" => dotenv::from_filename(".env.prod").map(|_| ".env.prod"),
        "dev" => dotenv::from_filename(".env.dev").map(|_| ".env.dev"),
        _ => dotenv().map(|_| ".env"),
    };

    match loaded {
        Ok(file) => println!("Current profile: {} ({} 로드됨)", profile, file),
        Err(e) => println!("Current profile: {} (환경 파일 없음: {})", profile, e),
    }
}

/// 로깅 시스템을 초기화합니다
///
/// * `RUST_LOG` - 로깅 레벨 설정 (기본값: "info,actix_web=debug")
///
/// ```bash
/// RUST_LOG=recipe_service_backend::services=debug cargo run
/// ```
fn init_logging() {
    env_logger::init_from_env(Env::default().default_filter_or("info,actix_web=debug"));
}

/// 설정된 백엔드로 리포지토리를 구성합니다
///
/// MongoDB 백엔드에서는 Redis 캐시를 선택적으로 연결합니다. Redis 연결 실패는
/// 경고만 남기고 캐시 없이 진행합니다. 두 번째 반환값은 캐시 상태 문자열입니다.
async fn initialize_repositories(
    backend: StorageBackend,
) -> io::Result<(Repositories, &'static str)> {
    match backend {
        StorageBackend::Memory => {
            warn!("⚠️ 메모리 저장소를 사용합니다. 재시작하면 데이터가 사라집니다");
            Ok((Repositories::in_memory(), "disabled"))
        }
        StorageBackend::Mongo => {
            info!("📡 데이터베이스 연결 중...");

            let database = Database::new().await.map_err(|e| {
                error!("MongoDB 연결 실패: {}", e);
                io::Error::other(format!("MongoDB 연결 실패: {}", e))
            })?;
            display_terminal::print_sub_task("MongoDB", database.database_name());

            let redis = connect_cache().await;
            let cache = if redis.is_some() { "redis" } else { "disabled" };
            display_terminal::print_sub_task("Redis", cache);

            let repositories = Repositories::mongo(Arc::new(database), redis)
                .await
                .map_err(|e| io::Error::other(format!("인덱스 생성 실패: {}", e)))?;
            display_terminal::print_sub_task("indexes", "ready");

            Ok((repositories, cache))
        }
    }
}

async fn connect_cache() -> Option<Arc<RedisClient>> {
    if !StorageConfig::cache_enabled() {
        info!("Redis 캐시 비활성화 (CACHE_ENABLED=false)");
        return None;
    }

    match RedisClient::connect(&StorageConfig::redis_url()).await {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("Redis 연결 실패, 캐시 없이 진행합니다: {}", e);
            None
        }
    }
}

async fn ensure_superuser(services: &AppServices) -> io::Result<()> {
    let Some(config) = SuperuserConfig::from_env() else {
        display_terminal::print_step_complete(3, "관리자 계정 확인", "설정 없음, 건너뜀");
        return Ok(());
    };

    let created = services
        .users
        .ensure_superuser(&config)
        .await
        .map_err(|e| io::Error::other(format!("관리자 계정 생성 실패: {}", e)))?;

    let detail = if created { "생성됨" } else { "이미 존재" };
    display_terminal::print_step_complete(3, "관리자 계정 확인", detail);

    Ok(())
}

/// CORS 설정을 구성합니다
///
/// `CORS_ALLOWED_ORIGINS`에 지정된 Origin만 허용합니다.
fn configure_cors(allowed_origins: &[String]) -> Cors {
    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "PATCH", "OPTIONS"])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .supports_credentials()
        // Preflight 요청 캐시 시간 (초)
        .max_age(3600)
}

/// 환경변수에서 Rate Limiting 설정을 로드합니다
///
/// * `RATE_LIMIT_PER_SECOND` - 초당 허용 요청 수 (기본값: 100)
/// * `RATE_LIMIT_BURST_SIZE` - 버스트 허용량 (기본값: 200)
fn load_rate_limit_config() -> RateLimitConfig {
    let per_second = std::env::var("RATE_LIMIT_PER_SECOND")
        .unwrap_or_else(|_| "100".to_string())
        .parse::<u64>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_PER_SECOND 파싱 실패: {}. 기본값 100 사용", e);
            100
        });

    let burst_size = std::env::var("RATE_LIMIT_BURST_SIZE")
        .unwrap_or_else(|_| "200".to_string())
        .parse::<u32>()
        .unwrap_or_else(|e| {
            error!("RATE_LIMIT_BURST_SIZE 파싱 실패: {}. 기본값 200 사용", e);
            200
        });

    let config = RateLimitConfig {
        per_second,
        burst_size,
    };

    info!("Rate Limiting 설정 로드됨: {:?}", config);
    config
}
