//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 프로세스 시작 시 [`AppServices::new`]에서 한 번 생성되고,
//! `web::Data`로 각 워커에 공유됩니다. 저장소는 생성자 인자로 주입되므로
//! 운영(MongoDB)과 테스트(메모리)가 같은 서비스 코드를 사용합니다.
//!
//! # Features
//!
//! - 사용자 등록, 자격 증명 확인, 프로필/관리자 계정 관리
//! - 불투명 API 토큰 발급 및 검증
//! - 소유자 범위의 레시피/태그/재료 관리와 이미지 업로드
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::AppServices;
//!
//! let services = AppServices::new(Repositories::in_memory(), 4, ImageStore::from_config());
//! App::new().configure(|cfg| services.register(cfg));
//! ```

use std::sync::Arc;

use actix_web::web;

use crate::repositories::Repositories;

pub mod users;
pub mod auth;
pub mod recipes;

use auth::TokenService;
use recipes::{ImageStore, LabelService, LabelServices, RecipeService};
use users::UserService;

/// 애플리케이션 서비스 묶음
#[derive(Clone)]
pub struct AppServices {
    pub users: Arc<UserService>,
    pub tokens: Arc<TokenService>,
    pub recipes: Arc<RecipeService>,
    pub labels: Arc<LabelServices>,
}

impl AppServices {
    pub fn new(repositories: Repositories, bcrypt_cost: u32, images: ImageStore) -> Self {
        let users = Arc::new(UserService::new(repositories.users.clone(), bcrypt_cost));
        let tokens = Arc::new(TokenService::new(repositories.tokens.clone(), users.clone()));

        let recipes = Arc::new(RecipeService::new(
            repositories.recipes.clone(),
            repositories.tags.clone(),
            repositories.ingredients.clone(),
            Arc::new(images),
        ));

        let labels = Arc::new(LabelServices {
            tags: LabelService::new(repositories.tags.clone(), repositories.recipes.clone()),
            ingredients: LabelService::new(repositories.ingredients.clone(), repositories.recipes.clone()),
        });

        Self {
            users,
            tokens,
            recipes,
            labels,
        }
    }

    /// 핸들러와 미들웨어가 `web::Data<T>`로 꺼낼 수 있도록 등록합니다.
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::from(self.users.clone()))
            .app_data(web::Data::from(self.tokens.clone()))
            .app_data(web::Data::from(self.recipes.clone()))
            .app_data(web::Data::from(self.labels.clone()));
    }
}
