//! 토큰 인증 미들웨어
//!
//! `Authorization: Token <key>` (또는 `Bearer <key>`) 헤더를 검증하고
//! 확인된 사용자를 [`AuthenticatedUser`](crate::domain::models::auth::AuthenticatedUser)로
//! request extension에 저장합니다. 헤더가 없거나 토큰이 유효하지 않으면 401,
//! 요구 역할이 없으면 403으로 응답합니다.

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
    body::EitherBody,
};

use crate::domain::models::auth::RequiredRole;
use crate::middlewares::auth_inner::AuthMiddlewareService;

pub struct AuthMiddleware {
    required_role: Option<RequiredRole>,
}

impl AuthMiddleware {
    pub fn required() -> Self {
        Self { required_role: None }
    }

    /// 관리자 API 전용 (`staff` 역할)
    pub fn staff() -> Self {
        Self {
            required_role: Some(RequiredRole::staff()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
            required_role: self.required_role.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_staff_middleware_requires_staff_role() {
        let middleware = AuthMiddleware::staff();
        let required = middleware.required_role.unwrap();

        assert!(required.is_satisfied(&["user".to_string(), "staff".to_string()]));
        assert!(!required.is_satisfied(&["user".to_string()]));
    }

    #[test]
    fn test_plain_middleware_has_no_role() {
        assert!(AuthMiddleware::required().required_role.is_none());
    }
}
