//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시 지원과 JSON 기반 객체 직렬화를 제공합니다.
//! 현재는 인증 미들웨어가 요청마다 수행하는 사용자 조회를 캐싱하는 데 사용됩니다.
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379  # 기본값
//! CACHE_ENABLED=true                # false면 Redis에 연결하지 않음
//! ```

pub mod redis;
