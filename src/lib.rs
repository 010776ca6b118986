//! Set-Cookie 헤더의 `Domain` 속성을 재작성하는 리버스 프록시 미들웨어입니다.
//!
//! # 주요 기능
//!
//! - `handle(request, next)` 계약의 미들웨어 체인
//! - 응답 레코더를 통한 상태/헤더/바디 캡처 후 재작성
//! - Docker 라벨 / TOML / 디렉티브 인자 설정 소스
//!
//! # 예제
//!
//! ```
//! use cookie_origin::middleware::{CookieOriginConfig, CookieOriginMiddleware};
//!
//! let config = CookieOriginConfig::new("old.example.com", "new.example.com");
//! let middleware = CookieOriginMiddleware::new(config).unwrap();
//! ```
//!
//! # 디렉티브 설정
//!
//! ```
//! use cookie_origin::middleware::CookieOriginConfig;
//!
//! let config = CookieOriginConfig::from_args(&["old.example.com", "new.example.com"]).unwrap();
//! assert_eq!(config.from_domain, "old.example.com");
//! ```

pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod settings;
