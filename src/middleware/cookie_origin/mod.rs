//! 쿠키 도메인 재작성 미들웨어
//!
//! 업스트림 핸들러가 내려보낸 `Set-Cookie` 헤더의 `Domain` 속성을
//! 설정된 도메인으로 바꿔서 클라이언트에 전달합니다.

mod config;
mod middleware;

pub use config::CookieOriginConfig;
pub use middleware::{CookieOriginMiddleware, MODULE_ID};
