//! 미들웨어 체인과 쿠키 도메인 재작성 미들웨어
//!
//! 요청을 다음 핸들러에 위임하고, 반환된 응답을 클라이언트로 보내기 전에
//! 가로채어 수정할 수 있는 체인 구조를 제공합니다.

pub mod chain;
pub mod config;
pub mod cookie_origin;
pub mod error;
pub mod manager;
pub mod recorder;
pub mod response;
pub mod traits;

use bytes::Bytes;
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Empty, Full};

pub use chain::MiddlewareChain;
pub use config::{MiddlewareConfig, MiddlewareType};
pub use cookie_origin::{CookieOriginConfig, CookieOriginMiddleware};
pub use error::MiddlewareError;
pub use manager::MiddlewareManager;
pub use recorder::ResponseRecorder;
pub use traits::{Handler, Middleware};

/// 체인 전체에서 사용하는 바디 타입
///
/// 업스트림의 스트리밍 바디(`Incoming`)와 자체 생성 바디(`Full`)를
/// 하나의 타입으로 다루기 위해 박싱합니다.
pub type Body = BoxBody<Bytes, hyper::Error>;
pub type Request = hyper::Request<Body>;
pub type Response = hyper::Response<Body>;

/// 고정된 바이트로 바디를 만듭니다.
pub fn full(data: impl Into<Bytes>) -> Body {
    Full::new(data.into())
        .map_err(|never| match never {})
        .boxed()
}

/// 빈 바디를 만듭니다.
pub fn empty() -> Body {
    Empty::<Bytes>::new()
        .map_err(|never| match never {})
        .boxed()
}
