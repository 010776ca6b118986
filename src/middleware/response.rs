use super::{full, MiddlewareError, Response};
use hyper::StatusCode;

/// 미들웨어 에러를 HTTP 응답으로 변환합니다.
///
/// 미들웨어 자체는 에러 시 아무 응답도 쓰지 않으므로, 호스트가 마지막에
/// 이 함수를 통해 표준 에러 응답을 만듭니다.
pub fn handle_middleware_error(err: &MiddlewareError) -> Response {
    let status = match err {
        MiddlewareError::Config(_) | MiddlewareError::Json(_) => StatusCode::INTERNAL_SERVER_ERROR,
        MiddlewareError::Processing(_) => StatusCode::BAD_GATEWAY,
        MiddlewareError::Hyper(_) => StatusCode::BAD_GATEWAY,
    };

    hyper::Response::builder()
        .status(status)
        .body(full(err.to_string()))
        .unwrap_or_else(|_| hyper::Response::new(full("Internal Server Error")))
}
