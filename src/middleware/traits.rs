use super::{MiddlewareError, Request, Response};
use async_trait::async_trait;

/// 요청을 받아 응답을 만들어내는 핸들러 트레이트
///
/// 체인의 종단 핸들러와 체인 내부의 나머지 구간이 모두 이 트레이트를
/// 구현합니다.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn handle(&self, req: Request) -> Result<Response, MiddlewareError>;
}

/// 미들웨어 트레이트
///
/// 요청을 다음 핸들러에 위임하고, 그 결과 응답을 검사하거나 수정할 수 있는
/// 인터페이스를 정의합니다.
#[async_trait]
pub trait Middleware: Send + Sync {
    /// 미들웨어의 고유 이름을 반환합니다.
    fn name(&self) -> &str;

    /// HTTP 요청을 처리합니다. 응답이 필요하면 `next`에 위임합니다.
    async fn handle(&self, req: Request, next: &dyn Handler)
        -> Result<Response, MiddlewareError>;
}
