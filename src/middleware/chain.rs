use super::{Handler, Middleware, MiddlewareError, Request, Response};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// 미들웨어 체인
///
/// 등록된 순서대로 미들웨어를 거쳐 종단 핸들러까지 요청을 전달합니다.
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    middlewares: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self {
            middlewares: Vec::new(),
        }
    }

    pub fn add<M: Middleware + 'static>(&mut self, middleware: M) {
        self.middlewares.push(Arc::new(middleware));
    }

    pub fn add_shared(&mut self, middleware: Arc<dyn Middleware>) {
        self.middlewares.push(middleware);
    }

    pub fn len(&self) -> usize {
        self.middlewares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.middlewares.is_empty()
    }

    /// 체인을 실행합니다.
    ///
    /// 미들웨어가 하나도 없으면 종단 핸들러가 바로 호출됩니다.
    pub async fn execute(
        &self,
        req: Request,
        handler: &dyn Handler,
    ) -> Result<Response, MiddlewareError> {
        let next = Next {
            middlewares: &self.middlewares,
            handler,
        };
        next.handle(req).await
    }
}

/// 체인의 나머지 구간
///
/// 미들웨어가 위임을 호출할 때마다 남은 미들웨어 목록이 하나씩 줄어들고,
/// 목록이 비면 종단 핸들러가 호출됩니다.
pub struct Next<'a> {
    middlewares: &'a [Arc<dyn Middleware>],
    handler: &'a dyn Handler,
}

#[async_trait]
impl Handler for Next<'_> {
    async fn handle(&self, req: Request) -> Result<Response, MiddlewareError> {
        match self.middlewares.split_first() {
            Some((current, rest)) => {
                debug!(middleware = current.name(), "미들웨어에 요청 위임");
                let next = Next {
                    middlewares: rest,
                    handler: self.handler,
                };
                current.handle(req, &next).await
            }
            None => self.handler.handle(req).await,
        }
    }
}
