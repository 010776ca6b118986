use crate::middleware::{Body, Handler, MiddlewareError, Request, Response};
use async_trait::async_trait;
use http_body_util::BodyExt;
use hyper::Uri;
use hyper_util::client::legacy;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use tracing::{error, info};

/// 업스트림으로 요청을 전달하는 종단 핸들러
#[derive(Clone)]
pub struct UpstreamHandler {
    client: legacy::Client<HttpConnector, Body>,
    upstream_addr: String,
}

impl UpstreamHandler {
    pub fn new(upstream_addr: impl Into<String>) -> Self {
        let connector = HttpConnector::new();
        let client = legacy::Client::builder(TokioExecutor::new()).build::<_, Body>(connector);

        Self {
            client,
            upstream_addr: upstream_addr.into(),
        }
    }

    /// 원본 요청의 메서드, 헤더, 바디를 유지한 채 URI만 업스트림으로 바꿉니다.
    fn build_upstream_request(&self, req: Request) -> Result<Request, MiddlewareError> {
        let path_and_query = req
            .uri()
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or("/");

        let uri: Uri = format!("http://{}{}", self.upstream_addr, path_and_query)
            .parse()
            .map_err(|e: hyper::http::uri::InvalidUri| {
                MiddlewareError::Processing(format!("업스트림 URI 생성 실패: {}", e))
            })?;

        let (mut parts, body) = req.into_parts();
        parts.uri = uri;
        Ok(Request::from_parts(parts, body))
    }
}

#[async_trait]
impl Handler for UpstreamHandler {
    async fn handle(&self, req: Request) -> Result<Response, MiddlewareError> {
        let proxied_req = self.build_upstream_request(req)?;
        info!(uri = %proxied_req.uri(), "업스트림으로 요청 전달");

        let res = self.client.request(proxied_req).await.map_err(|e| {
            error!(error = %e, "업스트림 요청 실패");
            MiddlewareError::Processing(format!("업스트림 요청 실패: {}", e))
        })?;

        Ok(res.map(|body| body.boxed()))
    }
}
