use super::{MiddlewareError, Response};
use bytes::Bytes;
use http_body_util::BodyExt;
use hyper::http::response::Parts;
use hyper::{HeaderMap, StatusCode};

/// 버퍼링 여부를 결정하는 술어 타입
pub type ShouldBuffer = fn(StatusCode, &HeaderMap) -> bool;

/// 기본 버퍼링 정책: 리다이렉트(3xx)를 제외한 모든 응답을 버퍼링합니다.
///
/// 성공(2xx)과 에러(4xx, 5xx) 응답은 전체를 메모리에 수집하고,
/// `[300, 400)` 구간의 응답은 바디를 그대로 통과시킵니다.
pub fn should_buffer_default(status: StatusCode, _headers: &HeaderMap) -> bool {
    status.as_u16() < 300 || status.as_u16() >= 400
}

/// 응답 레코더
///
/// 다음 핸들러가 만든 응답을 클라이언트로 보내기 전에 가로채어
/// 상태/헤더/바디를 붙잡아 둡니다. 상태와 헤더는 항상 캡처되고,
/// 바디는 술어가 허용하는 경우에만 메모리에 버퍼링됩니다.
pub struct ResponseRecorder {
    parts: Parts,
    body: RecordedBody,
}

enum RecordedBody {
    /// 바디 전체가 메모리에 수집된 상태
    Buffered(Bytes),
    /// 버퍼링 대상이 아니어서 그대로 통과시키는 바디
    Passthrough(super::Body),
}

impl ResponseRecorder {
    /// 응답을 캡처합니다.
    ///
    /// 버퍼링 대상이면 바디 전체를 수집할 때까지 대기합니다. 수집 중
    /// 업스트림 스트림이 실패하면 그 에러가 그대로 전파됩니다.
    pub async fn record(
        res: Response,
        should_buffer: ShouldBuffer,
    ) -> Result<Self, MiddlewareError> {
        let (parts, body) = res.into_parts();
        let body = if should_buffer(parts.status, &parts.headers) {
            RecordedBody::Buffered(body.collect().await?.to_bytes())
        } else {
            RecordedBody::Passthrough(body)
        };
        Ok(Self { parts, body })
    }

    pub fn status(&self) -> StatusCode {
        self.parts.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.parts.headers
    }

    pub fn is_buffered(&self) -> bool {
        matches!(self.body, RecordedBody::Buffered(_))
    }

    /// 버퍼링된 바디 바이트 (통과 바디라면 `None`)
    pub fn body_bytes(&self) -> Option<&Bytes> {
        match &self.body {
            RecordedBody::Buffered(bytes) => Some(bytes),
            RecordedBody::Passthrough(_) => None,
        }
    }

    /// 캡처한 상태, 헤더, 바디를 응답으로 되돌립니다.
    ///
    /// 상태줄과 헤더가 바디보다 먼저 전송되는 것은 hyper의 응답 프레이밍이
    /// 보장하므로, 이 시점 이후에는 헤더를 수정할 수 없습니다.
    pub fn into_response(self) -> Response {
        let body = match self.body {
            RecordedBody::Buffered(bytes) => super::full(bytes),
            RecordedBody::Passthrough(body) => body,
        };
        Response::from_parts(self.parts, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::full;

    fn response_with_status(status: StatusCode) -> Response {
        hyper::Response::builder()
            .status(status)
            .header("x-test", "1")
            .body(full("payload"))
            .unwrap()
    }

    #[test]
    fn test_should_buffer_classification() {
        let headers = HeaderMap::new();

        assert!(should_buffer_default(StatusCode::OK, &headers));
        assert!(should_buffer_default(StatusCode::CREATED, &headers));
        assert!(should_buffer_default(StatusCode::NOT_FOUND, &headers));
        assert!(should_buffer_default(StatusCode::INTERNAL_SERVER_ERROR, &headers));

        assert!(!should_buffer_default(StatusCode::MOVED_PERMANENTLY, &headers));
        assert!(!should_buffer_default(StatusCode::FOUND, &headers));
        assert!(!should_buffer_default(StatusCode::TEMPORARY_REDIRECT, &headers));
    }

    #[tokio::test]
    async fn test_record_buffers_success_response() {
        let recorder = ResponseRecorder::record(
            response_with_status(StatusCode::OK),
            should_buffer_default,
        )
        .await
        .unwrap();

        assert!(recorder.is_buffered());
        assert_eq!(recorder.status(), StatusCode::OK);
        assert_eq!(recorder.body_bytes().unwrap(), &Bytes::from("payload"));
    }

    #[tokio::test]
    async fn test_record_passes_redirect_body_through() {
        let recorder = ResponseRecorder::record(
            response_with_status(StatusCode::FOUND),
            should_buffer_default,
        )
        .await
        .unwrap();

        // 리다이렉트는 바디를 수집하지 않지만 헤더는 캡처됩니다.
        assert!(!recorder.is_buffered());
        assert!(recorder.body_bytes().is_none());
        assert_eq!(recorder.headers().get("x-test").unwrap(), "1");
    }

    #[tokio::test]
    async fn test_into_response_preserves_everything() {
        let recorder = ResponseRecorder::record(
            response_with_status(StatusCode::OK),
            should_buffer_default,
        )
        .await
        .unwrap();

        let res = recorder.into_response();
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(res.headers().get("x-test").unwrap(), "1");

        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, Bytes::from("payload"));
    }
}
