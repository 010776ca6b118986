use super::config::CookieOriginConfig;
use crate::middleware::recorder::{should_buffer_default, ResponseRecorder};
use crate::middleware::{Handler, Middleware, MiddlewareError, Request, Response};
use async_trait::async_trait;
use hyper::header::{HeaderValue, SET_COOKIE};
use tracing::debug;

/// 호스트 레지스트리에 등록되는 안정 식별자
pub const MODULE_ID: &str = "http.handlers.caddy_cookie_origin";

/// 쿠키 도메인 재작성 미들웨어
///
/// 다음 핸들러의 응답을 레코더로 가로챈 뒤, `Set-Cookie` 값에 들어 있는
/// `Domain=<from_domain>` 부분 문자열을 `Domain=<to_domain>`으로 치환합니다.
/// 쿠키 속성을 구조적으로 파싱하지 않고 문자열 치환만 수행합니다.
pub struct CookieOriginMiddleware {
    config: CookieOriginConfig,
    /// 검색 패턴 `Domain=<from_domain>`
    from_pattern: String,
    /// 대체 패턴 `Domain=<to_domain>`
    to_pattern: String,
}

impl CookieOriginMiddleware {
    pub fn new(config: CookieOriginConfig) -> Result<Self, MiddlewareError> {
        config.validate()?;

        let from_pattern = format!("Domain={}", config.from_domain);
        let to_pattern = format!("Domain={}", config.to_domain);

        Ok(Self {
            config,
            from_pattern,
            to_pattern,
        })
    }

    /// `Set-Cookie` 값 하나를 재작성합니다.
    ///
    /// 패턴이 들어 있으면 모든 출현을 치환한 새 값을 반환하고,
    /// 없으면 `None`을 반환해 원래 값을 그대로 두게 합니다.
    fn rewrite_value(&self, value: &str) -> Option<String> {
        if value.contains(&self.from_pattern) {
            Some(value.replace(&self.from_pattern, &self.to_pattern))
        } else {
            None
        }
    }

    /// 캡처된 응답의 `Set-Cookie` 헤더 목록을 제자리에서 재작성합니다.
    ///
    /// 값의 순서와 개수는 유지됩니다. UTF-8이 아니거나 치환 결과가 유효한
    /// 헤더 값이 아니면 해당 값은 건드리지 않습니다.
    fn rewrite_cookies(&self, recorder: &mut ResponseRecorder) {
        let headers = recorder.headers_mut();
        let cookies: Vec<HeaderValue> = headers.get_all(SET_COOKIE).iter().cloned().collect();
        if cookies.is_empty() {
            return;
        }

        let mut rewritten = 0usize;
        headers.remove(SET_COOKIE);
        for cookie in cookies {
            let replaced = cookie
                .to_str()
                .ok()
                .and_then(|value| self.rewrite_value(value))
                .and_then(|value| HeaderValue::from_str(&value).ok());

            match replaced {
                Some(value) => {
                    headers.append(SET_COOKIE, value);
                    rewritten += 1;
                }
                None => {
                    headers.append(SET_COOKIE, cookie);
                }
            }
        }

        if rewritten > 0 {
            debug!(
                count = rewritten,
                from = %self.config.from_domain,
                to = %self.config.to_domain,
                "Set-Cookie 도메인 재작성"
            );
        }
    }
}

#[async_trait]
impl Middleware for CookieOriginMiddleware {
    fn name(&self) -> &str {
        MODULE_ID
    }

    async fn handle(&self, req: Request, next: &dyn Handler) -> Result<Response, MiddlewareError> {
        // 다음 핸들러가 실패하면 응답을 쓰지 않고 에러를 그대로 전파합니다.
        let res = next.handle(req).await?;

        let mut recorder = ResponseRecorder::record(res, should_buffer_default).await?;
        self.rewrite_cookies(&mut recorder);

        Ok(recorder.into_response())
    }
}
