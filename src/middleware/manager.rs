use super::config::MiddlewareType;
use super::cookie_origin::{CookieOriginConfig, CookieOriginMiddleware};
use super::{
    Handler, Middleware, MiddlewareChain, MiddlewareConfig, MiddlewareError, Request, Response,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, error};

/// 미들웨어 설정으로부터 미들웨어 인스턴스를 생성합니다.
///
/// 전역 모듈 레지스트리 대신, 호스트가 기동 시점에 명시적으로 호출하는
/// 팩토리입니다.
fn create_middleware(config: &MiddlewareConfig) -> Result<Arc<dyn Middleware>, MiddlewareError> {
    debug!(
        "미들웨어 생성 시작: type={:?}, settings={:?}",
        config.middleware_type, config.settings
    );

    match config.middleware_type {
        MiddlewareType::CookieOrigin => {
            let string_settings: HashMap<String, String> = config
                .settings
                .iter()
                .map(|(k, v)| {
                    let string_value = v
                        .as_str()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| v.to_string());
                    (k.clone(), string_value)
                })
                .collect();

            let cookie_config = CookieOriginConfig::from_flat_map(&string_settings)?;
            Ok(Arc::new(CookieOriginMiddleware::new(cookie_config)?))
        }
    }
}

/// 설정 맵에서 미들웨어 체인을 조립하는 매니저
#[derive(Default, Clone)]
pub struct MiddlewareManager {
    chain: MiddlewareChain,
}

impl MiddlewareManager {
    /// 설정 맵에서 체인을 조립합니다.
    ///
    /// 미들웨어 하나라도 생성에 실패하면 전체가 설정 오류로 실패합니다.
    /// 잘못 설정된 재작성기를 빼놓은 채 기동하면 쿠키가 조용히 원본 그대로
    /// 나가게 되므로, 운영자에게 바로 드러내고 기동을 막습니다.
    pub fn new(
        middleware_configs: &HashMap<String, MiddlewareConfig>,
    ) -> Result<Self, MiddlewareError> {
        let mut chain = MiddlewareChain::new();

        // 정렬을 위해 Vec으로 변환
        let mut ordered_configs: Vec<_> = middleware_configs
            .iter()
            .filter(|(_, config)| config.enabled)
            .collect();
        ordered_configs.sort_by_key(|(_, config)| config.order);

        // 미들웨어 생성 및 체인에 추가
        for (name, config) in ordered_configs {
            let middleware = create_middleware(config).map_err(|e| {
                error!(middleware = %name, "미들웨어 생성 실패: {}", e);
                MiddlewareError::Config(format!("미들웨어 {} 생성 실패: {}", name, e))
            })?;
            chain.add_shared(middleware);
        }

        Ok(Self { chain })
    }

    /// 체인을 거쳐 종단 핸들러까지 요청을 처리합니다.
    pub async fn handle(
        &self,
        req: Request,
        handler: &dyn Handler,
    ) -> Result<Response, MiddlewareError> {
        self.chain.execute(req, handler).await
    }

    pub fn chain_len(&self) -> usize {
        self.chain.len()
    }

    /// 설정 변경 시 체인을 다시 조립합니다.
    ///
    /// 새 설정이 잘못됐으면 기존 체인을 유지한 채 오류를 반환합니다.
    pub fn update_configs(
        &mut self,
        configs: &HashMap<String, MiddlewareConfig>,
    ) -> Result<(), MiddlewareError> {
        self.chain = Self::new(configs)?.chain;
        Ok(())
    }
}
