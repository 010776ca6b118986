use crate::middleware::MiddlewareConfig;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("설정 파일 읽기 실패: {0}")]
    Io(#[from] std::io::Error),

    #[error("설정 파일 파싱 실패: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("설정 검증 실패: {0}")]
    Validation(String),
}

/// 호스트 설정
///
/// ```toml
/// listen_addr = "127.0.0.1:8080"
/// upstream_addr = "127.0.0.1:9000"
///
/// [middlewares.rewrite-cookies]
/// middleware_type = "cookie-origin"
///
/// [middlewares.rewrite-cookies.settings]
/// from_domain = "old.example.com"
/// to_domain = "new.example.com"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 수신 주소
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// 업스트림 주소
    pub upstream_addr: String,

    /// 미들웨어 설정
    #[serde(default)]
    pub middlewares: HashMap<String, MiddlewareConfig>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:8080".to_string()
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.upstream_addr.is_empty() {
            return Err(SettingsError::Validation(
                "upstream_addr가 비어 있습니다".to_string(),
            ));
        }
        Ok(())
    }
}
