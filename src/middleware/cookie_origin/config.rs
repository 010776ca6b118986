use crate::middleware::MiddlewareError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 쿠키 도메인 재작성 설정
///
/// # Docker 라벨 예시
///
/// ```yaml
/// labels:
///   - "proxy.http.middlewares.my-cookies.type=cookie-origin"
///   - "proxy.http.middlewares.my-cookies.cookieOrigin.fromDomain=old.example.com"
///   - "proxy.http.middlewares.my-cookies.cookieOrigin.toDomain=new.example.com"
/// ```
///
/// # 디렉티브 예시
///
/// ```text
/// cookie_origin old.example.com new.example.com
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CookieOriginConfig {
    /// 재작성 대상 도메인
    pub from_domain: String,

    /// 대체할 도메인
    pub to_domain: String,
}

impl CookieOriginConfig {
    pub fn new(from_domain: impl Into<String>, to_domain: impl Into<String>) -> Self {
        Self {
            from_domain: from_domain.into(),
            to_domain: to_domain.into(),
        }
    }

    /// 디렉티브 라인의 인자 토큰에서 설정을 파싱합니다.
    ///
    /// 정확히 두 개의 인자(from_domain, to_domain)를 받으며,
    /// 개수가 맞지 않으면 설정 오류로 실패합니다.
    pub fn from_args(args: &[&str]) -> Result<Self, MiddlewareError> {
        match args {
            [from, to] => Self::new(*from, *to).validated(),
            _ => Err(MiddlewareError::Config(format!(
                "cookie_origin 디렉티브는 인자 2개(from_domain, to_domain)가 필요합니다. 받은 개수: {}",
                args.len()
            ))),
        }
    }

    /// Docker 라벨에서 설정을 파싱합니다.
    pub fn from_labels(
        labels: &HashMap<String, String>,
        name: &str,
    ) -> Result<Self, MiddlewareError> {
        let prefix = format!("proxy.http.middlewares.{}.cookieOrigin.", name);

        let get = |key: &str| labels.get(&format!("{}{}", prefix, key)).cloned();

        let from_domain = get("fromDomain").ok_or_else(|| {
            MiddlewareError::Config(format!("{}fromDomain 라벨이 없습니다", prefix))
        })?;
        let to_domain = get("toDomain").ok_or_else(|| {
            MiddlewareError::Config(format!("{}toDomain 라벨이 없습니다", prefix))
        })?;

        Self::new(from_domain, to_domain).validated()
    }

    /// 평탄화된 설정 맵에서 설정을 읽습니다.
    ///
    /// 라벨 경로(`cookieOrigin.fromDomain`)와 TOML 경로(`from_domain`)
    /// 두 가지 키 형태를 모두 받습니다.
    pub fn from_flat_map(settings: &HashMap<String, String>) -> Result<Self, MiddlewareError> {
        let get = |label_key: &str, toml_key: &str| {
            settings
                .get(label_key)
                .or_else(|| settings.get(toml_key))
                .cloned()
        };

        let from_domain = get("cookieOrigin.fromDomain", "from_domain").ok_or_else(|| {
            MiddlewareError::Config("from_domain 설정이 없습니다".to_string())
        })?;
        let to_domain = get("cookieOrigin.toDomain", "to_domain").ok_or_else(|| {
            MiddlewareError::Config("to_domain 설정이 없습니다".to_string())
        })?;

        Self::new(from_domain, to_domain).validated()
    }

    /// 두 도메인이 모두 비어 있지 않은지 검사합니다.
    ///
    /// 도메인 문법 검증은 하지 않습니다. 비어 있지만 않으면 어떤 문자열이든
    /// 그대로 사용합니다.
    pub fn validate(&self) -> Result<(), MiddlewareError> {
        if self.from_domain.is_empty() {
            return Err(MiddlewareError::Config(
                "from_domain이 비어 있습니다".to_string(),
            ));
        }
        if self.to_domain.is_empty() {
            return Err(MiddlewareError::Config(
                "to_domain이 비어 있습니다".to_string(),
            ));
        }
        Ok(())
    }

    fn validated(self) -> Result<Self, MiddlewareError> {
        self.validate()?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let config = CookieOriginConfig::from_args(&["old.example.com", "new.example.com"]).unwrap();

        assert_eq!(config.from_domain, "old.example.com");
        assert_eq!(config.to_domain, "new.example.com");
    }

    #[test]
    fn test_from_args_too_few() {
        let err = CookieOriginConfig::from_args(&["old.example.com"]).unwrap_err();
        assert!(matches!(err, MiddlewareError::Config(_)));
    }

    #[test]
    fn test_from_args_too_many() {
        let result = CookieOriginConfig::from_args(&["a.com", "b.com", "c.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_args_empty_token() {
        let result = CookieOriginConfig::from_args(&["", "new.example.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_labels() {
        let mut labels = HashMap::new();
        labels.insert(
            "proxy.http.middlewares.my-cookies.cookieOrigin.fromDomain".to_string(),
            "old.example.com".to_string(),
        );
        labels.insert(
            "proxy.http.middlewares.my-cookies.cookieOrigin.toDomain".to_string(),
            "new.example.com".to_string(),
        );

        let config = CookieOriginConfig::from_labels(&labels, "my-cookies").unwrap();

        assert_eq!(config.from_domain, "old.example.com");
        assert_eq!(config.to_domain, "new.example.com");
    }

    #[test]
    fn test_from_labels_missing_to_domain() {
        let mut labels = HashMap::new();
        labels.insert(
            "proxy.http.middlewares.my-cookies.cookieOrigin.fromDomain".to_string(),
            "old.example.com".to_string(),
        );

        let result = CookieOriginConfig::from_labels(&labels, "my-cookies");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_flat_map_label_keys() {
        let mut settings = HashMap::new();
        settings.insert(
            "cookieOrigin.fromDomain".to_string(),
            "old.example.com".to_string(),
        );
        settings.insert(
            "cookieOrigin.toDomain".to_string(),
            "new.example.com".to_string(),
        );

        let config = CookieOriginConfig::from_flat_map(&settings).unwrap();
        assert_eq!(config.from_domain, "old.example.com");
        assert_eq!(config.to_domain, "new.example.com");
    }

    #[test]
    fn test_from_flat_map_toml_keys() {
        let mut settings = HashMap::new();
        settings.insert("from_domain".to_string(), "old.example.com".to_string());
        settings.insert("to_domain".to_string(), "new.example.com".to_string());

        let config = CookieOriginConfig::from_flat_map(&settings).unwrap();
        assert_eq!(config.from_domain, "old.example.com");
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(CookieOriginConfig::new("", "b.com").validate().is_err());
        assert!(CookieOriginConfig::new("a.com", "").validate().is_err());
        assert!(CookieOriginConfig::new("a.com", "b.com").validate().is_ok());
    }
}
