#[derive(Debug, thiserror::Error)]
pub enum MiddlewareError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("처리 오류: {0}")]
    Processing(String),

    #[error("설정 변환 오류: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Hyper(#[from] hyper::Error),
}
