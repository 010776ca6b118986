use cookie_origin::logging::init_logging;
use cookie_origin::middleware::response::handle_middleware_error;
use cookie_origin::middleware::MiddlewareManager;
use cookie_origin::proxy::UpstreamHandler;
use cookie_origin::settings::Settings;
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    init_logging();

    let config_path =
        std::env::var("COOKIE_ORIGIN_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let settings = Settings::load(&config_path)?;

    // 미들웨어 설정이 잘못됐으면 서버를 띄우지 않고 여기서 실패합니다.
    let manager = Arc::new(MiddlewareManager::new(&settings.middlewares)?);
    let handler = Arc::new(UpstreamHandler::new(settings.upstream_addr.clone()));

    let listener = TcpListener::bind(&settings.listen_addr).await?;
    info!(
        listen = %settings.listen_addr,
        upstream = %settings.upstream_addr,
        middlewares = manager.chain_len(),
        "프록시 시작"
    );

    loop {
        let (stream, remote_addr) = listener.accept().await?;
        let io = TokioIo::new(stream);
        let manager = manager.clone();
        let handler = handler.clone();

        tokio::spawn(async move {
            let service = service_fn(move |req: hyper::Request<Incoming>| {
                let manager = manager.clone();
                let handler = handler.clone();

                async move {
                    let req = req.map(|body| body.boxed());
                    match manager.handle(req, handler.as_ref()).await {
                        Ok(res) => Ok::<_, Infallible>(res),
                        Err(e) => {
                            error!(error = %e, "요청 처리 실패");
                            Ok(handle_middleware_error(&e))
                        }
                    }
                }
            });

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!(remote = %remote_addr, error = %e, "커넥션 처리 실패");
            }
        });
    }
}
