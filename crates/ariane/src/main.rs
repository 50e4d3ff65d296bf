use ariane::{ArianeServer, Config, ServerError, ingest};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Config::from_env();

    let server = ArianeServer::bind(&config.ws_addr).await?;
    let app = ingest::router(server.state(), &config);
    let http_listener = TcpListener::bind(&config.http_addr).await?;

    tracing::info!(
        ws = %config.ws_addr,
        http = %config.http_addr,
        "Ariane listening"
    );

    tokio::select! {
        result = server.run() => result,
        result = axum::serve(http_listener, app) => {
            result.map_err(ServerError::from)
        }
    }
}
