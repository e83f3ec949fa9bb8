//! Accept loop

use crate::handler::{handle_request, App};
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use log::{error, info, warn};
use pokebattle_core::{Catalog, ScoreStore};
use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve connections from `listener` until the process stops.
pub async fn serve<C, S>(listener: TcpListener, app: Arc<App<C, S>>) -> std::io::Result<()>
where
    C: Catalog + 'static,
    S: ScoreStore + 'static,
{
    info!("Listening on http://{}", listener.local_addr()?);

    loop {
        let (stream, remote_addr) = match listener.accept().await {
            Ok(conn) => conn,
            Err(e) => {
                warn!("Accept error: {}", e);
                continue;
            }
        };

        let app = app.clone();
        tokio::spawn(async move {
            let io = TokioIo::new(stream);
            let service = service_fn(move |req| handle_request(app.clone(), req));

            if let Err(e) = http1::Builder::new().serve_connection(io, service).await {
                error!("Connection error from {}: {}", remote_addr, e);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::StaticCatalog;
    use pokebattle_core::BattleConfig;
    use pokebattle_db::Store;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    #[tokio::test]
    async fn test_serves_leaderboard_over_tcp() {
        let app = Arc::new(App::new(
            StaticCatalog::full(),
            Store::in_memory().unwrap(),
            BattleConfig::default(),
        ));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(serve(listener, app));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /pokemon/scores HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();

        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200 OK"));
        assert!(response.contains("application/json"));
        assert!(response.ends_with("[]"));
    }
}
