// Transport startup
//
// Decision: HTTP and gRPC run joined; the first one to fail stops the other

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;

use crate::grpc_service::EventServiceImpl;

/// Serve the HTTP app on `listener` and the gRPC service on `grpc_addr`.
///
/// Returns when either server stops with an error, including a gRPC bind
/// failure.
pub async fn serve(
    listener: TcpListener,
    app: Router,
    grpc_addr: SocketAddr,
    grpc: EventServiceImpl,
) -> Result<()> {
    let http = async {
        axum::serve(listener, app)
            .await
            .context("HTTP server error")
    };

    let grpc = async {
        tracing::info!("gRPC server listening on {}", grpc_addr);
        tonic::transport::Server::builder()
            .add_service(grpc.into_server())
            .serve(grpc_addr)
            .await
            .with_context(|| format!("gRPC server error on {grpc_addr}"))
    };

    tokio::try_join!(http, grpc)?;
    Ok(())
}
