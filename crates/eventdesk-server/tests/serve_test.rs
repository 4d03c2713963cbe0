// Startup tests for the joined HTTP and gRPC servers

use std::sync::Arc;
use std::time::Duration;

use eventdesk_core::{EventEngine, InMemoryEventStore};
use eventdesk_server::grpc_service::EventServiceImpl;
use eventdesk_server::{build_app, serve, HealthState};

#[tokio::test]
async fn test_grpc_bind_failure_stops_serve() {
    let engine = Arc::new(EventEngine::with_store(Arc::new(InMemoryEventStore::new())));
    let app = build_app(
        engine.clone(),
        HealthState { storage: "memory" },
        "/api",
        Vec::new(),
    );

    // Port already taken for the gRPC side
    let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let grpc_addr = taken.local_addr().unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        serve(listener, app, grpc_addr, EventServiceImpl::new(engine)),
    )
    .await
    .expect("serve kept running after the gRPC bind failed");

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("gRPC server error"), "{err:#}");
}
