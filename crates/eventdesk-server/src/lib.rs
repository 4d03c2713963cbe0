// Eventdesk Server Library
// Decision: Shared library for binaries (server, export-openapi) and integration tests

// HTTP API routes and types
pub mod api;

// Environment configuration
pub mod config;

// gRPC transport
pub mod grpc_service;

// OpenAPI spec generation
pub mod openapi;

// Storage backends and sample data
pub mod storage;

// Router assembly
pub mod router;

// Joined HTTP and gRPC startup
pub mod serve;

pub use config::{ConfigError, ServerConfig};
pub use router::{build_app, build_router_with_prefix, HealthState};
pub use serve::serve;
