// OpenAPI specification generation
//
// Used by both the server (for Swagger UI) and the export-openapi binary.

use crate::api;
use crate::api::{ErrorResponse, ListResponse, MessageResponse};
use crate::config::DEFAULT_API_PREFIX;
use eventdesk_core::{Event, EventCategory, EventInput, EventStatus};
use utoipa::openapi::server::Server;
use utoipa::OpenApi;

/// OpenAPI documentation for the Eventdesk API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::create_event,
        api::events::list_events,
        api::events::get_event,
        api::events::update_event,
        api::events::delete_event,
        api::events::classify_event,
        api::events::manual_classify_event,
        api::events::list_events_by_status,
        api::events::list_events_by_category,
        api::events::list_events_needing_action,
    ),
    components(
        schemas(
            Event, EventInput, EventStatus, EventCategory,
            api::events::CreateEventResponse,
            api::events::ManualClassifyRequest,
            ListResponse<Event>,
            MessageResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "events", description = "Event lifecycle and classification endpoints")
    ),
    info(
        title = "Eventdesk API",
        version = "0.1.0",
        description = "API for registering, reviewing and classifying events",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// OpenAPI document whose server URL is the mounted API prefix
    pub fn with_prefix(api_prefix: &str) -> utoipa::openapi::OpenApi {
        let url = if api_prefix.is_empty() { "/" } else { api_prefix };
        let mut doc = Self::openapi();
        doc.servers = Some(vec![Server::new(url)]);
        doc
    }

    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::with_prefix(DEFAULT_API_PREFIX).to_pretty_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_event_paths() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/v1/events",
            "/v1/events/{id}",
            "/v1/events/{id}/classify",
            "/v1/events/{id}/manual-classify",
            "/v1/events/status/{status}",
            "/v1/events/category/{category}",
            "/v1/events/needs",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }

    #[test]
    fn test_server_url_follows_prefix() {
        let server_urls = |prefix: &str| -> Vec<String> {
            ApiDoc::with_prefix(prefix)
                .servers
                .unwrap_or_default()
                .into_iter()
                .map(|s| s.url)
                .collect()
        };

        assert_eq!(server_urls("/events-api"), vec!["/events-api"]);
        assert_eq!(server_urls(""), vec!["/"]);
    }

    #[test]
    fn test_openapi_serializes() {
        let json = ApiDoc::to_json().unwrap();
        assert!(json.contains("Eventdesk API"));
        assert!(json.contains(r#""url": "/api""#), "{json}");
    }
}
