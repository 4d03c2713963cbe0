// gRPC Event Service
//
// Decision: gRPC service uses the same EventService as the HTTP API
// Decision: Errors map by kind, never by message text

use std::sync::Arc;

use eventdesk_core::{ErrorKind, EventError, EventService as EventEndpoints};
use eventdesk_protocol::proto::{
    self, CategoryRequest, CreateEventResponse, DeleteEventResponse, Empty, EventIdRequest,
    EventList, ManualClassifyRequest, StatusRequest, UpdateEventRequest,
};
use eventdesk_protocol::{event_list, EventService, EventServiceServer};
use tonic::{Request, Response, Status};

/// gRPC front for the event engine
pub struct EventServiceImpl {
    service: Arc<dyn EventEndpoints>,
}

impl EventServiceImpl {
    pub fn new(service: Arc<dyn EventEndpoints>) -> Self {
        Self { service }
    }

    /// Create a tonic server for this service
    pub fn into_server(self) -> EventServiceServer<Self> {
        EventServiceServer::new(self)
    }
}

/// Map an engine error to a gRPC status
pub fn error_to_status(err: EventError) -> Status {
    match err.kind() {
        ErrorKind::Validation
        | ErrorKind::InvalidStatus
        | ErrorKind::InvalidCategory
        | ErrorKind::NotReviewed
        | ErrorKind::MissingIdentifier => Status::invalid_argument(err.to_string()),
        ErrorKind::NotFound => Status::not_found(err.to_string()),
        ErrorKind::DeadlineExceeded => Status::deadline_exceeded(err.to_string()),
        ErrorKind::Store => Status::internal("Internal server error"),
    }
}

#[tonic::async_trait]
impl EventService for EventServiceImpl {
    async fn create_event(
        &self,
        request: Request<proto::EventInput>,
    ) -> Result<Response<CreateEventResponse>, Status> {
        let input = request.into_inner().into();
        let event = self
            .service
            .create_event(input)
            .await
            .map_err(error_to_status)?;

        Ok(Response::new(CreateEventResponse {
            id: event.id.to_string(),
            message: "Event created successfully".to_string(),
        }))
    }

    async fn get_event_by_id(
        &self,
        request: Request<EventIdRequest>,
    ) -> Result<Response<proto::Event>, Status> {
        let req = request.into_inner();
        let event = self
            .service
            .get_event_by_id(&req.id)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event.into()))
    }

    async fn get_all_events(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<EventList>, Status> {
        let events = self
            .service
            .get_all_events()
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event_list(events)))
    }

    async fn get_events_by_status(
        &self,
        request: Request<StatusRequest>,
    ) -> Result<Response<EventList>, Status> {
        let req = request.into_inner();
        let events = self
            .service
            .get_events_by_status(&req.status)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event_list(events)))
    }

    async fn get_events_by_category(
        &self,
        request: Request<CategoryRequest>,
    ) -> Result<Response<EventList>, Status> {
        let req = request.into_inner();
        let events = self
            .service
            .get_events_by_category(&req.category)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event_list(events)))
    }

    async fn get_events_needing_action(
        &self,
        _request: Request<Empty>,
    ) -> Result<Response<EventList>, Status> {
        let events = self
            .service
            .get_events_needing_action()
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event_list(events)))
    }

    async fn update_event(
        &self,
        request: Request<UpdateEventRequest>,
    ) -> Result<Response<proto::Event>, Status> {
        let req = request.into_inner();
        let input = req
            .event
            .ok_or_else(|| Status::invalid_argument("Missing event"))?;
        let event = self
            .service
            .update_event(&req.id, input.into())
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event.into()))
    }

    async fn delete_event(
        &self,
        request: Request<EventIdRequest>,
    ) -> Result<Response<DeleteEventResponse>, Status> {
        let req = request.into_inner();
        self.service
            .delete_event(&req.id)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(DeleteEventResponse {
            message: "Event deleted successfully".to_string(),
        }))
    }

    async fn classify_event(
        &self,
        request: Request<EventIdRequest>,
    ) -> Result<Response<proto::Event>, Status> {
        let req = request.into_inner();
        let event = self
            .service
            .classify_event(&req.id)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event.into()))
    }

    async fn manual_classify_event(
        &self,
        request: Request<ManualClassifyRequest>,
    ) -> Result<Response<proto::Event>, Status> {
        let req = request.into_inner();
        let event = self
            .service
            .manual_classify_event(&req.id, &req.category)
            .await
            .map_err(error_to_status)?;
        Ok(Response::new(event.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eventdesk_core::{EventEngine, EventId, InMemoryEventStore, StoreError};
    use std::time::Duration;
    use tonic::Code;

    fn grpc_service() -> EventServiceImpl {
        let engine = EventEngine::with_store(Arc::new(InMemoryEventStore::new()));
        EventServiceImpl::new(Arc::new(engine))
    }

    fn input(event_type: &str, status: &str) -> proto::EventInput {
        proto::EventInput {
            name: "Server down".to_string(),
            r#type: event_type.to_string(),
            description: "x".to_string(),
            status: status.to_string(),
            category: None,
        }
    }

    async fn create(svc: &EventServiceImpl, event_type: &str, status: &str) -> String {
        svc.create_event(Request::new(input(event_type, status)))
            .await
            .unwrap()
            .into_inner()
            .id
    }

    #[test]
    fn test_error_code_mapping() {
        let cases = [
            (EventError::validation("name"), Code::InvalidArgument),
            (EventError::InvalidStatus("Bogus".into()), Code::InvalidArgument),
            (EventError::InvalidCategory("x".into()), Code::InvalidArgument),
            (EventError::NotReviewed(EventId::new()), Code::InvalidArgument),
            (EventError::MissingIdentifier, Code::InvalidArgument),
            (EventError::NotFound("x".into()), Code::NotFound),
            (
                EventError::DeadlineExceeded(Duration::from_millis(5)),
                Code::DeadlineExceeded,
            ),
            (
                EventError::Store(StoreError::Database("boom".into())),
                Code::Internal,
            ),
        ];

        for (err, code) in cases {
            assert_eq!(error_to_status(err).code(), code);
        }
    }

    #[tokio::test]
    async fn test_create_and_get_event() {
        let svc = grpc_service();
        let id = create(&svc, "Incidente", "Pendiente por revisar").await;

        let event = svc
            .get_event_by_id(Request::new(EventIdRequest { id: id.clone() }))
            .await
            .unwrap()
            .into_inner();

        assert_eq!(event.id, id);
        assert_eq!(event.r#type, "Incidente");
        assert_eq!(event.status, "Pendiente por revisar");
        assert!(event.category.is_none());
        assert!(event.date.is_some());
    }

    #[tokio::test]
    async fn test_create_with_missing_name_is_invalid_argument() {
        let svc = grpc_service();
        let mut req = input("Incidente", "Pendiente por revisar");
        req.name.clear();

        let status = svc.create_event(Request::new(req)).await.unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_update_to_reviewed_classifies() {
        let svc = grpc_service();
        let id = create(&svc, "Incidente", "Pendiente por revisar").await;

        let event = svc
            .update_event(Request::new(UpdateEventRequest {
                id: id.clone(),
                event: Some(input("Incidente", "Revisado")),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(event.category.as_deref(), Some("Requiere gestión"));
        assert!(event.needs_action);

        let needing = svc
            .get_events_needing_action(Request::new(Empty {}))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(needing.events.len(), 1);
        assert_eq!(needing.events[0].id, id);
    }

    #[tokio::test]
    async fn test_update_without_event_body() {
        let svc = grpc_service();
        let status = svc
            .update_event(Request::new(UpdateEventRequest {
                id: EventId::new().to_string(),
                event: None,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_classify_pending_event_is_invalid_argument() {
        let svc = grpc_service();
        let id = create(&svc, "Incidente", "Pendiente por revisar").await;

        let status = svc
            .classify_event(Request::new(EventIdRequest { id }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_manual_classify_and_filters() {
        let svc = grpc_service();
        let id = create(&svc, "Incidente", "Revisado").await;

        let event = svc
            .manual_classify_event(Request::new(ManualClassifyRequest {
                id: id.clone(),
                category: "Sin gestión".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert!(!event.needs_action);

        let by_category = svc
            .get_events_by_category(Request::new(CategoryRequest {
                category: "Sin gestión".to_string(),
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(by_category.events.len(), 1);

        let status = svc
            .get_events_by_status(Request::new(StatusRequest {
                status: "Bogus".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);
    }

    #[tokio::test]
    async fn test_delete_event() {
        let svc = grpc_service();
        let id = create(&svc, "Informe", "Pendiente por revisar").await;

        svc.delete_event(Request::new(EventIdRequest { id: id.clone() }))
            .await
            .unwrap();

        let status = svc
            .get_event_by_id(Request::new(EventIdRequest { id: id.clone() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);

        let status = svc
            .delete_event(Request::new(EventIdRequest { id: String::new() }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::InvalidArgument);

        let all = svc
            .get_all_events(Request::new(Empty {}))
            .await
            .unwrap()
            .into_inner();
        assert!(all.events.is_empty());
    }
}
