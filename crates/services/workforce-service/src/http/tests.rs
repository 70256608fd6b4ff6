//! Router tests against mocked services.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use mockall::predicate::eq;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use common::AppError;
use domain::{Role, RoleResponse};

use super::{create_router, AppState};
use crate::events::{EventEmitter, MockEventPublisher};
use crate::infra::Database;
use crate::service::{
    MockAttendanceService, MockCrewService, MockEquipmentService, MockPermissionService,
    MockRoleService, MockTimeOffService, MockTripService, MockUserService, Services,
};

/// Mocks for every service; tests set expectations on the ones they hit.
#[derive(Default)]
struct Mocks {
    roles: MockRoleService,
    permissions: MockPermissionService,
    users: MockUserService,
    crews: MockCrewService,
    equipment: MockEquipmentService,
    attendance: MockAttendanceService,
    time_off: MockTimeOffService,
    trips: MockTripService,
}

impl Mocks {
    fn router(self) -> Router {
        self.router_with_events(EventEmitter::disabled())
    }

    fn router_with_events(self, events: EventEmitter) -> Router {
        let services = Services {
            roles: Arc::new(self.roles),
            permissions: Arc::new(self.permissions),
            users: Arc::new(self.users),
            crews: Arc::new(self.crews),
            equipment: Arc::new(self.equipment),
            attendance: Arc::new(self.attendance),
            time_off: Arc::new(self.time_off),
            trips: Arc::new(self.trips),
        };
        let db = Database::from_connection(DatabaseConnection::default());
        create_router(AppState::new(services, db, events))
    }
}

fn role_response(name: &str) -> RoleResponse {
    Role::new(name.to_string(), String::new()).into()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_create_role_returns_created_envelope() {
    let mut mocks = Mocks::default();
    mocks
        .roles
        .expect_create_role()
        .withf(|request| request.role_name == "Dispatcher" && request.description == "Dispatch ops")
        .times(1)
        .returning(|request| Ok(role_response(&request.role_name)));

    let (status, body) = send(
        mocks.router(),
        json_request(
            "POST",
            "/api/v1/roles",
            json!({"role_name": "Dispatcher", "description": "Dispatch ops"}),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["role_name"], "Dispatcher");
}

#[tokio::test]
async fn test_duplicate_role_is_conflict() {
    let mut mocks = Mocks::default();
    mocks.roles.expect_create_role().returning(|_| {
        Err(AppError::conflict(
            "role with name 'Dispatcher' already exists",
        ))
    });

    let (status, body) = send(
        mocks.router(),
        json_request("POST", "/api/v1/roles", json!({"role_name": "Dispatcher"})),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_argument() {
    let mut mocks = Mocks::default();
    mocks.roles.expect_create_role().never();

    let request = Request::post("/api/v1/roles")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(mocks.router(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_get_missing_role_is_not_found() {
    let id = Uuid::new_v4().to_string();
    let mut mocks = Mocks::default();
    mocks
        .roles
        .expect_get_role()
        .with(eq(id.clone()))
        .returning(|_| Err(AppError::not_found("role")));

    let (status, body) = send(mocks.router(), get(&format!("/api/v1/roles/{}", id))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "role not found");
}

#[tokio::test]
async fn test_list_roles_is_bare_array() {
    let mut mocks = Mocks::default();
    mocks
        .roles
        .expect_list_roles()
        .returning(|| Ok(vec![role_response("Auditor"), role_response("Dispatcher")]));

    let (status, body) = send(mocks.router(), get("/api/v1/roles")).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|role| role["role_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Auditor", "Dispatcher"]);
}

#[tokio::test]
async fn test_delete_role_returns_no_content() {
    let mut mocks = Mocks::default();
    mocks.roles.expect_delete_role().times(1).returning(|_| Ok(()));

    let request = Request::delete(format!("/api/v1/roles/{}", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(mocks.router(), request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_revoke_role_permissions_reports_count() {
    let mut mocks = Mocks::default();
    mocks
        .permissions
        .expect_revoke_for_role()
        .returning(|_| Ok(3));

    let request = Request::delete(format!("/api/v1/roles/{}/permissions", Uuid::new_v4()))
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(mocks.router(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["revoked"], 3);
}

#[tokio::test]
async fn test_remove_crew_member_route() {
    let crew_id = Uuid::new_v4().to_string();
    let user_id = Uuid::new_v4().to_string();
    let mut mocks = Mocks::default();
    mocks
        .crews
        .expect_remove_member()
        .with(eq(crew_id.clone()), eq(user_id.clone()))
        .times(1)
        .returning(|_, _| Ok(()));

    let request = Request::delete(format!("/api/v1/crews/{}/members/{}", crew_id, user_id))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(mocks.router(), request).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_attendance_for_day() {
    let user_id = Uuid::new_v4().to_string();
    let day = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
    let mut mocks = Mocks::default();
    mocks
        .attendance
        .expect_find_for_day()
        .with(eq(user_id.clone()), eq(day))
        .returning(|_, _| Ok(None));
    mocks.attendance.expect_list_for_user().never();

    let (status, body) = send(
        mocks.router(),
        get(&format!("/api/v1/users/{}/attendance?date=2024-02-29", user_id)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_attendance_window_needs_both_bounds() {
    let mut mocks = Mocks::default();
    mocks.attendance.expect_list_for_user_between().never();
    mocks.attendance.expect_list_for_user().never();

    let (status, body) = send(
        mocks.router(),
        get(&format!(
            "/api/v1/users/{}/attendance?from=2024-01-01T00:00:00Z",
            Uuid::new_v4()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_attendance_day_and_window_are_exclusive() {
    let mut mocks = Mocks::default();
    mocks.attendance.expect_find_for_day().never();
    mocks.attendance.expect_list_for_user_between().never();
    mocks.attendance.expect_list_for_user().never();

    let (status, body) = send(
        mocks.router(),
        get(&format!(
            "/api/v1/users/{}/attendance?date=2024-02-29&from=2024-01-01T00:00:00Z&to=2024-03-01T00:00:00Z",
            Uuid::new_v4()
        )),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_ARGUMENT");
}

#[tokio::test]
async fn test_time_off_by_status_route() {
    let mut mocks = Mocks::default();
    mocks
        .time_off
        .expect_list_by_status()
        .with(eq("Approved"))
        .times(1)
        .returning(|_| Ok(vec![]));

    let (status, _) = send(mocks.router(), get("/api/v1/time-off/status/Approved")).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_health_reports_unreachable_database() {
    let mut publisher = MockEventPublisher::new();
    publisher.expect_ping().returning(|| Ok(()));

    let (status, body) = send(
        Mocks::default().router_with_events(EventEmitter::new(Some(Arc::new(publisher)))),
        get("/healthz"),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["dependencies"]["database"]["status"], "unhealthy");
    assert_eq!(body["dependencies"]["event_bus"]["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (status, body) = send(Mocks::default().router(), get("/api-docs/openapi.json")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/roles"].is_object());
    assert!(body["paths"]["/api/v1/crews/{id}/members/{user_id}"].is_object());
}
