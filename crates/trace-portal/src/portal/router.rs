use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    ActivitySubmission, BulletinDraft, BulletinKind, Member, MemberId, RankingOrder, Registration,
};
use super::repository::{PortalRepository, RepositoryError};
use super::service::{PortalService, PortalServiceError};
use crate::traces::{self, RUBRIC};

/// Header carrying the acting member's signature.
pub const ACTOR_HEADER: &str = "x-portal-signature";

/// Router builder exposing the portal's HTTP endpoints.
pub fn portal_router<R>(service: Arc<PortalService<R>>) -> Router
where
    R: PortalRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/members",
            get(list_members_handler::<R>).post(register_handler::<R>),
        )
        .route("/api/v1/sessions", post(login_handler::<R>))
        .route("/api/v1/members/:member_id", get(member_handler::<R>))
        .route(
            "/api/v1/members/:member_id/activities",
            get(member_activities_handler::<R>),
        )
        .route("/api/v1/activities", post(submit_activity_handler::<R>))
        .route("/api/v1/traces/preview", post(preview_handler))
        .route("/api/v1/traces/rubric", get(rubric_handler))
        .route("/api/v1/rankings/:order", get(rankings_handler::<R>))
        .route(
            "/api/v1/bulletins/:stream",
            get(list_bulletins_handler::<R>).post(publish_bulletin_handler::<R>),
        )
        .route("/api/v1/admin/grants", post(grant_admin_handler::<R>))
        .route("/api/v1/admin/revocations", post(revoke_admin_handler::<R>))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct LoginRequest {
    pub(crate) signature: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TracePreviewRequest {
    #[serde(rename = "type")]
    pub(crate) kind: String,
    #[serde(default)]
    pub(crate) words: u32,
    #[serde(default)]
    pub(crate) comments: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AdminChangeRequest {
    pub(crate) member_id: MemberId,
}

pub(crate) async fn register_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Json(registration): Json<Registration>,
) -> Response
where
    R: PortalRepository + 'static,
{
    match service.register(registration) {
        Ok(member) => (StatusCode::CREATED, Json(member.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_members_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    headers: HeaderMap,
) -> Response
where
    R: PortalRepository + 'static,
{
    let result = resolve_actor(&service, &headers).and_then(|actor| service.members(&actor));
    match result {
        Ok(members) => (StatusCode::OK, Json(members)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn login_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Json(request): Json<LoginRequest>,
) -> Response
where
    R: PortalRepository + 'static,
{
    match service.login(&request.signature) {
        Ok(member) => (StatusCode::OK, Json(member.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn member_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Path(member_id): Path<u64>,
) -> Response
where
    R: PortalRepository + 'static,
{
    match service.member(MemberId(member_id)) {
        Ok(member) => (StatusCode::OK, Json(member.public_view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn member_activities_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Path(member_id): Path<u64>,
) -> Response
where
    R: PortalRepository + 'static,
{
    match service.activities(MemberId(member_id)) {
        Ok(activities) => (StatusCode::OK, Json(activities)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn submit_activity_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    headers: HeaderMap,
    Json(submission): Json<ActivitySubmission>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let result = resolve_actor(&service, &headers)
        .and_then(|actor| service.submit_activity(&actor, submission));
    match result {
        Ok(activity) => (StatusCode::CREATED, Json(activity)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn preview_handler(Json(request): Json<TracePreviewRequest>) -> Response {
    let quote = traces::quote(&request.kind, request.words, request.comments);
    (StatusCode::OK, Json(quote)).into_response()
}

pub(crate) async fn rubric_handler() -> Response {
    (StatusCode::OK, Json(RUBRIC.to_vec())).into_response()
}

pub(crate) async fn rankings_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Path(order): Path<String>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let order = match order.parse::<RankingOrder>() {
        Ok(order) => order,
        Err(message) => {
            return (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
        }
    };

    match service.rankings(order) {
        Ok(entries) => {
            (StatusCode::OK, Json(json!({ "order": order, "entries": entries }))).into_response()
        }
        Err(err) => error_response(err),
    }
}

pub(crate) async fn list_bulletins_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Path(stream): Path<String>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let kind = match stream.parse::<BulletinKind>() {
        Ok(kind) => kind,
        Err(message) => return unknown_stream(message),
    };

    match service.bulletins(kind) {
        Ok(bulletins) => (StatusCode::OK, Json(bulletins)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn publish_bulletin_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    Path(stream): Path<String>,
    headers: HeaderMap,
    Json(draft): Json<BulletinDraft>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let kind = match stream.parse::<BulletinKind>() {
        Ok(kind) => kind,
        Err(message) => return unknown_stream(message),
    };

    let result =
        resolve_actor(&service, &headers).and_then(|actor| service.publish(&actor, kind, draft));
    match result {
        Ok(bulletin) => (StatusCode::CREATED, Json(bulletin)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn grant_admin_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    headers: HeaderMap,
    Json(request): Json<AdminChangeRequest>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let result = resolve_actor(&service, &headers)
        .and_then(|actor| service.grant_admin(&actor, request.member_id));
    match result {
        Ok(member) => (StatusCode::OK, Json(member.view())).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn revoke_admin_handler<R>(
    State(service): State<Arc<PortalService<R>>>,
    headers: HeaderMap,
    Json(request): Json<AdminChangeRequest>,
) -> Response
where
    R: PortalRepository + 'static,
{
    let result = resolve_actor(&service, &headers)
        .and_then(|actor| service.revoke_admin(&actor, request.member_id));
    match result {
        Ok(member) => (StatusCode::OK, Json(member.view())).into_response(),
        Err(err) => error_response(err),
    }
}

/// Resolve the acting member from the request headers.
pub(crate) fn resolve_actor<R>(
    service: &PortalService<R>,
    headers: &HeaderMap,
) -> Result<Member, PortalServiceError>
where
    R: PortalRepository + 'static,
{
    let signature = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(PortalServiceError::MissingActor)?;
    service.login(signature).map_err(|err| match err {
        PortalServiceError::Validation(_) => PortalServiceError::UnknownSignature,
        other => other,
    })
}

pub(crate) fn status_for(error: &PortalServiceError) -> StatusCode {
    match error {
        PortalServiceError::Validation(_) | PortalServiceError::RootProtected => {
            StatusCode::BAD_REQUEST
        }
        PortalServiceError::DuplicateSignature
        | PortalServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PortalServiceError::UnknownSignature | PortalServiceError::MissingActor => {
            StatusCode::UNAUTHORIZED
        }
        PortalServiceError::AdminRequired | PortalServiceError::RootRequired => {
            StatusCode::FORBIDDEN
        }
        PortalServiceError::MemberNotFound(_)
        | PortalServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PortalServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn error_response(error: PortalServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (status_for(&error), Json(payload)).into_response()
}

fn unknown_stream(message: String) -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": message }))).into_response()
}
