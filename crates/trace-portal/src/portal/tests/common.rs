use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::config::PortalConfig;
use crate::portal::domain::{
    Activity, ActivitySubmission, Bulletin, BulletinKind, Member, MemberId, NewActivity,
    NewBulletin, NewMember, Registration,
};
use crate::portal::memory::MemoryPortalRepository;
use crate::portal::repository::{PortalRepository, RepositoryError};
use crate::portal::{portal_router, PortalService};

pub(super) const ROOT: &str = "#INELUDIBLE";

pub(super) fn registration(signature: &str) -> Registration {
    Registration {
        full_name: "Lucía Ferrer".to_string(),
        age: 27,
        birthday: "14/02".to_string(),
        face_claim: "Ana de Armas".to_string(),
        signature: signature.to_string(),
        motivation: "Escribir cada semana".to_string(),
        facebook_link: "https://facebook.com/lucia.ferrer".to_string(),
    }
}

pub(super) fn submission(kind: &str, words: u32, comments: Option<u32>) -> ActivitySubmission {
    ActivitySubmission {
        name: "Cartas al mar".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 3, 8).expect("valid date"),
        words,
        kind: kind.to_string(),
        comments,
        link: "https://example.org/cartas".to_string(),
        description: "Relato epistolar".to_string(),
    }
}

pub(super) fn build_service() -> (
    PortalService<MemoryPortalRepository>,
    Arc<MemoryPortalRepository>,
) {
    let repository = Arc::new(MemoryPortalRepository::default());
    let service = PortalService::new(repository.clone(), PortalConfig::default());
    (service, repository)
}

/// Service with the root member and one regular member already registered.
pub(super) fn seeded_service() -> (PortalService<MemoryPortalRepository>, Member, Member) {
    let (service, _) = build_service();
    let root = service.register(registration(ROOT)).expect("root registers");
    let writer = service
        .register(registration("#pluma"))
        .expect("writer registers");
    (service, root, writer)
}

pub(super) fn router_with_service(service: PortalService<MemoryPortalRepository>) -> axum::Router {
    portal_router(Arc::new(service))
}

pub(super) struct UnavailableRepository;

impl PortalRepository for UnavailableRepository {
    fn insert_member(&self, _member: NewMember) -> Result<Member, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn member(&self, _id: MemberId) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn member_by_signature(&self, _signature: &str) -> Result<Option<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn members(&self) -> Result<Vec<Member>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn set_admin(&self, _id: MemberId, _is_admin: bool) -> Result<Member, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_activity(&self, _activity: NewActivity) -> Result<Activity, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn activities_for(&self, _member_id: MemberId) -> Result<Vec<Activity>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn insert_bulletin(&self, _bulletin: NewBulletin) -> Result<Bulletin, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn bulletins(&self, _kind: BulletinKind) -> Result<Vec<Bulletin>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
