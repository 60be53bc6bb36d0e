use super::domain::{
    Activity, Bulletin, BulletinKind, Member, MemberId, NewActivity, NewBulletin, NewMember,
};

/// Storage abstraction so the service module can be exercised in isolation.
///
/// Implementations assign identifiers. `record_activity` must store the activity and bump the
/// owner's totals as one atomic step.
pub trait PortalRepository: Send + Sync {
    fn insert_member(&self, member: NewMember) -> Result<Member, RepositoryError>;
    fn member(&self, id: MemberId) -> Result<Option<Member>, RepositoryError>;
    fn member_by_signature(&self, signature: &str) -> Result<Option<Member>, RepositoryError>;
    fn members(&self) -> Result<Vec<Member>, RepositoryError>;
    fn set_admin(&self, id: MemberId, is_admin: bool) -> Result<Member, RepositoryError>;

    fn record_activity(&self, activity: NewActivity) -> Result<Activity, RepositoryError>;
    fn activities_for(&self, member_id: MemberId) -> Result<Vec<Activity>, RepositoryError>;

    fn insert_bulletin(&self, bulletin: NewBulletin) -> Result<Bulletin, RepositoryError>;
    fn bulletins(&self, kind: BulletinKind) -> Result<Vec<Bulletin>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
