//! Member registration, activity intake, leaderboards and admin bulletins.

pub mod domain;
pub mod intake;
pub mod memory;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    Activity, ActivityId, ActivitySubmission, Bulletin, BulletinDraft, BulletinId, BulletinKind,
    BulletinView, Member, MemberId, MemberTotals, MemberView, RankingEntry, RankingOrder,
    Registration,
};
pub use intake::{IntakeGuard, ValidationError};
pub use memory::MemoryPortalRepository;
pub use repository::{PortalRepository, RepositoryError};
pub use router::{portal_router, ACTOR_HEADER};
pub use service::{PortalService, PortalServiceError};
