use std::cmp::Reverse;
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{
    Activity, ActivitySubmission, Bulletin, BulletinDraft, BulletinKind, BulletinView, Member,
    MemberId, MemberView, RankingEntry, RankingOrder, Registration,
};
use super::intake::{IntakeGuard, ValidationError};
use super::repository::{PortalRepository, RepositoryError};
use crate::config::PortalConfig;

/// Service composing intake validation, the traces rubric, and the repository.
///
/// Operations that act on behalf of someone take the acting member explicitly; the service keeps
/// no notion of a current session.
pub struct PortalService<R> {
    guard: IntakeGuard,
    repository: Arc<R>,
    config: PortalConfig,
}

impl<R> PortalService<R>
where
    R: PortalRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: PortalConfig) -> Self {
        Self {
            guard: IntakeGuard,
            repository,
            config,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn is_root(&self, member: &Member) -> bool {
        member.signature == self.config.root_signature()
    }

    /// Register a new member. The configured root signature registers as an admin.
    pub fn register(&self, registration: Registration) -> Result<Member, PortalServiceError> {
        let new_member = self.guard.member_from_registration(
            registration,
            self.config.root_signature(),
            Utc::now(),
        )?;

        if self
            .repository
            .member_by_signature(&new_member.signature)?
            .is_some()
        {
            return Err(PortalServiceError::DuplicateSignature);
        }

        let member = self
            .repository
            .insert_member(new_member)
            .map_err(|err| match err {
                RepositoryError::Conflict => PortalServiceError::DuplicateSignature,
                other => PortalServiceError::Repository(other),
            })?;

        info!(member_id = %member.id, signature = %member.signature, admin = member.is_admin, "member registered");
        Ok(member)
    }

    /// Resolve a signature to its member. This is the whole of authentication.
    pub fn login(&self, signature: &str) -> Result<Member, PortalServiceError> {
        let signature = self.guard.signature(signature)?;
        match self.repository.member_by_signature(&signature)? {
            Some(member) => Ok(member),
            None => {
                warn!(%signature, "login with unknown signature");
                Err(PortalServiceError::UnknownSignature)
            }
        }
    }

    pub fn member(&self, id: MemberId) -> Result<Member, PortalServiceError> {
        self.repository
            .member(id)?
            .ok_or(PortalServiceError::MemberNotFound(id))
    }

    /// Every member with full views, for admin management. Admins only.
    pub fn members(&self, actor: &Member) -> Result<Vec<MemberView>, PortalServiceError> {
        if !actor.is_admin {
            warn!(member_id = %actor.id, "non-admin tried to list members");
            return Err(PortalServiceError::AdminRequired);
        }
        let mut members = self.repository.members()?;
        members.sort_by_key(|member| member.id);
        Ok(members.iter().map(Member::view).collect())
    }

    /// Accept an activity from `actor`, award its traces, and update the actor's totals.
    pub fn submit_activity(
        &self,
        actor: &Member,
        submission: ActivitySubmission,
    ) -> Result<Activity, PortalServiceError> {
        let new_activity =
            self.guard
                .activity_from_submission(actor.id, submission, Utc::now())?;

        let activity = self
            .repository
            .record_activity(new_activity)
            .map_err(|err| match err {
                RepositoryError::NotFound => PortalServiceError::MemberNotFound(actor.id),
                other => PortalServiceError::Repository(other),
            })?;

        info!(
            member_id = %actor.id,
            kind = %activity.kind,
            words = activity.words,
            comments = activity.comments,
            traces = activity.traces,
            "activity recorded"
        );
        Ok(activity)
    }

    /// A member's activities, newest first.
    pub fn activities(&self, member_id: MemberId) -> Result<Vec<Activity>, PortalServiceError> {
        self.member(member_id)?;
        let mut activities = self.repository.activities_for(member_id)?;
        activities.sort_by_key(|activity| Reverse((activity.created_at, activity.id)));
        Ok(activities)
    }

    /// Leaderboard sorted by the chosen total, highest first; ties go to the earlier member.
    pub fn rankings(&self, order: RankingOrder) -> Result<Vec<RankingEntry>, PortalServiceError> {
        let mut members = self.repository.members()?;
        members.sort_by_key(|member| (Reverse(order.score(&member.totals)), member.id));

        Ok(members
            .into_iter()
            .enumerate()
            .map(|(index, member)| RankingEntry {
                position: index + 1,
                member_id: member.id,
                rank: member.rank().title(),
                score: order.score(&member.totals),
                total_traces: member.totals.traces,
                total_words: member.totals.words,
                total_activities: member.totals.activities,
                full_name: member.full_name,
            })
            .collect())
    }

    /// Publish a bulletin. Only admins may publish.
    pub fn publish(
        &self,
        actor: &Member,
        kind: BulletinKind,
        draft: BulletinDraft,
    ) -> Result<Bulletin, PortalServiceError> {
        if !actor.is_admin {
            warn!(member_id = %actor.id, stream = kind.slug(), "non-admin tried to publish");
            return Err(PortalServiceError::AdminRequired);
        }

        let new_bulletin = self
            .guard
            .bulletin_from_draft(kind, actor.id, draft, Utc::now())?;
        let bulletin = self.repository.insert_bulletin(new_bulletin)?;

        info!(member_id = %actor.id, stream = kind.slug(), bulletin_id = bulletin.id.0, "bulletin published");
        Ok(bulletin)
    }

    /// Bulletins of one stream, newest first. Entries whose author no longer exists are skipped.
    pub fn bulletins(&self, kind: BulletinKind) -> Result<Vec<BulletinView>, PortalServiceError> {
        let mut bulletins = self.repository.bulletins(kind)?;
        bulletins.sort_by_key(|bulletin| Reverse((bulletin.created_at, bulletin.id)));

        let mut views = Vec::with_capacity(bulletins.len());
        for bulletin in bulletins {
            if let Some(author) = self.repository.member(bulletin.author_id)? {
                views.push(BulletinView {
                    bulletin,
                    author: author.public_view(),
                });
            }
        }
        Ok(views)
    }

    /// Grant admin rights. Only the root member may do this.
    pub fn grant_admin(
        &self,
        actor: &Member,
        target: MemberId,
    ) -> Result<Member, PortalServiceError> {
        self.require_root(actor)?;
        self.member(target)?;
        let member = self.repository.set_admin(target, true)?;
        info!(member_id = %target, granted_by = %actor.id, "admin rights granted");
        Ok(member)
    }

    /// Revoke admin rights. Only the root member may do this, and never from itself.
    pub fn revoke_admin(
        &self,
        actor: &Member,
        target: MemberId,
    ) -> Result<Member, PortalServiceError> {
        self.require_root(actor)?;
        let member = self.member(target)?;
        if self.is_root(&member) {
            return Err(PortalServiceError::RootProtected);
        }
        let member = self.repository.set_admin(target, false)?;
        info!(member_id = %target, revoked_by = %actor.id, "admin rights revoked");
        Ok(member)
    }

    fn require_root(&self, actor: &Member) -> Result<(), PortalServiceError> {
        if self.is_root(actor) {
            Ok(())
        } else {
            warn!(member_id = %actor.id, "non-root member tried to change admin rights");
            Err(PortalServiceError::RootRequired)
        }
    }
}

/// Error raised by the portal service.
#[derive(Debug, thiserror::Error)]
pub enum PortalServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("signature already exists")]
    DuplicateSignature,
    #[error("invalid signature")]
    UnknownSignature,
    #[error("acting member signature header is required")]
    MissingActor,
    #[error("member {0} not found")]
    MemberNotFound(MemberId),
    #[error("admin access required")]
    AdminRequired,
    #[error("only the root member can change admin roles")]
    RootRequired,
    #[error("cannot remove admin status from the root member")]
    RootProtected,
}
