use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::domain::{
    Activity, ActivityId, Bulletin, BulletinId, BulletinKind, Member, MemberId, NewActivity,
    NewBulletin, NewMember,
};
use super::repository::{PortalRepository, RepositoryError};

/// Process-local repository. All tables sit behind one mutex, so every write is atomic.
#[derive(Debug, Default, Clone)]
pub struct MemoryPortalRepository {
    tables: Arc<Mutex<Tables>>,
}

#[derive(Debug, Default)]
struct Tables {
    members: BTreeMap<MemberId, Member>,
    activities: Vec<Activity>,
    bulletins: Vec<Bulletin>,
    last_member_id: u64,
    last_activity_id: u64,
    last_bulletin_id: u64,
}

impl MemoryPortalRepository {
    fn tables(&self) -> Result<MutexGuard<'_, Tables>, RepositoryError> {
        self.tables
            .lock()
            .map_err(|_| RepositoryError::Unavailable("portal tables poisoned".to_string()))
    }
}

impl PortalRepository for MemoryPortalRepository {
    fn insert_member(&self, member: NewMember) -> Result<Member, RepositoryError> {
        let mut tables = self.tables()?;
        if tables
            .members
            .values()
            .any(|existing| existing.signature == member.signature)
        {
            return Err(RepositoryError::Conflict);
        }

        tables.last_member_id += 1;
        let id = MemberId(tables.last_member_id);
        let member = Member::from_new(id, member);
        tables.members.insert(id, member.clone());
        Ok(member)
    }

    fn member(&self, id: MemberId) -> Result<Option<Member>, RepositoryError> {
        Ok(self.tables()?.members.get(&id).cloned())
    }

    fn member_by_signature(&self, signature: &str) -> Result<Option<Member>, RepositoryError> {
        Ok(self
            .tables()?
            .members
            .values()
            .find(|member| member.signature == signature)
            .cloned())
    }

    fn members(&self) -> Result<Vec<Member>, RepositoryError> {
        Ok(self.tables()?.members.values().cloned().collect())
    }

    fn set_admin(&self, id: MemberId, is_admin: bool) -> Result<Member, RepositoryError> {
        let mut tables = self.tables()?;
        let member = tables
            .members
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        member.is_admin = is_admin;
        Ok(member.clone())
    }

    fn record_activity(&self, activity: NewActivity) -> Result<Activity, RepositoryError> {
        let mut tables = self.tables()?;
        let (traces, words) = (activity.traces, activity.words);
        tables
            .members
            .get_mut(&activity.member_id)
            .ok_or(RepositoryError::NotFound)?
            .totals
            .record(traces, words);

        tables.last_activity_id += 1;
        let activity = Activity::from_new(ActivityId(tables.last_activity_id), activity);
        tables.activities.push(activity.clone());
        Ok(activity)
    }

    fn activities_for(&self, member_id: MemberId) -> Result<Vec<Activity>, RepositoryError> {
        Ok(self
            .tables()?
            .activities
            .iter()
            .filter(|activity| activity.member_id == member_id)
            .cloned()
            .collect())
    }

    fn insert_bulletin(&self, bulletin: NewBulletin) -> Result<Bulletin, RepositoryError> {
        let mut tables = self.tables()?;
        tables.last_bulletin_id += 1;
        let bulletin = Bulletin::from_new(BulletinId(tables.last_bulletin_id), bulletin);
        tables.bulletins.push(bulletin.clone());
        Ok(bulletin)
    }

    fn bulletins(&self, kind: BulletinKind) -> Result<Vec<Bulletin>, RepositoryError> {
        Ok(self
            .tables()?
            .bulletins
            .iter()
            .filter(|bulletin| bulletin.kind == kind)
            .cloned()
            .collect())
    }
}
