use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::traces::{ActivityKind, RankTier};

/// Serial identifier assigned to members by the repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivityId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BulletinId(pub u64);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registration form exactly as a prospective member fills it in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub full_name: String,
    pub age: u16,
    /// `dd/mm`
    pub birthday: String,
    pub face_claim: String,
    /// Unique handle starting with `#`; doubles as the login credential.
    pub signature: String,
    pub motivation: String,
    pub facebook_link: String,
}

/// Validated registration ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub full_name: String,
    pub age: u8,
    pub birthday: String,
    pub face_claim: String,
    pub signature: String,
    pub motivation: String,
    pub facebook_link: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Running counters accumulated from every accepted activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberTotals {
    pub traces: u64,
    pub words: u64,
    pub activities: u64,
}

impl MemberTotals {
    pub fn record(&mut self, traces: u32, words: u32) {
        self.traces = self.traces.saturating_add(u64::from(traces));
        self.words = self.words.saturating_add(u64::from(words));
        self.activities = self.activities.saturating_add(1);
    }
}

/// Stored member record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub full_name: String,
    pub age: u8,
    pub birthday: String,
    pub face_claim: String,
    pub signature: String,
    pub motivation: String,
    pub facebook_link: String,
    pub is_admin: bool,
    pub totals: MemberTotals,
    pub created_at: DateTime<Utc>,
}

impl Member {
    pub fn from_new(id: MemberId, new: NewMember) -> Self {
        Self {
            id,
            full_name: new.full_name,
            age: new.age,
            birthday: new.birthday,
            face_claim: new.face_claim,
            signature: new.signature,
            motivation: new.motivation,
            facebook_link: new.facebook_link,
            is_admin: new.is_admin,
            totals: MemberTotals::default(),
            created_at: new.created_at,
        }
    }

    pub fn rank(&self) -> RankTier {
        RankTier::for_traces(self.totals.traces)
    }

    /// Full view, signature included. Only returned to the member itself or to admins.
    pub fn view(&self) -> MemberView {
        MemberView {
            signature: Some(self.signature.clone()),
            ..self.public_view()
        }
    }

    /// View safe for anonymous readers: the signature doubles as the login credential.
    pub fn public_view(&self) -> MemberView {
        let rank = self.rank();
        MemberView {
            id: self.id,
            full_name: self.full_name.clone(),
            age: self.age,
            birthday: self.birthday.clone(),
            face_claim: self.face_claim.clone(),
            signature: None,
            motivation: self.motivation.clone(),
            facebook_link: self.facebook_link.clone(),
            is_admin: self.is_admin,
            total_traces: self.totals.traces,
            total_words: self.totals.words,
            total_activities: self.totals.activities,
            rank: rank.title(),
            medal: rank.medal(),
            traces_to_next_rank: RankTier::traces_to_next(self.totals.traces),
            created_at: self.created_at,
        }
    }
}

/// Public profile rendered by the portal, with the derived rank and medal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberView {
    pub id: MemberId,
    pub full_name: String,
    pub age: u8,
    pub birthday: String,
    pub face_claim: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    pub motivation: String,
    pub facebook_link: String,
    pub is_admin: bool,
    pub total_traces: u64,
    pub total_words: u64,
    pub total_activities: u64,
    pub rank: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medal: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traces_to_next_rank: Option<u64>,
    pub created_at: DateTime<Utc>,
}

/// Activity form as submitted by a member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivitySubmission {
    pub name: String,
    pub date: NaiveDate,
    pub words: u32,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub comments: Option<u32>,
    pub link: String,
    pub description: String,
}

/// Validated activity carrying its computed award, not yet assigned an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewActivity {
    pub member_id: MemberId,
    pub name: String,
    pub date: NaiveDate,
    pub words: u32,
    pub kind: ActivityKind,
    pub comments: u32,
    pub link: String,
    pub description: String,
    pub traces: u32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub member_id: MemberId,
    pub name: String,
    pub date: NaiveDate,
    pub words: u32,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub comments: u32,
    pub link: String,
    pub description: String,
    pub traces: u32,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    pub fn from_new(id: ActivityId, new: NewActivity) -> Self {
        Self {
            id,
            member_id: new.member_id,
            name: new.name,
            date: new.date,
            words: new.words,
            kind: new.kind,
            comments: new.comments,
            link: new.link,
            description: new.description,
            traces: new.traces,
            created_at: new.created_at,
        }
    }
}

/// Admin-authored content streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BulletinKind {
    News,
    Announcement,
    Todo,
}

impl BulletinKind {
    pub const ALL: [BulletinKind; 3] = [
        BulletinKind::News,
        BulletinKind::Announcement,
        BulletinKind::Todo,
    ];

    /// Path segment under `/api/v1/bulletins/`.
    pub fn slug(&self) -> &'static str {
        match self {
            BulletinKind::News => "news",
            BulletinKind::Announcement => "announcements",
            BulletinKind::Todo => "todos",
        }
    }
}

impl FromStr for BulletinKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        BulletinKind::ALL
            .into_iter()
            .find(|kind| kind.slug() == raw)
            .ok_or_else(|| format!("unknown bulletin stream '{raw}'"))
    }
}

/// Title plus body for any bulletin; `content` and `description` are accepted as body aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulletinDraft {
    pub title: String,
    #[serde(alias = "content", alias = "description")]
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBulletin {
    pub kind: BulletinKind,
    pub title: String,
    pub body: String,
    pub author_id: MemberId,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bulletin {
    pub id: BulletinId,
    pub kind: BulletinKind,
    pub title: String,
    pub body: String,
    pub author_id: MemberId,
    pub created_at: DateTime<Utc>,
}

impl Bulletin {
    pub fn from_new(id: BulletinId, new: NewBulletin) -> Self {
        Self {
            id,
            kind: new.kind,
            title: new.title,
            body: new.body,
            author_id: new.author_id,
            created_at: new.created_at,
        }
    }
}

/// Bulletin listed together with its author's public profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BulletinView {
    #[serde(flatten)]
    pub bulletin: Bulletin,
    pub author: MemberView,
}

/// Leaderboard ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankingOrder {
    Traces,
    Words,
}

impl RankingOrder {
    pub fn score(&self, totals: &MemberTotals) -> u64 {
        match self {
            RankingOrder::Traces => totals.traces,
            RankingOrder::Words => totals.words,
        }
    }
}

impl FromStr for RankingOrder {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw {
            "traces" => Ok(RankingOrder::Traces),
            "words" => Ok(RankingOrder::Words),
            other => Err(format!("invalid ranking type '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankingEntry {
    pub position: usize,
    pub member_id: MemberId,
    pub full_name: String,
    pub rank: &'static str,
    pub score: u64,
    pub total_traces: u64,
    pub total_words: u64,
    pub total_activities: u64,
}
