use chrono::{DateTime, Utc};

use super::domain::{
    ActivitySubmission, BulletinDraft, BulletinKind, MemberId, NewActivity, NewBulletin,
    NewMember, Registration,
};
use crate::traces::{ActivityKind, UnknownActivityKind};

pub const MIN_AGE: u16 = 13;
pub const MAX_AGE: u16 = 100;

/// Input errors raised before anything reaches the repository.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("signature must start with # followed by a handle")]
    SignatureFormat,
    #[error("birthday must be in dd/mm format (found '{found}')")]
    BirthdayFormat { found: String },
    #[error("age must be between {} and {} (found {found})", MIN_AGE, MAX_AGE)]
    AgeOutOfRange { found: u16 },
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error(transparent)]
    UnknownKind(#[from] UnknownActivityKind),
    #[error("an activity must contain at least one word")]
    NoWords,
}

/// Turns raw forms into records the repository can store.
#[derive(Debug, Clone, Default)]
pub struct IntakeGuard;

impl IntakeGuard {
    pub fn signature(&self, raw: &str) -> Result<String, ValidationError> {
        let signature = raw.trim();
        if signature.len() < 2 || !signature.starts_with('#') {
            return Err(ValidationError::SignatureFormat);
        }
        Ok(signature.to_string())
    }

    pub fn member_from_registration(
        &self,
        registration: Registration,
        root_signature: &str,
        created_at: DateTime<Utc>,
    ) -> Result<NewMember, ValidationError> {
        let signature = self.signature(&registration.signature)?;

        let age = u8::try_from(registration.age)
            .ok()
            .filter(|_| (MIN_AGE..=MAX_AGE).contains(&registration.age))
            .ok_or(ValidationError::AgeOutOfRange {
                found: registration.age,
            })?;

        let birthday = registration.birthday.trim();
        if !is_day_month(birthday) {
            return Err(ValidationError::BirthdayFormat {
                found: birthday.to_string(),
            });
        }

        Ok(NewMember {
            full_name: required("full_name", registration.full_name)?,
            age,
            birthday: birthday.to_string(),
            face_claim: required("face_claim", registration.face_claim)?,
            is_admin: signature == root_signature,
            signature,
            motivation: required("motivation", registration.motivation)?,
            facebook_link: required("facebook_link", registration.facebook_link)?,
            created_at,
        })
    }

    /// Validates the form and stamps it with the award the rubric assigns.
    pub fn activity_from_submission(
        &self,
        member_id: MemberId,
        submission: ActivitySubmission,
        created_at: DateTime<Utc>,
    ) -> Result<NewActivity, ValidationError> {
        let kind = submission.kind.trim().parse::<ActivityKind>()?;
        if submission.words == 0 {
            return Err(ValidationError::NoWords);
        }

        let comments = if kind.counts_comments() {
            submission.comments.unwrap_or(0)
        } else {
            0
        };
        let traces = kind.award(submission.words, comments);

        Ok(NewActivity {
            member_id,
            name: required("name", submission.name)?,
            date: submission.date,
            words: submission.words,
            kind,
            comments,
            link: required("link", submission.link)?,
            description: required("description", submission.description)?,
            traces,
            created_at,
        })
    }

    pub fn bulletin_from_draft(
        &self,
        kind: BulletinKind,
        author_id: MemberId,
        draft: BulletinDraft,
        created_at: DateTime<Utc>,
    ) -> Result<NewBulletin, ValidationError> {
        Ok(NewBulletin {
            kind,
            title: required("title", draft.title)?,
            body: required("body", draft.body)?,
            author_id,
            created_at,
        })
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(trimmed.to_string())
}

fn is_day_month(raw: &str) -> bool {
    let Some((day, month)) = raw.split_once('/') else {
        return false;
    };
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(day) || !two_digits(month) {
        return false;
    }

    match (day.parse::<u8>(), month.parse::<u8>()) {
        (Ok(day), Ok(month)) => (1..=31).contains(&day) && (1..=12).contains(&month),
        _ => false,
    }
}
