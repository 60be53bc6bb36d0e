use super::common::*;
use chrono::Utc;

use crate::portal::domain::{BulletinDraft, BulletinKind, MemberId};
use crate::portal::intake::{IntakeGuard, ValidationError};
use crate::traces::{ActivityKind, UnknownActivityKind};

#[test]
fn registration_requires_hash_signature() {
    let guard = IntakeGuard;
    for bad in ["pluma", "#", "  ", "pl#uma"] {
        let result = guard.member_from_registration(registration(bad), ROOT, Utc::now());
        assert_eq!(result, Err(ValidationError::SignatureFormat), "{bad:?}");
    }
}

#[test]
fn registration_checks_birthday_and_age() {
    let guard = IntakeGuard;

    for birthday in ["1/02", "14-02", "32/01", "10/13", "00/05", "aa/bb"] {
        let mut form = registration("#pluma");
        form.birthday = birthday.to_string();
        assert!(
            matches!(
                guard.member_from_registration(form, ROOT, Utc::now()),
                Err(ValidationError::BirthdayFormat { .. })
            ),
            "{birthday} should be rejected"
        );
    }

    for age in [12, 101] {
        let mut form = registration("#pluma");
        form.age = age;
        assert_eq!(
            guard.member_from_registration(form, ROOT, Utc::now()),
            Err(ValidationError::AgeOutOfRange { found: age })
        );
    }

    let mut form = registration("#pluma");
    form.age = 13;
    assert!(guard.member_from_registration(form, ROOT, Utc::now()).is_ok());
}

#[test]
fn registration_trims_fields_and_flags_root() {
    let guard = IntakeGuard;
    let mut form = registration(&format!("  {ROOT} "));
    form.full_name = "  Lucía Ferrer ".to_string();

    let member = guard
        .member_from_registration(form, ROOT, Utc::now())
        .expect("valid registration");
    assert_eq!(member.signature, ROOT);
    assert_eq!(member.full_name, "Lucía Ferrer");
    assert!(member.is_admin);

    let regular = guard
        .member_from_registration(registration("#pluma"), ROOT, Utc::now())
        .expect("valid registration");
    assert!(!regular.is_admin);
}

#[test]
fn registration_rejects_blank_text() {
    let mut form = registration("#pluma");
    form.motivation = "   ".to_string();
    assert_eq!(
        IntakeGuard.member_from_registration(form, ROOT, Utc::now()),
        Err(ValidationError::MissingField("motivation"))
    );
}

#[test]
fn activity_award_is_computed_at_intake() {
    let activity = IntakeGuard
        .activity_from_submission(MemberId(1), submission("narrativa", 1200, None), Utc::now())
        .expect("valid activity");
    assert_eq!(activity.kind, ActivityKind::Narrativa);
    assert_eq!(activity.traces, 500);
    assert_eq!(activity.comments, 0);
}

#[test]
fn comments_only_count_for_threads_and_roleplay() {
    let rol = IntakeGuard
        .activity_from_submission(MemberId(1), submission("rol", 800, Some(12)), Utc::now())
        .expect("valid activity");
    assert_eq!(rol.comments, 12);
    assert_eq!(rol.traces, 550);

    let hilo = IntakeGuard
        .activity_from_submission(MemberId(1), submission("hilo", 40, None), Utc::now())
        .expect("valid activity");
    assert_eq!(hilo.comments, 0);
    assert_eq!(hilo.traces, 100);

    let drabble = IntakeGuard
        .activity_from_submission(MemberId(1), submission("drabble", 100, Some(30)), Utc::now())
        .expect("valid activity");
    assert_eq!(drabble.comments, 0);
    assert_eq!(drabble.traces, 150);
}

#[test]
fn activity_rejects_unknown_kind_and_empty_works() {
    assert_eq!(
        IntakeGuard.activity_from_submission(
            MemberId(1),
            submission("poema", 40, None),
            Utc::now()
        ),
        Err(ValidationError::UnknownKind(UnknownActivityKind(
            "poema".to_string()
        )))
    );
    assert_eq!(
        IntakeGuard.activity_from_submission(
            MemberId(1),
            submission("otro", 0, None),
            Utc::now()
        ),
        Err(ValidationError::NoWords)
    );
}

#[test]
fn bulletin_requires_title_and_body() {
    let draft = BulletinDraft {
        title: " ".to_string(),
        body: "Reunión el viernes".to_string(),
    };
    assert_eq!(
        IntakeGuard.bulletin_from_draft(BulletinKind::News, MemberId(1), draft, Utc::now()),
        Err(ValidationError::MissingField("title"))
    );
}
