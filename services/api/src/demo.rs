use crate::infra::in_memory_portal;
use chrono::{Local, NaiveDate};
use clap::Args;
use trace_portal::config::{PortalConfig, DEFAULT_ROOT_SIGNATURE};
use trace_portal::error::AppError;
use trace_portal::portal::{
    ActivitySubmission, BulletinDraft, BulletinKind, Member, PortalRepository, PortalService,
    PortalServiceError, RankingOrder, Registration,
};
use trace_portal::traces::{self, ActivityKind, RUBRIC};

#[derive(Args, Debug)]
pub(crate) struct TracesArgs {
    /// Activity type (narrativa, microcuento, drabble, hilo, rol, otro)
    #[arg(long)]
    pub(crate) kind: String,
    /// Word count of the work
    #[arg(long, default_value_t = 0)]
    pub(crate) words: u32,
    /// Comment count, only read for hilo and rol
    #[arg(long, default_value_t = 0)]
    pub(crate) comments: u32,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Date stamped on the demo activities (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    /// Skip the bulletin portion of the demo.
    #[arg(long)]
    pub(crate) skip_bulletins: bool,
}

pub(crate) fn run_traces(args: TracesArgs) -> Result<(), AppError> {
    let quote = traces::quote(&args.kind, args.words, args.comments);
    match &quote.condition {
        Some(condition) => println!(
            "{} ({} words, {} comments): {} traces [{}]",
            quote.kind, quote.words, quote.comments, quote.traces, condition
        ),
        None => println!(
            "{} ({} words, {} comments): {} traces [no bracket matched]",
            quote.kind, quote.words, quote.comments, quote.traces
        ),
    }
    Ok(())
}

pub(crate) fn run_rubric() -> Result<(), AppError> {
    println!("Traces rubric");
    for kind in ActivityKind::ALL {
        println!("\n{} (measured in {})", kind, kind.measure().label());
        for bracket in RUBRIC.iter().filter(|bracket| bracket.kind == kind) {
            println!("- {:<24} {:>4} traces", bracket.condition(), bracket.award);
        }
        println!("- {:<24} {:>4} traces", "anything else", 0);
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        date,
        skip_bulletins,
    } = args;
    let date = date.unwrap_or_else(|| Local::now().date_naive());

    let portal = in_memory_portal(PortalConfig::default());
    walkthrough(&portal, date, skip_bulletins)
}

fn walkthrough<R>(
    portal: &PortalService<R>,
    date: NaiveDate,
    skip_bulletins: bool,
) -> Result<(), AppError>
where
    R: PortalRepository + 'static,
{
    println!("Trace portal demo");
    let register = |name: &str, signature: &str| -> Result<Member, AppError> {
        let member = portal.register(demo_registration(name, signature))?;
        println!(
            "- Registered {} as member {}{}",
            member.signature,
            member.id,
            if member.is_admin { " (admin)" } else { "" }
        );
        Ok(member)
    };
    let root = register("Coordinación", DEFAULT_ROOT_SIGNATURE)?;
    let mara = register("Mara Quiroga", "#mara")?;
    let leo = register("Leo Paredes", "#leo")?;

    println!("\nSubmissions");
    let submissions = [
        (&mara, demo_activity("Cartas al mar", "narrativa", 1250, None, date)),
        (&mara, demo_activity("Niebla", "drabble", 160, None, date)),
        (&leo, demo_activity("Partida de rol", "rol", 2200, Some(16), date)),
        (&leo, demo_activity("Encuesta", "otro", 40, None, date)),
        (&root, demo_activity("Hilo de bienvenida", "hilo", 300, Some(3), date)),
    ];
    for (author, submission) in submissions {
        let activity = portal.submit_activity(author, submission)?;
        println!(
            "- {} submitted '{}' ({}, {} words) -> {} traces",
            author.signature, activity.name, activity.kind, activity.words, activity.traces
        );
    }

    for order in [RankingOrder::Traces, RankingOrder::Words] {
        let label = match order {
            RankingOrder::Traces => "traces",
            RankingOrder::Words => "words",
        };
        println!("\nRanking by {label}");
        for entry in portal.rankings(order)? {
            println!(
                "{}. {} - {} {} ({})",
                entry.position, entry.full_name, entry.score, label, entry.rank
            );
        }
    }

    if skip_bulletins {
        return Ok(());
    }

    println!("\nBulletins");
    let draft = BulletinDraft {
        title: "Antología de otoño".to_string(),
        body: "Abrimos convocatoria".to_string(),
    };
    match portal.publish(&mara, BulletinKind::News, draft) {
        Err(PortalServiceError::AdminRequired) => {
            println!("- {} is not an admin yet and cannot publish", mara.signature)
        }
        Err(err) => return Err(err.into()),
        Ok(_) => println!("- {} published without admin rights", mara.signature),
    }

    let mara = portal.grant_admin(&root, mara.id)?;
    println!("- {} granted admin to {}", root.signature, mara.signature);

    let drafts = [
        (
            &mara,
            BulletinKind::News,
            "Antología de otoño",
            "Abrimos convocatoria",
        ),
        (
            &root,
            BulletinKind::Announcement,
            "Normas",
            "Recuerda firmar cada entrega",
        ),
        (
            &root,
            BulletinKind::Todo,
            "Reto semanal",
            "Un microcuento sobre la lluvia",
        ),
    ];
    for (author, kind, title, body) in drafts {
        portal.publish(
            author,
            kind,
            BulletinDraft {
                title: title.to_string(),
                body: body.to_string(),
            },
        )?;
    }

    for kind in BulletinKind::ALL {
        for view in portal.bulletins(kind)? {
            println!(
                "- [{}] {}: {} (by {})",
                kind.slug(),
                view.bulletin.title,
                view.bulletin.body,
                view.author.full_name
            );
        }
    }

    Ok(())
}

fn demo_registration(full_name: &str, signature: &str) -> Registration {
    Registration {
        full_name: full_name.to_string(),
        age: 28,
        birthday: "21/09".to_string(),
        face_claim: "Zendaya".to_string(),
        signature: signature.to_string(),
        motivation: "Compartir lo que escribo".to_string(),
        facebook_link: "https://facebook.com/trace-portal".to_string(),
    }
}

fn demo_activity(
    name: &str,
    kind: &str,
    words: u32,
    comments: Option<u32>,
    date: NaiveDate,
) -> ActivitySubmission {
    ActivitySubmission {
        name: name.to_string(),
        date,
        words,
        kind: kind.to_string(),
        comments,
        link: format!("https://example.org/{}", name.to_lowercase().replace(' ', "-")),
        description: format!("{name} ({kind})"),
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_dates() {
        assert_eq!(
            parse_date(" 2025-03-08 "),
            Ok(NaiveDate::from_ymd_opt(2025, 3, 8).expect("valid"))
        );
        assert!(parse_date("08/03/2025").is_err());
    }

    #[test]
    fn demo_runs_to_completion() {
        let args = DemoArgs {
            date: NaiveDate::from_ymd_opt(2025, 3, 8),
            skip_bulletins: false,
        };
        assert!(run_demo(args).is_ok());
    }

    #[test]
    fn walkthrough_fails_when_a_registration_is_rejected() {
        let portal = in_memory_portal(PortalConfig::default());
        portal
            .register(demo_registration("Otra Mara", "#mara"))
            .expect("first registration succeeds");

        let err = walkthrough(&portal, NaiveDate::MIN, true).expect_err("duplicate signature");
        assert!(matches!(
            err,
            AppError::Portal(PortalServiceError::DuplicateSignature)
        ));
    }

    #[test]
    fn demo_activity_links_are_slugged() {
        let activity = demo_activity("Cartas al mar", "narrativa", 600, None, NaiveDate::MIN);
        assert_eq!(activity.link, "https://example.org/cartas-al-mar");
    }
}
