use crate::infra::{InMemoryApplicationRepository, InMemoryAwardRepository};
use award_desk::applications::{ApplicationService, StudentId};
use award_desk::awards::{
    Award, AwardCatalogue, AwardCategory, AwardCsvImporter, AwardId, AwardQuery, AwardSort,
    AwardView, SortDirection, SortField,
};
use award_desk::dates::today_or_local;
use award_desk::error::AppError;
use award_desk::lifecycle::{classify_award, AwardLinkage, AwardWindow};
use award_desk::session::{Role, Session};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ClassifyArgs {
    /// Award deadline (YYYY-MM-DD)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) deadline: NaiveDate,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Treat the award as administratively closed
    #[arg(long)]
    pub(crate) inactive: bool,
}

#[derive(Args, Debug)]
pub(crate) struct ListArgs {
    /// Award catalogue CSV export
    #[arg(long)]
    pub(crate) catalogue: PathBuf,
    /// Evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Free-text filter over title and description
    #[arg(long)]
    pub(crate) search: Option<String>,
    /// Restrict to one category (scholarship, grant, bursary, prize)
    #[arg(long, value_parser = parse_category)]
    pub(crate) category: Option<AwardCategory>,
    /// Required citizenship; repeat for several
    #[arg(long)]
    pub(crate) citizenship: Vec<String>,
    /// Sort field (deadline, value, title, created_at)
    #[arg(long, value_parser = parse_sort_field)]
    pub(crate) sort: Option<SortField>,
    /// Sort descending instead of ascending
    #[arg(long)]
    pub(crate) desc: bool,
    /// Include awards that an administrator has switched off
    #[arg(long)]
    pub(crate) include_inactive: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional catalogue CSV. Defaults to a built-in sample relative to today.
    #[arg(long)]
    pub(crate) catalogue: Option<PathBuf>,
    /// Override the evaluation date (defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Student identifier used for the walkthrough
    #[arg(long, default_value = "student-demo")]
    pub(crate) student: String,
}

fn parse_category(raw: &str) -> Result<AwardCategory, String> {
    AwardCategory::parse(raw).ok_or_else(|| format!("unknown award category '{raw}'"))
}

fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    SortField::parse(raw).ok_or_else(|| format!("unknown sort field '{raw}'"))
}

pub(crate) fn run_classify(args: ClassifyArgs) {
    let today = today_or_local(args.today);
    let is_active = if args.inactive { Some(false) } else { None };
    let status = classify_award(&AwardWindow::new(args.deadline, is_active), today);
    println!(
        "Deadline {} evaluated {}: {}",
        args.deadline,
        today,
        status.label()
    );
}

pub(crate) fn run_list(args: ListArgs) -> Result<(), AppError> {
    let today = today_or_local(args.today);
    let awards = AwardCsvImporter::from_path(&args.catalogue)?;
    let catalogue = AwardCatalogue::new(Arc::new(InMemoryAwardRepository::seeded(awards)));

    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let query = AwardQuery {
        active: if args.include_inactive { None } else { Some(true) },
        search: args.search,
        category: args.category,
        citizenship: args.citizenship,
        sort: args.sort.map(|field| AwardSort::new(field, direction)),
    };

    let views = catalogue.browse(&query, today)?;
    println!("Awards evaluated {} ({} listed)", today, views.len());
    render_views(&views);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = today_or_local(args.today);
    let awards = match &args.catalogue {
        Some(path) => AwardCsvImporter::from_path(path)?,
        None => sample_catalogue(today),
    };

    let award_store = Arc::new(InMemoryAwardRepository::seeded(awards));
    let catalogue = AwardCatalogue::new(award_store.clone());
    let service = ApplicationService::new(
        award_store,
        Arc::new(InMemoryApplicationRepository::default()),
    );

    println!("Award portal demo (evaluated {today})");
    println!("\nCatalogue");
    let views = catalogue.browse(&AwardQuery::all(), today)?;
    render_views(&views);

    let session = Session::new(args.student.clone(), Role::Student);
    let student = StudentId(args.student);

    let Some(target) = views
        .iter()
        .find(|view| view.status.accepts_applications())
    else {
        println!("\nNo award currently accepts applications; skipping walkthrough.");
        return Ok(());
    };

    println!("\nStudent {} walkthrough on {}", student.0, target.title);
    match service.start_draft(&session, &target.id, today) {
        Ok(draft) => {
            println!("- opened draft {}", draft.id.0);
            render_linkages(&service_linkages(&service, &student, today)?);
            match service.submit(&session, &draft.id, today) {
                Ok(submitted) => println!("- submitted {} on {}", submitted.id.0, today),
                Err(err) => println!("- submission failed: {err}"),
            }
            let reviewer = Session::new("reviewer-demo", Role::Reviewer);
            match service.review(&reviewer, &draft.id) {
                Ok(reviewed) => println!(
                    "- reviewer marked {} {}",
                    reviewed.id.0,
                    reviewed.status.label()
                ),
                Err(err) => println!("- review failed: {err}"),
            }
        }
        Err(err) => println!("- could not open draft: {err}"),
    }

    println!("\nLinkage after walkthrough");
    render_linkages(&service_linkages(&service, &student, today)?);
    Ok(())
}

fn service_linkages(
    service: &ApplicationService<InMemoryAwardRepository, InMemoryApplicationRepository>,
    student: &StudentId,
    today: NaiveDate,
) -> Result<Vec<AwardLinkage>, AppError> {
    Ok(service.linkages(student, &AwardQuery::all(), today)?)
}

fn render_views(views: &[AwardView]) {
    if views.is_empty() {
        println!("- none");
        return;
    }

    for view in views {
        println!(
            "- {} | {} | {} | ${} | deadline {} | {}",
            view.id, view.title, view.category_label, view.value, view.deadline, view.status_label
        );
    }
}

fn render_linkages(linkages: &[AwardLinkage]) {
    for linkage in linkages {
        let application = linkage
            .application_status
            .map(|status| format!(" ({})", status.label()))
            .unwrap_or_default();
        println!(
            "- {} [{}]: {}{}",
            linkage.award_id,
            linkage.status.label(),
            linkage.affordance_label,
            application
        );
    }
}

/// One award per status band, positioned relative to `today`.
pub(crate) fn sample_catalogue(today: NaiveDate) -> Vec<Award> {
    let created_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default();
    let entry = |id: &str,
                 title: &str,
                 category: AwardCategory,
                 value: u32,
                 offset: i64,
                 is_active: Option<bool>| Award {
        id: AwardId(id.to_string()),
        title: title.to_string(),
        description: format!("{} sample award", category.label()),
        category,
        value,
        deadline: today + Duration::days(offset),
        is_active,
        citizenship: vec!["CA".to_string()],
        created_at,
    };

    use AwardCategory::*;
    vec![
        entry("sch-100", "Dean's Entrance Scholarship", Scholarship, 5000, 12, None),
        entry("grt-200", "Summer Research Grant", Grant, 2500, 60, Some(true)),
        entry("bur-300", "Emergency Bursary", Bursary, 750, -5, None),
        entry("prz-400", "Convocation Prize", Prize, 300, 20, Some(false)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use award_desk::lifecycle::AwardStatus;

    #[test]
    fn sample_catalogue_covers_every_status() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let statuses: Vec<AwardStatus> = sample_catalogue(today)
            .iter()
            .map(|award| award.status_on(today))
            .collect();
        assert_eq!(
            statuses,
            vec![
                AwardStatus::Open,
                AwardStatus::Upcoming,
                AwardStatus::Closed,
                AwardStatus::Closed,
            ]
        );
    }

    #[test]
    fn demo_runs_against_sample_catalogue() {
        let args = DemoArgs {
            catalogue: None,
            today: NaiveDate::from_ymd_opt(2024, 3, 1),
            student: "s-1".to_string(),
        };
        run_demo(args).expect("demo completes");
    }

    #[test]
    fn service_linkages_reflect_open_drafts() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 1).expect("valid date");
        let service = ApplicationService::new(
            Arc::new(InMemoryAwardRepository::seeded(sample_catalogue(today))),
            Arc::new(InMemoryApplicationRepository::default()),
        );
        let session = Session::new("s-1", Role::Student);
        service
            .start_draft(&session, &AwardId("sch-100".to_string()), today)
            .expect("draft opens");

        let linkages = service_linkages(&service, &StudentId("s-1".to_string()), today)
            .expect("linkages resolve");
        let draft = linkages
            .iter()
            .find(|linkage| linkage.award_id.0 == "sch-100")
            .expect("draft award listed");
        assert!(draft.has_applied);
        assert_eq!(linkages.len(), sample_catalogue(today).len());
    }

    #[test]
    fn cli_parsers_reject_unknown_values() {
        assert_eq!(parse_category("Grant"), Ok(AwardCategory::Grant));
        assert!(parse_category("loan").is_err());
        assert_eq!(parse_sort_field("value"), Ok(SortField::Value));
        assert!(parse_sort_field("random").is_err());
    }
}
