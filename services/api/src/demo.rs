use crate::infra::{load_snapshot, navigation_controller, stage_arg};
use chrono::{Duration, Utc};
use clap::Args;
use hiring_portal::config::PortalConfig;
use hiring_portal::error::AppError;
use hiring_portal::workflows::hiring::{
    recompute, ApplicantDashboard, ApplicationSnapshot, ApplicationStatus, ComplianceStatusEntry,
    ComplianceUpdate, DashboardState, NavigationOutcome, Stage,
};
use serde::Serialize;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct DashboardEvaluateArgs {
    /// JSON file holding the fetched application + requisition payload
    #[arg(long)]
    pub(crate) snapshot: PathBuf,
    /// Stage the applicant was looking at before this fetch (1-5)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) previous_stage: Option<u8>,
    /// Also try switching to this stage (1-5) and report the outcome
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=5))]
    pub(crate) navigate: Option<u8>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Seconds a denial notice stays visible (defaults to the portal setting)
    #[arg(long)]
    pub(crate) notice_ttl_secs: Option<i64>,
    /// Print each dashboard view as JSON instead of a summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Serialize)]
struct EvaluationReport {
    dashboard: DashboardState,
    #[serde(skip_serializing_if = "Option::is_none")]
    navigation: Option<NavigationOutcome>,
}

pub(crate) fn run_dashboard_evaluate(args: DashboardEvaluateArgs) -> Result<(), AppError> {
    let DashboardEvaluateArgs {
        snapshot,
        previous_stage,
        navigate,
    } = args;

    let snapshot = load_snapshot(&snapshot)?;
    let previous = stage_arg(previous_stage, Stage::Application)?;
    let dashboard = recompute(&snapshot, previous);

    let navigation = match navigate {
        Some(number) => {
            let target = Stage::try_from(number)?;
            let controller = navigation_controller(&PortalConfig::default());
            Some(controller.request(
                &snapshot,
                &dashboard.completion,
                dashboard.active_stage,
                target,
                Utc::now(),
            ))
        }
        None => None,
    };

    let report = EvaluationReport {
        dashboard,
        navigation,
    };
    match serde_json::to_string_pretty(&report) {
        Ok(json) => println!("{json}"),
        Err(err) => println!("Dashboard payload unavailable: {err}"),
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        notice_ttl_secs,
        json,
    } = args;

    let portal = PortalConfig {
        notice_ttl_secs: notice_ttl_secs.unwrap_or(PortalConfig::default().notice_ttl_secs),
    };
    let now = Utc::now();

    println!("Applicant dashboard demo");
    for (title, snapshot, attempt) in demo_scenarios() {
        println!("\n{title}");
        let mut dashboard = ApplicantDashboard::load(snapshot, navigation_controller(&portal));
        render_dashboard(&mut dashboard, now, json);

        let outcome = dashboard.request_stage(attempt, now);
        render_navigation(&outcome);
    }

    println!("\nCompliance update for the hired applicant");
    let mut dashboard = ApplicantDashboard::load(hired_snapshot(), navigation_controller(&portal));
    let update = ComplianceUpdate {
        status: Some(ApplicationStatus::ComplianceCompleted),
        compliance_status: Some(vec![ComplianceStatusEntry::accepted("DBS Check")]),
    };
    dashboard.apply_compliance_update(&update);
    render_dashboard(&mut dashboard, now + Duration::seconds(1), json);

    Ok(())
}

fn render_dashboard(dashboard: &mut ApplicantDashboard, now: chrono::DateTime<Utc>, json: bool) {
    let view = dashboard.view(now);
    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(payload) => println!("{payload}"),
            Err(err) => println!("  Dashboard payload unavailable: {err}"),
        }
        return;
    }

    println!("- status {} | active stage {}", view.status, view.active_stage);
    for card in &view.stages {
        let marker = if card.active { ">" } else { " " };
        match card.access.reason() {
            None => println!("  {marker} {:<17} {:>3}%", card.label, card.percent),
            Some(reason) => println!(
                "  {marker} {:<17} {:>3}%  locked: {}",
                card.label,
                card.percent,
                reason.message()
            ),
        }
    }
}

fn render_navigation(outcome: &NavigationOutcome) {
    match outcome {
        NavigationOutcome::Transitioned { from, to } => {
            println!("  Switched from {from} to {to}");
        }
        NavigationOutcome::Rejected { target, notice, .. } => {
            println!(
                "  Refused switch to {target}: {} (notice until {})",
                notice.message,
                notice.expires_at.format("%H:%M:%S")
            );
        }
    }
}

fn hired_snapshot() -> ApplicationSnapshot {
    ApplicationSnapshot::builder(ApplicationStatus::Hired)
        .documents_required(["Resume", "ID"])
        .documents_uploaded(["Resume", "ID"])
        .compliance_checklist(["DBS Check"])
        .interview_scheduled(true)
        .build()
}

fn demo_scenarios() -> Vec<(&'static str, ApplicationSnapshot, Stage)> {
    vec![
        (
            "Documents pending (1 of 2 uploaded)",
            ApplicationSnapshot::builder(ApplicationStatus::DocumentsPending)
                .documents_required(["Resume", "ID"])
                .documents_uploaded(["Resume"])
                .build(),
            Stage::Interview,
        ),
        (
            "Hired, compliance outstanding",
            hired_snapshot(),
            Stage::ComplianceCheck,
        ),
        (
            "Rejected after interview",
            ApplicationSnapshot::builder(ApplicationStatus::Rejected)
                .documents_required(["Resume", "ID"])
                .documents_uploaded(["Resume", "ID"])
                .compliance_checklist(["DBS Check"])
                .build(),
            Stage::ComplianceCheck,
        ),
        (
            "Interviewed with 3 of 5 documents",
            ApplicationSnapshot::builder(ApplicationStatus::Interviewed)
                .documents_required(["Resume", "ID", "Certificate", "Reference", "Portfolio"])
                .documents_uploaded(["Resume", "ID", "Certificate"])
                .build(),
            Stage::Interview,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use hiring_portal::workflows::hiring::calculate_completion;

    #[test]
    fn demo_scenarios_match_reference_outcomes() {
        let expected = [
            ([100, 50, 0, 0, 0], Stage::DocumentUpload),
            ([100, 100, 100, 100, 0], Stage::Decision),
            ([100, 100, 100, 100, 0], Stage::Decision),
            ([100, 60, 100, 0, 0], Stage::DocumentUpload),
        ];

        for ((title, snapshot, _), (completion, active)) in demo_scenarios().into_iter().zip(expected)
        {
            assert_eq!(calculate_completion(&snapshot).as_array(), completion, "{title}");
            assert_eq!(recompute(&snapshot, Stage::Application).active_stage, active, "{title}");
        }
    }

    #[test]
    fn demo_runs_to_completion() {
        run_demo(DemoArgs::default()).expect("demo runs");
    }
}
