use std::sync::Arc;

use clap::Args;

use mindcheck::config::NotifyConfig;
use mindcheck::error::AppError;
use mindcheck::screening::{
    classify, AssessmentError, RiskLevel, ScreeningService, ScreeningSubmission, SubjectInfo,
    SubmissionReport, TwoQAnswers,
};

use crate::infra::{InMemoryScreeningRepository, RecordingPushGateway};

#[derive(Args, Debug, Default)]
pub(crate) struct ClassifyArgs {
    /// Stress scale answer, 1-5 (omit when not administered)
    #[arg(long)]
    pub(crate) stress: Option<u8>,
    /// 2Q item 1, depressed mood (0/1)
    #[arg(long, default_value_t = 0)]
    pub(crate) q1: u8,
    /// 2Q item 2, anhedonia (0/1)
    #[arg(long, default_value_t = 0)]
    pub(crate) q2: u8,
    /// 2Q item 3, suicidal ideation (0/1); gates the 8Q module
    #[arg(long, default_value_t = 0)]
    pub(crate) q3: u8,
    /// 8Q answers as eight comma-separated 0/1 values, e.g. 0,0,0,0,0,0,1,0
    #[arg(long)]
    pub(crate) eight_q: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the full submission reports as JSON instead of summaries
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_classify(args: ClassifyArgs) -> Result<(), AppError> {
    let eight_q = match args.eight_q.as_deref() {
        Some(raw) => parse_eight_q(raw)?,
        None => Vec::new(),
    };

    let submission = ScreeningSubmission {
        subject: SubjectInfo::default(),
        stress_score: args.stress,
        two_q: TwoQAnswers {
            q1: args.q1,
            q2: args.q2,
            q3: args.q3,
        },
        eight_q,
    };

    let assessment = classify(&submission)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&assessment).expect("assessment serializes")
    );
    Ok(())
}

fn parse_eight_q(raw: &str) -> Result<Vec<u8>, AppError> {
    raw.split(',')
        .map(|item| {
            item.trim().parse::<u8>().map_err(|_| {
                AssessmentError::InvalidInput(format!("'{item}' is not a 0/1 answer")).into()
            })
        })
        .collect()
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let repository = Arc::new(InMemoryScreeningRepository::default());
    let gateway = Arc::new(RecordingPushGateway::default());
    let service = ScreeningService::new(
        repository,
        gateway.clone(),
        NotifyConfig {
            enabled: true,
            access_token: Some("demo-token".to_string()),
            group_id: Some("Cdemo-group".to_string()),
            alert_user_id: None,
            threshold: RiskLevel::Medium,
        },
    );

    let scenarios: [(&str, ScreeningSubmission); 3] = [
        (
            "routine visit, no findings",
            demo_submission("Demo A", Some(2), (0, 0, 0), &[]),
        ),
        (
            "elevated stress only",
            demo_submission("Demo B", Some(5), (0, 0, 0), &[]),
        ),
        (
            "ideation with an emergency item",
            demo_submission("Demo C", Some(4), (1, 0, 1), &[0, 0, 0, 0, 0, 0, 1, 0]),
        ),
    ];

    for (title, submission) in scenarios {
        let report = service.submit(submission)?;
        if args.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&report).expect("report serializes")
            );
        } else {
            render_report(title, &report);
        }
    }

    let pushes = gateway.pushes();
    println!("-- alerts pushed: {}", pushes.len());
    for (destination, text) in pushes {
        println!("   -> {destination}: {}", text.replace('\n', " | "));
    }

    Ok(())
}

fn demo_submission(
    name: &str,
    stress: Option<u8>,
    (q1, q2, q3): (u8, u8, u8),
    eight_q: &[u8],
) -> ScreeningSubmission {
    ScreeningSubmission {
        subject: SubjectInfo {
            citizen_id: None,
            fullname: Some(name.to_string()),
            facility_code: Some("demo".to_string()),
        },
        stress_score: stress,
        two_q: TwoQAnswers { q1, q2, q3 },
        eight_q: eight_q.to_vec(),
    }
}

fn render_report(title: &str, report: &SubmissionReport) {
    let assessment = &report.record.assessment;
    println!(
        "== {title}\n   level: {}{}  8Q total: {}\n   persisted: {}  notified: {}\n   guidance: {}",
        assessment.level.label(),
        if assessment.emergency {
            " (EMERGENCY)"
        } else {
            ""
        },
        assessment.eight_q_total,
        report.persisted,
        report.notified,
        assessment.recommendation,
    );
}
