use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use recruit_upload_client::config::Settings;
use recruit_upload_client::render::ResultsContainer;
use recruit_upload_client::{
    RecruitAPIClient, SelectedFile, SubmitEvent, UploadCoordinator, UploadForm, UploadKind,
    UploadOutcome, UploadPage, UploadSuccess,
};

const RESULTS_CONTAINER_ID: &str = "analysisResults";

fn cli() -> Command {
    Command::new("recruit-upload-client")
        .arg(
            Arg::new("server-addr")
                .long("server-addr")
                .required(false)
                .value_parser(value_parser!(url::Url)),
        )
        .arg_required_else_help(true)
        .subcommand_required(true)
        .subcommand(
            Command::new("upload-job-description")
                .arg(Arg::new("title").long("title").required(true))
                .arg(Arg::new("department").long("department").required(true))
                .arg(
                    Arg::new("html")
                        .long("html")
                        .action(ArgAction::SetTrue)
                        .help("print the results container as HTML"),
                )
                .arg(Arg::new("file_path").value_parser(value_parser!(PathBuf))),
        )
        .subcommand(
            Command::new("upload-resume")
                .arg(Arg::new("name").long("name").required(true))
                .arg(Arg::new("email").long("email").required(true))
                .arg(Arg::new("job-id").long("job-id").required(true))
                .arg(Arg::new("file_path").value_parser(value_parser!(PathBuf))),
        )
        .subcommand(Command::new("job-descriptions"))
        .subcommand(Command::new("candidate-scores"))
        .subcommand(Command::new("skills-match").arg(Arg::new("candidate_id").required(true)))
        .subcommand(Command::new("category-distribution"))
        .subcommand(
            Command::new("interview-request").arg(Arg::new("candidate_id").required(true)),
        )
}

fn main() -> anyhow::Result<ExitCode> {
    let settings = Settings::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &settings.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let matches = cli().get_matches();

    let server_addr = match matches.get_one::<url::Url>("server-addr") {
        Some(addr) => addr.to_string(),
        None => settings.server_addr.clone(),
    };
    let client = RecruitAPIClient::new_for_server(&server_addr, settings.http_timeout)?;

    match matches.subcommand() {
        Some(("upload-job-description", sub)) => upload_job_description(&client, sub),
        Some(("upload-resume", sub)) => upload_resume(&client, sub),
        Some(("job-descriptions", _)) => print_json(&client.job_descriptions()?),
        Some(("candidate-scores", _)) => print_json(&client.candidate_scores()?),
        Some(("skills-match", sub)) => print_json(&client.skills_match(arg(sub, "candidate_id"))?),
        Some(("category-distribution", _)) => print_json(&client.category_distribution()?),
        Some(("interview-request", sub)) => {
            print_json(&client.interview_request(arg(sub, "candidate_id"))?)
        }
        _ => unreachable!("subcommand is required"),
    }
}

fn arg<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn selected_file(matches: &ArgMatches) -> Option<SelectedFile> {
    matches
        .get_one::<PathBuf>("file_path")
        .map(|p| SelectedFile::Path(p.clone()))
}

fn upload_job_description(
    client: &RecruitAPIClient,
    matches: &ArgMatches,
) -> anyhow::Result<ExitCode> {
    let mut form = UploadForm::new()
        .field("title", arg(matches, "title"))
        .field("department", arg(matches, "department"));
    form.file = selected_file(matches);
    let mut page =
        UploadPage::with_form(form).results(ResultsContainer::new(RESULTS_CONTAINER_ID));

    let coordinator = UploadCoordinator::new(UploadKind::JobDescription, client);
    let outcome = coordinator.submit(&mut page, &mut SubmitEvent::new());
    print_notifications(&mut page);

    if let UploadOutcome::Succeeded(UploadSuccess::JobDescription(body)) = &outcome {
        if let Some(job_id) = &body.job_id {
            println!("job id: {job_id}");
        }
    }
    if let Some(results) = page.results.as_ref().filter(|r| !r.hidden) {
        if matches.get_flag("html") {
            println!("{}", results.to_html()?);
        } else {
            print!("{}", results.to_text());
        }
    }
    Ok(exit_code(&outcome))
}

fn upload_resume(client: &RecruitAPIClient, matches: &ArgMatches) -> anyhow::Result<ExitCode> {
    let mut form = UploadForm::new()
        .field("name", arg(matches, "name"))
        .field("email", arg(matches, "email"))
        .field("job_id", arg(matches, "job-id"));
    form.file = selected_file(matches);
    let mut page = UploadPage::with_form(form);

    let coordinator = UploadCoordinator::new(UploadKind::Resume, client);
    let outcome = coordinator.submit(&mut page, &mut SubmitEvent::new());
    print_notifications(&mut page);

    if let UploadOutcome::Succeeded(UploadSuccess::Resume(body)) = &outcome {
        if let Some(score) = body.match_score {
            println!("match score: {score:.1}");
        }
        if let Some(shortlisted) = body.shortlisted {
            println!("shortlisted: {shortlisted}");
        }
    }
    for target in &page.navigations {
        println!("redirect: {}", client.endpoint_url(target)?);
    }
    Ok(exit_code(&outcome))
}

fn print_notifications(page: &mut UploadPage) {
    page.notifications.expire(Instant::now());
    for n in page.notifications.visible() {
        println!("[{}] {}", n.level, n.message);
    }
}

fn exit_code(outcome: &UploadOutcome) -> ExitCode {
    if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<ExitCode> {
    serde_json::to_writer_pretty(io::stdout(), value)?;
    println!();
    Ok(ExitCode::SUCCESS)
}
