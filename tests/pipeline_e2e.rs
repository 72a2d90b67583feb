// tests/pipeline_e2e.rs
//! Whole run against fixture feeds and a mock model, print delivery.

use chrono::NaiveDate;
use research_digest::config::FeedSource;
use research_digest::ingest::providers::FixtureTransport;
use research_digest::rank::MockModel;
use research_digest::{run_to, run_with, Config, ConfigError, CredentialError, RunContext, Secrets};
use std::io::Write as _;

const ARXIV_XML: &str = include_str!("fixtures/arxiv_rss.xml");
const NBER_XML: &str = include_str!("fixtures/nber_rdf.xml");

const MODEL_REPLY: &str = "Strong week for labor papers.\n\n\
### 1. Minimum Wages and Firm Entry\n\n\
**Source:** arXiv econ.GN\n\n\
**Why this matters:** Border design close to yours.\n\n\
**Link:** [arXiv](https://arxiv.org/abs/2610.01234)\n\n---";

fn config() -> Config {
    Config {
        email: Some("reader@example.org".into()),
        feeds: Some(vec![
            FeedSource::new("arXiv econ.GN", "https://arxiv/rss"),
            FeedSource::new("NBER", "https://nber/rss"),
        ]),
        research_interests: Some("Minimum wages, firm dynamics.".into()),
        max_papers: Some(3),
        email_method: None,
    }
}

#[tokio::test]
async fn print_run_end_to_end() {
    let transport = FixtureTransport::new()
        .with_feed("https://arxiv/rss", ARXIV_XML)
        .with_feed("https://nber/rss", NBER_XML);
    let model = MockModel::new(MODEL_REPLY);
    let secrets = Secrets::default();
    let mut out = Vec::new();

    let html = run_with(
        &config(),
        RunContext {
            transport: &transport,
            model: &model,
            secrets: &secrets,
            today: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            out: &mut out,
        },
    )
    .await
    .expect("run ok");

    // prompt saw all five papers and the profile
    let prompts = model.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Minimum wages, firm dynamics."));
    assert!(prompts[0].contains("5. **School Funding and Student Outcomes** (Source: NBER)"));
    assert!(prompts[0].contains("TOP 3"));

    // rendered markup
    assert!(html.contains("<h3>1. Minimum Wages and Firm Entry</h3>"));
    assert!(html.contains("<strong>Why this matters:</strong>"));
    assert!(html.contains(r#"<a href="https://arxiv.org/abs/2610.01234">arXiv</a>"#));
    assert!(html.contains("October 17, 2026"));

    let console = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = console.lines().collect();
    assert_eq!(lines[0], "Configuration loaded for: reader@example.org");
    assert_eq!(lines[1], "Fetching from arXiv econ.GN...");
    assert_eq!(lines[2], "Fetching from NBER...");
    assert_eq!(lines[3], "Fetched 5 papers from 2 sources");
    assert_eq!(lines[4], "Analyzing papers with AI...");
    assert_eq!(lines[5], "Email generation successful!");
    assert_eq!(lines.last().copied(), Some("Digest generation complete!"));
}

#[tokio::test]
async fn missing_max_papers_fails_after_fetching() {
    let transport = FixtureTransport::new()
        .with_feed("https://arxiv/rss", ARXIV_XML)
        .with_feed("https://nber/rss", NBER_XML);
    let model = MockModel::new("unused");
    let secrets = Secrets::default();
    let mut out = Vec::new();
    let cfg = Config {
        max_papers: None,
        ..config()
    };

    let err = run_with(
        &cfg,
        RunContext {
            transport: &transport,
            model: &model,
            secrets: &secrets,
            today: NaiveDate::from_ymd_opt(2026, 10, 17).unwrap(),
            out: &mut out,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingKey("max_papers"))
    ));
    assert_eq!(transport.requested().len(), 2, "feeds were fetched first");
    assert!(model.prompts().is_empty(), "model never called");
}

#[tokio::test]
async fn missing_api_key_fails_after_config_and_feeds() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    write!(
        file,
        "email: reader@example.org\n\
         feeds:\n  - name: arXiv econ.GN\n    url: https://arxiv/rss\n  - name: NBER\n    url: https://nber/rss\n\
         research_interests: Minimum wages\n\
         max_papers: 3\n"
    )
    .unwrap();
    let transport = FixtureTransport::new()
        .with_feed("https://arxiv/rss", ARXIV_XML)
        .with_feed("https://nber/rss", NBER_XML);
    let mut out = Vec::new();

    let err = run_to(
        file.path(),
        "gemini-2.0-flash-exp",
        &transport,
        &Secrets::default(),
        &mut out,
    )
    .await
    .unwrap_err();

    assert_eq!(
        err.downcast_ref::<CredentialError>(),
        Some(&CredentialError::MissingApiKey)
    );
    assert_eq!(transport.requested(), vec!["https://arxiv/rss", "https://nber/rss"]);
    let console = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = console.lines().collect();
    assert_eq!(lines[0], "Starting Research Digest Generator...");
    assert_eq!(lines[1], "Configuration loaded for: reader@example.org");
    assert_eq!(lines[4], "Fetched 5 papers from 2 sources");
    assert!(!console.contains("Email generation successful!"));
}
