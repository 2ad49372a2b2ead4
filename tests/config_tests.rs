// Integration tests for configuration loading

use ai_interview::Config;
use anyhow::Result;
use std::time::Duration;
use tempfile::TempDir;

#[test]
fn test_defaults_without_file() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("missing");

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.name, "ai-interview");
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.service.http.port, 3030);
    assert_eq!(cfg.interview.question_limit, 5);
    assert_eq!(cfg.interview.text_questions, 2);
    assert_eq!(cfg.interview.countdown_secs, 120);

    let session = cfg.interview.session_config();
    assert_eq!(session.countdown_ceiling_secs, 120);
    assert_eq!(session.reveal_cadence, Duration::from_millis(30));
    assert_eq!(session.reveal_delay, Duration::from_millis(500));
    assert_eq!(session.tick_period, Duration::from_secs(1));

    Ok(())
}

#[test]
fn test_file_overrides_defaults() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("interview.toml");
    std::fs::write(
        &path,
        r#"
[service.http]
port = 8080

[interview]
countdown_secs = 90
reveal_cadence_ms = 10
"#,
    )?;

    let cfg = Config::load(path.to_str().unwrap())?;

    assert_eq!(cfg.service.http.port, 8080);
    assert_eq!(cfg.service.http.bind, "127.0.0.1");
    assert_eq!(cfg.interview.countdown_secs, 90);
    assert_eq!(cfg.interview.question_limit, 5);

    let session = cfg.interview.session_config();
    assert_eq!(session.countdown_ceiling_secs, 90);
    assert_eq!(session.reveal_cadence, Duration::from_millis(10));
    assert_eq!(session.reveal_delay, Duration::from_millis(500));

    Ok(())
}

#[test]
fn test_invalid_value_is_an_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("interview.toml");
    std::fs::write(&path, "[service.http]\nport = \"not a port\"\n")?;

    assert!(Config::load(path.to_str().unwrap()).is_err());

    Ok(())
}

#[test]
fn test_shipped_config_loads() -> Result<()> {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/ai-interview.toml");

    let cfg = Config::load(path)?;

    assert_eq!(cfg.interview.question_limit, 5);
    assert_eq!(cfg.interview.text_questions, 2);

    Ok(())
}
