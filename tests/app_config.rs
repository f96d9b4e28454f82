// tests/app_config.rs
use lunch_digest::calendar::Locale;
use lunch_digest::config::app::{DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH};
use lunch_digest::{AppConfig, ItemStyle};
use std::time::Duration;
use std::{env, fs};

const OVERRIDES: [&str; 5] = [
    "SLACK_HOOK",
    "SLACK_CHANNEL",
    "SECRET_KEY",
    "DEBUG",
    "FETCH_TIMEOUT_SECS",
];

fn clear_env() {
    env::remove_var(ENV_CONFIG_PATH);
    for k in OVERRIDES {
        env::remove_var(k);
    }
}

#[serial_test::serial]
#[test]
fn load_uses_env_path_then_default_file_then_builtins() {
    // Isolate CWD so the repo's own config/ is not read.
    let old = env::current_dir().unwrap();
    let tmp = tempfile::tempdir().unwrap();
    env::set_current_dir(tmp.path()).unwrap();
    clear_env();

    // 1) Nothing → built-in defaults
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.locale, Locale::English);
    assert_eq!(cfg.item_style, ItemStyle::Numbered);
    assert_eq!(cfg.fetch_timeout(), Some(Duration::from_secs(20)));
    assert!(cfg.slack_hook.is_none());

    // 2) Default file under ./config/
    fs::create_dir_all(tmp.path().join("config")).unwrap();
    fs::write(
        tmp.path().join(DEFAULT_CONFIG_PATH),
        r#"
locale = "sk"
disabled_sources = ["Avalon", " TOTO ", "Avalon"]
"#,
    )
    .unwrap();
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.locale, Locale::Slovak);
    assert_eq!(cfg.disabled_sources, vec!["Avalon", "TOTO"]);

    // 3) Env path wins over the default file
    let p_env = tmp.path().join("other.toml");
    fs::write(&p_env, "item_style = \"bare\"\nfetch_timeout_secs = 0\n").unwrap();
    env::set_var(ENV_CONFIG_PATH, &p_env);
    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.item_style, ItemStyle::Bare);
    assert_eq!(cfg.locale, Locale::English);
    assert_eq!(cfg.fetch_timeout(), None);

    // 4) Env path to nowhere is an error
    env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml"));
    assert!(AppConfig::load().is_err());

    clear_env();
    env::set_current_dir(old).unwrap();
}

#[serial_test::serial]
#[test]
fn env_overrides_file_values() {
    let tmp = tempfile::tempdir().unwrap();
    clear_env();
    let p = tmp.path().join("lunch.toml");
    fs::write(
        &p,
        r#"
slack_hook = "https://hooks.test/file"
secret_key = "from-file"
fetch_timeout_secs = 5
"#,
    )
    .unwrap();
    env::set_var(ENV_CONFIG_PATH, &p);
    env::set_var("SECRET_KEY", "from-env");
    env::set_var("SLACK_CHANNEL", "#obed");
    env::set_var("FETCH_TIMEOUT_SECS", "not-a-number");
    env::set_var("DEBUG", "1");

    let cfg = AppConfig::load().unwrap();
    assert_eq!(cfg.slack_hook.as_deref(), Some("https://hooks.test/file"));
    assert_eq!(cfg.secret_key.as_deref(), Some("from-env"));
    assert_eq!(cfg.slack_channel.as_deref(), Some("#obed"));
    // Unparsable override keeps the file value.
    assert_eq!(cfg.fetch_timeout_secs, 5);
    assert!(cfg.debug);

    assert!(cfg.should_send_to_slack(Some("from-env")));
    assert!(!cfg.should_send_to_slack(Some("from-file")));
    assert!(!cfg.should_send_to_slack(None));

    clear_env();
}

#[test]
fn malformed_file_is_an_error() {
    let tmp = tempfile::tempdir().unwrap();
    let p = tmp.path().join("bad.toml");
    fs::write(&p, "locale = \"klingon\"\n").unwrap();
    let err = AppConfig::load_from(&p).unwrap_err();
    assert!(format!("{err:#}").contains("bad.toml"));
}
