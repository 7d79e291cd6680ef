use dupmerge::cli::Cli;
use dupmerge::config::{Config, ENV_PREFIX};
use dupmerge::duplicates::ConsolidateConfig;
use dupmerge::actions::DeleteMode;
use dupmerge::scanner::HashAlgorithm;
use clap::Parser;
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_load_defaults() {
    // Use figment directly without Env to avoid interference from other tests
    let figment = Figment::from(Serialized::defaults(Config::default()));
    let config: Config = figment.extract().unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_config_load_from_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        r#"
algorithm = "sha256"
max_line_length = 4096
sort_entries = false
use_trash = true
prefix_separator = "-"
"#,
    )
    .unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.max_line_length, 4096);
    assert!(!config.sort_entries);
    assert!(config.use_trash);
    assert!(!config.clean_temp_files);
    assert_eq!(config.prefix_separator, '-');
}

#[test]
fn test_config_partial_toml_keeps_defaults() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "clean_temp_files = true\n").unwrap();

    let figment =
        Figment::from(Serialized::defaults(Config::default())).merge(Toml::file(&config_path));
    let config: Config = figment.extract().unwrap();

    assert!(config.clean_temp_files);
    assert_eq!(config.algorithm, HashAlgorithm::Blake3);
    assert_eq!(config.max_line_length, 1024 * 1024);
}

#[test]
fn test_config_load_from_env() {
    std::env::set_var("DUPMERGE_TEST_ENV_ALGORITHM", "sha256");
    std::env::set_var("DUPMERGE_TEST_ENV_MAX_LINE_LENGTH", "512");

    // A test-only prefix keeps this from leaking into other tests
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Env::prefixed("DUPMERGE_TEST_ENV_"));
    let config: Config = figment.extract().unwrap();

    assert_eq!(config.algorithm, HashAlgorithm::Sha256);
    assert_eq!(config.max_line_length, 512);

    std::env::remove_var("DUPMERGE_TEST_ENV_ALGORITHM");
    std::env::remove_var("DUPMERGE_TEST_ENV_MAX_LINE_LENGTH");
}

#[test]
fn test_env_overrides_toml() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "sort_entries = false\nuse_trash = true\n").unwrap();
    std::env::set_var("DUPMERGE_TEST_LAYER_USE_TRASH", "false");

    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .merge(Env::prefixed("DUPMERGE_TEST_LAYER_"));
    let config: Config = figment.extract().unwrap();

    assert!(!config.sort_entries);
    assert!(!config.use_trash);

    std::env::remove_var("DUPMERGE_TEST_LAYER_USE_TRASH");
}

#[test]
fn test_cli_overrides_file() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "algorithm = \"sha256\"\nprefix_separator = \"-\"\n").unwrap();

    let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&config_path))
        .extract()
        .unwrap();
    let cli = Cli::parse_from(["dupmerge", "--algorithm", "blake3", "/tmp/d"]);
    config.apply_cli(&cli);

    assert_eq!(config.algorithm, HashAlgorithm::Blake3);
    assert_eq!(config.prefix_separator, '-');
}

#[test]
fn test_malformed_toml_is_an_error() {
    let temp_dir = tempdir().unwrap();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "algorithm = \"md5\"\n").unwrap();

    let result = Config::load(Some(&config_path));

    assert!(result.is_err());
}

#[test]
fn test_missing_config_file_is_fine() {
    let temp_dir = tempdir().unwrap();
    let figment = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(temp_dir.path().join("absent.toml")));

    let config: Config = figment.extract().unwrap();

    assert_eq!(config, Config::default());
}

#[test]
fn test_config_round_trips_through_toml() {
    let original = Config {
        algorithm: HashAlgorithm::Sha256,
        clean_temp_files: true,
        ..Config::default()
    };
    let text = original.to_toml().unwrap();

    let parsed: Config = Figment::from(Toml::string(&text)).extract().unwrap();

    assert_eq!(parsed, original);
}

#[test]
fn test_consolidate_config_from_loaded_config() {
    let config = Config {
        use_trash: true,
        sort_entries: false,
        ..Config::default()
    };

    let consolidate = ConsolidateConfig::from(&config);

    assert_eq!(consolidate.delete_mode, DeleteMode::Trash);
    assert!(!consolidate.sort_entries);
}

#[test]
fn test_env_prefix() {
    assert_eq!(ENV_PREFIX, "DUPMERGE_");
}
