use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use mdb_lookup::config::{GatewayConfig, GatewaySettings};

fn resolve(settings: GatewaySettings) -> GatewayConfig {
    GatewayConfig::new(
        8888,
        PathBuf::from("/var/www"),
        "localhost".to_string(),
        9999,
        settings,
    )
}

#[test]
fn test_config_defaults() {
    let cfg = resolve(GatewaySettings::default());

    assert_eq!(cfg.listen_port, 8888);
    assert_eq!(cfg.backend_host, "localhost");
    assert_eq!(cfg.backend_port, 9999);
    assert_eq!(cfg.advertised_host, "localhost");
    assert_eq!(cfg.client_timeout, Some(Duration::from_secs(30)));
}

#[test]
fn test_config_settings_override_defaults() {
    let settings = GatewaySettings {
        advertised_host: Some("www.example.org".to_string()),
        client_timeout_secs: Some(5),
    };
    let cfg = resolve(settings);

    assert_eq!(cfg.advertised_host, "www.example.org");
    assert_eq!(cfg.client_timeout, Some(Duration::from_secs(5)));
}

#[test]
fn test_config_zero_timeout_disables_deadline() {
    let settings = GatewaySettings {
        advertised_host: None,
        client_timeout_secs: Some(0),
    };
    let cfg = resolve(settings);

    assert_eq!(cfg.client_timeout, None);
}

#[test]
fn test_config_settings_from_yaml() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "advertised_host: gateway.example.org").unwrap();
    writeln!(file, "client_timeout_secs: 10").unwrap();

    let settings = GatewaySettings::from_yaml(file.path()).unwrap();

    assert_eq!(
        settings.advertised_host.as_deref(),
        Some("gateway.example.org")
    );
    assert_eq!(settings.client_timeout_secs, Some(10));
}

#[test]
fn test_config_partial_yaml_leaves_other_fields_unset() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "advertised_host: gateway.example.org").unwrap();

    let settings = GatewaySettings::from_yaml(file.path()).unwrap();

    assert!(settings.advertised_host.is_some());
    assert_eq!(settings.client_timeout_secs, None);
}

#[test]
fn test_config_unknown_yaml_field_is_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "advertized_host: typo.example.org").unwrap();

    assert!(GatewaySettings::from_yaml(file.path()).is_err());
}

#[test]
fn test_config_missing_file_is_an_error() {
    let err = GatewaySettings::from_yaml(std::path::Path::new("/no/such/settings.yaml"))
        .unwrap_err();
    assert!(err.to_string().contains("/no/such/settings.yaml"));
}
