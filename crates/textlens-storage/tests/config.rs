use std::collections::HashMap;

use textlens_storage::config::{
    CONNECTION_STRING_VAR, CONTAINER_NAME_VAR, ConnectionString, CosmosConfig, DATABASE_NAME_VAR,
};
use textlens_storage::error::StorageError;

const CONNECTION: &str =
    "AccountEndpoint=https://textlens.documents.azure.com:443/;AccountKey=c2VjcmV0LWtleQ==;";

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn missing_connection_string_is_a_configuration_error() {
    let err = CosmosConfig::from_lookup(lookup(&[])).unwrap_err();
    assert!(matches!(
        err,
        StorageError::MissingSetting { name } if name == CONNECTION_STRING_VAR
    ));
    assert!(err.is_configuration());
}

#[test]
fn empty_connection_string_counts_as_missing() {
    let err = CosmosConfig::from_lookup(lookup(&[(CONNECTION_STRING_VAR, "  ")])).unwrap_err();
    assert!(matches!(err, StorageError::MissingSetting { .. }));
}

#[test]
fn database_and_container_default() {
    let config = CosmosConfig::from_lookup(lookup(&[(CONNECTION_STRING_VAR, CONNECTION)])).unwrap();
    assert_eq!(config.database, "TextAnalyzerDB");
    assert_eq!(config.container, "AnalysisResults");
    assert_eq!(config.container_link(), "dbs/TextAnalyzerDB/colls/AnalysisResults");
    assert_eq!(config.connection.endpoint, "https://textlens.documents.azure.com:443");
    assert_eq!(config.connection.key, b"secret-key");
}

#[test]
fn database_and_container_overrides() {
    let config = CosmosConfig::from_lookup(lookup(&[
        (CONNECTION_STRING_VAR, CONNECTION),
        (DATABASE_NAME_VAR, "Prod"),
        (CONTAINER_NAME_VAR, "Runs"),
    ]))
    .unwrap();
    assert_eq!(config.container_link(), "dbs/Prod/colls/Runs");
}

#[test]
fn connection_string_keys_are_case_insensitive() {
    let parsed: ConnectionString = "accountkey=c2VjcmV0LWtleQ==; ACCOUNTENDPOINT=http://localhost:8081/"
        .parse()
        .unwrap();
    assert_eq!(parsed.endpoint, "http://localhost:8081");
    assert_eq!(parsed.key, b"secret-key");
}

#[test]
fn connection_string_rejects_missing_parts() {
    for raw in [
        "AccountKey=c2VjcmV0LWtleQ==",
        "AccountEndpoint=https://x.documents.azure.com/",
        "AccountEndpoint=ftp://x;AccountKey=c2VjcmV0LWtleQ==",
        "AccountEndpoint=https://x;AccountKey=not base64!",
        "garbage",
    ] {
        let err = raw.parse::<ConnectionString>().unwrap_err();
        assert!(
            matches!(err, StorageError::InvalidConnectionString(_)),
            "{raw} -> {err}"
        );
    }
}

#[test]
fn debug_output_redacts_the_key() {
    let parsed: ConnectionString = CONNECTION.parse().unwrap();
    let debug = format!("{parsed:?}");
    assert!(debug.contains("textlens.documents.azure.com"));
    assert!(!debug.contains("secret"));
    assert!(debug.contains("<redacted>"));
}
