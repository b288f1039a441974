use std::fs;
use std::path::{Path, PathBuf};

use fxconv::error::{ConfigError, ConverterError, ProviderError};

mod test_utils {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub const CATALOG_JSON: &str = r#"{
        "USD": "United States Dollar",
        "EUR": "Euro",
        "JPY": "Japanese Yen",
        "GBP": "British Pound Sterling"
    }"#;

    /// Mock provider with a supported-codes endpoint; quote behavior is
    /// mounted per test.
    pub async fn create_provider_server(codes_body: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/listquotes"))
            .respond_with(ResponseTemplate::new(200).set_body_string(codes_body))
            .mount(&mock_server)
            .await;

        mock_server
    }
}

/// Writes the settings file and a sibling catalog into `dir`, pointing the
/// provider section at `server_uri`. Returns the settings path.
fn write_fixtures(dir: &Path, server_uri: &str, header_names: &[&str]) -> PathBuf {
    let headers_yaml = if header_names.is_empty() {
        "headers: []".to_string()
    } else {
        let items: Vec<String> = header_names
            .iter()
            .map(|name| format!("      - {name}"))
            .collect();
        format!("headers:\n{}", items.join("\n"))
    };

    let config_content = format!(
        r#"
provider: "test-exchange"
providers:
  test-exchange:
    quote_url: "{server_uri}/exchange"
    codes_url: "{server_uri}/listquotes"
    {headers_yaml}
"#
    );

    let config_path = dir.join("config.yaml");
    fs::write(&config_path, config_content).expect("Failed to write settings file");
    fs::write(dir.join("currencies.json"), test_utils::CATALOG_JSON)
        .expect("Failed to write catalog file");

    config_path
}

#[test_log::test(tokio::test)]
async fn test_full_convert_flow() {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, ResponseTemplate};

    let server = test_utils::create_provider_server(r#"["USD","EUR","JPY"]"#).await;
    Mock::given(method("GET"))
        .and(path("/exchange"))
        .and(query_param("from", "USD"))
        .and(query_param("to", "EUR"))
        .and(query_param("q", "1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1.5"))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &[]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            from: "USD".to_string(),
            to: "EUR".to_string(),
            amount: "10".to_string(),
        },
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    assert!(result.is_ok(), "run_command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_same_currency_skips_quote_endpoint() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let server = test_utils::create_provider_server(r#"["USD","EUR"]"#).await;
    Mock::given(method("GET"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(200).set_body_string("1.0"))
        .expect(0)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &[]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            from: "USD".to_string(),
            to: "USD".to_string(),
            amount: "10".to_string(),
        },
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    assert!(result.is_ok(), "run_command failed with: {:?}", result.err());
    server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_codes_listing_flow() {
    let server = test_utils::create_provider_server(r#"["JPY","USD","EUR"]"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &[]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Codes,
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    assert!(result.is_ok(), "run_command failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_quote_error_status_is_surfaced() {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, ResponseTemplate};

    let server = test_utils::create_provider_server(r#"["USD","EUR","JPY"]"#).await;
    Mock::given(method("GET"))
        .and(path("/exchange"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &[]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Convert {
            from: "USD".to_string(),
            to: "EUR".to_string(),
            amount: "1".to_string(),
        },
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    let err = result.expect_err("Expected a provider error");
    assert!(matches!(
        err.downcast_ref::<ConverterError>(),
        Some(ConverterError::Provider(ProviderError::Response(500)))
    ));
}

#[test_log::test(tokio::test)]
async fn test_missing_credential_fails_before_any_request() {
    let server = test_utils::create_provider_server(r#"["USD","EUR"]"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &["FXCONV_TEST_UNSET_KEY"]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Codes,
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    let err = result.expect_err("Expected a configuration error");
    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::MissingCredential(name)) if name == "FXCONV_TEST_UNSET_KEY"
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_credential_header_is_sent() {
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    // SAFETY: set before the provider is constructed; no other test reads
    // this variable.
    unsafe { std::env::set_var("FXCONV_TEST_API_KEY", "sekrit") };

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/listquotes"))
        .and(header("FXCONV_TEST_API_KEY", "sekrit"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"["USD","EUR"]"#))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &["FXCONV_TEST_API_KEY"]);

    let result = fxconv::run_command(
        fxconv::AppCommand::Codes,
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    assert!(result.is_ok(), "run_command failed with: {:?}", result.err());
    server.verify().await;
}

#[test_log::test(tokio::test)]
async fn test_missing_catalog_is_a_catalog_error() {
    let server = test_utils::create_provider_server(r#"["USD","EUR"]"#).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config_path = write_fixtures(dir.path(), &server.uri(), &[]);
    fs::remove_file(dir.path().join("currencies.json")).unwrap();

    let result = fxconv::run_command(
        fxconv::AppCommand::Codes,
        Some(config_path.to_str().unwrap()),
        None,
    )
    .await;

    let err = result.expect_err("Expected a catalog error");
    assert!(err.downcast_ref::<fxconv::error::CatalogError>().is_some());
}
