use anyhow::Result;
use httpmock::prelude::*;
use pixisphere_client::domain::model::SortOrder;
use pixisphere_client::{ClientError, ClientSettings, HttpPartnerApi, PartnerApi, SearchRequest};
use tempfile::TempDir;

#[tokio::test]
async fn test_settings_from_file_drive_http_client() -> Result<()> {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/v1/partners")
            .header("user-agent", "pixisphere-test/1.0");
        then.status(200)
            .json_body(serde_json::json!({"success": true, "data": {"partners": []}}));
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("pixisphere.toml");
    let config_content = format!(
        r#"
[api]
base_url = "{}"
timeout_seconds = 5
user_agent = "pixisphere-test/1.0"

[search]
default_limit = 10
sort_by = "createdAt"
sort_order = "asc"
"#,
        server.url("/api/v1")
    );
    tokio::fs::write(&config_path, config_content).await?;

    let settings = ClientSettings::from_file(config_path.to_str().unwrap())?;
    assert_eq!(settings.default_limit, 10);
    assert_eq!(settings.sort_order, SortOrder::Asc);

    let api = HttpPartnerApi::from_config(&settings)?;
    let page = api.list_partners(&SearchRequest::default()).await?;
    mock.assert();
    assert!(page.partners.is_empty());
    Ok(())
}

#[test]
fn test_invalid_file_is_rejected() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("bad.toml");
    std::fs::write(
        &config_path,
        r#"
[api]
base_url = "https://api.example.com"
timeout_seconds = 0
"#,
    )?;

    let err = ClientSettings::from_file(config_path.to_str().unwrap()).unwrap_err();
    assert!(matches!(
        err,
        ClientError::InvalidConfigValueError { ref field, .. } if field == "api.timeout_seconds"
    ));
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ClientSettings::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ClientError::IoError(_)));
}
