use anyhow::Result;
use geoloc_util::config::toml_config::{DIRECT_PATH, ZIP_PATH};
use geoloc_util::utils::validation::Validate;
use geoloc_util::{BatchResolver, Diagnostic, GeoError, GeocoderConfig, OpenWeatherGeocoder};
use httpmock::prelude::*;
use serde_json::json;
use tempfile::TempDir;

fn resolver_for(server: &MockServer) -> BatchResolver<OpenWeatherGeocoder> {
    let config = GeocoderConfig::new("batch-key").with_base_url(server.base_url());
    BatchResolver::new(OpenWeatherGeocoder::new(config).unwrap())
}

#[tokio::test]
async fn test_city_pairs_resolve_in_input_order() -> Result<()> {
    let server = MockServer::start();
    let la_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DIRECT_PATH)
            .query_param("q", "Los Angeles,CA,US")
            .query_param("limit", "1");
        then.status(200).json_body(json!([
            {"name": "Los Angeles", "lat": 34.0536909, "lon": -118.242766, "country": "US", "state": "California"}
        ]));
    });
    let ny_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DIRECT_PATH)
            .query_param("q", "New York,NY,US")
            .query_param("limit", "1");
        then.status(200).json_body(json!([
            {"name": "New York", "lat": 40.7127281, "lon": -74.0060152, "country": "US", "state": "New York"}
        ]));
    });

    let resolver = resolver_for(&server);
    let report = resolver.run(&["Los Angeles, CA", "New York, NY"]).await?;

    la_mock.assert();
    ny_mock.assert();
    assert!(report.is_complete());
    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Los Angeles", "New York"]);
    Ok(())
}

#[tokio::test]
async fn test_zip_codes_resolve_with_default_country() -> Result<()> {
    let server = MockServer::start();
    let seattle_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "98115,US");
        then.status(200).json_body(json!(
            {"zip": "98115", "name": "Seattle", "lat": 47.6849, "lon": -122.2968, "country": "US"}
        ));
    });
    let cobb_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "30301,US");
        then.status(200).json_body(json!(
            {"zip": "30301", "name": "Cobb County", "lat": 33.8444, "lon": -84.4741, "country": "US"}
        ));
    });

    let resolver = resolver_for(&server);
    let records = resolver.run(&["98115", "30301"]).await?.into_records();

    seattle_mock.assert();
    cobb_mock.assert();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].name, "Seattle");
    assert_eq!(records[1].name, "Cobb County");
    assert_eq!(records[1].country_code, "US");
    Ok(())
}

#[tokio::test]
async fn test_unresolved_locations_are_diagnosed() -> Result<()> {
    let server = MockServer::start();
    let city_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DIRECT_PATH)
            .query_param("q", "InvalidCity,CA,US");
        then.status(200).json_body(json!([]));
    });
    let zip_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "99999,US");
        then.status(404)
            .json_body(json!({"cod": "404", "message": "not found"}));
    });

    let resolver = resolver_for(&server);
    let report = resolver.run(&["InvalidCity, CA", "99999"]).await?;

    city_mock.assert();
    zip_mock.assert();
    assert!(report.records.is_empty());
    let lines: Vec<String> = report.diagnostics.iter().map(|d| d.to_string()).collect();
    assert_eq!(
        lines,
        vec![
            "No location data found for InvalidCity, CA.",
            "No location data found for zip code 99999.",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_malformed_descriptors_make_no_requests() -> Result<()> {
    let server = MockServer::start();
    let any_mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200).json_body(json!([]));
    });

    let resolver = resolver_for(&server);
    let report = resolver
        .run(&["Chicago", "Portland, OR, US", "1234", ""])
        .await?;

    any_mock.assert_hits(0);
    assert!(report.records.is_empty());
    assert_eq!(report.diagnostics.len(), 4);
    assert_eq!(
        report.diagnostics[1],
        Diagnostic::InvalidFormat {
            descriptor: "Portland, OR, US".to_string()
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_mixed_batch_keeps_going_after_failures() -> Result<()> {
    let server = MockServer::start();
    let broken_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "30301,US");
        then.status(500).body("Internal Server Error");
    });
    let seattle_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "98115,US");
        then.status(200).json_body(json!(
            {"zip": "98115", "name": "Seattle", "lat": 47.6849, "lon": -122.2968, "country": "US"}
        ));
    });
    let chicago_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DIRECT_PATH)
            .query_param("q", "Chicago,IL,US");
        then.status(200).json_body(json!([
            {"name": "Chicago", "lat": 41.8755616, "lon": -87.6244212, "country": "US", "state": "Illinois"}
        ]));
    });

    let resolver = resolver_for(&server);
    let report = resolver
        .run(&["30301", "Springfield", "98115", "Chicago , IL"])
        .await?;

    broken_mock.assert();
    seattle_mock.assert();
    chicago_mock.assert();

    let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Seattle", "Chicago"]);
    assert_eq!(report.diagnostics.len(), 2);
    assert!(matches!(
        &report.diagnostics[0],
        Diagnostic::LookupFailed { descriptor, .. } if descriptor == "30301"
    ));
    assert!(matches!(
        &report.diagnostics[1],
        Diagnostic::InvalidFormat { descriptor } if descriptor == "Springfield"
    ));
    Ok(())
}

#[tokio::test]
async fn test_rejected_key_stops_the_batch() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH);
        then.status(401)
            .json_body(json!({"cod": 401, "message": "Invalid API key."}));
    });

    let resolver = resolver_for(&server);
    let result = resolver.run(&["98115", "30301"]).await;

    api_mock.assert_hits(1);
    assert!(matches!(result, Err(GeoError::Unauthorized { .. })));
}

#[tokio::test]
async fn test_server_errors_are_not_reported_as_missing() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(ZIP_PATH).query_param("zip", "98115,US");
        then.status(500)
            .json_body(json!({"cod": "500", "message": "Internal error"}));
    });

    let resolver = resolver_for(&server);
    let report = resolver.run(&["98115"]).await?;

    api_mock.assert();
    assert!(report.records.is_empty());
    assert_eq!(
        report.diagnostics,
        vec![Diagnostic::LookupFailed {
            descriptor: "98115".to_string(),
            message: "Geocoding service error from /geo/1.0/zip: HTTP 500".to_string(),
        }]
    );
    Ok(())
}

#[tokio::test]
async fn test_exhausted_quota_stops_the_batch() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET).path(DIRECT_PATH);
        then.status(429)
            .json_body(json!({"cod": 429, "message": "Your account is temporary blocked"}));
    });

    let resolver = resolver_for(&server);
    let result = resolver.run(&["Los Angeles, CA", "New York, NY"]).await;

    api_mock.assert_hits(1);
    assert!(matches!(result, Err(GeoError::RateLimited { status: 429 })));
}

#[tokio::test]
async fn test_empty_city_or_state_is_looked_up() -> Result<()> {
    let server = MockServer::start();
    let austin_mock = server.mock(|when, then| {
        when.method(GET)
            .path(DIRECT_PATH)
            .query_param("q", "Austin,,US");
        then.status(200).json_body(json!([]));
    });
    let state_only_mock = server.mock(|when, then| {
        when.method(GET).path(DIRECT_PATH).query_param("q", ",CA,US");
        then.status(200).json_body(json!([]));
    });

    let resolver = resolver_for(&server);
    let report = resolver.run(&["Austin, ", " , CA"]).await?;

    austin_mock.assert();
    state_only_mock.assert();
    assert!(report.records.is_empty());
    assert_eq!(
        report.diagnostics,
        vec![
            Diagnostic::LocationNotFound {
                descriptor: "Austin, ".to_string()
            },
            Diagnostic::LocationNotFound {
                descriptor: " , CA".to_string()
            },
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_batch_from_config_file() -> Result<()> {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(GET)
            .path(ZIP_PATH)
            .query_param("zip", "10115,DE")
            .query_param("appid", "file-key");
        then.status(200).json_body(json!(
            {"zip": "10115", "name": "Berlin", "lat": 52.5323, "lon": 13.3846, "country": "DE"}
        ));
    });

    let temp_dir = TempDir::new()?;
    let config_path = temp_dir.path().join("geoloc.toml");
    std::fs::write(
        &config_path,
        format!(
            "[geocoder]\nbase_url = \"{}\"\napi_key = \"file-key\"\ndefault_country = \"DE\"\ntimeout_seconds = 5\n",
            server.base_url()
        ),
    )?;

    let config = GeocoderConfig::from_file(&config_path)?;
    config.validate()?;
    let resolver = BatchResolver::new(OpenWeatherGeocoder::new(config)?);

    let records = resolver.run(&["10115"]).await?.into_records();

    api_mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].to_string(), "Berlin, 52.5323, 13.3846, DE");
    Ok(())
}
