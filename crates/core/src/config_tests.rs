use super::*;
use crate::error::PathError;

const MINIMAL: &str = r#"{
    "endpoints": {
        "keyword": {
            "method": "get",
            "path": "/keyword/serp",
            "query": {"keyword": "{keyword}", "apiKey": "{api_token}"},
            "response": {"main_keyword": "keyword", "top_urls": "serp"}
        }
    }
}"#;

#[test]
fn test_load_minimal_document() {
    let table = EndpointTable::from_json_str(MINIMAL).unwrap();
    assert_eq!(table.len(), 1);
    assert!(table.base_url.is_none());
    assert!(table.constants.is_empty());

    let keyword = table.get("keyword").unwrap();
    assert_eq!(keyword.name, "keyword");
    assert_eq!(keyword.method, "GET");
    assert_eq!(keyword.path.as_str(), "/keyword/serp");
    let params: Vec<&str> = keyword.query.keys().map(String::as_str).collect();
    assert_eq!(params, vec!["keyword", "apiKey"]);
    assert_eq!(keyword.response.len(), 2);
    assert!(keyword.headers.is_empty());
    assert!(keyword.body.is_none());
}

#[test]
fn test_duplicate_endpoint_names_rejected() {
    let document = r#"{
        "endpoints": {
            "keyword": {"method": "GET", "path": "/a", "query": {}},
            "keyword": {"method": "GET", "path": "/b", "query": {}}
        }
    }"#;
    let err = EndpointTable::from_json_str(document).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateEndpoint(ref name) if name == "keyword"));
}

#[test]
fn test_missing_required_fields() {
    for (field, entry) in [
        ("method", r#"{"path": "/a", "query": {}}"#),
        ("path", r#"{"method": "GET", "query": {}}"#),
        ("query", r#"{"method": "GET", "path": "/a"}"#),
    ] {
        let document = format!(r#"{{"endpoints": {{"broken": {entry}}}}}"#);
        let err = EndpointTable::from_json_str(&document).unwrap_err();
        match err {
            ConfigError::MissingField { endpoint, field: missing } => {
                assert_eq!(endpoint, "broken");
                assert_eq!(missing, field);
            },
            other => panic!("unexpected error: {other}"),
        }
    }
}

#[test]
fn test_response_is_optional() {
    let document = r#"{"endpoints": {"kpis": {"method": "GET", "path": "/kpis", "query": {}}}}"#;
    let table = EndpointTable::from_json_str(document).unwrap();
    assert!(table.get("kpis").unwrap().response.is_empty());
}

#[test]
fn test_malformed_json() {
    let err = EndpointTable::from_json_str("{\"endpoints\": {").unwrap_err();
    assert!(matches!(err, ConfigError::Malformed(_)));
}

#[test]
fn test_missing_endpoints_key_is_malformed() {
    let err = EndpointTable::from_json_str(r#"{"base_url": "https://x"}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Malformed(_)));
}

#[test]
fn test_invalid_method() {
    let document = r#"{"endpoints": {"x": {"method": "GE T", "path": "/", "query": {}}}}"#;
    let err = EndpointTable::from_json_str(document).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidMethod { ref method, .. } if method == "GE T"));
}

#[test]
fn test_invalid_response_path() {
    let document = r#"{
        "endpoints": {
            "keyword": {
                "method": "GET", "path": "/", "query": {},
                "response": {"first_url": "serp[first].url"}
            }
        }
    }"#;
    let err = EndpointTable::from_json_str(document).unwrap_err();
    match err {
        ConfigError::InvalidPath { endpoint, field, source } => {
            assert_eq!(endpoint, "keyword");
            assert_eq!(field, "first_url");
            assert!(matches!(source, PathError::InvalidIndex { .. }));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_endpoint_order_preserved() {
    let document = r#"{
        "endpoints": {
            "prospects": {"method": "GET", "path": "/p", "query": {}},
            "keyword": {"method": "GET", "path": "/k", "query": {}},
            "rankings": {"method": "GET", "path": "/r", "query": {}}
        }
    }"#;
    let table = EndpointTable::from_json_str(document).unwrap();
    let names: Vec<&str> = table.names().collect();
    assert_eq!(names, vec!["prospects", "keyword", "rankings"]);
}

#[test]
fn test_headers_body_and_constants() {
    let document = r#"{
        "base_url": "https://api.example.com/",
        "constants": {"device": "desktop"},
        "endpoints": {
            "report": {
                "method": "POST",
                "path": "/report",
                "query": {},
                "headers": {"X-Project": "{project_hash}"},
                "body": {"keyword": "{keyword}", "pages": [1, 2]}
            }
        }
    }"#;
    let table = EndpointTable::from_json_str(document).unwrap();
    assert_eq!(table.base_url.as_deref(), Some("https://api.example.com/"));
    assert_eq!(table.constants.get("device").map(String::as_str), Some("desktop"));

    let report = table.get("report").unwrap();
    assert_eq!(report.method, "POST");
    assert_eq!(report.headers.get("X-Project").map(Template::as_str), Some("{project_hash}"));
    assert_eq!(report.body, Some(serde_json::json!({"keyword": "{keyword}", "pages": [1, 2]})));
}

#[test]
fn test_builtin_table_has_commands() {
    let table = EndpointTable::builtin().unwrap();
    for name in ["keyword", "rankings", "main_kpis", "prospects"] {
        assert!(table.get(name).is_some(), "missing builtin endpoint {name}");
    }
}

#[test]
fn test_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api.json");
    std::fs::write(&path, MINIMAL).unwrap();

    let table = EndpointTable::from_path(&path).unwrap();
    assert!(table.get("keyword").is_some());

    let err = EndpointTable::from_path(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
}

#[test]
fn test_from_definitions_rejects_duplicates() {
    let err = EndpointTable::from_definitions([
        EndpointDefinition::get("keyword", "/a"),
        EndpointDefinition::get("keyword", "/b"),
    ])
    .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateEndpoint(_)));
}
