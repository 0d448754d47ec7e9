use super::*;
use serde_json::json;

const BASE: &str = "https://api.pagerangers.com";

fn keyword_endpoint() -> EndpointDefinition {
    EndpointDefinition::get("keyword", "/keyword/serp")
        .with_query("keyword", "{keyword}")
        .with_query("projectHash", "{project_hash}")
        .with_query("apiKey", "{api_token}")
}

fn credentials() -> Bindings {
    Bindings::new().with("project_hash", "abc123").with("api_token", "xyz")
}

#[test]
fn test_keyword_query_exact() {
    let bindings = credentials().with("keyword", "seo tools");
    let request = resolve(&keyword_endpoint(), &bindings, BASE).unwrap();

    let expected: IndexMap<String, String> = [
        ("keyword", "seo tools"),
        ("projectHash", "abc123"),
        ("apiKey", "xyz"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_owned(), v.to_owned()))
    .collect();
    assert_eq!(request.query, expected);
    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://api.pagerangers.com/keyword/serp");
    assert_eq!(request.endpoint, "keyword");
}

#[test]
fn test_missing_binding_is_resolution_error() {
    let err = resolve(&keyword_endpoint(), &credentials(), BASE).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::UnboundPlaceholder {
            endpoint: "keyword".to_owned(),
            location: "query parameter 'keyword'".to_owned(),
            key: "keyword".to_owned(),
        }
    );
}

#[test]
fn test_optional_absent_parameter_omitted() {
    let endpoint = EndpointDefinition::get("rankings", "/rankings/current")
        .with_query("projectHash", "{project_hash}")
        .with_query("limit", "{limit}")
        .with_query("offset", "{offset}");
    let bindings = credentials().with("limit", "20").with_optional("offset", None::<String>);

    let request = resolve(&endpoint, &bindings, BASE).unwrap();
    assert_eq!(request.query.get("limit").map(String::as_str), Some("20"));
    assert!(!request.query.contains_key("offset"));
    assert_eq!(request.query.len(), 2);
}

#[test]
fn test_optional_present_parameter_sent() {
    let endpoint = EndpointDefinition::get("rankings", "/rankings").with_query("offset", "{offset}");
    let bindings = Bindings::new().with_optional("offset", Some("40"));
    let request = resolve(&endpoint, &bindings, BASE).unwrap();
    assert_eq!(request.query.get("offset").map(String::as_str), Some("40"));
}

#[test]
fn test_path_placeholders_substituted() {
    let endpoint = EndpointDefinition::get("project", "/projects/{project_hash}/kpis");
    let request = resolve(&endpoint, &credentials(), BASE).unwrap();
    assert_eq!(request.url, "https://api.pagerangers.com/projects/abc123/kpis");
    assert!(!request.url.contains('{') && !request.url.contains('}'));
}

#[test]
fn test_path_missing_binding() {
    let endpoint = EndpointDefinition::get("project", "/projects/{project_id}");
    let err = resolve(&endpoint, &credentials(), BASE).unwrap_err();
    assert!(matches!(
        err,
        ResolutionError::UnboundPlaceholder { ref location, ref key, .. } if location == "path" && key == "project_id"
    ));
}

#[test]
fn test_optional_absent_in_path_is_error() {
    let endpoint = EndpointDefinition::get("page", "/pages/{page}");
    let bindings = Bindings::new().with_optional("page", None::<String>);
    let err = resolve(&endpoint, &bindings, BASE).unwrap_err();
    assert_eq!(
        err,
        ResolutionError::OptionalInPath { endpoint: "page".to_owned(), key: "page".to_owned() }
    );
}

#[test]
fn test_url_single_slash() {
    let endpoint = EndpointDefinition::get("kpis", "//kpis/main");
    for base in ["https://api.example.com", "https://api.example.com/", "https://api.example.com//"] {
        let request = resolve(&endpoint, &Bindings::new(), base).unwrap();
        assert_eq!(request.url, "https://api.example.com/kpis/main");
    }
}

#[test]
fn test_join_url_empty_path() {
    assert_eq!(join_url("https://api.example.com/", ""), "https://api.example.com/");
}

#[test]
fn test_headers_resolved_and_omitted() {
    let endpoint = EndpointDefinition::get("kpis", "/kpis")
        .with_header("X-Project", "{project_hash}")
        .with_header("X-Trace", "{trace_id}");
    let bindings = credentials().with_optional("trace_id", None::<String>);
    let request = resolve(&endpoint, &bindings, BASE).unwrap();
    assert_eq!(request.headers.get("X-Project").map(String::as_str), Some("abc123"));
    assert!(!request.headers.contains_key("X-Trace"));
}

#[test]
fn test_body_rendered_recursively() {
    let endpoint = EndpointDefinition::get("report", "/report").with_body(json!({
        "keyword": "{keyword}",
        "offset": "{offset}",
        "filters": ["{keyword}", 3, {"hash": "{project_hash}"}],
        "static": true
    }));
    let bindings = credentials().with("keyword", "seo").with_optional("offset", None::<String>);
    let request = resolve(&endpoint, &bindings, BASE).unwrap();
    assert_eq!(
        request.body,
        Some(json!({
            "keyword": "seo",
            "filters": ["seo", 3, {"hash": "abc123"}],
            "static": true
        }))
    );
}

#[test]
fn test_body_missing_binding() {
    let endpoint = EndpointDefinition::get("report", "/report").with_body(json!({"k": "{keyword}"}));
    let err = resolve(&endpoint, &credentials(), BASE).unwrap_err();
    assert!(matches!(err, ResolutionError::UnboundPlaceholder { ref location, .. } if location == "body"));
}

#[test]
fn test_resolve_is_idempotent() {
    let bindings = credentials().with("keyword", "seo tools");
    let first = resolve(&keyword_endpoint(), &bindings, BASE).unwrap();
    let second = resolve(&keyword_endpoint(), &bindings, BASE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_redacted_url_hides_token() {
    let bindings = credentials().with("keyword", "seo");
    let request = resolve(&keyword_endpoint(), &bindings, BASE).unwrap();
    assert_eq!(
        request.redacted_url(Some("xyz")),
        "https://api.pagerangers.com/keyword/serp?keyword=seo&projectHash=abc123&apiKey=***"
    );
    assert!(request.redacted_url(None).ends_with("apiKey=xyz"));
}

#[test]
fn test_redacted_url_hides_token_in_path() {
    let endpoint = EndpointDefinition::get("kpis", "/projects/{api_token}/kpis").with_query("apiKey", "{api_token}");
    let request = resolve(&endpoint, &credentials(), BASE).unwrap();
    let logged = request.redacted_url(Some("xyz"));
    assert_eq!(logged, "https://api.pagerangers.com/projects/***/kpis?apiKey=***");
    assert!(!logged.contains("xyz"));
}
