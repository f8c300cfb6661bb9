use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, ResponseTemplate};

pub fn bulk_import_response() -> serde_json::Value {
    json!({
        "id": 1337,
        "status": "created",
        "source_type": "gitlab",
        "created_at": "2024-03-01T10:00:00.000Z",
        "updated_at": "2024-03-01T10:00:00.000Z",
    })
}

pub fn expected_request_body() -> serde_json::Value {
    json!({
        "configuration": {
            "url": "https://gitlab.remote.com",
            "access_token": "lolstoken",
        },
        "entities": [
            {
                "source_type": "project_entity",
                "source_full_path": "foo/bar/go-lang",
                "destination_slug": "migrated-go-lang",
                "destination_namespace": "migrated/foo/bar",
            }
        ],
    })
}

pub fn create_migration_mock(prefix: Option<&str>, response: ResponseTemplate, times: u64) -> Mock {
    Mock::given(method("POST"))
        .and(path(format!(
            "{prefix}/api/v4/bulk_imports",
            prefix = prefix.unwrap_or("")
        )))
        .respond_with(response)
        .expect(times)
}

pub fn create_migration_mock_for(
    auth_header: (&str, &str),
    body: serde_json::Value,
    response: ResponseTemplate,
) -> Mock {
    Mock::given(method("POST"))
        .and(path("/api/v4/bulk_imports"))
        .and(header(auth_header.0, auth_header.1))
        .and(body_json(body))
        .respond_with(response)
        .expect(1)
}
