//! A canned GitHub API served by wiremock, shared by the integration tests.

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn next_link(server: &MockServer, route: &str, page: u32) -> String {
    format!("<{}{route}&page={page}>; rel=\"next\", <{}{route}&page=9>; rel=\"last\"", server.uri(), server.uri())
}

/// Start a server answering search, profile, and repository requests for three users.
///
/// - search: page 1 holds alice and bob with a `next` link, page 2 holds carol twice
/// - alice has three repositories split across two pages
/// - bob's profile fails with a 500
/// - carol has no repositories
pub async fn start_github() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"total_count": 3, "items": [{"login": "alice"}, {"login": "bob"}]}))
                .insert_header("link", next_link(&server, "/search/users?q=x", 2).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/users"))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"total_count": 3, "items": [{"login": "carol"}, {"login": "carol"}]})),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "alice",
            "name": "Alice Meier",
            "company": " @Acme ",
            "location": "Zurich",
            "email": "alice@example.com",
            "hireable": true,
            "bio": "rust and coffee",
            "public_repos": 3,
            "followers": 500,
            "following": 10,
            "created_at": "2012-03-04T05:06:07Z"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/bob"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/carol"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "login": "carol",
            "name": "Carol Meier",
            "company": "acme",
            "hireable": null,
            "bio": null,
            "public_repos": 0,
            "followers": 75,
            "following": 3,
            "created_at": "2022-01-01T00:00:00Z"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .and(query_param("page", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([
                    {
                        "name": "ferris",
                        "created_at": "2024-01-06T12:00:00Z",
                        "stargazers_count": 40,
                        "watchers_count": 40,
                        "language": "Rust",
                        "has_projects": true,
                        "has_wiki": true,
                        "license": {"key": "mit"}
                    },
                    {
                        "name": "scripts",
                        "created_at": "2024-01-08T12:00:00Z",
                        "stargazers_count": 2,
                        "watchers_count": 2,
                        "language": "Python",
                        "has_projects": false,
                        "has_wiki": true,
                        "license": null
                    }
                ]))
                .insert_header("link", next_link(&server, "/users/alice/repos?per_page=2", 2).as_str()),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/alice/repos"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "notes",
                "created_at": "2024-01-07T12:00:00Z",
                "stargazers_count": 6,
                "watchers_count": 6,
                "language": "Rust",
                "has_projects": false,
                "has_wiki": false,
                "license": {"key": "apache-2.0"}
            }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/carol/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    server
}
