//! Agent route tests against the JSON file store and the in-memory mock.


use std::sync::Arc;

use agentdesk_core::{AgentRecord, AgentStoreFile};
use agentdesk_storage::AgentStore;
use agentdesk_test_utils::fixtures::{sample_agent, seeded_file_store, temp_file_store, write_raw};
use agentdesk_test_utils::mocks::MockPromptBackend;
use agentdesk_test_utils::InMemoryAgentStore;
use axum::http::{Method, StatusCode};
use serde_json::json;
use test_support::{json_request, send, test_app};

fn backend() -> Arc<MockPromptBackend> {
    Arc::new(MockPromptBackend::new())
}

#[tokio::test]
async fn test_created_agent_appears_in_listing() {
    let fixture = temp_file_store();
    let app = test_app(fixture.store.clone(), backend());

    let body = json!({
        "id": "1718000000000",
        "name": "Support",
        "description": "Answers tickets",
        "prompt": "Be brief.",
        "thoughts": [],
        "createdAt": "2024-06-10T06:13:20.000Z"
    });
    let (status, echoed) = send(&app, json_request(Method::POST, "/api/agents", Some(body.clone()))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed, body);

    let (status, listing) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["agents"].as_array().map(Vec::len), Some(1));
    assert_eq!(listing["agents"][0], body);
}

#[tokio::test]
async fn test_post_stores_partial_record_as_given() {
    let store = Arc::new(InMemoryAgentStore::new());
    let app = test_app(store.clone(), backend());

    let (status, echoed) = send(
        &app,
        json_request(Method::POST, "/api/agents", Some(json!({ "name": "No id" }))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed, json!({ "name": "No id" }));
    assert_eq!(store.len(), 1);
    assert_eq!(store.list().await.unwrap()[0].id(), None);
}

#[tokio::test]
async fn test_duplicate_ids_are_both_kept() {
    let store = Arc::new(InMemoryAgentStore::new());
    let app = test_app(store.clone(), backend());

    for name in ["first", "second"] {
        let body = json!({ "id": "dup", "name": name });
        let (status, _) = send(&app, json_request(Method::POST, "/api/agents", Some(body))).await;
        assert_eq!(status, StatusCode::OK);
    }

    let agents = store.list().await.unwrap();
    assert_eq!(agents.len(), 2);
    assert_eq!(agents[0].name(), Some("first"));
    assert_eq!(agents[1].name(), Some("second"));
}

#[tokio::test]
async fn test_update_unknown_agent_is_404_and_store_unchanged() {
    let fixture = seeded_file_store(&[sample_agent("1")]);
    let before = fixture.raw();
    let app = test_app(fixture.store.clone(), backend());

    let (status, body) = send(
        &app,
        json_request(Method::PUT, "/api/agents/missing", Some(json!({ "id": "missing", "name": "x" }))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agent not found");
    assert_eq!(fixture.raw(), before);
}

#[tokio::test]
async fn test_update_replaces_first_match_with_body() {
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![
        sample_agent("1"),
        sample_agent("2"),
    ]));
    let app = test_app(store.clone(), backend());

    let replacement = json!({ "id": "1", "name": "Renamed", "thoughts": ["only one"] });
    let (status, echoed) = send(
        &app,
        json_request(Method::PUT, "/api/agents/1", Some(replacement.clone())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed, replacement);

    let agents = store.list().await.unwrap();
    assert_eq!(agents[0].as_value(), &replacement);
    assert!(agents[0].field("description").is_none());
    assert_eq!(agents[0].thought_count(), 1);
    assert_eq!(agents[1], sample_agent("2"));
}

#[tokio::test]
async fn test_delete_unknown_agent_is_404() {
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![sample_agent("1")]));
    let app = test_app(store.clone(), backend());

    let (status, body) = send(&app, json_request(Method::DELETE, "/api/agents/nope", None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agent not found");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_delete_removes_exactly_one_record() {
    let agents = vec![sample_agent("1"), sample_agent("2"), sample_agent("3")];
    let fixture = seeded_file_store(&agents);
    let app = test_app(fixture.store.clone(), backend());

    let (status, body) = send(&app, json_request(Method::DELETE, "/api/agents/2", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let persisted: AgentStoreFile = serde_json::from_str(&fixture.raw().unwrap()).unwrap();
    assert_eq!(persisted.agents, vec![agents[0].clone(), agents[2].clone()]);
}

#[tokio::test]
async fn test_missing_store_file_lists_empty() {
    let fixture = temp_file_store();
    let app = test_app(fixture.store.clone(), backend());

    let (status, body) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "agents": [] }));
    assert!(fixture.raw().is_none());
}

#[tokio::test]
async fn test_empty_or_garbage_store_file_lists_empty() {
    for content in ["", "   \n", "{ this is not json", "[1, 2, 3]"] {
        let fixture = temp_file_store();
        write_raw(&fixture, content);
        let app = test_app(fixture.store.clone(), backend());

        let (status, body) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
        assert_eq!(status, StatusCode::OK, "content {:?}", content);
        assert_eq!(body, json!({ "agents": [] }), "content {:?}", content);
    }
}

#[tokio::test]
async fn test_malformed_body_is_400() {
    let store = Arc::new(InMemoryAgentStore::new());
    let app = test_app(store.clone(), backend());

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/agents")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{ nope"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_add_thought_appends_record() {
    let fixture = seeded_file_store(&[sample_agent("1")]);
    let app = test_app(fixture.store.clone(), backend());

    let (status, agent) = send(
        &app,
        json_request(
            Method::POST,
            "/api/agents/1/thoughts",
            Some(json!({ "content": "Check order history first" })),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let thoughts = agent["thoughts"].as_array().unwrap();
    assert_eq!(thoughts.len(), 3);
    // Existing thoughts keep their shapes.
    assert_eq!(thoughts[0], json!("Prefers short answers"));
    assert_eq!(thoughts[1]["id"], "thought-1");
    // The new one is a structured record owned by the agent.
    assert_eq!(thoughts[2]["content"], "Check order history first");
    assert_eq!(thoughts[2]["agentId"], "1");
    assert!(!thoughts[2]["id"].as_str().unwrap().is_empty());
    assert!(thoughts[2]["createdAt"].as_str().unwrap().ends_with('Z'));

    let stored: AgentRecord = fixture.store.get("1").await.unwrap().unwrap();
    assert_eq!(stored.thought_count(), 3);
}

#[tokio::test]
async fn test_add_empty_thought_is_400() {
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![sample_agent("1")]));
    let app = test_app(store.clone(), backend());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/agents/1/thoughts", Some(json!({ "content": "  " }))),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(store.list().await.unwrap()[0].thought_count(), 2);
}

#[tokio::test]
async fn test_add_thought_to_unknown_agent_is_404() {
    let store = Arc::new(InMemoryAgentStore::new());
    let app = test_app(store, backend());

    let (status, body) = send(
        &app,
        json_request(Method::POST, "/api/agents/ghost/thoughts", Some(json!({ "content": "hi" }))),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Agent not found");
}

#[tokio::test]
async fn test_health_ready_reports_agent_count() {
    let store = Arc::new(InMemoryAgentStore::with_agents(vec![sample_agent("1")]));
    let app = test_app(store, backend());

    let (status, body) = send(&app, json_request(Method::GET, "/health/ready", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["details"]["agent_count"], 1);

    let (status, body) = send(&app, json_request(Method::GET, "/health/ping", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("pong"));
}

#[tokio::test]
async fn test_post_echoes_body_with_unknown_and_odd_typed_fields() {
    let fixture = temp_file_store();
    let app = test_app(fixture.store.clone(), backend());

    let bodies = [
        json!({ "id": "1", "name": "n", "model": "gpt-4o" }),
        json!({ "id": 1718000000000u64, "name": "n" }),
        json!({ "id": "3", "name": 7, "description": null, "thoughts": "none yet", "tags": ["a"] }),
    ];
    for body in &bodies {
        let (status, echoed) = send(&app, json_request(Method::POST, "/api/agents", Some(body.clone()))).await;
        assert_eq!(status, StatusCode::OK, "body {}", body);
        assert_eq!(&echoed, body);
    }

    let persisted: serde_json::Value = serde_json::from_str(&fixture.raw().unwrap()).unwrap();
    assert_eq!(persisted["agents"], json!(bodies));
}

#[tokio::test]
async fn test_put_echoes_body_with_extra_fields() {
    let fixture = seeded_file_store(&[sample_agent("1"), sample_agent("2")]);
    let app = test_app(fixture.store.clone(), backend());

    let replacement = json!({
        "id": "2",
        "name": "Renamed",
        "temperature": 0.5,
        "createdAt": 1718000000000u64,
        "meta": { "owner": "ops" }
    });
    let (status, echoed) = send(
        &app,
        json_request(Method::PUT, "/api/agents/2", Some(replacement.clone())),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(echoed, replacement);

    let (_, listing) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
    assert_eq!(listing["agents"][1], replacement);
}

#[tokio::test]
async fn test_off_schema_records_survive_create() {
    let good = sample_agent("1");
    let odd = json!({ "id": "2", "description": null, "name": ["not", "a", "string"] });
    let numeric = json!({ "id": 1718000000000u64, "name": "Numeric" });
    let fixture = temp_file_store();
    write_raw(
        &fixture,
        &json!({ "agents": [good.as_value(), odd, numeric] }).to_string(),
    );
    let app = test_app(fixture.store.clone(), backend());

    let (status, listing) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        listing["agents"],
        json!([good.as_value(), odd, numeric])
    );

    let created = json!({ "id": "4", "name": "New" });
    let (status, _) = send(&app, json_request(Method::POST, "/api/agents", Some(created.clone()))).await;
    assert_eq!(status, StatusCode::OK);

    let persisted: serde_json::Value = serde_json::from_str(&fixture.raw().unwrap()).unwrap();
    assert_eq!(
        persisted["agents"],
        json!([good.as_value(), odd, numeric, created])
    );

    let (status, _) = send(&app, json_request(Method::DELETE, "/api/agents/1718000000000", None)).await;
    assert_eq!(status, StatusCode::OK);
    let persisted: serde_json::Value = serde_json::from_str(&fixture.raw().unwrap()).unwrap();
    assert_eq!(persisted["agents"], json!([good.as_value(), odd, created]));
}

#[tokio::test]
async fn test_health_ready_fails_when_store_unreadable() {
    let fixture = temp_file_store();
    std::fs::create_dir_all(fixture.path()).unwrap();
    let app = test_app(fixture.store.clone(), backend());

    let (status, body) = send(&app, json_request(Method::GET, "/health/ready", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "unhealthy");
    assert!(body["details"]["store"]["error"].is_string());

    // Listing still degrades to empty.
    let (status, body) = send(&app, json_request(Method::GET, "/api/agents", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "agents": [] }));
}

#[tokio::test]
async fn test_health_ready_fails_when_store_unparsable() {
    let fixture = temp_file_store();
    write_raw(&fixture, "{ this is not json");
    let app = test_app(fixture.store.clone(), backend());

    let (status, body) = send(&app, json_request(Method::GET, "/health/ready", None)).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["details"]["agent_count"], 0);
}

#[tokio::test]
async fn test_openapi_document_served() {
    let app = test_app(Arc::new(InMemoryAgentStore::new()), backend());

    let (status, body) = send(&app, json_request(Method::GET, "/openapi.json", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/agents"].is_object());
}
