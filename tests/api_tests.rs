// tests/api_tests.rs

use std::sync::Arc;

use serde_json::{Value, json};
use sorting_quiz::{
    config::Config, models::quiz::Catalog, routes, scoring::ScoringEngine, state::AppState,
};

/// Helper function to spawn the app on a random port for testing.
/// Returns the base URL (e.g., "http://127.0.0.1:12345").
async fn spawn_app() -> String {
    // 1. Create test configuration and state
    let config = Config {
        rust_log: "error".to_string(),
        static_dir: "tests/no_static_dir".into(),
        tiebreak_seed: Some(1234),
        ..Config::default()
    };

    let engine = ScoringEngine::new(Arc::new(Catalog::builtin()));
    let state = AppState::new(engine, config);

    // 2. Create the router with the app state
    let app = routes::create_router(state);

    // 3. Bind to port 0 to get a random available port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    // 4. Spawn the server in the background
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    address
}

async fn submit(address: &str, body: Value) -> reqwest::Response {
    reqwest::Client::new()
        .post(&format!("{}/api/submit_part", address))
        .json(&body)
        .send()
        .await
        .expect("Failed to execute request")
}

#[tokio::test]
async fn health_check_404() {
    // Arrange
    let address = spawn_app().await;
    let client = reqwest::Client::new();

    // Act
    let response = client
        .get(&format!("{}/random_path_that_does_not_exist", address))
        .send()
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn list_parts_exposes_labels_but_not_weights() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = reqwest::get(&format!("{}/api/parts", address))
        .await
        .expect("Failed to execute request");

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let parts = body.as_object().unwrap();
    assert_eq!(parts.len(), 8);

    let wand = &body["wand"];
    assert_eq!(wand["name"], "Wand finder");
    assert_eq!(wand["desc"], "Get a book-respecting style of wand (wood/core/theme).");
    assert_eq!(wand["questions"][0]["q"], "Which quality matters most in a wand?");
    assert_eq!(
        wand["questions"][0]["options"],
        json!(["Loyalty to its owner", "Power and longevity", "Versatility", "Subtlety and connection"])
    );

    let raw = body.to_string();
    assert!(!raw.contains("Yew|Phoenix"));
    assert!(!raw.contains("resolution"));
}

#[tokio::test]
async fn get_single_part_and_unknown_part() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let house = reqwest::get(&format!("{}/api/parts/house", address)).await.unwrap();
    let missing = reqwest::get(&format!("{}/api/parts/horcrux", address)).await.unwrap();

    // Assert
    assert_eq!(house.status().as_u16(), 200);
    let body: Value = house.json().await.unwrap();
    assert_eq!(body["questions"].as_array().unwrap().len(), 6);

    assert_eq!(missing.status().as_u16(), 404);
    let body: Value = missing.json().await.unwrap();
    assert_eq!(body["error"], "quiz part not found");
}

#[tokio::test]
async fn submit_wand_composes_suggestion() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(
        &address,
        json!({
            "part": "wand",
            "answers": ["Loyalty to its owner", "Strong, dark wood (yew/ebony)"]
        }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["part"], "wand");
    assert_eq!(body["result"], "Yew (wood) with Phoenix core");
    assert_eq!(
        body["scores"],
        json!({"wood": {"Holly": 1, "Yew": 4, "Ebony": 1}, "core": {"Phoenix": 3, "Dragon": 1}})
    );
}

#[tokio::test]
async fn submit_house_with_lenient_labels() {
    // Arrange
    let address = spawn_app().await;

    // Act: mixed casing and padding still match
    let response = submit(
        &address,
        json!({
            "part": "house",
            "answers": [
                "ambition and cunning",
                "  Snake ",
                "MAKING CONNECTIONS AND SECURING A FUTURE ADVANTAGE",
                "Green",
                null,
                ""
            ]
        }),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"], "Slytherin");
    assert_eq!(
        body["scores"],
        json!({"Slytherin": 7, "Gryffindor": 0, "Hufflepuff": 0, "Ravenclaw": 0})
    );
}

#[tokio::test]
async fn submit_house_without_answers_still_sorts() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(&address, json!({"part": "house", "answers": ["", "", "", "", "", ""]})).await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    let house = body["result"].as_str().unwrap();
    assert!(["Gryffindor", "Hufflepuff", "Ravenclaw", "Slytherin"].contains(&house));
}

#[tokio::test]
async fn submit_extras_returns_raw_tally() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(
        &address,
        json!({"part": "extras", "answers": ["Auror (combat & law)", "Protective & defensive"]}),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"], Value::Null);
    assert_eq!(body["scores"], json!({"Auror": 2, "Protego": 2}));
}

#[tokio::test]
async fn submit_unmatched_answers_score_nothing() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(
        &address,
        json!({"part": "bestie", "answers": ["Dobby", "Hagrid"]}),
    )
    .await;

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["result"], Value::Null);
    assert_eq!(body["scores"], json!({}));
}

#[tokio::test]
async fn submit_unknown_part_fails() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(&address, json!({"part": "horcrux", "answers": []})).await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "unknown part");
}

#[tokio::test]
async fn submit_wrong_length_fails() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(&address, json!({"part": "patronus", "answers": ["Quiet by a river"]})).await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "answers must be a list with length 3");
}

#[tokio::test]
async fn submit_non_list_answers_is_bad_request() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = submit(&address, json!({"part": "wand", "answers": "Versatility"})).await;

    // Assert
    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn openapi_document_is_served() {
    // Arrange
    let address = spawn_app().await;

    // Act
    let response = reqwest::get(&format!("{}/api/openapi.json", address)).await.unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert!(body["paths"]["/api/submit_part"]["post"].is_object());
}
