use chefai::config::ProviderConfig;
use chefai::providers::{GroqProvider, OpenRouterProvider};
use chefai::{Difficulty, GenerationError, GeneratorConfig, ProviderKind, RecipeGenerator};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use std::net::TcpListener;
use std::time::{Duration, Instant};

fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-test",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content }
        }]
    })
    .to_string()
}

fn recipes_json(names: &[&str]) -> String {
    let recipes: Vec<_> = names
        .iter()
        .map(|name| {
            json!({
                "name": name,
                "description": "Tasty.",
                "ingredients": ["1 cup rice", "2 chicken thighs"],
                "instructions": ["Cook rice", "Sear chicken", "Combine"],
                "prepTime": "10 minutes",
                "cookTime": "25 minutes",
                "difficulty": "Medium",
                "servings": 4
            })
        })
        .collect();
    serde_json::to_string(&recipes).unwrap()
}

fn open_router(server: &ServerGuard) -> Box<OpenRouterProvider> {
    Box::new(OpenRouterProvider::with_base_url(
        "sk-or-test".to_string(),
        server.url(),
        "meta-llama/llama-3.3-70b-instruct:free".to_string(),
    ))
}

fn groq(server: &ServerGuard) -> Box<GroqProvider> {
    Box::new(GroqProvider::with_base_url(
        "gsk_test".to_string(),
        server.url(),
        "llama-3.3-70b-versatile".to_string(),
    ))
}

/// A listener that completes TCP handshakes but never answers
fn silent_listener() -> (TcpListener, String) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    (listener, url)
}

#[tokio::test]
async fn test_unauthorized_primary_falls_back_to_secondary() {
    let mut primary = Server::new_async().await;
    let mut secondary = Server::new_async().await;

    let primary_mock = primary
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(r#"{"error":{"message":"No auth credentials found"}}"#)
        .expect(1)
        .create_async()
        .await;
    let secondary_mock = secondary
        .mock("POST", "/chat/completions")
        .match_body(Matcher::Regex("chicken, rice".to_string()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&recipes_json(&["Chicken Fried Rice", "Rice Bowl"])))
        .expect(1)
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(open_router(&primary))
        .with_provider(groq(&secondary))
        .build()
        .unwrap();

    let recipes = generator.generate(&[" chicken ", "", "rice"]).await.unwrap();

    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0].name, "Chicken Fried Rice");
    assert_eq!(recipes[0].difficulty, Some(Difficulty::Medium));
    assert_eq!(recipes[0].servings, Some(4));
    assert_eq!(recipes[1].instructions.len(), 3);
    primary_mock.assert_async().await;
    secondary_mock.assert_async().await;
}

#[tokio::test]
async fn test_fenced_answer_is_accepted() {
    let mut server = Server::new_async().await;
    let fenced = format!("```json\n{}\n```", recipes_json(&["Omelette"]));
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&fenced))
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(groq(&server))
        .build()
        .unwrap();

    let recipes = generator.generate(&["eggs"]).await.unwrap();
    assert_eq!(recipes.len(), 1);
    assert_eq!(recipes[0].name, "Omelette");
}

#[tokio::test]
async fn test_answer_is_truncated_to_five() {
    let mut server = Server::new_async().await;
    let names = ["r0", "r1", "r2", "r3", "r4", "r5", "r6"];
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&format!(
            "Sure! Here are some ideas: {} Enjoy!",
            recipes_json(&names)
        )))
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(open_router(&server))
        .build()
        .unwrap();

    let recipes = generator.generate(&["anything"]).await.unwrap();
    let returned: Vec<&str> = recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(returned, vec!["r0", "r1", "r2", "r3", "r4"]);
}

#[tokio::test]
async fn test_single_provider_prose_answer_fails() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("I'm sorry, I can only talk about cooking in general."))
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(groq(&server))
        .build()
        .unwrap();

    let err = generator.generate(&["eggs"]).await.unwrap_err();
    assert_eq!(err.status_hint(), 500);
    assert!(err.to_string().starts_with("Failed to generate recipes:"));
    match err {
        GenerationError::AllProvidersFailed { source } => {
            assert!(matches!(*source, GenerationError::RecipeParse { .. }));
        }
        other => panic!("expected AllProvidersFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_missing_choices_falls_back() {
    let mut primary = Server::new_async().await;
    let mut secondary = Server::new_async().await;
    let _primary = primary
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"model overloaded"}"#)
        .create_async()
        .await;
    let _secondary = secondary
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&recipes_json(&["Pancakes"])))
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(open_router(&primary))
        .with_provider(groq(&secondary))
        .build()
        .unwrap();

    let recipes = generator.generate(&["flour", "milk"]).await.unwrap();
    assert_eq!(recipes[0].name, "Pancakes");
}

#[tokio::test]
async fn test_no_providers_makes_no_calls() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let disabled = ProviderConfig {
        enabled: false,
        api_key: Some("unused".to_string()),
        base_url: Some(server.url()),
        ..Default::default()
    };
    let mut config = GeneratorConfig::default();
    config
        .providers
        .insert("openrouter".to_string(), disabled.clone());
    config.providers.insert("groq".to_string(), disabled);

    let generator = RecipeGenerator::builder().config(config).build().unwrap();
    assert!(generator.provider_names().is_empty());

    let err = generator.generate(&["eggs"]).await.unwrap_err();
    assert!(matches!(err, GenerationError::Configuration(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_blank_ingredients_make_no_calls() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .expect(0)
        .create_async()
        .await;

    let generator = RecipeGenerator::builder()
        .with_provider(groq(&server))
        .build()
        .unwrap();

    let err = generator.generate(&["   ", "\t"]).await.unwrap_err();
    assert!(matches!(err, GenerationError::InvalidInput(_)));
    assert_eq!(err.status_hint(), 400);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_hanging_primary_times_out_and_falls_back() {
    let (_listener, hanging_url) = silent_listener();
    let mut secondary = Server::new_async().await;
    let secondary_mock = secondary
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion(&recipes_json(&["r0", "r1", "r2", "r3", "r4"])))
        .expect(1)
        .create_async()
        .await;

    let hanging = GroqProvider::new(
        &ProviderConfig {
            api_key: Some("gsk_hanging".to_string()),
            base_url: Some(hanging_url),
            ..Default::default()
        },
        Duration::from_secs(1),
    )
    .unwrap();

    let generator = RecipeGenerator::builder()
        .with_provider(Box::new(hanging))
        .with_provider(open_router(&secondary))
        .build()
        .unwrap();

    let started = Instant::now();
    let recipes = generator.generate(&["eggs"]).await.unwrap();
    let elapsed = started.elapsed();

    assert_eq!(recipes.len(), 5);
    assert!(elapsed >= Duration::from_secs(1), "returned after {:?}", elapsed);
    assert!(elapsed < Duration::from_secs(5), "returned after {:?}", elapsed);
    secondary_mock.assert_async().await;
}

#[tokio::test]
async fn test_builder_keeps_sub_second_timeout() {
    let (_listener, hanging_url) = silent_listener();

    let generator = RecipeGenerator::builder()
        .provider(ProviderKind::Groq)
        .api_key("gsk_hanging")
        .base_url(hanging_url)
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let started = Instant::now();
    let err = generator.generate(&["eggs"]).await.unwrap_err();
    let elapsed = started.elapsed();

    assert!(elapsed < Duration::from_millis(900), "returned after {:?}", elapsed);
    match err {
        GenerationError::AllProvidersFailed { source } => match *source {
            GenerationError::Transport(e) => assert!(e.is_timeout()),
            other => panic!("expected Transport, got {:?}", other),
        },
        other => panic!("expected AllProvidersFailed, got {:?}", other),
    }
}
