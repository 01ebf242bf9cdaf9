#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use auth::AuthenticatorSettings;
use auth::ProofHasher;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::Json;
use axum::Router;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use gitea_authn::gitea::GiteaMembershipResolver;
use gitea_authn::inbound::http::router::create_router;
use gitea_authn::stores::InMemoryTokenStore;
use gitea_authn::stores::TokenStoreBackend;
use serde_json::json;

/// How the fake Gitea API answers `GET /api/v1/user/orgs`.
#[derive(Clone)]
pub enum GiteaBehaviour {
    /// username -> (password, organizations)
    Users(HashMap<String, (String, Vec<String>)>),
    Status(StatusCode),
    Body(String),
    Delay(Duration),
}

impl GiteaBehaviour {
    pub fn users(users: &[(&str, &str, &[&str])]) -> Self {
        GiteaBehaviour::Users(
            users
                .iter()
                .map(|(username, password, orgs)| {
                    (
                        username.to_string(),
                        (
                            password.to_string(),
                            orgs.iter().map(|o| o.to_string()).collect(),
                        ),
                    )
                })
                .collect(),
        )
    }
}

#[derive(Clone)]
struct FakeGiteaState {
    behaviour: GiteaBehaviour,
    calls: Arc<AtomicUsize>,
}

/// Fake Gitea API bound to a random local port
pub struct FakeGitea {
    pub api_uri: String,
    calls: Arc<AtomicUsize>,
}

impl FakeGitea {
    pub async fn spawn(behaviour: GiteaBehaviour) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();

        let calls = Arc::new(AtomicUsize::new(0));
        let state = FakeGiteaState {
            behaviour,
            calls: Arc::clone(&calls),
        };

        let router = Router::new()
            .route("/api/v1/user/orgs", get(user_orgs))
            .with_state(state);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            api_uri: format!("http://127.0.0.1:{}/api", port),
            calls,
        }
    }

    /// Number of requests served so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn user_orgs(
    State(state): State<FakeGiteaState>,
    authorization: Option<TypedHeader<Authorization<Basic>>>,
) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);

    match state.behaviour {
        GiteaBehaviour::Users(users) => {
            let Some(TypedHeader(Authorization(basic))) = authorization else {
                return StatusCode::UNAUTHORIZED.into_response();
            };

            match users.get(basic.username()) {
                Some((password, orgs)) if password == basic.password() => {
                    let body: Vec<_> = orgs
                        .iter()
                        .enumerate()
                        .map(|(id, name)| {
                            json!({
                                "id": id + 1,
                                "name": name,
                                "full_name": format!("{} organization", name),
                                "username": name,
                            })
                        })
                        .collect();
                    Json(body).into_response()
                }
                _ => (
                    StatusCode::UNAUTHORIZED,
                    Json(json!({ "message": "user does not exist" })),
                )
                    .into_response(),
            }
        }
        GiteaBehaviour::Status(status) => status.into_response(),
        GiteaBehaviour::Body(body) => (StatusCode::OK, body).into_response(),
        GiteaBehaviour::Delay(delay) => {
            tokio::time::sleep(delay).await;
            Json(json!([])).into_response()
        }
    }
}

pub fn fast_hasher() -> ProofHasher {
    ProofHasher::with_params(8, 1, 1).expect("Failed to build hasher")
}

/// Test application that spawns a real server in front of a fake Gitea API
pub struct TestApp {
    pub address: String,
    pub gitea: FakeGitea,
    pub token_store: InMemoryTokenStore,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn(behaviour: GiteaBehaviour) -> Self {
        Self::spawn_with_revalidation(behaviour, Duration::from_secs(300)).await
    }

    /// Spawn the application with a custom revalidation window
    pub async fn spawn_with_revalidation(
        behaviour: GiteaBehaviour,
        revalidate_after: Duration,
    ) -> Self {
        let gitea = FakeGitea::spawn(behaviour).await;

        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let token_store = InMemoryTokenStore::new();
        let resolver = GiteaMembershipResolver::with_client(
            reqwest::Client::builder()
                .timeout(Duration::from_secs(2))
                .build()
                .expect("Failed to create reqwest client"),
            &gitea.api_uri,
        );

        let authenticator = Arc::new(Authenticator::new(
            Arc::new(TokenStoreBackend::Memory(token_store.clone())),
            Arc::new(resolver),
            fast_hasher(),
            AuthenticatorSettings {
                revalidate_after,
                store_timeout: Duration::from_secs(1),
            },
        ));

        let router = create_router(authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            gitea,
            token_store,
            api_client: reqwest::Client::new(),
        }
    }

    /// Helper to POST credentials to the authentication endpoint
    pub async fn authenticate(&self, username: &str, password: &str) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/auth/authenticate", self.address))
            .json(&json!({
                "username": username,
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }
}
