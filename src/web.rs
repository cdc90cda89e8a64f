use axum::{
    debug_handler,
    extract::{Path, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::{future::Future, io, sync::Arc};
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::directory::DirectorySource;
use crate::types::{Directory, ErrorBody, MessageBody, NewDrink};

#[derive(OpenApi)]
#[openapi(
    paths(root_handler, list_drinks_handler, drink_steps_handler, add_drink_handler),
    components(schemas(NewDrink, ErrorBody, MessageBody))
)]
struct ApiDoc;

/// In-memory drink store backing the API.
#[derive(Default)]
pub struct ApiState {
    drinks: RwLock<Directory>,
}

impl ApiState {
    pub fn new(drinks: Directory) -> Self {
        Self {
            drinks: RwLock::new(drinks),
        }
    }

    /// Store seeded with the bundled directory.
    pub async fn seeded() -> io::Result<Self> {
        let drinks = DirectorySource::Bundled
            .fetch()
            .await
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::new(drinks))
    }
}

fn error_response(status: StatusCode, detail: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            detail: Some(detail.to_string()),
        }),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "API banner", body = MessageBody)
    )
)]
async fn root_handler() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Hot Drinks API".to_string(),
    })
}

#[utoipa::path(
    get,
    path = "/drinks",
    responses(
        (status = 200, description = "Every drink that has at least one step", body = std::collections::BTreeMap<String, Vec<String>>)
    )
)]
async fn list_drinks_handler(State(state): State<Arc<ApiState>>) -> Json<Directory> {
    let drinks = state.drinks.read().await;
    Json(
        drinks
            .iter()
            .filter(|(_, steps)| !steps.is_empty())
            .map(|(name, steps)| (name.clone(), steps.clone()))
            .collect(),
    )
}

#[utoipa::path(
    get,
    path = "/drinks/{name}",
    params(("name" = String, Path, description = "Drink name")),
    responses(
        (status = 200, description = "Ordered steps of the drink", body = Vec<String>),
        (status = 404, description = "Unknown drink", body = ErrorBody)
    )
)]
async fn drink_steps_handler(
    State(state): State<Arc<ApiState>>,
    Path(name): Path<String>,
) -> Response {
    match state.drinks.read().await.get(&name) {
        Some(steps) => Json(steps.clone()).into_response(),
        None => error_response(StatusCode::NOT_FOUND, "Drink not found"),
    }
}

/// Accepts any JSON so malformed bodies get a `detail` instead of axum's
/// default rejection text.
fn parse_new_drink(body: &Value) -> Result<NewDrink, &'static str> {
    let object = body
        .as_object()
        .filter(|o| o.contains_key("name") && o.contains_key("steps"))
        .ok_or("Invalid request format. Must include 'name' and 'steps'")?;

    let invalid_types = "Invalid data types: name must be string, steps must be list";
    let name = object["name"].as_str().ok_or(invalid_types)?;
    let steps = object["steps"]
        .as_array()
        .ok_or(invalid_types)?
        .iter()
        .map(|step| step.as_str().map(str::to_string))
        .collect::<Option<Vec<_>>>()
        .ok_or(invalid_types)?;

    Ok(NewDrink {
        name: name.to_string(),
        steps,
    })
}

#[utoipa::path(
    post,
    path = "/drinks",
    request_body = NewDrink,
    responses(
        (status = 201, description = "Drink stored", body = MessageBody),
        (status = 400, description = "Malformed body or duplicate name", body = ErrorBody)
    )
)]
#[debug_handler]
async fn add_drink_handler(State(state): State<Arc<ApiState>>, Json(body): Json<Value>) -> Response {
    let drink = match parse_new_drink(&body) {
        Ok(drink) => drink,
        Err(detail) => return error_response(StatusCode::BAD_REQUEST, detail),
    };

    let mut drinks = state.drinks.write().await;
    if drinks.contains_key(&drink.name) {
        return error_response(StatusCode::BAD_REQUEST, "Drink already exists");
    }
    drinks.insert(drink.name, drink.steps);

    (
        StatusCode::CREATED,
        Json(MessageBody {
            message: "Drink added successfully".to_string(),
        }),
    )
        .into_response()
}

pub fn router(state: Arc<ApiState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/drinks", get(list_drinks_handler).post(add_drink_handler))
        .route("/drinks/:name", get(drink_steps_handler))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE]),
        )
        .with_state(state)
}

/// Serves the drinks API on `0.0.0.0:{port}` until `shutdown` resolves.
pub async fn start_web_server<F>(port: u16, shutdown: F) -> io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = Arc::new(ApiState::seeded().await?);
    let app = router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.map_err(|e| {
        eprintln!("Failed to bind to address {}: {}", addr, e);
        e
    })?;
    println!("Drinks API listening on http://{}", addr);
    println!("  - GET  /drinks");
    println!("  - POST /drinks");
    println!("  - /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
pub(crate) struct TestServer {
    pub base_url: url::Url,
    shutdown: Option<tokio::sync::oneshot::Sender<()>>,
}

#[cfg(test)]
impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

#[cfg(test)]
pub(crate) async fn spawn_router(app: Router) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();
    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                rx.await.ok();
            })
            .await
            .unwrap();
    });

    TestServer {
        base_url: url::Url::parse(&format!("http://{}", addr)).unwrap(),
        shutdown: Some(tx),
    }
}

#[cfg(test)]
pub(crate) async fn spawn_test_server() -> TestServer {
    spawn_router(router(Arc::new(ApiState::seeded().await.unwrap()))).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DirectoryLoader, DrinksClient};
    use serde_json::json;

    async fn get_json(server: &TestServer, path: &str) -> (StatusCode, Value) {
        let response = reqwest::get(server.base_url.join(path).unwrap())
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    async fn post_json(server: &TestServer, body: Value) -> (StatusCode, Value) {
        let response = reqwest::Client::new()
            .post(server.base_url.join("/drinks").unwrap())
            .json(&body)
            .send()
            .await
            .unwrap();
        let status = response.status();
        (status, response.json().await.unwrap())
    }

    #[tokio::test]
    async fn root_reports_banner() {
        let server = spawn_test_server().await;
        let (status, body) = get_json(&server, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hot Drinks API"}));
    }

    #[tokio::test]
    async fn single_drink_steps_and_missing_drink() {
        let server = spawn_test_server().await;

        let (status, body) = get_json(&server, "/drinks/Lemon%20Tea").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0], "Boiling water");
        assert_eq!(body.as_array().unwrap().len(), 4);

        let (status, body) = get_json(&server, "/drinks/Mead").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "Drink not found"}));
    }

    #[tokio::test]
    async fn post_stores_drink_with_step_order() {
        let server = spawn_test_server().await;
        let (status, body) = post_json(
            &server,
            json!({"name": "Cocoa", "steps": ["Heat milk", "Whisk", "Serve"]}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Drink added successfully");

        let (_, body) = get_json(&server, "/drinks").await;
        assert_eq!(body["Cocoa"], json!(["Heat milk", "Whisk", "Serve"]));
    }

    #[tokio::test]
    async fn drink_without_steps_is_left_out_of_listing() {
        let server = spawn_test_server().await;
        let (status, _) = post_json(&server, json!({"name": "Ghost", "steps": []})).await;
        assert_eq!(status, StatusCode::CREATED);

        let (_, body) = get_json(&server, "/drinks").await;
        assert!(body.get("Ghost").is_none());
        assert_eq!(body.as_object().unwrap().len(), 3);

        let mut loader = DirectoryLoader::new(DirectorySource::Remote(
            DrinksClient::new(&server.base_url).unwrap(),
        ));
        loader.refresh().await.unwrap();
        assert!(!loader.directory().contains_key("Ghost"));
    }

    #[tokio::test]
    async fn post_rejects_malformed_bodies() {
        let server = spawn_test_server().await;

        let (status, body) = post_json(&server, json!({"name": "Cocoa"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Invalid request format. Must include 'name' and 'steps'"
        );

        let (status, body) = post_json(&server, json!({"name": 7, "steps": "Heat"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "Invalid data types: name must be string, steps must be list"
        );
    }

    #[tokio::test]
    async fn post_rejects_duplicates() {
        let server = spawn_test_server().await;
        let (status, body) =
            post_json(&server, json!({"name": "Coffee", "steps": ["Brew"]})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Drink already exists");
    }
}
