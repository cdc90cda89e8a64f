// directory/client.rs
use crate::error::{ConfigError, LoadError, SubmitError};
use crate::types::{Directory, ErrorBody, NewDrink};
use url::Url;

/// HTTP client for the `/drinks` resource.
#[derive(Clone, Debug)]
pub struct DrinksClient {
    http: reqwest::Client,
    drinks_url: Url,
}

impl DrinksClient {
    pub fn new(base: &Url) -> Result<Self, ConfigError> {
        // Url::join drops the last path segment unless it ends with a slash.
        let mut base = base.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        let drinks_url = base
            .join("drinks")
            .map_err(|source| ConfigError::BackendUrl {
                url: base.to_string(),
                source,
            })?;

        Ok(Self {
            http: reqwest::Client::new(),
            drinks_url,
        })
    }

    pub fn drinks_url(&self) -> &Url {
        &self.drinks_url
    }

    /// `GET /drinks`. Any non-2xx status is a failure.
    pub async fn list_drinks(&self) -> Result<Directory, LoadError> {
        let response = self.http.get(self.drinks_url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// `POST /drinks`. A rejection carries the server's `detail` when the
    /// body has one.
    pub async fn create_drink(&self, drink: &NewDrink) -> Result<(), SubmitError> {
        let response = self
            .http
            .post(self.drinks_url.clone())
            .json(drink)
            .send()
            .await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let detail = response
            .bytes()
            .await
            .ok()
            .and_then(|body| serde_json::from_slice::<ErrorBody>(&body).ok())
            .and_then(|body| body.detail);
        Err(SubmitError::Rejected { status, detail })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::spawn_test_server;
    use reqwest::StatusCode;

    #[test]
    fn drinks_url_keeps_base_path() {
        let root = DrinksClient::new(&Url::parse("http://localhost:8000").unwrap()).unwrap();
        assert_eq!(root.drinks_url().as_str(), "http://localhost:8000/drinks");

        let nested = DrinksClient::new(&Url::parse("http://example.com/api").unwrap()).unwrap();
        assert_eq!(nested.drinks_url().as_str(), "http://example.com/api/drinks");
    }

    #[tokio::test]
    async fn lists_seeded_drinks() {
        let server = spawn_test_server().await;
        let client = DrinksClient::new(&server.base_url).unwrap();

        let directory = client.list_drinks().await.unwrap();
        assert_eq!(
            directory.keys().cloned().collect::<Vec<_>>(),
            vec!["Coffee", "Hot Chocolate", "Lemon Tea"]
        );
        assert_eq!(directory["Lemon Tea"].last().unwrap(), "Adding lemon");
    }

    #[tokio::test]
    async fn create_then_list_includes_new_drink() {
        let server = spawn_test_server().await;
        let client = DrinksClient::new(&server.base_url).unwrap();

        let cocoa = NewDrink {
            name: "Cocoa".to_string(),
            steps: vec!["Heat milk".to_string(), "Stir in cocoa".to_string()],
        };
        client.create_drink(&cocoa).await.unwrap();

        let directory = client.list_drinks().await.unwrap();
        assert_eq!(directory["Cocoa"], cocoa.steps);
    }

    #[tokio::test]
    async fn duplicate_drink_surfaces_server_detail() {
        let server = spawn_test_server().await;
        let client = DrinksClient::new(&server.base_url).unwrap();

        let coffee = NewDrink {
            name: "Coffee".to_string(),
            steps: vec!["Boiling water".to_string()],
        };
        match client.create_drink(&coffee).await {
            Err(SubmitError::Rejected { status, detail }) => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert_eq!(detail.as_deref(), Some("Drink already exists"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let base = Url::parse(&format!("http://127.0.0.1:{}", port)).unwrap();
        let client = DrinksClient::new(&base).unwrap();
        assert!(matches!(
            client.list_drinks().await,
            Err(LoadError::Transport(_))
        ));
    }
}
