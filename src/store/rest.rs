use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::config::StoreConfig;
use crate::store::error::StoreError;
use crate::store::program::{NewProgram, Program, ProgramPatch};
use crate::store::ProgramStore;

/// Supabase client for the `programs` table, speaking PostgREST over HTTP.
///
/// One instance is built at startup and shared by every handler; it holds no
/// mutable state of its own beyond the connection pool inside
/// [`reqwest::Client`].
pub struct RestStore {
    http: reqwest::Client,
    programs_url: Url,
}

// PostgREST error body: {"message": ..., "details": ..., "hint": ..., "code": ...}
#[derive(Debug, Deserialize)]
struct RemoteErrorBody {
    message: Option<String>,
    details: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdRow {
    #[allow(dead_code)]
    id: i64,
}

impl RestStore {
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let programs_url = config
            .endpoint
            .join("rest/v1/programs")
            .map_err(|e| StoreError::Config(format!("cannot derive table URL: {e}")))?;

        let mut key = HeaderValue::from_str(&config.service_key)
            .map_err(|_| StoreError::Config("service key is not a valid header value".into()))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.service_key))
            .map_err(|_| StoreError::Config("service key is not a valid header value".into()))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(StoreError::Transport)?;

        Ok(Self { http, programs_url })
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.http.request(method, self.programs_url.clone())
    }

    /// Writes ask PostgREST to echo the affected rows back, so a successful
    /// call that returns an empty array really means zero rows were touched.
    fn write(&self, method: Method) -> RequestBuilder {
        self.request(method).header("Prefer", "return=representation")
    }

    async fn rows<T: DeserializeOwned>(&self, response: Response) -> Result<Vec<T>, StoreError> {
        let response = check_status(response).await?;
        response.json().await.map_err(StoreError::Transport)
    }
}

async fn check_status(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let parsed: Option<RemoteErrorBody> = serde_json::from_str(&body).ok();
    let (message, details) = match parsed {
        Some(err) => (
            err.message
                .unwrap_or_else(|| default_message(status)),
            err.details,
        ),
        None => (
            default_message(status),
            (!body.is_empty()).then_some(body),
        ),
    };

    Err(StoreError::Remote {
        status: status.as_u16(),
        message,
        details,
    })
}

fn default_message(status: StatusCode) -> String {
    format!("store responded with status {status}")
}

#[async_trait::async_trait]
impl ProgramStore for RestStore {
    async fn insert(&self, program: &NewProgram) -> Result<Option<Program>, StoreError> {
        let response = self.write(Method::POST).json(program).send().await?;
        let rows: Vec<Program> = self.rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn list(&self) -> Result<Vec<Program>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .send()
            .await?;
        self.rows(response).await
    }

    async fn fetch(&self, id: i64) -> Result<Option<Program>, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "*".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;
        let rows: Vec<Program> = self.rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn update(&self, id: i64, patch: &ProgramPatch) -> Result<Option<Program>, StoreError> {
        let response = self
            .write(Method::PATCH)
            .query(&[("id", format!("eq.{id}"))])
            .json(patch)
            .send()
            .await?;
        let rows: Vec<Program> = self.rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, id: i64) -> Result<Option<Program>, StoreError> {
        let response = self
            .write(Method::DELETE)
            .query(&[("id", format!("eq.{id}"))])
            .send()
            .await?;
        let rows: Vec<Program> = self.rows(response).await?;
        Ok(rows.into_iter().next())
    }

    async fn exists(&self, id: i64) -> Result<bool, StoreError> {
        let response = self
            .request(Method::GET)
            .query(&[("select", "id".to_string()), ("id", format!("eq.{id}"))])
            .send()
            .await?;
        let rows: Vec<IdRow> = self.rows(response).await?;
        Ok(!rows.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(endpoint: &str) -> StoreConfig {
        StoreConfig {
            endpoint: Url::parse(endpoint).unwrap(),
            service_key: "service-role-key".to_string(),
        }
    }

    #[test]
    fn table_url_derives_from_project_endpoint() {
        let store = RestStore::new(&config("https://abc123.supabase.co/")).unwrap();
        assert_eq!(
            store.programs_url.as_str(),
            "https://abc123.supabase.co/rest/v1/programs"
        );
    }

    #[test]
    fn rejects_key_with_control_characters() {
        let bad = StoreConfig {
            endpoint: Url::parse("https://abc123.supabase.co/").unwrap(),
            service_key: "key\nwith-newline".to_string(),
        };
        assert!(matches!(RestStore::new(&bad), Err(StoreError::Config(_))));
    }
}
