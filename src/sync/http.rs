use futures::future::{FutureExt, LocalBoxFuture};
use log::debug;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::SyncError;
use crate::models::{MoveRequest, MoveResponse, NewGameRequest, NewGameResponse, ResignResponse};
use crate::sync::arbiter::Arbiter;

/// Talks to the authority's JSON endpoints over HTTP.
#[derive(Clone)]
pub struct HttpArbiter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpArbiter {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn post<B, T>(&self, path: &str, body: Option<B>) -> LocalBoxFuture<'static, Result<T, SyncError>>
    where
        B: Serialize + 'static,
        T: DeserializeOwned + 'static,
    {
        let client = self.client.clone();
        let url = self.url(path);
        async move {
            debug!("POST {}", url);
            let mut request = client.post(&url);
            if let Some(body) = body {
                request = request.json(&body);
            }
            let response = request.send().await?.error_for_status()?;
            let text = response.text().await?;
            Ok(serde_json::from_str(&text)?)
        }
        .boxed_local()
    }
}

impl Arbiter for HttpArbiter {
    fn new_game(
        &self,
        request: NewGameRequest,
    ) -> LocalBoxFuture<'static, Result<NewGameResponse, SyncError>> {
        self.post("new", Some(request))
    }

    fn submit_move(
        &self,
        request: MoveRequest,
    ) -> LocalBoxFuture<'static, Result<MoveResponse, SyncError>> {
        self.post("move", Some(request))
    }

    fn resign(&self) -> LocalBoxFuture<'static, Result<ResignResponse, SyncError>> {
        self.post::<(), _>("resign", None)
    }
}
