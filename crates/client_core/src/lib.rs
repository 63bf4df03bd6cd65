use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::json;
use shared::domain::{Roundtrip, RoundtripId, SyncMode, User};
use tracing::info;

pub mod error;
pub mod transport;

pub use error::RequestFailure;
pub use transport::{normalize_base_url, HttpRequestIssuer, RequestIssuer};

const CURRENT_USER_PATH: &str = "currentUser";
const ROUNDTRIP_PATH: &str = "secured/resource/roundtrip";
const NAME_CHECK_PATH: &str = "secured/resource/roundtrip/isNameValid";
const MODELER_NAMES_PATH: &str = "secured/resource/diagram/modelerNames";

/// Backend operations the view controllers depend on.
#[async_trait]
pub trait RoundtripApi: Send + Sync {
    async fn current_user(&self) -> Result<User, RequestFailure>;
    async fn list_roundtrips(&self) -> Result<Vec<Roundtrip>, RequestFailure>;
    async fn roundtrip_details(&self, id: RoundtripId) -> Result<Roundtrip, RequestFailure>;
    async fn create_roundtrip(&self, name: &str) -> Result<Roundtrip, RequestFailure>;
    async fn save_roundtrip(&self, roundtrip: &Roundtrip) -> Result<Roundtrip, RequestFailure>;
    async fn sync_roundtrip(
        &self,
        id: RoundtripId,
        mode: SyncMode,
    ) -> Result<Roundtrip, RequestFailure>;
    /// Asks the backend whether `name` is still unused.
    async fn is_name_valid(&self, name: &str) -> Result<bool, RequestFailure>;
    async fn modeler_names(&self) -> Result<Vec<String>, RequestFailure>;
}

pub struct CycleClient<R: RequestIssuer = HttpRequestIssuer> {
    issuer: R,
}

impl CycleClient<HttpRequestIssuer> {
    pub fn connect(base_url: &str) -> Result<Self, RequestFailure> {
        Ok(Self::new(HttpRequestIssuer::new(base_url)?))
    }
}

impl<R: RequestIssuer> CycleClient<R> {
    pub fn new(issuer: R) -> Self {
        Self { issuer }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RequestFailure> {
        let body = self.issuer.get(path, query).await?;
        Ok(serde_json::from_str(&body)?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T, RequestFailure> {
        let body = body.map(serde_json::to_value).transpose()?;
        let raw = self.issuer.post(path, query, body).await?;
        Ok(serde_json::from_str(&raw)?)
    }
}

#[async_trait]
impl<R: RequestIssuer> RoundtripApi for CycleClient<R> {
    async fn current_user(&self) -> Result<User, RequestFailure> {
        self.get_json(CURRENT_USER_PATH, &[]).await
    }

    async fn list_roundtrips(&self) -> Result<Vec<Roundtrip>, RequestFailure> {
        self.get_json(ROUNDTRIP_PATH, &[]).await
    }

    async fn roundtrip_details(&self, id: RoundtripId) -> Result<Roundtrip, RequestFailure> {
        self.get_json(&format!("{ROUNDTRIP_PATH}/{id}/details"), &[])
            .await
    }

    async fn create_roundtrip(&self, name: &str) -> Result<Roundtrip, RequestFailure> {
        let created: Roundtrip = self
            .post_json(ROUNDTRIP_PATH, &[], Some(&json!({ "name": name })))
            .await?;
        info!(roundtrip_id = created.id.0, name, "roundtrip created");
        Ok(created)
    }

    async fn save_roundtrip(&self, roundtrip: &Roundtrip) -> Result<Roundtrip, RequestFailure> {
        self.post_json(
            &format!("{ROUNDTRIP_PATH}/{}/details", roundtrip.id),
            &[],
            Some(roundtrip),
        )
        .await
    }

    async fn sync_roundtrip(
        &self,
        id: RoundtripId,
        mode: SyncMode,
    ) -> Result<Roundtrip, RequestFailure> {
        self.post_json::<(), _>(
            &format!("{ROUNDTRIP_PATH}/{id}/sync"),
            &[("syncMode", mode.as_query_value())],
            None,
        )
        .await
    }

    async fn is_name_valid(&self, name: &str) -> Result<bool, RequestFailure> {
        let body = self.issuer.get(NAME_CHECK_PATH, &[("name", name)]).await?;
        Ok(body.trim().trim_matches('"') == "true")
    }

    async fn modeler_names(&self) -> Result<Vec<String>, RequestFailure> {
        self.get_json(MODELER_NAMES_PATH, &[]).await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
