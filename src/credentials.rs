use reqwest::Client;
use secrecy::SecretString;

use crate::error::LLMError;

pub const DEFAULT_PASTE_BASE_URL: &str = "https://pastebin.com/raw/";

/// Fetches an API key published as a raw paste.
///
/// The request goes to `{relay_prefix}{paste_base_url}{paste_id}`; the relay
/// prefix is empty unless one is configured.
#[derive(Debug, Clone)]
pub struct CredentialImporter {
    client: Client,
    paste_base_url: String,
    relay_prefix: Option<String>,
}

impl CredentialImporter {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            paste_base_url: DEFAULT_PASTE_BASE_URL.to_string(),
            relay_prefix: None,
        }
    }

    pub fn paste_base_url(mut self, url: impl Into<String>) -> Self {
        self.paste_base_url = url.into();
        self
    }

    pub fn relay_prefix(mut self, prefix: Option<String>) -> Self {
        self.relay_prefix = prefix;
        self
    }

    pub fn url_for(&self, paste_id: &str) -> String {
        format!(
            "{}{}{}",
            self.relay_prefix.as_deref().unwrap_or_default(),
            self.paste_base_url,
            paste_id
        )
    }

    pub async fn import(&self, paste_id: &str) -> Result<SecretString, LLMError> {
        let paste_id = paste_id.trim();
        if paste_id.is_empty() {
            return Err(LLMError::InvalidRequest(
                "paste id must not be empty".to_string(),
            ));
        }

        let resp = self.client.get(self.url_for(paste_id)).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LLMError::ApiError {
                status: status.as_u16(),
                body: "failed to fetch the paste content".to_string(),
            });
        }

        let key = resp.text().await?.trim().to_string();
        if key.is_empty() {
            return Err(LLMError::InvalidRequest("paste is empty".to_string()));
        }
        log::info!("API key imported from paste {paste_id}");
        Ok(SecretString::new(key))
    }
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    fn importer_for(server: &mockito::ServerGuard) -> CredentialImporter {
        CredentialImporter::new(Client::new()).paste_base_url(format!("{}/raw/", server.url()))
    }

    #[test]
    fn relay_prefix_wraps_the_paste_url() {
        let importer = CredentialImporter::new(Client::new())
            .relay_prefix(Some("https://relay.test/?url=".to_string()));
        assert_eq!(
            importer.url_for("abc123"),
            "https://relay.test/?url=https://pastebin.com/raw/abc123"
        );
    }

    #[tokio::test]
    async fn imports_trimmed_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/raw/abc123")
            .with_status(200)
            .with_body("  hf_secret_token \n")
            .expect(1)
            .create_async()
            .await;

        let key = importer_for(&server).import("abc123").await.expect("import");
        assert_eq!(key.expose_secret(), "hf_secret_token");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn missing_paste_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/raw/gone")
            .with_status(404)
            .create_async()
            .await;

        let err = importer_for(&server).import("gone").await.unwrap_err();
        assert!(matches!(err, LLMError::ApiError { status: 404, .. }));
    }

    #[tokio::test]
    async fn blank_id_is_rejected_without_a_request() {
        let importer = CredentialImporter::new(Client::new());
        let err = importer.import("   ").await.unwrap_err();
        assert!(matches!(err, LLMError::InvalidRequest(_)));
    }
}
