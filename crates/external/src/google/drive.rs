use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::GoogleClient;
use crate::error::ExternalError;
use crate::http::{check_status, endpoint_url, parse_json};
use crate::services::Drive;

const SERVICE: &str = "Google Drive";

#[derive(Debug, Deserialize)]
struct CopiedFile {
    id: String,
}

impl GoogleClient {
    async fn create_permission(
        &self,
        file_id: &str,
        email: &str,
        role: &str,
        query: &[(&str, &str)],
    ) -> Result<(), ExternalError> {
        let url =
            endpoint_url(SERVICE, &self.endpoints.drive, &[file_id, "permissions"])?;
        let token = self.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true")])
            .query(query)
            .json(&json!({
                "type": "user",
                "role": role,
                "emailAddress": email,
            }))
            .send()
            .await?;
        check_status(SERVICE, response).await
    }
}

#[async_trait]
impl Drive for GoogleClient {
    async fn copy_file(
        &self,
        file_id: &str,
        name: &str,
        parent_id: &str,
    ) -> Result<String, ExternalError> {
        let url = endpoint_url(SERVICE, &self.endpoints.drive, &[file_id, "copy"])?;
        let token = self.access_token().await?;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true")])
            .json(&json!({ "name": name, "parents": [parent_id] }))
            .send()
            .await?;
        let copied: CopiedFile = parse_json(SERVICE, response).await?;
        tracing::info!(template = file_id, copy = %copied.id, name, "Copied drive file");
        Ok(copied.id)
    }

    async fn add_writer(&self, file_id: &str, email: &str) -> Result<(), ExternalError> {
        self.create_permission(file_id, email, "writer", &[("sendNotificationEmail", "false")])
            .await
    }

    async fn transfer_ownership(&self, file_id: &str, email: &str) -> Result<(), ExternalError> {
        self.create_permission(file_id, email, "owner", &[("transferOwnership", "true")])
            .await?;
        tracing::info!(file_id, owner = email, "Transferred drive file ownership");
        Ok(())
    }
}
