use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::GoogleClient;
use crate::error::ExternalError;
use crate::http::{check_status, endpoint_url, parse_json};
use crate::services::{Spreadsheets, ValueInput};

const SERVICE: &str = "Google Sheets";

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

/// Cells come back as strings in formatted mode; anything else is rendered
/// with its JSON text.
fn cell_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn into_strings(range: ValueRange) -> Vec<Vec<String>> {
    range
        .values
        .into_iter()
        .map(|line| line.into_iter().map(cell_text).collect())
        .collect()
}

impl GoogleClient {
    async fn get_values(
        &self,
        spreadsheet_id: &str,
        range: &str,
        major_dimension: &str,
    ) -> Result<Vec<Vec<String>>, ExternalError> {
        let url = endpoint_url(
            SERVICE,
            &self.endpoints.sheets,
            &[spreadsheet_id, "values", range],
        )?;
        let token = self.access_token().await?;
        let response = self
            .http
            .get(url)
            .bearer_auth(token)
            .query(&[("majorDimension", major_dimension)])
            .send()
            .await?;
        let values: ValueRange = parse_json(SERVICE, response).await?;
        Ok(into_strings(values))
    }
}

#[async_trait]
impl Spreadsheets for GoogleClient {
    async fn get_columns(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ExternalError> {
        self.get_values(spreadsheet_id, range, "COLUMNS").await
    }

    async fn get_rows(
        &self,
        spreadsheet_id: &str,
        range: &str,
    ) -> Result<Vec<Vec<String>>, ExternalError> {
        self.get_values(spreadsheet_id, range, "ROWS").await
    }

    async fn update_cell(
        &self,
        spreadsheet_id: &str,
        cell: &str,
        value: &str,
        input: ValueInput,
    ) -> Result<(), ExternalError> {
        let url = endpoint_url(
            SERVICE,
            &self.endpoints.sheets,
            &[spreadsheet_id, "values", cell],
        )?;
        let token = self.access_token().await?;
        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .query(&[("valueInputOption", input.as_str())])
            .json(&json!({
                "range": cell,
                "majorDimension": "ROWS",
                "values": [[value]],
            }))
            .send()
            .await?;
        check_status(SERVICE, response).await?;
        tracing::info!(spreadsheet_id, cell, "Updated spreadsheet cell");
        Ok(())
    }
}
