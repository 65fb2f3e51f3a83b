use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::GoogleClient;
use crate::error::ExternalError;
use crate::http::parse_json;
use crate::services::Translator;

const SERVICE: &str = "Google Translate";

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslationList,
}

#[derive(Debug, Deserialize)]
struct TranslationList {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

fn first_translation(response: TranslateResponse) -> Result<String, ExternalError> {
    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|t| t.translated_text)
        .ok_or_else(|| ExternalError::Decode {
            service: SERVICE,
            message: "no translations returned".to_string(),
        })
}

#[async_trait]
impl Translator for GoogleClient {
    async fn translate(
        &self,
        text: &str,
        source: &str,
        target: &str,
    ) -> Result<String, ExternalError> {
        if text.trim().is_empty() {
            return Ok(String::new());
        }
        let token = self.access_token().await?;
        let response = self
            .http
            .post(&self.endpoints.translate)
            .bearer_auth(token)
            .json(&json!({
                "q": text,
                "source": source,
                "target": target,
                "format": "text",
            }))
            .send()
            .await?;
        first_translation(parse_json(SERVICE, response).await?)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn picks_first_translation() {
        let raw = r#"{"data":{"translations":[{"translatedText":"fresco with birds"}]}}"#;
        let response: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(first_translation(response).unwrap(), "fresco with birds");
    }

    #[test]
    fn empty_translation_list_is_an_error() {
        let raw = r#"{"data":{"translations":[]}}"#;
        let response: TranslateResponse = serde_json::from_str(raw).unwrap();
        assert_matches!(first_translation(response), Err(ExternalError::Decode { .. }));
    }
}
