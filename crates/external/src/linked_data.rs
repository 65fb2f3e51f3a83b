//! Getty AAT and Wikidata lookups for vocabulary terms.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ExternalError;
use crate::http::{endpoint_url, parse_json};
use crate::services::{LinkedData, WikidataEntity};

const GETTY: &str = "Getty";
const WIKIDATA: &str = "Wikidata";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);
const USER_AGENT: &str = concat!("palp-workspace/", env!("CARGO_PKG_VERSION"));

const SCOPE_NOTE_PREFIX: &str = "http://vocab.getty.edu/aat/scopeNote/";
const RDF_VALUE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#value";
const COMMONS_FILE_PATH: &str = "https://commons.wikimedia.org/wiki/Special:FilePath";

/// Machine-readable document for a Getty concept page
/// (`.../page/aat/300198841` becomes `.../aat/300198841.json`).
pub fn getty_document_url(page_url: &str) -> String {
    format!("{}.json", page_url.replace("page/", ""))
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    results: SparqlBindings,
}

#[derive(Debug, Deserialize)]
struct SparqlBindings {
    #[serde(default)]
    bindings: Vec<HashMap<String, SparqlValue>>,
}

#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

/// Scope-note subjects referenced by a concept document.
fn scope_note_subjects(results: SparqlResults) -> Vec<String> {
    results
        .results
        .bindings
        .into_iter()
        .filter_map(|mut b| b.remove("Subject"))
        .map(|s| s.value)
        .filter(|v| v.starts_with(SCOPE_NOTE_PREFIX))
        .collect()
}

/// The English literal of a scope-note document in RDF/JSON form.
fn english_note(subject: &str, document: &Value) -> Option<String> {
    document
        .get(subject)?
        .get(RDF_VALUE)?
        .as_array()?
        .iter()
        .find(|literal| {
            literal
                .get("lang")
                .and_then(Value::as_str)
                .is_some_and(|lang| lang.starts_with("en"))
        })
        .and_then(|literal| literal.get("value"))
        .and_then(Value::as_str)
        .map(str::to_string)
}

/// Description and P18 image of the first entity in an EntityData document.
fn parse_entity(document: &Value) -> WikidataEntity {
    let Some(entity) = document
        .get("entities")
        .and_then(Value::as_object)
        .and_then(|entities| entities.values().next())
    else {
        return WikidataEntity::default();
    };

    let description = entity
        .pointer("/descriptions/en/value")
        .and_then(Value::as_str)
        .map(str::to_string);
    let image_url = entity
        .pointer("/claims/P18/0/mainsnak/datavalue/value")
        .and_then(Value::as_str)
        .and_then(|name| commons_file_url(name).ok());

    WikidataEntity {
        description,
        image_url,
    }
}

/// Commons redirect to the full-size file. Spaces in file names become
/// underscores, as on Commons itself.
fn commons_file_url(filename: &str) -> Result<String, ExternalError> {
    let name = filename.replace(' ', "_");
    Ok(endpoint_url(WIKIDATA, COMMONS_FILE_PATH, &[name.as_str()])?.to_string())
}

pub struct LinkedDataClient {
    http: reqwest::Client,
    wikidata_base: String,
}

impl LinkedDataClient {
    pub fn new() -> Result<Self, ExternalError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http,
            wikidata_base: "https://www.wikidata.org/wiki/Special:EntityData".to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        service: &'static str,
        url: &str,
    ) -> Result<T, ExternalError> {
        let response = self.http.get(url).send().await?;
        parse_json(service, response).await
    }
}

#[async_trait]
impl LinkedData for LinkedDataClient {
    async fn getty_scope_note(&self, page_url: &str) -> Result<Option<String>, ExternalError> {
        let concept: SparqlResults = self.get_json(GETTY, &getty_document_url(page_url)).await?;

        for subject in scope_note_subjects(concept) {
            let document: Value = self.get_json(GETTY, &format!("{subject}.json")).await?;
            if let Some(note) = english_note(&subject, &document) {
                return Ok(Some(note));
            }
        }
        tracing::debug!(page_url, "No English Getty scope note");
        Ok(None)
    }

    async fn wikidata_entity(&self, id: &str) -> Result<WikidataEntity, ExternalError> {
        let document_name = format!("{id}.json");
        let url = endpoint_url(WIKIDATA, &self.wikidata_base, &[document_name.as_str()])?;
        let document: Value = self.get_json(WIKIDATA, url.as_str()).await?;
        Ok(parse_entity(&document))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn getty_page_to_document() {
        assert_eq!(
            getty_document_url("http://vocab.getty.edu/page/aat/300198841"),
            "http://vocab.getty.edu/aat/300198841.json"
        );
    }

    #[test]
    fn selects_scope_note_subjects() {
        let raw = json!({
            "head": {"vars": ["Subject", "Predicate", "Object"]},
            "results": {"bindings": [
                {"Subject": {"type": "uri", "value": "http://vocab.getty.edu/aat/300198841"}},
                {"Subject": {"type": "uri", "value": "http://vocab.getty.edu/aat/scopeNote/12345"}},
                {"Predicate": {"type": "uri", "value": "x"}}
            ]}
        });
        let results: SparqlResults = serde_json::from_value(raw).unwrap();
        assert_eq!(
            scope_note_subjects(results),
            vec!["http://vocab.getty.edu/aat/scopeNote/12345"]
        );
    }

    #[test]
    fn picks_english_literal() {
        let subject = "http://vocab.getty.edu/aat/scopeNote/12345";
        let document = json!({
            subject: {
                RDF_VALUE: [
                    {"type": "literal", "value": "Ánfora", "lang": "es"},
                    {"type": "literal", "value": "Two-handled jar.", "lang": "en"}
                ]
            }
        });
        assert_eq!(english_note(subject, &document).as_deref(), Some("Two-handled jar."));
        assert_eq!(english_note("other", &document), None);
    }

    #[test]
    fn parses_wikidata_entity() {
        let document = json!({
            "entities": {
                "Q181254": {
                    "descriptions": {"en": {"language": "en", "value": "type of vase"}},
                    "claims": {"P18": [{"mainsnak": {"datavalue": {
                        "value": "Amphora Louvre F201.jpg", "type": "string"
                    }}}]}
                }
            }
        });
        let entity = parse_entity(&document);
        assert_eq!(entity.description.as_deref(), Some("type of vase"));
        assert_eq!(
            entity.image_url.as_deref(),
            Some("https://commons.wikimedia.org/wiki/Special:FilePath/Amphora_Louvre_F201.jpg")
        );
    }

    #[test]
    fn entity_without_claims() {
        let document = json!({"entities": {"Q1": {"descriptions": {}}}});
        assert_eq!(parse_entity(&document), WikidataEntity::default());
        assert_eq!(parse_entity(&json!({})), WikidataEntity::default());
    }

    #[test]
    fn commons_names_are_encoded() {
        assert_eq!(
            commons_file_url("Fresco, Pompeii?.jpg").unwrap(),
            "https://commons.wikimedia.org/wiki/Special:FilePath/Fresco,_Pompeii%3F.jpg"
        );
        assert_eq!(
            commons_file_url("Villa/Mysteries #2.jpg").unwrap(),
            "https://commons.wikimedia.org/wiki/Special:FilePath/Villa%2FMysteries_%232.jpg"
        );
    }
}
