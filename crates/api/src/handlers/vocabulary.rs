//! Controlled vocabulary lookups backed by the vocabulary spreadsheet.
//!
//! These endpoints need no login. Linked-data failures only blank out
//! the affected fields.

use axum::extract::{Query, State};
use axum::Json;
use palp_core::error::CoreError;
use palp_core::vocabulary::{Vocabulary, VocabularyTerm, NO_IDENTIFIER};
use palp_external::WikidataEntity;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

const WIKIDATA_PAGE_BASE: &str = "https://www.wikidata.org/wiki/";

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub search: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategoryParams {
    pub category: Option<String>,
}

/// Everything known about one term.
#[derive(Debug, Serialize)]
pub struct TermDetail {
    pub term: String,
    pub synonyms: Vec<String>,
    pub category: String,
    /// Getty AAT page, or `-`.
    pub getty_url: String,
    pub wiki_url: Option<String>,
    /// Getty scope note in English.
    pub description: Option<String>,
    pub wiki_description: Option<String>,
    pub image_url: Option<String>,
    pub other_desc: String,
    pub other_image_url: String,
    pub other_url: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryImage {
    pub key: String,
    pub img_url: String,
}

async fn load(state: &AppState) -> AppResult<Vocabulary> {
    let sheet = &state.config.vocabulary;
    let rows = state
        .services
        .sheets
        .get_rows(&sheet.spreadsheet_id, &sheet.range)
        .await?;
    Ok(Vocabulary::from_rows(&rows))
}

async fn lookup_entity(state: &AppState, wiki_id: &str) -> Option<WikidataEntity> {
    match state.services.linked_data.wikidata_entity(wiki_id).await {
        Ok(entity) => Some(entity),
        Err(err) => {
            tracing::warn!(wiki_id, error = %err, "Wikidata lookup failed");
            None
        }
    }
}

async fn getty_note(state: &AppState, page_url: &str) -> Option<String> {
    match state.services.linked_data.getty_scope_note(page_url).await {
        Ok(note) => note,
        Err(err) => {
            tracing::warn!(page_url, error = %err, "Getty lookup failed");
            None
        }
    }
}

/// GET /api/v1/vocabulary/terms
///
/// Every term followed by its synonyms, for autocomplete.
pub async fn list_terms(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<String>>>> {
    let vocabulary = load(&state).await?;
    Ok(Json(DataResponse {
        data: vocabulary.all_terms(),
    }))
}

/// GET /api/v1/vocabulary/search?search=
///
/// Accepts a term or one of its synonyms.
pub async fn search_term(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<TermDetail>>> {
    let query = params
        .search
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::BadRequest("search is required".into()))?;

    let vocabulary = load(&state).await?;
    let term = vocabulary.resolve(query).ok_or_else(|| CoreError::NotFound {
        entity: "Term",
        id: query.to_string(),
    })?;

    Ok(Json(DataResponse {
        data: term_detail(&state, term).await,
    }))
}

async fn term_detail(state: &AppState, term: &VocabularyTerm) -> TermDetail {
    let description = match term.getty_url() {
        Some(url) => getty_note(state, url).await,
        None => None,
    };
    let entity = match term.wiki_id() {
        Some(id) => lookup_entity(state, id).await.unwrap_or_default(),
        None => WikidataEntity::default(),
    };

    TermDetail {
        term: term.term.clone(),
        synonyms: term.synonyms.clone(),
        category: term.category.clone(),
        getty_url: term.getty_url().unwrap_or(NO_IDENTIFIER).to_string(),
        wiki_url: term.wiki_id().map(|id| format!("{WIKIDATA_PAGE_BASE}{id}")),
        description,
        wiki_description: entity.description,
        image_url: entity.image_url,
        other_desc: term.other_desc.clone(),
        other_image_url: term.other_image_url.clone(),
        other_url: term.other_url.clone(),
    }
}

/// GET /api/v1/vocabulary/categories
///
/// One representative image per category: the Wikidata image of the first
/// term in the category that has one. Categories without any are left out.
pub async fn list_categories(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CategoryImage>>>> {
    let vocabulary = load(&state).await?;
    let mut categories = Vec::new();

    for category in vocabulary.categories() {
        for term in vocabulary.terms_in_category(&category) {
            let Some(wiki_id) = term.wiki_id() else {
                continue;
            };
            let image = lookup_entity(&state, wiki_id)
                .await
                .and_then(|e| e.image_url)
                .filter(|url| !url.is_empty());
            if let Some(img_url) = image {
                categories.push(CategoryImage {
                    key: category.clone(),
                    img_url,
                });
                break;
            }
        }
    }

    Ok(Json(DataResponse { data: categories }))
}

/// GET /api/v1/vocabulary/images?category=
///
/// Images for each term in a category that has a Wikidata id. Terms whose
/// lookup yields no image fall back to their own image URL, then `-`.
pub async fn category_images(
    State(state): State<AppState>,
    Query(params): Query<CategoryParams>,
) -> AppResult<Json<DataResponse<Vec<CategoryImage>>>> {
    let category = params
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| AppError::BadRequest("category is required".into()))?;

    let vocabulary = load(&state).await?;
    let mut images = Vec::new();

    for term in vocabulary.terms_in_category(category) {
        let Some(wiki_id) = term.wiki_id() else {
            continue;
        };
        let img_url = lookup_entity(&state, wiki_id)
            .await
            .and_then(|e| e.image_url)
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| fallback_image(term));
        images.push(CategoryImage {
            key: term.term.clone(),
            img_url,
        });
    }

    Ok(Json(DataResponse { data: images }))
}

fn fallback_image(term: &VocabularyTerm) -> String {
    if term.other_image_url.is_empty() {
        NO_IDENTIFIER.to_string()
    } else {
        term.other_image_url.clone()
    }
}
