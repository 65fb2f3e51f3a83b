//! Editable catalogue fields and the form keys that address them.
//!
//! The workspace PPP page posts keys of the form `{uuid}_{letter}`; the
//! single-entry editors post named keys. Both map onto a closed set of
//! columns so that the database layer never interpolates user input.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// Editable columns of the `ppp` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PppField {
    PppId,
    Location,
    Material,
    Description,
    Condition,
    Style,
    Bibliography,
    PhotoNegative,
    Region,
    Insula,
    Doorway,
    Room,
    Volume,
}

impl PppField {
    pub fn column(self) -> &'static str {
        match self {
            PppField::PppId => "id",
            PppField::Location => "location",
            PppField::Material => "material",
            PppField::Description => "description",
            PppField::Condition => "condition_ppp",
            PppField::Style => "style",
            PppField::Bibliography => "bibliography",
            PppField::PhotoNegative => "photo_negative",
            PppField::Region => "region",
            PppField::Insula => "insula",
            PppField::Doorway => "doorway",
            PppField::Room => "room",
            PppField::Volume => "volume",
        }
    }

    /// Field letters used on the workspace PPP page (`i` is the ARC link,
    /// handled separately).
    pub fn from_workspace_letter(letter: &str) -> Option<Self> {
        match letter {
            "a" => Some(PppField::PppId),
            "b" => Some(PppField::Location),
            "c" => Some(PppField::Material),
            "d" => Some(PppField::Description),
            "e" => Some(PppField::Region),
            "f" => Some(PppField::Insula),
            "g" => Some(PppField::Doorway),
            "h" => Some(PppField::Room),
            _ => None,
        }
    }

    /// Named keys used by the single PPP editor.
    pub fn from_editor_key(key: &str) -> Option<Self> {
        match key {
            "PPPID" => Some(PppField::PppId),
            "location" => Some(PppField::Location),
            "material" => Some(PppField::Material),
            "description" => Some(PppField::Description),
            "condition" => Some(PppField::Condition),
            "style" => Some(PppField::Style),
            "bibliography" => Some(PppField::Bibliography),
            "negative" => Some(PppField::PhotoNegative),
            "region" => Some(PppField::Region),
            "insula" => Some(PppField::Insula),
            "doorway" => Some(PppField::Doorway),
            "room" => Some(PppField::Room),
            "volume" => Some(PppField::Volume),
            _ => None,
        }
    }
}

/// Editable columns of the `ppm` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PpmField {
    TranslatedText,
    PhotoArchiveId,
    Material,
    Description,
    Doorways,
    ImagePath,
    Page,
    Caption,
    Region,
    Insula,
    Doorway,
    Room,
    Volume,
}

impl PpmField {
    pub fn column(self) -> &'static str {
        match self {
            PpmField::TranslatedText => "translated_text",
            PpmField::PhotoArchiveId => "photo_archive_id",
            PpmField::Material => "material",
            PpmField::Description => "description",
            PpmField::Doorways => "doorways",
            PpmField::ImagePath => "image_path",
            PpmField::Page => "page",
            PpmField::Caption => "caption",
            PpmField::Region => "region",
            PpmField::Insula => "insula",
            PpmField::Doorway => "doorway",
            PpmField::Room => "room",
            PpmField::Volume => "volume",
        }
    }

    pub fn from_editor_key(key: &str) -> Option<Self> {
        match key {
            "translated_text" => Some(PpmField::TranslatedText),
            "location" => Some(PpmField::PhotoArchiveId),
            "other" => Some(PpmField::Material),
            "description" => Some(PpmField::Description),
            "doorways" => Some(PpmField::Doorways),
            "image_path" => Some(PpmField::ImagePath),
            "page" => Some(PpmField::Page),
            "caption" => Some(PpmField::Caption),
            "region" => Some(PpmField::Region),
            "insula" => Some(PpmField::Insula),
            "doorway" => Some(PpmField::Doorway),
            "room" => Some(PpmField::Room),
            "volume" => Some(PpmField::Volume),
            _ => None,
        }
    }
}

/// Free-text values are stored on a single line.
pub fn normalize_value(value: &str) -> String {
    value.replace(['\n', '\r'], " ")
}

/// Changes to one PPP entry submitted from the workspace page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PppWorkspaceUpdate {
    pub uuid: String,
    pub fields: Vec<(PppField, String)>,
    /// New value for the entry's linked ARCs (letter `i`).
    pub arcs: Option<String>,
}

/// Group a workspace form into per-entry updates, in key order.
///
/// Unknown field letters are ignored; keys without a `_` separator are
/// rejected.
pub fn parse_workspace_form(
    form: &BTreeMap<String, String>,
) -> Result<Vec<PppWorkspaceUpdate>, CoreError> {
    let mut updates: Vec<PppWorkspaceUpdate> = Vec::new();

    for (key, value) in form {
        let (uuid, letter) = key
            .rsplit_once('_')
            .filter(|(uuid, _)| !uuid.is_empty())
            .ok_or_else(|| CoreError::Validation(format!("Malformed field key '{key}'")))?;

        let idx = match updates.iter().position(|u| u.uuid == uuid) {
            Some(idx) => idx,
            None => {
                updates.push(PppWorkspaceUpdate {
                    uuid: uuid.to_string(),
                    ..Default::default()
                });
                updates.len() - 1
            }
        };
        let update = &mut updates[idx];
        let value = normalize_value(value);

        if letter == "i" {
            update.arcs = Some(value);
        } else if let Some(field) = PppField::from_workspace_letter(letter) {
            update.fields.push((field, value));
        }
    }

    Ok(updates)
}

/// Pick the recognised fields out of a single-entry editor form.
pub fn editor_fields<F>(
    form: &BTreeMap<String, String>,
    lookup: impl Fn(&str) -> Option<F>,
) -> Vec<(F, String)> {
    form.iter()
        .filter_map(|(key, value)| lookup(key).map(|field| (field, normalize_value(value))))
        .collect()
}
