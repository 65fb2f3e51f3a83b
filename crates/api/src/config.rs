use std::path::PathBuf;

use palp_core::tracker::TrackerLayout;

use crate::auth::jwt::JwtConfig;

const DEFAULT_TRACKER_SPREADSHEET_ID: &str = "1F4nXX1QoyV1miaRUop2ctm8snDyov6GNu9aLt9t3a3M";
const DEFAULT_TRACKER_RANGE: &str = "Workflow_Tracking!A3:S87078";
const DEFAULT_VOCABULARY_SPREADSHEET_ID: &str = "1kzWEh3v5sEJYARxYVikHdinfKIxbstYhP4HjFTh_dw4";
const DEFAULT_VOCABULARY_RANGE: &str = "Old Vocabulary (v4) with links!A2:H";
const DEFAULT_DESCRIPTION_TEMPLATE_ID: &str = "13M3sk4RAOy2Jlq86ECdwR8m11MsOaUNF1unbP6yQF-g";
const DEFAULT_DESCRIPTION_FOLDER_ID: &str = "1G_ZH-20qmxudaymDXMPe0wT4w_C_r00Q";
const DEFAULT_BOX_PPM_FOLDER_ID: &str = "138198238999";

/// Login for one of the two workspace realms.
#[derive(Debug, Clone)]
pub struct Account {
    pub username: String,
    /// Argon2id PHC string.
    pub password_hash: String,
}

/// A spreadsheet and the A1 range read from it.
#[derive(Debug, Clone)]
pub struct SheetRange {
    pub spreadsheet_id: String,
    pub range: String,
}

/// Where per-ARC description sheets are created and who may edit them.
#[derive(Debug, Clone)]
pub struct DescriptionSheets {
    pub template_id: String,
    pub folder_id: String,
    /// Granted write access on every new sheet.
    pub editors: Vec<String>,
    /// Receives ownership of every new sheet, if set.
    pub owner: Option<String>,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    pub jwt: JwtConfig,
    pub researcher: Account,
    pub editor: Account,
    pub google_service_account_file: PathBuf,
    pub box_config_file: PathBuf,
    pub tracker: SheetRange,
    /// Sheet name and first row of the tracker range, for cell writes.
    pub tracker_layout: TrackerLayout,
    pub vocabulary: SheetRange,
    pub descriptions: DescriptionSheets,
    pub box_ppm_folder_id: String,
    /// Thumbnail cache directory, served at `/static/images`.
    pub thumbnail_dir: PathBuf,
    pub luna_base_url: String,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn required(name: &str) -> String {
    let value = std::env::var(name).unwrap_or_else(|_| panic!("{name} must be set"));
    assert!(!value.trim().is_empty(), "{name} must not be empty");
    value
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                                  |
    /// |-------------------------------|------------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                                |
    /// | `PORT`                        | `3000`                                   |
    /// | `CORS_ORIGINS`                | `http://localhost:5173`                  |
    /// | `REQUEST_TIMEOUT_SECS`        | `60`                                     |
    /// | `WORKSPACE_USERNAME`          | **required**                             |
    /// | `WORKSPACE_PASSWORD_HASH`     | **required**                             |
    /// | `EDITOR_USERNAME`             | **required**                             |
    /// | `EDITOR_PASSWORD_HASH`        | **required**                             |
    /// | `GOOGLE_SERVICE_ACCOUNT_FILE` | `service-account.json`                   |
    /// | `BOX_CONFIG_FILE`             | `box_config.json`                        |
    /// | `TRACKER_SPREADSHEET_ID`      | workflow tracker                         |
    /// | `TRACKER_RANGE`               | `Workflow_Tracking!A3:S87078`            |
    /// | `VOCABULARY_SPREADSHEET_ID`   | vocabulary sheet                         |
    /// | `VOCABULARY_RANGE`            | `Old Vocabulary (v4) with links!A2:H`    |
    /// | `DESCRIPTION_TEMPLATE_ID`     | description template                     |
    /// | `DESCRIPTION_FOLDER_ID`       | description folder                       |
    /// | `DESCRIPTION_EDITORS`         | empty                                    |
    /// | `DESCRIPTION_OWNER`           | unset                                    |
    /// | `BOX_PPM_FOLDER_ID`           | `138198238999`                           |
    /// | `THUMBNAIL_DIR`               | `static/images`                          |
    /// | `LUNA_BASE_URL`               | Luna search endpoint                     |
    ///
    /// `JWT_SECRET` and `JWT_EXPIRY_MINS` are read by [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on missing required variables and malformed values.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_list(&env_or("CORS_ORIGINS", "http://localhost:5173"));

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "60")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let researcher = Account {
            username: required("WORKSPACE_USERNAME"),
            password_hash: required("WORKSPACE_PASSWORD_HASH"),
        };
        let editor = Account {
            username: required("EDITOR_USERNAME"),
            password_hash: required("EDITOR_PASSWORD_HASH"),
        };

        let tracker = SheetRange {
            spreadsheet_id: env_or("TRACKER_SPREADSHEET_ID", DEFAULT_TRACKER_SPREADSHEET_ID),
            range: env_or("TRACKER_RANGE", DEFAULT_TRACKER_RANGE),
        };
        let tracker_layout = TrackerLayout::from_range(&tracker.range)
            .expect("TRACKER_RANGE must look like Sheet!A3:S100");

        let vocabulary = SheetRange {
            spreadsheet_id: env_or("VOCABULARY_SPREADSHEET_ID", DEFAULT_VOCABULARY_SPREADSHEET_ID),
            range: env_or("VOCABULARY_RANGE", DEFAULT_VOCABULARY_RANGE),
        };

        let owner = env_or("DESCRIPTION_OWNER", "");
        let descriptions = DescriptionSheets {
            template_id: env_or("DESCRIPTION_TEMPLATE_ID", DEFAULT_DESCRIPTION_TEMPLATE_ID),
            folder_id: env_or("DESCRIPTION_FOLDER_ID", DEFAULT_DESCRIPTION_FOLDER_ID),
            editors: parse_list(&env_or("DESCRIPTION_EDITORS", "")),
            owner: (!owner.trim().is_empty()).then(|| owner.trim().to_string()),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            jwt: JwtConfig::from_env(),
            researcher,
            editor,
            google_service_account_file: env_or(
                "GOOGLE_SERVICE_ACCOUNT_FILE",
                "service-account.json",
            )
            .into(),
            box_config_file: env_or("BOX_CONFIG_FILE", "box_config.json").into(),
            tracker,
            tracker_layout,
            vocabulary,
            descriptions,
            box_ppm_folder_id: env_or("BOX_PPM_FOLDER_ID", DEFAULT_BOX_PPM_FOLDER_ID),
            thumbnail_dir: env_or("THUMBNAIL_DIR", "static/images").into(),
            luna_base_url: env_or("LUNA_BASE_URL", palp_external::luna::DEFAULT_BASE_URL),
        }
    }
}
