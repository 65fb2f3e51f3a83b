pub mod associated;
pub mod auth;
pub mod descriptions;
pub mod editor_ppm;
pub mod editor_ppp;
pub mod ppp;
pub mod tracker;
pub mod vocabulary;
pub mod workspace;

/// Shown when an editor lookup matches nothing.
pub(crate) fn missing_entry(kind: &str, value: &str) -> String {
    format!("You searched for {kind} {value}. That doesn't exist - please add an entry or try again.")
}

/// A query parameter that is present and not blank.
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
