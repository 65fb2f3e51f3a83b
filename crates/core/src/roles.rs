//! Role names carried in access tokens.

/// Researchers working through ARCs on the workspace pages.
pub const ROLE_RESEARCHER: &str = "researcher";
/// Editors of single PPP and PPM catalogue entries.
pub const ROLE_EDITOR: &str = "editor";
