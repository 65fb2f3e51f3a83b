//! Stepping through catalogue identifiers.
//!
//! The single-entry editors offer a "next" action after saving. PPP uuids
//! are plain integers; PPM ids are `{prefix}_{number}`. Entries created
//! through the editors carry a `new` placeholder id and have no successor.

const NEW_ENTRY_PREFIX: &str = "new";

pub fn is_new_entry(id: &str) -> bool {
    id.starts_with(NEW_ENTRY_PREFIX)
}

/// `"41"` -> `"42"`. `None` when the uuid is not a number or has no
/// representable successor.
pub fn next_ppp_uuid(uuid: &str) -> Option<String> {
    if is_new_entry(uuid) {
        return None;
    }
    let n: u64 = uuid.trim().parse().ok()?;
    n.checked_add(1).map(|next| next.to_string())
}

/// `"PPM_9"` -> `"PPM_10"`. Only the text up to the first `_` is kept as
/// the prefix and only the segment after it is incremented. `None` when
/// that segment overflows.
pub fn next_ppm_id(id: &str) -> Option<String> {
    if is_new_entry(id) {
        return None;
    }
    let mut parts = id.split('_');
    let prefix = parts.next()?;
    let n: u64 = parts.next()?.parse().ok()?;
    let next = n.checked_add(1)?;
    Some(format!("{prefix}_{next}"))
}
