//! Carry-over text assembled from linked records.

/// Join PPP translations, each terminated by `"; "`.
pub fn join_with_terminator<I, S>(texts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts.into_iter().fold(String::new(), |mut acc, text| {
        acc.push_str(text.as_ref());
        acc.push_str("; ");
        acc
    })
}

/// Join image captions with `"; "` between them.
pub fn join_captions<I, S>(texts: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    texts
        .into_iter()
        .map(|t| t.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a carry-over selection such as `[101,102, 103]` into uuids.
pub fn parse_selection(raw: &str) -> Vec<String> {
    raw.replace(['[', ']'], "")
        .split(',')
        .map(|s| s.trim().trim_matches('"').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
