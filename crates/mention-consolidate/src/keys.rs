//! Join-key normalization so superficially different source strings match.

/// Unicode dash variants unified to an ASCII hyphen.
const DASHES: [char; 6] = ['\u{2010}', '\u{2011}', '\u{2012}', '\u{2013}', '\u{2014}', '\u{2015}'];

/// Lowercase, collapse whitespace runs, unify dash variants, trim.
pub fn normalize_key(s: &str) -> String {
    let lowered = s.to_lowercase();
    let dashed: String = lowered
        .chars()
        .map(|c| if DASHES.contains(&c) { '-' } else { c })
        .collect();
    dashed.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalized `(theme, subtheme)` pair.
pub fn pair_key(theme: &str, subtheme: &str) -> (String, String) {
    (normalize_key(theme), normalize_key(subtheme))
}
