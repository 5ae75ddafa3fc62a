/// Sentinel returned when a license string cannot be mapped.
pub const UNKNOWN_LICENSE: &str = "Unknown";

/// Minimum similarity for the fuzzy pass to accept a table key.
const FUZZY_CUTOFF: f32 = 0.70;

/// Lowercase fragment → canonical identifier.
///
/// Order matters: the exact pass returns the first key contained in the input.
/// Full phrases come first, then short fragments; `agpl` and `lgpl` precede
/// `gpl`, and `bsd` precedes `mpl` so "simplified bsd" stays BSD.
pub const NORMALIZATION_MAP: &[(&str, &str)] = &[
    ("the apache software license, version 2.0", "Apache-2.0"),
    ("apache license, version 2.0", "Apache-2.0"),
    ("apache license version 2.0", "Apache-2.0"),
    ("apache license 2.0", "Apache-2.0"),
    ("eclipse public license - v 2.0", "EPL-2.0"),
    ("eclipse public license", "EPL-2.0"),
    ("mozilla public license 2.0", "MPL-2.0"),
    ("gnu lesser general public license v2.1", "LGPL-2.1"),
    ("gnu lesser general public license v3", "LGPL-3.0"),
    ("gnu affero general public license v3", "AGPL-3.0"),
    ("gnu general public license v2", "GPL-2.0"),
    ("gnu general public license v3", "GPL-3.0"),
    ("bsd-2-clause", "BSD-2-Clause"),
    ("bsd 2-clause", "BSD-2-Clause"),
    ("bsd-3-clause", "BSD-3-Clause"),
    ("bsd license", "BSD-3-Clause"),
    ("apache-2.0", "Apache-2.0"),
    ("apache 2", "Apache-2.0"),
    ("python-2.0", "PSF-2.0"),
    ("epl-2.0", "EPL-2.0"),
    ("lgplv2.1", "LGPL-2.1"),
    ("bsd", "BSD-3-Clause"),
    ("mit", "MIT"),
    ("apache", "Apache-2.0"),
    ("agpl", "AGPL-3.0"),
    ("lgpl", "LGPL"),
    ("gpl", "GPL"),
    ("mpl", "MPL-2.0"),
    ("unknown", "Unknown"),
    ("other", "Other"),
    ("psf", "PSF-2.0"),
    ("epl", "EPL-2.0"),
];

/// Map a free-form registry license string to a canonical identifier.
///
/// Returns [`UNKNOWN_LICENSE`] for empty input or when neither the substring
/// pass nor the fuzzy pass finds a table entry. Never fails.
pub fn normalize(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return UNKNOWN_LICENSE.to_string();
    };

    let norm = raw.trim().to_lowercase();
    if norm.is_empty() {
        return UNKNOWN_LICENSE.to_string();
    }

    if let Some((_, canonical)) = NORMALIZATION_MAP.iter().find(|(key, _)| norm.contains(key)) {
        return canonical.to_string();
    }

    closest_key(&norm)
        .map(str::to_string)
        .unwrap_or_else(|| UNKNOWN_LICENSE.to_string())
}

/// Convenience wrapper for call sites holding a plain `&str`.
pub fn normalize_str(raw: &str) -> String {
    normalize(Some(raw))
}

/// Closest table key by `difflib` ratio (2·M/T), accepted at [`FUZZY_CUTOFF`]
/// or above. Ties keep the earlier table entry.
fn closest_key(norm: &str) -> Option<&'static str> {
    let keys: Vec<&str> = NORMALIZATION_MAP.iter().map(|(key, _)| *key).collect();
    let best = difflib::get_close_matches(norm, keys, 1, FUZZY_CUTOFF);
    let key = best.first()?;
    NORMALIZATION_MAP
        .iter()
        .find(|(candidate, _)| candidate == key)
        .map(|(_, canonical)| *canonical)
}
