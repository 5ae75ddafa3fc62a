use crate::models::TrustRating;

const TRUSTED: &[&str] = &["MIT", "APACHE", "BSD", "PSF"];
const CAUTION: &[&str] = &["LGPL", "MPL", "EPL"];
// "UNKNOWN" and "OTHER" live here on purpose: an unresolved license rates Risky.
const RISKY: &[&str] = &["GPL", "AGPL", "UNKNOWN", "OTHER"];

/// Rate a license string (canonical or raw) into a trust tier.
///
/// Tiers are checked in priority order, Trusted then Caution then Risky, by
/// case-insensitive substring containment. The first tier with any keyword
/// present wins, so `"Apache-2.0 / GPL"` is Trusted.
pub fn rate(license: &str) -> TrustRating {
    let upper = license.to_uppercase();
    let contains_any = |keywords: &[&str]| keywords.iter().any(|k| upper.contains(k));

    if contains_any(TRUSTED) {
        TrustRating::Trusted
    } else if contains_any(CAUTION) {
        TrustRating::Caution
    } else if contains_any(RISKY) {
        TrustRating::Risky
    } else {
        TrustRating::Unknown
    }
}
