use std::collections::HashMap;

use crate::models::LicenseRecord;

/// Collapse records that share a key (`group:artifact`, else `name`).
///
/// The first record for a key is kept unless it is `"Unknown"` and a later
/// duplicate has a known license; a known license is never replaced. Output
/// follows the order in which keys first appeared.
pub fn dedupe(records: Vec<LicenseRecord>) -> Vec<LicenseRecord> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<LicenseRecord> = Vec::new();

    for record in records {
        let key = record.key();
        match slots.get(&key) {
            None => {
                slots.insert(key, unique.len());
                unique.push(record);
            }
            Some(&idx) => {
                if !unique[idx].has_known_license() && record.has_known_license() {
                    unique[idx] = record;
                }
            }
        }
    }

    unique
}
