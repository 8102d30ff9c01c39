//! Input validation utilities

/// Validate the interest ids of an onboarding request
///
/// Returns the ids with repeats dropped, in first-seen order. Ids are kept
/// byte for byte; unknown ids are left for the foreign key check.
pub fn validate_interest_ids(interest_ids: &[String]) -> Result<Vec<String>, String> {
    if interest_ids.is_empty() {
        return Err("interestIds must be a non-empty array".to_string());
    }

    let mut unique: Vec<String> = Vec::with_capacity(interest_ids.len());
    for id in interest_ids {
        if id.is_empty() {
            return Err("interestIds must not contain empty values".to_string());
        }
        if !unique.contains(id) {
            unique.push(id.clone());
        }
    }

    Ok(unique)
}
