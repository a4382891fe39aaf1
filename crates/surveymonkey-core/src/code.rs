use uuid::Uuid;

pub(crate) const DEFAULT_CODE_LENGTH: usize = 12;
pub(crate) const MIN_CODE_LENGTH: usize = 6;
pub(crate) const MAX_CODE_LENGTH: usize = 32;

/// Random lowercase-hex survey code drawn from a v4 uuid.
pub(crate) fn generate_survey_code(length: usize) -> String {
    let length = length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);
    let mut code = Uuid::new_v4().simple().to_string();
    code.truncate(length);
    code
}

pub(crate) fn generate_question_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_respect_clamped_length() {
        assert_eq!(generate_survey_code(DEFAULT_CODE_LENGTH).len(), 12);
        assert_eq!(generate_survey_code(1).len(), MIN_CODE_LENGTH);
        assert_eq!(generate_survey_code(500).len(), MAX_CODE_LENGTH);
    }

    #[test]
    fn codes_are_url_safe_and_distinct() {
        let codes: HashSet<String> = (0..256)
            .map(|_| generate_survey_code(DEFAULT_CODE_LENGTH))
            .collect();
        assert_eq!(codes.len(), 256);
        assert!(
            codes
                .iter()
                .all(|code| code.chars().all(|c| c.is_ascii_hexdigit()))
        );
    }
}
