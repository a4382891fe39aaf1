use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Result, SurveyError};

const PASSWORD_CONTEXT: &str = "surveymonkey 2026-01 survey owner password v1";

/// Salted digest of a survey owner's password.
///
/// The plaintext never leaves `hash`/`verify`; only the salt and the blake3
/// derive-key digest are persisted with the survey document.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordCredential {
    salt: String,
    digest: String,
}

impl std::fmt::Debug for PasswordCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordCredential").finish_non_exhaustive()
    }
}

impl PasswordCredential {
    #[must_use]
    pub fn hash(password: &str) -> Self {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = derive(&salt, password).to_hex().to_string();
        Self { salt, digest }
    }

    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        let Ok(expected) = blake3::Hash::from_hex(&self.digest) else {
            return false;
        };
        // `blake3::Hash` equality is constant time.
        derive(&self.salt, password) == expected
    }

    pub(crate) fn validate_plaintext(password: &str) -> Result<()> {
        if password.is_empty() {
            return Err(SurveyError::Validation(
                "survey password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn derive(salt: &str, password: &str) -> blake3::Hash {
    let mut hasher = blake3::Hasher::new_derive_key(PASSWORD_CONTEXT);
    hasher.update(salt.as_bytes());
    hasher.update(&[0]);
    hasher.update(password.as_bytes());
    hasher.finalize()
}
