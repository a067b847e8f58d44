//! Process-lifetime signing secret.

use rand::Rng;

const SECRET_LEN: usize = 64;
const SECRET_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Symmetric signing secret generated once at startup.
///
/// 64 characters drawn from a mixed-case alphabetic alphabet, using the
/// OS-seeded CSPRNG. The value lives for the process lifetime, is never
/// persisted or rotated, and is only readable by the token service.
pub struct SigningSecret(String);

impl SigningSecret {
    /// Generate a fresh secret.
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let value: String = (0..SECRET_LEN)
            .map(|_| SECRET_ALPHABET[rng.random_range(0..SECRET_ALPHABET.len())] as char)
            .collect();
        SigningSecret(value)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}
