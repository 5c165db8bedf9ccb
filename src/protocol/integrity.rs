//! Optional integrity tags over a question's hidden fields.
//!
//! Without a key the grader trusts whatever the browser echoes back, so a
//! client can rewrite `answer{i}` before submitting. With a key, each
//! question carries a keyed SHA-256 tag and tampered questions are left
//! out of the score.

use sha2::{Digest, Sha256};

use super::HiddenFields;

/// Secret used to tag hidden fields.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self(secret.into())
    }

    /// Hex tag over the three hidden values of one question.
    pub fn sign(&self, text: &str, answer: &str, options: &str) -> String {
        let mut hasher = Sha256::new();
        // Length prefixes keep field boundaries unambiguous.
        for part in [self.0.as_slice(), text.as_bytes(), answer.as_bytes(), options.as_bytes()] {
            hasher.update((part.len() as u64).to_be_bytes());
            hasher.update(part);
        }
        hasher.update(&self.0);
        hex_encode(&hasher.finalize())
    }

    pub fn sign_fields(&self, fields: &HiddenFields) -> String {
        self.sign(&fields.text, &fields.answer, &fields.options)
    }

    pub fn verify(&self, text: &str, answer: &str, options: &str, tag: &str) -> bool {
        let expected = self.sign(text, answer, options);
        expected.len() == tag.len()
            && expected
                .bytes()
                .zip(tag.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey(..)")
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
