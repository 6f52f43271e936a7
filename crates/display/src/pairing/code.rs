//! Random code and token generation.

use rand::seq::IndexedRandom;

/// Characters usable in setup codes and tokens.
///
/// No `1 0 I L O` to avoid confusion when a code is read off a screen.
pub const ALPHABET: &str = "ABCDEFGHJKMNPQRSTUVWXYZ23456789";

/// Length of a human-typeable setup code.
pub const CODE_LENGTH: usize = 4;

/// Length of the opaque token minted at claim time.
pub const TOKEN_LENGTH: usize = 32;

/// Draw `length` independent uniformly-random characters from [`ALPHABET`].
///
/// No uniqueness guarantee; collision avoidance is the caller's
/// responsibility via the single-live-code invariant.
#[must_use]
pub fn random_string(length: usize) -> String {
    let bytes = ALPHABET.as_bytes();
    let mut rng = rand::rng();
    (0..length)
        .map(|_| char::from(*bytes.choose(&mut rng).expect("alphabet is not empty")))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        assert_eq!(random_string(CODE_LENGTH).len(), CODE_LENGTH);
        assert_eq!(random_string(TOKEN_LENGTH).len(), TOKEN_LENGTH);
        assert_eq!(random_string(0).len(), 0);
    }

    #[test]
    fn only_draws_from_alphabet() {
        let generated = random_string(256);
        assert!(generated.chars().all(|c| ALPHABET.contains(c)));
    }

    #[test]
    fn alphabet_has_no_ambiguous_characters() {
        for ambiguous in ['0', '1', 'I', 'L', 'O'] {
            assert!(!ALPHABET.contains(ambiguous));
        }
    }
}
