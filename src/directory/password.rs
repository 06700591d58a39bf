//! Random password generation

use rand::rngs::OsRng;
use rand::seq::SliceRandom;
use rand::Rng;

const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const NUMERICS: &[u8] = b"0123456789";

/// Generate a password with exact counts per character class
///
/// Characters come from the OS CSPRNG and are shuffled, so class order does
/// not leak into the result.
pub fn generate_password(lowercase: usize, uppercase: usize, numerics: usize) -> String {
    let mut rng = OsRng;
    let mut chars: Vec<char> = Vec::with_capacity(lowercase + uppercase + numerics);

    for (set, count) in [(LOWERCASE, lowercase), (UPPERCASE, uppercase), (NUMERICS, numerics)] {
        chars.extend((0..count).map(|_| char::from(set[rng.gen_range(0..set.len())])));
    }

    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}
