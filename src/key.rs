use crate::random::RandomSource;

pub const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

/// Generates a key of `length` lowercase letters, one draw per character.
pub fn generate_key<R: RandomSource + ?Sized>(length: usize, rnd: &mut R) -> String {
    let mut key = String::with_capacity(length);
    for _ in 0..length {
        key.push(ALPHABET[rnd.next(ALPHABET.len())] as char);
    }
    key
}
