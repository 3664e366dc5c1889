use crate::container::KeySet;
use crate::key::generate_key;
use crate::random::RandomSource;
use serde::Serialize;

/// Draws `count` integers in `[0, key_range)` into a fresh container.
/// A `key_range` below `count` forces duplicate draws.
pub fn build_collision_set<C, R>(count: usize, key_range: usize, rnd: &mut R) -> C
where
    C: KeySet<usize> + Default,
    R: RandomSource + ?Sized,
{
    let mut set = C::default();
    for _ in 0..count {
        set.insert(rnd.next(key_range));
    }
    set
}

/// Draws `count` random string keys of `key_length` into a fresh container.
pub fn build_key_set<C, R>(count: usize, key_length: usize, rnd: &mut R) -> C
where
    C: KeySet<String> + Default,
    R: RandomSource + ?Sized,
{
    let mut set = C::default();
    for _ in 0..count {
        set.insert(generate_key(key_length, rnd));
    }
    set
}

/// How many of `count` draws collapsed into an existing key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Duplication {
    pub label: String,
    pub count: usize,
    pub unique: usize,
}

impl Duplication {
    pub fn new(label: impl Into<String>, count: usize, unique: usize) -> Self {
        Self {
            label: label.into(),
            count,
            unique,
        }
    }

    /// `(count - unique) / count`, or 0 when nothing was drawn.
    pub fn rate(&self) -> f64 {
        if self.count == 0 {
            return 0.0;
        }
        self.count.saturating_sub(self.unique) as f64 / self.count as f64
    }

    pub fn percent(&self) -> f64 {
        self.rate() * 100.0
    }
}
