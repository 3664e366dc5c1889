use crate::container::KeySet;
use crate::random::RandomSource;

/// Issues `queries` lookups of keys drawn from `[0, population)` and returns
/// how many were members.
pub fn presence_check<C, R>(container: &C, rnd: &mut R, queries: usize, population: usize) -> usize
where
    C: KeySet<usize> + ?Sized,
    R: RandomSource + ?Sized,
{
    let mut found = 0;
    for _ in 0..queries {
        if container.contains(&rnd.next(population)) {
            found += 1;
        }
    }
    found
}

/// Builds a container with every key in `0..population` present.
pub fn populate<C: KeySet<usize> + Default>(population: usize) -> C {
    let mut c = C::default();
    for key in 0..population {
        c.insert(key);
    }
    c
}
