//! The labeled benchmark suites and the summary lines printed after each run.
//!
//! Every workload re-seeds its own generator on each call, so the outputs it
//! records are identical no matter how many times the harness invokes it.

use crate::builder::{build_collision_set, Duplication};
use crate::config::{HarnessConfig, SuiteConfig};
use crate::container::{BitTable, DenseArray, HashMapKeys, HashSetKeys, KeySet, SparseObject, Variant};
use crate::harness::{Report, Suite};
use crate::presence::presence_check;
use crate::random::SeededRandom;
use crate::similarity::{best_pair, TopPair};
use itertools::Itertools;
use std::cell::Cell;
use tracing::warn;

/// Final container size after `count` draws from `[0, key_range)`.
pub fn collision_workload<C>(seed: u32, count: usize, key_range: usize) -> usize
where
    C: KeySet<usize> + Default,
{
    let mut rnd = SeededRandom::new(seed);
    let set: C = build_collision_set(count, key_range, &mut rnd);
    set.len()
}

/// Best pair over `trials` similarity rounds, from a freshly seeded stream.
pub fn similarity_workload<C>(seed: u32, trials: usize, set_size: usize, key_length: usize) -> Option<TopPair>
where
    C: KeySet<String> + Default,
{
    let mut rnd = SeededRandom::new(seed);
    best_pair::<C, _>(trials, set_size, key_length, &mut rnd)
}

/// Hit count of `queries` lookups against a prebuilt container.
pub fn presence_workload<C>(container: &C, seed: u32, queries: usize, population: usize) -> usize
where
    C: KeySet<usize> + ?Sized,
{
    let mut rnd = SeededRandom::new(seed);
    presence_check(container, &mut rnd, queries, population)
}

#[derive(Debug, Clone)]
pub struct CollisionOutcome {
    pub report: Report,
    /// One bucket per collision rate, sized from the hash-set run.
    pub buckets: Vec<Duplication>,
    /// Whether the sparse-object runs ended at the same sizes.
    pub consistent: bool,
}

impl CollisionOutcome {
    pub fn summary_lines(&self) -> Vec<String> {
        self.buckets
            .iter()
            .map(|b| format!("{} collision: {}% duplication", b.label, b.percent()))
            .collect()
    }
}

pub fn run_collision_suite(config: &SuiteConfig, harness: &HarnessConfig) -> CollisionOutcome {
    let size = config.collision_set_size;
    let seed = config.collision_seed;
    let ranges: Vec<(&str, usize)> = config
        .collision_rates
        .iter()
        .map(|(label, rate)| (*label, config.key_range(*rate)))
        .collect();
    let set_sizes: Vec<Cell<usize>> = ranges.iter().map(|_| Cell::new(0)).collect();
    let obj_sizes: Vec<Cell<usize>> = ranges.iter().map(|_| Cell::new(0)).collect();

    let mut suite = Suite::new("collision");
    for (i, (label, range)) in ranges.iter().copied().enumerate() {
        let obj_out = &obj_sizes[i];
        let set_out = &set_sizes[i];
        suite = suite
            .add(
                format!("{} collision {} (size: {})", label, Variant::SparseObject, size),
                move || obj_out.set(collision_workload::<SparseObject>(seed, size, range)),
            )
            .add(
                format!("{} collision {} (size: {})", label, Variant::HashSet, size),
                move || set_out.set(collision_workload::<HashSetKeys<usize>>(seed, size, range)),
            );
    }
    let report = suite.run(harness);

    let mut consistent = true;
    for (i, (label, _)) in ranges.iter().enumerate() {
        if set_sizes[i].get() != obj_sizes[i].get() {
            warn!(bucket = *label, set = set_sizes[i].get(), obj = obj_sizes[i].get(), "collision sizes differ between variants");
            consistent = false;
        }
    }
    let buckets = ranges
        .iter()
        .zip(set_sizes.iter())
        .map(|((label, _), unique)| Duplication::new(*label, size, unique.get()))
        .collect();

    CollisionOutcome {
        report,
        buckets,
        consistent,
    }
}

#[derive(Debug, Clone)]
pub struct SimilarityOutcome {
    pub report: Report,
    pub top_pairs: Vec<(Variant, Option<TopPair>)>,
    pub consistent: bool,
}

impl SimilarityOutcome {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![self.report.fastest_line()];
        for (variant, top) in &self.top_pairs {
            let at = match top {
                Some(t) => format!("{} ({})", t.index, t.value),
                None => "none".to_string(),
            };
            lines.push(format!("({}) Jaccard top pair at: {}", variant, at));
        }
        lines
    }
}

pub fn run_similarity_suite(config: &SuiteConfig, harness: &HarnessConfig) -> SimilarityOutcome {
    let seed = config.similarity_seed;
    let trials = config.similarity_trials;
    let size = config.similarity_set_size;
    let key_length = config.similarity_key_length;
    let set_top = Cell::new(None);
    let map_top = Cell::new(None);
    let obj_top = Cell::new(None);

    let report = Suite::new("similarity")
        .add("Compute jaccard similarity with Set", || {
            set_top.set(similarity_workload::<HashSetKeys<String>>(seed, trials, size, key_length))
        })
        .add("Compute jaccard similarity with Map", || {
            map_top.set(similarity_workload::<HashMapKeys<String>>(seed, trials, size, key_length))
        })
        .add("Compute jaccard similarity with objects", || {
            obj_top.set(similarity_workload::<SparseObject>(seed, trials, size, key_length))
        })
        .run(harness);

    let top_pairs = vec![
        (Variant::HashSet, set_top.get()),
        (Variant::HashMap, map_top.get()),
        (Variant::SparseObject, obj_top.get()),
    ];
    let consistent = top_pairs.iter().map(|(_, top)| top).all_equal();
    if !consistent {
        warn!(?top_pairs, "top pairs differ between variants");
    }

    SimilarityOutcome {
        report,
        top_pairs,
        consistent,
    }
}

#[derive(Debug, Clone)]
pub struct PresenceOutcome {
    pub report: Report,
    pub hits: Vec<(Variant, usize)>,
    pub consistent: bool,
}

impl PresenceOutcome {
    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![self.report.fastest_line()];
        for (variant, found) in &self.hits {
            let name = match variant {
                Variant::HashSet => "set",
                Variant::HashMap => "map",
                Variant::SparseObject => "object",
                Variant::DenseArray => "array",
                Variant::BitTable => "bit table",
            };
            lines.push(format!("{} found {}", name, found));
        }
        lines
    }
}

pub fn run_presence_suite(config: &SuiteConfig, harness: &HarnessConfig) -> PresenceOutcome {
    let seed = config.presence_seed;
    let population = config.presence_population;
    let queries = config.presence_queries;

    let mut set: HashSetKeys<usize> = HashSetKeys::new();
    let mut object = SparseObject::with_dummy(true);
    for key in 0..population {
        set.insert(key);
        object.insert(key);
    }
    let array = DenseArray::filled(population);
    let bits = BitTable::filled(population);

    let set_found = Cell::new(0);
    let object_found = Cell::new(0);
    let array_found = Cell::new(0);
    let bits_found = Cell::new(0);

    let report = Suite::new("presence")
        .add("set presence check", || {
            set_found.set(presence_workload(&set, seed, queries, population))
        })
        .add("object presence check", || {
            object_found.set(presence_workload(&object, seed, queries, population))
        })
        .add("Array presence check", || {
            array_found.set(presence_workload(&array, seed, queries, population))
        })
        .add("bit table presence check", || {
            bits_found.set(presence_workload(&bits, seed, queries, population))
        })
        .run(harness);

    let hits = vec![
        (Variant::HashSet, set_found.get()),
        (Variant::DenseArray, array_found.get()),
        (Variant::SparseObject, object_found.get()),
        (Variant::BitTable, bits_found.get()),
    ];
    let consistent = hits.iter().map(|(_, n)| n).all_equal();
    if !consistent {
        warn!(?hits, "presence hit counts differ between variants");
    }

    PresenceOutcome {
        report,
        hits,
        consistent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_workload_is_repeatable() {
        let a = collision_workload::<HashSetKeys<usize>>(43, 1000, 500);
        let b = collision_workload::<HashSetKeys<usize>>(43, 1000, 500);
        assert_eq!(a, 422);
        assert_eq!(a, b);
    }

    #[test]
    fn test_collision_suite_summary() {
        let outcome = run_collision_suite(&SuiteConfig::default(), &HarnessConfig::quick());
        assert!(outcome.consistent);
        assert_eq!(outcome.report.results.len(), 8);
        let uniques: Vec<usize> = outcome.buckets.iter().map(|b| b.unique).collect();
        assert_eq!(uniques, vec![422, 632, 850, 952]);
        let lines = outcome.summary_lines();
        assert_eq!(lines[3], "Rare collision: 4.8% duplication");
        assert_eq!(outcome.report.results[0].label, "Huge collision Obj (size: 1000)");
        assert_eq!(outcome.report.results[1].label, "Huge collision Set (size: 1000)");
    }

    #[test]
    fn test_similarity_suite_agrees_across_variants() {
        let outcome = run_similarity_suite(&SuiteConfig::default(), &HarnessConfig::quick());
        assert!(outcome.consistent);
        for (_, top) in &outcome.top_pairs {
            assert_eq!(top.map(|t| t.index), Some(2));
        }
        let lines = outcome.summary_lines();
        assert!(lines[0].starts_with("Fastest is "));
        assert_eq!(lines[1], "(Set) Jaccard top pair at: 2 (0.010101010101010102)");
        assert_eq!(lines[3], "(Obj) Jaccard top pair at: 2 (0.010101010101010102)");
    }

    #[test]
    fn test_presence_suite_finds_every_query() {
        let outcome = run_presence_suite(&SuiteConfig::default(), &HarnessConfig::quick());
        assert!(outcome.consistent);
        assert!(outcome.hits.iter().all(|(_, n)| *n == 1000));
        let lines = outcome.summary_lines();
        assert_eq!(lines[1], "set found 1000");
        assert_eq!(lines[2], "array found 1000");
        assert_eq!(lines[3], "object found 1000");
        assert_eq!(lines[4], "bit table found 1000");
    }
}
