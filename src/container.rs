use fixedbitset::FixedBitSet;
use rustc_hash::{FxHashMap, FxHashSet};
use std::fmt::{self, Display};
use std::hash::Hash;

/// Size and overlap queries shared by every container variant.
pub trait SetLike {
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of keys present in both `self` and `other`.
    fn intersection_len(&self, other: &Self) -> usize
    where
        Self: Sized;
}

/// A container used purely for membership: re-inserting a key is a no-op.
pub trait KeySet<K>: SetLike {
    fn insert(&mut self, key: K);

    fn contains(&self, key: &K) -> bool;
}

/// The closed set of container variants under comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    HashSet,
    HashMap,
    SparseObject,
    DenseArray,
    BitTable,
}

impl Variant {
    pub fn label(&self) -> &'static str {
        match self {
            Variant::HashSet => "Set",
            Variant::HashMap => "Map",
            Variant::SparseObject => "Obj",
            Variant::DenseArray => "Array",
            Variant::BitTable => "BitTable",
        }
    }
}

impl Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hash set of keys.
#[derive(Debug, Clone)]
pub struct HashSetKeys<K> {
    keys: FxHashSet<K>,
}

impl<K> Default for HashSetKeys<K> {
    fn default() -> Self {
        Self {
            keys: FxHashSet::default(),
        }
    }
}

impl<K: Hash + Eq> HashSetKeys<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.keys.iter()
    }
}

impl<K: Hash + Eq> SetLike for HashSetKeys<K> {
    fn len(&self) -> usize {
        self.keys.len()
    }

    fn intersection_len(&self, other: &Self) -> usize {
        self.keys.iter().filter(|k| other.keys.contains(*k)).count()
    }
}

impl<K: Hash + Eq> KeySet<K> for HashSetKeys<K> {
    #[inline]
    fn insert(&mut self, key: K) {
        self.keys.insert(key);
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.keys.contains(key)
    }
}

/// Hash map with every key bound to the dummy value 1.
#[derive(Debug, Clone)]
pub struct HashMapKeys<K> {
    entries: FxHashMap<K, u8>,
}

impl<K> Default for HashMapKeys<K> {
    fn default() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }
}

impl<K: Hash + Eq> HashMapKeys<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &K) -> Option<u8> {
        self.entries.get(key).copied()
    }
}

impl<K: Hash + Eq> SetLike for HashMapKeys<K> {
    fn len(&self) -> usize {
        self.entries.len()
    }

    fn intersection_len(&self, other: &Self) -> usize {
        self.entries
            .keys()
            .filter(|k| other.entries.contains_key(*k))
            .count()
    }
}

impl<K: Hash + Eq> KeySet<K> for HashMapKeys<K> {
    #[inline]
    fn insert(&mut self, key: K) {
        self.entries.insert(key, 1);
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }
}

/// Associative array keyed by the string form of each key, the way a plain
/// object is used as a set. `7` and `"7"` name the same property.
///
/// Membership is property existence. The stored value is never consulted, so
/// a falsy dummy such as `0` still counts as present.
#[derive(Debug, Clone)]
pub struct SparseObject<V = u8> {
    props: FxHashMap<String, V>,
    dummy: V,
}

impl Default for SparseObject<u8> {
    fn default() -> Self {
        Self::with_dummy(1)
    }
}

impl SparseObject<u8> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<V: Copy> SparseObject<V> {
    /// An empty object whose `insert` stores `dummy` under each key.
    pub fn with_dummy(dummy: V) -> Self {
        Self {
            props: FxHashMap::default(),
            dummy,
        }
    }

    pub fn set(&mut self, key: impl Display, value: V) {
        self.props.insert(key.to_string(), value);
    }

    pub fn get(&self, property: &str) -> Option<&V> {
        self.props.get(property)
    }

    pub fn has_own(&self, property: &str) -> bool {
        self.props.contains_key(property)
    }

    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.props.keys().map(String::as_str)
    }
}

impl<V> SetLike for SparseObject<V> {
    fn len(&self) -> usize {
        self.props.len()
    }

    fn intersection_len(&self, other: &Self) -> usize {
        self.props
            .keys()
            .filter(|p| other.props.contains_key(p.as_str()))
            .count()
    }
}

impl<K: Display, V: Copy> KeySet<K> for SparseObject<V> {
    #[inline]
    fn insert(&mut self, key: K) {
        self.props.insert(key.to_string(), self.dummy);
    }

    #[inline]
    fn contains(&self, key: &K) -> bool {
        self.has_own(&key.to_string())
    }
}

/// Presence table indexed directly by small integer keys. Grows on insert.
#[derive(Debug, Clone, Default)]
pub struct DenseArray {
    slots: Vec<bool>,
    present: usize,
}

impl DenseArray {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table with every key in `0..population` marked present.
    pub fn filled(population: usize) -> Self {
        Self {
            slots: vec![true; population],
            present: population,
        }
    }

    /// Number of slots, present or not.
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}

impl SetLike for DenseArray {
    fn len(&self) -> usize {
        self.present
    }

    fn intersection_len(&self, other: &Self) -> usize {
        self.slots
            .iter()
            .zip(other.slots.iter())
            .filter(|(a, b)| **a && **b)
            .count()
    }
}

impl KeySet<usize> for DenseArray {
    #[inline]
    fn insert(&mut self, key: usize) {
        if key >= self.slots.len() {
            self.slots.resize(key + 1, false);
        }
        if !self.slots[key] {
            self.slots[key] = true;
            self.present += 1;
        }
    }

    #[inline]
    fn contains(&self, key: &usize) -> bool {
        self.slots.get(*key).copied().unwrap_or(false)
    }
}

/// The dense presence table packed one bit per key.
#[derive(Debug, Clone, Default)]
pub struct BitTable {
    bits: FixedBitSet,
    present: usize,
}

impl BitTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filled(population: usize) -> Self {
        let mut bits = FixedBitSet::with_capacity(population);
        bits.insert_range(..);
        Self {
            bits,
            present: population,
        }
    }
}

impl SetLike for BitTable {
    fn len(&self) -> usize {
        self.present
    }

    fn intersection_len(&self, other: &Self) -> usize {
        self.bits.intersection(&other.bits).count()
    }
}

impl KeySet<usize> for BitTable {
    #[inline]
    fn insert(&mut self, key: usize) {
        if key >= self.bits.len() {
            self.bits.grow(key + 1);
        }
        if !self.bits.put(key) {
            self.present += 1;
        }
    }

    #[inline]
    fn contains(&self, key: &usize) -> bool {
        self.bits.contains(*key)
    }
}
