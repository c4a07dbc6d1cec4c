//! Collection types used across Trellis.
//!
//! Hash collections use AHash; iteration order is unspecified, so anything
//! that must preserve insertion order uses `indexmap` instead.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_alias_is_ahash_backed() {
        let mut map: HashMap<u32, &str> = HashMap::default();
        map.insert(7, "seven");
        assert_eq!(map.get(&7), Some(&"seven"));
        let _: &RandomState = map.hasher();
    }

    #[test]
    fn set_alias_deduplicates() {
        let set: HashSet<u8> = [1, 1, 2].into_iter().collect();
        assert_eq!(set.len(), 2);
    }
}
