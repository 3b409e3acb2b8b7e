use fnv::FnvHasher;
use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hash};

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;

/// Map for small keys such as cell coordinates, where fnv beats the default SipHash.
/// Not collision resistant, so never key it on untrusted input.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    FnvHashMap::with_capacity_and_hasher(capacity, Default::default())
}


#[cfg(test)]
mod tests {

    use super::*;
    use crate::cells::CellCoordinate;

    #[test]
    fn presized_map() {
        let mut parents: FnvHashMap<CellCoordinate, CellCoordinate> = fnv_hashmap(16);
        assert!(parents.capacity() >= 16);
        parents.insert(CellCoordinate::new(0, 1), CellCoordinate::new(0, 0));
        assert_eq!(parents.get(&CellCoordinate::new(0, 1)), Some(&CellCoordinate::new(0, 0)));
    }
}
