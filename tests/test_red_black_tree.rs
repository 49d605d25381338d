use rand::Rng;
use rb_collections::red_black_tree::{Cursor, Error, RedBlackMap, RedBlackMultiset, RedBlackSet};
use simplelog::{Config, LevelFilter, TestLogger};
use std::collections::BTreeMap;
use std::vec::Vec;

const NUM_OF_OPERATIONS: usize = 10_000;

fn init_logger() {
    TestLogger::init(LevelFilter::Debug, Config::default()).ok();
}

#[test]
fn int_test_red_black_map() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut map = RedBlackMap::new();
    let mut expected = BTreeMap::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 5_000u32);
        let val = rng.gen::<u64>();

        let (cursor, inserted) = map.insert_or_assign(key, val);
        assert_eq!(inserted, expected.insert(key, val).is_none());
        assert_eq!(map.entry_at(cursor), Some((&key, &val)));
    }

    assert_eq!(map.len(), expected.len());
    assert_eq!(
        map.iter().collect::<Vec<(&u32, &u64)>>(),
        expected.iter().collect::<Vec<(&u32, &u64)>>(),
    );

    let mut keys: Vec<u32> = expected.keys().cloned().collect();
    rng.shuffle(&mut keys);

    for key in keys {
        assert_eq!(map.at(&key), Ok(&expected[&key]));
        assert_eq!(map.remove(&key), expected.remove(&key).map(|val| (key, val)));
        assert!(!map.contains_key(&key));
        assert_eq!(map.at(&key), Err(Error::KeyNotFound));
    }
    assert!(map.is_empty());
}

#[test]
fn int_test_red_black_set() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 2_000u32);
        let inserted = set.insert(key).1;
        match expected.binary_search(&key) {
            Ok(_) => assert!(!inserted),
            Err(index) => {
                assert!(inserted);
                expected.insert(index, key);
            },
        }

        if rng.gen_range(0, 4) == 0 {
            let key = rng.gen_range(0, 2_000u32);
            let removed = expected.binary_search(&key).ok().map(|index| expected.remove(index));
            assert_eq!(set.remove(&key), removed);
        }
    }

    assert_eq!(set.len(), expected.len());
    assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), expected);
    assert_eq!(
        set.iter().rev().cloned().collect::<Vec<u32>>(),
        expected.iter().rev().cloned().collect::<Vec<u32>>(),
    );

    for key in 0..2_000u32 {
        let index = match expected.binary_search(&key) {
            Ok(index) | Err(index) => index,
        };
        assert_eq!(set.value_at(set.lower_bound(&key)), expected.get(index));
        assert_eq!(set.contains(&key), expected.binary_search(&key).is_ok());
    }
}

#[test]
fn int_test_red_black_multiset() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut multiset = RedBlackMultiset::new();
    let mut expected = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 500u32);
        multiset.insert(key);
        expected.push(key);

        if rng.gen_range(0, 3) == 0 {
            let index = rng.gen_range(0, expected.len());
            let key = expected.swap_remove(index);
            assert_eq!(multiset.remove(&key), Some(key));
        }
    }

    expected.sort();
    assert_eq!(multiset.len(), expected.len());
    assert_eq!(multiset.iter().cloned().collect::<Vec<u32>>(), expected);

    for key in 0..500u32 {
        let count = expected.iter().filter(|other| **other == key).count();
        assert_eq!(multiset.count(&key), count);

        let (lower, upper) = multiset.equal_range(&key);
        assert_eq!(multiset.range_iter(lower, upper).count(), count);
        assert!(multiset.range_iter(lower, upper).all(|other| *other == key));
    }
}

#[test]
fn int_test_cursor_stability() {
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut multiset = RedBlackMultiset::with_chunk_size(64);
    let mut cursors: Vec<(Cursor, u32)> = (0..2_000)
        .map(|_| {
            let key = rng.gen_range(0, 100u32);
            (multiset.insert(key), key)
        })
        .collect();

    rng.shuffle(&mut cursors);
    let (erased, kept) = cursors.split_at(1_000);

    for &(cursor, key) in erased {
        assert_eq!(multiset.erase(cursor), Ok(key));
    }
    for &(cursor, key) in kept {
        assert_eq!(multiset.value_at(cursor), Some(&key));
    }
    for &(cursor, _) in kept {
        assert!(multiset.erase(cursor).is_ok());
    }
    assert!(multiset.is_empty());
}

#[test]
fn int_test_merge() {
    init_logger();
    let mut a: RedBlackSet<u32> = vec![1, 3, 5].into_iter().collect();
    let mut b: RedBlackSet<u32> = vec![2, 3, 4].into_iter().collect();
    let five = a.find(&5);
    let three = a.find(&3);

    b.merge(&mut a);

    assert_eq!(b.iter().collect::<Vec<&u32>>(), vec![&1, &2, &3, &4, &5]);
    assert_eq!(a.iter().collect::<Vec<&u32>>(), vec![&3]);
    assert_eq!(b.count(&3), 1);
    assert_eq!(a.value_at(three), Some(&3));

    // the slots freed by the merge are reused by these inserts
    a.insert(6);
    a.insert(7);
    assert!(!five.is_end());
    assert_eq!(a.value_at(five), None);
    assert_eq!(a.erase(five), Err(Error::InvalidCursor));
    assert_eq!(b.value_at(five), None);
    assert_eq!(b.erase(five), Err(Error::InvalidCursor));
    assert_eq!(a.iter().collect::<Vec<&u32>>(), vec![&3, &6, &7]);
    assert_eq!(b.len(), 5);
}

#[test]
fn int_test_stale_and_foreign_cursors() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let mut set = RedBlackSet::with_chunk_size(16);
    let mut other = RedBlackSet::with_chunk_size(16);
    let mut stale = Vec::new();
    let mut foreign = Vec::new();

    for _ in 0..NUM_OF_OPERATIONS {
        let key = rng.gen_range(0, 200u32);
        let (cursor, inserted) = set.insert(key);
        if inserted && rng.gen_range(0, 2) == 0 {
            assert_eq!(set.erase(cursor), Ok(key));
            stale.push(cursor);
        }
        if let (cursor, true) = other.insert(key) {
            foreign.push(cursor);
        }
    }

    let expected: Vec<u32> = set.iter().cloned().collect();
    for &cursor in stale.iter().chain(foreign.iter()) {
        assert_eq!(set.value_at(cursor), None);
        assert_eq!(set.erase(cursor), Err(Error::InvalidCursor));
        assert!(set.next(cursor).is_end());
    }
    assert_eq!(set.iter().cloned().collect::<Vec<u32>>(), expected);
    for &cursor in &foreign {
        assert!(other.value_at(cursor).is_some());
    }
}

#[test]
fn int_test_clone_independence() {
    init_logger();
    let mut rng: rand::XorShiftRng = rand::SeedableRng::from_seed([1, 1, 1, 1]);
    let map: RedBlackMap<u32, u32> = (0..1_000).map(|_| (rng.gen_range(0, 2_000), rng.gen())).collect();
    let mut copy = map.clone();
    assert_eq!(copy, map);

    let keys: Vec<u32> = copy.keys().cloned().collect();
    for key in keys.iter().step_by(2) {
        copy.remove(key);
    }
    assert_eq!(copy.len(), map.len() - (keys.len() + 1) / 2);
    for key in &keys {
        assert!(map.contains_key(key));
    }

    copy.clone_from(&map);
    assert_eq!(copy, map);
    copy.clear();
    assert!(copy.is_empty());
    assert_eq!(map.len(), keys.len());
}
