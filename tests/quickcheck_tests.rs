use quickcheck::{quickcheck, TestResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use radix_tree::Radix;
use std::collections::BTreeMap;

fn build(pairs: &[(Vec<u8>, u32)]) -> (Radix<u32>, BTreeMap<Vec<u8>, u32>) {
    let mut tree = Radix::new();
    let mut model = BTreeMap::new();
    for (key, value) in pairs {
        if key.is_empty() {
            continue;
        }
        tree.insert(key, *value);
        model.insert(key.clone(), *value);
    }
    (tree, model)
}

/// Every non-root node either holds a value or branches, and fragments line up with keys.
fn well_formed<V>(tree: &Radix<V>) -> bool {
    let mut stack = vec![tree.root()];
    while let Some(node) = stack.pop() {
        if !node.is_root() {
            if node.fragment().is_empty() {
                return false;
            }
            if node.value().is_none() && node.children_len() < 2 {
                return false;
            }
        }
        for child in node.children() {
            if child.parent() != Some(node) {
                return false;
            }
            if child.key().len() != node.key().len() + child.fragment().len() {
                return false;
            }
            stack.push(child);
        }
    }
    true
}

quickcheck! {
    fn round_trip(pairs: Vec<(Vec<u8>, u32)>) -> bool {
        let (tree, model) = build(&pairs);
        tree.len() == model.len()
            && model.iter().all(|(key, value)| {
                let (node, exact) = tree.find(key);
                exact && node.and_then(|n| n.value()) == Some(value)
            })
    }

    fn ordered_iteration_matches_model(pairs: Vec<(Vec<u8>, u32)>) -> bool {
        let (tree, model) = build(&pairs);
        let keys: Vec<Vec<u8>> = tree.iter().map(|node| node.key()).collect();
        let rev: Vec<Vec<u8>> = tree.iter_rev().map(|node| node.key()).collect();
        let expected: Vec<Vec<u8>> = model.keys().cloned().collect();
        let mut expected_rev = expected.clone();
        expected_rev.reverse();
        keys == expected && rev == expected_rev
    }

    fn next_prev_are_inverse(pairs: Vec<(Vec<u8>, u32)>) -> bool {
        let (tree, _) = build(&pairs);
        tree.iter().all(|node| {
            node.next().and_then(|n| n.prev()) == Some(node)
                && node.prev().and_then(|n| n.next()) == Some(node)
        })
    }

    fn find_returns_longest_stored_prefix(pairs: Vec<(Vec<u8>, u32)>, probe: Vec<u8>) -> TestResult {
        if probe.is_empty() {
            return TestResult::discard();
        }
        let (tree, model) = build(&pairs);
        let expected = (1..=probe.len())
            .rev()
            .map(|end| &probe[..end])
            .find(|prefix| model.contains_key(*prefix));

        let (node, exact) = tree.find(&probe);
        let got = node.map(|n| n.key());
        TestResult::from_bool(
            got.as_deref() == expected && exact == (expected == Some(&probe[..])),
        )
    }

    fn remove_matches_model(pairs: Vec<(Vec<u8>, u32)>, removals: Vec<Vec<u8>>) -> bool {
        let (mut tree, mut model) = build(&pairs);
        for key in &removals {
            let removed = tree.remove(key).map(|r| r.value);
            if removed != model.remove(key) {
                return false;
            }
        }
        let keys: Vec<Vec<u8>> = tree.iter().map(|node| node.key()).collect();
        tree.len() == model.len()
            && keys == model.keys().cloned().collect::<Vec<_>>()
            && well_formed(&tree)
    }
}

#[test]
fn test_random_workload() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut tree = Radix::new();
    let mut model = BTreeMap::new();

    for step in 0..5_000u32 {
        // short keys over a tiny alphabet force lots of splits and merges
        let len = rng.gen_range(1..6);
        let key: Vec<u8> = (0..len).map(|_| b"abc."[rng.gen_range(0..4)]).collect();

        if rng.gen_bool(0.6) {
            tree.insert(&key, step);
            model.insert(key, step);
        } else {
            assert_eq!(tree.remove(&key).map(|r| r.value), model.remove(&key));
        }
        assert_eq!(tree.len(), model.len());
    }

    let keys: Vec<Vec<u8>> = tree.iter().map(|node| node.key()).collect();
    assert_eq!(keys, model.keys().cloned().collect::<Vec<_>>());
    assert!(well_formed(&tree));

    for key in model.keys().cloned().collect::<Vec<_>>() {
        tree.remove(&key);
    }
    assert!(tree.is_empty());
    assert_eq!(tree.node_count(), 1);
    assert!(tree.keys().is_empty());
}
