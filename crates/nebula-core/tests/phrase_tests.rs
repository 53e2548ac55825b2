// Host-side tests for the non-repeating phrase selector.

use nebula_core::*;
use std::collections::HashSet;

fn pool(k: usize) -> Vec<String> {
    (0..k).map(|i| format!("phrase {i}")).collect()
}

#[test]
fn k_calls_return_k_distinct_phrases() {
    for k in [1usize, 2, 5, 8, 40] {
        let mut sel = PhraseSelector::new(pool(k), 9).unwrap();
        let seen: HashSet<String> = (0..k).map(|_| sel.select().to_string()).collect();
        assert_eq!(seen.len(), k, "pool of {k} repeated within a cycle");
        assert_eq!(sel.remaining(), 0);
    }
}

#[test]
fn cycle_reset_is_transparent() {
    let k = 5;
    let mut sel = PhraseSelector::new(pool(k), 3).unwrap();
    for _ in 0..k {
        sel.select();
    }
    let next = sel.select().to_string();
    assert!(pool(k).contains(&next));
    assert_eq!(sel.cycles(), 1);
    assert_eq!(sel.remaining(), k - 1);
    assert_eq!(sel.selections(), k as u64 + 1);
}

#[test]
fn every_cycle_is_a_permutation() {
    let k = 6;
    let mut sel = PhraseSelector::new(pool(k), 77).unwrap();
    for cycle in 0..20 {
        let seen: HashSet<String> = (0..k).map(|_| sel.select().to_string()).collect();
        assert_eq!(seen.len(), k, "cycle {cycle} repeated a phrase");
    }
}

#[test]
fn single_phrase_pool_always_returns_it() {
    let mut sel = PhraseSelector::new(vec!["only".to_string()], 1).unwrap();
    for _ in 0..5 {
        assert_eq!(sel.select(), "only");
    }
}

#[test]
fn empty_pool_is_rejected() {
    assert!(matches!(
        PhraseSelector::new(Vec::new(), 0),
        Err(ConfigError::EmptyPhrasePool)
    ));
}

#[test]
fn order_varies_between_seeds() {
    let order = |seed| {
        let mut sel = PhraseSelector::new(pool(12), seed).unwrap();
        (0..12).map(|_| sel.select().to_string()).collect::<Vec<_>>()
    };
    assert_eq!(order(5), order(5));
    assert_ne!(order(5), order(6));
}
