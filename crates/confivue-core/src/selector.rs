//! Item selection.
//!
//! Selection is a pure function over the catalog and a snapshot of the ids
//! already presented. It picks uniformly at random from the eligible pool:
//! no difficulty targeting and no content balancing across domains.

use std::collections::HashSet;
use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::model::{AgeBand, Item};
use crate::traits::RandomSource;

/// Maximum number of items presented in one session.
pub const DEFAULT_MAX_ITEMS: usize = 8;

/// Outcome of a selection request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection<'a> {
    /// The next item to present.
    Item(&'a Item),
    /// The pool is empty or the session hit its item cap.
    Exhausted,
}

/// Items of the given band that have not been presented yet, in catalog order.
pub fn eligible_pool<'a>(
    catalog: &'a Catalog,
    age_band: AgeBand,
    asked: &HashSet<&str>,
) -> Vec<&'a Item> {
    catalog
        .all()
        .iter()
        .filter(|it| it.age_band == age_band && !asked.contains(it.id.as_str()))
        .collect()
}

/// Choose the next item, or signal exhaustion.
pub fn select_next<'a>(
    catalog: &'a Catalog,
    age_band: AgeBand,
    asked: &HashSet<&str>,
    max_items: usize,
    rng: &dyn RandomSource,
) -> Selection<'a> {
    if asked.len() >= max_items {
        return Selection::Exhausted;
    }
    let pool = eligible_pool(catalog, age_band, asked);
    if pool.is_empty() {
        return Selection::Exhausted;
    }
    Selection::Item(pool[rng.pick(pool.len())])
}

/// [`RandomSource`] backed by `StdRng`.
pub struct SeededRandom {
    rng: Mutex<StdRng>,
}

impl SeededRandom {
    /// Deterministic source: the same seed yields the same picks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for SeededRandom {
    fn pick(&self, len: usize) -> usize {
        // A poisoned lock still holds a usable RNG.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_range(0..len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemFormat;

    /// Always picks the same position, clamped to the pool.
    struct FixedPick(usize);

    impl RandomSource for FixedPick {
        fn pick(&self, len: usize) -> usize {
            self.0.min(len - 1)
        }
    }

    fn item(id: &str, band: AgeBand) -> Item {
        Item {
            id: id.into(),
            age_band: band,
            domain: "resilience".into(),
            format: ItemFormat::Likert,
            stem: format!("stem {id}"),
            options: vec![],
        }
    }

    fn catalog() -> Catalog {
        let mut items = Vec::new();
        for i in 0..10 {
            items.push(item(&format!("c{i}"), AgeBand::Child));
        }
        for i in 0..3 {
            items.push(item(&format!("t{i}"), AgeBand::Teen));
        }
        Catalog::from_items(items).unwrap()
    }

    #[test]
    fn pool_excludes_asked_and_other_bands() {
        let catalog = catalog();
        let asked: HashSet<&str> = ["c0", "c5"].into_iter().collect();
        let pool = eligible_pool(&catalog, AgeBand::Child, &asked);
        assert_eq!(pool.len(), 8);
        assert!(pool.iter().all(|it| it.age_band == AgeBand::Child));
        assert!(pool.iter().all(|it| !asked.contains(it.id.as_str())));
    }

    #[test]
    fn picks_by_position_in_pool() {
        let catalog = catalog();
        let asked: HashSet<&str> = ["t0"].into_iter().collect();
        match select_next(&catalog, AgeBand::Teen, &asked, 8, &FixedPick(1)) {
            Selection::Item(it) => assert_eq!(it.id, "t2"),
            Selection::Exhausted => panic!("expected an item"),
        }
    }

    #[test]
    fn exhausted_when_pool_empty() {
        let catalog = catalog();
        let asked: HashSet<&str> = ["t0", "t1", "t2"].into_iter().collect();
        let selection = select_next(&catalog, AgeBand::Teen, &asked, 8, &FixedPick(0));
        assert_eq!(selection, Selection::Exhausted);

        let none = HashSet::new();
        let selection = select_next(&catalog, AgeBand::EarlyTeen, &none, 8, &FixedPick(0));
        assert_eq!(selection, Selection::Exhausted);
    }

    #[test]
    fn exhausted_at_cap_even_with_items_left() {
        let catalog = catalog();
        let ids: Vec<String> = (0..8).map(|i| format!("c{i}")).collect();
        let asked: HashSet<&str> = ids.iter().map(String::as_str).collect();
        assert_eq!(eligible_pool(&catalog, AgeBand::Child, &asked).len(), 2);
        let selection = select_next(&catalog, AgeBand::Child, &asked, 8, &FixedPick(0));
        assert_eq!(selection, Selection::Exhausted);
    }

    #[test]
    fn never_repeats_or_leaves_band() {
        let catalog = catalog();
        let rng = SeededRandom::from_entropy();
        let mut presented: Vec<String> = Vec::new();
        loop {
            let asked: HashSet<&str> = presented.iter().map(String::as_str).collect();
            match select_next(&catalog, AgeBand::Child, &asked, 8, &rng) {
                Selection::Item(it) => {
                    assert_eq!(it.age_band, AgeBand::Child);
                    assert!(!asked.contains(it.id.as_str()));
                    presented.push(it.id.clone());
                }
                Selection::Exhausted => break,
            }
        }
        assert_eq!(presented.len(), 8);
    }

    #[test]
    fn same_seed_same_sequence() {
        let a = SeededRandom::from_seed(42);
        let b = SeededRandom::from_seed(42);
        let seq_a: Vec<usize> = (0..20).map(|_| a.pick(10)).collect();
        let seq_b: Vec<usize> = (0..20).map(|_| b.pick(10)).collect();
        assert_eq!(seq_a, seq_b);
        assert!(seq_a.iter().all(|&i| i < 10));
    }
}
