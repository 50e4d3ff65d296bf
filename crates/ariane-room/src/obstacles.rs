//! Fair partition of the obstacle catalog across a room's guides.

use ariane_protocol::ObstacleKind;
use rand::Rng;
use rand::seq::SliceRandom;

/// Splits `catalog` across `guide_count` guides as evenly as integer
/// division allows.
///
/// The catalog is shuffled uniformly (Fisher–Yates), then consumed in
/// order: with `base = K / G` and `extra = K % G`, the first `extra`
/// guides receive `base + 1` entries and the rest receive `base`. Every
/// entry is assigned exactly once and no two slices differ in size by
/// more than 1. With more guides than entries the trailing guides simply
/// receive empty slices.
///
/// Returns one slice per guide, in the same order as the guides were
/// given; empty when `guide_count` is 0 (nobody to assign to).
///
/// Each call reshuffles from scratch — assignments are never patched
/// incrementally.
pub fn partition(
    catalog: &[ObstacleKind],
    guide_count: usize,
    rng: &mut impl Rng,
) -> Vec<Vec<ObstacleKind>> {
    if guide_count == 0 {
        return Vec::new();
    }

    let mut deck = catalog.to_vec();
    deck.shuffle(rng);

    let base = deck.len() / guide_count;
    let extra = deck.len() % guide_count;

    let mut slices = Vec::with_capacity(guide_count);
    let mut cursor = 0;
    for i in 0..guide_count {
        let take = base + usize::from(i < extra);
        slices.push(deck[cursor..cursor + take].to_vec());
        cursor += take;
    }
    slices
}

// =========================================================================
// Tests
// =========================================================================
