//! Random peer sampling.

use rand::Rng;
use vigil_primitives::PeerSlot;

/// Select up to `sample_size` distinct slots uniformly at random.
///
/// Returns every slot when the peer set is no larger than the sample. The
/// result is sorted by slot.
pub fn select_peers<R: Rng + ?Sized>(
    rng: &mut R,
    peer_set_size: usize,
    sample_size: usize,
) -> Vec<PeerSlot> {
    if peer_set_size <= sample_size {
        return (0..peer_set_size).map(PeerSlot::new).collect();
    }

    let mut slots: Vec<PeerSlot> = rand::seq::index::sample(rng, peer_set_size, sample_size)
        .into_iter()
        .map(PeerSlot::new)
        .collect();
    slots.sort_unstable();
    slots
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_small_peer_set_returns_all() {
        let mut rng = StdRng::seed_from_u64(7);
        let slots = select_peers(&mut rng, 3, 10);
        assert_eq!(slots, vec![PeerSlot::new(0), PeerSlot::new(1), PeerSlot::new(2)]);
    }

    #[test]
    fn test_empty_peer_set() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(select_peers(&mut rng, 0, 10).is_empty());
    }

    proptest! {
        #[test]
        fn test_sample_is_distinct_and_in_range(
            seed in any::<u64>(),
            peers in 0usize..256,
            sample in 0usize..64,
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let slots = select_peers(&mut rng, peers, sample);

            prop_assert_eq!(slots.len(), peers.min(sample));
            prop_assert!(slots.iter().all(|slot| slot.index() < peers));
            prop_assert!(slots.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
