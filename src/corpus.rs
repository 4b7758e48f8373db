use crate::Alphabet;
use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaChaRng,
};

/// Generate `count` uniformly random reads of length `len`.
pub fn random_reads(count: usize, len: usize, alphabet: &Alphabet, seed: u64) -> Vec<Vec<u8>> {
    let mut rng = ChaChaRng::seed_from_u64(seed);
    let sigma = alphabet.len();
    (0..count)
        .map(|_| {
            (0..len)
                .map(|_| alphabet.symbols()[(rng.next_u64() as usize) % sigma])
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn seeded() {
        let a = Alphabet::dna();
        let reads = random_reads(5, 30, &a, 7);
        assert_eq!(reads.len(), 5);
        assert!(reads.iter().all(|r| r.len() == 30 && a.check(r, 30).is_ok()));
        assert_eq!(reads, random_reads(5, 30, &a, 7));
        assert_ne!(reads, random_reads(5, 30, &a, 8));
    }
}
