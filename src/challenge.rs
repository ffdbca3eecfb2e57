//! Fiat-Shamir challenges for proof aggregation.
//!
//! The challenge for the `t`-th claim is
//!
//! ```text
//!   t_t = SHA256( le64(pos_t) || C || le64(pos_0) || .. || le64(pos_{k-1})
//!                             || be(m_0) || .. || be(m_{k-1}) )  mod r
//! ```
//!
//! where `C` is the compressed affine encoding of the commitment and `be(m)`
//! the big-endian canonical encoding of a scalar. The aggregator and the
//! verifier must agree on every byte of this layout.

use crate::error::Result;
use ark_ec::PairingEngine;
use ark_ec::ProjectiveCurve;
use ark_ff::{BigInteger, PrimeField};
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

#[cfg(feature = "parallel")]
use rayon::iter::IntoParallelRefIterator;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

/// The part of the hashed transcript shared by every claim of one aggregation.
pub(crate) struct ChallengeContext {
    suffix: Vec<u8>,
}

impl ChallengeContext {
    pub(crate) fn new<E: PairingEngine>(
        commitment: &E::G1Projective,
        positions: &[usize],
        inputs: &[E::Fr],
    ) -> Result<Self> {
        let commitment = commitment.into_affine();
        let mut suffix = Vec::with_capacity(
            commitment.serialized_size() + 8 * positions.len() + 32 * inputs.len(),
        );
        commitment.serialize(&mut suffix)?;
        for &pos in positions {
            suffix.extend_from_slice(&(pos as u64).to_le_bytes());
        }
        for input in inputs {
            suffix.extend_from_slice(&input.into_repr().to_bytes_be());
        }
        Ok(Self { suffix })
    }

    /// The challenge bound to the claim at `pos`.
    pub(crate) fn challenge<F: PrimeField>(&self, pos: usize) -> F {
        let digest = Sha256::new()
            .chain_update((pos as u64).to_le_bytes())
            .chain_update(&self.suffix)
            .finalize();
        F::from_be_bytes_mod_order(&digest)
    }

    /// One challenge per position, in order.
    pub(crate) fn challenges<F: PrimeField>(&self, positions: &[usize]) -> Vec<F> {
        ark_std::cfg_iter!(positions)
            .map(|&pos| self.challenge(pos))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ark_bn254::{Bn254, Fr, G1Projective};
    use ark_std::test_rng;
    use ark_std::UniformRand;

    #[test]
    fn test_challenge_matches_flat_transcript() {
        let mut rng = test_rng();
        let commitment = G1Projective::rand(&mut rng);
        let positions = [3usize, 0, 7];
        let inputs: Vec<Fr> = (0..3).map(|_| Fr::rand(&mut rng)).collect();

        let ctx = ChallengeContext::new::<Bn254>(&commitment, &positions, &inputs).unwrap();
        let challenges: Vec<Fr> = ctx.challenges(&positions);

        for (&pos, challenge) in positions.iter().zip(challenges.iter()) {
            let mut transcript = Vec::new();
            transcript.extend_from_slice(&(pos as u64).to_le_bytes());
            commitment
                .into_affine()
                .serialize(&mut transcript)
                .unwrap();
            for &p in positions.iter() {
                transcript.extend_from_slice(&(p as u64).to_le_bytes());
            }
            for m in inputs.iter() {
                transcript.extend_from_slice(&m.into_repr().to_bytes_be());
            }
            let expected = Fr::from_be_bytes_mod_order(&Sha256::digest(&transcript));
            assert_eq!(*challenge, expected);
        }
    }

    #[test]
    fn test_challenge_binds_context() {
        let mut rng = test_rng();
        let commitment = G1Projective::rand(&mut rng);
        let other_commitment = G1Projective::rand(&mut rng);
        let inputs: Vec<Fr> = (0..2).map(|_| Fr::rand(&mut rng)).collect();

        let base: Fr = ChallengeContext::new::<Bn254>(&commitment, &[1, 2], &inputs)
            .unwrap()
            .challenge(1);

        let swapped: Fr = ChallengeContext::new::<Bn254>(&commitment, &[2, 1], &inputs)
            .unwrap()
            .challenge(1);
        let recommitted: Fr = ChallengeContext::new::<Bn254>(&other_commitment, &[1, 2], &inputs)
            .unwrap()
            .challenge(1);
        let mut tampered = inputs.clone();
        tampered[1] += Fr::from(1u64);
        let retyped: Fr = ChallengeContext::new::<Bn254>(&commitment, &[1, 2], &tampered)
            .unwrap()
            .challenge(1);

        assert_ne!(base, swapped);
        assert_ne!(base, recommitted);
        assert_ne!(base, retyped);
    }
}
