use crate::error::{PointproofError, Result};
use ark_ec::AffineCurve;
use ark_ec::PairingEngine;
use ark_ec::ProjectiveCurve;
use ark_std::rand::Rng;
use ark_std::UniformRand;
use ark_std::{end_timer, start_timer};
use core::cmp::Ordering;
use zeroize::Zeroizing;

#[cfg(feature = "parallel")]
use rayon::iter::IntoParallelRefIterator;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

/// A StructuredReferenceString contains four components:
/// - g_low  = \[ alpha * G,       alpha^2 * G,     \dots, alpha^n * G \]
/// - g_high = \[ alpha^{n+2} * G, alpha^{n+3} * G, \dots, alpha^{2n} * G \]
/// - h      = \[ alpha * H,       alpha^2 * H,     \dots, alpha^n * H \]
/// - t      = e(alpha * G, alpha^n * H) = e(G, H)^{alpha^{n+1}}
///
/// Read as one sequence `P1 = g_low || _ || g_high`, entry `k` of `P1` is
/// `alpha^{k+1} * G`. Slot `n` of that sequence, `alpha^{n+1} * G`, has no
/// storage at all: knowing it would let anyone forge openings, so it only
/// ever exists inside the target group as `t`.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredReferenceString<E: PairingEngine, const N: usize> {
    g_low: Vec<E::G1Affine>,
    g_high: Vec<E::G1Affine>,
    h: Vec<E::G2Affine>,
    t: E::Fqk,
}

impl<E: PairingEngine, const N: usize> StructuredReferenceString<E, N> {
    /// Sample a fresh trapdoor `alpha` from `rng` and derive the public
    /// parameters from it. The trapdoor and its powers are wiped before this
    /// returns, on success and on error alike.
    pub fn setup<R: Rng>(rng: &mut R) -> Result<Self> {
        if N == 0 {
            return Err(PointproofError::ZeroDimension);
        }
        let setup_time = start_timer!(|| format!("Generating parameters for dimension {}", N));

        let alpha = Zeroizing::new(E::Fr::rand(rng));
        let mut power = Zeroizing::new(*alpha);
        let mut low_powers = Zeroizing::new(Vec::<E::Fr>::with_capacity(N));
        let mut high_powers = Zeroizing::new(Vec::<E::Fr>::with_capacity(N - 1));

        // alpha^1 .. alpha^n
        for _ in 0..N {
            low_powers.push(*power);
            *power *= *alpha;
        }
        // step over alpha^{n+1}
        *power *= *alpha;
        // alpha^{n+2} .. alpha^{2n}
        for _ in N + 1..N << 1 {
            high_powers.push(*power);
            *power *= *alpha;
        }

        let g = E::G1Affine::prime_subgroup_generator();
        let h = E::G2Affine::prime_subgroup_generator();

        let g1_time = start_timer!(|| "Computing powers in G1");
        let g_low = scale_generator(g, &low_powers);
        let g_high = scale_generator(g, &high_powers);
        end_timer!(g1_time);

        let g2_time = start_timer!(|| "Computing powers in G2");
        let h = scale_generator(h, &low_powers);
        end_timer!(g2_time);

        let t = E::pairing(g_low[0], h[N - 1]);

        end_timer!(setup_time);
        Ok(Self {
            g_low,
            g_high,
            h,
            t,
        })
    }

    /// The maximum vector length these parameters support.
    pub const fn dimension() -> usize {
        N
    }

    /// `P1[k] = alpha^{k+1} * G`, for `k` in `[0, 2n) \ {n}`.
    ///
    /// Returns `None` for the diagonal slot `k == n` and for `k >= 2n`.
    pub fn g1_power(&self, k: usize) -> Option<&E::G1Affine> {
        match k.cmp(&N) {
            Ordering::Less => self.g_low.get(k),
            Ordering::Equal => None,
            Ordering::Greater => self.g_high.get(k - N - 1),
        }
    }

    /// `P2[k] = alpha^{k+1} * H`, for `k` in `[0, n)`.
    pub fn g2_power(&self, k: usize) -> Option<&E::G2Affine> {
        self.h.get(k)
    }

    /// `e(G, H)^{alpha^{n+1}}`, computed as `e(P1[0], P2[n-1])`.
    pub fn diagonal(&self) -> &E::Fqk {
        &self.t
    }
}

fn scale_generator<G: AffineCurve>(generator: G, exponents: &[G::ScalarField]) -> Vec<G> {
    let powers: Vec<G::Projective> = ark_std::cfg_iter!(exponents)
        .map(|&exponent| generator.mul(exponent))
        .collect();
    G::Projective::batch_normalization_into_affine(&powers)
}

/// The part of the parameters used to commit, open and update.
#[derive(Debug, Clone, PartialEq)]
pub struct ProverParam<E: PairingEngine, const N: usize> {
    pub(crate) g_low: Vec<E::G1Affine>,
    pub(crate) g_high: Vec<E::G1Affine>,
}

impl<E: PairingEngine, const N: usize> ProverParam<E, N> {
    /// Bases `P1[n - pos + j]` for every `j != pos` in `0..len`, ordered by `j`.
    ///
    /// Requires `pos < len <= n`; under that bound the indices cover
    /// `[n - pos, n - pos + len)` minus the diagonal, which the two halves
    /// already leave out.
    pub(crate) fn shifted_bases(&self, pos: usize, len: usize) -> Vec<E::G1Affine> {
        debug_assert!(pos < len && len <= N);
        let mut bases = Vec::with_capacity(len - 1);
        bases.extend_from_slice(&self.g_low[N - pos..]);
        bases.extend_from_slice(&self.g_high[..len - pos - 1]);
        bases
    }
}

impl<E: PairingEngine, const N: usize> From<&StructuredReferenceString<E, N>>
    for ProverParam<E, N>
{
    fn from(srs: &StructuredReferenceString<E, N>) -> Self {
        Self {
            g_low: srs.g_low.clone(),
            g_high: srs.g_high.clone(),
        }
    }
}

/// The part of the parameters used to verify aggregated proofs.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifierParam<E: PairingEngine, const N: usize> {
    pub(crate) h: Vec<E::G2Affine>,
    pub(crate) t: E::Fqk,
}

impl<E: PairingEngine, const N: usize> From<&StructuredReferenceString<E, N>>
    for VerifierParam<E, N>
{
    fn from(srs: &StructuredReferenceString<E, N>) -> Self {
        Self {
            h: srs.h.clone(),
            t: srs.t,
        }
    }
}
