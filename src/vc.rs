use crate::challenge::ChallengeContext;
use crate::error::{check_positions, check_same_len, PointproofError, Result};
use crate::param::ProverParam;
use crate::param::VerifierParam;
use crate::Commitment;
use crate::CommitmentScheme;
use crate::Proof;
use ark_ec::msm::VariableBaseMSM;
use ark_ec::AffineCurve;
use ark_ec::PairingEngine;
use ark_ec::ProjectiveCurve;
use ark_ff::{Field, One, PrimeField};
use ark_std::{end_timer, start_timer};
use std::ops::Neg;

#[cfg(feature = "parallel")]
use rayon::iter::IndexedParallelIterator;
#[cfg(feature = "parallel")]
use rayon::iter::IntoParallelRefIterator;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

impl<E: PairingEngine, const N: usize> CommitmentScheme for Commitment<E, N> {
    type ProverParam = ProverParam<E, N>;
    type VerifierParam = VerifierParam<E, N>;
    type MessageUnit = E::Fr;
    type Witness = Proof<E, N>;

    /// Commit to a list of inputs with prover parameters
    ///
    /// `C = sum_j m_j * alpha^{j+1} * G`
    fn commit(pp: &Self::ProverParam, inputs: &[Self::MessageUnit]) -> Result<Self> {
        check_message_len::<N>(inputs.len())?;
        let commit_time = start_timer!(|| format!("Committing to {} messages", inputs.len()));

        let scalars = convert_to_bigints(inputs);
        let commitment = VariableBaseMSM::multi_scalar_mul(&pp.g_low[..inputs.len()], &scalars);

        end_timer!(commit_time);
        Ok(Self { commitment })
    }

    /// Open an input at a given position
    ///
    /// `pi_i = sum_{j != i} m_j * alpha^{n+1-i+j} * G`
    fn open(
        pp: &Self::ProverParam,
        inputs: &[Self::MessageUnit],
        pos: usize,
    ) -> Result<Self::Witness> {
        check_message_len::<N>(inputs.len())?;
        check_positions(&[pos], inputs.len())?;
        let open_time = start_timer!(|| format!("Opening position {} of {}", pos, inputs.len()));

        let bases = pp.shifted_bases(pos, inputs.len());
        let scalars: Vec<_> = inputs[..pos]
            .iter()
            .chain(inputs[pos + 1..].iter())
            .map(|x| x.into_repr())
            .collect();
        let proof = VariableBaseMSM::multi_scalar_mul(&bases, &scalars);

        end_timer!(open_time);
        Ok(Proof { proof })
    }

    /// Fold single-position witnesses into one
    ///
    /// `pi = sum_t t_t * pi_t`, with `t_t` the Fiat-Shamir challenge for
    /// position `t` over this commitment and the full claim set.
    fn aggregate(
        &self,
        positions: &[usize],
        inputs: &[Self::MessageUnit],
        witnesses: &[Self::Witness],
    ) -> Result<Self::Witness> {
        check_same_len(positions.len(), inputs.len())?;
        check_same_len(positions.len(), witnesses.len())?;
        let agg_time = start_timer!(|| format!("Aggregating {} proofs", witnesses.len()));

        let ctx = ChallengeContext::new::<E>(&self.commitment, positions, inputs)?;
        let challenges = convert_to_bigints(&ctx.challenges::<E::Fr>(positions));
        let proofs: Vec<E::G1Projective> = witnesses.iter().map(|w| w.proof).collect();
        let proofs = E::G1Projective::batch_normalization_into_affine(&proofs);
        let proof = VariableBaseMSM::multi_scalar_mul(&proofs, &challenges);

        end_timer!(agg_time);
        Ok(Proof { proof })
    }

    /// Verify an aggregated witness for `inputs` at `positions`
    ///
    /// Accepts iff
    /// `e(C, sum_t t_t * alpha^{n-i_t} * H) == e(pi, H) * prod_t T^{m_t * t_t}`
    /// with `T = e(G, H)^{alpha^{n+1}}`.
    fn verify(
        &self,
        vp: &Self::VerifierParam,
        positions: &[usize],
        inputs: &[Self::MessageUnit],
        witness: &Self::Witness,
    ) -> Result<bool> {
        check_same_len(positions.len(), inputs.len())?;
        check_positions(positions, N)?;
        let verify_time = start_timer!(|| format!("Verifying {} positions", positions.len()));

        let ctx = ChallengeContext::new::<E>(&self.commitment, positions, inputs)?;
        let challenges = ctx.challenges::<E::Fr>(positions);

        let h_bases: Vec<E::G2Affine> = positions.iter().map(|&pos| vp.h[N - 1 - pos]).collect();
        let h_sum = VariableBaseMSM::multi_scalar_mul(&h_bases, &convert_to_bigints(&challenges));

        let gt_time = start_timer!(|| "Accumulating target group terms");
        #[cfg(not(feature = "parallel"))]
        let rhs = inputs
            .iter()
            .zip(challenges.iter())
            .map(|(m, t)| vp.t.pow((*m * t).into_repr()))
            .fold(E::Fqk::one(), |acc, term| acc * term);
        #[cfg(feature = "parallel")]
        let rhs = inputs
            .par_iter()
            .zip(challenges.par_iter())
            .map(|(m, t)| vp.t.pow((*m * t).into_repr()))
            .reduce(E::Fqk::one, |acc, term| acc * term);
        end_timer!(gt_time);

        // e(pi, H) * e(-C, h_sum) * rhs == 1
        let pairing_prod_inputs = vec![
            (
                witness.proof.into_affine().into(),
                E::G2Affine::prime_subgroup_generator().into(),
            ),
            (
                self.commitment.neg().into_affine().into(),
                h_sum.into_affine().into(),
            ),
        ];
        let res = E::product_of_pairings(pairing_prod_inputs.iter()) * rhs == E::Fqk::one();

        end_timer!(verify_time);
        Ok(res)
    }

    /// Move the commitment to a vector where `old_inputs` at `positions` are
    /// replaced by `new_inputs`
    ///
    /// `C' = C + sum_t (m'_t - m_t) * alpha^{i_t+1} * G`
    fn update(
        &self,
        pp: &Self::ProverParam,
        old_inputs: &[Self::MessageUnit],
        new_inputs: &[Self::MessageUnit],
        positions: &[usize],
    ) -> Result<Self> {
        check_same_len(old_inputs.len(), new_inputs.len())?;
        check_same_len(old_inputs.len(), positions.len())?;
        check_positions(positions, N)?;
        let update_time = start_timer!(|| format!("Updating {} positions", positions.len()));

        let bases: Vec<E::G1Affine> = positions.iter().map(|&pos| pp.g_low[pos]).collect();
        let deltas: Vec<_> = new_inputs
            .iter()
            .zip(old_inputs.iter())
            .map(|(new, old)| (*new - old).into_repr())
            .collect();
        let commitment = self.commitment + VariableBaseMSM::multi_scalar_mul(&bases, &deltas);

        end_timer!(update_time);
        Ok(Self { commitment })
    }
}

fn check_message_len<const N: usize>(len: usize) -> Result<()> {
    if len > N {
        return Err(PointproofError::MessageTooLong { len, dim: N });
    }
    Ok(())
}

fn convert_to_bigints<F: PrimeField>(p: &[F]) -> Vec<F::BigInt> {
    ark_std::cfg_iter!(p).map(|s| s.into_repr()).collect()
}
