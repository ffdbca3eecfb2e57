//! Pointproofs: vector commitments with constant-size, aggregatable openings.
//!
//! A vector of up to `N` scalars is committed to with a single `G1` element.
//! Each position can be opened with a single `G1` element, any number of
//! openings against the same commitment can be folded into one aggregate
//! proof, and a commitment can be moved to a new vector by touching only the
//! positions that changed.

mod challenge;
mod error;
mod hash;
mod param;
mod vc;

use ark_ec::AffineCurve;
use ark_ec::PairingEngine;
use ark_ec::ProjectiveCurve;
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize, SerializationError};
use ark_std::io::{Read, Write};
pub use error::PointproofError;
pub use error::Result;
pub use hash::hash_to_scalar;
pub use hash::hash_to_scalars;
pub use param::ProverParam;
pub use param::StructuredReferenceString;
pub use param::VerifierParam;

/// A commitment to a vector of at most `N` scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment<E: PairingEngine, const N: usize> {
    commitment: E::G1Projective,
}

/// An opening proof: either for a single position, as produced by
/// [`CommitmentScheme::open`], or for a set of positions, as produced by
/// [`CommitmentScheme::aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Proof<E: PairingEngine, const N: usize> {
    proof: E::G1Projective,
}

pub trait CommitmentScheme: Sized {
    type ProverParam;
    type VerifierParam;
    type MessageUnit;
    type Witness;

    /// Commit to a list of inputs with prover parameters
    fn commit(pp: &Self::ProverParam, inputs: &[Self::MessageUnit]) -> Result<Self>;

    /// Open an input at a given position
    fn open(
        pp: &Self::ProverParam,
        inputs: &[Self::MessageUnit],
        pos: usize,
    ) -> Result<Self::Witness>;

    /// Fold the openings of `inputs` at `positions` into a single witness
    fn aggregate(
        &self,
        positions: &[usize],
        inputs: &[Self::MessageUnit],
        witnesses: &[Self::Witness],
    ) -> Result<Self::Witness>;

    /// Verify that `inputs` sit at `positions` under this commitment
    fn verify(
        &self,
        vp: &Self::VerifierParam,
        positions: &[usize],
        inputs: &[Self::MessageUnit],
        witness: &Self::Witness,
    ) -> Result<bool>;

    /// Replace `old_inputs` by `new_inputs` at `positions`
    fn update(
        &self,
        pp: &Self::ProverParam,
        old_inputs: &[Self::MessageUnit],
        new_inputs: &[Self::MessageUnit],
        positions: &[usize],
    ) -> Result<Self>;
}

macro_rules! impl_g1_serialization {
    ($name: ident, $field: ident) => {
        impl<E: PairingEngine, const N: usize> $name<E, N> {
            /// The underlying group element, in affine form.
            pub fn to_affine(&self) -> E::G1Affine {
                self.$field.into_affine()
            }

            pub fn from_affine(point: E::G1Affine) -> Self {
                Self {
                    $field: point.into_projective(),
                }
            }
        }

        impl<E: PairingEngine, const N: usize> CanonicalSerialize for $name<E, N> {
            fn serialize<W: Write>(&self, writer: W) -> core::result::Result<(), SerializationError> {
                self.$field.into_affine().serialize(writer)
            }

            fn serialized_size(&self) -> usize {
                self.$field.into_affine().serialized_size()
            }

            fn serialize_uncompressed<W: Write>(
                &self,
                writer: W,
            ) -> core::result::Result<(), SerializationError> {
                self.$field.into_affine().serialize_uncompressed(writer)
            }

            fn uncompressed_size(&self) -> usize {
                self.$field.into_affine().uncompressed_size()
            }
        }

        impl<E: PairingEngine, const N: usize> CanonicalDeserialize for $name<E, N> {
            fn deserialize<R: Read>(reader: R) -> core::result::Result<Self, SerializationError> {
                E::G1Affine::deserialize(reader).map(Self::from_affine)
            }

            fn deserialize_uncompressed<R: Read>(
                reader: R,
            ) -> core::result::Result<Self, SerializationError> {
                E::G1Affine::deserialize_uncompressed(reader).map(Self::from_affine)
            }
        }
    };
}

impl_g1_serialization!(Commitment, commitment);
impl_g1_serialization!(Proof, proof);

#[cfg(test)]
mod test {
    use super::*;
    use ark_bls12_381::{Bls12_381, Fr};

    #[test]
    fn test_hello_world_scenario() {
        let mut rng = ark_std::test_rng();
        let srs = StructuredReferenceString::<Bls12_381, 2>::setup(&mut rng).unwrap();
        let pp: ProverParam<Bls12_381, 2> = (&srs).into();
        let vp: VerifierParam<Bls12_381, 2> = (&srs).into();

        let message: Vec<Fr> = hash_to_scalars(&["hello", "world"]);
        let com = Commitment::<Bls12_381, 2>::commit(&pp, &message).unwrap();
        let proof = Commitment::<Bls12_381, 2>::open(&pp, &message, 1).unwrap();
        let agg = com.aggregate(&[1], &message[1..], &[proof]).unwrap();
        assert!(com.verify(&vp, &[1], &message[1..], &agg).unwrap());

        let changed: Vec<Fr> = hash_to_scalars(&["hello", "!"]);
        let com2 = com.update(&pp, &message[1..], &changed[1..], &[1]).unwrap();
        assert_eq!(
            com2,
            Commitment::<Bls12_381, 2>::commit(&pp, &changed).unwrap()
        );

        let proof2 = Commitment::<Bls12_381, 2>::open(&pp, &changed, 1).unwrap();
        let agg2 = com2.aggregate(&[1], &changed[1..], &[proof2]).unwrap();
        assert!(com2.verify(&vp, &[1], &changed[1..], &agg2).unwrap());

        // the stale value no longer opens under the updated commitment
        let stale = com2.aggregate(&[1], &message[1..], &[proof2]).unwrap();
        assert!(!com2.verify(&vp, &[1], &message[1..], &stale).unwrap());
        assert!(!com2.verify(&vp, &[1], &message[1..], &agg2).unwrap());
    }

    #[test]
    fn test_wire_encoding() {
        let mut rng = ark_std::test_rng();
        let srs = StructuredReferenceString::<Bls12_381, 4>::setup(&mut rng).unwrap();
        let pp: ProverParam<Bls12_381, 4> = (&srs).into();
        let message: Vec<Fr> = hash_to_scalars(&["a", "b", "c", "d"]);
        let com = Commitment::<Bls12_381, 4>::commit(&pp, &message).unwrap();
        let proof = Commitment::<Bls12_381, 4>::open(&pp, &message, 2).unwrap();

        let mut bytes = Vec::new();
        com.serialize(&mut bytes).unwrap();
        assert_eq!(bytes.len(), 48);
        assert_eq!(bytes.len(), com.serialized_size());
        let decoded = Commitment::<Bls12_381, 4>::deserialize(&bytes[..]).unwrap();
        assert_eq!(decoded, com);

        let mut bytes = Vec::new();
        proof.serialize_uncompressed(&mut bytes).unwrap();
        assert_eq!(bytes.len(), proof.uncompressed_size());
        let decoded = Proof::<Bls12_381, 4>::deserialize_uncompressed(&bytes[..]).unwrap();
        assert_eq!(decoded, proof);

        assert!(Commitment::<Bls12_381, 4>::deserialize(&[0u8; 3][..]).is_err());
    }
}
