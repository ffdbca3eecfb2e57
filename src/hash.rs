use ark_ff::PrimeField;
use sha2::{Digest, Sha256};

/// Map a byte string to a scalar: SHA-256, read big-endian, reduced mod r.
pub fn hash_to_scalar<F: PrimeField>(message: impl AsRef<[u8]>) -> F {
    F::from_be_bytes_mod_order(&Sha256::digest(message.as_ref()))
}

/// [`hash_to_scalar`] over a list of messages, preserving order.
pub fn hash_to_scalars<F: PrimeField, M: AsRef<[u8]>>(messages: &[M]) -> Vec<F> {
    messages.iter().map(|m| hash_to_scalar(m)).collect()
}
