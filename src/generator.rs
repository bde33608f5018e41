//! Candidate key generation for the two key schemes.
//!
//! Both generators walk a trajectory: derive the key for the current secret
//! (or seed), then bump the secret as a little-endian counter over its
//! interior bytes. The first and last byte are left alone since Curve25519
//! clamping lives there. The driver calls [`CandidateGenerator::reseed`]
//! after every accepted candidate to jump to a fresh random point.

use crate::{sha512, EncodeHex, Score};
use curve25519_dalek::traits::IsIdentity;
use curve25519_dalek::EdwardsPoint;
use rand::{CryptoRng, RngCore};
use std::error::Error;
use std::fmt;
use std::fmt::{Display, Formatter};
use x25519_dalek::{x25519, X25519_BASEPOINT_BYTES};
use zeroize::{Zeroize, Zeroizing};

/// Scalar multiplication produced an unusable point. Never expected for
/// well-formed secrets; the search stops when it happens.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct DerivationError {
    pub scheme: &'static str,
}

impl Display for DerivationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "scalarmult to create {} public key failed", self.scheme)
    }
}

impl Error for DerivationError {}

/// Key material kept for an accepted candidate.
pub trait KeyPayload: Clone + Default + Zeroize + Send {
    const SCHEME: &'static str;

    fn public_key(&self) -> &[u8];

    /// The private half as it should be handed to a node.
    fn private_key(&self) -> Zeroizing<Vec<u8>>;
}

pub trait CandidateGenerator {
    type Payload: KeyPayload;

    /// Derives the candidate at the current position and advances past it.
    fn next_candidate(&mut self) -> Result<(Score, &Self::Payload), DerivationError>;

    /// Drops the current trajectory and starts from fresh random bytes.
    fn reseed(&mut self);
}

/// Increments `buf[1..len - 1]` as a little-endian counter.
///
/// Returns `false` when every interior byte overflowed, i.e. the interior
/// wrapped around to all zeros and the trajectory is used up.
pub fn increment_interior(buf: &mut [u8]) -> bool {
    let len = buf.len();
    if len < 3 {
        return false;
    }
    for b in &mut buf[1..(len - 1)] {
        *b = b.wrapping_add(1);
        if *b != 0 {
            return true;
        }
    }
    false
}

pub fn clamp_curve25519(secret: &mut [u8; 32]) {
    secret[0] &= 248;
    secret[31] &= 127;
    secret[31] |= 64;
}

/// `secret · basepoint` on Curve25519 (Montgomery form).
pub fn curve25519_public(secret: &[u8; 32]) -> Result<[u8; 32], DerivationError> {
    let public = x25519(*secret, X25519_BASEPOINT_BYTES);
    if public == [0_u8; 32] {
        return Err(DerivationError {
            scheme: Curve25519Keys::SCHEME,
        });
    }
    Ok(public)
}

/// `clamp(scalar) · B` on the Edwards curve, compressed.
pub fn ed25519_public(scalar: &[u8; 32]) -> Result<[u8; 32], DerivationError> {
    let point = EdwardsPoint::mul_base_clamped(*scalar);
    if point.is_identity() {
        return Err(DerivationError {
            scheme: Ed25519Keys::SCHEME,
        });
    }
    Ok(point.compress().to_bytes())
}

#[derive(Clone, Default, Eq, PartialEq)]
pub struct Curve25519Keys {
    pub secret: [u8; 32],
    pub public: [u8; 32],
}

impl fmt::Debug for Curve25519Keys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve25519Keys")
            .field("secret", &"..")
            .field("public", &self.public.hex())
            .finish()
    }
}

impl Zeroize for Curve25519Keys {
    fn zeroize(&mut self) {
        self.secret.zeroize();
        self.public.zeroize();
    }
}

impl KeyPayload for Curve25519Keys {
    const SCHEME: &'static str = "curve25519";

    fn public_key(&self) -> &[u8] {
        &self.public
    }

    fn private_key(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(self.secret.to_vec())
    }
}

#[derive(Clone, Eq, PartialEq)]
pub struct Ed25519Keys {
    pub seed: [u8; 32],
    /// First half of `SHA-512(seed)` followed by the public key.
    pub secret: [u8; 64],
}

impl Default for Ed25519Keys {
    fn default() -> Self {
        Self {
            seed: [0_u8; 32],
            secret: [0_u8; 64],
        }
    }
}

impl fmt::Debug for Ed25519Keys {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Keys")
            .field("seed", &"..")
            .field("secret", &"..")
            .field("public", &self.public_key().hex())
            .finish()
    }
}

impl Zeroize for Ed25519Keys {
    fn zeroize(&mut self) {
        self.seed.zeroize();
        self.secret.zeroize();
    }
}

impl KeyPayload for Ed25519Keys {
    const SCHEME: &'static str = "ed25519";

    fn public_key(&self) -> &[u8] {
        &self.secret[32..]
    }

    /// `seed ‖ public`, the usual 64-byte Ed25519 private key encoding.
    fn private_key(&self) -> Zeroizing<Vec<u8>> {
        let mut key = Zeroizing::new(Vec::with_capacity(64));
        key.extend_from_slice(&self.seed);
        key.extend_from_slice(self.public_key());
        key
    }
}

pub struct Curve25519Generator<R> {
    rng: R,
    secret: Zeroizing<[u8; 32]>,
    current: Curve25519Keys,
}

impl<R: RngCore + CryptoRng> Curve25519Generator<R> {
    pub fn new(rng: R) -> Self {
        let mut generator = Self {
            rng,
            secret: Zeroizing::new([0_u8; 32]),
            current: Default::default(),
        };
        generator.reseed();
        generator
    }
}

impl<R: RngCore + CryptoRng> CandidateGenerator for Curve25519Generator<R> {
    type Payload = Curve25519Keys;

    fn next_candidate(&mut self) -> Result<(Score, &Curve25519Keys), DerivationError> {
        let public = curve25519_public(&self.secret)?;
        let score = sha512(&public);
        self.current.secret = *self.secret;
        self.current.public = public;

        if !increment_interior(&mut self.secret[..]) {
            self.reseed();
        }
        Ok((score, &self.current))
    }

    fn reseed(&mut self) {
        self.rng.fill_bytes(&mut self.secret[..]);
        clamp_curve25519(&mut self.secret);
    }
}

impl<R> Curve25519Generator<R> {
    fn wipe(&mut self) {
        self.current.zeroize();
        self.secret.zeroize();
    }
}

impl<R> Drop for Curve25519Generator<R> {
    fn drop(&mut self) {
        self.wipe();
    }
}

pub struct Ed25519Generator<R> {
    rng: R,
    seed: Zeroizing<[u8; 32]>,
    current: Ed25519Keys,
}

impl<R: RngCore + CryptoRng> Ed25519Generator<R> {
    pub fn new(rng: R) -> Self {
        let mut generator = Self {
            rng,
            seed: Zeroizing::new([0_u8; 32]),
            current: Default::default(),
        };
        generator.reseed();
        generator
    }
}

impl<R: RngCore + CryptoRng> CandidateGenerator for Ed25519Generator<R> {
    type Payload = Ed25519Keys;

    fn next_candidate(&mut self) -> Result<(Score, &Ed25519Keys), DerivationError> {
        let expanded = Zeroizing::new(sha512(&self.seed[..]));
        let mut scalar = Zeroizing::new([0_u8; 32]);
        scalar.copy_from_slice(&expanded[..32]);
        let public = ed25519_public(&scalar)?;
        let score = sha512(&public);

        self.current.seed = *self.seed;
        self.current.secret[..32].copy_from_slice(&scalar[..]);
        self.current.secret[32..].copy_from_slice(&public);

        if !increment_interior(&mut self.seed[..]) {
            self.reseed();
        }
        Ok((score, &self.current))
    }

    fn reseed(&mut self) {
        self.rng.fill_bytes(&mut self.seed[..]);
    }
}

impl<R> Ed25519Generator<R> {
    fn wipe(&mut self) {
        self.current.zeroize();
        self.seed.zeroize();
    }
}

impl<R> Drop for Ed25519Generator<R> {
    fn drop(&mut self) {
        self.wipe();
    }
}
