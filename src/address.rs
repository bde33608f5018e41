//! Overlay-network address and subnet derivation from a key hash.
//!
//! Layout of the 128-bit address:
//!
//! ```text
//! | prefix (8) | leading ones (8) | hash bits after the first zero (112) |
//! ```
//!
//! The leading ones and the first zero bit of the hash are not stored, which
//! is why a hash with more leading ones carries more of itself into the
//! address.

use crate::Score;
use std::net::Ipv6Addr;

pub const ADDRESS_PREFIX: u8 = 0x02;
/// Set in the prefix byte to mark a routed /64 rather than a node address.
pub const SUBNET_FLAG: u8 = 0x01;

pub type Address = [u8; 16];
pub type Subnet = [u8; 8];

const HASH_BITS: usize = 8 * std::mem::size_of::<Score>();

#[inline]
fn bit(hash: &Score, index: usize) -> u8 {
    (hash[index / 8] >> (7 - index % 8)) & 1
}

pub fn leading_ones(hash: &Score) -> usize {
    (0..HASH_BITS).take_while(|&i| bit(hash, i) == 1).count()
}

pub fn address_for_hash(hash: &Score) -> Address {
    let ones = leading_ones(hash);
    let mut addr = [0_u8; 16];
    addr[0] = ADDRESS_PREFIX;
    // stored in one byte and wraps, as the protocol does
    addr[1] = ones as u8;

    let mut index = ones + 1;
    for byte in &mut addr[2..] {
        // only whole bytes are copied; an exhausted hash leaves zeros
        if index + 8 > HASH_BITS {
            break;
        }
        *byte = (0..8).fold(0_u8, |acc, i| (acc << 1) | bit(hash, index + i));
        index += 8;
    }
    addr
}

pub fn subnet_for_hash(hash: &Score) -> Subnet {
    let addr = address_for_hash(hash);
    let mut subnet = [0_u8; 8];
    subnet.copy_from_slice(&addr[..8]);
    subnet[0] |= SUBNET_FLAG;
    subnet
}

pub fn ipv6_for_hash(hash: &Score) -> Ipv6Addr {
    Ipv6Addr::from(address_for_hash(hash))
}

/// Recovers what an address reveals about the hash it came from: the hash
/// with every recoverable bit set, and a mask of those bits.
pub fn node_id_and_mask(addr: &Address) -> (Score, Score) {
    let mut node_id = [0_u8; 64];
    let mut mask = [0_u8; 64];
    let set = |buf: &mut Score, index: usize| buf[index / 8] |= 0x80 >> (index % 8);

    let ones = addr[1] as usize;
    for i in 0..ones {
        set(&mut node_id, i);
    }
    let known = (ones + 1 + 8 * (addr.len() - 2)).min(HASH_BITS);
    for i in 0..known {
        set(&mut mask, i);
    }

    let addr_bits = 8 * (addr.len() - 2);
    for i in 0..addr_bits {
        let index = ones + 1 + i;
        if index >= HASH_BITS {
            break;
        }
        if (addr[2 + i / 8] >> (7 - i % 8)) & 1 == 1 {
            set(&mut node_id, index);
        }
    }
    (node_id, mask)
}
