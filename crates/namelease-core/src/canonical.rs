//! Canonical CBOR encoding of commitment preimages.
//!
//! A commitment binds `(name, caller, payment, lease_duration)`. The same
//! tuple must produce identical bytes (and thus identical digests) on every
//! platform, so the preimage is written with RFC 8949 Core Deterministic
//! Encoding:
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - Amounts above `u64::MAX` use a tag-2 bignum with no leading zero bytes
//!
//! Layout: `COMMIT_DOMAIN || [text name, bytes caller, uint payment, uint lease_duration]`

use crate::types::{AccountId, Amount, Tick};

/// Domain separator prepended to every commitment preimage.
pub const COMMIT_DOMAIN: &[u8] = b"namelease.commit.v1";

/// Build the bytes hashed into a commitment digest.
pub fn commitment_preimage(
    name: &str,
    caller: &AccountId,
    payment: Amount,
    lease_duration: Tick,
) -> Vec<u8> {
    let mut buf = Vec::with_capacity(COMMIT_DOMAIN.len() + name.len() + 64);
    buf.extend_from_slice(COMMIT_DOMAIN);

    encode_uint(&mut buf, 4, 4);
    encode_text(&mut buf, name);
    encode_bytes(&mut buf, caller.as_bytes());
    encode_amount(&mut buf, payment);
    encode_uint(&mut buf, 0, lease_duration);

    buf
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode an amount: major type 0 when it fits in u64, otherwise tag 2 bignum.
fn encode_amount(buf: &mut Vec<u8>, n: Amount) {
    match u64::try_from(n) {
        Ok(small) => encode_uint(buf, 0, small),
        Err(_) => {
            let be = n.to_be_bytes();
            let first = be.iter().position(|b| *b != 0).unwrap_or(be.len());
            // tag(2)
            buf.push(0xc2);
            encode_bytes(buf, &be[first..]);
        }
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_encoding() {
        let mut buf = Vec::new();

        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 1000);
        assert_eq!(buf, vec![0x19, 0x03, 0xe8]);

        buf.clear();
        encode_uint(&mut buf, 0, 65536);
        assert_eq!(buf, vec![0x1a, 0x00, 0x01, 0x00, 0x00]);
    }

    #[test]
    fn test_amount_bignum_encoding() {
        let mut buf = Vec::new();
        encode_amount(&mut buf, u64::MAX as u128);
        assert_eq!(buf[0], 0x1b);
        assert_eq!(buf.len(), 9);

        buf.clear();
        encode_amount(&mut buf, (u64::MAX as u128) + 1);
        // tag 2, byte string of length 9: 0x01 followed by eight zero bytes
        assert_eq!(buf, vec![0xc2, 0x49, 0x01, 0, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_preimage_layout() {
        let caller = AccountId::from_bytes([0x11; 32]);
        let bytes = commitment_preimage("ab", &caller, 1000, 10);

        let body = &bytes[COMMIT_DOMAIN.len()..];
        assert!(bytes.starts_with(COMMIT_DOMAIN));
        // array(4)
        assert_eq!(body[0], 0x84);
        // text(2) "ab"
        assert_eq!(&body[1..4], &[0x62, b'a', b'b']);
        // bytes(32)
        assert_eq!(&body[4..6], &[0x58, 32]);
        assert_eq!(&body[6..38], &[0x11; 32]);
        // 1000, then 10
        assert_eq!(&body[38..], &[0x19, 0x03, 0xe8, 0x0a]);
    }

    #[test]
    fn test_preimage_binds_every_field() {
        let alice = AccountId::from_bytes([0x01; 32]);
        let bob = AccountId::from_bytes([0x02; 32]);
        let base = commitment_preimage("Friendship", &alice, 1000, 10);

        assert_ne!(base, commitment_preimage("Friendshiq", &alice, 1000, 10));
        assert_ne!(base, commitment_preimage("Friendship", &bob, 1000, 10));
        assert_ne!(base, commitment_preimage("Friendship", &alice, 1001, 10));
        assert_ne!(base, commitment_preimage("Friendship", &alice, 1000, 11));
    }
}
