//! Printing the kept keys, best first.

use crate::address::{address_for_hash, ipv6_for_hash};
use crate::generator::KeyPayload;
use crate::ranked::RankedSet;
use crate::EncodeHex;
use std::io;
use std::io::Write;

fn column(label: &str, width: usize) -> String {
    format!("{:-^width$}", label, width = width)
}

/// Column ruler matching the widths of [`write_results`] lines.
pub fn header<P: KeyPayload>(ipv6: bool) -> String {
    let addr_width = if ipv6 { 39 } else { 32 };
    let payload = P::default();
    [
        column("addr", addr_width),
        column("secret", payload.private_key().len() * 2),
        column("public", payload.public_key().len() * 2),
    ]
    .join(" ")
}

/// One line per kept key: `<address> <secret> <public>`, lowercase hex.
pub fn write_results<P, W>(out: &mut W, set: &RankedSet<P>, ipv6: bool) -> io::Result<()>
where
    P: KeyPayload,
    W: Write,
{
    for (score, keys) in set.iter_best() {
        let addr = if ipv6 {
            ipv6_for_hash(score).to_string()
        } else {
            address_for_hash(score).hex()
        };
        let secret = keys.private_key();
        writeln!(out, "{} {} {}", addr, secret.hex(), keys.public_key().hex())?;
    }
    out.flush()
}

#[cfg(test)]
mod test {
    use crate::generator::{Curve25519Keys, Ed25519Keys};
    use crate::ranked::RankedSet;
    use crate::report::{header, write_results};
    use crate::sha512;
    use hex_literal::hex;

    fn keys(n: u8) -> Curve25519Keys {
        Curve25519Keys {
            secret: [n; 32],
            public: [n.wrapping_add(0xa0); 32],
        }
    }

    #[test]
    fn best_first() {
        let mut set = RankedSet::new(3);
        for n in [1_u8, 2, 3] {
            let mut score = [0_u8; 64];
            score[0] = 0x10 * n;
            set.offer(&score, &keys(n));
        }
        let mut out = Vec::new();
        write_results(&mut out, &set, false).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines = out.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 3);

        // 0x30 = 0b0011_0000: no leading ones, payload starts at bit 1
        let expected = format!(
            "020060{} {} {}",
            "00".repeat(13),
            "03".repeat(32),
            "a3".repeat(32)
        );
        assert_eq!(lines[0], expected);
        assert!(lines[1].contains(&"02".repeat(32)));
        assert!(lines[2].contains(&"01".repeat(32)));
        assert!(out.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn ipv6_column() {
        let mut set = RankedSet::new(1);
        let score = sha512(b"ipv6");
        set.offer(&score, &keys(7));
        let mut out = Vec::new();
        write_results(&mut out, &set, true).unwrap();
        let out = String::from_utf8(out).unwrap();
        let addr = out.split(' ').next().unwrap();
        assert!(addr.parse::<std::net::Ipv6Addr>().is_ok());
        assert!(addr.starts_with("2"));
    }

    #[test]
    fn ed25519_secret_column() {
        let mut set = RankedSet::new(1);
        let mut keys = Ed25519Keys::default();
        keys.seed = [0x11; 32];
        keys.secret[..32].copy_from_slice(&[0x22; 32]);
        keys.secret[32..].copy_from_slice(&hex!(
            "3333333333333333333333333333333333333333333333333333333333333333"
        ));
        set.offer(&[0xff; 64], &keys);
        let mut out = Vec::new();
        write_results(&mut out, &set, false).unwrap();
        let line = String::from_utf8(out).unwrap();
        let columns = line.trim_end().split(' ').collect::<Vec<_>>();
        assert_eq!(columns[1], "11".repeat(32) + &"33".repeat(32));
        assert_eq!(columns[2], "33".repeat(32));
    }

    #[test]
    fn header_widths() {
        let ruler = header::<Curve25519Keys>(false);
        let widths = ruler.split(' ').map(str::len).collect::<Vec<_>>();
        assert_eq!(widths, vec![32, 64, 64]);
        assert!(ruler.starts_with("--------------addr--------------"));

        let ruler = header::<Ed25519Keys>(true);
        let widths = ruler.split(' ').map(str::len).collect::<Vec<_>>();
        assert_eq!(widths, vec![39, 128, 64]);
    }
}
