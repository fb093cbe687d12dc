//! Synthetic packet generation.
//!
//! One packet per tick, drawn from mode-specific templates so the network
//! log visually corroborates the active attack. Packet ids are opaque
//! tokens with no uniqueness guarantee beyond a v4 UUID; timestamps are
//! wall-clock local time.

use chrono::Local;
use rand::Rng;
use rand::seq::IndexedRandom;
use uuid::Uuid;

use super::snapshot::{AttackKind, Packet};

/// Spoofed-looking private sources used for the SYN flood.
const DDOS_SOURCES: [&str; 4] = ["192.168.1.105", "192.168.1.106", "10.5.0.2", "172.16.8.99"];

/// Benign sources for normal traffic.
const BENIGN_SOURCES: [&str; 3] = ["192.168.1.5", "10.0.0.8", "172.16.0.4"];

/// Protocol pool for normal traffic.
const BENIGN_PROTOS: [&str; 4] = ["TCP", "UDP", "TLSv1.3", "HTTP/2"];

/// Mining-pool-shaped endpoint for stratum traffic.
const MINER_POOL_ENDPOINT: &str = "84.12.33.1:4444";

const HEX_CHARS: &[u8] = b"0123456789ABCDEF";

fn random_hex_chars<R: Rng>(rng: &mut R, count: usize) -> String {
    (0..count)
        .map(|_| {
            let idx = rng.random_range(0..HEX_CHARS.len());
            HEX_CHARS[idx] as char
        })
        .collect()
}

fn local_timestamp() -> String {
    Local::now().format("%H:%M:%S").to_string()
}

/// Generates this tick's packet for the given attack mode.
///
/// Ransomware has no dedicated network signature and falls through to the
/// benign template along with idle mode.
#[must_use]
pub fn generate<R: Rng>(rng: &mut R, attack: Option<AttackKind>) -> Packet {
    match attack {
        Some(AttackKind::Ddos) => Packet {
            id: Uuid::new_v4().to_string(),
            timestamp: local_timestamp(),
            src: (*DDOS_SOURCES.choose(rng).unwrap_or(&DDOS_SOURCES[0])).to_string(),
            dst: "SERVER:80".to_string(),
            proto: "TCP_SYN".to_string(),
            hex: format!("FLOOD {}", random_hex_chars(rng, 8)),
            flag: Some("Suspicious".to_string()),
        },
        Some(AttackKind::Cryptominer) => Packet {
            id: Uuid::new_v4().to_string(),
            timestamp: local_timestamp(),
            src: "192.168.1.5".to_string(),
            dst: MINER_POOL_ENDPOINT.to_string(),
            proto: "STRATUM".to_string(),
            hex: format!("JOB_ID {}", random_hex_chars(rng, 6)),
            flag: Some("Outbound".to_string()),
        },
        Some(AttackKind::Ransomware) | None => {
            let hex = (0..8)
                .map(|_| format!("{:02X}", rng.random::<u8>()))
                .collect::<Vec<_>>()
                .join(" ");
            Packet {
                id: Uuid::new_v4().to_string(),
                timestamp: local_timestamp(),
                src: (*BENIGN_SOURCES.choose(rng).unwrap_or(&BENIGN_SOURCES[0])).to_string(),
                dst: "SERVER".to_string(),
                proto: (*BENIGN_PROTOS.choose(rng).unwrap_or(&BENIGN_PROTOS[0])).to_string(),
                hex,
                flag: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(11)
    }

    #[test]
    fn ddos_packet_shape() {
        let mut rng = rng();
        for _ in 0..50 {
            let packet = generate(&mut rng, Some(AttackKind::Ddos));
            assert!(DDOS_SOURCES.contains(&packet.src.as_str()));
            assert_eq!(packet.dst, "SERVER:80");
            assert_eq!(packet.proto, "TCP_SYN");
            assert!(packet.hex.starts_with("FLOOD "));
            assert_eq!(packet.hex.len(), "FLOOD ".len() + 8);
            assert_eq!(packet.flag.as_deref(), Some("Suspicious"));
        }
    }

    #[test]
    fn cryptominer_packet_shape() {
        let mut rng = rng();
        let packet = generate(&mut rng, Some(AttackKind::Cryptominer));
        assert_eq!(packet.src, "192.168.1.5");
        assert_eq!(packet.dst, "84.12.33.1:4444");
        assert_eq!(packet.proto, "STRATUM");
        assert!(packet.hex.starts_with("JOB_ID "));
        assert_eq!(packet.hex.len(), "JOB_ID ".len() + 6);
        assert_eq!(packet.flag.as_deref(), Some("Outbound"));
    }

    #[test]
    fn benign_packet_shape() {
        let mut rng = rng();
        for attack in [None, Some(AttackKind::Ransomware)] {
            let packet = generate(&mut rng, attack);
            assert!(BENIGN_SOURCES.contains(&packet.src.as_str()));
            assert_eq!(packet.dst, "SERVER");
            assert!(BENIGN_PROTOS.contains(&packet.proto.as_str()));
            assert!(packet.flag.is_none());
            // Eight two-digit uppercase hex pairs separated by spaces.
            let pairs: Vec<&str> = packet.hex.split(' ').collect();
            assert_eq!(pairs.len(), 8);
            for pair in pairs {
                assert_eq!(pair.len(), 2);
                assert!(pair.chars().all(|c| c.is_ascii_hexdigit()));
                assert_eq!(pair, pair.to_uppercase());
            }
        }
    }

    #[test]
    fn ids_are_distinct_across_ticks() {
        let mut rng = rng();
        let a = generate(&mut rng, None);
        let b = generate(&mut rng, None);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn hex_chars_are_uppercase_hex() {
        let mut rng = rng();
        let chars = random_hex_chars(&mut rng, 64);
        assert!(chars.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
    }
}
