//! Determinism seed
//!
//! A SHA-256 digest over everything that identifies a recommendation request.
//! Identical inputs produce the identical seed across runs and machines.

use drape_core::{AppearanceSignature, BodySignature, Error, Result};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const SEPARATOR: u8 = 0x1f;

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeterminismSeed([u8; 32]);

impl DeterminismSeed {
    /// Derive the seed for one request.
    ///
    /// Parts are joined with the ASCII unit separator. Signatures enter as
    /// their JSON form, absent values as the empty string.
    pub fn derive(
        user_id: &str,
        ruleset_version: &str,
        template_id: &str,
        determinism_key: Option<&str>,
        appearance: Option<&AppearanceSignature>,
        body: Option<&BodySignature>,
    ) -> Result<Self> {
        let appearance = appearance.map(serde_json::to_string).transpose()?;
        let body = body.map(serde_json::to_string).transpose()?;

        let parts = [
            user_id,
            ruleset_version,
            template_id,
            determinism_key.unwrap_or_default(),
            appearance.as_deref().unwrap_or_default(),
            body.as_deref().unwrap_or_default(),
        ];

        let mut hasher = Sha256::new();
        for (i, part) in parts.iter().enumerate() {
            if i > 0 {
                hasher.update([SEPARATOR]);
            }
            hasher.update(part.as_bytes());
        }
        Ok(Self(hasher.finalize().into()))
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{b:02x}")).collect()
    }

    /// Low 32 bits of the digest, read big-endian
    pub fn as_u32(&self) -> u32 {
        u32::from_be_bytes([self.0[28], self.0[29], self.0[30], self.0[31]])
    }

    /// Stable ordering key for an item combination under this seed
    pub fn tie_key<'a>(&self, item_ids: impl IntoIterator<Item = &'a str>) -> u64 {
        let mut hasher = Sha256::new();
        hasher.update(self.0);
        for id in item_ids {
            hasher.update([SEPARATOR]);
            hasher.update(id.as_bytes());
        }
        let digest = hasher.finalize();
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        u64::from_be_bytes(head)
    }
}

impl fmt::Display for DeterminismSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for DeterminismSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeterminismSeed({})", self.to_hex())
    }
}

impl FromStr for DeterminismSeed {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidInput(format!("invalid determinism seed: '{s}'"));
        if s.len() != 64 || !s.is_ascii() {
            return Err(invalid());
        }
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16).map_err(|_| invalid())?;
        }
        Ok(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drape_core::ColorLch;

    #[test]
    fn test_same_inputs_same_seed() {
        let a = DeterminismSeed::derive("u1", "ruleset-2025-06", "casual_day", Some("k"), None, None)
            .unwrap();
        let b = DeterminismSeed::derive("u1", "ruleset-2025-06", "casual_day", Some("k"), None, None)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_hex().len(), 64);
        assert_eq!(a.as_u32(), b.as_u32());
    }

    #[test]
    fn test_every_part_matters() {
        let base = DeterminismSeed::derive("u1", "r", "t", Some("k"), None, None).unwrap();
        let variants = [
            DeterminismSeed::derive("u2", "r", "t", Some("k"), None, None).unwrap(),
            DeterminismSeed::derive("u1", "r2", "t", Some("k"), None, None).unwrap(),
            DeterminismSeed::derive("u1", "r", "t2", Some("k"), None, None).unwrap(),
            DeterminismSeed::derive("u1", "r", "t", None, None, None).unwrap(),
        ];
        for v in variants {
            assert_ne!(base, v);
        }

        let appearance = AppearanceSignature::with_skin(ColorLch::new(55.0, 20.0, 40.0).unwrap());
        let with_appearance =
            DeterminismSeed::derive("u1", "r", "t", Some("k"), Some(&appearance), None).unwrap();
        assert_ne!(base, with_appearance);

        let body = BodySignature::default();
        let with_body = DeterminismSeed::derive("u1", "r", "t", Some("k"), None, Some(&body)).unwrap();
        assert_ne!(base, with_body);
    }

    #[test]
    fn test_separator_prevents_concatenation_collisions() {
        let a = DeterminismSeed::derive("ab", "c", "t", None, None, None).unwrap();
        let b = DeterminismSeed::derive("a", "bc", "t", None, None, None).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_hex_round_trip() {
        let seed = DeterminismSeed::derive("u1", "r", "t", None, None, None).unwrap();
        let parsed: DeterminismSeed = seed.to_hex().parse().unwrap();
        assert_eq!(parsed, seed);
        assert!("xyz".parse::<DeterminismSeed>().is_err());
    }

    #[test]
    fn test_as_u32_reads_low_bytes() {
        let mut bytes = [0u8; 32];
        bytes[31] = 0x01;
        bytes[28] = 0x80;
        assert_eq!(DeterminismSeed::from_bytes(bytes).as_u32(), 0x8000_0001);
    }

    #[test]
    fn test_tie_key_depends_on_seed_and_items() {
        let a = DeterminismSeed::from_bytes([1u8; 32]);
        let b = DeterminismSeed::from_bytes([2u8; 32]);
        assert_eq!(a.tie_key(["x", "y"]), a.tie_key(["x", "y"]));
        assert_ne!(a.tie_key(["x", "y"]), b.tie_key(["x", "y"]));
        assert_ne!(a.tie_key(["x", "y"]), a.tie_key(["x", "z"]));
    }
}
