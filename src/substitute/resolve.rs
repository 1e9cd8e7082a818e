//! Tiered variable resolution.
//!
//! A placeholder is resolved against an [`EnvStore`] in three tiers, first
//! hit wins:
//!
//! 1. **Direct**: `PREFIX + normalize(name)`.
//! 2. **Encoded**: `PREFIX + "HEX_" + HEX(name)`, where `HEX` is the uppercase
//!    hex encoding of the raw name's bytes. The stored value is itself hex
//!    and is decoded before use. This lets callers reach names that collide
//!    or vanish under normalization, and supply values that are awkward to
//!    put in the environment verbatim.
//! 3. **Default**: the placeholder's default text, possibly empty.
//!
//! A stored empty string counts as absent in both lookup tiers.

use super::key::normalize_bytes;
use crate::env::EnvStore;
use tracing::{debug, trace, warn};

/// Infix between the prefix and the hex-encoded name in the encoded tier.
const HEX_INFIX: &str = "HEX_";

/// Which tier produced a resolved value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Direct,
    Encoded,
    Default,
}

/// Resolves placeholder names under a fixed prefix.
#[derive(Debug, Clone)]
pub struct Resolver<E> {
    prefix: String,
    store: E,
}

impl<E: EnvStore> Resolver<E> {
    pub fn new(prefix: impl Into<String>, store: E) -> Self {
        Self {
            prefix: prefix.into(),
            store,
        }
    }

    /// The key queried by the direct tier.
    pub fn direct_key(&self, raw_name: impl AsRef<[u8]>) -> String {
        format!("{}{}", self.prefix, normalize_bytes(raw_name.as_ref()))
    }

    /// The key queried by the encoded tier.
    pub fn encoded_key(&self, raw_name: impl AsRef<[u8]>) -> String {
        format!(
            "{}{}{}",
            self.prefix,
            HEX_INFIX,
            hex::encode_upper(raw_name.as_ref())
        )
    }

    /// Resolve `raw_name`, falling back to `default`. Never fails.
    pub fn resolve(&self, raw_name: &str, default: &str) -> String {
        self.resolve_with_tier(raw_name, default).0
    }

    /// Like [`Resolver::resolve`], also reporting which tier answered.
    ///
    /// Decoded bytes from the encoded tier that are not valid UTF-8 are
    /// converted lossily.
    pub fn resolve_with_tier(&self, raw_name: &str, default: &str) -> (String, Tier) {
        let (value, tier) = self.resolve_bytes_with_tier(raw_name.as_bytes(), default.as_bytes());
        (String::from_utf8_lossy(&value).into_owned(), tier)
    }

    /// Resolve a name taken from raw input bytes. Decoded values are
    /// returned byte for byte.
    pub fn resolve_bytes(&self, raw_name: &[u8], default: &[u8]) -> Vec<u8> {
        self.resolve_bytes_with_tier(raw_name, default).0
    }

    fn resolve_bytes_with_tier(&self, raw_name: &[u8], default: &[u8]) -> (Vec<u8>, Tier) {
        let (value, tier) = self.lookup(raw_name, default);
        debug!(
            prefix = %self.prefix,
            placeholder = %String::from_utf8_lossy(raw_name),
            default = %String::from_utf8_lossy(default),
            tier = ?tier,
            result = %String::from_utf8_lossy(&value),
            "resolved placeholder"
        );
        (value, tier)
    }

    fn lookup(&self, raw_name: &[u8], default: &[u8]) -> (Vec<u8>, Tier) {
        // An empty name would query the bare prefix; treat it as a miss.
        if raw_name.is_empty() {
            debug!("empty placeholder name, using default");
            return (default.to_vec(), Tier::Default);
        }

        let direct_key = self.direct_key(raw_name);
        trace!(original = %String::from_utf8_lossy(raw_name), key = %direct_key, "computed direct key");
        if let Some(value) = self.get_non_empty(&direct_key) {
            debug!(key = %direct_key, value = %value, "found direct variable");
            return (value.into_bytes(), Tier::Direct);
        }
        debug!(key = %direct_key, "direct variable not found");

        let encoded_key = self.encoded_key(raw_name);
        trace!(original = %String::from_utf8_lossy(raw_name), key = %encoded_key, "computed encoded key");
        match self.get_non_empty(&encoded_key) {
            Some(stored) => match hex::decode(&stored) {
                Ok(bytes) => {
                    debug!(
                        key = %encoded_key,
                        decoded = %String::from_utf8_lossy(&bytes),
                        "found encoded variable"
                    );
                    return (bytes, Tier::Encoded);
                }
                Err(err) => {
                    warn!(key = %encoded_key, error = %err, "failed to hex-decode encoded variable");
                }
            },
            None => debug!(key = %encoded_key, "encoded variable not found"),
        }

        debug!("using default");
        (default.to_vec(), Tier::Default)
    }

    fn get_non_empty(&self, key: &str) -> Option<String> {
        self.store.get(key).filter(|value| !value.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::vars;

    // HEX("db.port")
    const DB_PORT_HEX: &str = "64622E706F7274";

    fn resolver(pairs: &[(&str, &str)]) -> Resolver<crate::env::MapEnv> {
        Resolver::new("APP_", vars(pairs.iter().copied()))
    }

    #[test]
    fn test_key_derivation() {
        let r = resolver(&[]);
        assert_eq!(r.direct_key("db.port"), "APP_DB_PORT");
        assert_eq!(r.encoded_key("db.port"), format!("APP_HEX_{DB_PORT_HEX}"));
    }

    #[test]
    fn test_encoded_key_uses_raw_name_bytes() {
        let r = resolver(&[]);
        // Both names normalize to APP_A_B but encode differently.
        assert_eq!(r.encoded_key("a.b"), "APP_HEX_612E62");
        assert_eq!(r.encoded_key("a-b"), "APP_HEX_612D62");
        assert_eq!(r.encoded_key("é"), "APP_HEX_C3A9");
    }

    #[test]
    fn test_direct_tier() {
        let r = resolver(&[("APP_DB_HOST", "db1.internal")]);
        assert_eq!(
            r.resolve_with_tier("DB.HOST", "localhost"),
            ("db1.internal".to_string(), Tier::Direct)
        );
    }

    #[test]
    fn test_encoded_tier() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[(key.as_str(), "39393939")]);
        assert_eq!(
            r.resolve_with_tier("db.port", "5432"),
            ("9999".to_string(), Tier::Encoded)
        );
    }

    #[test]
    fn test_encoded_value_accepts_lowercase_hex() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[(key.as_str(), "6c6f77")]);
        assert_eq!(r.resolve("db.port", ""), "low");
    }

    #[test]
    fn test_malformed_encoded_value_falls_through() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        for bad in ["zz", "123", "0g"] {
            let r = resolver(&[(key.as_str(), bad)]);
            assert_eq!(
                r.resolve_with_tier("db.port", "5432"),
                ("5432".to_string(), Tier::Default),
                "value {bad:?}"
            );
        }
    }

    #[test]
    fn test_non_utf8_decoded_value_is_lossy() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[(key.as_str(), "41FF42")]);
        assert_eq!(r.resolve("db.port", ""), "A\u{FFFD}B");
    }

    #[test]
    fn test_default_tier() {
        let r = resolver(&[]);
        assert_eq!(
            r.resolve_with_tier("db.port", "5432"),
            ("5432".to_string(), Tier::Default)
        );
        assert_eq!(r.resolve("db.port", ""), "");
    }

    #[test]
    fn test_precedence_when_all_tiers_present() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[("APP_DB_PORT", "1111"), (key.as_str(), "32323232")]);
        assert_eq!(r.resolve("db.port", "3333"), "1111");

        let r = resolver(&[(key.as_str(), "32323232")]);
        assert_eq!(r.resolve("db.port", "3333"), "2222");
    }

    #[test]
    fn test_empty_values_count_as_absent() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[("APP_DB_PORT", ""), (key.as_str(), "")]);
        assert_eq!(
            r.resolve_with_tier("db.port", "5432"),
            ("5432".to_string(), Tier::Default)
        );

        let r = resolver(&[("APP_DB_PORT", ""), (key.as_str(), "37")]);
        assert_eq!(r.resolve("db.port", "5432"), "7");
    }

    #[test]
    fn test_whitespace_decoded_value_is_returned() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[(key.as_str(), "20")]);
        assert_eq!(r.resolve("db.port", "x"), " ");
    }

    #[test]
    fn test_empty_name_never_queries_store() {
        let r = resolver(&[("APP_", "bare-prefix"), ("APP_HEX_", "41")]);
        assert_eq!(
            r.resolve_with_tier("", "fallback"),
            ("fallback".to_string(), Tier::Default)
        );
        assert_eq!(r.resolve("", ""), "");
    }

    #[test]
    fn test_direct_value_returned_verbatim() {
        let r = resolver(&[("APP_MSG", "  ${not.expanded}  ")]);
        assert_eq!(r.resolve("msg", ""), "  ${not.expanded}  ");
    }

    #[test]
    fn test_empty_prefix() {
        let r = Resolver::new("", vars([("HOME_DIR", "/home/me")]));
        assert_eq!(r.resolve("home.dir", ""), "/home/me");
    }

    #[test]
    fn test_borrowed_store() {
        let env = vars([("APP_X", "1")]);
        let r = Resolver::new("APP_", &env);
        assert_eq!(r.resolve("x", ""), "1");
    }

    #[test]
    fn test_bytes_resolution_keeps_decoded_bytes() {
        let key = format!("APP_HEX_{DB_PORT_HEX}");
        let r = resolver(&[(key.as_str(), "41FF42")]);
        assert_eq!(r.resolve_bytes(b"db.port", b""), b"A\xffB");
    }

    #[test]
    fn test_bytes_resolution_with_invalid_utf8_name() {
        // "caf\xe9" normalizes to CAF_ and hex-encodes its raw bytes.
        let r = resolver(&[("APP_HEX_636166E9", "6f6b")]);
        assert_eq!(r.direct_key(b"caf\xe9"), "APP_CAF_");
        assert_eq!(r.resolve_bytes(b"caf\xe9", b"\xe9"), b"ok");

        let r = resolver(&[]);
        assert_eq!(r.resolve_bytes(b"caf\xe9", b"d\xe9f"), b"d\xe9f");
    }
}
