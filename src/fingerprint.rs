use snafu::{ensure, Snafu};

/// Hexadecimal fingerprint of a key, as reported by the key manager.
///
/// Any string is accepted so that a key always carries what the tool printed. Derivations
/// that need a well-formed value ([`Fingerprint::short_id`]) return `None` instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Fingerprint(String);

#[derive(Debug, PartialEq, Eq, Snafu)]
pub enum FingerprintError {
    #[snafu(display("fingerprint has {len} characters, at least {} are required", Fingerprint::MIN_SHORT_ID_SOURCE_LEN))]
    TooShort { len: usize },
    #[snafu(display("fingerprint {fingerprint} is not hexadecimal"))]
    NotHex { fingerprint: String },
}

impl Fingerprint {
    /// Length of the conventional short key id
    pub const SHORT_ID_LEN: usize = 16;

    /// Below this length no short id is derived
    pub const MIN_SHORT_ID_SOURCE_LEN: usize = 25;

    /// Length of an OpenPGP v4 fingerprint
    pub const V4_LEN: usize = 40;

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Trailing 16 characters, or `None` when the fingerprint is too short to carry one.
    pub fn short_id(&self) -> Option<&str> {
        // Offsets are counted in characters of a hex string
        if !self.0.is_ascii() || self.0.len() < Self::MIN_SHORT_ID_SOURCE_LEN {
            return None;
        }
        Some(&self.0[self.0.len() - Self::SHORT_ID_LEN..])
    }

    /// Strict check: long enough for a short id and made of hexadecimal digits only.
    pub fn validate(&self) -> Result<(), FingerprintError> {
        ensure!(
            self.0.len() >= Self::MIN_SHORT_ID_SOURCE_LEN,
            TooShortSnafu { len: self.0.len() }
        );
        ensure!(
            self.0.chars().all(|c| c.is_ascii_hexdigit()),
            NotHexSnafu {
                fingerprint: self.0.clone()
            }
        );
        Ok(())
    }

    /// Exactly 40 hexadecimal characters
    pub fn is_well_formed(&self) -> bool {
        self.0.len() == Self::V4_LEN && self.validate().is_ok()
    }

    /// Does a user supplied key id (`0x` prefix optional) designate this fingerprint?
    ///
    /// The id must be the whole fingerprint or one of its suffixes of 8 characters or more.
    /// Comparison ignores case.
    pub fn matches(&self, id: &str) -> bool {
        id_designates(&self.0, id)
    }
}

/// Key id without its optional `0x` prefix
pub(crate) fn strip_id_prefix(id: &str) -> &str {
    id.strip_prefix("0x")
        .or_else(|| id.strip_prefix("0X"))
        .unwrap_or(id)
}

/// `id` is `full` or a suffix of it of 8 characters or more, ignoring case.
pub(crate) fn id_designates(full: &str, id: &str) -> bool {
    let id = strip_id_prefix(id);
    if id.len() < 8 || id.len() > full.len() || !id.is_ascii() || !full.is_ascii() {
        return false;
    }
    full[full.len() - id.len()..].eq_ignore_ascii_case(id)
}

impl From<String> for Fingerprint {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Fingerprint {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl std::fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = "0123456789ABCDEF01234567ABCD1234ABCD1234";

    #[test]
    fn short_id_is_the_trailing_sixteen_characters() {
        let fp = Fingerprint::from(FULL);
        assert_eq!(fp.short_id(), Some("ABCD1234ABCD1234"));
    }

    #[test]
    fn short_id_needs_twenty_five_characters() {
        let fp = Fingerprint::from(&FULL[..24]);
        assert_eq!(fp.short_id(), None);

        let fp = Fingerprint::from(&FULL[..25]);
        assert_eq!(fp.short_id(), Some(&FULL[9..25]));

        assert_eq!(Fingerprint::default().short_id(), None);
    }

    #[test]
    fn short_id_refuses_non_ascii() {
        let fp = Fingerprint::from("ééééééééééééééééééééééééééé");
        assert_eq!(fp.short_id(), None);
    }

    #[test]
    fn validate() {
        assert_eq!(Fingerprint::from(FULL).validate(), Ok(()));
        assert_eq!(
            Fingerprint::from("ABCD").validate(),
            Err(FingerprintError::TooShort { len: 4 })
        );
        let not_hex = "Z123456789ABCDEF01234567ABCD1234ABCD1234";
        assert_eq!(
            Fingerprint::from(not_hex).validate(),
            Err(FingerprintError::NotHex {
                fingerprint: not_hex.into()
            })
        );
    }

    #[test]
    fn well_formed_means_forty_hex_characters() {
        assert!(Fingerprint::from(FULL).is_well_formed());
        assert!(Fingerprint::from(FULL.to_lowercase()).is_well_formed());
        assert_eq!(Fingerprint::from(&FULL[..25]).validate(), Ok(()));
        assert!(!Fingerprint::from(&FULL[..25]).is_well_formed());
        assert!(!Fingerprint::from(&FULL[..38]).is_well_formed());
    }

    #[test]
    fn matches_key_ids() {
        let fp = Fingerprint::from(FULL);
        assert!(fp.matches(FULL));
        assert!(fp.matches("0xABCD1234ABCD1234"));
        assert!(fp.matches("abcd1234abcd1234"));
        assert!(fp.matches("ABCD1234"));
        assert!(!fp.matches("1234"));
        assert!(!fp.matches("0xFFFF1234ABCD1234"));
        assert!(!fp.matches(&format!("00{FULL}")));
    }

    #[test]
    fn serialized_as_plain_string() {
        let fp = Fingerprint::from(FULL);
        let json = serde_json::to_string(&fp).unwrap();
        assert_eq!(json, format!("\"{FULL}\""));
        assert_eq!(fp.to_string(), FULL);
    }
}
