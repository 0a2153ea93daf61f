use crate::timestamp::{format_day, parse_timestamp};
use crate::{Fingerprint, Identity, TimestampError, Validity};
use jiff::Timestamp;
use std::collections::{BTreeMap, BTreeSet};

/// What a key may be used for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    pub encrypt: bool,
    pub sign: bool,
    pub certify: bool,
    pub authentication: bool,
    /// Vetoes every use of the key
    pub deactivated: bool,
}

impl Capabilities {
    /// Read the capability letters of a key listing (`escaESCA`, `D` for disabled).
    ///
    /// Upper case letters describe the whole key, lower case ones the primary key alone.
    /// Both grant the capability here. Unknown letters are ignored.
    pub fn from_flags(flags: &str) -> Self {
        let mut caps = Self::default();
        for flag in flags.chars() {
            match flag {
                'e' | 'E' => caps.encrypt = true,
                's' | 'S' => caps.sign = true,
                'c' | 'C' => caps.certify = true,
                'a' | 'A' => caps.authentication = true,
                'D' => caps.deactivated = true,
                _ => {}
            }
        }
        caps
    }
}

/// A public or secret key as listed by the key manager.
///
/// Built once from the tool output and only queried afterwards.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Key {
    pub key_type: String,
    pub bit_length: u32,
    #[serde(default)]
    pub validity: Validity,

    #[serde(with = "crate::timestamp::required")]
    pub created_at: Timestamp,

    /// `None` when the key never expires
    #[serde(default, with = "crate::timestamp::optional")]
    pub expires_at: Option<Timestamp>,

    #[serde(default)]
    pub owner_trust: String,
    pub fingerprint: Fingerprint,

    /// User ids, by their identity string
    #[serde(default)]
    pub identities: BTreeMap<String, Identity>,

    #[serde(default)]
    pub sub_keys: BTreeSet<String>,

    #[serde(default)]
    pub capabilities: Capabilities,
}

impl Key {
    pub fn new(
        key_type: impl Into<String>,
        bit_length: u32,
        fingerprint: impl Into<Fingerprint>,
        created_at: Timestamp,
    ) -> Self {
        Self {
            key_type: key_type.into(),
            bit_length,
            validity: Validity::default(),
            created_at,
            expires_at: None,
            owner_trust: String::new(),
            fingerprint: fingerprint.into(),
            identities: BTreeMap::new(),
            sub_keys: BTreeSet::new(),
            capabilities: Capabilities::default(),
        }
    }

    pub fn with_validity(mut self, validity: impl Into<Validity>) -> Self {
        self.validity = validity.into();
        self
    }

    pub fn with_owner_trust(mut self, owner_trust: impl Into<String>) -> Self {
        self.owner_trust = owner_trust.into();
        self
    }

    pub fn with_capabilities(mut self, capabilities: Capabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    pub fn with_expiration(mut self, timestamp: i64) -> Result<Self, TimestampError> {
        self.expires_at = Some(parse_timestamp(timestamp)?);
        Ok(self)
    }

    pub fn with_identity(mut self, key: impl Into<String>, identity: Identity) -> Self {
        self.identities.insert(key.into(), identity);
        self
    }

    pub fn with_sub_key(mut self, id: impl Into<String>) -> Self {
        self.sub_keys.insert(id.into());
        self
    }

    /// Expired strictly before `now`. A key without expiration never expires.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at < now)
    }

    /// Would the key manager encrypt to this key right now?
    ///
    /// The answer depends on the wall clock, see [`Key::is_usable_at`] for a repeatable
    /// evaluation.
    pub fn is_usable(&self, always_trust: bool) -> bool {
        self.is_usable_at(always_trust, Timestamp::now())
    }

    /// Would the key manager encrypt to this key at instant `now`?
    ///
    /// A deactivated key, a key without the encrypt capability, or an expired key is never
    /// usable. Otherwise `always_trust` accepts the key whatever its validity, and without
    /// it the validity must be marginal, full or ultimate.
    pub fn is_usable_at(&self, always_trust: bool, now: Timestamp) -> bool {
        if self.capabilities.deactivated {
            tracing::trace!(fingerprint = %self.fingerprint, "key is deactivated");
            return false;
        }
        if !self.capabilities.encrypt {
            tracing::trace!(fingerprint = %self.fingerprint, "key cannot encrypt");
            return false;
        }
        if self.is_expired_at(now) {
            tracing::trace!(fingerprint = %self.fingerprint, "key is expired");
            return false;
        }
        if always_trust {
            return true;
        }
        if !self.validity.is_trusted() {
            tracing::trace!(
                fingerprint = %self.fingerprint,
                validity = %self.validity,
                "key is not trusted enough"
            );
            return false;
        }
        true
    }

    /// Most recently created identity.
    ///
    /// Identities created at the same instant are ranked by their identity string, the
    /// lexically smallest wins. A key without identities yields [`Identity::default`].
    pub fn primary_identity(&self) -> Identity {
        self.identities
            .iter()
            .reduce(|best, candidate| {
                // Iteration is in ascending key order, so keep the earlier entry on ties
                if candidate.1.created_at > best.1.created_at {
                    candidate
                } else {
                    best
                }
            })
            .map(|(_, identity)| identity.clone())
            .unwrap_or_default()
    }

    /// `0x` followed by the short fingerprint, or an empty string when the fingerprint is
    /// too short.
    pub fn short_id(&self) -> String {
        self.fingerprint
            .short_id()
            .map(|short| format!("0x{short}"))
            .unwrap_or_default()
    }

    /// Short id and primary identity on one line, `(invalid:<fingerprint>)` when the
    /// fingerprint is too short.
    pub fn one_line(&self) -> String {
        match self.fingerprint.short_id() {
            Some(short) => format!("0x{short} - {}", self.primary_identity().id()),
            None => format!("(invalid:{})", self.fingerprint),
        }
    }
}

/// Multi line summary, close to what the key manager prints.
///
/// Identities follow in ascending order of their identity string.
impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}   {}D/0x{} {}",
            self.key_type,
            self.bit_length,
            self.fingerprint.short_id().unwrap_or_default(),
            format_day(self.created_at)
        )?;
        if let Some(expires_at) = self.expires_at {
            write!(f, " [expires: {}]", format_day(expires_at))?;
        }
        write!(f, "\n      Key fingerprint = {}", self.fingerprint)?;
        for identity in self.identities.values() {
            write!(f, "\n{identity}")?;
        }
        Ok(())
    }
}
