use crate::fingerprint::{id_designates, strip_id_prefix};
use crate::Key;
use jiff::Timestamp;

/// Keys returned by one listing of the key manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct KeyList(Vec<Key>);

impl KeyList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Key> {
        self.0.iter()
    }

    pub fn usable_keys(&self, always_trust: bool) -> KeyList {
        self.usable_keys_at(always_trust, Timestamp::now())
    }

    pub fn usable_keys_at(&self, always_trust: bool, now: Timestamp) -> KeyList {
        self.filter(|key| key.is_usable_at(always_trust, now))
    }

    pub fn unusable_keys(&self, always_trust: bool) -> KeyList {
        self.unusable_keys_at(always_trust, Timestamp::now())
    }

    pub fn unusable_keys_at(&self, always_trust: bool, now: Timestamp) -> KeyList {
        self.filter(|key| !key.is_usable_at(always_trust, now))
    }

    /// Fingerprints of every key, sorted and without duplicates
    pub fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> =
            self.0.iter().map(|key| key.fingerprint.to_string()).collect();
        recipients.sort();
        recipients.dedup();
        recipients
    }

    /// First key designated by `id`: its fingerprint, a key id (see
    /// [`crate::Fingerprint::matches`]), the id of one of its sub keys, or the email of one of
    /// its identities. An empty id designates nothing.
    pub fn find_key(&self, id: &str) -> Option<&Key> {
        if strip_id_prefix(id).is_empty() {
            return None;
        }
        let found = self.0.iter().find(|key| {
            key.fingerprint.matches(id)
                || key.sub_keys.iter().any(|sub_key| id_designates(sub_key, id))
                || key
                    .identities
                    .values()
                    .any(|identity| identity.email.eq_ignore_ascii_case(id))
        });
        if found.is_none() {
            tracing::debug!(id, keys = self.0.len(), "no key matches");
        }
        found
    }

    fn filter(&self, predicate: impl Fn(&Key) -> bool) -> KeyList {
        KeyList(self.0.iter().filter(|key| predicate(key)).cloned().collect())
    }
}

impl From<Vec<Key>> for KeyList {
    fn from(value: Vec<Key>) -> Self {
        Self(value)
    }
}

impl FromIterator<Key> for KeyList {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for KeyList {
    type Item = Key;
    type IntoIter = std::vec::IntoIter<Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a KeyList {
    type Item = &'a Key;
    type IntoIter = std::slice::Iter<'a, Key>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
