//! Decide whether a key listed by a key manager can be encrypted to, and describe it.
//!
//! Everything here is a pure query over an already parsed [`Key`]. Missing or malformed data
//! never produces an error: formatting falls back to sentinel strings instead.
//!
//! ```
//! use keytrust::{Capabilities, Key};
//!
//! let created_at = jiff::Timestamp::from_second(1700000000).unwrap();
//! let key = Key::new("pub", 4096, "0123456789ABCDEF01234567ABCD1234ABCD1234", created_at)
//!     .with_validity("f")
//!     .with_capabilities(Capabilities::from_flags("esc"));
//!
//! assert!(key.is_usable(false));
//! assert_eq!(key.short_id(), "0xABCD1234ABCD1234");
//! ```

mod fingerprint;
mod identity;
mod key;
mod key_list;
mod timestamp;
mod validity;

pub use fingerprint::Fingerprint;
pub use identity::Identity;
pub use key::{Capabilities, Key};
pub use key_list::KeyList;
pub use validity::Validity;

pub use timestamp::TimestampError;

pub mod error {
    pub use crate::fingerprint::FingerprintError;
    pub use crate::timestamp::TimestampError;
}
