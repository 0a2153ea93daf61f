//! Run this example with the following command in a terminal:
//!
//! ```console
//! $ cargo run --example describe_key < key.json
//! ```
//!
//! This example reads one key in json on stdin, as produced by a key listing parser,
//! and prints how it would be presented and whether it can be encrypted to.
//! Pass `--always-trust` to ignore the validity of the key.

use keytrust::Key;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let always_trust = std::env::args().any(|arg| arg == "--always-trust");

    let json = std::io::read_to_string(std::io::stdin())?;
    let key: Key = serde_json::from_str(&json)?;

    println!("{key}\n");
    println!("{}", key.one_line());

    if key.fingerprint.validate().is_err() {
        println!("fingerprint `{}` is malformed", key.fingerprint);
    }

    let usable = if key.is_usable(always_trust) { "usable" } else { "not usable" };
    println!("{} is {usable} for encryption", key.short_id());

    Ok(())
}
