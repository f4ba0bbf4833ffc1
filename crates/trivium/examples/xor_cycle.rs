//! Encrypts and decrypts a short message by XORing it with the keystream.

use trivium::{Iv, Key, Trivium};

fn main() {
    let key = Key::from([0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a]);
    let iv = Iv::from([0x0a, 0x09, 0x08, 0x07, 0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);

    let message = b"attack at dawn".to_vec();
    let mut data = message.clone();

    Trivium::new(key, iv).apply_keystream(&mut data);
    let ciphertext_hex: String = data.iter().map(|b| format!("{b:02x}")).collect();
    println!("ciphertext: {ciphertext_hex}");

    // The keystream is deterministic per (key, iv): a fresh generator
    // produces the same bytes, so a second pass decrypts.
    Trivium::new(key, iv).apply_keystream(&mut data);
    assert_eq!(data, message);

    println!("decrypted ok");
}
