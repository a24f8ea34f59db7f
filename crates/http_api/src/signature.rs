use ed25519_dalek::{Signature, Verifier, VerifyingKey};

pub const SIGNATURE_HEADER: &str = "x-signature-ed25519";
pub const TIMESTAMP_HEADER: &str = "x-signature-timestamp";

/// Parses the application's hex-encoded Ed25519 public key.
pub fn parse_public_key(hex_key: &str) -> Result<VerifyingKey, String> {
    let bytes = hex::decode(hex_key.trim()).map_err(|err| format!("decode public key: {err}"))?;
    let bytes: [u8; 32] = bytes
        .try_into()
        .map_err(|_| "public key must be 32 bytes".to_string())?;
    VerifyingKey::from_bytes(&bytes).map_err(|err| format!("invalid public key: {err}"))
}

/// Checks a hex signature over `timestamp` followed by the raw request body.
pub fn verify_signature(
    key: &VerifyingKey,
    signature_hex: &str,
    timestamp: &str,
    body: &[u8],
) -> bool {
    let Ok(bytes) = hex::decode(signature_hex) else {
        return false;
    };
    let Ok(bytes) = <[u8; 64]>::try_from(bytes.as_slice()) else {
        return false;
    };
    let signature = Signature::from_bytes(&bytes);
    let mut message = Vec::with_capacity(timestamp.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(body);
    key.verify(&message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use ed25519_dalek::{Signer, SigningKey};

    use super::*;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    #[test]
    fn accepts_matching_signature() {
        let signing = signing_key();
        let key = parse_public_key(&hex::encode(signing.verifying_key().to_bytes()))
            .expect("public key");
        let signature = hex::encode(signing.sign(b"1700000000{\"type\":1}").to_bytes());

        assert!(verify_signature(&key, &signature, "1700000000", b"{\"type\":1}"));
        assert!(!verify_signature(&key, &signature, "1700000001", b"{\"type\":1}"));
        assert!(!verify_signature(&key, &signature, "1700000000", b"{\"type\":2}"));
    }

    #[test]
    fn rejects_malformed_input() {
        let key = signing_key().verifying_key();
        assert!(!verify_signature(&key, "zz", "1", b"{}"));
        assert!(!verify_signature(&key, "abcd", "1", b"{}"));
        assert!(parse_public_key("not hex").is_err());
        assert!(parse_public_key("abcd").is_err());
    }
}
