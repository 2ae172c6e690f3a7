use std::fmt::Write;

use crate::constants::{S3_PUBLIC_DOMAIN, S3_STANDARD_REGION};

/// Public address of an uploaded object.
///
/// Buckets outside `us-east-1` are addressed through the `s3-<region>` host.
pub fn public_url(bucket: &str, key: &str, region: Option<&str>) -> String {
    let host = match region {
        Some(region) if !region.is_empty() && region != S3_STANDARD_REGION => {
            format!("s3-{}.{}", region, S3_PUBLIC_DOMAIN)
        }
        _ => format!("s3.{}", S3_PUBLIC_DOMAIN),
    };
    format!("https://{}/{}/{}", host, bucket, encode_key(key))
}

/// Percent-encode an object key for use in a URL path.
///
/// Path-safe delimiters stay readable. `?` and `#` would end the path, so they
/// are encoded along with `!'()*`, spaces and non-ASCII bytes.
pub fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for byte in key.bytes() {
        if is_unescaped(byte) {
            encoded.push(byte as char);
        } else {
            let _ = write!(encoded, "%{:02X}", byte);
        }
    }
    encoded
}

fn is_unescaped(byte: u8) -> bool {
    byte.is_ascii_alphanumeric()
        || matches!(
            byte,
            b'-' | b'_' | b'.' | b'~' | b';' | b',' | b'/' | b':' | b'@' | b'&' | b'=' | b'+'
                | b'$'
        )
}
