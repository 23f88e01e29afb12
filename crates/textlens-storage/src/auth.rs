//! Master-key request signing for the Cosmos DB REST API.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::StorageError;

type HmacSha256 = Hmac<Sha256>;

/// REST API version sent as `x-ms-version`.
pub const API_VERSION: &str = "2018-12-31";

/// Format a timestamp as an RFC 1123 HTTP date, the form `x-ms-date` expects.
pub fn http_date(ts: jiff::Timestamp) -> String {
    ts.strftime("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the URL-encoded `authorization` header value for one request.
///
/// `resource_link` is the link of the addressed resource, or of the parent
/// collection when creating or querying documents.
pub fn authorization_token(
    key: &[u8],
    verb: &str,
    resource_type: &str,
    resource_link: &str,
    date: &str,
) -> Result<String, StorageError> {
    let payload = format!(
        "{}\n{}\n{}\n{}\n\n",
        verb.to_lowercase(),
        resource_type.to_lowercase(),
        resource_link,
        date.to_lowercase(),
    );

    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| StorageError::InvalidConnectionString(e.to_string()))?;
    mac.update(payload.as_bytes());
    let signature = STANDARD.encode(mac.finalize().into_bytes());

    Ok(urlencoding::encode(&format!("type=master&ver=1.0&sig={signature}")).into_owned())
}
