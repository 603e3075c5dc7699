//! Request credential rewriting
//!
//! One algorithm covers every provider: pull the caller's credential
//! out of the inbound request at the provider's configured location,
//! run it through the gate, and write either the real upstream key or
//! an explicit empty value into the outbound request at the same spot.
//!
//! A rejected (or absent) credential is written as an empty value
//! rather than omitted: the caller's own key must never reach the
//! upstream, and a blanked credential cannot fall back to anything.

use axum::http::header::HeaderValue;
use axum::http::HeaderMap;
use reqwest::Url;
use tracing::warn;

use crate::proxy::provider::{CredentialLocation, ProviderConfig};
use crate::secret::Secret;

/// Rewrite the outbound credential for one request.
///
/// `outbound_url` must still carry the caller's original query string
/// verbatim; for query-located credentials it doubles as the extraction
/// source. Only the credential header or parameter is touched; every
/// other header and query pair passes through unchanged, and the
/// inbound request is never mutated.
///
/// Returns whether the presented credential was accepted so callers can
/// log the decision. The credential itself is never logged.
pub fn rewrite_credential(
    config: &ProviderConfig,
    secret: &Secret,
    inbound_headers: &HeaderMap,
    outbound_headers: &mut HeaderMap,
    outbound_url: &mut Url,
) -> bool {
    let presented = extract_presented(&config.credential_location, inbound_headers, outbound_url);
    let effective = secret.authorize(config.id, &presented);
    let accepted = effective.is_some();

    apply_credential(
        &config.credential_location,
        effective.unwrap_or_default(),
        outbound_headers,
        outbound_url,
    );

    accepted
}

/// Extract the caller-presented credential, stripped of any scheme
/// prefix. Missing and non-UTF-8 values read as the empty string.
fn extract_presented(
    location: &CredentialLocation,
    inbound_headers: &HeaderMap,
    url: &Url,
) -> String {
    match location {
        CredentialLocation::Header { name, scheme } => {
            let value = inbound_headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            match scheme {
                Some(scheme) => {
                    let prefix = format!("{scheme} ");
                    value.strip_prefix(&prefix).unwrap_or(value).to_string()
                }
                None => value.to_string(),
            }
        }
        CredentialLocation::QueryParam { name } => url
            .query_pairs()
            .find(|(k, _)| k.as_ref() == *name)
            .map(|(_, v)| v.into_owned())
            .unwrap_or_default(),
    }
}

/// Write `effective` into the outbound request at the provider's
/// credential location, re-adding the scheme prefix where one is
/// configured. An empty `effective` produces an explicitly empty
/// header value or `name=` query pair.
fn apply_credential(
    location: &CredentialLocation,
    effective: &str,
    outbound_headers: &mut HeaderMap,
    outbound_url: &mut Url,
) {
    match location {
        CredentialLocation::Header { name, scheme } => {
            let raw = match scheme {
                Some(scheme) if !effective.is_empty() => format!("{scheme} {effective}"),
                _ => effective.to_string(),
            };
            let value = HeaderValue::from_str(&raw).unwrap_or_else(|_| {
                warn!(header = %name, "Upstream credential is not a valid header value, sending empty");
                HeaderValue::from_static("")
            });
            outbound_headers.insert(name.clone(), value);
        }
        CredentialLocation::QueryParam { name } => {
            let retained: Vec<(String, String)> = outbound_url
                .query_pairs()
                .filter(|(k, _)| k.as_ref() != *name)
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();

            let mut pairs = outbound_url.query_pairs_mut();
            pairs.clear();
            for (k, v) in &retained {
                pairs.append_pair(k, v);
            }
            pairs.append_pair(name, effective);
        }
    }
}
