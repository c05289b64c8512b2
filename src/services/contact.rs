//! Contact field normalization
//!
//! Phone numbers, VK identifiers and Telegram handles are stored in one
//! canonical form and formatted back into display form only at render time.
//! Input that does not normalize is rejected; nothing malformed is stored.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;
use crate::utils::errors::{StudioLedgerError, Result};

/// Country code digit prepended to bare subscriber numbers
const COUNTRY_CODE: char = '7';
/// National trunk prefix replaced by the country code
const TRUNK_PREFIX: char = '8';
/// Canonical phone length: country code + subscriber number
const CANONICAL_PHONE_LEN: usize = 11;
/// Bare subscriber number length
const SUBSCRIBER_LEN: usize = 10;

static VK_NUMERIC_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"^id(\d+)$").unwrap());
static VK_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.]+$").unwrap());
static TG_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]{5,32}$").unwrap());

fn invalid(field: &str, value: &str) -> StudioLedgerError {
    StudioLedgerError::InvalidContact {
        field: field.to_string(),
        value: value.to_string(),
    }
}

/// Normalize a phone number into the canonical digit string
///
/// Strips every non-digit character, replaces a leading trunk prefix on a
/// full-length number with the country code, and prepends the country code
/// to a bare subscriber number. Anything that does not end up as 11 digits
/// starting with the country code is rejected.
pub fn normalize_phone(raw: &str) -> Result<String> {
    let mut digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == CANONICAL_PHONE_LEN && digits.starts_with(TRUNK_PREFIX) {
        digits.replace_range(0..1, "7");
    } else if digits.len() == SUBSCRIBER_LEN {
        digits.insert(0, COUNTRY_CODE);
    }

    if digits.len() != CANONICAL_PHONE_LEN || !digits.starts_with(COUNTRY_CODE) {
        return Err(invalid("phone", raw));
    }

    Ok(digits)
}

/// Format a canonical phone number for display
///
/// Pure presentation transform; the result is never stored.
pub fn format_phone(canonical: &str) -> String {
    if canonical.len() != CANONICAL_PHONE_LEN || !canonical.chars().all(|c| c.is_ascii_digit()) {
        return canonical.to_string();
    }

    format!(
        "+{} {} {}-{}-{}",
        &canonical[0..1],
        &canonical[1..4],
        &canonical[4..7],
        &canonical[7..9],
        &canonical[9..11]
    )
}

/// Build a tel: link from a canonical phone number
pub fn phone_tel_link(canonical: &str) -> String {
    format!("tel:+{}", canonical)
}

/// Strip scheme and profile-host prefixes from a contact value
fn strip_profile_prefix(value: &str, hosts: &[&str]) -> String {
    if let Ok(parsed) = Url::parse(value) {
        if hosts.contains(&parsed.host_str().unwrap_or_default()) {
            return parsed.path().trim_start_matches('/').trim_end_matches('/').to_string();
        }
    }

    for host in hosts {
        if let Some(rest) = value.strip_prefix(&format!("{}/", host)) {
            return rest.trim_end_matches('/').to_string();
        }
    }

    value.to_string()
}

/// Normalize a VK identifier into the canonical form
///
/// Numeric ids (bare digits or the id-prefixed profile path) canonicalize to
/// the digit string; anything else is kept as a handle. Re-normalizing a
/// canonical value is a no-op.
pub fn normalize_vk(raw: &str) -> Result<String> {
    let rest = strip_profile_prefix(raw.trim(), &["vk.com", "m.vk.com", "www.vk.com"]);

    if let Some(caps) = VK_NUMERIC_ID.captures(&rest) {
        return Ok(caps[1].to_string());
    }

    if !rest.is_empty() && rest.chars().all(|c| c.is_ascii_digit()) {
        return Ok(rest);
    }

    if VK_HANDLE.is_match(&rest) {
        return Ok(rest);
    }

    Err(invalid("vk_id", raw))
}

/// Build a profile URL from a canonical VK identifier
pub fn vk_profile_url(canonical: &str) -> String {
    if canonical.chars().all(|c| c.is_ascii_digit()) {
        format!("https://vk.com/id{}", canonical)
    } else {
        format!("https://vk.com/{}", canonical)
    }
}

/// Normalize a Telegram handle into the canonical bare form
pub fn normalize_telegram(raw: &str) -> Result<String> {
    let rest = strip_profile_prefix(raw.trim(), &["t.me", "telegram.me"]);
    let handle = rest.trim_start_matches('@');

    if TG_HANDLE.is_match(handle) {
        Ok(handle.to_string())
    } else {
        Err(invalid("tg_id", raw))
    }
}

/// Build a profile URL from a canonical Telegram handle
pub fn telegram_url(canonical: &str) -> String {
    format!("https://t.me/{}", canonical)
}
