/// Signed session cookies
///
/// The cookie value is `{session_id}.{hex(HMAC-SHA256(session_id))}`; the
/// session data itself never leaves the server.
use anyhow::{Context, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tower_cookies::Cookie;
use tower_cookies::cookie::SameSite;

use super::{SameSitePolicy, SessionConfig};

type HmacSha256 = Hmac<Sha256>;

/// Generate a new random session id
pub fn generate_session_id() -> String {
    use oauth2::CsrfToken;
    format!("ses_{}", CsrfToken::new_random().secret())
}

fn session_mac(session_id: &str, secret: &str) -> Result<HmacSha256> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .context("Failed to create HMAC for cookie signing")?;
    mac.update(session_id.as_bytes());
    Ok(mac)
}

/// Sign session ID using HMAC-SHA256
fn sign_session_id(session_id: &str, secret: &str) -> Result<String> {
    let result = session_mac(session_id, secret)?.finalize();
    Ok(hex::encode(result.into_bytes()))
}

/// Create signed cookie value: session_id.signature
pub fn create_signed_cookie_value(session_id: &str, secret: &str) -> Result<String> {
    let signature = sign_session_id(session_id, secret)?;
    Ok(format!("{}.{}", session_id, signature))
}

/// Verify and extract session ID from signed cookie
pub fn verify_and_extract_session_id(cookie_value: &str, secret: &str) -> Result<String> {
    let (session_id, signature) = cookie_value
        .rsplit_once('.')
        .context("Invalid cookie format")?;

    if session_id.is_empty() {
        anyhow::bail!("Invalid cookie format");
    }

    let signature = hex::decode(signature).context("Invalid cookie signature encoding")?;
    session_mac(session_id, secret)?
        .verify_slice(&signature)
        .map_err(|_| anyhow::anyhow!("Invalid cookie signature"))?;

    Ok(session_id.to_string())
}

/// Build the session cookie with the configured attributes
pub fn build_session_cookie(config: &SessionConfig, value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.cookie_name.clone(), value);

    cookie.set_http_only(config.http_only);
    cookie.set_secure(config.secure);
    cookie.set_max_age(tower_cookies::cookie::time::Duration::seconds(
        config.max_age_seconds,
    ));
    cookie.set_same_site(match config.same_site {
        SameSitePolicy::Strict => SameSite::Strict,
        SameSitePolicy::Lax => SameSite::Lax,
        SameSitePolicy::None => SameSite::None,
    });
    if let Some(domain) = &config.cookie_domain {
        cookie.set_domain(domain.clone());
    }
    cookie.set_path("/");

    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_cookie() {
        let session_id = "ses_abc123";
        let secret = "test-secret-key";

        let cookie_value = create_signed_cookie_value(session_id, secret).unwrap();
        let extracted = verify_and_extract_session_id(&cookie_value, secret).unwrap();

        assert_eq!(extracted, session_id);

        // Test with wrong secret
        let result = verify_and_extract_session_id(&cookie_value, "wrong-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_tampered_cookie_is_rejected() {
        let secret = "test-secret-key";
        let cookie_value = create_signed_cookie_value("ses_abc123", secret).unwrap();
        let (_, signature) = cookie_value.rsplit_once('.').unwrap();

        let forged = format!("ses_other.{}", signature);
        assert!(verify_and_extract_session_id(&forged, secret).is_err());
        assert!(verify_and_extract_session_id("ses_abc123", secret).is_err());
        assert!(verify_and_extract_session_id("ses_abc123.zz", secret).is_err());
        assert!(verify_and_extract_session_id(".abcd", secret).is_err());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_session_id();
        let b = generate_session_id();
        assert!(a.starts_with("ses_"));
        assert_ne!(a, b);
        assert!(!a.contains('.'));
    }

    #[test]
    fn test_cookie_attributes() {
        let config = SessionConfig {
            cookie_signing_secret: "secret".to_string(),
            ..SessionConfig::default()
        };
        let cookie = build_session_cookie(&config, "value".to_string());

        assert_eq!(cookie.name(), "sso_demo_session");
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.path(), Some("/"));
    }

    #[test]
    fn test_same_site_policy_mapping() {
        for (policy, expected) in [
            (SameSitePolicy::Strict, SameSite::Strict),
            (SameSitePolicy::Lax, SameSite::Lax),
            (SameSitePolicy::None, SameSite::None),
        ] {
            let config = SessionConfig {
                same_site: policy,
                cookie_domain: Some(".example.com".to_string()),
                ..SessionConfig::default()
            };
            let cookie = build_session_cookie(&config, "value".to_string());
            assert_eq!(cookie.same_site(), Some(expected));
            assert_eq!(cookie.domain(), Some("example.com"));
        }
    }
}
