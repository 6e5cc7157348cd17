//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two limiters, both keyed by client IP:
//! - `form_rate_limiter`: Strict limits for the admin login and contact posts (~10/min)
//! - `api_rate_limiter`: Relaxed limits for the JSON endpoints (~100/min)

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{extract::ConnectInfo, http::Request};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

// =============================================================================
// Client IP Key Extractor
// =============================================================================

/// Custom key extractor that checks Cloudflare's `CF-Connecting-IP` header first,
/// then falls back to standard proxy headers and finally the peer address.
#[derive(Clone, Copy)]
pub struct CloudflareIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for CloudflareIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // Try CF-Connecting-IP first (Cloudflare's real client IP)
        if let Some(ip) = headers
            .get("cf-connecting-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try X-Forwarded-For (first IP in the chain)
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try X-Real-IP
        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Try Fly-Client-IP (Fly.io's header)
        if let Some(ip) = headers
            .get("fly-client-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // Direct connections: the peer address
        if let Some(ConnectInfo(addr)) = req.extensions().get::<ConnectInfo<SocketAddr>>() {
            return Ok(addr.ip());
        }

        Err(GovernorError::UnableToExtractKey)
    }
}

// =============================================================================
// Rate Limiter Configuration
// =============================================================================

/// Rate limiter layer type for Axum.
///
/// Uses `CloudflareIpKeyExtractor` to get the real client IP from Cloudflare
/// and Fly.io proxy headers.
pub type RateLimiterLayer =
    GovernorLayer<CloudflareIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for form posts: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
/// Applied to admin login and contact submissions.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(6)` and `burst_size(5)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn form_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(CloudflareIpKeyExtractor)
        .per_second(6) // Replenish 1 token every 6 seconds (~10/minute)
        .burst_size(5) // Allow burst of 5 requests
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for general API: ~100 requests per minute per IP.
///
/// Configuration: 1 request per second (replenish), burst of 50.
/// Applied to the `/api` routes.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(1)` and `burst_size(50)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn api_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(CloudflareIpKeyExtractor)
        .per_second(1) // Replenish quickly
        .burst_size(50) // Allow burst of 50 requests
        .finish()
        .expect("rate limiter config with per_second(1) and burst_size(50) is valid");
    GovernorLayer::new(Arc::new(config))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tower_governor::key_extractor::KeyExtractor;

    use super::*;

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri("/contact");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_cloudflare_header_wins() {
        let req = request(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("cf-connecting-ip", "203.0.113.7"),
        ]);
        let ip = CloudflareIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip.to_string(), "203.0.113.7");
    }

    #[test]
    fn test_first_forwarded_address_used() {
        let req = request(&[("x-forwarded-for", "198.51.100.2, 10.0.0.1")]);
        let ip = CloudflareIpKeyExtractor.extract(&req).unwrap();
        assert_eq!(ip.to_string(), "198.51.100.2");
    }

    #[test]
    fn test_missing_headers_is_an_error() {
        assert!(CloudflareIpKeyExtractor.extract(&request(&[])).is_err());
    }
}
