use axum::http::Request;
use std::net::IpAddr;
use tower_governor::{key_extractor::KeyExtractor, GovernorError};

/// IP key extractor with fallback for Docker/local development.
/// Tries X-Forwarded-For, X-Real-IP, then peer address, then localhost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FallbackIpKeyExtractor;

impl KeyExtractor for FallbackIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        // X-Forwarded-For first (reverse proxies); take the first hop
        if let Some(xff) = req.headers().get("x-forwarded-for")
            && let Ok(xff_str) = xff.to_str()
            && let Some(first_ip) = xff_str.split(',').next()
            && let Ok(ip) = first_ip.trim().parse::<IpAddr>()
        {
            return Ok(ip);
        }

        // X-Real-IP next
        if let Some(real_ip) = req.headers().get("x-real-ip")
            && let Ok(ip_str) = real_ip.to_str()
            && let Ok(ip) = ip_str.parse::<IpAddr>()
        {
            return Ok(ip);
        }

        // Peer address from extensions
        if let Some(connect_info) = req
            .extensions()
            .get::<axum::extract::ConnectInfo<std::net::SocketAddr>>()
        {
            return Ok(connect_info.0.ip());
        }

        // All requests without an identifiable IP share one bucket
        Ok(IpAddr::V4(std::net::Ipv4Addr::new(127, 0, 0, 1)))
    }
}
