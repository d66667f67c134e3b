use axum::http::{HeaderValue, Method, header};
use std::io;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Builds the CORS layer from the configured origin list.
///
/// - origins configured: only those origins are allowed
/// - no origins, `permissive_fallback`: any origin is allowed (development)
/// - no origins otherwise: no cross-origin access is granted
///
/// # Errors
/// Returns `InvalidInput` if an origin is not a valid header value.
pub fn create_cors_layer(
    allowed_origins: Option<&[String]>,
    permissive_fallback: bool,
) -> io::Result<CorsLayer> {
    let Some(origins) = allowed_origins.filter(|o| !o.is_empty()) else {
        if permissive_fallback {
            warn!("CORS_ALLOWED_ORIGIN not set, allowing any origin");
            return Ok(CorsLayer::permissive());
        }
        info!("CORS_ALLOWED_ORIGIN not set, cross-origin requests are not allowed");
        return Ok(CorsLayer::new());
    };

    let values = origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid CORS_ALLOWED_ORIGIN value: {}", e),
            )
        })?;

    info!("CORS configured with allowed origins: {}", origins.join(","));

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(values))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_origins_build_layer() {
        let origins = vec!["http://localhost:3000".to_string()];
        assert!(create_cors_layer(Some(origins.as_slice()), false).is_ok());
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let origins = vec!["http://bad\norigin".to_string()];
        let err = create_cors_layer(Some(origins.as_slice()), false).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn test_missing_origins_fall_back() {
        assert!(create_cors_layer(None, true).is_ok());
        assert!(create_cors_layer(Some(&[][..]), false).is_ok());
    }
}
