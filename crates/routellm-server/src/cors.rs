use http::Method;
use http::header::HeaderName;
use routellm_config::{AnyOrArray, CorsConfig};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};

/// Build a Tower CORS layer from configuration
///
/// A wildcard origin combined with credentials mirrors the request origin,
/// since browsers reject `*` on credentialed requests.
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = match &config.origins {
        AnyOrArray::Any if config.credentials => AllowOrigin::mirror_request(),
        AnyOrArray::Any => AllowOrigin::any(),
        AnyOrArray::List(origins) => {
            let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
            AllowOrigin::list(origins)
        }
    };

    let methods = match &config.methods {
        AnyOrArray::Any if config.credentials => AllowMethods::mirror_request(),
        AnyOrArray::Any => AllowMethods::any(),
        AnyOrArray::List(methods) => {
            let methods: Vec<Method> = methods.iter().filter_map(|m| m.parse().ok()).collect();
            AllowMethods::list(methods)
        }
    };

    let headers = match &config.headers {
        AnyOrArray::Any if config.credentials => AllowHeaders::mirror_request(),
        AnyOrArray::Any => AllowHeaders::any(),
        AnyOrArray::List(headers) => {
            let headers: Vec<HeaderName> = headers.iter().filter_map(|h| h.parse().ok()).collect();
            AllowHeaders::list(headers)
        }
    };

    let mut layer = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers);

    if config.credentials {
        layer = layer.allow_credentials(true);
    }

    if let Some(duration) = config.max_age_duration() {
        layer = layer.max_age(duration);
    }

    layer
}
