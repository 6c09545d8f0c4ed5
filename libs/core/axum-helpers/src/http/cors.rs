use tower_http::cors::CorsLayer;

/// CORS layer allowing any origin, method and header.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}
