//! Route definitions for the dedupe backend's versioned API.

macro_rules! v1_path {
    ($path:literal) => {
        concat!("/api/v1", $path)
    };
}

/// Versioned API routes served by the dedupe backend
pub mod v1 {
    pub const ROOT: &str = "/api/v1";

    pub mod movies {
        /// Movies carrying more than one full-quality variant
        pub const DUPLICATES: &str = v1_path!("/movies/duplicates");
        /// Movies carrying sample-sized variants
        pub const SAMPLES: &str = v1_path!("/movies/samples");
        /// One media variant of a movie (DELETE target)
        pub const MEDIA: &str = v1_path!("/movies/{key}/media/{id}");
    }
}

/// Helper utilities for working with route templates
pub mod utils {
    /// Replace multiple path parameters in order.
    pub fn replace_params(
        route: &str,
        params: &[(impl AsRef<str>, impl AsRef<str>)],
    ) -> String {
        let mut path = route.to_string();
        for (param, value) in params {
            path = path.replace(param.as_ref(), value.as_ref());
        }
        path
    }
}
