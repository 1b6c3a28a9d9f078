/// Errors produced by the `railbook-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A request path was empty or not rooted at `/`.
    #[error("invalid request path '{path}': must start with '/'")]
    InvalidPath { path: String },

    /// Route resolution followed more redirects than allowed.
    #[error("redirect loop while resolving '{path}' (gave up after {hops} hops)")]
    RedirectLoop { path: String, hops: usize },

    /// No route matched and the table has no catch-all entry.
    #[error("no route matches '{path}'")]
    NoRoute { path: String },
}
