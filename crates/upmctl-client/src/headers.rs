//! Header sets attached to plugin manager requests.

/// A static list of header name/value pairs.
pub type HeaderSet = &'static [(&'static str, &'static str)];

/// JSON request and response.
pub const DEFAULT: HeaderSet = &[
    ("Content-Type", "application/json"),
    ("Accept", "application/json"),
];

/// Disables the XSRF check on state-changing endpoints.
pub const NO_CHECK: HeaderSet = &[("X-Atlassian-Token", "no-check")];

/// Plain HTML page fetch.
pub const HTML: HeaderSet = &[("Accept", "text/html")];
