use std::fmt;

/// Backing store family, chosen from the literal prefix of a base location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Http,
    S3,
    Gs,
    Generic,
}

impl Scheme {
    /// Prefix match in order `http:`/`https:`, `s3:`, `gs:`. Anything else is `Generic`.
    pub fn classify(base: &str) -> Self {
        if base.starts_with("http:") || base.starts_with("https:") {
            Scheme::Http
        } else if base.starts_with("s3:") {
            Scheme::S3
        } else if base.starts_with("gs:") {
            Scheme::Gs
        } else {
            Scheme::Generic
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Scheme::Http => "http",
            Scheme::S3 => "s3",
            Scheme::Gs => "gs",
            Scheme::Generic => "generic",
        };
        f.write_str(name)
    }
}
