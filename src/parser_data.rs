// ---------------------------------------------------------------------------
// Internal data structs carried inside CompiledParser<T>
// ---------------------------------------------------------------------------

pub(crate) struct SignatureData {
    pub name: String,
}

pub(crate) struct AndroidBrowserData {
    pub name: String,
    pub package: String,
}

pub(crate) struct ProbeData {
    pub name: String,
    pub support: Support,
}

/// Support verdict attached to a version probe.
pub(crate) enum Support {
    /// Supported when the captured version is at least this.
    Minimum(String),
    /// Every version is supported.
    Any,
    /// No version is supported.
    Never,
}

impl Support {
    /// A version that cannot be read never meets a minimum.
    pub fn allows(&self, version: &str) -> bool {
        match self {
            Self::Minimum(min) => crate::helpers::version_ge(version, min).unwrap_or(false),
            Self::Any => true,
            Self::Never => false,
        }
    }
}
