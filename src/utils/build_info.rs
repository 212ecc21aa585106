/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("INQUIRY_CORE_BUILD_HASH").unwrap_or("unknown"),
        git_status: option_env!("INQUIRY_CORE_BUILD_STATUS").unwrap_or("unknown"),
        timestamp: option_env!("INQUIRY_CORE_BUILD_TIMESTAMP").unwrap_or("unknown"),
        target: option_env!("INQUIRY_CORE_BUILD_TARGET").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// One-line banner shown by the CLI version flag.
    pub fn banner(&self) -> String {
        format!(
            "inquiry_core {} ({} {}, built {}, {})",
            self.version, self.git_hash, self.git_status, self.timestamp, self.target
        )
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn banner_includes_the_crate_version() {
        let banner = super::current().banner();
        assert!(banner.contains(env!("CARGO_PKG_VERSION")));
    }
}
