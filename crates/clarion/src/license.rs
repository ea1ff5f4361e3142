//! License key checks performed at model creation.

/// Decides whether a license key may create a model.
///
/// Returns a short static reason on rejection; it ends up in
/// [`Error::LicenseRejected`](clarion_core::Error::LicenseRejected).
/// Closures of the right shape implement this trait.
pub trait LicenseCheck {
    /// Accepts or rejects `key`.
    fn check(&self, key: &str) -> Result<(), &'static str>;
}

impl<F> LicenseCheck for F
where
    F: Fn(&str) -> Result<(), &'static str>,
{
    fn check(&self, key: &str) -> Result<(), &'static str> {
        self(key)
    }
}

/// The default check: a well-formed key.
///
/// Non-empty, at most [`KeyFormat::MAX_LEN`] bytes, printable ASCII with no
/// whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyFormat;

impl KeyFormat {
    /// Longest accepted key in bytes.
    pub const MAX_LEN: usize = 1024;
}

impl LicenseCheck for KeyFormat {
    fn check(&self, key: &str) -> Result<(), &'static str> {
        if key.is_empty() {
            return Err("empty key");
        }
        if key.len() > Self::MAX_LEN {
            return Err("key too long");
        }
        if !key.bytes().all(|b| b.is_ascii_graphic()) {
            return Err("key contains whitespace or non-printable characters");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_format() {
        assert_eq!(KeyFormat.check("valid-key"), Ok(()));
        assert_eq!(KeyFormat.check(""), Err("empty key"));
        assert!(KeyFormat.check("has space").is_err());
        assert!(KeyFormat.check("tab\tkey").is_err());
        assert!(KeyFormat.check("ключ").is_err());
        assert!(KeyFormat.check(&"k".repeat(1024)).is_ok());
        assert_eq!(KeyFormat.check(&"k".repeat(1025)), Err("key too long"));
    }

    #[test]
    fn closure_check() {
        let only_demo = |key: &str| if key == "demo" { Ok(()) } else { Err("not demo") };
        assert!(only_demo.check("demo").is_ok());
        assert_eq!(only_demo.check("valid-key"), Err("not demo"));
    }
}
