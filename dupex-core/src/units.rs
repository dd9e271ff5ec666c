use std::fmt;

/// A strongly-typed byte size.
///
/// Base-1024 throughout, rendered with the short KB/MB/GB/TB labels the
/// library dashboards use for reclaimable-space readouts.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteSize(u64);

impl ByteSize {
    pub const ZERO: Self = Self(0);
    const KB: f64 = 1024.0;
    const MB: f64 = 1024.0 * 1024.0;
    const GB: f64 = 1024.0 * 1024.0 * 1024.0;
    const TB: f64 = 1024.0 * 1024.0 * 1024.0 * 1024.0;

    pub const fn from_bytes(bytes: u64) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(self) -> u64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl fmt::Debug for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.0 as f64;
        if bytes >= Self::TB {
            write!(f, "{:.2} TB", bytes / Self::TB)
        } else if bytes >= Self::GB {
            write!(f, "{:.2} GB", bytes / Self::GB)
        } else if bytes >= Self::MB {
            write!(f, "{:.1} MB", bytes / Self::MB)
        } else if bytes >= Self::KB {
            write!(f, "{:.1} KB", bytes / Self::KB)
        } else {
            write!(f, "{} B", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ByteSize;

    #[test]
    fn display_picks_the_largest_fitting_unit() {
        assert_eq!(ByteSize::from_bytes(0).to_string(), "0 B");
        assert_eq!(ByteSize::from_bytes(999).to_string(), "999 B");
        assert_eq!(ByteSize::from_bytes(1536).to_string(), "1.5 KB");
        assert_eq!(
            ByteSize::from_bytes(2_684_354_560).to_string(),
            "2.50 GB"
        );
        assert_eq!(
            ByteSize::from_bytes(5_497_558_138_880).to_string(),
            "5.00 TB"
        );
    }

    #[test]
    fn saturating_arithmetic_never_wraps() {
        let max = ByteSize::from_bytes(u64::MAX);
        assert_eq!(max.saturating_add(ByteSize::from_bytes(1)), max);
        assert_eq!(
            ByteSize::ZERO.saturating_sub(ByteSize::from_bytes(1)),
            ByteSize::ZERO
        );
    }
}
