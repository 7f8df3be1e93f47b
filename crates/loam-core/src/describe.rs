//! The diagnostic summary hook.

use std::fmt;

/// One-line human-readable summary of an allocator object.
///
/// An external diagnostic collaborator (a leak tracker, a periodic snapshot
/// logger) may hold references to loam objects and call [`describe`] on
/// demand. Nothing in loam requires such a collaborator to exist, and no
/// loam type ever calls `describe` on itself.
///
/// `label` is chosen by the collaborator (typically the call site or a
/// registration name) and should lead the line.
///
/// [`describe`]: Describe::describe
pub trait Describe {
    /// Write a one-line summary of this object to `out`.
    fn describe(&self, label: &str, out: &mut dyn fmt::Write) -> fmt::Result;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(usize);

    impl Describe for Fixed {
        fn describe(&self, label: &str, out: &mut dyn fmt::Write) -> fmt::Result {
            write!(out, "{label}: fixed {}", self.0)
        }
    }

    #[test]
    fn describe_writes_single_line() {
        let mut line = String::new();
        Fixed(7).describe("unit", &mut line).unwrap();
        assert_eq!(line, "unit: fixed 7");
        assert!(!line.contains('\n'));
    }
}
