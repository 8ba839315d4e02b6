//! Configuration options for object validation behavior

// ============================================================================
// Extra Field Handling
// ============================================================================

/// How an object schema treats keys that are not part of its shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExtraFields {
    /// Accept extra keys but leave them out of the validated output (default)
    #[default]
    Ignore,
    /// Accept extra keys and copy them into the validated output
    Allow,
    /// Reject extra keys with an `object.strict` error
    Forbid,
}

impl ExtraFields {
    /// Whether unknown keys are copied into the output
    pub fn keeps_extra(self) -> bool {
        matches!(self, Self::Allow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ignores_extra() {
        assert_eq!(ExtraFields::default(), ExtraFields::Ignore);
        assert!(!ExtraFields::Ignore.keeps_extra());
        assert!(ExtraFields::Allow.keeps_extra());
        assert!(!ExtraFields::Forbid.keeps_extra());
    }
}
