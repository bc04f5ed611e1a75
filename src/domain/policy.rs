//! Self-transfer policy
//!
//! Whether the caller layer lets an account transfer to itself. The engine
//! handles both outcomes consistently; this only decides admission.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelfTransferPolicy {
    /// Refuse `from == to` before any row is written
    #[default]
    Reject,
    /// Process as a net-zero transfer with both entries recorded
    Allow,
}

impl SelfTransferPolicy {
    pub fn permits(&self, from_account_id: i64, to_account_id: i64) -> bool {
        from_account_id != to_account_id || *self == SelfTransferPolicy::Allow
    }
}

impl fmt::Display for SelfTransferPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelfTransferPolicy::Reject => write!(f, "reject"),
            SelfTransferPolicy::Allow => write!(f, "allow"),
        }
    }
}

impl FromStr for SelfTransferPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reject" => Ok(SelfTransferPolicy::Reject),
            "allow" => Ok(SelfTransferPolicy::Allow),
            other => Err(format!("unknown self-transfer policy: {}", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reject_blocks_only_same_account() {
        let policy = SelfTransferPolicy::Reject;
        assert!(policy.permits(1, 2));
        assert!(!policy.permits(7, 7));
    }

    #[test]
    fn test_allow_permits_same_account() {
        assert!(SelfTransferPolicy::Allow.permits(7, 7));
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("ALLOW".parse(), Ok(SelfTransferPolicy::Allow));
        assert_eq!("reject".parse(), Ok(SelfTransferPolicy::Reject));
        assert!("maybe".parse::<SelfTransferPolicy>().is_err());
    }
}
