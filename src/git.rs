//! Git access: checkouts, history walks and commit diffs.

pub mod checkout;
pub mod commit;
pub mod history;

pub use checkout::CheckoutStore;
pub use commit::GitCandidate;
pub use history::recent_commits;

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;
