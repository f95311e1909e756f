// Public modules
pub mod cast;
pub mod error;
pub mod git;
pub mod output;
pub mod workspace;

// Internal modules - not part of public API
pub(crate) mod paths;

// Public for CLI access
pub mod defaults;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use output::{BulkResult, BulkSummary, ItemOutcome};
