//! Centralized default constants for memo.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates should reference these constants instead of defining their own
//! magic numbers.

use uuid::Uuid;

// =============================================================================
// NOTES
// =============================================================================

/// Reserved identifier no real note holds; "delete all" removes every row
/// whose id differs from it.
pub const SENTINEL_NOTE_ID: Uuid = Uuid::nil();

/// Category filter value that disables category filtering.
pub const CATEGORY_FILTER_ALL: &str = "all";

// =============================================================================
// GENERATION
// =============================================================================

/// Maximum number of content characters included in a tag suggestion prompt.
pub const TAG_PROMPT_CONTENT_CHARS: usize = 1000;

/// Maximum number of tags returned by tag suggestion.
pub const MAX_SUGGESTED_TAGS: usize = 5;

/// Default generative-language model.
pub const GEN_MODEL: &str = "gemini-2.0-flash-001";

/// Default generative-language API base URL.
pub const GEN_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Default generation request timeout in seconds.
pub const GEN_TIMEOUT_SECS: u64 = 120;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Default request body limit in bytes (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

// =============================================================================
// LOCAL CACHE
// =============================================================================

/// Local cache file name under the user data directory.
pub const LOCAL_CACHE_FILE: &str = "memos.json";
