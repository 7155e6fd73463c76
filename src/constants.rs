// src/constants.rs
//! Domain constants that define the operational boundaries of the system.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Tumblr API boundaries
// ---------------------------------------------------------------------------

/// Root of every v2 API route.
pub const TUMBLR_API_BASE_URL: &str = "https://api.tumblr.com/v2";

/// Poll lifetime used when the caller does not choose one.
///
/// The platform clamps `expire_after` to 1..=7 days on its side; the client
/// sends whatever it is given.
pub const DEFAULT_POLL_EXPIRY: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// The only close mode the poll block is known to accept.
pub const POLL_CLOSE_STATUS: &str = "closed-after";

/// Separator the post endpoints expect between tags.
pub const TAG_SEPARATOR: &str = ", ";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
