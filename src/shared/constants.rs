/// Default page size for pagination
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum page size allowed
pub const MAX_PAGE_SIZE: i64 = 100;

// =============================================================================
// TOKEN CLAIMS
// =============================================================================

/// Name of the token claim carrying the caller's region
pub const REGION_CLAIM: &str = "Region";

// =============================================================================
// PASSWORD POLICY
// =============================================================================

pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Current API version segment
pub const API_VERSION: &str = "v1";
