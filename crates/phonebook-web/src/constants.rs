// Validation
pub const MAX_JSON_BODY_BYTES: u64 = 16 * 1024; // 16 KiB
