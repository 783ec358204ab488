pub const MAX_DEPTH: usize = 256;

pub(crate) const OPEN: u8 = b'[';
pub(crate) const CLOSE: u8 = b']';

/// Per-file attributes of an upload payload, in output order.
pub const UPLOAD_ATTRIBUTES: &[&str] = &["name", "full_path", "type", "tmp_name", "error", "size"];

#[inline]
pub fn is_upload_attribute(s: &str) -> bool {
    UPLOAD_ATTRIBUTES.contains(&s)
}
