/// Validate a required text field with a max length (in characters).
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an uploaded image: `image/*` content type, non-empty, at most `max_bytes`.
pub fn validate_image(content_type: &str, len: usize, max_bytes: usize) -> Option<String> {
    if !content_type.trim().to_ascii_lowercase().starts_with("image/") {
        return Some("Please upload an image file".to_string());
    }
    if len == 0 {
        return Some("Uploaded file is empty".to_string());
    }
    if len > max_bytes {
        return Some(format!("File size should be less than {}MB", max_bytes / (1024 * 1024)));
    }
    None
}
