//! Symbol- and filesystem-safe names

/// Replaces spaces with hyphens and drops every character that is not an ASCII letter, digit, or hyphen.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect()
}

/// The base name shared by the output folder and the sketch file.
///
/// Two devices whose sanitized name and address coincide map to the same folder; the later run overwrites the
/// earlier sketch.
pub fn folder_name(name: &str, address: &str) -> String {
    format!("{}-{}", sanitize(name), sanitize(address)).to_lowercase()
}
