//! Identifier normalization from database names to Java names.

/// Converts a database identifier to Java class-name casing.
///
/// Spaces and underscores separate segments; each segment is capitalized and
/// the rest of it lowercased: `customer_order` becomes `CustomerOrder`.
/// Applying it again is only a no-op when the input has no separators.
pub fn to_class_name(raw: &str) -> String {
    let mut name = String::with_capacity(raw.len());
    let mut capitalize_next = true;

    for ch in raw.chars() {
        if ch == ' ' || ch == '_' {
            capitalize_next = true;
        } else if capitalize_next {
            name.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            name.extend(ch.to_lowercase());
        }
    }

    name
}

/// Converts a database identifier to Java field-name casing: `customerOrder`
pub fn to_field_name(raw: &str) -> String {
    let class_name = to_class_name(raw);
    let mut chars = class_name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Normalizes a package name: lowercase, invalid characters replaced with `_`,
/// segments starting with a digit prefixed with `_`.
pub fn to_package_name(raw: &str) -> String {
    raw.to_lowercase()
        .split('.')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let cleaned: String = segment
                .chars()
                .map(|ch| {
                    if ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_' {
                        ch
                    } else {
                        '_'
                    }
                })
                .collect();

            if cleaned.starts_with(|ch: char| ch.is_ascii_digit()) {
                format!("_{cleaned}")
            } else {
                cleaned
            }
        })
        .collect::<Vec<_>>()
        .join(".")
}

/// Default package for a user: `user@corp.com` becomes `com.corp.user.model`
pub fn default_package_for_email(email: &str) -> String {
    let reversed = email
        .replace('@', ".")
        .split('.')
        .rev()
        .collect::<Vec<_>>()
        .join(".");

    to_package_name(&format!("{reversed}.model"))
}
