//! Zone name helpers
//!
//! Names handled here are plain strings: no label syntax is validated and
//! comparisons are literal (case-sensitive).

/// Token used by the provider for the zone apex
pub const APEX: &str = "@";

/// Strip exactly one leading and one trailing dot, if present
///
/// ```
/// use dns_tools_core::zone::normalize_zone_name;
///
/// assert_eq!(normalize_zone_name(".example.com."), "example.com");
/// assert_eq!(normalize_zone_name("example.com"), "example.com");
/// ```
pub fn normalize_zone_name(zone: &str) -> String {
    let zone = zone.strip_prefix('.').unwrap_or(zone);
    let zone = zone.strip_suffix('.').unwrap_or(zone);
    zone.to_string()
}

/// Whether `name` is the zone apex or lies below it at a label boundary
pub fn is_in_zone(name: &str, zone: &str) -> bool {
    relative_name(name, zone).is_some()
}

/// Name relative to `zone`, `@` for the apex, `None` if outside the zone
pub fn relative_name(name: &str, zone: &str) -> Option<String> {
    if name == zone {
        return Some(APEX.to_string());
    }

    let prefix = name.strip_suffix(zone)?.strip_suffix('.')?;
    if prefix.is_empty() {
        // ".example.com" has an empty leading label
        return Some(APEX.to_string());
    }
    Some(prefix.to_string())
}

/// Fully qualified owner name (without trailing dot) for a relative name
pub fn absolute_name(relative: &str, zone: &str) -> String {
    if relative == APEX {
        zone.to_string()
    } else {
        format!("{}.{}", relative, zone)
    }
}

/// Dot-terminate a target name, appending the zone when it is relative
///
/// Returns the qualified name and whether the zone had to be appended.
pub fn qualify_target(target: &str, zone: &str) -> (String, bool) {
    if target.ends_with('.') {
        (target.to_string(), false)
    } else {
        (format!("{}.{}.", target, zone), true)
    }
}
