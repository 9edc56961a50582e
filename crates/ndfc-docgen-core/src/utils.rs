//! Name and output helpers

use serde::Serialize;

/// Convert a controller parameter name to snake_case.
///
/// UPPER_SNAKE names are lowercased, camelCase humps become underscores, and
/// any other separator collapses to a single underscore.
pub fn to_snake_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    let mut prev_is_lowercase = false;

    for ch in s.chars() {
        if ch.is_uppercase() {
            if prev_is_lowercase {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
            prev_is_lowercase = false;
        } else if ch.is_alphanumeric() {
            out.push(ch);
            prev_is_lowercase = ch.is_lowercase();
        } else {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            prev_is_lowercase = false;
        }
    }

    out.trim_end_matches('_').to_string()
}

/// Pretty-print JSON with a four space indent
pub fn to_json_pretty<T: Serialize + ?Sized>(value: &T) -> crate::Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_snake_case() {
        assert_eq!(to_snake_case("BGP_AS"), "bgp_as");
        assert_eq!(to_snake_case("enableRealTimeBackup"), "enable_real_time_backup");
        assert_eq!(to_snake_case("scheduledTime"), "scheduled_time");
        assert_eq!(to_snake_case("VPC_ENABLE_IPv6_ND_SYNC"), "vpc_enable_ipv6_nd_sync");
        assert_eq!(to_snake_case("default_vrf"), "default_vrf");
        assert_eq!(to_snake_case("ENABLE_NETFLOW"), "enable_netflow");
        assert_eq!(to_snake_case("fabric-name"), "fabric_name");
        assert_eq!(to_snake_case("a__b_"), "a_b");
    }

    #[test]
    fn test_to_json_pretty_indent() -> crate::Result<()> {
        let out = to_json_pretty(&json!({"module": "dcnm_fabric"}))?;
        assert_eq!(out, "{\n    \"module\": \"dcnm_fabric\"\n}");
        Ok(())
    }
}
