use serenity::all::Timestamp;

/// Parses a colour written as six hex digits, optionally prefixed with '#'.
pub fn parse_hex_colour(value: &str) -> anyhow::Result<u32> {
    let digits = value.trim().strip_prefix('#').unwrap_or(value.trim());
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("`{value}` is not a six-digit hex colour");
    }
    Ok(u32::from_str_radix(digits, 16)?)
}

/// Discord markup that each client renders as "x minutes ago" in its own locale.
pub fn relative_timestamp(at: Timestamp) -> String {
    format!("<t:{}:R>", at.unix_timestamp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_colour() {
        assert_eq!(parse_hex_colour("5865F2").unwrap(), 0x5865F2);
        assert_eq!(parse_hex_colour("#5865f2").unwrap(), 0x5865F2);
        assert_eq!(parse_hex_colour(" 000000 ").unwrap(), 0);

        assert!(parse_hex_colour("").is_err());
        assert!(parse_hex_colour("#FFF").is_err());
        assert!(parse_hex_colour("5865F2AA").is_err());
        assert!(parse_hex_colour("GG65F2").is_err());
        assert!(parse_hex_colour("+58652").is_err());
        assert!(parse_hex_colour("##5865F").is_err());
    }

    #[test]
    fn test_relative_timestamp() {
        let at = Timestamp::from_unix_timestamp(1_700_000_000).unwrap();
        assert_eq!(relative_timestamp(at), "<t:1700000000:R>");
    }
}
