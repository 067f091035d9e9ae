// Literal syntax: decimal (optionally negative), 0x-prefixed hex,
// or a single character in single quotes ('A').

pub fn parse_literal(s: &str) -> Option<i64> {
    if let Some(rest) = s.strip_prefix('\'') {
        let rest = rest.strip_suffix('\'')?;
        let mut chars = rest.chars();
        let c = chars.next()?;
        return match chars.next() {
            None => Some(c as i64),
            Some(_) => None,
        };
    }

    let (sign, body) = match s.strip_prefix('-') {
        Some(body) => (-1, body),
        None => (1, s),
    };
    let value = match body.strip_prefix("0x") {
        Some(hex) => i64::from_str_radix(hex, 16),
        None => body.parse::<i64>(),
    };
    value.ok().map(|v| sign * v)
}

#[test]
fn test() {
    assert_eq!(parse_literal("42"), Some(42));
    assert_eq!(parse_literal("-1"), Some(-1));
    assert_eq!(parse_literal("0x1F"), Some(31));
    assert_eq!(parse_literal("-0x10"), Some(-16));
    assert_eq!(parse_literal("'A'"), Some(65));
    assert_eq!(parse_literal("''"), None);
    assert_eq!(parse_literal("'AB'"), None);
    assert_eq!(parse_literal("main"), None);
    assert_eq!(parse_literal(""), None);
}
