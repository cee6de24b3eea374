/// XML 1.0 allows tab, newline, carriage return and everything from
/// U+0020 up except the surrogate block and U+FFFE/U+FFFF.
fn is_valid_xml_char(c: char) -> bool {
    matches!(
        c as u32,
        0x09 | 0x0A | 0x0D | 0x20..=0xD7FF | 0xE000..=0xFFFD | 0x10000..=0x10FFFF
    )
}

/// Escape text for element content or a double-quoted attribute, dropping
/// characters XML cannot carry at all.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars().filter(|&c| is_valid_xml_char(c)) {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Make serialized JSON safe to inline in a `<script>` element.
///
/// `<` only occurs inside JSON strings, where `\u003c` decodes back to it,
/// so neither `</script` nor `<!--` survives.
pub fn escape_script_json(json: &str) -> String {
    json.replace('<', "\\u003c")
}

/// Format a coordinate with at most two decimals and no trailing zeros.
pub fn num(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}
