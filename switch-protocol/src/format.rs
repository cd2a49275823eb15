use crate::error::{EncodeError, HexError};
use crate::table::CommandTable;

/// `AA 55 08 ...`
pub fn format_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// `\xAA\x55\x08...`, the body of a byte-string literal.
pub fn format_escaped(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("\\x{:02X}", b)).collect()
}

/// `524541...`, hex digits without separators.
pub fn format_payload_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02X}", b)).collect()
}

/// Renders every entry of `table` as one line of a mapping literal from name to frame.
pub fn format_mapping(table: &CommandTable) -> Result<String, EncodeError> {
    let entries = table
        .encode_all()?
        .iter()
        .map(|(name, frame)| {
            format!(
                "    \"{}\": b\"{}\",\n",
                name,
                format_escaped(&frame.to_bytes())
            )
        })
        .collect::<String>();
    Ok(format!("FRAMES = {{\n{}}}", entries))
}

fn hex_digits(chars: impl Iterator<Item = char>) -> Result<Vec<u8>, HexError> {
    chars
        .map(|c| {
            c.to_digit(16)
                .map(|d| d as u8)
                .ok_or(HexError::InvalidDigit(c))
        })
        .collect()
}

fn pack_pairs(digits: &[u8]) -> Vec<u8> {
    digits.chunks(2).map(|pair| pair[0] << 4 | pair[1]).collect()
}

/// Reads bytes back from any of the renderings above: `AA 55 08`, `AA5508`, `\xAA\x55\x08`
/// or a full `b"\xAA..."` literal. Every `\x` escape must carry exactly two hex digits.
pub fn parse_hex(text: &str) -> Result<Vec<u8>, HexError> {
    let text = text.trim();
    let text = text
        .strip_prefix("b\"")
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);

    if text.contains("\\x") {
        let mut escapes = text.split("\\x");
        if let Some(lead) = escapes.next() {
            if !lead.trim().is_empty() {
                return Err(HexError::MalformedEscape(lead.to_owned()));
            }
        }
        let mut bytes = Vec::new();
        for escape in escapes {
            let escape = escape.trim();
            if escape.chars().count() != 2 {
                return Err(HexError::MalformedEscape(escape.to_owned()));
            }
            bytes.extend(pack_pairs(&hex_digits(escape.chars())?));
        }
        return Ok(bytes);
    }

    let digits = hex_digits(text.chars().filter(|c| !c.is_whitespace()))?;
    if digits.len() % 2 != 0 {
        return Err(HexError::OddLength(digits.len()));
    }

    Ok(pack_pairs(&digits))
}
