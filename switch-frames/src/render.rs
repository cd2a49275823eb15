use clap::ValueEnum;
use switch_protocol::{
    format_escaped, format_hex, format_mapping, format_payload_hex, CommandTable, EncodeError,
    Frame,
};

const WIDTH: usize = 80;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Every rendering of every frame, then the two summaries
    All,
    /// Name, command, hex, escaped bytes, payload and checksum per frame
    Full,
    /// One `NAME: AA 55 ..` line per frame
    Hex,
    /// A mapping literal from name to escaped frame bytes
    Mapping,
}

fn rule(c: char) -> String {
    std::iter::repeat(c).take(WIDTH).collect()
}

pub fn render_entry(name: &str, frame: &Frame) -> String {
    let bytes = frame.to_bytes();
    [
        format!("{}:", name),
        format!("  Command: '{}'", frame.payload()),
        format!("  Hex: {}", format_hex(&bytes)),
        format!("  Bytes: b\"{}\"", format_escaped(&bytes)),
        format!("  Payload: {}", format_payload_hex(frame.payload_bytes())),
        format!("  Checksum: 0x{:02X}", frame.checksum()),
    ]
    .join("\n")
}

pub fn render_full(table: &CommandTable) -> Result<String, EncodeError> {
    let entries = table
        .encode_all()?
        .iter()
        .map(|(name, frame)| render_entry(name, frame))
        .collect::<Vec<_>>();
    Ok(entries.join("\n\n"))
}

pub fn render_hex(table: &CommandTable) -> Result<String, EncodeError> {
    let lines = table
        .encode_all()?
        .iter()
        .map(|(name, frame)| format!("{}: {}", name, format_hex(&frame.to_bytes())))
        .collect::<Vec<_>>();
    Ok(lines.join("\n"))
}

pub fn render(table: &CommandTable, format: Format) -> Result<String, EncodeError> {
    match format {
        Format::Full => render_full(table),
        Format::Hex => render_hex(table),
        Format::Mapping => format_mapping(table),
        Format::All => Ok([
            "Switch controller frames".to_owned(),
            rule('='),
            render_full(table)?,
            String::new(),
            rule('='),
            "Hex only:".to_owned(),
            rule('-'),
            render_hex(table)?,
            String::new(),
            rule('='),
            "Mapping:".to_owned(),
            rule('-'),
            format_mapping(table)?,
        ]
        .join("\n")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> CommandTable {
        [("RELAY_ON", "RELAY_ON"), ("SET_TIME_XX_XX_XX", "SET_TIME=03,07,00")]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_render_entry() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            render_entry("RELAY_ON", &Frame::new("RELAY_ON")?),
            [
                "RELAY_ON:",
                "  Command: 'RELAY_ON'",
                "  Hex: AA 55 08 52 45 4C 41 59 5F 4F 4E 79",
                r#"  Bytes: b"\xAA\x55\x08\x52\x45\x4C\x41\x59\x5F\x4F\x4E\x79""#,
                "  Payload: 52454C41595F4F4E",
                "  Checksum: 0x79",
            ]
            .join("\n")
        );
        Ok(())
    }

    #[test]
    fn test_render_hex() -> Result<(), Box<dyn std::error::Error>> {
        assert_eq!(
            render(&small_table(), Format::Hex)?,
            "RELAY_ON: AA 55 08 52 45 4C 41 59 5F 4F 4E 79\n\
             SET_TIME_XX_XX_XX: AA 55 11 53 45 54 5F 54 49 4D 45 3D 30 33 2C 30 37 2C 30 30 39"
        );
        Ok(())
    }

    #[test]
    fn test_render_all() -> Result<(), Box<dyn std::error::Error>> {
        let out = render(&small_table(), Format::All)?;
        let lines = out.lines().collect::<Vec<_>>();

        assert_eq!(lines[0], "Switch controller frames");
        assert_eq!(lines[1], "=".repeat(WIDTH));
        assert_eq!(lines[2], "RELAY_ON:");
        assert!(lines.contains(&"Hex only:"));
        assert!(lines.contains(&"Mapping:"));
        assert!(lines.contains(&"FRAMES = {"));
        assert_eq!(lines.last(), Some(&"}"));
        assert_eq!(lines.iter().filter(|l| **l == "-".repeat(WIDTH)).count(), 2);
        Ok(())
    }

    #[test]
    fn test_render_default_table() -> Result<(), Box<dyn std::error::Error>> {
        let out = render(&CommandTable::default(), Format::Hex)?;
        assert_eq!(out.lines().count(), 14);
        assert!(out.contains("CLEAR_ALARMS: AA 55 0C 43 4C 45 41 52 5F 41 4C 41 52 4D 53 86"));
        Ok(())
    }

    #[test]
    fn test_render_oversized() {
        let mut table = small_table();
        table.insert("HUGE", "X".repeat(256));
        assert!(render(&table, Format::Mapping).is_err());
    }
}
