use crate::config::OutputFormat;
use std::io::Write;

/// Format bytes as lower-case hex, `width` bytes per line (0 for one line)
pub fn hex_dump(bytes: &[u8], width: usize) -> String {
    let width = if width == 0 { bytes.len().max(1) } else { width };
    let mut out = String::with_capacity(bytes.len() * 3);
    for line in bytes.chunks(width) {
        let hex: Vec<String> = line.iter().map(|b| format!("{:02x}", b)).collect();
        out.push_str(&hex.join(" "));
        out.push('\n');
    }
    out
}

/// Write the encoded message in the requested format
pub fn write_output<W: Write>(
    out: &mut W,
    bytes: &[u8],
    format: OutputFormat,
    hex_line_width: usize,
) -> std::io::Result<()> {
    match format {
        OutputFormat::Hex => out.write_all(hex_dump(bytes, hex_line_width).as_bytes()),
        OutputFormat::Binary => out.write_all(bytes),
    }?;
    out.flush()
}
