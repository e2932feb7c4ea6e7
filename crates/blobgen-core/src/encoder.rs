//! Byte array literal encoding.
//!
//! Each file becomes one `static const unsigned char tempN[]` array of
//! decimal literals. Arrays are numbered by a per-run counter, so the array
//! symbols never collide even when two files sanitize to the same
//! identifier.
//!
//! ## Layout
//!
//! ```text
//! static const unsigned char temp1[] = {137,80,78,71,...,
//!   12,0,0};
//! ```
//!
//! A line break follows every [`BYTES_PER_LINE`]th value. After the last
//! content byte [`SENTINEL_LEN`] zero bytes are appended; they are not part
//! of the reported size.

/// Values written per line of the array literal
pub const BYTES_PER_LINE: usize = 40;

/// Number of zero bytes appended after the content
pub const SENTINEL_LEN: usize = 2;

/// Line terminator used in generated files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`, byte-compatible with the legacy generator
    #[default]
    Crlf,
    /// `\n`
    Lf,
}

impl LineEnding {
    /// Returns the terminator string
    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Crlf => "\r\n",
            LineEnding::Lf => "\n",
        }
    }
}

/// One encoded file: the array literal and the number in its symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedPayload {
    /// Counter value used in the array symbol (`temp<symbol>`)
    pub symbol: u32,
    /// Complete array definition, terminated by a line ending
    pub literal: String,
}

impl EncodedPayload {
    /// Returns the array symbol name
    pub fn symbol_name(&self) -> String {
        format!("temp{}", self.symbol)
    }
}

/// Serializes file contents into numbered array literals
#[derive(Debug, Clone, Default)]
pub struct ByteArrayEncoder {
    counter: u32,
    line_ending: LineEnding,
}

impl ByteArrayEncoder {
    /// Creates an encoder whose first array is `temp1`
    pub fn new(line_ending: LineEnding) -> Self {
        Self {
            counter: 0,
            line_ending,
        }
    }

    /// Encodes `data` into the next numbered array
    pub fn encode(&mut self, data: &[u8]) -> EncodedPayload {
        self.counter += 1;
        let nl = self.line_ending.as_str();

        // "255," is the widest entry
        let mut literal = String::with_capacity(64 + data.len() * 4);
        literal.push_str(&format!("static const unsigned char temp{}[] = {{", self.counter));

        if let Some((last, rest)) = data.split_last() {
            for (i, byte) in rest.iter().enumerate() {
                literal.push_str(&byte.to_string());
                literal.push(',');
                if i % BYTES_PER_LINE == BYTES_PER_LINE - 1 {
                    literal.push_str(nl);
                    literal.push_str("  ");
                }
            }
            literal.push_str(&last.to_string());
            literal.push(',');
        }

        literal.push_str(&["0"; SENTINEL_LEN].join(","));
        literal.push_str("};");
        literal.push_str(nl);

        EncodedPayload {
            symbol: self.counter,
            literal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Extracts the numeric entries between the braces
    fn entries(literal: &str) -> Vec<u8> {
        let open = literal.find('{').unwrap();
        let close = literal.rfind('}').unwrap();
        literal[open + 1..close]
            .split(',')
            .map(|s| s.trim().parse().unwrap())
            .collect()
    }

    #[test]
    fn test_small_payload() {
        let mut encoder = ByteArrayEncoder::new(LineEnding::Crlf);
        let payload = encoder.encode(&[1, 2, 255]);
        assert_eq!(
            payload.literal,
            "static const unsigned char temp1[] = {1,2,255,0,0};\r\n"
        );
        assert_eq!(payload.symbol_name(), "temp1");
    }

    #[test]
    fn test_single_byte() {
        let mut encoder = ByteArrayEncoder::new(LineEnding::Lf);
        let payload = encoder.encode(&[42]);
        assert_eq!(payload.literal, "static const unsigned char temp1[] = {42,0,0};\n");
        assert_eq!(entries(&payload.literal), [42, 0, 0]);
    }

    #[test]
    fn test_empty_payload_still_has_sentinel() {
        let mut encoder = ByteArrayEncoder::default();
        let payload = encoder.encode(&[]);
        assert_eq!(entries(&payload.literal), [0, 0]);
    }

    #[test]
    fn test_sentinel_count() {
        let mut encoder = ByteArrayEncoder::default();
        for n in [2usize, 39, 40, 41, 80, 81, 1000] {
            let data: Vec<u8> = (0..n).map(|i| (i % 251) as u8 + 1).collect();
            let parsed = entries(&encoder.encode(&data).literal);
            assert_eq!(parsed.len(), n + SENTINEL_LEN);
            assert_eq!(&parsed[..n], &data[..]);
            assert_eq!(&parsed[n..], &[0, 0]);
        }
    }

    #[test]
    fn test_line_breaks() {
        let mut encoder = ByteArrayEncoder::new(LineEnding::Lf);

        // exactly 40 values: the break would follow the last one, which is
        // written outside the loop
        let literal = encoder.encode(&[7; 40]).literal;
        assert_eq!(literal.matches('\n').count(), 1);

        let literal = encoder.encode(&[7; 41]).literal;
        let lines: Vec<_> = literal.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("7,7,"));
        assert_eq!(lines[1], "  7,0,0};");
        assert_eq!(lines[0].matches('7').count(), 40);
    }

    #[test]
    fn test_counter_is_per_encoder() {
        let mut first = ByteArrayEncoder::default();
        assert_eq!(first.encode(&[1]).symbol, 1);
        assert_eq!(first.encode(&[1]).symbol, 2);

        let mut second = ByteArrayEncoder::default();
        assert_eq!(second.encode(&[1]).symbol, 1);
    }
}
