use std::fmt;

use itertools::Itertools;

use super::errors::ParseError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Text encodings hand history files are written in.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Utf8,
    /// ISO-8859-1, every byte is the code point of the same value.
    Latin1,
}

impl Encoding {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Some(Encoding::Utf8),
            "latin1" | "latin-1" | "iso-8859-1" | "iso8859-1" => Some(Encoding::Latin1),
            _ => None,
        }
    }

    /// Decode a complete buffer. `None` if the bytes are not valid in this
    /// encoding.
    pub fn decode(self, bytes: &[u8]) -> Option<String> {
        match self {
            Encoding::Utf8 => {
                let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
                std::str::from_utf8(bytes).ok().map(str::to_string)
            }
            Encoding::Latin1 => Some(bytes.iter().map(|b| char::from(*b)).collect()),
        }
    }

    /// Decode as much of a growing buffer as possible.
    ///
    /// Returns the text and how many bytes it used. A multi byte sequence
    /// cut off at the end of the buffer is left for the next call.
    pub fn decode_prefix(self, bytes: &[u8]) -> Option<(String, usize)> {
        match self {
            Encoding::Utf8 => {
                let skip = if bytes.starts_with(UTF8_BOM) {
                    UTF8_BOM.len()
                } else {
                    0
                };
                match std::str::from_utf8(&bytes[skip..]) {
                    Ok(text) => Some((text.to_string(), bytes.len())),
                    Err(e) if e.error_len().is_none() => {
                        let valid = e.valid_up_to();
                        let text = std::str::from_utf8(&bytes[skip..skip + valid]).ok()?;
                        Some((text.to_string(), skip + valid))
                    }
                    Err(_) => None,
                }
            }
            Encoding::Latin1 => self.decode(bytes).map(|t| (t, bytes.len())),
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Latin1 => "latin-1",
        })
    }
}

/// Try each encoding in order and return the first that decodes.
pub fn decode_with_fallback(bytes: &[u8], encodings: &[Encoding]) -> Result<(String, Encoding), ParseError> {
    encodings
        .iter()
        .find_map(|enc| enc.decode(bytes).map(|text| (text, *enc)))
        .ok_or_else(|| ParseError::Undecodable(encodings.iter().join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_with_bom() {
        let bytes = b"\xEF\xBB\xBFPokerStars Hand #1";
        let (text, enc) = decode_with_fallback(bytes, &[Encoding::Utf8, Encoding::Latin1]).unwrap();
        assert_eq!("PokerStars Hand #1", text);
        assert_eq!(Encoding::Utf8, enc);
    }

    #[test]
    fn test_falls_back_to_latin1() {
        // "Jérôme" in latin-1
        let bytes = b"J\xe9r\xf4me";
        let (text, enc) = decode_with_fallback(bytes, &[Encoding::Utf8, Encoding::Latin1]).unwrap();
        assert_eq!("Jérôme", text);
        assert_eq!(Encoding::Latin1, enc);
    }

    #[test]
    fn test_no_encoding_left() {
        assert_eq!(
            Err(ParseError::Undecodable("utf-8".to_string())),
            decode_with_fallback(b"\xff\xfe", &[Encoding::Utf8])
        );
    }

    #[test]
    fn test_prefix_keeps_cut_sequence() {
        let full = "né".as_bytes();
        let (text, used) = Encoding::Utf8.decode_prefix(&full[..2]).unwrap();
        assert_eq!("n", text);
        assert_eq!(1, used);
        assert_eq!(None, Encoding::Utf8.decode_prefix(b"a\xffb"));
    }

    #[test]
    fn test_labels() {
        assert_eq!(Some(Encoding::Latin1), Encoding::from_label("ISO-8859-1"));
        assert_eq!(Some(Encoding::Utf8), Encoding::from_label("utf8"));
        assert_eq!(None, Encoding::from_label("cp1251"));
    }
}
