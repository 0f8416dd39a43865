//! C source serialization.
//!
//! Layout:
//! ```text
//! // Auto-generated from <source>
//! const unsigned char <name>[<N>] = {
//!     0xHH, 0xHH, ... (12 values per line)
//! };
//! ```

use std::fmt::Write;
use std::sync::LazyLock;

use image_processor::PackedBitmap;
use regex::Regex;

use super::BitmapFormat;
use crate::{ExportError, Result};

static RE_C_IDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("valid identifier regex"));

/// Values per line before a line break.
const VALUES_PER_LINE: usize = 12;

const INDENT: &str = "    ";

/// Whether `name` can be used as a C array identifier.
pub fn is_c_identifier(name: &str) -> bool {
    RE_C_IDENT.is_match(name)
}

/// Render `bytes` as a C array declaration.
///
/// `source` names the artifact the bytes came from and is written into the
/// leading comment. The caller is responsible for `name` being a valid C
/// identifier; [`CArray::new`] checks it.
pub fn render(bytes: &[u8], name: &str, source: &str) -> String {
    let source = source.replace(['\r', '\n'], " ");
    // "0xHH, " per value plus a line break every 12 values
    let mut out = String::with_capacity(bytes.len() * 7 + name.len() + source.len() + 64);

    // Writing into a String cannot fail.
    let _ = writeln!(out, "// Auto-generated from {source}");
    let _ = write!(out, "const unsigned char {name}[{}] = {{\n{INDENT}", bytes.len());

    for (i, b) in bytes.iter().enumerate() {
        let _ = write!(out, "0x{b:02X}");
        if i + 1 != bytes.len() {
            out.push_str(", ");
        }
        if (i + 1) % VALUES_PER_LINE == 0 {
            out.push('\n');
            out.push_str(INDENT);
        }
    }

    out.push_str("\n};\n");
    out
}

/// C array format bound to an identifier and a provenance string.
#[derive(Debug, Clone)]
pub struct CArray {
    name: String,
    source: String,
}

impl CArray {
    /// Fails with [`ExportError::InvalidIdentifier`] if `name` is not a C identifier.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !is_c_identifier(&name) {
            return Err(ExportError::InvalidIdentifier(name));
        }
        Ok(Self {
            name,
            source: source.into(),
        })
    }
}

impl BitmapFormat for CArray {
    fn name(&self) -> &str {
        "c-array"
    }

    fn extension(&self) -> &str {
        "c"
    }

    fn encode(&self, bitmap: &PackedBitmap) -> Vec<u8> {
        render(bitmap.as_bytes(), &self.name, &self.source).into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::RawBin;
    use image_processor::{PixelGrid, TargetDimensions, pack, threshold};

    /// Strip the C syntax and read back the hex literals.
    fn parse_values(text: &str) -> Vec<u8> {
        let body = &text[text.find('{').unwrap() + 1..text.rfind('}').unwrap()];
        body.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| u8::from_str_radix(s.trim_start_matches("0x"), 16).unwrap())
            .collect()
    }

    fn declared_len(text: &str) -> usize {
        let start = text.find('[').unwrap() + 1;
        let end = text.find(']').unwrap();
        text[start..end].parse().unwrap()
    }

    #[test]
    fn test_render_small_exact() {
        let text = render(&[0x00, 0x0a, 0xff], "ar00", "output/03_resized/ar00.png");
        assert_eq!(
            text,
            "// Auto-generated from output/03_resized/ar00.png\n\
             const unsigned char ar00[3] = {\n    \
             0x00, 0x0A, 0xFF\n};\n"
        );
    }

    #[test]
    fn test_render_breaks_every_twelve_values() {
        let bytes: Vec<u8> = (0..14).collect();
        let text = render(&bytes, "x", "src");
        let expected = "// Auto-generated from src\n\
                        const unsigned char x[14] = {\n    \
                        0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B, \n    \
                        0x0C, 0x0D\n};\n";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_render_exact_multiple_of_twelve() {
        let text = render(&[0x11; 12], "x", "src");
        assert!(text.ends_with("0x11, 0x11\n    \n};\n"));
        assert_eq!(parse_values(&text), vec![0x11; 12]);
    }

    #[test]
    fn test_render_uppercase_hex() {
        let text = render(&[0xab, 0xcd], "x", "src");
        assert!(text.contains("0xAB, 0xCD"));
    }

    #[test]
    fn test_source_comment_stays_on_one_line() {
        let text = render(&[0x00], "x", "bad\nname");
        assert!(text.starts_with("// Auto-generated from bad name\nconst"));
    }

    #[test]
    fn test_identifier_validation() {
        assert!(CArray::new("ar05", "x").is_ok());
        assert!(CArray::new("_card", "x").is_ok());
        assert!(matches!(
            CArray::new("5ar", "x"),
            Err(ExportError::InvalidIdentifier(_))
        ));
        assert!(CArray::new("ar-05", "x").is_err());
        assert!(CArray::new("", "x").is_err());
    }

    #[test]
    fn test_c_array_matches_raw_payload() {
        let values: Vec<u8> = (0..128u32 * 4).map(|i| (i * 37 % 256) as u8).collect();
        let grid = PixelGrid::new(128, 4, values).unwrap();
        let bitmap = pack(&threshold(&grid)).unwrap();

        let raw = RawBin.encode(&bitmap);
        let c_text = String::from_utf8(CArray::new("card", "src").unwrap().encode(&bitmap)).unwrap();

        assert_eq!(declared_len(&c_text), raw.len());
        assert_eq!(parse_values(&c_text), raw);
    }

    #[test]
    fn test_standard_black_card() {
        let dims = TargetDimensions::STANDARD;
        let grid = PixelGrid::filled(dims.width, dims.height, 0);
        let bitmap = pack(&threshold(&grid)).unwrap();

        let text = String::from_utf8(CArray::new("ar00", "src").unwrap().encode(&bitmap)).unwrap();
        assert!(text.contains("const unsigned char ar00[3488] = {"));
        let values = parse_values(&text);
        assert_eq!(values.len(), 3488);
        assert!(values.iter().all(|&b| b == 0xff));
    }

    #[test]
    fn test_standard_white_card() {
        let dims = TargetDimensions::STANDARD;
        let grid = PixelGrid::filled(dims.width, dims.height, 255);
        let bitmap = pack(&threshold(&grid)).unwrap();

        let text = String::from_utf8(CArray::new("ar00", "src").unwrap().encode(&bitmap)).unwrap();
        assert_eq!(declared_len(&text), 3488);
        assert!(parse_values(&text).iter().all(|&b| b == 0x00));
        assert_eq!(text.matches("0x00").count(), 3488);
    }
}
