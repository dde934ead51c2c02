//! In-memory XML writer with minimal allocations

use std::borrow::Cow;

pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Escape the five reserved XML characters.
///
/// Returns the input unchanged (borrowed) when nothing needs escaping.
pub fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.bytes().any(needs_escape) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(ch),
        }
    }
    Cow::Owned(out)
}

#[inline]
fn needs_escape(byte: u8) -> bool {
    matches!(byte, b'&' | b'<' | b'>' | b'"' | b'\'')
}

/// Append `text` to `out` with XML escaping
///
/// C0 control characters other than tab, LF and CR are not legal XML 1.0, so
/// they are written as the spreadsheet `_xHHHH_` escape instead.
#[inline]
pub(crate) fn push_escaped(out: &mut Vec<u8>, text: &str) {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    for byte in text.bytes() {
        match byte {
            b'&' => out.extend_from_slice(b"&amp;"),
            b'<' => out.extend_from_slice(b"&lt;"),
            b'>' => out.extend_from_slice(b"&gt;"),
            b'"' => out.extend_from_slice(b"&quot;"),
            b'\'' => out.extend_from_slice(b"&apos;"),
            b'\t' | b'\n' | b'\r' => out.push(byte),
            0x00..=0x1F => {
                out.extend_from_slice(b"_x00");
                out.push(HEX[usize::from(byte >> 4)]);
                out.push(HEX[usize::from(byte & 0x0F)]);
                out.push(b'_');
            }
            _ => out.push(byte),
        }
    }
}

/// XML writer that accumulates a whole part in memory
pub struct XmlWriter {
    buffer: Vec<u8>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        XmlWriter {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Start a new document with the standard declaration
    pub fn document() -> Self {
        let mut writer = Self::new();
        writer.write_str(XML_DECLARATION);
        writer
    }

    /// Write raw bytes directly
    #[inline]
    pub fn write_raw(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Write string data
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.write_raw(s.as_bytes());
    }

    /// Write XML element start tag (left open for attributes)
    #[inline]
    pub fn start_element(&mut self, name: &str) {
        self.write_raw(b"<");
        self.write_str(name);
    }

    /// Write XML element end tag
    #[inline]
    pub fn end_element(&mut self, name: &str) {
        self.write_raw(b"</");
        self.write_str(name);
        self.write_raw(b">");
    }

    /// Close an open start tag as a self-closing element
    #[inline]
    pub fn close_empty(&mut self) {
        self.write_raw(b"/>");
    }

    /// Write attribute
    #[inline]
    pub fn attribute(&mut self, name: &str, value: &str) {
        self.write_raw(b" ");
        self.write_str(name);
        self.write_raw(b"=\"");
        self.write_escaped(value);
        self.write_raw(b"\"");
    }

    /// Write attribute with integer value
    #[inline]
    pub fn attribute_int(&mut self, name: &str, value: usize) {
        let mut num = itoa::Buffer::new();
        self.write_raw(b" ");
        self.write_str(name);
        self.write_raw(b"=\"");
        self.write_str(num.format(value));
        self.write_raw(b"\"");
    }

    /// Close start tag
    #[inline]
    pub fn close_start_tag(&mut self) {
        self.write_raw(b">");
    }

    /// Write text content with XML escaping
    #[inline]
    pub fn write_escaped(&mut self, text: &str) {
        push_escaped(&mut self.buffer, text);
    }

    /// Finish and take the accumulated bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(s: &str) -> String {
        s.replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&apos;", "'")
            .replace("&amp;", "&")
    }

    #[test]
    fn test_xml_writer() {
        let mut writer = XmlWriter::new();

        writer.start_element("root");
        writer.attribute("attr", "value");
        writer.attribute_int("n", 42);
        writer.close_start_tag();
        writer.write_str("content");
        writer.end_element("root");

        assert_eq!(
            String::from_utf8(writer.into_bytes()).unwrap(),
            "<root attr=\"value\" n=\"42\">content</root>"
        );
    }

    #[test]
    fn test_xml_escaping() {
        assert_eq!(
            escape_xml("<test>&value</test>"),
            "&lt;test&gt;&amp;value&lt;/test&gt;"
        );
        assert_eq!(escape_xml("&amp;"), "&amp;amp;");
    }

    #[test]
    fn test_escape_borrows_clean_text() {
        assert!(matches!(escape_xml("Proyectos 2024"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_escape_round_trip() {
        let original = r#"A & B < C > "D" 'E'"#;
        let escaped = escape_xml(original);
        assert_eq!(escaped, "A &amp; B &lt; C &gt; &quot;D&quot; &apos;E&apos;");
        assert_eq!(unescape(&escaped), original);
    }

    #[test]
    fn test_attribute_values_are_escaped() {
        let mut writer = XmlWriter::new();
        writer.start_element("sheet");
        writer.attribute("name", "R&D \"Q1\"");
        writer.close_empty();
        assert_eq!(
            String::from_utf8(writer.into_bytes()).unwrap(),
            "<sheet name=\"R&amp;D &quot;Q1&quot;\"/>"
        );
    }

    #[test]
    fn test_control_characters_encoded() {
        let mut out = Vec::new();
        push_escaped(&mut out, "a\u{0B}b\u{1F}\u{0}\tc\r\n");
        assert_eq!(out, b"a_x000B_b_x001F__x0000_\tc\r\n");
    }

    #[test]
    fn test_multibyte_text_untouched() {
        assert_eq!(escape_xml("Negociación <ñ>"), "Negociación &lt;ñ&gt;");
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn escape_then_unescape_is_identity(s in "\\PC*") {
                prop_assert_eq!(unescape(&escape_xml(&s)), s);
            }

            #[test]
            fn escaped_text_has_no_raw_markup(s in "\\PC*") {
                let escaped = escape_xml(&s);
                prop_assert!(!escaped.contains('<'));
                prop_assert!(!escaped.contains('>'));
                prop_assert!(!escaped.contains('"'));
            }
        }
    }
}
