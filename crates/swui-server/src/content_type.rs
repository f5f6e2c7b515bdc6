//! Response content type inference.
//!
//! The file extension decides when it is known. Otherwise the first 512
//! bytes of the body are sniffed for a handful of well-known signatures,
//! falling back to plain text or octet-stream.

const SNIFF_LEN: usize = 512;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const OCTET_STREAM: &str = "application/octet-stream";

/// HTML tags that mark a document as HTML when they open it.
const HTML_TAGS: &[&[u8]] = &[
    b"<!DOCTYPE HTML",
    b"<HTML",
    b"<HEAD",
    b"<SCRIPT",
    b"<IFRAME",
    b"<H1",
    b"<DIV",
    b"<FONT",
    b"<TABLE",
    b"<A",
    b"<STYLE",
    b"<TITLE",
    b"<B",
    b"<BODY",
    b"<BR",
    b"<P",
    b"<!--",
];

/// Exact leading-byte signatures.
const MAGIC: &[(&[u8], &str)] = &[
    (b"%PDF-", "application/pdf"),
    (b"\x89PNG\r\n\x1a\n", "image/png"),
    (b"GIF87a", "image/gif"),
    (b"GIF89a", "image/gif"),
    (b"\xff\xd8\xff", "image/jpeg"),
    (b"\x00\x00\x01\x00", "image/x-icon"),
    (b"wOFF", "font/woff"),
    (b"wOF2", "font/woff2"),
    (b"PK\x03\x04", "application/zip"),
    (b"\x1f\x8b\x08", "application/x-gzip"),
    (b"\xfe\xff", "text/plain; charset=utf-16be"),
    (b"\xff\xfe", "text/plain; charset=utf-16le"),
    (b"\xef\xbb\xbf", TEXT_PLAIN),
];

/// Content type for `file_name` with the given body. Never empty.
pub fn detect(file_name: &str, body: &[u8]) -> String {
    match mime_guess::from_path(file_name).first() {
        Some(mime) => {
            let textual = mime.type_().as_str() == "text"
                || matches!(mime.subtype().as_str(), "javascript" | "json" | "xml");
            if textual && mime.get_param("charset").is_none() {
                format!("{mime}; charset=utf-8")
            } else {
                mime.to_string()
            }
        }
        None => sniff(&body[..body.len().min(SNIFF_LEN)]).to_owned(),
    }
}

/// Guess a content type from leading bytes.
pub fn sniff(data: &[u8]) -> &'static str {
    if let Some((_, mime)) = MAGIC.iter().find(|(sig, _)| data.starts_with(sig)) {
        return *mime;
    }

    let first_non_ws = data
        .iter()
        .position(|&b| !matches!(b, b'\t' | b'\n' | b'\x0c' | b'\r' | b' '))
        .unwrap_or(data.len());
    let text = &data[first_non_ws..];

    if HTML_TAGS.iter().any(|tag| opens_with_tag(text, tag)) {
        return "text/html; charset=utf-8";
    }
    if text.starts_with(b"<?xml") {
        return "text/xml; charset=utf-8";
    }

    if data.iter().any(|b| is_binary(*b)) {
        OCTET_STREAM
    } else {
        TEXT_PLAIN
    }
}

/// Case-insensitive tag match followed by a space or `>`.
fn opens_with_tag(data: &[u8], tag: &[u8]) -> bool {
    if data.len() <= tag.len() || !data[..tag.len()].eq_ignore_ascii_case(tag) {
        return false;
    }
    // Comments need no terminator check.
    if tag == b"<!--" {
        return true;
    }
    matches!(data[tag.len()], b' ' | b'>')
}

const fn is_binary(b: u8) -> bool {
    matches!(b, 0x00..=0x08 | 0x0b | 0x0e..=0x1a | 0x1c..=0x1f)
}
