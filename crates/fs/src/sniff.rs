//! Magic-number content sniffing.
//!
//! Detection works on a prefix of the file only. Anything the table does not
//! recognise is left to extension guessing by the caller.

const TEXT_MIME: &str = "text/plain";
const ZIP_MIME: &str = "application/zip";
const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

enum Detect {
    Mime(&'static str),
    /// ZIP container; OOXML documents are told apart by their part names.
    Zip,
    /// Recognised container whose real type cannot be read from the header
    /// (OLE2 compound files hold .doc, .xls and .ppt alike).
    Opaque,
}

struct Signature {
    /// Every `(offset, bytes)` pair must match.
    parts: &'static [(usize, &'static [u8])],
    detect: Detect,
}

const fn sig(parts: &'static [(usize, &'static [u8])], mime: &'static str) -> Signature {
    Signature {
        parts,
        detect: Detect::Mime(mime),
    }
}

/// Ordered signature table; more specific entries precede the generic ones
/// they overlap with (RIFF and ftyp subtypes).
const SIGNATURES: &[Signature] = &[
    sig(&[(0, b"\x89PNG\r\n\x1a\n")], "image/png"),
    sig(&[(0, b"\xFF\xD8\xFF")], "image/jpeg"),
    sig(&[(0, b"GIF87a")], "image/gif"),
    sig(&[(0, b"GIF89a")], "image/gif"),
    sig(&[(0, b"RIFF"), (8, b"WEBP")], "image/webp"),
    sig(&[(0, b"II*\x00")], "image/tiff"),
    sig(&[(0, b"MM\x00*")], "image/tiff"),
    sig(&[(0, b"\x00\x00\x01\x00")], "image/vnd.microsoft.icon"),
    sig(&[(0, b"BM"), (6, b"\x00\x00\x00\x00")], "image/bmp"),
    sig(&[(0, b"%PDF-")], "application/pdf"),
    sig(&[(0, b"%!PS")], "application/postscript"),
    sig(&[(0, b"{\\rtf")], "text/rtf"),
    Signature {
        parts: &[(0, b"PK\x03\x04")],
        detect: Detect::Zip,
    },
    sig(&[(0, b"PK\x05\x06")], ZIP_MIME),
    Signature {
        parts: &[(0, b"\xD0\xCF\x11\xE0\xA1\xB1\x1A\xE1")],
        detect: Detect::Opaque,
    },
    sig(&[(0, b"Rar!\x1A\x07")], "application/x-rar-compressed"),
    sig(&[(0, b"7z\xBC\xAF\x27\x1C")], "application/x-7z-compressed"),
    sig(&[(0, b"\x1F\x8B")], "application/gzip"),
    sig(&[(0, b"BZh")], "application/x-bzip2"),
    sig(&[(0, b"\xFD7zXZ\x00")], "application/x-xz"),
    sig(&[(257, b"ustar")], "application/x-tar"),
    sig(&[(0, b"fLaC")], "audio/flac"),
    sig(&[(0, b"OggS")], "audio/ogg"),
    sig(&[(0, b"RIFF"), (8, b"WAVE")], "audio/x-wav"),
    sig(&[(0, b"RIFF"), (8, b"AVI ")], "video/x-msvideo"),
    sig(&[(0, b"ID3")], "audio/mpeg"),
    sig(&[(0, b"\xFF\xFB")], "audio/mpeg"),
    sig(&[(0, b"\xFF\xF3")], "audio/mpeg"),
    sig(&[(0, b"\xFF\xF2")], "audio/mpeg"),
    sig(&[(4, b"ftyp"), (8, b"M4A ")], "audio/mp4"),
    sig(&[(4, b"ftyp"), (8, b"qt  ")], "video/quicktime"),
    sig(&[(4, b"ftyp")], "video/mp4"),
    sig(&[(0, b"\x1A\x45\xDF\xA3")], "video/x-matroska"),
];

impl Signature {
    fn matches(&self, buf: &[u8]) -> bool {
        self.parts.iter().all(|(offset, magic)| {
            buf.get(*offset..offset + magic.len())
                .is_some_and(|window| window == *magic)
        })
    }
}

/// What the leading bytes of a file say about its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sniffed {
    /// A binary signature matched.
    Signature(&'static str),
    /// No signature, but the bytes read as text. This is weaker evidence
    /// than a file name extension.
    Text,
}

impl Sniffed {
    pub fn mime(self) -> &'static str {
        match self {
            Sniffed::Signature(mime) => mime,
            Sniffed::Text => TEXT_MIME,
        }
    }
}

/// Detect a MIME type from the leading bytes of a file.
///
/// Returns `None` for empty input, OLE2 containers, OOXML packages whose
/// flavour is not visible in `buf`, and unrecognised binary data.
pub fn sniff(buf: &[u8]) -> Option<Sniffed> {
    if buf.is_empty() {
        return None;
    }

    match SIGNATURES.iter().find(|s| s.matches(buf)).map(|s| &s.detect) {
        Some(Detect::Mime(mime)) => Some(Sniffed::Signature(*mime)),
        Some(Detect::Zip) => zip_flavour(buf).map(Sniffed::Signature),
        Some(Detect::Opaque) => None,
        None => looks_like_text(buf).then_some(Sniffed::Text),
    }
}

/// Entry-name prefixes of the main part of each OOXML flavour.
const OOXML_PARTS: &[(&[u8], &str)] = &[
    (b"word/", DOCX_MIME),
    (b"xl/", XLSX_MIME),
    (b"ppt/", PPTX_MIME),
];
const CONTENT_TYPES_PART: &[u8] = b"[Content_Types].xml";

fn zip_flavour(buf: &[u8]) -> Option<&'static str> {
    let mut ooxml_package = false;

    for name in zip_entry_names(buf) {
        if let Some((_, mime)) = OOXML_PARTS.iter().find(|(prefix, _)| name.starts_with(prefix)) {
            return Some(*mime);
        }
        ooxml_package |= name == CONTENT_TYPES_PART;
    }

    // An OOXML package whose main part lies past the window: let the
    // extension decide between docx, xlsx and pptx.
    if ooxml_package { None } else { Some(ZIP_MIME) }
}

const LOCAL_HEADER: &[u8] = b"PK\x03\x04";
const LOCAL_HEADER_LEN: usize = 30;

/// Names of the consecutive local file headers that fit in `buf`.
///
/// Stops where the next header cannot be located, e.g. after an entry whose
/// size is only recorded in a trailing data descriptor.
fn zip_entry_names(buf: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut offset = 0usize;

    std::iter::from_fn(move || {
        let header = buf.get(offset..offset.checked_add(LOCAL_HEADER_LEN)?)?;
        if !header.starts_with(LOCAL_HEADER) {
            return None;
        }

        let le16 = |at: usize| usize::from(u16::from_le_bytes([header[at], header[at + 1]]));
        let packed = u32::from_le_bytes([header[18], header[19], header[20], header[21]]);
        let name_len = le16(26);
        let extra_len = le16(28);

        let name_start = offset + LOCAL_HEADER_LEN;
        let name = buf.get(name_start..name_start + name_len)?;

        offset = (name_start + name_len + extra_len).saturating_add(packed as usize);
        Some(name)
    })
}

/// UTF-8 without NUL bytes. A multi-byte sequence cut off by the end of the
/// sniff window still counts as text.
fn looks_like_text(buf: &[u8]) -> bool {
    if buf.contains(&0) {
        return false;
    }

    match std::str::from_utf8(buf) {
        Ok(_) => true,
        Err(e) => e.error_len().is_none(),
    }
}

#[cfg(test)]
#[path = "sniff_tests.rs"]
mod tests;
