//! Content-type detection and format classification.
//!
//! Detection inspects the buffer's magic bytes first; a signature match
//! wins outright over any filename-derived extension. Without a match the
//! filename suffix is mapped through `mime_guess`, defaulting to
//! `application/octet-stream`.
//!
//! Classification is the single decision point the dispatcher switches
//! on: it folds the detected `{extension, mime_type}` pair into the
//! closed [`FormatCategory`] enum, so no call site branches on ad hoc
//! MIME substrings.

/// A normalized `{extension, mime_type}` pair for a fetched buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedType {
    /// Lower-cased extension without the leading dot; may be empty.
    pub extension: String,
    /// Lower-cased MIME type; `application/octet-stream` when unknown.
    pub mime_type: String,
}

impl DetectedType {
    fn new(extension: &str, mime_type: &str) -> Self {
        Self { extension: extension.to_string(), mime_type: mime_type.to_string() }
    }
}

/// The closed set of format categories the dispatcher branches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatCategory {
    Pdf,
    WordFamily,
    Spreadsheet,
    Presentation,
    Csv,
    Unsupported,
}

const OOXML_WORD: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const OOXML_SHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const OOXML_SLIDES: &str = "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// Detect the content type of a buffer, falling back to the filename.
///
/// Never errors: an unreadable or empty buffer simply means no signature
/// matched and the fallback name decides.
pub fn detect(buffer: &[u8], fallback_name: &str) -> DetectedType {
    if let Some(detected) = sniff_signature(buffer) {
        return detected;
    }
    from_fallback_name(fallback_name)
}

fn sniff_signature(buffer: &[u8]) -> Option<DetectedType> {
    if buffer.starts_with(b"%PDF-") {
        return Some(DetectedType::new("pdf", "application/pdf"));
    }

    if buffer.starts_with(b"\x89PNG\r\n\x1a\n") {
        return Some(DetectedType::new("png", "image/png"));
    }
    if buffer.starts_with(b"\xff\xd8\xff") {
        return Some(DetectedType::new("jpg", "image/jpeg"));
    }
    if buffer.starts_with(b"GIF87a") || buffer.starts_with(b"GIF89a") {
        return Some(DetectedType::new("gif", "image/gif"));
    }

    // OOXML containers are ZIP archives whose entry names reveal the
    // application (word/, xl/, ppt/ prefixes appear in the local file
    // headers and central directory).
    if buffer.starts_with(b"PK\x03\x04") {
        if contains(buffer, b"word/") {
            return Some(DetectedType::new("docx", OOXML_WORD));
        }
        if contains(buffer, b"xl/") {
            return Some(DetectedType::new("xlsx", OOXML_SHEET));
        }
        if contains(buffer, b"ppt/") {
            return Some(DetectedType::new("pptx", OOXML_SLIDES));
        }
        return Some(DetectedType::new("zip", "application/zip"));
    }

    // Legacy Office (CFB/OLE2, header D0 CF 11 E0 A1 B1 1A E1). The
    // directory stream names the application as UTF-16LE strings.
    if buffer.starts_with(b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1") {
        if contains(buffer, &utf16le("WordDocument")) {
            return Some(DetectedType::new("doc", "application/msword"));
        }
        if contains(buffer, &utf16le("Workbook")) {
            return Some(DetectedType::new("xls", "application/vnd.ms-excel"));
        }
        if contains(buffer, &utf16le("PowerPoint Document")) {
            return Some(DetectedType::new("ppt", "application/vnd.ms-powerpoint"));
        }
        // Bare OLE2 with no recognized stream: let the filename decide.
        return None;
    }

    None
}

fn from_fallback_name(fallback_name: &str) -> DetectedType {
    let extension = std::path::Path::new(fallback_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let mime_type = if extension.is_empty() {
        "application/octet-stream".to_string()
    } else {
        mime_guess::from_ext(&extension)
            .first()
            .map(|m| m.essence_str().to_lowercase())
            .unwrap_or_else(|| "application/octet-stream".to_string())
    };

    DetectedType { extension, mime_type }
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

fn utf16le(s: &str) -> Vec<u8> {
    s.encode_utf16().flat_map(|u| u.to_le_bytes()).collect()
}

/// Fold a detected type into the closed category set.
pub fn classify(detected: &DetectedType) -> FormatCategory {
    let ext = detected.extension.as_str();
    let mime = detected.mime_type.as_str();

    if mime == "application/pdf" || ext == "pdf" {
        return FormatCategory::Pdf;
    }
    if matches!(ext, "doc" | "docx") || mime.contains("msword") || mime.contains("wordprocessingml") {
        return FormatCategory::WordFamily;
    }
    if matches!(ext, "xlsx" | "xls") || mime.contains("spreadsheet") || mime.contains("ms-excel") {
        return FormatCategory::Spreadsheet;
    }
    if matches!(ext, "pptx" | "ppt") || mime.contains("presentation") || mime.contains("ms-powerpoint") {
        return FormatCategory::Presentation;
    }
    if ext == "csv" || mime == "text/csv" {
        return FormatCategory::Csv;
    }
    FormatCategory::Unsupported
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip_with(marker: &[u8]) -> Vec<u8> {
        let mut buf = b"PK\x03\x04\x14\x00\x00\x00\x08\x00".to_vec();
        buf.extend_from_slice(marker);
        buf.extend_from_slice(b"rest of archive");
        buf
    }

    fn ole_with(stream_name: &str) -> Vec<u8> {
        let mut buf = b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1".to_vec();
        buf.extend_from_slice(&vec![0u8; 64]);
        buf.extend_from_slice(&utf16le(stream_name));
        buf
    }

    #[test]
    fn test_detect_pdf_signature() {
        let detected = detect(b"%PDF-1.7 rest", "whatever.txt");
        assert_eq!(detected, DetectedType::new("pdf", "application/pdf"));
    }

    #[test]
    fn test_detect_docx_container() {
        let detected = detect(&zip_with(b"word/document.xml"), "");
        assert_eq!(detected.extension, "docx");
        assert!(detected.mime_type.contains("wordprocessingml"));
    }

    #[test]
    fn test_detect_xlsx_container() {
        let detected = detect(&zip_with(b"xl/workbook.xml"), "");
        assert_eq!(detected.extension, "xlsx");
        assert!(detected.mime_type.contains("spreadsheetml"));
    }

    #[test]
    fn test_detect_pptx_container() {
        let detected = detect(&zip_with(b"ppt/slides/slide1.xml"), "");
        assert_eq!(detected.extension, "pptx");
        assert!(detected.mime_type.contains("presentationml"));
    }

    #[test]
    fn test_detect_plain_zip() {
        let detected = detect(&zip_with(b"archive/readme.txt"), "bundle.zip");
        assert_eq!(detected, DetectedType::new("zip", "application/zip"));
    }

    #[test]
    fn test_detect_legacy_doc() {
        let detected = detect(&ole_with("WordDocument"), "");
        assert_eq!(detected, DetectedType::new("doc", "application/msword"));
    }

    #[test]
    fn test_detect_legacy_xls() {
        let detected = detect(&ole_with("Workbook"), "");
        assert_eq!(detected, DetectedType::new("xls", "application/vnd.ms-excel"));
    }

    #[test]
    fn test_detect_bare_ole_falls_back_to_name() {
        let mut buf = b"\xd0\xcf\x11\xe0\xa1\xb1\x1a\xe1".to_vec();
        buf.extend_from_slice(&vec![0u8; 32]);
        let detected = detect(&buf, "legacy.xls");
        assert_eq!(detected.extension, "xls");
    }

    #[test]
    fn test_signature_wins_over_filename() {
        // A PDF payload named .csv is still a PDF.
        let detected = detect(b"%PDF-1.4", "data.csv");
        assert_eq!(detected.extension, "pdf");
        assert_eq!(detected.mime_type, "application/pdf");
    }

    #[test]
    fn test_fallback_extension_mapping() {
        let detected = detect(b"a,b\n1,2\n", "rows.csv");
        assert_eq!(detected.extension, "csv");
        assert_eq!(detected.mime_type, "text/csv");
    }

    #[test]
    fn test_fallback_uppercase_name() {
        let detected = detect(b"plain text", "REPORT.DOCX");
        assert_eq!(detected.extension, "docx");
    }

    #[test]
    fn test_unknown_defaults_to_octet_stream() {
        let detected = detect(b"\x00\x01\x02", "blob.weirdext");
        assert_eq!(detected.extension, "weirdext");
        assert_eq!(detected.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_empty_buffer_empty_name() {
        let detected = detect(b"", "");
        assert_eq!(detected.extension, "");
        assert_eq!(detected.mime_type, "application/octet-stream");
    }

    #[test]
    fn test_classify_pdf() {
        assert_eq!(classify(&DetectedType::new("pdf", "application/pdf")), FormatCategory::Pdf);
        assert_eq!(classify(&DetectedType::new("pdf", "application/octet-stream")), FormatCategory::Pdf);
    }

    #[test]
    fn test_classify_word_family() {
        assert_eq!(classify(&DetectedType::new("doc", "application/msword")), FormatCategory::WordFamily);
        assert_eq!(classify(&DetectedType::new("docx", OOXML_WORD)), FormatCategory::WordFamily);
        assert_eq!(
            classify(&DetectedType::new("", "application/msword")),
            FormatCategory::WordFamily
        );
    }

    #[test]
    fn test_classify_spreadsheet() {
        assert_eq!(classify(&DetectedType::new("xlsx", OOXML_SHEET)), FormatCategory::Spreadsheet);
        assert_eq!(
            classify(&DetectedType::new("xls", "application/vnd.ms-excel")),
            FormatCategory::Spreadsheet
        );
    }

    #[test]
    fn test_classify_presentation() {
        assert_eq!(classify(&DetectedType::new("pptx", OOXML_SLIDES)), FormatCategory::Presentation);
        assert_eq!(
            classify(&DetectedType::new("ppt", "application/vnd.ms-powerpoint")),
            FormatCategory::Presentation
        );
    }

    #[test]
    fn test_classify_csv() {
        assert_eq!(classify(&DetectedType::new("csv", "text/csv")), FormatCategory::Csv);
        assert_eq!(classify(&DetectedType::new("csv", "application/octet-stream")), FormatCategory::Csv);
    }

    #[test]
    fn test_classify_unsupported() {
        assert_eq!(
            classify(&DetectedType::new("exe", "application/octet-stream")),
            FormatCategory::Unsupported
        );
        assert_eq!(classify(&DetectedType::new("png", "image/png")), FormatCategory::Unsupported);
    }
}
