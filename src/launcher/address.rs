//! Button address classification and cleanup

/// What kind of target a button address points at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    /// `http://` or `https://` URL, handed to the browser
    Url,
    /// Anything else: a file, folder or program path
    Path,
    /// Blank address; activation does nothing
    Empty,
}

/// Classify an address by prefix
pub fn classify(address: &str) -> AddressKind {
    let address = address.trim();
    if address.is_empty() {
        AddressKind::Empty
    } else if address.starts_with("http://") || address.starts_with("https://") {
        AddressKind::Url
    } else {
        AddressKind::Path
    }
}

/// Clean up an address typed or pasted into the settings window
///
/// Surrounding whitespace and double quotes are removed, and `file:///` URIs
/// (what file managers put on the clipboard or drop) become native paths.
pub fn normalize_address(input: &str) -> String {
    let cleaned: String = input.trim().chars().filter(|c| *c != '"').collect();
    let cleaned = cleaned.trim();

    match cleaned.strip_prefix("file:///") {
        Some(rest) => native_path(percent_decode_spaces(rest).trim()),
        None => cleaned.to_string(),
    }
}

#[cfg(windows)]
fn native_path(uri_path: &str) -> String {
    // file:///C:/dir -> C:\dir
    uri_path.replace('/', "\\")
}

#[cfg(not(windows))]
fn native_path(uri_path: &str) -> String {
    // file:///home/dir -> /home/dir
    format!("/{uri_path}")
}

/// `file:` URIs from the shell encode spaces; other escapes are left alone
fn percent_decode_spaces(raw: &str) -> String {
    raw.replace("%20", " ")
}
