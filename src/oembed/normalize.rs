/// Escape the characters of a provider scheme that must match literally.
///
/// Only `.` and `?` are escaped. Everything else is kept as-is and keeps its
/// pattern meaning: `*` repeats the character before it rather than standing for
/// any text. A trailing `watch*` still works as a prefix, but in
/// `https://*.youtube.com` the `*` only repeats the `/`, so no real subdomain
/// matches; write such schemes against the bare host instead.
pub fn escape_scheme(scheme: &str) -> String {
    scheme.replace('.', "\\.").replace('?', "\\?")
}

/// Drop `www.` right after the `//` of a URL.
///
/// Plain substring replacement, not host parsing: every `//www.` occurrence is
/// replaced, which is what scheme matching has always compared against.
pub fn strip_www(url: &str) -> String {
    url.replace("//www.", "//")
}

/// Same normalization as [`strip_www`], applied to an already escaped scheme.
pub fn strip_www_escaped(scheme: &str) -> String {
    scheme.replace("//www\\.", "//")
}
