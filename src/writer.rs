pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The written output is no valid UTF8-String: {0}")]
    FromUtf8Error(#[from] std::string::FromUtf8Error),
    #[error("The xml write process failed because of an internal error: {0}")]
    XmlError(#[from] xml::writer::Error),
    #[error("The xml write process failed because of an io-error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Two-decimal coordinate formatting shared by every emitted artifact.
#[inline]
pub fn fmt2(value: f64) -> String {
    format!("{:.2}", value)
}

/// Formats a polyline as the space-separated `x,y` list used by `shape` and
/// `via` attributes.
pub fn fmt_polyline(points: &[crate::geom::Point]) -> String {
    points
        .iter()
        .map(|p| format!("{:.2},{:.2}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}
