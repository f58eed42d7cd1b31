use crate::error::{Result, UpdateError};

/// Byte offsets of the start marker and of the first end marker after it.
fn marker_bounds(document: &str, start_marker: &str, end_marker: &str) -> Result<(usize, usize)> {
    let start = document
        .find(start_marker)
        .ok_or_else(|| UpdateError::MarkerNotFound(start_marker.to_string()))?;
    let end = document[start..]
        .find(end_marker)
        .map(|offset| start + offset)
        .ok_or_else(|| UpdateError::MarkerNotFound(end_marker.to_string()))?;
    Ok((start, end))
}

/// Replaces everything from the start marker up to (not including) the end
/// marker with `block`. Text outside that range is kept as is.
pub fn splice(document: &str, block: &str, start_marker: &str, end_marker: &str) -> Result<String> {
    let (start, end) = marker_bounds(document, start_marker, end_marker)?;
    let mut out = String::with_capacity(start + block.len() + document.len() - end);
    out.push_str(&document[..start]);
    out.push_str(block);
    out.push_str(&document[end..]);
    Ok(out)
}

/// The region [`splice`] would replace: start marker included, end marker excluded.
pub fn extract_between<'a>(
    document: &'a str,
    start_marker: &str,
    end_marker: &str,
) -> Result<&'a str> {
    let (start, end) = marker_bounds(document, start_marker, end_marker)?;
    Ok(&document[start..end])
}
