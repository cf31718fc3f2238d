//! Path normalization.

/// The path separator.
const SEPARATOR: char = '/';

/// Join `segments` into a single normalized path.
///
/// Runs of separators collapse into one, leading and trailing separators are
/// dropped, and exactly one leading separator is added. No segments, or only
/// empty ones, yield the root path `/`.
///
/// ```
/// use microhttp_route::sanitize_path;
///
/// assert_eq!(sanitize_path(["api", "/users/", "42"]), "/api/users/42");
/// assert_eq!(sanitize_path(["/a//b///c/"]), "/a/b/c");
/// assert_eq!(sanitize_path(Vec::<&str>::new()), "/");
/// ```
pub fn sanitize_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        for part in segment.as_ref().split(SEPARATOR).filter(|p| !p.is_empty()) {
            path.push(SEPARATOR);
            path.push_str(part);
        }
    }

    if path.is_empty() {
        path.push(SEPARATOR);
    }
    path
}
