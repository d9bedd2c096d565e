/// Splits a slash-separated path into its non-empty segments.
///
/// Leading, trailing and repeated slashes are ignored, so `"/"`, `""` and
/// `"//"` all denote the root.
pub fn segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|part| !part.is_empty()).collect()
}

/// Canonical absolute form of a segment list.
pub fn display(segments: &[&str]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    segments.iter().fold(String::new(), |mut acc, segment| {
        acc.push('/');
        acc.push_str(segment);
        acc
    })
}

pub fn join(parent: &str, name: &str) -> String {
    let mut parts = segments(parent);
    parts.push(name);
    display(&parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("/", vec![])]
    #[case("", vec![])]
    #[case("//", vec![])]
    #[case("/a/b/c", vec!["a", "b", "c"])]
    #[case("a/b", vec!["a", "b"])]
    #[case("/a//b/", vec!["a", "b"])]
    #[case("/with space/Ünïcode", vec!["with space", "Ünïcode"])]
    fn test_segments(#[case] path: &str, #[case] expected: Vec<&str>) {
        assert_eq!(segments(path), expected);
    }

    #[test]
    fn test_dot_segments_are_literal() {
        assert_eq!(segments("/a/./../b"), vec!["a", ".", "..", "b"]);
    }

    #[rstest]
    #[case(vec![], "/")]
    #[case(vec!["a"], "/a")]
    #[case(vec!["a", "b", "c"], "/a/b/c")]
    fn test_display(#[case] parts: Vec<&str>, #[case] expected: &str) {
        assert_eq!(display(&parts), expected);
    }

    #[rstest]
    #[case("/", "a", "/a")]
    #[case("", "a", "/a")]
    #[case("/a/b/", "c.txt", "/a/b/c.txt")]
    fn test_join(#[case] parent: &str, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(join(parent, name), expected);
    }
}
