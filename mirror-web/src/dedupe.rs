use mirror_common::Link;
use std::collections::HashSet;

/// Keep the first link seen for every distinct URL, preserving order.
///
/// A later link with the same URL but different text is dropped; the first
/// text wins.
pub fn dedupe_by_url(links: Vec<Link>) -> Vec<Link> {
    let mut seen: HashSet<String> = HashSet::with_capacity(links.len());
    links
        .into_iter()
        .filter(|link| seen.insert(link.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_occurrence_wins() {
        let out = dedupe_by_url(vec![
            Link::new("Join", "https://zoom.us/j/1"),
            Link::new("Video", "https://youtu.be/a"),
            Link::new("Join again", "https://zoom.us/j/1"),
        ]);
        assert_eq!(
            out,
            vec![
                Link::new("Join", "https://zoom.us/j/1"),
                Link::new("Video", "https://youtu.be/a"),
            ]
        );
    }

    #[test]
    fn urls_compare_byte_for_byte() {
        let out = dedupe_by_url(vec![
            Link::new("a", "https://zoom.us/j/1"),
            Link::new("b", "https://ZOOM.us/j/1"),
            Link::new("c", "https://zoom.us/j/1/"),
        ]);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn empty_input() {
        assert!(dedupe_by_url(Vec::new()).is_empty());
    }
}
