//! Container population.
//!
//! Locates the star container in an HTML document and appends freshly
//! sampled point elements as its last children. A document without the
//! container passes through untouched; that is the contract, not a
//! failure, so nothing is logged or reported.

use rand::Rng;
use scraper::{Html, Selector};

use super::{Starfield, StarsConfig};

/// Populate the configured container with `config.count` stars.
///
/// Returns the rewritten document, or the input unchanged when no
/// element carries the container id. Calling this twice on the same
/// document appends twice; population is additive, never replacing.
pub fn populate(html: &str, config: &StarsConfig, rng: &mut impl Rng) -> String {
    let insert_at = match container_end(html, &config.container_id) {
        Some(offset) => offset,
        None => return html.to_string(),
    };

    let field = Starfield::generate(config, rng);
    let markup = field.render();

    let mut out = String::with_capacity(html.len() + markup.len());
    out.push_str(&html[..insert_at]);
    out.push_str(&markup);
    out.push_str(&html[insert_at..]);
    out
}

/// Byte offset where appended children go, i.e. just before the
/// container's closing tag. `None` when the document has no such
/// element.
fn container_end(html: &str, container_id: &str) -> Option<usize> {
    // Parse first so detection follows real attribute semantics rather
    // than substring matching against text content.
    let selector = Selector::parse(&format!("#{}", container_id)).ok()?;
    let document = Html::parse_document(html);
    document.select(&selector).next()?;

    let (open_end, tag) = open_tag(html, container_id)?;
    Some(insertion_offset(html, open_end, &tag))
}

/// Walk the raw tags for the one whose `id` attribute equals
/// `container_id`, matching the attribute forms the parser accepts:
/// double-quoted, single-quoted, unquoted, and spacing around `=`.
/// Returns the offset just past the opening tag's `>` and the tag name.
fn open_tag(html: &str, container_id: &str) -> Option<(usize, String)> {
    let bytes = html.as_bytes();
    let mut pos = 0;

    while let Some(lt) = html[pos..].find('<') {
        let start = pos + lt;
        // Only element open tags count: '<' followed by a letter.
        // Anything else ('</', '<!', stray '<' in text) is skipped.
        match bytes.get(start + 1) {
            Some(c) if c.is_ascii_alphabetic() => {}
            Some(_) => {
                pos = start + 1;
                continue;
            }
            None => return None,
        }

        let end = tag_end(bytes, start + 1)?;
        let tag_text = &html[start + 1..end];
        let name_len = tag_text
            .find(|c: char| c.is_ascii_whitespace() || c == '/')
            .unwrap_or(tag_text.len());
        let (name, attrs) = tag_text.split_at(name_len);

        if id_attribute(attrs) == Some(container_id) {
            return Some((end + 1, name.to_string()));
        }
        pos = end + 1;
    }
    None
}

/// Byte offset of the `>` ending the tag that starts at `from`,
/// skipping over quoted attribute values.
fn tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut i = from;
    while i < bytes.len() {
        match bytes[i] {
            b'>' => return Some(i),
            quote @ (b'"' | b'\'') => {
                i += 1;
                while i < bytes.len() && bytes[i] != quote {
                    i += 1;
                }
                if i >= bytes.len() {
                    return None;
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Value of the `id` attribute in a tag's attribute text, if any.
fn id_attribute(attrs: &str) -> Option<&str> {
    let mut rest = attrs;
    loop {
        rest = rest.trim_start_matches(|c: char| c.is_ascii_whitespace());
        if rest.is_empty() {
            return None;
        }

        let name_len = rest
            .find(|c: char| c.is_ascii_whitespace() || c == '=')
            .unwrap_or(rest.len());
        let (name, after) = rest.split_at(name_len);
        let after = after.trim_start_matches(|c: char| c.is_ascii_whitespace());

        let (value, tail) = match after.strip_prefix('=') {
            Some(v) => {
                let v = v.trim_start_matches(|c: char| c.is_ascii_whitespace());
                if let Some(q) = v.strip_prefix('"') {
                    let close = q.find('"')?;
                    (Some(&q[..close]), &q[close + 1..])
                } else if let Some(q) = v.strip_prefix('\'') {
                    let close = q.find('\'')?;
                    (Some(&q[..close]), &q[close + 1..])
                } else {
                    let close = v
                        .find(|c: char| c.is_ascii_whitespace())
                        .unwrap_or(v.len());
                    let (val, tail) = v.split_at(close);
                    (Some(val), tail)
                }
            }
            None => (None, after),
        };

        if name.eq_ignore_ascii_case("id") {
            return value;
        }
        if name.is_empty() && value.is_none() {
            // Malformed leftovers with no progress possible
            return None;
        }
        rest = tail;
    }
}

/// Where to insert the stars: before the container's matching close
/// tag, or, for a container the parser auto-closes, before the end of
/// the enclosing document.
fn insertion_offset(html: &str, open_end: usize, tag: &str) -> usize {
    closing_tag_offset(html, open_end, tag)
        .or_else(|| closing_tag_offset(html, open_end, "body"))
        .or_else(|| closing_tag_offset(html, open_end, "html"))
        .unwrap_or(html.len())
}

/// Scan forward from the opening tag for the matching close, tracking
/// nesting depth of same-named tags.
fn closing_tag_offset(html: &str, open_end: usize, tag: &str) -> Option<usize> {
    let mut depth = 1usize;
    let mut pos = open_end;

    while let Some(lt) = html[pos..].find('<') {
        let at = pos + lt;
        let rest = &html[at..];
        if let Some(close) = rest.strip_prefix("</") {
            if tag_name_matches(close, tag) {
                depth -= 1;
                if depth == 0 {
                    return Some(at);
                }
            }
        } else if tag_name_matches(&rest[1..], tag) {
            depth += 1;
        }
        pos = at + 1;
    }
    None
}

/// True when `s` starts with `tag` followed by a tag-name boundary.
/// Compares bytes, so multibyte text after a `<` simply fails the
/// match instead of landing off a character boundary.
fn tag_name_matches(s: &str, tag: &str) -> bool {
    let s = s.as_bytes();
    let tag = tag.as_bytes();
    s.len() > tag.len()
        && s[..tag.len()].eq_ignore_ascii_case(tag)
        && matches!(s[tag.len()], b'>' | b'/' | b' ' | b'\t' | b'\r' | b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stars::DEFAULT_CONTAINER_ID;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn page_with_container() -> String {
        format!(
            "<!DOCTYPE html><html><body><div id=\"{}\"></div></body></html>",
            DEFAULT_CONTAINER_ID
        )
    }

    fn count_stars(html: &str) -> usize {
        let document = Html::parse_document(html);
        let selector = Selector::parse(".animate-twinkle").unwrap();
        document.select(&selector).count()
    }

    #[test]
    fn test_populates_empty_container_with_fifty_stars() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        let out = populate(&page_with_container(), &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
    }

    #[test]
    fn test_missing_container_is_a_silent_no_op() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let page = "<!DOCTYPE html><html><body><p>no stars here</p></body></html>";

        let out = populate(page, &config, &mut rng);
        assert_eq!(out, page);
    }

    #[test]
    fn test_population_is_additive() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(3);

        let once = populate(&page_with_container(), &config, &mut rng);
        let twice = populate(&once, &config, &mut rng);
        assert_eq!(count_stars(&twice), 100);
    }

    #[test]
    fn test_stars_land_inside_the_container() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(9);

        let out = populate(&page_with_container(), &config, &mut rng);
        let document = Html::parse_document(&out);
        let selector =
            Selector::parse(&format!("#{} > .animate-twinkle", DEFAULT_CONTAINER_ID)).unwrap();
        assert_eq!(document.select(&selector).count(), 50);
    }

    #[test]
    fn test_surrounding_markup_is_preserved() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(5);
        let page = format!(
            "<html><body><header>title</header><div id=\"{}\"></div><footer>foot</footer></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert!(out.starts_with("<html><body><header>title</header>"));
        assert!(out.ends_with("<footer>foot</footer></body></html>"));
    }

    #[test]
    fn test_appends_after_existing_children() {
        let config = StarsConfig {
            count: 1,
            ..StarsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let page = format!(
            "<html><body><div id=\"{}\"><span>moon</span></div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        let moon = out.find("<span>moon</span>").unwrap();
        let star = out.find("animate-twinkle").unwrap();
        assert!(star > moon);
    }

    #[test]
    fn test_nested_same_tag_children_do_not_truncate_the_container() {
        let config = StarsConfig {
            count: 1,
            ..StarsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(5);
        let page = format!(
            "<html><body><div id=\"{}\"><div><div></div></div></div><div>after</div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        let document = Html::parse_document(&out);
        let selector =
            Selector::parse(&format!("#{} .animate-twinkle", DEFAULT_CONTAINER_ID)).unwrap();
        assert_eq!(document.select(&selector).count(), 1);
        assert!(out.contains("<div>after</div>"));
    }

    #[test]
    fn test_unicode_text_after_the_open_tag() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(17);
        let page = format!(
            "<html><body><div id=\"{}\">score <🌟 tonight</div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
        assert!(out.contains("score <🌟 tonight"));
    }

    #[test]
    fn test_single_quoted_id_attribute() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let page = format!(
            "<html><body><div id='{}'></div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
    }

    #[test]
    fn test_unquoted_id_attribute() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(19);
        let page = format!(
            "<html><body><div id={}></div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
    }

    #[test]
    fn test_spaces_around_the_id_equals_sign() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(19);
        let page = format!(
            "<html><body><div class=\"sky\" id = \"{}\"></div></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
    }

    #[test]
    fn test_data_id_attribute_is_not_the_container() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(23);
        let page = format!(
            "<html><body><span data-id=\"{id}\">decoy</span><div id=\"{id}\"></div></body></html>",
            id = DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert!(out.contains("<span data-id=\"star-field\">decoy</span>"));

        let document = Html::parse_document(&out);
        let selector =
            Selector::parse(&format!("#{} > .animate-twinkle", DEFAULT_CONTAINER_ID)).unwrap();
        assert_eq!(document.select(&selector).count(), 50);
    }

    #[test]
    fn test_id_mentions_in_text_are_ignored() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(23);
        let page = format!(
            "<html><body><p>set id=\"{id}\" on a div</p><div id=\"{id}\"></div></body></html>",
            id = DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert!(out.contains("<p>set id=\"star-field\" on a div</p>"));

        let document = Html::parse_document(&out);
        let selector =
            Selector::parse(&format!("#{} > .animate-twinkle", DEFAULT_CONTAINER_ID)).unwrap();
        assert_eq!(document.select(&selector).count(), 50);
    }

    #[test]
    fn test_unclosed_container_appends_before_the_document_close() {
        let config = StarsConfig::default();
        let mut rng = StdRng::seed_from_u64(29);
        let page = format!(
            "<html><body><div id=\"{}\"></body></html>",
            DEFAULT_CONTAINER_ID
        );

        let out = populate(&page, &config, &mut rng);
        assert!(out.ends_with("</body></html>"));

        let document = Html::parse_document(&out);
        let selector =
            Selector::parse(&format!("#{} .animate-twinkle", DEFAULT_CONTAINER_ID)).unwrap();
        assert_eq!(document.select(&selector).count(), 50);
    }

    #[test]
    fn test_custom_container_id() {
        let config = StarsConfig {
            container_id: "night-sky".to_string(),
            ..StarsConfig::default()
        };
        let mut rng = StdRng::seed_from_u64(13);
        let page = "<html><body><div id=\"night-sky\"></div></body></html>";

        let out = populate(page, &config, &mut rng);
        assert_eq!(count_stars(&out), 50);
    }
}
