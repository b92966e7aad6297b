use crate::error::MatchError;
use crate::models::Tag;

/// Longest tag name accepted, in characters
pub const MAX_TAG_LEN: usize = 30;

/// Case-folded identity key for a tag name
#[inline]
pub fn tag_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// URL-friendly form of a tag name: lowercase alphanumerics joined by `-`
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.trim().chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Turn raw tag names into distinct tags.
///
/// Names are trimmed and deduplicated on their case-folded key; the first
/// spelling seen becomes the display name. Order of first appearance is kept.
pub fn normalize_tags<S: AsRef<str>>(names: &[S]) -> Result<Vec<Tag>, MatchError> {
    let mut tags: Vec<Tag> = Vec::with_capacity(names.len());

    for raw in names {
        let name = raw.as_ref().trim();
        let len = name.chars().count();
        if len == 0 {
            return Err(MatchError::Validation("tag names cannot be empty".to_string()));
        }
        if len > MAX_TAG_LEN {
            return Err(MatchError::Validation(format!(
                "tag '{}' is longer than {} characters",
                name, MAX_TAG_LEN
            )));
        }

        // Lowercasing can lengthen a name, e.g. 'İ' folds to two chars
        let key = tag_key(name);
        let slug = slugify(name);
        if key.chars().count() > MAX_TAG_LEN || slug.chars().count() > MAX_TAG_LEN {
            return Err(MatchError::Validation(format!(
                "tag '{}' is longer than {} characters once lowercased",
                name, MAX_TAG_LEN
            )));
        }

        if tags.iter().any(|t| t.key == key) {
            continue;
        }

        tags.push(Tag {
            key,
            name: name.to_string(),
            slug,
        });
    }

    Ok(tags)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_dedup() {
        let tags = normalize_tags(&["node.js", "Node.js", "running"]).unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "node.js");
        assert_eq!(tags[1].key, "running");
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        let tags = normalize_tags(&["  Rust ", "rust"]).unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "Rust");
        assert_eq!(tags[0].key, "rust");
    }

    #[test]
    fn test_rejects_empty_and_long_names() {
        assert!(normalize_tags(&["   "]).is_err());
        assert!(normalize_tags(&["x".repeat(MAX_TAG_LEN + 1)]).is_err());
        assert!(normalize_tags(&["x".repeat(MAX_TAG_LEN)]).is_ok());
    }

    #[test]
    fn test_rejects_names_that_grow_when_lowercased() {
        let dotted = "İ".repeat(MAX_TAG_LEN);
        assert_eq!(tag_key(&dotted).chars().count(), 2 * MAX_TAG_LEN);
        assert!(matches!(normalize_tags(&[dotted]), Err(MatchError::Validation(_))));

        let tags = normalize_tags(&["İ".repeat(MAX_TAG_LEN / 2)]).unwrap();
        assert_eq!(tags[0].key.chars().count(), MAX_TAG_LEN);
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Node.JS"), "node-js");
        assert_eq!(slugify("Django Rest Framework"), "django-rest-framework");
        assert_eq!(slugify("--C++--"), "c");
    }
}
