/// Derive a URL slug from a title.
///
/// ASCII letters and digits are lowercased and kept; every other run of
/// characters becomes a single `-`. The result never starts or ends with `-`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_separators() {
        assert_eq!(slugify("Coffee  Beans -- Dark Roast!"), "coffee-beans-dark-roast");
    }

    #[test]
    fn trims_edges() {
        assert_eq!(slugify("  ...Tea & Honey... "), "tea-honey");
    }

    #[test]
    fn drops_non_ascii() {
        assert_eq!(slugify("Crème brûlée"), "cr-me-br-l-e");
        assert_eq!(slugify("☕"), "");
    }
}
