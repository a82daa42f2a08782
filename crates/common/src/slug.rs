//! URL-safe slug derivation
//!
//! Slugs are derived once from a human-readable name and never recomputed
//! after the first save. Accented characters are folded to ASCII before
//! non-alphanumeric runs collapse to single dashes.

/// Derive a URL-safe slug from a human-readable name.
pub fn slugify(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push(c.to_ascii_lowercase());
            pending_dash = false;
        } else if let Some(folded) = fold_accent(c) {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            out.push_str(folded);
            pending_dash = false;
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Fold an accented character to its ASCII equivalent, or None when it
/// acts as a separator.
fn fold_accent(c: char) -> Option<&'static str> {
    match c {
        'à' | 'â' | 'ä' | 'á' | 'ã' | 'À' | 'Â' | 'Ä' | 'Á' => Some("a"),
        'é' | 'è' | 'ê' | 'ë' | 'É' | 'È' | 'Ê' | 'Ë' => Some("e"),
        'î' | 'ï' | 'í' | 'Î' | 'Ï' => Some("i"),
        'ô' | 'ö' | 'ó' | 'õ' | 'Ô' | 'Ö' => Some("o"),
        'ù' | 'û' | 'ü' | 'ú' | 'Ù' | 'Û' | 'Ü' => Some("u"),
        'ç' | 'Ç' => Some("c"),
        'ñ' | 'Ñ' => Some("n"),
        'œ' | 'Œ' => Some("oe"),
        'æ' | 'Æ' => Some("ae"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn test_french_accents() {
        assert_eq!(slugify("Création de site vitrine"), "creation-de-site-vitrine");
        assert_eq!(slugify("Référencement naturel"), "referencement-naturel");
        assert_eq!(slugify("Maintenance & hébergement"), "maintenance-hebergement");
    }

    #[test]
    fn test_collapses_separators() {
        assert_eq!(slugify("  SEO --- Ouagadougou  "), "seo-ouagadougou");
        assert_eq!(slugify("SEA (Google Ads)"), "sea-google-ads");
    }

    #[test]
    fn test_url_safe_output() {
        let slug = slugify("Un Titre: Très! Spécial?");
        assert!(slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        assert!(!slug.starts_with('-'));
        assert!(!slug.ends_with('-'));
    }

    #[test]
    fn test_digits_kept() {
        assert_eq!(slugify("Top 10 tendances 2026"), "top-10-tendances-2026");
    }
}
