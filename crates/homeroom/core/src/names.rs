//! Student name equivalence used when no strict student link exists.

/// Spellings of a student name treated as equivalent.
///
/// Yields the name as given, without spaces, without commas, and without
/// both. A name in "Last, First" form additionally yields "First Last" and
/// its three stripped forms. Only the first comma is considered; names with
/// several commas or other shapes are matched as-is.
///
/// Variants keep their original case; see [`names_match`] for comparison.
pub fn name_variants(name: &str) -> Vec<String> {
    let name = name.trim();
    if name.is_empty() {
        return Vec::new();
    }

    let mut variants = stripped_forms(name);

    if let Some((last, first)) = name.split_once(',') {
        let reordered = format!("{} {}", first.trim(), last.trim());
        variants.extend(stripped_forms(reordered.trim()));
    }

    variants
}

/// Whether two student names are equivalent.
///
/// True when any variant of one equals any variant of the other, ignoring
/// case. Matching in both directions lets an incoming "First Last" reach a
/// stored "Last, First" and the other way round. There is no similarity
/// score: a pair either matches exactly under some variant or it does not.
pub fn names_match(stored: &str, incoming: &str) -> bool {
    let incoming: Vec<String> = name_variants(incoming)
        .into_iter()
        .map(|v| v.to_lowercase())
        .collect();

    if incoming.is_empty() {
        return false;
    }

    name_variants(stored)
        .into_iter()
        .map(|v| v.to_lowercase())
        .any(|v| incoming.contains(&v))
}

fn stripped_forms(name: &str) -> Vec<String> {
    vec![
        name.to_string(),
        name.replace(' ', ""),
        name.replace(',', ""),
        name.replace([' ', ','], ""),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_name_has_eight_variants() {
        let variants = name_variants("Dela Cruz, Juan");
        assert_eq!(
            variants,
            vec![
                "Dela Cruz, Juan",
                "DelaCruz,Juan",
                "Dela Cruz Juan",
                "DelaCruzJuan",
                "Juan Dela Cruz",
                "JuanDelaCruz",
                "Juan Dela Cruz",
                "JuanDelaCruz",
            ]
        );
    }

    #[test]
    fn test_plain_name_is_not_reordered() {
        let variants = name_variants("Juan Delacruz");
        assert_eq!(
            variants,
            vec!["Juan Delacruz", "JuanDelacruz", "Juan Delacruz", "JuanDelacruz"]
        );
        assert!(!variants.iter().any(|v| v.contains("Delacruz Juan")));
    }

    #[test]
    fn test_reordered_name_matches() {
        assert!(names_match("Dela Cruz, Juan", "Juan Dela Cruz"));
        assert!(names_match("Juan Dela Cruz", "Dela Cruz, Juan"));
        assert!(names_match("dela cruz, juan", "DELA CRUZ, JUAN"));
        assert!(names_match("DelaCruz, Juan", "Dela Cruz Juan"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        assert!(!names_match("Dela Cruz, Juan", "Juan Santos"));
        assert!(!names_match("Juan Delacruz", "Delacruz Juan"));
        assert!(!names_match("", ""));
    }

    #[test]
    fn test_blank_name() {
        assert!(name_variants("   ").is_empty());
    }
}
