use unicode_segmentation::UnicodeSegmentation;

use super::types::{Capitalization, RenameConfig, SourceEntry};

/// Compute the destination base name (no extension) for an entry
///
/// Pure and total: never touches the filesystem and never fails.
/// `index` is the 0-based position of the entry in its batch.
///
/// A cleared name with no custom base is the sequence number itself, so
/// the number is not appended a second time (`001`, not `001_001`).
pub fn compute_base_name(entry: &SourceEntry, index: usize, config: &RenameConfig) -> String {
    let index_as_name = config.clear_names && config.custom_base_name.is_empty();

    let wrapped = if index_as_name {
        sequence_number(index)
    } else if config.clear_names {
        config.custom_base_name.clone()
    } else {
        format!("{}{}{}", config.prefix, entry.base_name, config.suffix)
    };

    let mut name = apply_capitalization(&wrapped, config.capitalization);

    if (config.add_numbering || config.clear_names) && !index_as_name {
        name.push('_');
        name.push_str(&sequence_number(index));
    }

    name
}

/// 1-based, zero-padded to at least three digits
pub fn sequence_number(index: usize) -> String {
    format!("{:03}", index + 1)
}

pub fn apply_capitalization(name: &str, capitalization: Capitalization) -> String {
    match capitalization {
        Capitalization::None => name.to_string(),
        Capitalization::FirstLetter => uppercase_first_grapheme(name),
        Capitalization::AllUpper => name.to_uppercase(),
        Capitalization::AllLower => name.to_lowercase(),
    }
}

fn uppercase_first_grapheme(name: &str) -> String {
    let mut graphemes = name.graphemes(true);
    match graphemes.next() {
        Some(first) => {
            let mut out = first.to_uppercase();
            out.push_str(graphemes.as_str());
            out
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str) -> SourceEntry {
        SourceEntry::new(format!("/input/{}", name))
    }

    #[test]
    fn test_default_config_keeps_base_name() {
        let config = RenameConfig::default();
        assert_eq!(compute_base_name(&entry("holiday.jpg"), 0, &config), "holiday");
        assert_eq!(compute_base_name(&entry("Mixed Case.jpg"), 7, &config), "Mixed Case");
    }

    #[test]
    fn test_unchanged_base_name_still_capitalized() {
        let config = RenameConfig {
            capitalization: Capitalization::AllUpper,
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("holiday.jpg"), 0, &config), "HOLIDAY");
    }

    #[test]
    fn test_prefix_and_suffix_without_separators() {
        let config = RenameConfig {
            prefix: "Q1_".to_string(),
            suffix: "_draft".to_string(),
            ..Default::default()
        };
        assert_eq!(
            compute_base_name(&entry("report.pdf"), 0, &config),
            "Q1_report_draft"
        );
    }

    #[test]
    fn test_first_letter_applies_to_wrapped_name() {
        let config = RenameConfig {
            prefix: "x_".to_string(),
            capitalization: Capitalization::FirstLetter,
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("abc.txt"), 0, &config), "X_abc");

        let already_upper = RenameConfig {
            prefix: "X_".to_string(),
            capitalization: Capitalization::FirstLetter,
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("abc.txt"), 0, &already_upper), "X_abc");
    }

    #[test]
    fn test_first_letter_leaves_rest_untouched() {
        assert_eq!(
            apply_capitalization("hELLO wORLD", Capitalization::FirstLetter),
            "HELLO wORLD"
        );
        assert_eq!(apply_capitalization("", Capitalization::FirstLetter), "");
    }

    #[test]
    fn test_first_letter_handles_multibyte_graphemes() {
        assert_eq!(apply_capitalization("éclair", Capitalization::FirstLetter), "Éclair");
        // e + combining acute accent is a single grapheme
        assert_eq!(
            apply_capitalization("e\u{301}clair", Capitalization::FirstLetter),
            "E\u{301}clair"
        );
        assert_eq!(apply_capitalization("ßtraße", Capitalization::FirstLetter), "SStraße");
        assert_eq!(apply_capitalization("日本", Capitalization::FirstLetter), "日本");
    }

    #[test]
    fn test_all_lower() {
        assert_eq!(apply_capitalization("ÀBC Def", Capitalization::AllLower), "àbc def");
    }

    #[test]
    fn test_numbering_appended_after_capitalization() {
        let config = RenameConfig {
            add_numbering: true,
            capitalization: Capitalization::AllUpper,
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("img.png"), 0, &config), "IMG_001");
        assert_eq!(compute_base_name(&entry("img.png"), 41, &config), "IMG_042");
    }

    #[test]
    fn test_sequence_number_grows_past_three_digits() {
        assert_eq!(sequence_number(0), "001");
        assert_eq!(sequence_number(998), "999");
        assert_eq!(sequence_number(999), "1000");
        assert_eq!(sequence_number(12344), "12345");
    }

    #[test]
    fn test_clear_names_without_custom_base_is_the_index() {
        let config = RenameConfig {
            clear_names: true,
            add_numbering: false,
            prefix: "ignored_".to_string(),
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("a.txt"), 0, &config), "001");
        assert_eq!(compute_base_name(&entry("b.txt"), 1, &config), "002");
        assert_eq!(compute_base_name(&entry("c.txt"), 999, &config), "1000");
    }

    #[test]
    fn test_clear_names_ignores_prefix_and_suffix() {
        let config = RenameConfig {
            clear_names: true,
            custom_base_name: "trip".to_string(),
            prefix: "pre_".to_string(),
            suffix: "_post".to_string(),
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("a.txt"), 0, &config), "trip_001");
        assert_eq!(compute_base_name(&entry("b.txt"), 9, &config), "trip_010");
    }

    #[test]
    fn test_clear_names_custom_base_capitalized() {
        let config = RenameConfig {
            clear_names: true,
            custom_base_name: "vacation".to_string(),
            capitalization: Capitalization::FirstLetter,
            ..Default::default()
        };
        assert_eq!(compute_base_name(&entry("a.txt"), 2, &config), "Vacation_003");
    }

    #[test]
    fn test_is_deterministic() {
        let config = RenameConfig {
            prefix: "p".to_string(),
            add_numbering: true,
            capitalization: Capitalization::FirstLetter,
            ..Default::default()
        };
        let e = entry("name.txt");
        assert_eq!(
            compute_base_name(&e, 5, &config),
            compute_base_name(&e, 5, &config)
        );
    }
}
