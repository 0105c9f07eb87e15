//! Status text cleanup: drop feed URLs and package prefixes.

/// Fragments removed from status text, in order. Only the first occurrence
/// of each fragment is removed.
pub const NOISE_FRAGMENTS: [&str; 5] = [
    "enigma2-plugin-extensions-",
    "enigma2-plugin-systemplugins-",
    "https://raw.githubusercontent.com/oe-alliance/",
    "https://feeds2.mynonpublic.com/",
    "/Packages.gz",
];

/// Strip known noisy fragments from a status line.
pub fn clean_status_text(text: &str) -> String {
    let mut cleaned = text.to_owned();
    for fragment in NOISE_FRAGMENTS {
        if let Some(pos) = cleaned.find(fragment) {
            cleaned.replace_range(pos..pos + fragment.len(), "");
        }
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_url_reduced_to_name() {
        let raw = "https://raw.githubusercontent.com/oe-alliance/enigma2-plugin-extensions-foo/Packages.gz";
        assert_eq!(clean_status_text(raw), "foo");
    }

    #[test]
    fn test_package_prefix() {
        assert_eq!(
            clean_status_text("Installing enigma2-plugin-systemplugins-softwaremanager"),
            "Installing softwaremanager"
        );
    }

    #[test]
    fn test_only_first_occurrence() {
        assert_eq!(
            clean_status_text("/Packages.gz /Packages.gz"),
            " /Packages.gz"
        );
    }

    #[test]
    fn test_plain_text_untouched() {
        assert_eq!(clean_status_text("Installing package-foo"), "Installing package-foo");
    }
}
