//! Filename version parsing and allocation.
//!
//! Versions are encoded in the filename as `<base>_v<N>.<ext>`. The
//! number is what counts: records whose filename does not carry a
//! parseable `_v<N>.` suffix are ignored rather than treated as errors,
//! so a stray hand-uploaded file cannot wedge the allocator.

use regex::Regex;
use std::sync::LazyLock;

static VERSION_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"_v(\d+)\.").unwrap());

/// Extract the version number from a filename, if present.
///
/// Only the first `_v<N>.` occurrence is considered.
pub fn parse_version(filename: &str) -> Option<u32> {
    VERSION_SUFFIX
        .captures(filename)?
        .get(1)?
        .as_str()
        .parse()
        .ok()
}

/// Next version over a set of existing filenames: max parsed version
/// (0 when none parse) plus one. Version numbers are never reused.
pub fn next_version<'a>(filenames: impl IntoIterator<Item = &'a str>) -> u32 {
    filenames
        .into_iter()
        .filter_map(parse_version)
        .max()
        .unwrap_or(0)
        + 1
}

/// Build the canonical versioned filename.
pub fn versioned_filename(base_name: &str, version: u32, extension: &str) -> String {
    format!("{}_v{}.{}", base_name, version, extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_version() {
        assert_eq!(parse_version("proposal_v3.pdf"), Some(3));
        assert_eq!(parse_version("site-survey_v12.docx"), Some(12));
    }

    #[test]
    fn ignores_filenames_without_version() {
        assert_eq!(parse_version("proposal.pdf"), None);
        assert_eq!(parse_version("proposal_v.pdf"), None);
        assert_eq!(parse_version("proposal_vX.pdf"), None);
    }

    #[test]
    fn version_requires_trailing_dot() {
        // "_v2" without a following dot is not a version suffix
        assert_eq!(parse_version("proposal_v2"), None);
    }

    #[test]
    fn base_names_containing_v_do_not_confuse_parsing() {
        assert_eq!(parse_version("rev_v7.xlsx"), Some(7));
        assert_eq!(parse_version("survey_final.pdf"), None);
    }

    #[test]
    fn next_version_starts_at_one() {
        assert_eq!(next_version([]), 1);
    }

    #[test]
    fn next_version_is_max_plus_one() {
        let names = ["proposal_v1.pdf", "proposal_v5.pdf", "proposal_v3.pdf"];
        assert_eq!(next_version(names), 6);
    }

    #[test]
    fn next_version_skips_unparseable_names() {
        let names = ["proposal_v2.pdf", "proposal_draft.pdf", "notes.txt"];
        assert_eq!(next_version(names), 3);
    }

    #[test]
    fn versioned_filename_round_trips() {
        let name = versioned_filename("proposal", 4, "pdf");
        assert_eq!(name, "proposal_v4.pdf");
        assert_eq!(parse_version(&name), Some(4));
    }
}
