//! Logical texture name normalization
//!
//! The engine decorates runtime object names with instance markers, so a
//! sprite loaded from `t_menu_bg` may be reported as `t_menu_bg(Clone)`.
//! Lookups strip those markers first.

/// Instance markers removed from the end of a name, in the order tried.
pub const INSTANCE_SUFFIXES: [&str; 2] = ["(Clone)", " (Instance)"];

/// Strip trailing instance markers (repeatedly) and trailing whitespace.
///
/// `"bg(Clone)(Clone)"` and `"bg (Instance)"` both normalize to `"bg"`.
/// Names without markers are returned unchanged.
#[must_use]
pub fn normalize_texture_name(name: &str) -> &str {
    let mut current = name;
    loop {
        let stripped = INSTANCE_SUFFIXES
            .iter()
            .find_map(|suffix| current.strip_suffix(suffix));
        match stripped {
            Some(rest) => current = rest.trim_end(),
            None => return current,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(normalize_texture_name("t_gsd1_vaa_00"), "t_gsd1_vaa_00");
        assert_eq!(normalize_texture_name(""), "");
    }

    #[test]
    fn test_strips_markers() {
        assert_eq!(normalize_texture_name("vc30_01(Clone)"), "vc30_01");
        assert_eq!(normalize_texture_name("fx_ring (Instance)"), "fx_ring");
        assert_eq!(normalize_texture_name("bg(Clone)(Clone)"), "bg");
        assert_eq!(normalize_texture_name("bg(Clone) (Instance)"), "bg");
    }

    #[test]
    fn test_markers_only_at_end() {
        assert_eq!(normalize_texture_name("(Clone)bg"), "(Clone)bg");
    }
}
