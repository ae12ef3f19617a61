//! Scroll-position bookkeeping for the section navigation.

/// Lookahead applied on both sides of the comparison so a section counts as
/// current slightly before its top edge reaches the viewport top.
pub const SCROLL_LOOKAHEAD: f64 = 150.0;

/// Scroll depth past which the navbar switches to its condensed treatment.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

/// Extra gap left above a section when scrolling to it, on top of the
/// navbar height.
pub const NAV_SCROLL_MARGIN: f64 = 20.0;

/// Measured geometry of one section, re-read from layout on every pass.
#[derive(Clone, Debug, PartialEq)]
pub struct SectionBounds {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl SectionBounds {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }
}

/// Returns the id of the section containing the adjusted scroll position.
///
/// Sections are scanned in document order and the last match wins, so if
/// ranges ever overlap the later section is favored.
pub fn active_section(scroll_y: f64, sections: &[SectionBounds]) -> Option<&str> {
    let position = scroll_y + SCROLL_LOOKAHEAD;
    let mut current = None;

    for section in sections {
        let top = section.top - SCROLL_LOOKAHEAD;
        if position >= top && position < top + section.height {
            current = Some(section.id.as_str());
        }
    }

    current
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

/// Destination offset for a smooth scroll to a section, compensating for
/// the fixed navbar.
pub fn scroll_target(section_top: f64, navbar_height: f64) -> f64 {
    section_top - navbar_height - NAV_SCROLL_MARGIN
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stacked() -> Vec<SectionBounds> {
        vec![
            SectionBounds::new("about", 0.0, 500.0),
            SectionBounds::new("skills", 500.0, 700.0),
        ]
    }

    #[test]
    fn position_inside_first_section() {
        assert_eq!(active_section(100.0, &stacked()), Some("about"));
    }

    #[test]
    fn position_inside_second_section() {
        assert_eq!(active_section(600.0, &stacked()), Some("skills"));
    }

    #[test]
    fn position_past_all_sections() {
        assert_eq!(active_section(1300.0, &stacked()), None);
    }

    #[test]
    fn no_sections_no_current() {
        assert_eq!(active_section(0.0, &[]), None);
    }

    #[test]
    fn lookahead_pulls_section_in_early() {
        let sections = vec![SectionBounds::new("skills", 800.0, 400.0)];
        // 500 + 150 lands exactly on the section's shifted top.
        assert_eq!(active_section(500.0, &sections), Some("skills"));
        assert_eq!(active_section(499.0, &sections), None);
    }

    #[test]
    fn window_upper_bound_is_exclusive() {
        let sections = vec![SectionBounds::new("about", 0.0, 500.0)];
        // position == top - 150 + height falls outside.
        assert_eq!(active_section(200.0, &sections), None);
        assert_eq!(active_section(199.0, &sections), Some("about"));
    }

    #[test]
    fn overlapping_ranges_favor_later_section() {
        let sections = vec![
            SectionBounds::new("about", 0.0, 1000.0),
            SectionBounds::new("skills", 400.0, 600.0),
        ];
        assert_eq!(active_section(500.0, &sections), Some("skills"));
    }

    #[test]
    fn at_most_one_section_current() {
        let sections = stacked();
        for step in 0..30 {
            let scroll_y = f64::from(step) * 50.0;
            let position = scroll_y + SCROLL_LOOKAHEAD;
            let matches = sections
                .iter()
                .filter(|section| {
                    let top = section.top - SCROLL_LOOKAHEAD;
                    position >= top && position < top + section.height
                })
                .count();
            assert!(matches <= 1);

            let current = active_section(scroll_y, &sections);
            assert_eq!(current.is_some(), matches == 1);
        }
    }

    #[test]
    fn navbar_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
    }

    #[test]
    fn scroll_target_compensates_for_navbar() {
        assert_eq!(scroll_target(900.0, 64.0), 816.0);
        assert_eq!(scroll_target(0.0, 64.0), -84.0);
    }
}
