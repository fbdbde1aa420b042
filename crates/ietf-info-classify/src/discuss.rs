//! Detection of a withdrawn Discuss position on a Datatracker ballot page.
//!
//! A reviewer block on the ballot page looks like:
//!
//! ```text
//! <div class="d-flex">
//!   <div>Jane Doe</div>
//!   <div class="flex-fill text-end">
//!     <span class="text-muted small">(was Discuss)</span> No Objection
//!   </div>
//! </div>
//! ```
//!
//! The match is tied to that exact markup; a layout change upstream means
//! this stops matching, not that it matches something else.

use regex::Regex;

#[derive(Debug, Clone)]
pub struct DiscussMatcher {
    re: Regex,
}

impl DiscussMatcher {
    /// Build a matcher for `name`, which is matched literally.
    pub fn new(name: &str) -> Result<Self, regex::Error> {
        let pattern = format!(
            r#"{}\s*</div>\s*<div class="flex-fill text-end">\s*<span class="text-muted small">\(was Discuss\)"#,
            regex::escape(name)
        );
        Ok(Self {
            re: Regex::new(&pattern)?,
        })
    }

    pub fn is_match(&self, markup: &str) -> bool {
        self.re.is_match(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WAS_DISCUSS: &str = r#"<div class="d-flex">
  <div>Jane Doe</div>
  <div class="flex-fill text-end">
    <span class="text-muted small">(was Discuss)</span> No Objection
  </div>
</div>"#;

    const NO_OBJECTION: &str = r#"<div class="d-flex">
  <div>Jane Doe</div>
  <div class="flex-fill text-end">
    No Objection
  </div>
</div>"#;

    #[test]
    fn matches_withdrawn_discuss() {
        let m = DiscussMatcher::new("Jane Doe").unwrap();
        assert!(m.is_match(WAS_DISCUSS));
    }

    #[test]
    fn plain_position_does_not_match() {
        let m = DiscussMatcher::new("Jane Doe").unwrap();
        assert!(!m.is_match(NO_OBJECTION));
    }

    #[test]
    fn other_reviewer_does_not_match() {
        let m = DiscussMatcher::new("John Roe").unwrap();
        assert!(!m.is_match(WAS_DISCUSS));
    }

    #[test]
    fn compact_markup_matches() {
        let m = DiscussMatcher::new("Jane Doe").unwrap();
        let compact = r#"Jane Doe</div><div class="flex-fill text-end"><span class="text-muted small">(was Discuss)"#;
        assert!(m.is_match(compact));
    }

    #[test]
    fn name_is_literal() {
        let m = DiscussMatcher::new("J. Doe (Ed.)").unwrap();
        let markup = r#"J. Doe (Ed.)</div> <div class="flex-fill text-end"> <span class="text-muted small">(was Discuss)"#;
        assert!(m.is_match(markup));
        let other = markup.replace("J. Doe (Ed.)", "JX Doe Ed.");
        assert!(!m.is_match(&other));
    }

    #[test]
    fn case_sensitive() {
        let m = DiscussMatcher::new("jane doe").unwrap();
        assert!(!m.is_match(WAS_DISCUSS));
    }
}
