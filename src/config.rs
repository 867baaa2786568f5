use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that
/// overrides the defaults below.
pub const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Animation frames a counter takes to reach its target.
    pub counter_frames: u32,
    /// Fraction of an element that must be visible before it is revealed.
    pub reveal_threshold: f64,
    pub testimonials: TestimonialConfig,
    pub stories: StoriesConfig,
    pub schools: SchoolConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            counter_frames: 80,
            reveal_threshold: 0.3,
            testimonials: TestimonialConfig::default(),
            stories: StoriesConfig::default(),
            schools: SchoolConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TestimonialConfig {
    pub auto_advance_ms: u32,
    /// Swipes must travel strictly further than this.
    pub swipe_px: f64,
    /// Widest viewport that still shows a single card.
    pub narrow_max_width: f64,
    pub wide_visible: usize,
    pub resize_debounce_ms: u32,
}

impl Default for TestimonialConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 5_000,
            swipe_px: 50.0,
            narrow_max_width: 1024.0,
            wide_visible: 3,
            resize_debounce_ms: 200,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoriesConfig {
    pub auto_advance_ms: u32,
    /// Swipes of at least this many pixels count.
    pub swipe_px: f64,
    pub phone_max_width: f64,
    pub tablet_max_width: f64,
    pub resize_debounce_ms: u32,
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 4_500,
            swipe_px: 40.0,
            phone_max_width: 640.0,
            tablet_max_width: 1024.0,
            resize_debounce_ms: 180,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SchoolConfig {
    pub auto_advance_ms: u32,
    pub swipe_px: f64,
    /// The grid only behaves as a carousel at or below this width.
    pub mobile_max_width: f64,
    pub resize_debounce_ms: u32,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 3_200,
            swipe_px: 35.0,
            mobile_max_width: 640.0,
            resize_debounce_ms: 180,
        }
    }
}

impl PageConfig {
    pub fn parse(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Reads the page-config block if the page has one. Broken JSON falls
    /// back to the defaults.
    pub fn load(document: &Document) -> Self {
        let Some(text) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::parse(&text) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring malformed #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = PageConfig::parse("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.testimonials.auto_advance_ms, 5_000);
        assert_eq!(config.stories.auto_advance_ms, 4_500);
        assert_eq!(config.schools.auto_advance_ms, 3_200);
    }

    #[test]
    fn nested_override_keeps_sibling_defaults() {
        let config = PageConfig::parse(
            r#"{ "counter_frames": 40, "stories": { "swipe_px": 25 } }"#,
        )
        .unwrap();

        assert_eq!(config.counter_frames, 40);
        assert_eq!(config.stories.swipe_px, 25.0);
        assert_eq!(config.stories.auto_advance_ms, 4_500);
        assert_eq!(config.testimonials, TestimonialConfig::default());
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert!(PageConfig::parse(r#"{ "counter_frames": "lots" }"#).is_err());
        assert!(PageConfig::parse("not json").is_err());
    }
}
