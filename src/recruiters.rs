use log::debug;
use web_sys::Document;

use crate::error::WidgetResult;

const CLONED_ATTR: &str = "data-cloned";

/// Doubles the recruiter logo strip so its CSS marquee can loop without a
/// visible gap. The marker attribute keeps a second call from doubling it
/// again.
pub fn init(document: &Document) -> WidgetResult {
    let Some(track) = document.get_element_by_id("sliderTrack") else {
        debug!("No #sliderTrack on this page");
        return Ok(());
    };
    if track.has_attribute(CLONED_ATTR) {
        return Ok(());
    }
    let logos = track.inner_html();
    track.set_inner_html(&logos.repeat(2));
    track.set_attribute(CLONED_ATTR, "true")?;
    Ok(())
}
