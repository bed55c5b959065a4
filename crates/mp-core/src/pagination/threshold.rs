//! End-reached threshold helper for presentation layers.
//!
//! The pagination state never decides when to load more; this is offered to
//! the presentation side so every host measures "near the end" the same way.

/// `true` when the viewport's trailing edge is within `threshold` viewport
/// lengths of the end of the content.
///
/// `threshold` is clamped to `0.0..=1.0`. A zero-length viewport never
/// triggers.
pub fn should_load_more(distance_from_end: f32, viewport_len: f32, threshold: f32) -> bool {
    if viewport_len <= 0.0 || !distance_from_end.is_finite() {
        return false;
    }
    let threshold = threshold.clamp(0.0, 1.0);
    distance_from_end.max(0.0) / viewport_len <= threshold
}
