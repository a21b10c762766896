use egui::{Pos2, Rect};

use crate::error::{EditorError, EditorResult};

// Ranges offered by the property panel
pub const STROKE_WIDTH_RANGE: std::ops::RangeInclusive<u32> = 1..=20;
pub const FONT_SIZE_RANGE: std::ops::RangeInclusive<u32> = 8..=72;
pub const OPACITY_RANGE: std::ops::RangeInclusive<f32> = 0.0..=1.0;

/// Minimum pointer distance for picking thin paths
pub const PATH_HIT_TOLERANCE: f32 = 4.0;

/// Height of a text line relative to its font size
pub const TEXT_LINE_HEIGHT: f32 = 1.16;
/// Rough glyph advance relative to font size, used to lay out text boxes
pub const TEXT_CHAR_WIDTH: f32 = 0.6;

/// Font size of text converted from an object, relative to the object's height
pub const CONVERTED_FONT_SCALE: f32 = 0.8;

pub(crate) fn validate_opacity(opacity: f32) -> EditorResult<()> {
    if OPACITY_RANGE.contains(&opacity) {
        Ok(())
    } else {
        Err(EditorError::InvalidAttributeValue {
            attribute: "opacity",
            reason: format!("{} is outside 0.0..=1.0", opacity),
        })
    }
}

pub(crate) fn validate_positive(attribute: &'static str, value: u32) -> EditorResult<()> {
    if value == 0 {
        Err(EditorError::InvalidAttributeValue {
            attribute,
            reason: "must be a positive integer".to_owned(),
        })
    } else {
        Ok(())
    }
}

/// Calculate distance from a point to a line segment (useful for path hit testing)
pub(crate) fn distance_to_line_segment(point: Pos2, line_start: Pos2, line_end: Pos2) -> f32 {
    let line_vec = line_end - line_start;
    let point_vec = point - line_start;

    let line_len = line_vec.length();
    if line_len == 0.0 {
        return point_vec.length();
    }

    let t = ((point_vec.x * line_vec.x + point_vec.y * line_vec.y) / line_len).clamp(0.0, line_len);
    let projection = line_start + (line_vec * t / line_len);
    (point - projection).length()
}

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_to_segment() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 0.0);
        assert!((distance_to_line_segment(Pos2::new(5.0, 3.0), a, b) - 3.0).abs() < 0.001);
        // Past the end of the segment the distance is to the endpoint
        assert!((distance_to_line_segment(Pos2::new(13.0, 4.0), a, b) - 5.0).abs() < 0.001);
        // Degenerate segment
        assert!((distance_to_line_segment(Pos2::new(3.0, 4.0), a, a) - 5.0).abs() < 0.001);
    }

    #[test]
    fn test_bounds_with_padding() {
        let rect = calculate_bounds(&[Pos2::new(10.0, 20.0), Pos2::new(30.0, 5.0)], 1.0);
        assert_eq!(rect.min, Pos2::new(9.0, 4.0));
        assert_eq!(rect.max, Pos2::new(31.0, 21.0));
        assert_eq!(calculate_bounds(&[], 1.0), Rect::NOTHING);
    }

    #[test]
    fn test_value_validation() {
        assert!(validate_opacity(0.0).is_ok());
        assert!(validate_opacity(1.0).is_ok());
        assert!(validate_opacity(1.5).is_err());
        assert!(validate_positive("strokeWidth", 0).is_err());
        assert!(validate_positive("strokeWidth", 3).is_ok());
    }
}
