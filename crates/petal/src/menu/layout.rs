use sepal::{LayerId, Point, Size, Timeline, TimelineError};
use std::f64::consts::TAU;

/// Centers for `count` children spaced evenly on a circle of `radius` around
/// the center of `bounds`. The first child sits at angle 0; children follow
/// in input order. A one-shot placement: callers do not re-run it on resize.
pub fn circular_positions(bounds: Size, count: usize, radius: f64) -> Vec<Point> {
    if count == 0 {
        return Vec::new();
    }

    let center = bounds.center();
    let arc = TAU / count as f64;

    (0..count)
        .map(|index| {
            let angle = index as f64 * arc;
            Point::new(
                center.x + radius * angle.sin(),
                center.y + radius * angle.cos(),
            )
        })
        .collect()
}

/// Assigns circular positions to `children` inside `container`.
pub fn layout_circularly(
    timeline: &mut Timeline,
    container: LayerId,
    children: &[LayerId],
    radius: f64,
) -> Result<(), TimelineError> {
    let bounds = timeline.layer(container)?.bounds;

    for (child, position) in children
        .iter()
        .zip(circular_positions(bounds, children.len(), radius))
    {
        timeline.layer_mut(*child)?.position = position;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Point, expected: Point) {
        assert!(
            (actual.x - expected.x).abs() < 1e-9 && (actual.y - expected.y).abs() < 1e-9,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn six_children_at_radius_13() {
        let positions = circular_positions(Size::new(24.0, 24.0), 6, 13.0);

        assert_eq!(positions.len(), 6);
        assert_close(positions[0], Point::new(12.0, 25.0));
        // Index 3 is half a turn away, the exact opposite point.
        assert_close(positions[3], Point::new(12.0, -1.0));
    }

    #[test]
    fn single_child_sits_at_angle_zero() {
        let positions = circular_positions(Size::new(20.0, 20.0), 1, 5.0);
        assert_close(positions[0], Point::new(10.0, 15.0));
    }

    #[test]
    fn no_children_no_positions() {
        assert!(circular_positions(Size::new(20.0, 20.0), 0, 5.0).is_empty());
    }

    #[test]
    fn placement_is_deterministic() {
        let bounds = Size::new(24.0, 24.0);
        assert_eq!(
            circular_positions(bounds, 6, 13.0),
            circular_positions(bounds, 6, 13.0)
        );
    }
}
