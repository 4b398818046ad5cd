use super::{OPEN_DURATION, ROTATE_OVERSHOOT, ROTATION_ARC, SCALE_FACTOR};
use sepal::{AnimationSpec, Easing, Property};

/// Scale transition between collapsed and expanded. The end value persists
/// until the completion callback snaps the model state.
pub fn zoom(reverse: bool) -> AnimationSpec {
    let (from, to) = if reverse {
        (SCALE_FACTOR, 1.0)
    } else {
        (1.0, SCALE_FACTOR)
    };

    AnimationSpec::new(OPEN_DURATION)
        .with_track(Property::Scale, from, to)
        .retained()
}

/// Rotate-and-fade group for the petal container. Runs slightly longer than
/// the scale so rotation outlasts it. The opening direction persists its end
/// state; the reverse direction clears, falling back to the model values the
/// close-start handler already reset.
pub fn rotate(reverse: bool) -> AnimationSpec {
    let (angle_from, angle_to) = if reverse {
        (ROTATION_ARC, 0.0)
    } else {
        (0.0, ROTATION_ARC)
    };
    let (alpha_from, alpha_to) = if reverse { (1.0, 0.0) } else { (0.0, 1.0) };

    let spec = AnimationSpec::new(OPEN_DURATION + ROTATE_OVERSHOOT)
        .with_track(Property::Rotation, angle_from, angle_to)
        .with_track(Property::Opacity, alpha_from, alpha_to)
        .with_easing(Easing::EaseOut);

    if reverse { spec } else { spec.retained() }
}

/// Scale-down from an arbitrary starting value, used to reverse an opening
/// animation from its in-flight presentation value.
pub fn zoom_out(from: f64, to: f64) -> AnimationSpec {
    AnimationSpec::new(OPEN_DURATION).with_track(Property::Scale, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sepal::{FillMode, Track};

    #[test]
    fn zoom_endpoints_follow_direction() {
        let open = zoom(false);
        assert_eq!(
            open.tracks,
            vec![Track {
                property: Property::Scale,
                from: 1.0,
                to: SCALE_FACTOR,
            }]
        );
        assert_eq!(open.duration, OPEN_DURATION);
        assert_eq!(open.fill, FillMode::Forwards);

        let close = zoom(true);
        assert_eq!(close.tracks[0].from, SCALE_FACTOR);
        assert_eq!(close.tracks[0].to, 1.0);
    }

    #[test]
    fn rotate_group_pairs_rotation_with_fade() {
        let open = rotate(false);
        assert_eq!(open.duration, OPEN_DURATION + ROTATE_OVERSHOOT);
        assert_eq!(open.easing, Easing::EaseOut);
        assert_eq!(open.fill, FillMode::Forwards);
        assert_eq!(open.tracks.len(), 2);
        assert_eq!(open.tracks[0].property, Property::Rotation);
        assert_eq!(open.tracks[0].to, ROTATION_ARC);
        assert_eq!(open.tracks[1].property, Property::Opacity);
        assert_eq!(open.tracks[1].to, 1.0);
    }

    #[test]
    fn reverse_rotate_clears_instead_of_filling() {
        let close = rotate(true);
        assert_eq!(close.fill, FillMode::Removed);
        assert_eq!(close.tracks[0].from, ROTATION_ARC);
        assert_eq!(close.tracks[0].to, 0.0);
        assert_eq!(close.tracks[1].from, 1.0);
        assert_eq!(close.tracks[1].to, 0.0);
    }

    #[test]
    fn zoom_out_takes_arbitrary_start() {
        let spec = zoom_out(4.6, 1.0);
        assert_eq!(spec.tracks[0].from, 4.6);
        assert_eq!(spec.tracks[0].to, 1.0);
        assert_eq!(spec.fill, FillMode::Removed);
    }
}
