use crate::error::GribError;

/// Returns `n` values evenly spaced from `first` to `last`, both given in
/// micro-degrees, as degrees.
pub(crate) fn evenly_spaced_degrees(first: i32, last: i32, n: u32) -> Vec<f64> {
    let first = f64::from(first);
    let last = f64::from(last);
    match n {
        0 => Vec::new(),
        1 => vec![first / 1e6],
        _ => {
            let delta = (last - first) / f64::from(n - 1);
            (0..n)
                .map(|k| (first + f64::from(k) * delta) / 1e6)
                .collect()
        }
    }
}

/// Moves the last longitude by a full turn when it lies on the other side
/// of the first longitude than the scanning direction implies, so that rows
/// crossing the 0/360 meridian are continuous.
pub(crate) fn unwrap_last_lon(first: i32, last: i32, scans_positively: bool) -> i32 {
    const FULL_TURN: i32 = 360_000_000;
    if scans_positively && last < first {
        last + FULL_TURN
    } else if !scans_positively && last > first {
        last - FULL_TURN
    } else {
        last
    }
}

/// Fails unless coordinates are given in micro-degrees, i.e. the basic angle
/// is 0 or missing.
pub(crate) fn ensure_micro_degrees(basic_angle: u32, subdivision: u32) -> Result<(), GribError> {
    if basic_angle == 0 || basic_angle == u32::MAX {
        Ok(())
    } else {
        Err(GribError::NotSupported(format!(
            "basic angle {basic_angle}/{subdivision}"
        )))
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evenly_spaced_values() {
        assert_eq!(
            evenly_spaced_degrees(36_000_000, 35_000_000, 3),
            vec![36.0, 35.5, 35.0]
        );
        assert_eq!(evenly_spaced_degrees(36_000_000, 0, 1), vec![36.0]);
        assert!(evenly_spaced_degrees(0, 0, 0).is_empty());
    }

    macro_rules! test_lon_unwrapping {
        ($(($name:ident, $first:expr, $last:expr, $positive:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                assert_eq!(unwrap_last_lon($first, $last, $positive), $expected);
            }
        )*);
    }

    test_lon_unwrapping! {
        (lon_increasing_in_positive_scan, 0, 359_000_000, true, 359_000_000),
        (lon_crossing_meridian_in_positive_scan, 350_000_000, 10_000_000, true, 370_000_000),
        (lon_decreasing_in_negative_scan, 10_000_000, 0, false, 0),
        (lon_crossing_meridian_in_negative_scan, 10_000_000, 350_000_000, false, -10_000_000),
    }

    #[test]
    fn basic_angle_other_than_micro_degrees_is_not_supported() {
        assert!(ensure_micro_degrees(0, u32::MAX).is_ok());
        assert!(ensure_micro_degrees(u32::MAX, u32::MAX).is_ok());
        assert_eq!(
            ensure_micro_degrees(1, 1000),
            Err(GribError::NotSupported("basic angle 1/1000".to_owned()))
        );
    }
}
