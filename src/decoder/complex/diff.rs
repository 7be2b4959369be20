use super::missing::DecodedValue::{self, Normal};

/// Reverses first-order spatial differencing. The first non-missing value
/// is replaced by the first original value carried in the extra
/// descriptors; missing values are passed through and skipped.
pub(crate) struct SpatialDiff1stOrderDecodeIterator<I> {
    iter: I,
    first: i32,
    count: u32,
    prev: i32,
}

impl<I> SpatialDiff1stOrderDecodeIterator<I> {
    pub(crate) fn new(iter: I, first: i32) -> Self {
        Self {
            iter,
            first,
            count: 0,
            prev: 0,
        }
    }
}

impl<I> Iterator for SpatialDiff1stOrderDecodeIterator<I>
where
    I: Iterator<Item = DecodedValue>,
{
    type Item = DecodedValue;

    fn next(&mut self) -> Option<Self::Item> {
        match self.iter.next()? {
            Normal(v) => {
                let v = match self.count {
                    0 => self.first,
                    _ => v.wrapping_add(self.prev),
                };
                self.count += 1;
                self.prev = v;
                Some(Normal(v))
            }
            missing => Some(missing),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

/// Reverses second-order spatial differencing. The first two non-missing
/// values are replaced by the original values carried in the extra
/// descriptors.
pub(crate) struct SpatialDiff2ndOrderDecodeIterator<I> {
    iter: I,
    first: i32,
    second: i32,
    count: u32,
    prev1: i32,
    prev2: i32,
}

impl<I> SpatialDiff2ndOrderDecodeIterator<I> {
    pub(crate) fn new(iter: I, first: i32, second: i32) -> Self {
        Self {
            iter,
            first,
            second,
            count: 0,
            prev1: 0,
            prev2: 0,
        }
    }
}

impl<I> Iterator for SpatialDiff2ndOrderDecodeIterator<I>
where
    I: Iterator<Item = DecodedValue>,
{
    type Item = DecodedValue;

    fn next(&mut self) -> Option<Self::Item> {
        match self.iter.next()? {
            Normal(v) => {
                let v = match self.count {
                    0 => self.first,
                    1 => self.second,
                    _ => v
                        .wrapping_add(self.prev1.wrapping_mul(2))
                        .wrapping_sub(self.prev2),
                };
                self.count += 1;
                self.prev2 = self.prev1;
                self.prev1 = v;
                Some(Normal(v))
            }
            missing => Some(missing),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iter.size_hint()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::complex::missing::DecodedValue::{Missing1, Missing2};

    fn alternating() -> impl Iterator<Item = DecodedValue> {
        (0_u32..10).map(|n| Normal(n as i32 * (-1_i32).pow(n)))
    }

    macro_rules! test_spatial_diff_1st_order_decoding {
        ($(($name:ident, $input:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let iter = SpatialDiff1stOrderDecodeIterator::new($input.into_iter(), 100);
                assert_eq!(iter.collect::<Vec<_>>(), $expected);
            }
        )*);
    }

    test_spatial_diff_1st_order_decoding! {
        (
            spatial_diff_1st_order_decoding_consisting_of_normal_values,
            alternating(),
            vec![
                Normal(100),
                Normal(99),
                Normal(101),
                Normal(98),
                Normal(102),
                Normal(97),
                Normal(103),
                Normal(96),
                Normal(104),
                Normal(95),
            ]
        ),
        (
            spatial_diff_1st_order_decoding_with_missing_values_in_first_values,
            vec![
                Missing1,
                Normal(0),
                Normal(-1),
                Normal(2),
                Normal(-3),
            ],
            vec![
                Missing1,
                Normal(100),
                Normal(99),
                Normal(101),
                Normal(98),
            ]
        ),
        (
            spatial_diff_1st_order_decoding_with_missing_values_in_non_first_values,
            vec![
                Normal(0),
                Normal(-1),
                Missing1,
                Normal(2),
                Normal(-3),
                Missing2,
                Normal(4),
            ],
            vec![
                Normal(100),
                Normal(99),
                Missing1,
                Normal(101),
                Normal(98),
                Missing2,
                Normal(102),
            ]
        ),
    }

    macro_rules! test_spatial_diff_2nd_order_decoding {
        ($(($name:ident, $input:expr, $expected:expr),)*) => ($(
            #[test]
            fn $name() {
                let iter = SpatialDiff2ndOrderDecodeIterator::new($input.into_iter(), 100, 99);
                assert_eq!(iter.collect::<Vec<_>>(), $expected);
            }
        )*);
    }

    test_spatial_diff_2nd_order_decoding! {
        (
            spatial_diff_2nd_order_decoding_consisting_of_normal_values,
            alternating(),
            vec![
                Normal(100),
                Normal(99),
                Normal(100),
                Normal(98),
                Normal(100),
                Normal(97),
                Normal(100),
                Normal(96),
                Normal(100),
                Normal(95),
            ]
        ),
        (
            spatial_diff_2nd_order_decoding_with_missing_values_in_first_values,
            vec![
                Missing1,
                Missing2,
                Normal(0),
                Normal(-1),
                Normal(2),
                Normal(-3),
            ],
            vec![
                Missing1,
                Missing2,
                Normal(100),
                Normal(99),
                Normal(100),
                Normal(98),
            ]
        ),
    }
}
