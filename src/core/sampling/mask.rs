use ndarray::Array2;

/// A pixel carries a usable depth when it is strictly positive and not the
/// declared no-data value. The no-data comparison is exact.
#[inline]
pub fn is_valid_depth(value: f64, nodata: Option<f64>) -> bool {
    value > 0.0 && nodata.is_none_or(|nd| value != nd)
}

/// Grid positions (row, col) of every valid pixel, in row-major order
pub fn valid_positions(values: &Array2<f64>, nodata: Option<f64>) -> Vec<(usize, usize)> {
    values
        .indexed_iter()
        .filter_map(|(pos, &v)| is_valid_depth(v, nodata).then_some(pos))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn validity_predicate() {
        let nodata = Some(7.5);
        assert!(!is_valid_depth(7.5, nodata));
        assert!(!is_valid_depth(0.0, nodata));
        assert!(!is_valid_depth(-5.0, nodata));
        assert!(is_valid_depth(0.01, nodata));
        assert!(!is_valid_depth(f64::NAN, None));
        assert!(is_valid_depth(7.5, None));
    }

    #[test]
    fn positions_are_row_major() {
        let grid = array![[0.0, 1.0, -9999.0], [2.0, -1.0, 3.0]];
        assert_eq!(
            valid_positions(&grid, Some(-9999.0)),
            vec![(0, 1), (1, 0), (1, 2)]
        );
    }

    #[test]
    fn sentinel_equal_to_a_positive_depth_is_excluded() {
        let grid = array![[4.0, 4.0], [4.5, 0.0]];
        assert_eq!(valid_positions(&grid, Some(4.0)), vec![(1, 0)]);
    }
}
