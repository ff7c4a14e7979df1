//! Stride ranking used to break ties in the loop-order planner.

/// Rank each stride by magnitude among the non-zero strides.
///
/// `result[i]` is one plus the number of non-zero strides whose magnitude is
/// strictly smaller than `|strides[i]|`. Equal magnitudes share a rank, and
/// zero strides (broadcast dimensions) rank first.
pub fn index_order(strides: &[isize]) -> Vec<usize> {
    strides
        .iter()
        .map(|&si| {
            let si = si.unsigned_abs();
            if si == 0 {
                return 1;
            }
            1 + strides
                .iter()
                .filter(|&&s| s != 0 && s.unsigned_abs() < si)
                .count()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_order() {
        // 4 is largest, 1 is smallest, 2 is in between
        assert_eq!(index_order(&[4, 1, 2]), vec![3, 1, 2]);
    }

    #[test]
    fn test_index_order_with_zero() {
        assert_eq!(index_order(&[4, 0, 2]), vec![2, 1, 1]);
    }

    #[test]
    fn test_index_order_negative_strides() {
        assert_eq!(index_order(&[-4, 1, -2]), vec![3, 1, 2]);
    }

    #[test]
    fn test_index_order_tied_strides() {
        assert_eq!(index_order(&[2, 2, 1]), vec![2, 2, 1]);
        assert_eq!(index_order(&[3, 3, 3]), vec![1, 1, 1]);
    }

    #[test]
    fn test_index_order_empty() {
        assert!(index_order(&[]).is_empty());
    }
}
