//! Per-dimension min-max normalization
//!
//! Values are mapped to `(x - min) / (max - min)` using bounds fitted on a
//! set of vectors. A dimension whose fitted range is zero passes values
//! through unchanged, so a scaler fitted on a single vector is the identity.

use nutrisim_core::{Error, Result, Vector};

#[derive(Debug, Clone, PartialEq)]
pub struct MinMaxScaler {
    min: Vec<f32>,
    max: Vec<f32>,
}

impl MinMaxScaler {
    /// Fit per-dimension bounds over `vectors`
    pub fn fit<'a, I>(vectors: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a Vector>,
    {
        let mut iter = vectors.into_iter();
        let first = iter.next().ok_or(Error::EmptyFit)?;
        let mut min = first.as_slice().to_vec();
        let mut max = min.clone();

        for vector in iter {
            if vector.dim() != min.len() {
                return Err(Error::DimensionMismatch {
                    expected: min.len(),
                    actual: vector.dim(),
                });
            }
            for (i, &x) in vector.as_slice().iter().enumerate() {
                min[i] = min[i].min(x);
                max[i] = max[i].max(x);
            }
        }

        Ok(Self { min, max })
    }

    pub fn dim(&self) -> usize {
        self.min.len()
    }

    /// True when every dimension has zero range
    pub fn is_identity(&self) -> bool {
        self.min.iter().zip(&self.max).all(|(lo, hi)| hi - lo == 0.0)
    }

    pub fn transform(&self, vector: &Vector) -> Result<Vector> {
        if vector.dim() != self.dim() {
            return Err(Error::DimensionMismatch {
                expected: self.dim(),
                actual: vector.dim(),
            });
        }

        let data = vector
            .as_slice()
            .iter()
            .zip(self.min.iter().zip(&self.max))
            .map(|(&x, (&lo, &hi))| {
                let range = hi - lo;
                if range == 0.0 {
                    x
                } else {
                    (x - lo) / range
                }
            })
            .collect();

        Ok(Vector::new(data))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_vector_fit_is_identity() {
        let apple = Vector::new(vec![52.0, 0.2, 0.0, 0.0, 1.0, 14.0, 2.4, 10.0, 0.3]);
        let pear = Vector::new(vec![57.0, 0.1, 0.0, 0.0, 1.0, 15.0, 3.1, 10.0, 0.4]);

        let scaler = MinMaxScaler::fit([&apple]).unwrap();
        assert!(scaler.is_identity());
        assert_eq!(scaler.transform(&apple).unwrap(), apple);
        assert_eq!(scaler.transform(&pear).unwrap(), pear);
    }

    #[test]
    fn test_min_max_bounds() {
        let a = Vector::new(vec![0.0, 10.0]);
        let b = Vector::new(vec![10.0, 30.0]);
        let scaler = MinMaxScaler::fit([&a, &b]).unwrap();
        assert!(!scaler.is_identity());

        assert_eq!(scaler.transform(&a).unwrap().as_slice(), &[0.0, 0.0]);
        assert_eq!(scaler.transform(&b).unwrap().as_slice(), &[1.0, 1.0]);
        assert_eq!(
            scaler.transform(&Vector::new(vec![5.0, 20.0])).unwrap().as_slice(),
            &[0.5, 0.5]
        );
        // values outside the fitted range are not clipped
        assert_eq!(
            scaler.transform(&Vector::new(vec![20.0, 0.0])).unwrap().as_slice(),
            &[2.0, -0.5]
        );
    }

    #[test]
    fn test_zero_range_dimension_passes_through() {
        let a = Vector::new(vec![0.0, 7.0]);
        let b = Vector::new(vec![4.0, 7.0]);
        let scaler = MinMaxScaler::fit([&a, &b]).unwrap();
        let scaled = scaler.transform(&Vector::new(vec![2.0, 3.0])).unwrap();
        assert_eq!(scaled.as_slice(), &[0.5, 3.0]);
    }

    #[test]
    fn test_empty_fit_fails() {
        let empty: Vec<Vector> = Vec::new();
        assert!(matches!(MinMaxScaler::fit(&empty), Err(Error::EmptyFit)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = Vector::new(vec![1.0, 2.0]);
        let b = Vector::new(vec![1.0, 2.0, 3.0]);
        assert!(matches!(
            MinMaxScaler::fit([&a, &b]),
            Err(Error::DimensionMismatch { expected: 2, actual: 3 })
        ));

        let scaler = MinMaxScaler::fit([&a]).unwrap();
        assert!(matches!(
            scaler.transform(&b),
            Err(Error::DimensionMismatch { expected: 2, actual: 3 })
        ));
    }
}
