//! Summary statistics over a series' float projection

use std::collections::HashMap;

use ndarray::Array1;

use super::*;
use crate::error::ColFrameError;

/// Statistical summary of a series
#[derive(Debug, Clone)]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl SeriesStats {
    fn empty() -> Self {
        Self {
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            q25: f64::NAN,
            q50: f64::NAN,
            q75: f64::NAN,
            max: f64::NAN,
        }
    }
}

impl<E: Element> Series<E> {
    fn sorted_f64(&self) -> Result<Vec<f64>> {
        let mut data = self.float64()?.into_vec();
        data.sort_by(f64::total_cmp);
        Ok(data)
    }

    /// Sum of the float projection; `0.0` for an empty series
    pub fn sum(&self) -> Result<f64> {
        Ok(self.float64()?.iter().sum())
    }

    /// Arithmetic mean; NaN for an empty series
    pub fn mean(&self) -> Result<f64> {
        if self.is_empty() {
            return Ok(f64::NAN);
        }
        Ok(self.sum()? / self.len() as f64)
    }

    /// Sample standard deviation with `ddof` degrees of freedom removed
    pub fn std(&self, ddof: usize) -> Result<f64> {
        let arr = Array1::from(self.float64()?.into_vec());
        if arr.len() <= ddof {
            return Ok(f64::NAN);
        }
        Ok(arr.std(ddof as f64))
    }

    /// Middle value, or the mean of the two middle values for an even length
    pub fn median(&self) -> Result<f64> {
        let data = self.sorted_f64()?;
        let n = data.len();
        Ok(match n {
            0 => f64::NAN,
            _ if n % 2 == 1 => data[n / 2],
            _ => (data[n / 2 - 1] + data[n / 2]) * 0.5,
        })
    }

    /// Empirical quantile: the smallest value whose cumulative count reaches
    /// `p * len`. No interpolation is done.
    ///
    /// ```
    /// # use cf_core::data::Series;
    /// let s = Series::new("x", vec![4i64, 1, 3, 2]);
    /// assert_eq!(s.quantile(0.5).unwrap(), 2.0);
    /// assert_eq!(s.quantile(0.51).unwrap(), 3.0);
    /// assert!(s.quantile(1.5).is_err());
    /// ```
    pub fn quantile(&self, p: f64) -> crate::error::Result<f64> {
        if !(0.0..=1.0).contains(&p) {
            return Err(ColFrameError::Stats(format!(
                "quantile probability {} outside [0, 1]",
                p
            )));
        }
        let data = self.sorted_f64()?;
        Ok(empirical_quantile(&data, p))
    }

    /// Most frequent elements, in order of first appearance
    pub fn mode(&self) -> Vec<E> {
        let mut counts: HashMap<ValueKey, (usize, usize)> = HashMap::with_capacity(self.len());
        for (i, e) in self.iter().enumerate() {
            counts.entry(e.to_value().key()).or_insert((i, 0)).1 += 1;
        }

        let Some(max) = counts.values().map(|(_, count)| *count).max() else {
            return Vec::new();
        };

        let mut firsts: Vec<usize> = counts
            .into_values()
            .filter(|(_, count)| *count == max)
            .map(|(first, _)| first)
            .collect();
        firsts.sort_unstable();
        firsts.into_iter().map(|i| self.as_slice()[i].clone()).collect()
    }

    /// Compute basic statistics for the float projection
    pub fn describe(&self) -> Result<SeriesStats> {
        let data = self.sorted_f64()?;
        let (Some(&min), Some(&max)) = (data.first(), data.last()) else {
            return Ok(SeriesStats::empty());
        };

        let q25 = empirical_quantile(&data, 0.25);
        let q50 = empirical_quantile(&data, 0.5);
        let q75 = empirical_quantile(&data, 0.75);
        let arr = Array1::from(data);
        let std = if arr.len() > 1 { arr.std(1.0) } else { f64::NAN };

        Ok(SeriesStats {
            count: arr.len(),
            mean: arr.mean().unwrap_or(f64::NAN),
            std,
            min,
            q25,
            q50,
            q75,
            max,
        })
    }
}

// `sorted` must be ascending; empty input yields NaN.
fn empirical_quantile(sorted: &[f64], p: f64) -> f64 {
    let target = p * sorted.len() as f64;
    sorted
        .iter()
        .enumerate()
        .find(|(i, _)| (i + 1) as f64 >= target)
        .map_or(f64::NAN, |(_, v)| *v)
}
