/// Running mean of a stream of values (Welford update).
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
}

impl Accumulator {
    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;
        self.mean += (val - self.mean) / self.n_vals as f64;
    }

    pub fn mean(&self) -> f64 {
        if self.n_vals == 0 {
            return f64::NAN;
        }
        self.mean
    }
}

/// Descriptive statistics of a single column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Summary {
    /// Describe a column. Every field is NaN for an empty column; `std_dev`
    /// is NaN for fewer than two values.
    pub fn describe(vals: &[f64]) -> Self {
        Self {
            mean: compute_mean(vals),
            median: compute_median(vals),
            std_dev: compute_var(vals).sqrt(),
            min: vals.iter().copied().reduce(f64::min).unwrap_or(f64::NAN),
            max: vals.iter().copied().reduce(f64::max).unwrap_or(f64::NAN),
        }
    }
}

pub fn compute_mean(vals: &[f64]) -> f64 {
    if vals.is_empty() {
        return f64::NAN;
    }
    vals.iter().sum::<f64>() / vals.len() as f64
}

/// Sample variance (n - 1 denominator).
pub fn compute_var(vals: &[f64]) -> f64 {
    let n_vals = vals.len();
    if n_vals < 2 {
        return f64::NAN;
    }
    let mean = compute_mean(vals);
    vals.iter().map(|&val| (val - mean).powi(2)).sum::<f64>() / (n_vals - 1) as f64
}

/// Median with linear interpolation between the two middle values.
pub fn compute_median(vals: &[f64]) -> f64 {
    let n_vals = vals.len();
    if n_vals == 0 {
        return f64::NAN;
    }
    let mut sorted = vals.to_vec();
    sorted.sort_by(f64::total_cmp);
    if n_vals % 2 == 1 {
        sorted[n_vals / 2]
    } else {
        (sorted[n_vals / 2 - 1] + sorted[n_vals / 2]) / 2.0
    }
}
