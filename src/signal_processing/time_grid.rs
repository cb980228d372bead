/// Uniform sample instants `t_i = i / fs` for `i` in `0..len`.
///
/// The length is `floor(duration * fs)`; a fractional product is truncated
/// toward zero, so the grid may end slightly short of the requested duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    sample_rate: u32,
    len: usize,
}

impl TimeGrid {
    pub fn new(duration: f64, sample_rate: u32) -> Self {
        let len = (duration * sample_rate as f64).floor() as usize;
        Self { sample_rate, len }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Time in seconds of sample `index`
    pub fn instant(&self, index: usize) -> f64 {
        index as f64 / self.sample_rate as f64
    }

    /// Covered duration in seconds (`len / fs`)
    pub fn duration(&self) -> f64 {
        self.len as f64 / self.sample_rate as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len).map(|i| self.instant(i))
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
