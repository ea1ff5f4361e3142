//! Fixed multi-channel delay used to align output with a model's lookahead.
//!
//! The line is sized once in [`LatencyLine::configure`]; afterwards
//! [`exchange`](LatencyLine::exchange) and [`advance`](LatencyLine::advance)
//! never allocate.

/// Per-channel ring buffers sharing one write head.
#[derive(Debug, Clone, Default)]
pub struct LatencyLine {
    buf: Vec<f32>,
    num_channels: usize,
    delay: usize,
    pos: usize,
}

impl LatencyLine {
    /// Creates an empty, zero-delay line.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes for `num_channels` channels delayed by `delay` frames and
    /// clears the contents.
    pub fn configure(&mut self, num_channels: usize, delay: usize) {
        self.num_channels = num_channels;
        self.delay = delay;
        self.pos = 0;
        self.buf.clear();
        self.buf.resize(num_channels * delay, 0.0);
    }

    /// Delay in frames.
    pub fn delay(&self) -> usize {
        self.delay
    }

    /// Stores `input` for `channel` and returns the sample written `delay`
    /// frames ago. Call once per channel, then [`advance`](Self::advance).
    #[inline]
    pub fn exchange(&mut self, channel: usize, input: f32) -> f32 {
        if self.delay == 0 {
            return input;
        }
        let slot = &mut self.buf[channel * self.delay + self.pos];
        core::mem::replace(slot, input)
    }

    /// Moves the write head to the next frame.
    #[inline]
    pub fn advance(&mut self) {
        if self.delay != 0 {
            self.pos = (self.pos + 1) % self.delay;
        }
    }

    /// Fills the line with silence.
    pub fn clear(&mut self) {
        self.buf.fill(0.0);
        self.pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delay_passes_through() {
        let mut line = LatencyLine::new();
        line.configure(2, 0);
        assert_eq!(line.exchange(1, 0.5), 0.5);
        line.advance();
    }

    #[test]
    fn impulse_reappears_after_delay() {
        let mut line = LatencyLine::new();
        line.configure(2, 3);
        let mut out = Vec::new();
        for n in 0..6 {
            let x = if n == 0 { 1.0 } else { 0.0 };
            out.push((line.exchange(0, x), line.exchange(1, -x)));
            line.advance();
        }
        assert_eq!(out[3], (1.0, -1.0));
        assert!(out.iter().enumerate().all(|(i, s)| i == 3 || *s == (0.0, 0.0)));
    }

    #[test]
    fn clear_drops_history() {
        let mut line = LatencyLine::new();
        line.configure(1, 2);
        line.exchange(0, 1.0);
        line.advance();
        line.clear();
        for _ in 0..3 {
            assert_eq!(line.exchange(0, 0.0), 0.0);
            line.advance();
        }
    }
}
