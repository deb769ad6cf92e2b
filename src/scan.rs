//! Scanline Spans

/// Horizontal run of pixels with coverage values
#[derive(Debug,Default,Clone,PartialEq)]
pub struct Span {
    /// Starting x position
    pub x: i64,
    /// Number of pixels
    pub len: i64,
    /// Coverage for each pixel, `len` values
    pub covers: Vec<u64>,
}

/// Unpacked Scanline, one y-row of spans
#[derive(Debug,Default)]
pub struct ScanlineU8 {
    last_x: i64,
    min_x: i64,
    /// Spans in the current row, ordered by x
    pub spans: Vec<Span>,
    /// Current row
    pub y: i64,
}

const LAST_X: i64 = 0x7FFF_FFF0;

impl ScanlineU8 {
    /// Create a new, empty Scanline
    pub fn new() -> Self {
        Self { last_x: LAST_X, min_x: 0, y: 0, spans: vec![] }
    }
    /// Remove spans, keeping the minimum x
    pub fn reset_spans(&mut self) {
        self.last_x = LAST_X;
        self.spans.clear();
    }
    /// Reset the Scanline for a new x range
    pub fn reset(&mut self, min_x: i64, _max_x: i64) {
        self.last_x = LAST_X;
        self.min_x = min_x;
        self.spans.clear();
    }
    /// Set the row for the current spans
    pub fn finalize(&mut self, y: i64) {
        self.y = y;
    }
    /// Number of Spans
    pub fn num_spans(&self) -> usize {
        self.spans.len()
    }
    /// Add `len` pixels starting at `x` with a single coverage
    pub fn add_span(&mut self, x: i64, len: i64, cover: u64) {
        let x = x - self.min_x;
        match self.spans.last_mut() {
            Some(cur) if x == self.last_x + 1 => {
                cur.len += len;
                cur.covers.extend(std::iter::repeat(cover).take(len as usize));
            },
            _ => {
                self.spans.push(Span { x: x + self.min_x, len,
                                       covers: vec![cover; len as usize] });
            }
        }
        self.last_x = x + len - 1;
    }
    /// Add a single pixel at `x`
    pub fn add_cell(&mut self, x: i64, cover: u64) {
        self.add_span(x, 1, cover);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn adjacent_spans_merge() {
        let mut sl = ScanlineU8::new();
        sl.reset(0, 10);
        sl.add_cell(2, 100);
        sl.add_span(3, 4, 255);
        sl.add_cell(9, 50);
        assert_eq!(sl.num_spans(), 2);
        assert_eq!(sl.spans[0], Span { x: 2, len: 5, covers: vec![100,255,255,255,255] });
        assert_eq!(sl.spans[1].x, 9);
        sl.reset_spans();
        assert_eq!(sl.num_spans(), 0);
    }
}
