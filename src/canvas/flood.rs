//! Scanline seed fill over a row-major cell buffer.
//!
//! Work is kept on an explicit stack of scan segments instead of the call
//! stack, so the depth needed is independent of the region's size. A segment
//! records a run `[x_left, x_right]` on row `y` together with the direction
//! `dy` of the row that still has to be explored from it.

/// A horizontal run on `y` whose neighbour row `y + dy` is pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Segment {
    x_left: isize,
    x_right: isize,
    y: isize,
    dy: isize,
}

struct ScanlineFill<'a> {
    cells: &'a mut [u8],
    width: isize,
    height: isize,
    target: u8,
    fill: u8,
    stack: Vec<Segment>,
}

impl ScanlineFill<'_> {
    fn matches(&self, x: isize, y: isize) -> bool {
        self.cells[(y * self.width + x) as usize] == self.target
    }

    fn paint(&mut self, x: isize, y: isize) {
        self.cells[(y * self.width + x) as usize] = self.fill;
    }

    /// Schedule exploration of row `y + dy`; rows outside the grid are dropped.
    fn push(&mut self, x_left: isize, x_right: isize, y: isize, dy: isize) {
        let next = y + dy;
        if next >= 0 && next < self.height {
            self.stack.push(Segment { x_left, x_right, y, dy });
        }
    }

    fn run(&mut self, x: isize, y: isize) {
        self.push(x, x, y, 1);
        self.push(x, x, y + 1, -1);

        while let Some(Segment { x_left: x1, x_right: x2, y, dy }) = self.stack.pop() {
            let y = y + dy;

            let mut x = x1;
            while x >= 0 && self.matches(x, y) {
                self.paint(x, y);
                x -= 1;
            }

            // When nothing matched at x1 we go straight to looking for the
            // next run inside the parent window.
            let mut in_run = x < x1;
            let mut left = x + 1;
            if in_run {
                if left < x1 {
                    self.push(left, x1 - 1, y, -dy);
                }
                x = x1 + 1;
            }

            loop {
                if in_run {
                    while x < self.width && self.matches(x, y) {
                        self.paint(x, y);
                        x += 1;
                    }
                    self.push(left, x - 1, y, dy);
                    if x > x2 + 1 {
                        self.push(x2 + 1, x - 1, y, -dy);
                    }
                }

                x += 1;
                while x <= x2 && !self.matches(x, y) {
                    x += 1;
                }
                if x > x2 {
                    break;
                }
                left = x;
                in_run = true;
            }
        }
    }
}

/// Recolor the 4-connected region of `cells[origin]`'s color that contains
/// `(x, y)` with `fill`. The caller guarantees `x < width`, `y < height` and
/// `cells.len() == width * height`.
pub(super) fn scanline_fill(
    cells: &mut [u8],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    fill: u8,
) {
    let target = cells[y * width + x];
    if target == fill {
        return;
    }

    let mut filler = ScanlineFill {
        cells,
        width: width as isize,
        height: height as isize,
        target,
        fill,
        stack: Vec::new(),
    };
    filler.run(x as isize, y as isize);
}
