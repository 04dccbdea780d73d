//! Depth-buffered character grid for terminal rendering
use crossterm::{cursor, style::Print, QueueableCommand};
use cubespin_core::{Camera, Solid, Transform};
use nalgebra::Point3;
use std::io::Write;

pub const DEFAULT_WIDTH: usize = 160;
pub const DEFAULT_HEIGHT: usize = 44;
pub const DEFAULT_BACKGROUND: char = ' ';

/// Written before every row except the first. The terminal is in raw mode,
/// so a bare `\n` would not return the cursor to column zero.
pub const LINE_BREAK: &str = "\r\n";

/// Inverse depth of a cell nothing has been drawn into
const EMPTY_DEPTH: f64 = 0.0;

/// Grid of characters plus the inverse depth of whatever drew each one
pub struct ScreenBuffer {
    width: usize,
    height: usize,
    background: char,
    char_buffer: Vec<char>,
    depth_buffer: Vec<f64>,
}

impl ScreenBuffer {
    pub fn new(width: usize, height: usize, background: char) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            background,
            char_buffer: vec![background; size],
            depth_buffer: vec![EMPTY_DEPTH; size],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.char_buffer.fill(self.background);
        self.depth_buffer.fill(EMPTY_DEPTH);
    }

    /// Character and inverse depth stored at `(x, y)`
    pub fn cell(&self, x: usize, y: usize) -> Option<(char, f64)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y * self.width + x;
        Some((self.char_buffer[idx], self.depth_buffer[idx]))
    }

    /// Depth-tested write. Nearer (larger `inv_depth`) wins; ties keep the
    /// existing cell.
    ///
    /// Only the linear index `x + y * width` is bounds-checked, so an `x`
    /// past the right edge spills into the next row the same way the grid is
    /// laid out in memory. Returns `false` when the index is off the grid and
    /// the sample was dropped.
    pub fn plot(&mut self, x: i64, y: i64, ch: char, inv_depth: f64) -> bool {
        let Some(idx) = self.linear_index(x, y) else {
            return false;
        };
        if inv_depth > self.depth_buffer[idx] {
            self.depth_buffer[idx] = inv_depth;
            self.char_buffer[idx] = ch;
        }
        true
    }

    fn linear_index(&self, x: i64, y: i64) -> Option<usize> {
        let width = i64::try_from(self.width).ok()?;
        let idx = y.checked_mul(width)?.checked_add(x)?;
        let idx = usize::try_from(idx).ok()?;
        (idx < self.char_buffer.len()).then_some(idx)
    }

    /// Sample, project and plot every surface point of `solid`.
    ///
    /// Returns how many samples fell outside the grid.
    pub fn render_solid(
        &mut self,
        solid: &Solid,
        transform: &Transform,
        camera: &Camera,
        stride: f64,
    ) -> usize {
        let offset = solid.offset();
        let mut dropped = 0;

        for sample in solid.samples(stride) {
            let projected: Point3<f64> = camera.project(&sample.point, transform);
            let screen = camera.to_screen(&projected, offset, self.width, self.height);
            if !self.plot(screen.x, screen.y, sample.ch, screen.inv_depth) {
                dropped += 1;
            }
        }

        dropped
    }

    /// Write the grid row by row, starting from the home position
    pub fn flush<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        let mut frame = String::with_capacity(self.char_buffer.len() + self.height * LINE_BREAK.len());
        for (row, cells) in self.char_buffer.chunks(self.width.max(1)).enumerate() {
            if row > 0 {
                frame.push_str(LINE_BREAK);
            }
            frame.extend(cells.iter());
        }

        writer.queue(cursor::MoveTo(0, 0))?;
        writer.queue(Print(frame))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOME: &str = "\x1b[1;1H";

    fn drawn(buffer: &ScreenBuffer) -> String {
        let mut out: Vec<u8> = Vec::new();
        buffer.flush(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_new_buffer_is_clear() {
        let buffer = ScreenBuffer::new(4, 3, '.');
        for y in 0..3 {
            for x in 0..4 {
                assert_eq!(buffer.cell(x, y), Some(('.', 0.0)));
            }
        }
        assert_eq!(buffer.cell(4, 0), None);
        assert_eq!(buffer.cell(0, 3), None);
    }

    #[test]
    fn test_clear_resets_every_cell() {
        let mut buffer = ScreenBuffer::new(5, 2, ' ');
        buffer.plot(1, 1, '#', 0.5);
        buffer.plot(4, 0, '@', 0.1);
        buffer.clear();
        for y in 0..2 {
            for x in 0..5 {
                assert_eq!(buffer.cell(x, y), Some((' ', 0.0)));
            }
        }
    }

    #[test]
    fn test_plot_keeps_maximum_inverse_depth() {
        let mut buffer = ScreenBuffer::new(3, 3, ' ');
        let writes = [('a', 0.2), ('b', 0.7), ('c', 0.4), ('d', 0.7), ('e', 0.01)];
        for (ch, depth) in writes {
            buffer.plot(1, 2, ch, depth);
        }
        assert_eq!(buffer.cell(1, 2), Some(('b', 0.7)));
        // Untouched neighbours keep the sentinel
        assert_eq!(buffer.cell(0, 2), Some((' ', 0.0)));
    }

    #[test]
    fn test_plot_ignores_non_positive_depth() {
        let mut buffer = ScreenBuffer::new(2, 2, ' ');
        assert!(buffer.plot(0, 0, '#', 0.0));
        assert!(buffer.plot(1, 0, '#', -0.3));
        assert_eq!(buffer.cell(0, 0), Some((' ', 0.0)));
        assert_eq!(buffer.cell(1, 0), Some((' ', 0.0)));
    }

    #[test]
    fn test_out_of_bounds_plot_is_dropped() {
        let mut buffer = ScreenBuffer::new(4, 3, ' ');
        let before = drawn(&buffer);

        assert!(!buffer.plot(-1, 0, '#', 1.0));
        assert!(!buffer.plot(0, 3, '#', 1.0));
        assert!(!buffer.plot(0, -1, '#', 1.0));
        assert!(!buffer.plot(i64::MAX, i64::MAX, '#', 1.0));
        assert!(!buffer.plot(i64::MIN, 0, '#', 1.0));

        assert_eq!(drawn(&buffer), before);
    }

    #[test]
    fn test_overflowing_x_wraps_into_next_row() {
        let mut buffer = ScreenBuffer::new(4, 3, ' ');
        assert!(buffer.plot(5, 0, '#', 1.0));
        assert_eq!(buffer.cell(1, 1), Some(('#', 1.0)));
        // Negative x still lands when the linear index is on the grid
        assert!(buffer.plot(-1, 2, '@', 1.0));
        assert_eq!(buffer.cell(3, 1), Some(('@', 1.0)));
    }

    #[test]
    fn test_flush_after_clear() {
        let (width, height) = (7, 4);
        let mut buffer = ScreenBuffer::new(width, height, ' ');
        buffer.plot(3, 1, '#', 0.5);
        buffer.clear();

        let out = drawn(&buffer);
        let body = out.strip_prefix(HOME).expect("frame starts at the home position");
        assert_eq!(body.matches(LINE_BREAK).count(), height - 1);
        assert!(!body.starts_with(LINE_BREAK));

        let rows: Vec<&str> = body.split(LINE_BREAK).collect();
        assert_eq!(rows.len(), height);
        assert!(rows.iter().all(|row| *row == " ".repeat(width)));
    }

    #[test]
    fn test_flush_is_row_major() {
        let mut buffer = ScreenBuffer::new(3, 2, '.');
        buffer.plot(0, 0, 'a', 1.0);
        buffer.plot(2, 1, 'b', 1.0);
        assert_eq!(drawn(&buffer), format!("{HOME}a..{LINE_BREAK}..b"));
    }

    #[test]
    fn test_render_front_face_at_rest() {
        let camera = Camera::default();
        let solid = Solid::cube(36.0, 0.0, ['F', 'R', 'L', 'B', 'D', 'U']);
        let mut buffer = ScreenBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, ' ');
        buffer.render_solid(&solid, &Transform::zero(), &camera, 0.6);

        // The centre of the front face sits straight ahead of the camera, at
        // z' = distance - size; nothing else on the cube is nearer.
        let centre = buffer.cell(DEFAULT_WIDTH / 2, DEFAULT_HEIGHT / 2).unwrap();
        assert_eq!(centre, ('F', 1.0 / 64.0));
    }

    #[test]
    fn test_render_counts_dropped_samples() {
        let camera = Camera::default();
        let solid = Solid::cube(20.0, 0.0, ['#'; 6]);

        let mut roomy = ScreenBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, ' ');
        assert_eq!(roomy.render_solid(&solid, &Transform::zero(), &camera, 0.6), 0);

        let mut tiny = ScreenBuffer::new(2, 2, ' ');
        let total = solid.samples(0.6).count();
        let dropped = tiny.render_solid(&solid, &Transform::zero(), &camera, 0.6);
        assert!(dropped > 0 && dropped < total);
    }

    #[test]
    fn test_nearer_solid_wins_regardless_of_order() {
        let camera = Camera::default();
        let transform = Transform::new(0.4, 0.9, 0.1);
        let big = Solid::cube(20.0, 0.0, ['B'; 6]);
        let small = Solid::cube(5.0, 0.0, ['s'; 6]);

        let render = |first: &Solid, second: &Solid| {
            let mut buffer = ScreenBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, ' ');
            buffer.render_solid(first, &transform, &camera, 0.6);
            buffer.render_solid(second, &transform, &camera, 0.6);
            drawn(&buffer)
        };

        assert_eq!(render(&big, &small), render(&small, &big));
    }

    #[test]
    fn test_enclosed_solid_is_hidden() {
        let camera = Camera::default();
        let big = Solid::cube(20.0, 0.0, ['B'; 6]);
        let small = Solid::cube(5.0, 0.0, ['s'; 6]);

        // At rest the big front face covers every cell the small cube reaches
        let mut buffer = ScreenBuffer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, ' ');
        buffer.render_solid(&small, &Transform::zero(), &camera, 0.6);
        buffer.render_solid(&big, &Transform::zero(), &camera, 0.6);

        assert!(!drawn(&buffer).contains('s'));
        assert_eq!(buffer.cell(DEFAULT_WIDTH / 2, DEFAULT_HEIGHT / 2).map(|c| c.0), Some('B'));
    }
}
