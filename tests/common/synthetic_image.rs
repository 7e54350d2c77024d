/// Layout of a rendered sudoku board: ten evenly spaced dark lines per axis
/// on white paper.
#[derive(Clone, Copy, Debug)]
pub struct BoardLayout {
    pub width: usize,
    pub height: usize,
    pub origin: usize,
    pub spacing: usize,
    /// Stroke width in pixels (odd).
    pub thickness: usize,
}

impl BoardLayout {
    /// Centre positions of the ten boundary lines along either axis.
    pub fn line_positions(&self) -> Vec<usize> {
        (0..10).map(|i| self.origin + i * self.spacing).collect()
    }

    pub fn far_edge(&self) -> usize {
        self.origin + 9 * self.spacing
    }
}

/// Renders the board as a tightly packed RGBA buffer.
pub fn render_board_rgba(layout: &BoardLayout) -> Vec<u8> {
    assert!(layout.width > 0 && layout.height > 0, "image dimensions must be positive");
    assert!(
        layout.far_edge() + layout.thickness < layout.width.min(layout.height),
        "board must fit inside the image"
    );

    let half = layout.thickness / 2;
    let positions = layout.line_positions();
    let on_line = |v: usize| positions.iter().any(|&p| v + half >= p && v <= p + half);
    let span = (layout.origin - half)..=(layout.far_edge() + half);

    let mut img = vec![255u8; layout.width * layout.height * 4];
    for y in 0..layout.height {
        for x in 0..layout.width {
            let ink = (on_line(x) && span.contains(&y)) || (on_line(y) && span.contains(&x));
            if ink {
                let i = (y * layout.width + x) * 4;
                img[i..i + 3].copy_from_slice(&[20, 24, 28]);
            }
        }
    }
    img
}

/// Blank white RGBA frame.
pub fn blank_rgba(width: usize, height: usize) -> Vec<u8> {
    vec![255u8; width * height * 4]
}
