use std::io::{self, Write};

use torus_life::{pos, Pos};

/// A character buffer covering the terminal, painted in layers.
pub struct Canvas {
    lines: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Canvas {
    /// keeps the last terminal line free for the status bar.
    pub fn from_screen() -> io::Result<Self> {
        let (width, height) = termion::terminal_size()?;
        Ok(Self::new(width as usize, height.saturating_sub(1) as usize))
    }

    pub fn new(width: usize, height: usize) -> Self {
        let lines = vec![vec![' '; width]; height];
        Self {
            height,
            lines,
            width,
        }
    }

    /// `f` gets the screen position as (line, column).
    pub fn layer(&mut self, f: impl Fn(Pos) -> Option<char>) {
        for (y, line) in self.lines.iter_mut().enumerate() {
            for (x, slot) in line.iter_mut().enumerate() {
                if let Some(char) = f(pos!(y, x)) {
                    *slot = char;
                }
            }
        }
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn display(&self, status: &str, out: &mut impl Write) -> io::Result<()> {
        let clear = termion::clear::All;
        write!(out, "{clear}")?;
        for (index, line) in self.render().lines().enumerate() {
            let goto = termion::cursor::Goto(1, index as u16 + 1);
            write!(out, "{goto}{line}")?;
        }
        let goto = termion::cursor::Goto(1, self.height as u16 + 1);
        let status: String = status.chars().take(self.width).collect();
        write!(out, "{goto}{status}")?;
        out.flush()
    }
}

#[test]
fn test_layers() {
    let mut canvas = Canvas::new(4, 2);
    canvas.layer(|pos| (pos.col % 2 == 0).then_some('#'));
    canvas.layer(|pos| (pos == pos!(1, 3)).then_some('@'));
    assert_eq!(canvas.render(), "# # \n# #@");
}
