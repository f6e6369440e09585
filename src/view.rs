use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{event::Key, input::TermRead, raw::IntoRawMode};
use torus_life::{pos, Cell, Pos};
use tracing::{debug, error};

use crate::runner::{RunnerCmd, RunnerHandle, Snapshot};

pub use canvas::Canvas;
mod canvas;

/// How cells are drawn. Owned by the viewer, the engine never sees it.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub alive: char,
    pub dead: char,
}

impl Palette {
    pub fn glyph(&self, cell: Cell) -> char {
        match cell {
            Cell::Alive => self.alive,
            Cell::Dead => self.dead,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            alive: '#',
            dead: ' ',
        }
    }
}

pub struct View {
    thread: JoinHandle<()>,
}

impl View {
    pub fn spawn(handle: RunnerHandle, palette: Palette) -> Self {
        let thread = thread::spawn(move || {
            if let Err(err) = view_loop(&handle, palette) {
                error!(%err, "view failed");
            }
            handle.send(RunnerCmd::Stop);
        });
        Self { thread }
    }

    pub fn join(self) {
        if self.thread.join().is_err() {
            error!("view thread panicked");
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Pause,
    Accelerate,
    Decelerate,
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let command = match key {
            Ok(Key::Char('q')) | Ok(Key::Ctrl('c')) | Ok(Key::Esc) => InputCmd::Exit,
            Ok(Key::Up) => InputCmd::Move(Dir::Up),
            Ok(Key::Down) => InputCmd::Move(Dir::Down),
            Ok(Key::Left) => InputCmd::Move(Dir::Left),
            Ok(Key::Right) => InputCmd::Move(Dir::Right),
            Ok(Key::Char(' ')) => InputCmd::Pause,
            Ok(Key::Char('+')) => InputCmd::Accelerate,
            Ok(Key::Char('-')) => InputCmd::Decelerate,
            Ok(_) => continue,
            Err(_) => InputCmd::Exit,
        };

        if sender.send(command).is_err() {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(100);
const SCROLL_STEP: isize = 4;

fn view_loop(handle: &RunnerHandle, palette: Palette) -> io::Result<()> {
    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut out = ScreenGuard::new(stdout().into_raw_mode()?)?;

    let mut view_origin = pos!(0, 0);
    while let Some(snapshot) = handle.snapshot() {
        if !handle_inputs(&receiver, handle, &mut view_origin, snapshot.grid.dimensions()) {
            break;
        }
        let mut canvas = Canvas::from_screen()?;
        paint(&mut canvas, &snapshot, view_origin, palette);
        canvas.display(&status_line(&snapshot), &mut out)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
    Ok(())
}

/// Hides the cursor while alive; clears the screen and shows the cursor
/// again when dropped, whichever way the view loop ends.
struct ScreenGuard<W: Write> {
    out: W,
}

impl<W: Write> ScreenGuard<W> {
    fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{}", termion::cursor::Hide)?;
        Ok(Self { out })
    }
}

impl<W: Write> Write for ScreenGuard<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.out.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl<W: Write> Drop for ScreenGuard<W> {
    fn drop(&mut self) {
        let restore = write!(
            self.out,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            termion::cursor::Show
        )
        .and_then(|()| self.out.flush());
        if let Err(err) = restore {
            error!(%err, "could not restore the terminal");
        }
    }
}

/// returns `false` once the user asked to quit.
fn handle_inputs(
    receiver: &mpsc::Receiver<InputCmd>,
    handle: &RunnerHandle,
    view_origin: &mut Pos,
    dims: (usize, usize),
) -> bool {
    while let Ok(cmd) = receiver.try_recv() {
        debug!(?cmd, "input");
        match cmd {
            InputCmd::Exit => return false,
            InputCmd::Move(direction) => {
                let (d_row, d_col) = match direction {
                    Dir::Up => (-SCROLL_STEP, 0),
                    Dir::Down => (SCROLL_STEP, 0),
                    Dir::Left => (0, -SCROLL_STEP),
                    Dir::Right => (0, SCROLL_STEP),
                };
                *view_origin = view_origin.offset(d_row, d_col, dims);
            }
            InputCmd::Pause => handle.send(RunnerCmd::TogglePause),
            InputCmd::Accelerate => handle.send(RunnerCmd::Accelerate),
            InputCmd::Decelerate => handle.send(RunnerCmd::Decelerate),
        }
    }
    true
}

/// Draws each grid cell at most once, starting from `view_origin` and
/// wrapping around the torus.
fn paint(canvas: &mut Canvas, snapshot: &Snapshot, view_origin: Pos, palette: Palette) {
    let grid = &snapshot.grid;
    let dims = grid.dimensions();
    canvas.layer(|screen| {
        if screen.row >= dims.0 || screen.col >= dims.1 {
            return None;
        }
        let pos = view_origin.offset(screen.row as isize, screen.col as isize, dims);
        grid.cell_at(pos).ok().map(|cell| palette.glyph(cell))
    });
}

fn status_line(snapshot: &Snapshot) -> String {
    let (rows, cols) = snapshot.grid.dimensions();
    let state = if snapshot.paused { "paused" } else { "running" };
    format!(
        "gen {} | pop {} | {}x{} | {}ms | {} | q quit, space pause, +/- speed, arrows scroll",
        snapshot.generation,
        snapshot.grid.population(),
        rows,
        cols,
        snapshot.tick_interval.as_millis(),
        state,
    )
}
