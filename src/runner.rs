use std::{
    sync::mpsc,
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use torus_life::{Grid, Simulation};
use tracing::{debug, info};

/// What the view needs to draw one frame.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub grid: Grid,
    pub generation: u64,
    pub paused: bool,
    pub tick_interval: Duration,
}

pub enum RunnerCmd {
    Snapshot(mpsc::Sender<Snapshot>),
    TogglePause,
    Accelerate,
    Decelerate,
    Stop,
}

#[derive(Clone)]
pub struct RunnerHandle {
    sender: mpsc::Sender<RunnerCmd>,
}

impl RunnerHandle {
    /// `None` once the runner has stopped.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(RunnerCmd::Snapshot(sender)).ok()?;
        receiver.recv().ok()
    }

    pub fn send(&self, cmd: RunnerCmd) {
        // a stopped runner has nothing left to control
        let _ = self.sender.send(cmd);
    }
}

#[derive(Debug)]
pub struct Runner {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<RunnerCmd>,
}

impl Runner {
    pub fn spawn(simulation: Simulation, tick_interval: Duration) -> Self {
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || run_loop(receiver, simulation, tick_interval));
        Self { thread, sender }
    }

    pub fn handle(&self) -> RunnerHandle {
        let sender = self.sender.clone();
        RunnerHandle { sender }
    }

    pub fn join(self) {
        if self.thread.join().is_err() {
            tracing::error!("simulation thread panicked");
        }
    }
}

const CMD_CHECK_TIMEOUT: Duration = Duration::from_millis(10);
const MIN_TICK_INTERVAL: Duration = Duration::from_millis(10);
const MAX_TICK_INTERVAL: Duration = Duration::from_secs(5);

fn run_loop(
    receiver: mpsc::Receiver<RunnerCmd>,
    mut simulation: Simulation,
    mut tick_interval: Duration,
) {
    let mut paused = false;
    let mut elapsed = Duration::ZERO;
    let mut last_frame = Instant::now();

    loop {
        match receiver.recv_timeout(CMD_CHECK_TIMEOUT) {
            Ok(RunnerCmd::Snapshot(sender)) => {
                let snapshot = Snapshot {
                    grid: simulation.grid().clone(),
                    generation: simulation.generation(),
                    paused,
                    tick_interval,
                };
                let _ = sender.send(snapshot);
            }
            Ok(RunnerCmd::TogglePause) => {
                paused = !paused;
                debug!(paused, "toggled pause");
            }
            Ok(RunnerCmd::Accelerate) => {
                tick_interval = (tick_interval / 2).max(MIN_TICK_INTERVAL);
                debug!(?tick_interval, "accelerated");
            }
            Ok(RunnerCmd::Decelerate) => {
                tick_interval = (tick_interval * 2).min(MAX_TICK_INTERVAL);
                debug!(?tick_interval, "decelerated");
            }
            Ok(RunnerCmd::Stop) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => (),
        }

        let now = Instant::now();
        if !paused {
            elapsed += now - last_frame;
        }
        last_frame = now;

        if !paused && elapsed > tick_interval {
            simulation.step();
            elapsed = Duration::ZERO;
        }
    }

    info!(
        generation = simulation.generation(),
        population = simulation.population(),
        "simulation stopped"
    );
}
