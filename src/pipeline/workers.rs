use crossbeam_channel::{Receiver, Sender};
use std::thread::{self, JoinHandle};

use crate::engine::unit::DigestUnit;

use super::context::ResultLine;

/// Single hashing worker: take a unit, compute it, hand its line to the writer.
/// Exits when the unit channel is closed and drained, or when the writer has gone away.
fn hash_worker_loop(unit_rx: Receiver<DigestUnit>, line_tx: Sender<ResultLine>) {
    while let Ok(mut unit) = unit_rx.recv() {
        unit.compute();
        if line_tx.send(ResultLine::from(&unit)).is_err() {
            break;
        }
    }
}

/// Spawn `num_threads` hashing workers sharing `unit_rx`. Caller keeps its own `line_tx` and must
/// drop it after joining the workers so the writer sees the channel close.
pub fn spawn_hash_workers(
    unit_rx: Receiver<DigestUnit>,
    line_tx: &Sender<ResultLine>,
    num_threads: usize,
) -> Vec<JoinHandle<()>> {
    (0..num_threads)
        .map(|i| {
            let unit_rx = unit_rx.clone();
            let line_tx = line_tx.clone();
            thread::Builder::new()
                .name(format!("hash-{i}"))
                .spawn(move || hash_worker_loop(unit_rx, line_tx))
        })
        .filter_map(|r| r.map_err(|e| log::warn!("failed to spawn hash worker: {}", e)).ok())
        .collect()
}
