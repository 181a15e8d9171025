use crossbeam_channel::{Receiver, Sender, bounded, unbounded};
use fastsize_core::Detection;
use fastsize_io::{FetchError, Prober, Target};
use std::sync::Arc;
use std::thread;
use tracing::{debug, error, warn};

const JOB_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug)]
pub struct Outcome {
    pub index: usize,
    pub target: String,
    pub result: Result<Detection, FetchError>,
}

/// Probes every target on a pool of `jobs` threads.
///
/// Outcomes come back in input order regardless of completion order.
pub fn run(prober: Prober, targets: Vec<String>, jobs: usize) -> Vec<Outcome> {
    let total = targets.len();
    let workers = jobs.clamp(1, total.max(1));
    let prober = Arc::new(prober);

    let (job_tx, job_rx): (Sender<(usize, String)>, Receiver<(usize, String)>) =
        bounded(JOB_CHANNEL_CAPACITY);
    let (result_tx, result_rx): (Sender<Outcome>, Receiver<Outcome>) = unbounded();

    let mut handles = Vec::with_capacity(workers);
    for worker_id in 0..workers {
        let rx = job_rx.clone();
        let tx = result_tx.clone();
        let prober = Arc::clone(&prober);
        handles.push(thread::spawn(move || worker_thread(worker_id, &prober, rx, tx)));
    }
    drop(job_rx);
    drop(result_tx);

    for job in targets.into_iter().enumerate() {
        if job_tx.send(job).is_err() {
            error!("all workers exited early");
            break;
        }
    }
    drop(job_tx);

    let mut outcomes: Vec<Outcome> = result_rx.iter().collect();

    for (i, handle) in handles.into_iter().enumerate() {
        if handle.join().is_err() {
            error!(worker = i, "worker thread panicked");
        }
    }

    outcomes.sort_unstable_by_key(|o| o.index);
    outcomes
}

fn worker_thread(
    worker_id: usize,
    prober: &Prober,
    jobs: Receiver<(usize, String)>,
    results: Sender<Outcome>,
) {
    for (index, target) in jobs {
        let result = Target::parse(&target).and_then(|t| prober.probe(&t));
        match &result {
            Ok(d) => debug!(worker_id, %target, image_type = %d.image_type, size = %d.size, "ok"),
            Err(e) => warn!(worker_id, %target, error = %e, "failed"),
        }
        if results
            .send(Outcome {
                index,
                target,
                result,
            })
            .is_err()
        {
            break;
        }
    }
}
