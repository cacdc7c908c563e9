//! In-process worker group backed by threads
//!
//! [`ThreadGroup::run`] spawns one scoped thread per worker and hands
//! each a handle implementing [`Communicator`]. Payloads move through
//! shared slots guarded by a barrier protocol: writers publish before
//! the first barrier, readers consume before the second. This is the
//! crate's stand-in for process-level ranks and the injectable fake
//! gather used by the distributed tests.

use std::any::Any;
use std::sync::{Arc, Barrier, Mutex};

use crate::comm::Communicator;

type Payload = Box<dyn Any + Send>;

struct Shared {
    size: usize,
    barrier: Barrier,
    bcast_slot: Mutex<Option<Payload>>,
    gather_slots: Mutex<Vec<Option<Payload>>>,
}

/// One worker's handle into an in-process group
pub struct ThreadGroup {
    shared: Arc<Shared>,
    rank: usize,
}

impl ThreadGroup {
    /// Runs `f` on `n_workers` threads, one group handle each, and
    /// returns the per-worker results in rank order
    ///
    /// # Panics
    ///
    /// Panics if `n_workers` is zero, or if any worker thread panics.
    pub fn run<F, R>(n_workers: usize, f: F) -> Vec<R>
    where
        F: Fn(&ThreadGroup) -> R + Send + Sync,
        R: Send,
    {
        assert!(n_workers > 0, "worker group cannot be empty");

        let shared = Arc::new(Shared {
            size: n_workers,
            barrier: Barrier::new(n_workers),
            bcast_slot: Mutex::new(None),
            gather_slots: Mutex::new((0..n_workers).map(|_| None).collect()),
        });

        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..n_workers)
                .map(|rank| {
                    let group = ThreadGroup {
                        shared: Arc::clone(&shared),
                        rank,
                    };
                    let f = &f;
                    scope.spawn(move || f(&group))
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().expect("worker thread panicked"))
                .collect()
        })
    }
}

impl Communicator for ThreadGroup {
    fn rank(&self) -> usize {
        self.rank
    }

    fn size(&self) -> usize {
        self.shared.size
    }

    fn broadcast<T: Clone + Send + 'static>(&self, root: usize, value: Option<T>) -> T {
        assert!(root < self.shared.size, "broadcast root out of range");

        if self.rank == root {
            let value = value.expect("root must supply the broadcast value");
            *self.shared.bcast_slot.lock().unwrap() = Some(Box::new(value.clone()));

            // Publish, then hold until everyone has copied; the second
            // barrier keeps the next collective's root from overwriting
            // the slot while a reader is still on it
            self.shared.barrier.wait();
            self.shared.barrier.wait();

            value
        } else {
            self.shared.barrier.wait();
            let copy = {
                let slot = self.shared.bcast_slot.lock().unwrap();
                slot.as_ref()
                    .and_then(|p| p.downcast_ref::<T>())
                    .expect("broadcast payload type mismatch")
                    .clone()
            };
            self.shared.barrier.wait();
            copy
        }
    }

    fn gather<T: Send + 'static>(&self, root: usize, value: T) -> Option<Vec<T>> {
        assert!(root < self.shared.size, "gather root out of range");

        self.shared.gather_slots.lock().unwrap()[self.rank] = Some(Box::new(value));
        self.shared.barrier.wait();

        let result = if self.rank == root {
            let mut slots = self.shared.gather_slots.lock().unwrap();
            let collected = slots
                .iter_mut()
                .map(|slot| {
                    let payload = slot.take().expect("gather slot missing a contribution");
                    *payload
                        .downcast::<T>()
                        .expect("gather payload type mismatch")
                })
                .collect();
            Some(collected)
        } else {
            None
        };

        // Hold every worker until the root has drained the slots
        self.shared.barrier.wait();
        result
    }

    fn barrier(&self) {
        self.shared.barrier.wait();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broadcast_reaches_all_ranks() {
        let results = ThreadGroup::run(4, |comm| {
            let value = if comm.rank() == 0 { Some(13u64) } else { None };
            comm.broadcast(0, value)
        });
        assert_eq!(results, vec![13, 13, 13, 13]);
    }

    #[test]
    fn test_gather_preserves_rank_order() {
        let results = ThreadGroup::run(4, |comm| comm.gather(0, comm.rank() * 10));
        assert_eq!(results[0], Some(vec![0, 10, 20, 30]));
        for r in &results[1..] {
            assert_eq!(*r, None);
        }
    }

    #[test]
    fn test_sequential_collectives_do_not_interfere() {
        let results = ThreadGroup::run(3, |comm| {
            let a = comm.broadcast(0, (comm.rank() == 0).then_some(1u32));
            let b = comm.broadcast(1, (comm.rank() == 1).then_some(2u32));
            let gathered = comm.gather(2, a + b);
            (a, b, gathered)
        });

        for (rank, (a, b, gathered)) in results.iter().enumerate() {
            assert_eq!(*a, 1);
            assert_eq!(*b, 2);
            if rank == 2 {
                assert_eq!(*gathered, Some(vec![3, 3, 3]));
            } else {
                assert_eq!(*gathered, None);
            }
        }
    }

    #[test]
    fn test_single_worker_group() {
        let results = ThreadGroup::run(1, |comm| {
            let v = comm.broadcast(0, Some(5i32));
            comm.gather(0, v).map(|g| g.len())
        });
        assert_eq!(results, vec![Some(1)]);
    }
}
