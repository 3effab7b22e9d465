use std::sync::atomic::{AtomicU64, Ordering};

/// Handle for one requested solve, compared against the current generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SolveTicket(u64);

impl SolveTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Monotonic counter that lets callers drop results of superseded solves.
///
/// The solver runs to completion regardless; a caller that started a newer
/// solve (or invalidated the inputs) simply discards older results.
#[derive(Debug, Default)]
pub struct SolveGeneration {
    current: AtomicU64,
}

impl SolveGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new solve; every earlier ticket becomes stale.
    pub fn begin(&self) -> SolveTicket {
        SolveTicket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Mark all outstanding tickets stale without starting a solve.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    pub fn is_current(&self, ticket: SolveTicket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// `Some(value)` if `ticket` is still current, `None` otherwise.
    pub fn accept<T>(&self, ticket: SolveTicket, value: T) -> Option<T> {
        self.is_current(ticket).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_newer_ticket_supersedes_older() {
        let generation = SolveGeneration::new();
        let first = generation.begin();
        assert!(generation.is_current(first));

        let second = generation.begin();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert!(second > first);

        assert_eq!(generation.accept(first, 1), None);
        assert_eq!(generation.accept(second, 2), Some(2));
    }

    #[test]
    fn test_invalidate_drops_outstanding() {
        let generation = SolveGeneration::new();
        let ticket = generation.begin();
        generation.invalidate();
        assert_eq!(generation.accept(ticket, "stale"), None);
    }

    #[test]
    fn test_only_last_worker_result_survives() {
        let generation = Arc::new(SolveGeneration::new());
        let tickets: Vec<SolveTicket> = (0..4).map(|_| generation.begin()).collect();

        let handles: Vec<_> = tickets
            .into_iter()
            .map(|ticket| {
                let generation = Arc::clone(&generation);
                thread::spawn(move || generation.accept(ticket, ticket.generation()))
            })
            .collect();

        let accepted: Vec<u64> = handles
            .into_iter()
            .filter_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(accepted, vec![4]);
    }
}
