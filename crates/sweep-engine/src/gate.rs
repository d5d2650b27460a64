use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Counting admission control for in-flight lookups.
///
/// One gate is created per batch; every probe worker of that batch must
/// hold a permit for the duration of a lookup attempt. Permits are
/// released on drop, so accounting balances on every exit path.
#[derive(Clone)]
pub struct ProbeGate {
    sem: Arc<Semaphore>,
    limit: usize,
}

impl ProbeGate {
    pub fn new(limit: usize) -> Self {
        Self {
            sem: Arc::new(Semaphore::new(limit)),
            limit,
        }
    }

    /// Acquire one permit, suspending until a slot frees.
    pub async fn acquire(&self) -> GatePermit {
        // The semaphore is never closed while a gate handle exists.
        let permit = Arc::clone(&self.sem)
            .acquire_owned()
            .await
            .expect("gate semaphore closed");
        GatePermit { _permit: permit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Permits currently free.
    pub fn available(&self) -> usize {
        self.sem.available_permits()
    }
}

/// RAII permit handle; dropping it returns the slot to the gate.
pub struct GatePermit {
    _permit: OwnedSemaphorePermit,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn admits_up_to_limit() {
        let gate = ProbeGate::new(2);
        let p1 = gate.acquire().await;
        let _p2 = gate.acquire().await;
        assert_eq!(gate.available(), 0);

        // Third acquire must suspend until a permit frees.
        let waited = timeout(Duration::from_millis(20), gate.acquire()).await;
        assert!(waited.is_err());

        drop(p1);
        let _p3 = timeout(Duration::from_millis(100), gate.acquire())
            .await
            .expect("permit freed by drop");
    }

    #[tokio::test]
    async fn dropping_permit_restores_capacity() {
        let gate = ProbeGate::new(1);
        assert_eq!(gate.available(), 1);
        {
            let _p = gate.acquire().await;
            assert_eq!(gate.available(), 0);
        }
        assert_eq!(gate.available(), 1);
        assert_eq!(gate.limit(), 1);
    }
}
