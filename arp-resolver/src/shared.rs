use crate::interface::ArpInterface;
use crate::table::ARP_TABLE_SIZE;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Handle to an `ArpInterface` shared between the receive path, the send path and the aging
/// timer. Every access goes through `acquire`, which serializes them.
#[derive(Clone)]
pub struct SharedArp<const N: usize = ARP_TABLE_SIZE> {
    interface: Arc<Mutex<ArpInterface<N>>>,
}

impl<const N: usize> SharedArp<N> {
    pub fn new(interface: ArpInterface<N>) -> Self {
        SharedArp {
            interface: Arc::new(Mutex::new(interface)),
        }
    }

    /// Takes exclusive access to the interface until the guard is dropped. Entries returned by
    /// `find` borrow from the guard, so they cannot outlive it.
    pub fn acquire(&self) -> ArpGuard<'_, N> {
        // The table only holds plain values, so a panic elsewhere cannot leave it half updated.
        let guard = self
            .interface
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        ArpGuard { guard }
    }
}

/// Exclusive access to a shared `ArpInterface`.
pub struct ArpGuard<'a, const N: usize> {
    guard: MutexGuard<'a, ArpInterface<N>>,
}

impl<'a, const N: usize> Deref for ArpGuard<'a, N> {
    type Target = ArpInterface<N>;

    fn deref(&self) -> &Self::Target {
        &self.guard
    }
}

impl<'a, const N: usize> DerefMut for ArpGuard<'a, N> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.guard
    }
}
