use crate::shared::SharedArp;
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::time;
use tracing::{debug, trace};

/// Recommended period between calls to `ArpInterface::timer`.
pub const ARP_TIMER_INTERVAL: Duration = Duration::from_secs(10);

/// Ages the shared table once every `period` until `shutdown` fires or its sender is dropped.
///
/// Each tick holds the interface lock only for the duration of `timer()`.
pub async fn run_aging_timer<const N: usize>(
    arp: SharedArp<N>,
    period: Duration,
    mut shutdown: oneshot::Receiver<()>,
) {
    let mut interval = time::interval(period);
    // An interval's first tick completes immediately
    interval.tick().await;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let mut guard = arp.acquire();
                guard.timer();
                trace!(entries = guard.table().len() as u64, "arp table aged");
            }
            _ = &mut shutdown => {
                debug!("arp aging timer stopped");
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ArpConfig;
    use crate::interface::ArpInterface;
    use arp_packets::MacAddr;
    use std::net::Ipv4Addr;

    fn shared(max_age: u8) -> SharedArp {
        SharedArp::new(ArpInterface::new(
            ArpConfig::new(MacAddr::new([2, 0, 0, 0, 0, 1]), Ipv4Addr::new(10, 0, 0, 1))
                .with_max_age(max_age),
        ))
    }

    #[tokio::test]
    async fn timer_expires_stale_entries() {
        let arp = shared(2);
        let peer = Ipv4Addr::new(10, 0, 0, 2);
        arp.acquire().update(peer, MacAddr::new([2, 0, 0, 0, 0, 2]));

        let (stop, shutdown) = oneshot::channel();
        let task = tokio::spawn(run_aging_timer(
            arp.clone(),
            Duration::from_millis(5),
            shutdown,
        ));

        time::delay_for(Duration::from_millis(200)).await;
        assert!(arp.acquire().find(peer).is_none());

        stop.send(()).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn dropped_sender_stops_timer() {
        let arp = shared(u8::max_value());
        let peer = Ipv4Addr::new(10, 0, 0, 2);
        arp.acquire().update(peer, MacAddr::new([2, 0, 0, 0, 0, 2]));

        let (stop, shutdown) = oneshot::channel::<()>();
        let task = tokio::spawn(run_aging_timer(
            arp.clone(),
            Duration::from_millis(5),
            shutdown,
        ));
        time::delay_for(Duration::from_millis(50)).await;
        drop(stop);
        task.await.unwrap();

        let age = arp.acquire().find(peer).unwrap().age;
        time::delay_for(Duration::from_millis(50)).await;
        assert!(age > 0);
        assert_eq!(arp.acquire().find(peer).unwrap().age, age);
    }
}
