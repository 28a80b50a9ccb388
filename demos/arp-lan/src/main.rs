mod config;
mod lan;
mod subscriber;

use crate::config::LanConfig;
use crate::lan::{datagram, segment, settle};
use crate::subscriber::LanSubscriber;
use arp_resolver::aging::run_aging_timer;
use tokio::runtime;
use tokio::sync::oneshot;
use tracing::{info, warn};

fn main() -> Result<(), failure::Error> {
    let config = LanConfig::from_args()?;

    tracing::subscriber::set_global_default(LanSubscriber::new(config.verbose))?;

    let mut runtime = runtime::Builder::new()
        .basic_scheduler()
        .enable_time()
        .build()?;

    runtime.block_on(run(config));
    Ok(())
}

async fn run(config: LanConfig) {
    let host_ip = config.host.ipv4_addr();
    let peer_ip = config.peer.ipv4_addr();
    let (mut host, mut peer) = segment(("host", config.host), ("peer", config.peer));

    let (stop_host, host_shutdown) = oneshot::channel();
    let (stop_peer, peer_shutdown) = oneshot::channel();
    let host_timer = tokio::spawn(run_aging_timer(
        host.arp.clone(),
        config.aging_period,
        host_shutdown,
    ));
    let peer_timer = tokio::spawn(run_aging_timer(
        peer.arp.clone(),
        config.aging_period,
        peer_shutdown,
    ));

    for round in 0..config.rounds {
        let payload = format!("round {}", round);
        if !host.send(datagram(host_ip, peer_ip, payload.as_bytes())) {
            warn!(round = round as u64, "datagram was dropped before the wire");
        }
        settle(&mut host, &mut peer);
        tokio::task::yield_now().await;
    }

    let _ = stop_host.send(());
    let _ = stop_peer.send(());
    let _ = host_timer.await;
    let _ = peer_timer.await;

    for side in [&host, &peer].iter() {
        let arp = side.arp.acquire();
        info!(
            host = side.name,
            delivered = side.delivered as u64,
            entries = arp.table().len() as u64,
            "finished"
        );
        for entry in arp.table().iter() {
            info!(
                host = side.name,
                ip = %entry.protocol_addr,
                mac = %entry.hardware_addr,
                age = entry.age as u64,
                "arp entry"
            );
        }
    }
}
