use crate::config::ArpConfig;
use crate::table::{ArpEntry, ArpTable, ARP_TABLE_SIZE};
use arp_packets::MacAddr;
use std::net::Ipv4Addr;

/// Address resolution state for one Ethernet interface: its addresses and its translation
/// table.
///
/// Nothing in here locks. Each call runs to completion on the caller's context, and the caller
/// is responsible for keeping the receive path, the send path and the aging timer from running
/// at the same time. `SharedArp` does that with a mutex.
#[derive(Debug, Clone)]
pub struct ArpInterface<const N: usize = ARP_TABLE_SIZE> {
    pub(crate) config: ArpConfig,
    pub(crate) table: ArpTable<N>,
}

impl<const N: usize> ArpInterface<N> {
    pub fn new(config: ArpConfig) -> Self {
        let table = ArpTable::with_max_age(config.max_age());
        ArpInterface { config, table }
    }

    /// Forgets every mapping.
    pub fn init(&mut self) {
        self.table.clear();
    }

    pub fn config(&self) -> &ArpConfig {
        &self.config
    }

    pub fn table(&self) -> &ArpTable<N> {
        &self.table
    }

    /// Adds a mapping learned some other way, e.g. a static entry.
    pub fn update(&mut self, protocol_addr: Ipv4Addr, hardware_addr: MacAddr) {
        self.table.update(protocol_addr, hardware_addr);
    }

    pub fn find(&self, protocol_addr: Ipv4Addr) -> Option<&ArpEntry> {
        self.table.find(protocol_addr)
    }

    pub fn delete(&mut self, protocol_addr: Ipv4Addr) {
        self.table.delete(protocol_addr);
    }

    /// Periodic maintenance, to be called every `ARP_TIMER_INTERVAL`.
    pub fn timer(&mut self) {
        self.table.age_tick();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_update_find_delete() {
        let config = ArpConfig::new(MacAddr::new([2, 0, 0, 0, 0, 1]), Ipv4Addr::new(10, 0, 0, 1));
        let mut arp: ArpInterface = ArpInterface::new(config);
        let peer = Ipv4Addr::new(10, 0, 0, 2);
        let peer_mac = MacAddr::new([2, 0, 0, 0, 0, 2]);

        arp.update(peer, peer_mac);
        assert_eq!(arp.find(peer).map(|entry| entry.hardware_addr), Some(peer_mac));

        arp.delete(peer);
        assert!(arp.find(peer).is_none());
        arp.delete(peer);
        assert!(arp.table().is_empty());
    }

    #[test]
    fn timer_uses_configured_max_age() {
        let config = ArpConfig::new(MacAddr::new([2, 0, 0, 0, 0, 1]), Ipv4Addr::new(10, 0, 0, 1))
            .with_max_age(2);
        let mut arp: ArpInterface<2> = ArpInterface::new(config);
        let peer = Ipv4Addr::new(10, 0, 0, 2);
        arp.update(peer, MacAddr::new([2, 0, 0, 0, 0, 2]));

        arp.timer();
        arp.timer();
        assert!(arp.find(peer).is_some());
        arp.timer();
        assert!(arp.find(peer).is_none());
    }

    #[test]
    fn init_resets_table() {
        let config = ArpConfig::new(MacAddr::new([2, 0, 0, 0, 0, 1]), Ipv4Addr::new(10, 0, 0, 1));
        let mut arp: ArpInterface = ArpInterface::new(config);
        arp.update(Ipv4Addr::new(10, 0, 0, 2), MacAddr::new([2, 0, 0, 0, 0, 2]));
        arp.init();
        assert!(arp.table().is_empty());
        assert_eq!(arp.config().ipv4_addr(), Ipv4Addr::new(10, 0, 0, 1));
    }
}
