use crate::table::ARP_MAX_AGE;
use arp_packets::MacAddr;
use std::net::Ipv4Addr;

/// Addresses and tuning for one Ethernet interface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArpConfig {
    hardware_addr: MacAddr,
    ipv4_addr: Ipv4Addr,
    netmask: Option<Ipv4Addr>,
    default_router: Option<Ipv4Addr>,
    max_age: u8,
}

impl ArpConfig {
    pub fn new(hardware_addr: MacAddr, ipv4_addr: Ipv4Addr) -> Self {
        ArpConfig {
            hardware_addr,
            ipv4_addr,
            netmask: None,
            default_router: None,
            max_age: ARP_MAX_AGE,
        }
    }

    /// Sets the local subnet. Without one every destination is treated as on-link, and every
    /// IPv4 sender is learned.
    pub fn with_netmask(self, netmask: Ipv4Addr) -> Self {
        ArpConfig {
            netmask: Some(netmask),
            ..self
        }
    }

    pub fn with_default_router(self, router: Ipv4Addr) -> Self {
        ArpConfig {
            default_router: Some(router),
            ..self
        }
    }

    /// Ticks an entry survives without being refreshed.
    pub fn with_max_age(self, max_age: u8) -> Self {
        ArpConfig { max_age, ..self }
    }

    pub fn hardware_addr(&self) -> MacAddr {
        self.hardware_addr
    }

    pub fn ipv4_addr(&self) -> Ipv4Addr {
        self.ipv4_addr
    }

    pub fn netmask(&self) -> Option<Ipv4Addr> {
        self.netmask
    }

    pub fn default_router(&self) -> Option<Ipv4Addr> {
        self.default_router
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }

    pub fn is_on_link(&self, addr: Ipv4Addr) -> bool {
        match self.netmask {
            Some(netmask) => {
                let mask = u32::from(netmask);
                u32::from(addr) & mask == u32::from(self.ipv4_addr) & mask
            }
            None => true,
        }
    }

    /// The address whose hardware address an outbound datagram to `dest` must be sent to:
    /// `dest` itself when it is reachable on this segment, otherwise the default router.
    /// Broadcast and multicast destinations are never routed.
    pub fn next_hop(&self, dest: Ipv4Addr) -> Ipv4Addr {
        if dest.is_broadcast() || dest.is_multicast() || self.is_on_link(dest) {
            return dest;
        }
        self.default_router.unwrap_or(dest)
    }
}
