use arp_packets::MacAddr;
use std::net::Ipv4Addr;
use tracing::debug;

/// Number of slots in the translation table unless the interface asks for another size.
pub const ARP_TABLE_SIZE: usize = 8;

/// Ticks an entry may go unrefreshed before it is flushed. At the recommended 10 second tick
/// this is a little over three minutes.
pub const ARP_MAX_AGE: u8 = 20;

/// One slot of the translation table. A slot whose protocol address is `0.0.0.0` is unused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArpEntry {
    pub protocol_addr: Ipv4Addr,
    pub hardware_addr: MacAddr,
    pub age: u8,
}

impl ArpEntry {
    pub const UNUSED: ArpEntry = ArpEntry {
        protocol_addr: Ipv4Addr::UNSPECIFIED,
        hardware_addr: MacAddr::ZERO,
        age: 0,
    };

    pub fn is_unused(&self) -> bool {
        self.protocol_addr.is_unspecified()
    }
}

/// Fixed size IPv4 -> Ethernet translation table. Never allocates; when every slot is taken the
/// oldest mapping makes room for the new one.
#[derive(Debug, Clone)]
pub struct ArpTable<const N: usize = ARP_TABLE_SIZE> {
    entries: [ArpEntry; N],
    max_age: u8,
}

impl<const N: usize> Default for ArpTable<N> {
    fn default() -> Self {
        ArpTable::with_max_age(ARP_MAX_AGE)
    }
}

impl<const N: usize> ArpTable<N> {
    /// Creates an empty table whose entries expire after `max_age` ticks without a refresh.
    pub fn with_max_age(max_age: u8) -> Self {
        ArpTable {
            entries: [ArpEntry::UNUSED; N],
            max_age,
        }
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn max_age(&self) -> u8 {
        self.max_age
    }

    /// Marks every slot unused.
    pub fn clear(&mut self) {
        self.entries = [ArpEntry::UNUSED; N];
    }

    /// Looks up the mapping for `protocol_addr`. The borrow keeps the table from changing
    /// underneath the caller; copy out what you need before giving it up.
    pub fn find(&self, protocol_addr: Ipv4Addr) -> Option<&ArpEntry> {
        if protocol_addr.is_unspecified() {
            return None;
        }
        self.entries
            .iter()
            .find(|entry| entry.protocol_addr == protocol_addr)
    }

    /// Inserts a mapping, or refreshes the hardware address and age of an existing one.
    ///
    /// A new mapping goes into the first unused slot. With no unused slot the entry with the
    /// greatest age is replaced, the lowest index winning a tie. Updating `0.0.0.0` does nothing.
    pub fn update(&mut self, protocol_addr: Ipv4Addr, hardware_addr: MacAddr) {
        if protocol_addr.is_unspecified() || N == 0 {
            return;
        }

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.protocol_addr == protocol_addr)
        {
            entry.hardware_addr = hardware_addr;
            entry.age = 0;
            return;
        }

        let slot = self.victim();
        let evicted = self.entries[slot];
        if !evicted.is_unused() {
            debug!(
                evicted = %evicted.protocol_addr,
                age = evicted.age as u64,
                "arp table full, evicting oldest entry"
            );
        }
        debug!(
            ip = %protocol_addr,
            mac = %hardware_addr,
            slot = slot as u64,
            "arp entry added"
        );
        self.entries[slot] = ArpEntry {
            protocol_addr,
            hardware_addr,
            age: 0,
        };
    }

    /// Forgets the mapping for `protocol_addr`, if there is one.
    pub fn delete(&mut self, protocol_addr: Ipv4Addr) {
        if protocol_addr.is_unspecified() {
            return;
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.protocol_addr == protocol_addr)
        {
            *entry = ArpEntry::UNUSED;
        }
    }

    /// Ages every mapping by one tick and flushes those older than `max_age`.
    pub fn age_tick(&mut self) {
        let max_age = self.max_age;
        for entry in self.entries.iter_mut().filter(|entry| !entry.is_unused()) {
            entry.age = entry.age.saturating_add(1);
            if entry.age > max_age {
                debug!(ip = %entry.protocol_addr, "arp entry expired");
                *entry = ArpEntry::UNUSED;
            }
        }
    }

    /// Iterates over the occupied slots in table order.
    pub fn iter(&self) -> impl Iterator<Item = &ArpEntry> {
        self.entries.iter().filter(|entry| !entry.is_unused())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // Only called with N > 0
    fn victim(&self) -> usize {
        if let Some(unused) = self.entries.iter().position(ArpEntry::is_unused) {
            return unused;
        }

        let mut oldest = 0;
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.age > self.entries[oldest].age {
                oldest = index;
            }
        }
        oldest
    }
}
