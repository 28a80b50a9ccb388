use crate::classifier::{ByEtherType, Classifier};
use crate::interface::ArpInterface;
use arp_packets::{EtherType, EthernetFrame, Ipv4Packet, PacketData};
use std::convert::TryFrom;
use tracing::trace;

/// What the driver should do with a received frame once address resolution has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Inbound {
    /// IPv4 frame; the sender's mapping has been refreshed. Hand the untouched frame up the stack.
    Deliver,
    /// The buffer now holds an ARP reply. Transmit it.
    Transmit,
    /// ARP frame that needs no answer, or a malformed one. The buffer has been emptied.
    Absorbed,
    /// Not ours to handle. The frame is untouched.
    Unhandled,
}

impl<const N: usize> ArpInterface<N> {
    /// Entry point for every frame the driver receives.
    pub fn input(&mut self, frame: PacketData) -> Inbound {
        match ByEtherType::new().classify(frame) {
            EtherType::Ipv4 => self.ipin(frame),
            EtherType::Arp => self.arpin(frame),
            ether_type => {
                trace!(?ether_type, "frame not handled by arp");
                Inbound::Unhandled
            }
        }
    }

    /// Learns the sender's mapping from a received IPv4 frame. The frame itself is not modified.
    ///
    /// With a netmask configured only senders on the local subnet are learned; anything else
    /// arrived through a router and its source MAC is the router's.
    pub fn ipin(&mut self, frame: PacketData) -> Inbound {
        let ethernet = match EthernetFrame::from_buffer(frame) {
            Ok(ethernet) => ethernet,
            Err(err) => {
                trace!(err, "ignoring runt frame");
                return Inbound::Unhandled;
            }
        };
        let src_mac = ethernet.src_mac();
        let packet = match Ipv4Packet::try_from(ethernet) {
            Ok(packet) => packet,
            Err(err) => {
                trace!(err, "ignoring malformed ipv4 frame");
                return Inbound::Unhandled;
            }
        };

        let src_addr = packet.src_addr();
        if self.config.is_on_link(src_addr) {
            self.table.update(src_addr, src_mac);
        } else {
            trace!(ip = %src_addr, "not learning off-link sender");
        }
        Inbound::Deliver
    }
}
