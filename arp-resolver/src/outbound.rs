use crate::interface::ArpInterface;
use arp_packets::{ArpFrame, ArpOp, EthernetFrame, MacAddr, PacketData, IPV4_ETHER_TYPE};
use std::net::Ipv4Addr;
use tracing::{debug, trace};

/// What became of an outbound datagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outbound {
    /// The datagram was framed for the given hardware address and can be transmitted.
    Resolved(MacAddr),
    /// The next hop was not in the table. The datagram was overwritten with a broadcast ARP
    /// request, which should be transmitted instead; the datagram itself is gone and is left to
    /// the upper layer to retransmit.
    RequestEmitted,
}

impl<const N: usize> ArpInterface<N> {
    ///
    /// Prepares an outbound IPv4 datagram for the wire. `packet` holds the bare datagram and
    /// `next_hop` is the address to resolve: the destination itself if it is on this segment,
    /// otherwise the router chosen by the IP layer (see `ArpConfig::next_hop`).
    ///
    /// Either way the buffer ends up holding exactly the Ethernet frame to transmit.
    ///
    pub fn output(&mut self, packet: PacketData, next_hop: Ipv4Addr) -> Outbound {
        let dest_mac = if next_hop.is_broadcast() {
            Some(MacAddr::BROADCAST)
        } else if next_hop.is_multicast() {
            Some(MacAddr::ipv4_multicast(next_hop))
        } else {
            self.table.find(next_hop).map(|entry| entry.hardware_addr)
        };

        let local_mac_addr = self.config.hardware_addr();
        match dest_mac {
            Some(dest_mac) => {
                let mut frame = EthernetFrame::encap(packet, IPV4_ETHER_TYPE);
                frame.set_dest_mac(dest_mac);
                frame.set_src_mac(local_mac_addr);
                trace!(ip = %next_hop, mac = %dest_mac, "framed ipv4 datagram");
                Outbound::Resolved(dest_mac)
            }
            None => {
                let mut arp_request = ArpFrame::new_ipv4(packet);
                arp_request.set_opcode(ArpOp::Request as u16);
                arp_request.set_sender_mac_addr(local_mac_addr);
                arp_request.set_sender_ipv4_addr(self.config.ipv4_addr());
                arp_request.set_target_mac_addr(MacAddr::ZERO);
                arp_request.set_target_ipv4_addr(next_hop);

                let ethernet = arp_request.frame_mut();
                ethernet.set_dest_mac(MacAddr::BROADCAST);
                ethernet.set_src_mac(local_mac_addr);

                debug!(ip = %next_hop, "no arp entry, sending request");
                Outbound::RequestEmitted
            }
        }
    }
}
