use crate::inbound::Inbound;
use crate::interface::ArpInterface;
use arp_packets::{ArpFrame, ArpHardwareType, ArpOp, EthernetFrame, PacketData, IPV4_ETHER_TYPE};
use std::convert::TryFrom;
use tracing::{debug, trace};

impl<const N: usize> ArpInterface<N> {
    ///
    /// Processes a received ARP frame, RFC 826 style:
    ///
    /// The sender's <protocol address, hardware address> pair is merged into the table whether
    /// the frame is a request or a reply, since a peer talking to us is likely to be talked to.
    /// If the frame is a request for our protocol address the buffer is turned into the reply in
    /// place: hardware and protocol fields swapped with our own addresses in the sender fields,
    /// the opcode set to reply, and the Ethernet header addressed back to the requester.
    ///
    /// Returns `Inbound::Transmit` when the buffer holds a reply, otherwise empties the buffer and
    /// returns `Inbound::Absorbed`.
    ///
    pub fn arpin(&mut self, frame: PacketData) -> Inbound {
        let outcome = match EthernetFrame::from_buffer(&mut *frame).and_then(ArpFrame::try_from) {
            Ok(arp_frame) => self.handle_arp(arp_frame),
            Err(err) => {
                trace!(err, "dropping malformed arp frame");
                Inbound::Absorbed
            }
        };

        if outcome == Inbound::Absorbed {
            frame.clear();
        }
        outcome
    }

    fn handle_arp(&mut self, mut arp_frame: ArpFrame) -> Inbound {
        if arp_frame.hardware_type() != ArpHardwareType::Ethernet as u16
            || arp_frame.protocol_type() != IPV4_ETHER_TYPE
        {
            trace!(
                hardware_type = arp_frame.hardware_type() as u64,
                protocol_type = arp_frame.protocol_type() as u64,
                "arp for unsupported hardware/protocol"
            );
            return Inbound::Absorbed;
        }

        let sender_ipv4_addr = arp_frame.sender_ipv4_addr();
        let sender_mac_addr = arp_frame.sender_mac_addr();
        self.table.update(sender_ipv4_addr, sender_mac_addr);

        let local_ipv4_addr = self.config.ipv4_addr();
        if arp_frame.opcode() != ArpOp::Request as u16
            || arp_frame.target_ipv4_addr() != local_ipv4_addr
        {
            return Inbound::Absorbed;
        }

        let local_mac_addr = self.config.hardware_addr();
        arp_frame.set_opcode(ArpOp::Reply as u16);
        arp_frame.set_target_mac_addr(sender_mac_addr);
        arp_frame.set_target_ipv4_addr(sender_ipv4_addr);
        arp_frame.set_sender_mac_addr(local_mac_addr);
        arp_frame.set_sender_ipv4_addr(local_ipv4_addr);
        arp_frame.trim_padding();

        let ethernet = arp_frame.frame_mut();
        ethernet.set_dest_mac(sender_mac_addr);
        ethernet.set_src_mac(local_mac_addr);

        debug!(to = %sender_ipv4_addr, mac = %sender_mac_addr, "answering arp request");
        Inbound::Transmit
    }
}
