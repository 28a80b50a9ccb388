//! Processors take a packet by value, and return what should continue down the pipeline, or
//! `None` when the packet stops here. `ArpIngress` and `ArpEgress` put a `SharedArp` between the
//! driver and the IP stack.
use crate::inbound::Inbound;
use crate::outbound::Outbound;
use crate::shared::SharedArp;
use crate::table::ARP_TABLE_SIZE;
use arp_packets::Ipv4Packet;
use tracing::trace;

pub trait Processor {
    type Input: Send + Clone;
    type Output: Send + Clone;

    fn process(&mut self, packet: Self::Input) -> Option<Self::Output>;
}

/// Where a received frame goes after address resolution has seen it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngressFrame {
    /// Send back out of the interface the frame arrived on.
    Transmit(Vec<u8>),
    /// Pass up to the network layer.
    Deliver(Vec<u8>),
}

/// Receive side: learns from IPv4 frames, answers ARP requests for our address, swallows the
/// rest of ARP.
pub struct ArpIngress<const N: usize = ARP_TABLE_SIZE> {
    arp: SharedArp<N>,
}

impl<const N: usize> ArpIngress<N> {
    pub fn new(arp: SharedArp<N>) -> Self {
        ArpIngress { arp }
    }
}

impl<const N: usize> Processor for ArpIngress<N> {
    type Input = Vec<u8>;
    type Output = IngressFrame;

    fn process(&mut self, mut frame: Self::Input) -> Option<Self::Output> {
        let inbound = self.arp.acquire().input(&mut frame);
        match inbound {
            Inbound::Transmit => Some(IngressFrame::Transmit(frame)),
            Inbound::Deliver | Inbound::Unhandled => Some(IngressFrame::Deliver(frame)),
            Inbound::Absorbed => None,
        }
    }
}

/// Send side: takes bare IPv4 datagrams and returns the Ethernet frame to transmit, which is
/// either the framed datagram or an ARP request that replaced it. Datagrams that do not parse
/// are dropped.
pub struct ArpEgress<const N: usize = ARP_TABLE_SIZE> {
    arp: SharedArp<N>,
}

impl<const N: usize> ArpEgress<N> {
    pub fn new(arp: SharedArp<N>) -> Self {
        ArpEgress { arp }
    }
}

impl<const N: usize> Processor for ArpEgress<N> {
    type Input = Vec<u8>;
    type Output = Vec<u8>;

    fn process(&mut self, mut packet: Self::Input) -> Option<Self::Output> {
        let dest = match Ipv4Packet::from_buffer(&mut packet, 0) {
            Ok(ipv4) => ipv4.dest_addr(),
            Err(err) => {
                trace!(err, "dropping outbound datagram");
                return None;
            }
        };

        let mut arp = self.arp.acquire();
        let next_hop = arp.config().next_hop(dest);
        if let Outbound::RequestEmitted = arp.output(&mut packet, next_hop) {
            trace!(dest = %dest, "outbound datagram replaced by arp request");
        }
        Some(packet)
    }
}
