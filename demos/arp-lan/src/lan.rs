use arp_resolver::config::ArpConfig;
use arp_resolver::processor::{ArpEgress, ArpIngress, IngressFrame, Processor};
use arp_resolver::shared::SharedArp;
use arp_resolver::ArpInterface;
use crossbeam::crossbeam_channel::{unbounded, Receiver, Sender};
use std::net::Ipv4Addr;
use tracing::{debug, info};

/// One end of a simulated Ethernet segment. Frames sent by the host land on its peer's receive
/// queue, and nothing moves until `poll` is called.
pub struct Host {
    pub name: &'static str,
    pub arp: SharedArp,
    ingress: ArpIngress,
    egress: ArpEgress,
    wire_out: Sender<Vec<u8>>,
    wire_in: Receiver<Vec<u8>>,
    pub delivered: usize,
}

/// Connects two hosts back to back.
pub fn segment(a: (&'static str, ArpConfig), b: (&'static str, ArpConfig)) -> (Host, Host) {
    let (a_to_b, b_from_a) = unbounded();
    let (b_to_a, a_from_b) = unbounded();
    (
        Host::new(a.0, a.1, a_to_b, a_from_b),
        Host::new(b.0, b.1, b_to_a, b_from_a),
    )
}

impl Host {
    fn new(
        name: &'static str,
        config: ArpConfig,
        wire_out: Sender<Vec<u8>>,
        wire_in: Receiver<Vec<u8>>,
    ) -> Self {
        let arp = SharedArp::new(ArpInterface::new(config));
        Host {
            name,
            ingress: ArpIngress::new(arp.clone()),
            egress: ArpEgress::new(arp.clone()),
            arp,
            wire_out,
            wire_in,
            delivered: 0,
        }
    }

    /// Hands an IPv4 datagram to the send path. Returns false if it never reached the wire.
    pub fn send(&mut self, datagram: Vec<u8>) -> bool {
        match self.egress.process(datagram) {
            Some(frame) => {
                debug!(host = self.name, len = frame.len() as u64, "frame on the wire");
                self.wire_out.send(frame).is_ok()
            }
            None => false,
        }
    }

    /// Drains the receive queue. Returns how many frames were taken off the wire.
    pub fn poll(&mut self) -> usize {
        let mut received = 0;
        while let Ok(frame) = self.wire_in.try_recv() {
            received += 1;
            match self.ingress.process(frame) {
                Some(IngressFrame::Transmit(reply)) => {
                    debug!(host = self.name, "answering arp request");
                    let _ = self.wire_out.send(reply);
                }
                Some(IngressFrame::Deliver(frame)) => {
                    self.delivered += 1;
                    info!(host = self.name, len = frame.len() as u64, "datagram delivered");
                }
                None => {}
            }
        }
        received
    }
}

/// A minimal IPv4 datagram carrying `payload`.
pub fn datagram(src: Ipv4Addr, dest: Ipv4Addr, payload: &[u8]) -> Vec<u8> {
    let total_len = (20 + payload.len()) as u16;
    let mut data = vec![0x45, 0];
    data.extend(&total_len.to_be_bytes());
    data.extend(&[0, 0, 0x40, 0, 64, 17, 0, 0]);
    data.extend(&src.octets());
    data.extend(&dest.octets());
    data.extend(payload);
    data
}

/// Moves frames back and forth until the segment is quiet.
pub fn settle(a: &mut Host, b: &mut Host) {
    while a.poll() + b.poll() > 0 {}
}
