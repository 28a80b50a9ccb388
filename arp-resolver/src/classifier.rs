//! Classifiers look at a packet by reference and put it into a class without modifying it. The
//! inbound path uses `ByEtherType` to decide who gets a received frame.
use arp_packets::{EtherType, ETHERNET_HEADER_LEN};

pub trait Classifier {
    type Packet: Send + Clone;
    type Class: Sized;

    fn classify(&self, packet: &Self::Packet) -> Self::Class;
}

/// Sorts raw Ethernet frames by the ether type in their header. Anything too short to carry a
/// header is `Unsupported`.
#[derive(Default)]
pub struct ByEtherType {}

impl ByEtherType {
    pub fn new() -> Self {
        ByEtherType {}
    }
}

impl Classifier for ByEtherType {
    type Packet = Vec<u8>;
    type Class = EtherType;

    fn classify(&self, frame: &Self::Packet) -> Self::Class {
        if frame.len() < ETHERNET_HEADER_LEN {
            return EtherType::Unsupported;
        }
        EtherType::from(u16::from_be_bytes([frame[12], frame[13]]))
    }
}
