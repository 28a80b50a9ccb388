use crate::*;
use std::convert::TryFrom;
use std::net::Ipv4Addr;

pub enum ArpOp {
    Request = 1,
    Reply = 2,
}

pub enum ArpHardwareType {
    Ethernet = 1,
}

/// Size of the ARP body for Ethernet hardware and IPv4 protocol addresses.
pub const ARP_HEADER_LEN: usize = 28;

/// Size of a complete, unpadded ARP frame on the wire.
pub const ARP_FRAME_LEN: usize = ETHERNET_HEADER_LEN + ARP_HEADER_LEN;

const ETHERNET_ADDR_LEN: u8 = 6;
const IPV4_ADDR_LEN: u8 = 4;

const HARDWARE_TYPE_RANGE: (usize, usize) = (0, 2);
const PROTOCOL_TYPE_RANGE: (usize, usize) = (2, 4);
const HARDWARE_ADDR_LEN_RANGE: (usize, usize) = (4, 5);
const PROTOCOL_ADDR_LEN_RANGE: (usize, usize) = (5, 6);
const OPCODE_RANGE: (usize, usize) = (6, 8);
const SENDER_HARDWARE_ADDR_RANGE: (usize, usize) = (8, 14);
const SENDER_PROTOCOL_ADDR_RANGE: (usize, usize) = (14, 18);
const TARGET_HARDWARE_ADDR_RANGE: (usize, usize) = (18, 24);
const TARGET_PROTOCOL_ADDR_RANGE: (usize, usize) = (24, 28);

///
/// EthernetFrame wrapper with getters/setters for the packet structure described in RFC 826
/// https://tools.ietf.org/html/rfc826
///
/// Only Ethernet hardware addresses and IPv4 protocol addresses are supported, so the address
/// fields sit at fixed offsets.
///
pub struct ArpFrame<'packet> {
    frame: EthernetFrame<'packet>,
}

impl<'packet> ArpFrame<'packet> {
    ///
    /// Replaces the contents of `data` with an Ethernet/IPv4 ARP frame. The fixed fields are
    /// filled in; the opcode, addresses, and Ethernet header are left zeroed for the caller.
    ///
    pub fn new_ipv4(data: PacketData<'packet>) -> Self {
        let frame = EthernetFrame::overwrite(data, ARP_ETHER_TYPE, ARP_HEADER_LEN);
        let mut arp_frame = ArpFrame { frame };
        arp_frame.set_hardware_type(ArpHardwareType::Ethernet as u16);
        arp_frame.set_protocol_type(IPV4_ETHER_TYPE);
        arp_frame.set_hardware_addr_len(ETHERNET_ADDR_LEN);
        arp_frame.set_protocol_addr_len(IPV4_ADDR_LEN);
        arp_frame
    }

    pub fn hardware_type(&self) -> u16 {
        let (start, end) = HARDWARE_TYPE_RANGE;
        let bytes = self.arp_data(start, end);
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    pub fn protocol_type(&self) -> u16 {
        let (start, end) = PROTOCOL_TYPE_RANGE;
        let bytes = self.arp_data(start, end);
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    pub fn hardware_addr_len(&self) -> u8 {
        let (start, _) = HARDWARE_ADDR_LEN_RANGE;
        self.arp_data(start, start + 1)[0]
    }

    pub fn protocol_addr_len(&self) -> u8 {
        let (start, _) = PROTOCOL_ADDR_LEN_RANGE;
        self.arp_data(start, start + 1)[0]
    }

    pub fn opcode(&self) -> u16 {
        let (start, end) = OPCODE_RANGE;
        let bytes = self.arp_data(start, end);
        u16::from_be_bytes([bytes[0], bytes[1]])
    }

    pub fn sender_mac_addr(&self) -> MacAddr {
        let (start, end) = SENDER_HARDWARE_ADDR_RANGE;
        MacAddr::new(mac_array(self.arp_data(start, end)))
    }

    pub fn sender_ipv4_addr(&self) -> Ipv4Addr {
        let (start, end) = SENDER_PROTOCOL_ADDR_RANGE;
        Ipv4Addr::from(ipv4_array(self.arp_data(start, end)))
    }

    pub fn target_mac_addr(&self) -> MacAddr {
        let (start, end) = TARGET_HARDWARE_ADDR_RANGE;
        MacAddr::new(mac_array(self.arp_data(start, end)))
    }

    pub fn target_ipv4_addr(&self) -> Ipv4Addr {
        let (start, end) = TARGET_PROTOCOL_ADDR_RANGE;
        Ipv4Addr::from(ipv4_array(self.arp_data(start, end)))
    }

    pub fn set_hardware_type(&mut self, htype: u16) {
        let (start, end) = HARDWARE_TYPE_RANGE;
        self.set_arp_data(&htype.to_be_bytes(), start, end);
    }

    pub fn set_protocol_type(&mut self, ptype: u16) {
        let (start, end) = PROTOCOL_TYPE_RANGE;
        self.set_arp_data(&ptype.to_be_bytes(), start, end);
    }

    pub fn set_hardware_addr_len(&mut self, len: u8) {
        let (start, end) = HARDWARE_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_protocol_addr_len(&mut self, len: u8) {
        let (start, end) = PROTOCOL_ADDR_LEN_RANGE;
        self.set_arp_data(&[len], start, end);
    }

    pub fn set_opcode(&mut self, code: u16) {
        let (start, end) = OPCODE_RANGE;
        self.set_arp_data(&code.to_be_bytes(), start, end);
    }

    pub fn set_sender_mac_addr(&mut self, addr: MacAddr) {
        let (start, end) = SENDER_HARDWARE_ADDR_RANGE;
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_sender_ipv4_addr(&mut self, addr: Ipv4Addr) {
        let (start, end) = SENDER_PROTOCOL_ADDR_RANGE;
        self.set_arp_data(&addr.octets(), start, end);
    }

    pub fn set_target_mac_addr(&mut self, addr: MacAddr) {
        let (start, end) = TARGET_HARDWARE_ADDR_RANGE;
        self.set_arp_data(&addr.bytes, start, end);
    }

    pub fn set_target_ipv4_addr(&mut self, addr: Ipv4Addr) {
        let (start, end) = TARGET_PROTOCOL_ADDR_RANGE;
        self.set_arp_data(&addr.octets(), start, end);
    }

    /// Drops any Ethernet padding that followed the ARP body.
    pub fn trim_padding(&mut self) {
        self.frame.truncate_payload(ARP_HEADER_LEN);
    }

    pub fn frame_mut(&mut self) -> &mut EthernetFrame<'packet> {
        &mut self.frame
    }

    // Move ownership of the frame back to the caller
    pub fn frame(self) -> EthernetFrame<'packet> {
        self.frame
    }

    // Returns the bytes in the ARP body between start and end, exclusive
    fn arp_data(&self, start: usize, end: usize) -> &[u8] {
        &self.frame.payload()[start..end]
    }

    fn set_arp_data(&mut self, bytes: &[u8], start: usize, end: usize) {
        self.frame.payload_mut()[start..end].copy_from_slice(bytes);
    }
}

impl<'packet> TryFrom<EthernetFrame<'packet>> for ArpFrame<'packet> {
    type Error = &'static str;

    ///
    /// Decorates the given EthernetFrame with ArpFrame getters/setters.
    /// Validates
    /// - The frame has an ARP ether type
    /// - The payload holds a full Ethernet/IPv4 ARP body (trailing link padding is allowed)
    /// - The address length fields describe Ethernet and IPv4 addresses
    ///
    fn try_from(frame: EthernetFrame<'packet>) -> Result<Self, Self::Error> {
        if frame.ether_type() != ARP_ETHER_TYPE {
            return Err("Frame does not have ARP ether type.");
        };

        if frame.payload().len() < ARP_HEADER_LEN {
            return Err("Frame payload is too small");
        }

        let arp_frame = ArpFrame { frame };
        if arp_frame.hardware_addr_len() != ETHERNET_ADDR_LEN
            || arp_frame.protocol_addr_len() != IPV4_ADDR_LEN
        {
            return Err("Frame address lengths are not Ethernet/IPv4");
        }

        Ok(arp_frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_bytes() -> Vec<u8> {
        vec![
            0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0x08, 0x06, // ethernet
            0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x01, // fixed fields
            1, 2, 3, 4, 5, 6, 10, 0, 0, 1, // sender
            0, 0, 0, 0, 0, 0, 10, 0, 0, 2, // target
        ]
    }

    #[test]
    fn generate_ipv4_arp_frame() {
        let mut data = vec![0xaa; 64];
        let arp_frame = ArpFrame::new_ipv4(&mut data);
        assert_eq!(arp_frame.hardware_type(), ArpHardwareType::Ethernet as u16);
        assert_eq!(arp_frame.protocol_type(), IPV4_ETHER_TYPE);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), 0);
        assert_eq!(arp_frame.sender_mac_addr(), MacAddr::ZERO);
        assert_eq!(arp_frame.sender_ipv4_addr(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(arp_frame.target_mac_addr(), MacAddr::ZERO);
        assert_eq!(arp_frame.target_ipv4_addr(), Ipv4Addr::UNSPECIFIED);
        assert_eq!(arp_frame.frame().ether_type(), ARP_ETHER_TYPE);
        assert_eq!(data.len(), ARP_FRAME_LEN);
    }

    #[test]
    fn arp_frame_from_ethernet() -> Result<(), String> {
        let mut data = request_bytes();
        let arp_frame = ArpFrame::try_from(EthernetFrame::from_buffer(&mut data)?)?;
        assert_eq!(arp_frame.hardware_type(), 1);
        assert_eq!(arp_frame.protocol_type(), 0x0800);
        assert_eq!(arp_frame.hardware_addr_len(), 6);
        assert_eq!(arp_frame.protocol_addr_len(), 4);
        assert_eq!(arp_frame.opcode(), ArpOp::Request as u16);
        assert_eq!(arp_frame.sender_mac_addr(), MacAddr::new([1, 2, 3, 4, 5, 6]));
        assert_eq!(arp_frame.sender_ipv4_addr(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(arp_frame.target_mac_addr(), MacAddr::ZERO);
        assert_eq!(arp_frame.target_ipv4_addr(), Ipv4Addr::new(10, 0, 0, 2));
        Ok(())
    }

    #[test]
    fn setters_write_wire_order() {
        let mut data = Vec::new();
        let mut arp_frame = ArpFrame::new_ipv4(&mut data);
        arp_frame.set_opcode(ArpOp::Reply as u16);
        arp_frame.set_sender_mac_addr(MacAddr::new([1, 2, 3, 4, 5, 6]));
        arp_frame.set_sender_ipv4_addr(Ipv4Addr::new(192, 168, 1, 1));
        arp_frame.set_target_mac_addr(MacAddr::new([6, 5, 4, 3, 2, 1]));
        arp_frame.set_target_ipv4_addr(Ipv4Addr::new(192, 168, 1, 2));
        assert_eq!(
            &data[14..],
            &[
                0x00, 0x01, 0x08, 0x00, 0x06, 0x04, 0x00, 0x02, 1, 2, 3, 4, 5, 6, 192, 168, 1, 1,
                6, 5, 4, 3, 2, 1, 192, 168, 1, 2,
            ][..]
        );
    }

    #[test]
    fn padded_frame_accepted_and_trimmed() {
        let mut data = request_bytes();
        data.resize(60, 0);
        let mut arp_frame = ArpFrame::try_from(EthernetFrame::from_buffer(&mut data).unwrap())
            .unwrap();
        arp_frame.trim_padding();
        assert_eq!(data.len(), ARP_FRAME_LEN);
    }

    #[test]
    fn wrong_ether_type_rejected() {
        let mut data = request_bytes();
        data[13] = 0x00;
        let result = ArpFrame::try_from(EthernetFrame::from_buffer(&mut data).unwrap());
        assert_eq!(result.err(), Some("Frame does not have ARP ether type."));
    }

    #[test]
    fn short_payload_rejected() {
        let mut data = request_bytes();
        data.truncate(40);
        let result = ArpFrame::try_from(EthernetFrame::from_buffer(&mut data).unwrap());
        assert_eq!(result.err(), Some("Frame payload is too small"));
    }

    #[test]
    fn foreign_address_lengths_rejected() {
        let mut data = request_bytes();
        data[19] = 16;
        let result = ArpFrame::try_from(EthernetFrame::from_buffer(&mut data).unwrap());
        assert_eq!(
            result.err(),
            Some("Frame address lengths are not Ethernet/IPv4")
        );
    }
}
