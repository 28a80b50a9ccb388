use crate::*;
use std::convert::TryFrom;
use std::net::Ipv4Addr;

/// Minimum IPv4 header, without options.
pub const IPV4_HEADER_LEN: usize = 20;

/// Read-only view of the IPv4 header fields the address resolution path needs. `layer3_offset`
/// is where the IP header starts in the buffer: 0 for a bare outbound datagram, 14 for a
/// received Ethernet frame.
pub struct Ipv4Packet<'packet> {
    pub data: PacketData<'packet>,
    pub layer3_offset: usize,
}

impl<'packet> Ipv4Packet<'packet> {
    pub fn from_buffer(
        data: PacketData<'packet>,
        layer3_offset: usize,
    ) -> Result<Ipv4Packet<'packet>, &'static str> {
        if data.len() < layer3_offset + IPV4_HEADER_LEN {
            return Err("Data is too short to be an IPv4 Packet");
        }

        // Check version number
        let version: u8 = (data[layer3_offset] & 0xF0) >> 4;
        if version != 4 {
            return Err("Packet has incorrect version, is not Ipv4Packet");
        }

        // The total length field is not checked against the buffer: received frames may carry
        // trailing Ethernet padding.
        Ok(Ipv4Packet {
            data,
            layer3_offset,
        })
    }

    pub fn src_addr(&self) -> Ipv4Addr {
        let start = self.layer3_offset + 12;
        Ipv4Addr::from(ipv4_array(&self.data[start..start + 4]))
    }

    pub fn dest_addr(&self) -> Ipv4Addr {
        let start = self.layer3_offset + 16;
        Ipv4Addr::from(ipv4_array(&self.data[start..start + 4]))
    }

    pub fn total_len(&self) -> u16 {
        let start = self.layer3_offset + 2;
        u16::from_be_bytes([self.data[start], self.data[start + 1]])
    }

    pub fn ttl(&self) -> u8 {
        self.data[self.layer3_offset + 8]
    }
}

impl<'packet> TryFrom<EthernetFrame<'packet>> for Ipv4Packet<'packet> {
    type Error = &'static str;

    fn try_from(frame: EthernetFrame<'packet>) -> Result<Self, Self::Error> {
        if frame.ether_type() != IPV4_ETHER_TYPE {
            return Err("Frame does not have IPv4 ether type.");
        }
        Ipv4Packet::from_buffer(frame.into_data(), ETHERNET_HEADER_LEN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ip_data() -> Vec<u8> {
        vec![
            0x45, 0, 0, 20, 0, 0, 0, 0, 64, 17, 0, 0, 192, 178, 128, 0, 10, 0, 0, 1,
        ]
    }

    #[test]
    fn bare_ipv4_packet() {
        let mut data = ip_data();
        let packet = Ipv4Packet::from_buffer(&mut data, 0).unwrap();
        assert_eq!(packet.src_addr(), Ipv4Addr::new(192, 178, 128, 0));
        assert_eq!(packet.dest_addr(), Ipv4Addr::new(10, 0, 0, 1));
        assert_eq!(packet.total_len(), 20);
        assert_eq!(packet.ttl(), 64);
    }

    #[test]
    fn ipv4_packet_from_frame() {
        let mut data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0x08, 0];
        data.extend(ip_data());
        // Minimum Ethernet frame padding after the datagram
        data.resize(60, 0);

        let packet = Ipv4Packet::try_from(EthernetFrame::from_buffer(&mut data).unwrap()).unwrap();
        assert_eq!(packet.layer3_offset, ETHERNET_HEADER_LEN);
        assert_eq!(packet.src_addr(), Ipv4Addr::new(192, 178, 128, 0));
    }

    #[test]
    fn wrong_version() {
        let mut data = ip_data();
        data[0] = 0x65;
        assert_eq!(
            Ipv4Packet::from_buffer(&mut data, 0).err(),
            Some("Packet has incorrect version, is not Ipv4Packet")
        );
    }

    #[test]
    fn too_short() {
        let mut data = ip_data();
        data.truncate(19);
        assert!(Ipv4Packet::from_buffer(&mut data, 0).is_err());
    }

    #[test]
    fn not_ipv4_ether_type() {
        let mut data: Vec<u8> = vec![0xde, 0xad, 0xbe, 0xef, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 0x86, 0xdd];
        data.extend(ip_data());
        assert!(Ipv4Packet::try_from(EthernetFrame::from_buffer(&mut data).unwrap()).is_err());
    }
}
