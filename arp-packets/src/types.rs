use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// The common datatype that all packet views share to represent their data. The views borrow the
/// driver's frame buffer for the duration of a call, and the length of the vector is the length of
/// the frame that will be handed back to the driver.
pub type PacketData<'packet> = &'packet mut Vec<u8>;

pub const ARP_ETHER_TYPE: u16 = 0x0806;
pub const IPV4_ETHER_TYPE: u16 = 0x0800;
pub const IPV6_ETHER_TYPE: u16 = 0x86DD;

/// The layer 3 protocols we care about, as tagged in the Ethernet header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EtherType {
    Arp,
    Ipv4,
    Ipv6,
    Unsupported,
}

impl From<u16> for EtherType {
    fn from(ether_type: u16) -> Self {
        match ether_type {
            ARP_ETHER_TYPE => EtherType::Arp,
            IPV4_ETHER_TYPE => EtherType::Ipv4,
            IPV6_ETHER_TYPE => EtherType::Ipv6,
            _ => EtherType::Unsupported,
        }
    }
}

// Most significant byte is 0th
#[derive(Eq, Clone, Copy, Hash, PartialEq, Debug, Default)]
pub struct MacAddr {
    pub bytes: [u8; 6],
}

impl MacAddr {
    pub const BROADCAST: MacAddr = MacAddr { bytes: [0xff; 6] };
    pub const ZERO: MacAddr = MacAddr { bytes: [0; 6] };

    pub fn new(bytes: [u8; 6]) -> MacAddr {
        MacAddr { bytes }
    }

    pub fn is_broadcast(&self) -> bool {
        *self == MacAddr::BROADCAST
    }

    /// Maps an IPv4 multicast group onto its Ethernet group address, RFC 1112 section 6.4:
    /// 01:00:5e followed by the low 23 bits of the group.
    pub fn ipv4_multicast(group: Ipv4Addr) -> MacAddr {
        let octets = group.octets();
        MacAddr::new([0x01, 0x00, 0x5e, octets[1] & 0x7f, octets[2], octets[3]])
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let b = &self.bytes;
        write!(
            f,
            "{:02x}:{:02x}:{:02x}:{:02x}:{:02x}:{:02x}",
            b[0], b[1], b[2], b[3], b[4], b[5]
        )
    }
}

impl FromStr for MacAddr {
    type Err = &'static str;

    /// Parses the usual colon separated notation, e.g. `de:ad:be:ef:00:01`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0u8; 6];
        let mut octets = s.split(':');
        for byte in bytes.iter_mut() {
            let octet = octets.next().ok_or("MAC address has fewer than 6 octets")?;
            if octet.len() != 2 {
                return Err("MAC address octets must be 2 hex digits");
            }
            *byte = u8::from_str_radix(octet, 16).map_err(|_| "MAC address octet is not hex")?;
        }
        if octets.next().is_some() {
            return Err("MAC address has more than 6 octets");
        }
        Ok(MacAddr::new(bytes))
    }
}

pub fn ipv4_array(bytes: &[u8]) -> [u8; 4] {
    let mut ipv4_arr: [u8; 4] = Default::default();
    ipv4_arr.copy_from_slice(&bytes[0..4]);
    ipv4_arr
}

pub fn mac_array(bytes: &[u8]) -> [u8; 6] {
    let mut mac_arr: [u8; 6] = Default::default();
    mac_arr.copy_from_slice(&bytes[0..6]);
    mac_arr
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ether_type_from_tag() {
        assert_eq!(EtherType::from(0x0806), EtherType::Arp);
        assert_eq!(EtherType::from(0x0800), EtherType::Ipv4);
        assert_eq!(EtherType::from(0x86DD), EtherType::Ipv6);
        assert_eq!(EtherType::from(0x8100), EtherType::Unsupported);
    }

    #[test]
    fn parse_mac_addr() {
        let mac: MacAddr = "de:ad:BE:ef:00:01".parse().unwrap();
        assert_eq!(mac, MacAddr::new([0xde, 0xad, 0xbe, 0xef, 0x00, 0x01]));
        assert_eq!(mac.to_string(), "de:ad:be:ef:00:01");
    }

    #[test]
    fn parse_bad_mac_addr() {
        assert!("de:ad:be:ef:00".parse::<MacAddr>().is_err());
        assert!("de:ad:be:ef:00:01:02".parse::<MacAddr>().is_err());
        assert!("de:ad:be:ef:00:zz".parse::<MacAddr>().is_err());
        assert!("dead:be:ef:00:01".parse::<MacAddr>().is_err());
    }

    #[test]
    fn multicast_mapping() {
        let mac = MacAddr::ipv4_multicast(Ipv4Addr::new(239, 255, 0, 250));
        assert_eq!(mac, MacAddr::new([0x01, 0x00, 0x5e, 0x7f, 0x00, 0xfa]));
        assert!(!mac.is_broadcast());
        assert!(MacAddr::BROADCAST.is_broadcast());
    }
}
