use crate::*;

/// Ethernet II header length: destination, source and ether type.
pub const ETHERNET_HEADER_LEN: usize = 14;

/// A view over a frame buffer that starts with an Ethernet II header.
pub struct EthernetFrame<'packet> {
    pub data: PacketData<'packet>,
}

impl<'packet> EthernetFrame<'packet> {
    pub fn from_buffer(frame: PacketData<'packet>) -> Result<EthernetFrame<'packet>, &'static str> {
        // Ethernet II frames must be at least the header, which is 14bytes
        // 0                    6                    12                      14
        // |---6 byte Dest_MAC--|---6 byte Src_MAC---|--2 Byte EtherType---|
        if frame.len() < ETHERNET_HEADER_LEN {
            return Err("Frame is less than the minimum of 14 bytes");
        }

        Ok(EthernetFrame { data: frame })
    }

    /// Pushes a zeroed header in front of whatever payload is already in the buffer and tags it
    /// with `ether_type`. The buffer grows by `ETHERNET_HEADER_LEN`.
    pub fn encap(payload: PacketData<'packet>, ether_type: u16) -> EthernetFrame<'packet> {
        payload.splice(0..0, [0u8; ETHERNET_HEADER_LEN].iter().cloned());
        let mut frame = EthernetFrame { data: payload };
        frame.set_ether_type(ether_type);
        frame
    }

    /// Throws away the contents of the buffer and replaces them with a zeroed frame carrying
    /// `payload_len` bytes of payload.
    pub fn overwrite(
        data: PacketData<'packet>,
        ether_type: u16,
        payload_len: usize,
    ) -> EthernetFrame<'packet> {
        data.clear();
        data.resize(ETHERNET_HEADER_LEN + payload_len, 0);
        let mut frame = EthernetFrame { data };
        frame.set_ether_type(ether_type);
        frame
    }

    pub fn dest_mac(&self) -> MacAddr {
        MacAddr::new(mac_array(&self.data[0..6]))
    }

    pub fn src_mac(&self) -> MacAddr {
        MacAddr::new(mac_array(&self.data[6..12]))
    }

    pub fn set_dest_mac(&mut self, mac: MacAddr) {
        self.data[..6].copy_from_slice(&mac.bytes);
    }

    pub fn set_src_mac(&mut self, mac: MacAddr) {
        self.data[6..12].copy_from_slice(&mac.bytes);
    }

    pub fn ether_type(&self) -> u16 {
        u16::from_be_bytes([self.data[12], self.data[13]])
    }

    pub fn set_ether_type(&mut self, ether_type: u16) {
        self.data[12..ETHERNET_HEADER_LEN].copy_from_slice(&ether_type.to_be_bytes());
    }

    pub fn payload(&self) -> &[u8] {
        &self.data[ETHERNET_HEADER_LEN..]
    }

    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.data[ETHERNET_HEADER_LEN..]
    }

    /// Cuts the frame down to the header plus `payload_len` bytes, dropping any link padding.
    pub fn truncate_payload(&mut self, payload_len: usize) {
        self.data.truncate(ETHERNET_HEADER_LEN + payload_len);
    }

    // Hand the buffer back to the caller
    pub fn into_data(self) -> PacketData<'packet> {
        self.data
    }
}
