/// The translation table: a fixed number of IPv4 -> Ethernet mappings, each with an age. Lookups
/// are linear scans, inserts never fail (the oldest mapping is evicted when the table is full), and
/// a periodic tick flushes mappings nobody has refreshed in a while.
pub mod table;

/// Addresses and tuning for an interface, plus the next hop decision the IP layer needs before it
/// hands a datagram to the outbound path.
pub mod config;

mod interface;
pub use self::interface::ArpInterface;

/// Receive side. Every frame the driver receives goes through `ArpInterface::input`: IPv4 frames
/// teach us the sender's mapping, ARP frames go to the handler, anything else is left alone.
mod inbound;
pub use self::inbound::Inbound;

/// ARP request/reply processing, including answering requests for our own address in place.
mod handler;

/// Send side. `ArpInterface::output` frames a datagram for its next hop, or, when the next hop is
/// unknown, replaces the datagram with an ARP request and leaves retransmission to the upper layer.
mod outbound;
pub use self::outbound::Outbound;

/// Exclusive access to an interface shared between contexts.
pub mod shared;

/// The periodic tick that ages out stale mappings, run as a tokio task.
pub mod aging;

/// Pipeline glue: `Processor`s for the receive and send paths.
pub mod processor;

/// Classifiers, used on the receive side to sort frames by ether type.
pub mod classifier;
