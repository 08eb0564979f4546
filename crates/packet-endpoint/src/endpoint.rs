//! The [`Endpoint`] value: one side of a communication, as a kind and raw address bytes.

use std::{
    cmp::Ordering,
    fmt::{self, Debug, Display, Formatter},
    hash::{Hash, Hasher},
    net::{IpAddr, Ipv4Addr, Ipv6Addr},
    sync::OnceLock,
};

use bytes::Bytes;

use crate::{
    kind::{global, EndpointKind, Registry},
    utils::to_hex,
};

/// An immutable address of some [`EndpointKind`], such as an IP address, a MAC address or a
/// transport port.
///
/// Endpoints compare by kind first, then by payload length, then by payload bytes. Endpoints of
/// different kinds are never equal, and every IPv4 endpoint sorts before every IPv6 endpoint.
/// This makes it cheap to put the two endpoints of an undirected flow in a canonical order.
///
/// The display string is produced by the kind's renderer on first use and cached, see
/// [`Endpoint::render`]. Neither equality nor ordering depend on it.
///
/// # Examples
///
/// ```
/// # use std::net::Ipv4Addr;
/// # use packet_endpoint::Endpoint;
/// let client = Endpoint::from(Ipv4Addr::new(10, 0, 0, 7));
/// let server = Endpoint::ip(&[10, 0, 0, 1]);
///
/// assert!(server < client);
/// assert_eq!(server.to_string(), "10.0.0.1");
/// assert!(Endpoint::ip(&[1, 2, 3, 4, 5]) == Endpoint::invalid());
/// ```
#[derive(Clone)]
pub struct Endpoint {
    kind: EndpointKind,
    raw: Bytes,
    rendered: OnceLock<String>,
}

impl Endpoint {
    const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

    /// Creates an endpoint of the given kind from a copy of the raw bytes.
    pub fn new(kind: EndpointKind, raw: &[u8]) -> Self {
        Self::from_bytes(kind, Bytes::copy_from_slice(raw))
    }

    /// Creates an endpoint of the given kind, taking ownership of the buffer.
    ///
    /// [`Bytes`] is immutable, so the payload cannot change after construction even if the
    /// buffer is shared.
    pub fn from_bytes(kind: EndpointKind, raw: Bytes) -> Self {
        Self {
            kind,
            raw,
            rendered: OnceLock::new(),
        }
    }

    /// Returns the invalid endpoint.
    ///
    /// It is returned by constructors that cannot produce a meaningful endpoint. It has the
    /// reserved [`EndpointKind::INVALID`] and an empty payload, and sorts before all other
    /// endpoints.
    pub fn invalid() -> Self {
        Self::from_bytes(EndpointKind::INVALID, Bytes::new())
    }

    /// Creates an IPv4 or IPv6 endpoint from an address in network byte order.
    ///
    /// The address length selects the kind: 4 bytes give [`EndpointKind::IPV4`] and 16 bytes
    /// give [`EndpointKind::IPV6`]. Any other length gives [`Endpoint::invalid`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::{Endpoint, EndpointKind};
    /// assert_eq!(Endpoint::ip(&[127, 0, 0, 1]).kind(), EndpointKind::IPV4);
    /// assert_eq!(Endpoint::ip(&[0; 16]).kind(), EndpointKind::IPV6);
    /// assert!(!Endpoint::ip(&[0; 5]).is_valid());
    /// ```
    pub fn ip(address: &[u8]) -> Self {
        match address.len() {
            4 => Self::new(EndpointKind::IPV4, address),
            16 => Self::new(EndpointKind::IPV6, address),
            _ => Self::invalid(),
        }
    }

    /// Creates a MAC endpoint from a hardware address.
    ///
    /// The length is not checked. Addresses other than 6 bytes long are kept as they are and
    /// rendered as colon-separated hex of whatever length.
    pub fn mac(address: &[u8]) -> Self {
        Self::new(EndpointKind::MAC, address)
    }

    fn port16(kind: EndpointKind, port: u16) -> Self {
        Self::new(kind, &port.to_be_bytes())
    }

    /// Creates a TCP port endpoint.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::Endpoint;
    /// let http = Endpoint::tcp_port(80);
    /// assert_eq!(http.raw(), &[0, 80]);
    /// assert_eq!(http.to_string(), "80");
    /// ```
    pub fn tcp_port(port: u16) -> Self {
        Self::port16(EndpointKind::TCP_PORT, port)
    }

    /// Creates a UDP port endpoint.
    pub fn udp_port(port: u16) -> Self {
        Self::port16(EndpointKind::UDP_PORT, port)
    }

    /// Creates an SCTP port endpoint.
    pub fn sctp_port(port: u16) -> Self {
        Self::port16(EndpointKind::SCTP_PORT, port)
    }

    /// Creates a UDP-Lite port endpoint.
    pub fn udplite_port(port: u16) -> Self {
        Self::port16(EndpointKind::UDPLITE_PORT, port)
    }

    /// Creates an RUDP port endpoint.
    ///
    /// RUDP endpoints hold a single byte, so only the low 8 bits of the port are kept.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::Endpoint;
    /// assert_eq!(Endpoint::rudp_port(300).to_string(), "44");
    /// ```
    pub fn rudp_port(port: u16) -> Self {
        Self::new(EndpointKind::RUDP_PORT, &[port as u8])
    }

    /// Returns the endpoint for the far side of a PPP link.
    ///
    /// PPP links have exactly two sides, so the endpoint carries no payload.
    pub fn ppp() -> Self {
        Self::from_bytes(EndpointKind::PPP, Bytes::new())
    }

    /// Returns the kind of the endpoint.
    pub fn kind(&self) -> EndpointKind {
        self.kind
    }

    /// Returns the raw payload of the endpoint.
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Returns the length of the raw payload.
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns true if the raw payload is empty.
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns false for endpoints of the reserved invalid kind.
    pub fn is_valid(&self) -> bool {
        self.kind != EndpointKind::INVALID
    }

    /// Returns the IP address of an IPv4 or IPv6 endpoint.
    ///
    /// Returns `None` for other kinds, or if the payload has the wrong length for its kind.
    pub fn ip_addr(&self) -> Option<IpAddr> {
        match self.kind {
            EndpointKind::IPV4 => <[u8; 4]>::try_from(self.raw()).ok().map(IpAddr::from),
            EndpointKind::IPV6 => <[u8; 16]>::try_from(self.raw()).ok().map(IpAddr::from),
            _ => None,
        }
    }

    /// Returns the port number of a transport port endpoint.
    ///
    /// Returns `None` for other kinds, or if the payload has the wrong length for its kind.
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::Endpoint;
    /// assert_eq!(Endpoint::udp_port(53).port(), Some(53));
    /// assert_eq!(Endpoint::rudp_port(0x1ff).port(), Some(0xff));
    /// assert_eq!(Endpoint::ppp().port(), None);
    /// ```
    pub fn port(&self) -> Option<u16> {
        match (self.kind, self.raw()) {
            (EndpointKind::RUDP_PORT, [port]) => Some(u16::from(*port)),
            (EndpointKind::RUDP_PORT, _) => None,
            (kind, &[high, low]) if kind.is_port() => Some(u16::from_be_bytes([high, low])),
            _ => None,
        }
    }

    /// Returns true if the endpoint sorts strictly before the other.
    ///
    /// This is the same as `self < other`.
    pub fn less_than(&self, other: &Self) -> bool {
        self < other
    }

    /// Returns a 64-bit FNV-1a hash of the kind and payload.
    ///
    /// Unlike [`Hash`], the result does not depend on a hasher and is stable across processes
    /// and platforms, which makes it suitable for sharding flows between workers.
    pub fn fast_hash(&self) -> u64 {
        self.kind
            .to_u16()
            .to_be_bytes()
            .iter()
            .chain(self.raw.iter())
            .fold(Self::FNV_OFFSET_BASIS, |hash, byte| {
                (hash ^ u64::from(*byte)).wrapping_mul(Self::FNV_PRIME)
            })
    }

    /// Returns the display string of the endpoint, rendering it with the registry on first use.
    ///
    /// The string is cached on the endpoint, and later calls return it without consulting any
    /// registry. Kinds missing from the registry are rendered as their id and the payload in
    /// hex. Rendering never fails.
    ///
    /// Concurrent first calls from several threads all observe the same, complete string.
    pub fn render(&self, registry: &Registry) -> &str {
        self.rendered.get_or_init(|| registry.render(self.kind, &self.raw))
    }

    /// Returns the display string of the endpoint, rendered with the [global] registry.
    pub fn as_str(&self) -> &str {
        self.render(global())
    }
}

impl PartialEq for Endpoint {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw == other.raw
    }
}

impl Eq for Endpoint {}

impl Hash for Endpoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind.hash(state);
        self.raw.hash(state);
    }
}

impl Ord for Endpoint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .cmp(&other.kind)
            .then_with(|| self.raw.len().cmp(&other.raw.len()))
            .then_with(|| self.raw().cmp(other.raw()))
    }
}

impl PartialOrd for Endpoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Debug for Endpoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("kind", &format_args!("{}", self.kind))
            .field("raw", &format_args!("{}", to_hex(&self.raw)))
            .finish()
    }
}

impl AsRef<[u8]> for Endpoint {
    fn as_ref(&self) -> &[u8] {
        self.raw()
    }
}

impl From<Ipv4Addr> for Endpoint {
    fn from(value: Ipv4Addr) -> Self {
        Self::new(EndpointKind::IPV4, &value.octets())
    }
}

impl From<Ipv6Addr> for Endpoint {
    fn from(value: Ipv6Addr) -> Self {
        Self::new(EndpointKind::IPV6, &value.octets())
    }
}

impl From<IpAddr> for Endpoint {
    fn from(value: IpAddr) -> Self {
        match value {
            IpAddr::V4(address) => address.into(),
            IpAddr::V6(address) => address.into(),
        }
    }
}
