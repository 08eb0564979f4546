use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::Deserialize;

use super::KindParseError;

/// A small integer identifying an address family of [`Endpoint`][crate::Endpoint]s.
///
/// Kinds order numerically, and this order is the primary key when comparing endpoints. All
/// IPv4 endpoints therefore sort before all IPv6 endpoints, which sort before all MAC endpoints,
/// and so on.
///
/// # Textual Representation
///
/// Built-in kinds are displayed by name (for example `TCP`), all other kinds by their decimal
/// id. Parsing accepts either form, and names are matched case-insensitively.
///
/// ```
/// # use packet_endpoint::EndpointKind;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// assert_eq!(EndpointKind::TCP_PORT, "tcp".parse()?);
/// assert_eq!(EndpointKind::new(42), "42".parse()?);
/// assert_eq!(EndpointKind::IPV6.to_string(), "IPv6");
/// # Ok(())
/// # }
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
#[repr(transparent)]
pub struct EndpointKind(u16);

impl EndpointKind {
    /// Reserved kind of the invalid endpoint, ordered before every other kind.
    pub const INVALID: Self = Self(0);
    /// IPv4 addresses, 4 bytes.
    pub const IPV4: Self = Self(1);
    /// IPv6 addresses, 16 bytes.
    pub const IPV6: Self = Self(2);
    /// MAC (hardware) addresses, normally 6 bytes.
    pub const MAC: Self = Self(3);
    /// TCP ports, 2 bytes big-endian.
    pub const TCP_PORT: Self = Self(4);
    /// UDP ports, 2 bytes big-endian.
    pub const UDP_PORT: Self = Self(5);
    /// SCTP ports, 2 bytes big-endian.
    pub const SCTP_PORT: Self = Self(6);
    /// RUDP ports, a single byte.
    pub const RUDP_PORT: Self = Self(7);
    /// UDP-Lite ports, 2 bytes big-endian.
    pub const UDPLITE_PORT: Self = Self(8);
    /// The far side of a PPP point-to-point link, no payload.
    pub const PPP: Self = Self(9);

    pub(crate) const BUILTINS: [(Self, &'static str); 10] = [
        (Self::INVALID, "Invalid"),
        (Self::IPV4, "IPv4"),
        (Self::IPV6, "IPv6"),
        (Self::MAC, "MAC"),
        (Self::TCP_PORT, "TCP"),
        (Self::UDP_PORT, "UDP"),
        (Self::SCTP_PORT, "SCTP"),
        (Self::RUDP_PORT, "RUDP"),
        (Self::UDPLITE_PORT, "UDPLite"),
        (Self::PPP, "PPP"),
    ];

    /// Creates a kind from its numeric id.
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Returns the numeric id of the kind.
    pub const fn to_u16(&self) -> u16 {
        self.0
    }

    /// Returns true if the kind is part of the built-in catalog, including [`Self::INVALID`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use packet_endpoint::EndpointKind;
    /// assert!(EndpointKind::PPP.is_builtin());
    /// assert!(!EndpointKind::new(100).is_builtin());
    /// ```
    pub const fn is_builtin(&self) -> bool {
        self.0 <= Self::PPP.0
    }

    /// Returns true if endpoints of this kind carry a transport-layer port.
    pub const fn is_port(&self) -> bool {
        matches!(
            *self,
            Self::TCP_PORT | Self::UDP_PORT | Self::SCTP_PORT | Self::RUDP_PORT | Self::UDPLITE_PORT
        )
    }

    /// Returns the catalog name of a built-in kind.
    pub fn builtin_name(&self) -> Option<&'static str> {
        Self::BUILTINS
            .iter()
            .find(|(kind, _)| kind == self)
            .map(|(_, name)| *name)
    }
}

impl Display for EndpointKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.0),
        }
    }
}

impl FromStr for EndpointKind {
    type Err = KindParseError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        if let Ok(id) = u16::from_str(string) {
            return Ok(Self(id));
        }

        Self::BUILTINS
            .iter()
            .find(|(_, name)| name.eq_ignore_ascii_case(string))
            .map(|(kind, _)| *kind)
            .ok_or_else(|| KindParseError(string.into()))
    }
}

impl TryFrom<String> for EndpointKind {
    type Error = KindParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_str(&value)
    }
}

impl From<u16> for EndpointKind {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<EndpointKind> for u16 {
    fn from(value: EndpointKind) -> Self {
        value.to_u16()
    }
}
