use std::{
    fmt::Write,
    net::{Ipv4Addr, Ipv6Addr},
};

use super::EndpointKind;
use crate::utils::{to_hex, write_hex};

/// Converts the raw payload of an endpoint into its human-readable form.
///
/// Renderers are called from logging and display paths and must produce a string for payloads
/// of any length, including empty ones, without panicking.
///
/// Any `Fn(&[u8]) -> String` closure that is `Send + Sync` is a renderer:
///
/// ```
/// # use packet_endpoint::Render;
/// let renderer = |raw: &[u8]| format!("{} bytes", raw.len());
/// assert_eq!(renderer.render(&[1, 2, 3]), "3 bytes");
/// ```
pub trait Render: Send + Sync {
    /// Returns the display string for the raw payload.
    fn render(&self, raw: &[u8]) -> String;
}

impl<F> Render for F
where
    F: Fn(&[u8]) -> String + Send + Sync,
{
    fn render(&self, raw: &[u8]) -> String {
        self(raw)
    }
}

/// Renderers for the built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BuiltinRenderer {
    Invalid,
    /// Dotted decimal for 4 bytes, colon-hex for 16 bytes.
    Ip,
    Mac,
    /// Big-endian 16-bit port.
    Port16,
    /// Single byte port.
    Port8,
    Point,
}

impl BuiltinRenderer {
    pub(crate) fn for_kind(kind: EndpointKind) -> Option<Self> {
        let renderer = match kind {
            EndpointKind::INVALID => Self::Invalid,
            EndpointKind::IPV4 | EndpointKind::IPV6 => Self::Ip,
            EndpointKind::MAC => Self::Mac,
            EndpointKind::RUDP_PORT => Self::Port8,
            EndpointKind::PPP => Self::Point,
            kind if kind.is_port() => Self::Port16,
            _ => return None,
        };
        Some(renderer)
    }

    fn render_ip(raw: &[u8]) -> String {
        if let Ok(octets) = <[u8; 4]>::try_from(raw) {
            Ipv4Addr::from(octets).to_string()
        } else if let Ok(octets) = <[u8; 16]>::try_from(raw) {
            Ipv6Addr::from(octets).to_string()
        } else {
            malformed(raw)
        }
    }

    fn render_mac(raw: &[u8]) -> String {
        let mut out = String::with_capacity(raw.len() * 3);
        for (index, byte) in raw.iter().enumerate() {
            let separator = if index == 0 { "" } else { ":" };
            // Writing to a String cannot fail
            let _ = write!(out, "{}{:02x}", separator, byte);
        }
        out
    }

    fn render_port16(raw: &[u8]) -> String {
        match <[u8; 2]>::try_from(raw) {
            Ok(port) => u16::from_be_bytes(port).to_string(),
            Err(_) => malformed(raw),
        }
    }

    fn render_port8(raw: &[u8]) -> String {
        match raw {
            [port] => port.to_string(),
            _ => malformed(raw),
        }
    }
}

impl Render for BuiltinRenderer {
    fn render(&self, raw: &[u8]) -> String {
        match self {
            Self::Invalid => "invalid".to_string(),
            Self::Ip => Self::render_ip(raw),
            Self::Mac => Self::render_mac(raw),
            Self::Port16 => Self::render_port16(raw),
            Self::Port8 => Self::render_port8(raw),
            Self::Point => "point".to_string(),
        }
    }
}

/// Form used by built-in renderers for payloads of the wrong length.
fn malformed(raw: &[u8]) -> String {
    let mut out = String::from("?");
    let _ = write_hex(&mut out, raw);
    out
}

/// Form used for endpoints whose kind is not registered.
pub(crate) fn fallback(kind: EndpointKind, raw: &[u8]) -> String {
    format!("{}:{}", kind.to_u16(), to_hex(raw))
}
