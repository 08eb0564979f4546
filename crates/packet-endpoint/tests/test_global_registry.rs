use std::{sync::OnceLock, thread};

use packet_endpoint::{
    global, install, Endpoint, EndpointKind, InstallError, KindMetadata, Registry,
};

const VXLAN_VNI: EndpointKind = EndpointKind::new(1000);

/// Builds the registry the way an application would at start-up and installs it once for the
/// whole test binary.
fn installed() -> &'static Registry {
    static INSTALLED: OnceLock<&'static Registry> = OnceLock::new();

    INSTALLED.get_or_init(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let mut registry = Registry::with_builtins();
        registry.register(
            VXLAN_VNI,
            KindMetadata::new("VNI", |raw: &[u8]| match raw {
                [a, b, c] => u32::from_be_bytes([0, *a, *b, *c]).to_string(),
                _ => "?".to_string(),
            }),
        );
        install(registry).expect("no registry installed yet")
    })
}

#[test]
fn display_uses_installed_registry() {
    installed();

    assert_eq!(Endpoint::new(VXLAN_VNI, &[0, 0x10, 0x01]).to_string(), "4097");
    assert_eq!(Endpoint::tcp_port(443).to_string(), "443");
}

#[test]
fn global_returns_installed_registry() {
    let registry = installed();

    assert!(std::ptr::eq(registry, global()));
    assert_eq!(global().name(VXLAN_VNI), Some("VNI"));
}

#[test]
fn second_install_is_rejected() {
    installed();

    assert_eq!(
        install(Registry::with_builtins()).map(|_| ()),
        Err(InstallError)
    );
    assert_eq!(global().name(VXLAN_VNI), Some("VNI"));
}

#[test]
fn unknown_kinds_still_render() {
    installed();

    let endpoint = Endpoint::new(EndpointKind::new(1001), &[0x0a, 0x0b]);
    assert_eq!(endpoint.as_str(), "1001:0a0b");
}

#[test]
fn renders_from_many_threads() {
    installed();

    let endpoints: Vec<_> = (0..=u8::MAX)
        .map(|last| Endpoint::ip(&[192, 168, 0, last]))
        .collect();

    thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for (last, endpoint) in endpoints.iter().enumerate() {
                    assert_eq!(endpoint.to_string(), format!("192.168.0.{last}"));
                }
            });
        }
    });
}
