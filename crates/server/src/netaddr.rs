use std::net::Ipv4Addr;

use if_addrs::IfAddr;

/// Fallback host when no routable interface address is available.
const FALLBACK_HOST: &str = "localhost";

/// Return a LAN-reachable host string for building absolute download URLs.
///
/// Picks the first non-loopback IPv4 address the interface enumeration
/// yields, falling back to `"localhost"` when none qualifies (or when
/// enumeration itself fails). Interface ordering is platform-dependent, so
/// with several eligible addresses the choice is arbitrary but always
/// eligible.
pub fn lan_host() -> String {
    let interfaces = if_addrs::get_if_addrs().unwrap_or_default();
    pick_host(interfaces.into_iter().filter_map(|iface| match iface.addr {
        IfAddr::V4(v4) => Some(v4.ip),
        IfAddr::V6(_) => None,
    }))
}

fn pick_host<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Ipv4Addr>,
{
    candidates
        .into_iter()
        .find(|ip| !ip.is_loopback())
        .map_or_else(|| FALLBACK_HOST.to_owned(), |ip| ip.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_candidates_falls_back_to_localhost() {
        assert_eq!(pick_host(std::iter::empty()), "localhost");
    }

    #[test]
    fn loopback_only_falls_back_to_localhost() {
        assert_eq!(pick_host([Ipv4Addr::LOCALHOST]), "localhost");
    }

    #[test]
    fn first_routable_address_wins() {
        let picked = pick_host([
            Ipv4Addr::LOCALHOST,
            Ipv4Addr::new(192, 168, 1, 7),
            Ipv4Addr::new(10, 0, 0, 2),
        ]);
        assert_eq!(picked, "192.168.1.7");
    }

    #[test]
    fn lan_host_is_an_eligible_address_or_the_fallback() {
        // Environment-dependent: assert only the contract, not a specific
        // interface.
        let host = lan_host();
        if host != "localhost" {
            let ip: Ipv4Addr = host.parse().expect("host should be an IPv4 address");
            assert!(!ip.is_loopback());
        }
    }
}
