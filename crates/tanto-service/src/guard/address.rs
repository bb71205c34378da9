use std::net::IpAddr;

/// ## Summary
/// Allocation-free cache key for a client address.
///
/// IPv4 addresses (including IPv4-mapped IPv6) occupy the low half; IPv6
/// addresses use both halves. The all-zero key means "address unknown" and
/// disables per-address banning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AddressKey {
    hi: u64,
    lo: u64,
}

impl AddressKey {
    pub const UNKNOWN: Self = Self { hi: 0, lo: 0 };

    #[must_use]
    pub const fn is_unknown(self) -> bool {
        self.hi == 0 && self.lo == 0
    }

    #[must_use]
    pub fn from_ip(ip: Option<IpAddr>) -> Self {
        ip.map_or(Self::UNKNOWN, Self::from)
    }
}

impl From<IpAddr> for AddressKey {
    fn from(ip: IpAddr) -> Self {
        match ip.to_canonical() {
            IpAddr::V4(v4) => Self {
                hi: 0,
                lo: u64::from(u32::from(v4)),
            },
            IpAddr::V6(v6) => {
                let bits = u128::from(v6);
                Self {
                    hi: u64::try_from(bits >> 64).unwrap_or_default(),
                    lo: u64::try_from(bits & u128::from(u64::MAX)).unwrap_or_default(),
                }
            }
        }
    }
}
