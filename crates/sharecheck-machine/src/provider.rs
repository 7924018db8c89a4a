//! Virtualization backends that can host a machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sharecheck_common::error::SharecheckError;

/// The hypervisor a machine runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VmType {
    /// QEMU, the default on Linux.
    #[default]
    Qemu,
    /// Apple Virtualization framework.
    AppleHv,
    /// libkrun on macOS.
    LibKrun,
    /// Microsoft Hyper-V.
    HyperV,
    /// Windows Subsystem for Linux.
    Wsl,
}

impl VmType {
    /// Every backend, in lookup order.
    pub const ALL: [Self; 5] = [Self::Qemu, Self::AppleHv, Self::LibKrun, Self::HyperV, Self::Wsl];

    /// Whether the backend exposes every host drive to the machine on its
    /// own. Share checks are meaningless for such backends.
    pub const fn auto_shares_all_paths(self) -> bool {
        matches!(self, Self::Wsl)
    }

    /// Name of the backend's directory in the machine store.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Qemu => "qemu",
            Self::AppleHv => "applehv",
            Self::LibKrun => "libkrun",
            Self::HyperV => "hyperv",
            Self::Wsl => "wsl",
        }
    }
}

impl fmt::Display for VmType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for VmType {
    type Err = SharecheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| SharecheckError::Config {
                message: format!("unknown VM type: {s}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_wsl_auto_shares() {
        let auto: Vec<_> = VmType::ALL
            .into_iter()
            .filter(|t| t.auto_shares_all_paths())
            .collect();
        assert_eq!(auto, vec![VmType::Wsl]);
    }

    #[test]
    fn names_round_trip_through_from_str() {
        for t in VmType::ALL {
            assert_eq!(t.to_string().parse::<VmType>().unwrap(), t);
        }
        assert_eq!("AppleHV".parse::<VmType>().unwrap(), VmType::AppleHv);
        assert!("virtualbox".parse::<VmType>().is_err());
    }

    #[test]
    fn display_honors_table_padding() {
        assert_eq!(format!("{:<8}|", VmType::Qemu), "qemu    |");
    }

    #[test]
    fn serde_names_match_store_directories() {
        for t in VmType::ALL {
            let json = serde_json::to_string(&t).unwrap();
            assert_eq!(json, format!("\"{}\"", t.as_str()));
        }
    }
}
