//! Trusted Board Boot extension set.
//!
//! Object identifiers live under the `1.3.6.1.4.1.4128.2100` arc. Counters
//! are `INTEGER`s; image hashes and public keys are `OCTET STRING`s.

use crate::registry::{ExtensionDefinition, ValueKind};

/// Trusted firmware non-volatile counter.
pub const TRUSTED_FW_NVCOUNTER: &str = "1.3.6.1.4.1.4128.2100.1";
/// Non-trusted firmware non-volatile counter.
pub const NON_TRUSTED_FW_NVCOUNTER: &str = "1.3.6.1.4.1.4128.2100.2";
/// Trusted Boot Firmware (BL2) hash.
pub const TRUSTED_BOOT_FW_HASH: &str = "1.3.6.1.4.1.4128.2100.201";
/// Trusted world public key.
pub const TRUSTED_WORLD_PK: &str = "1.3.6.1.4.1.4128.2100.301";
/// Non-trusted world public key.
pub const NON_TRUSTED_WORLD_PK: &str = "1.3.6.1.4.1.4128.2100.302";
/// SCP firmware content certificate public key.
pub const SCP_FW_CONTENT_CERT_PK: &str = "1.3.6.1.4.1.4128.2100.401";
/// SCP firmware (SCP_BL2) hash.
pub const SCP_FW_HASH: &str = "1.3.6.1.4.1.4128.2100.402";
/// SoC firmware content certificate public key.
pub const SOC_FW_CONTENT_CERT_PK: &str = "1.3.6.1.4.1.4128.2100.501";
/// SoC AP firmware (BL31) hash.
pub const SOC_AP_FW_HASH: &str = "1.3.6.1.4.1.4128.2100.502";
/// Trusted OS firmware content certificate public key.
pub const TRUSTED_OS_FW_CONTENT_CERT_PK: &str = "1.3.6.1.4.1.4128.2100.601";
/// Trusted OS firmware (BL32) hash.
pub const TRUSTED_OS_FW_HASH: &str = "1.3.6.1.4.1.4128.2100.602";
/// Non-trusted firmware content certificate public key.
pub const NON_TRUSTED_FW_CONTENT_CERT_PK: &str = "1.3.6.1.4.1.4128.2100.701";
/// Non-trusted world bootloader (BL33) hash.
pub const NON_TRUSTED_WORLD_BOOTLOADER_HASH: &str = "1.3.6.1.4.1.4128.2100.702";

/// Definitions of the Trusted Board Boot extensions, sentinel-terminated.
pub const EXTENSIONS: &[ExtensionDefinition] = &[
    ExtensionDefinition::new(
        TRUSTED_FW_NVCOUNTER,
        "TrustedNvCounter",
        "Non-volatile trusted counter",
        ValueKind::Integer,
    ),
    ExtensionDefinition::new(
        NON_TRUSTED_FW_NVCOUNTER,
        "NonTrustedNvCounter",
        "Non-volatile non-trusted counter",
        ValueKind::Integer,
    ),
    ExtensionDefinition::new(
        TRUSTED_BOOT_FW_HASH,
        "TrustedBootFirmwareHash",
        "Trusted Boot Firmware (BL2) hash (SHA256)",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        TRUSTED_WORLD_PK,
        "TrustedWorldPublicKey",
        "Trusted World Public Key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        NON_TRUSTED_WORLD_PK,
        "NonTrustedWorldPublicKey",
        "Non-Trusted World Public Key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        SCP_FW_CONTENT_CERT_PK,
        "SCPFirmwareContentCertPK",
        "SCP Firmware content certificate public key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        SCP_FW_HASH,
        "SCPFirmwareHash",
        "SCP Firmware (SCP_BL2) hash (SHA256)",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        SOC_FW_CONTENT_CERT_PK,
        "SoCFirmwareContentCertPK",
        "SoC Firmware content certificate public key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        SOC_AP_FW_HASH,
        "SoCAPFirmwareHash",
        "SoC AP Firmware (BL31) hash (SHA256)",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        TRUSTED_OS_FW_CONTENT_CERT_PK,
        "TrustedOSFirmwareContentCertPK",
        "Trusted OS Firmware content certificate public key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        TRUSTED_OS_FW_HASH,
        "TrustedOSHash",
        "Trusted OS (BL32) hash (SHA256)",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        NON_TRUSTED_FW_CONTENT_CERT_PK,
        "NonTrustedFirmwareContentCertPK",
        "Non-Trusted Firmware content certificate public key",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::new(
        NON_TRUSTED_WORLD_BOOTLOADER_HASH,
        "NonTrustedWorldBootloaderHash",
        "Non-Trusted World (BL33) hash (SHA256)",
        ValueKind::OctetString,
    ),
    ExtensionDefinition::sentinel(),
];
