use std::env;
use std::error::Error;
use std::fs;
use std::path::PathBuf;

use vo_abi_build::intrin_shim::{self, ShimVariant};
use vo_abi_build::version::{HostVersion, ENC_ACCESSOR_SINCE, TYPED_DATA_SINCE, VERSION_ENV};

/// Forces the manual bit-masking encoding path even on hosts that have
/// the convenience accessor. Used to exercise the fallback for parity.
const FORCE_ENC_FALLBACK_ENV: &str = "VO_ABI_FORCE_ENCODING_FALLBACK";

fn main() -> Result<(), Box<dyn Error>> {
    println!("cargo:rerun-if-env-changed={VERSION_ENV}");
    println!("cargo:rerun-if-env-changed={FORCE_ENC_FALLBACK_ENV}");
    println!("cargo:rustc-check-cfg=cfg(abi_has_typed_data)");
    println!("cargo:rustc-check-cfg=cfg(abi_has_enc_accessor)");

    // Hard build failure on a malformed or unsupported version; the
    // bundled version is assumed when the variable is absent.
    let version = HostVersion::from_env()?;

    if version >= TYPED_DATA_SINCE {
        println!("cargo:rustc-cfg=abi_has_typed_data");
    }

    let force_fallback = env::var_os(FORCE_ENC_FALLBACK_ENV).is_some();
    if version >= ENC_ACCESSOR_SINCE && !force_fallback {
        println!("cargo:rustc-cfg=abi_has_enc_accessor");
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR")?);
    fs::write(
        out_dir.join("host_version.rs"),
        format!(
            "/// Host API version this build is configured against.\n\
             pub const HOST_VERSION: (u32, u32) = ({}, {});\n",
            version.major(),
            version.minor()
        ),
    )?;

    // The intrinsic-suppression prelude only matters on Windows
    // toolchains; downstream native builds pick the path up through the
    // links metadata.
    if env::var_os("CARGO_CFG_WINDOWS").is_some() {
        let prelude = intrin_shim::write_prelude(&out_dir, ShimVariant::Guarded)?;
        println!("cargo:intrin-prelude={}", prelude.display());
    }

    Ok(())
}
