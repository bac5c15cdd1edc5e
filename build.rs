use std::env;
use std::path::Path;

// FFmpeg discovery hints for Windows builds. ffmpeg-sys-next resolves the
// libraries itself; this only surfaces the common misconfiguration early.
fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");
    println!("cargo:rerun-if-env-changed=VCPKGRS_DYNAMIC");

    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows")
        || env::var_os("FFMPEG_DIR").is_some()
    {
        return;
    }

    let Ok(vcpkg_root) = env::var("VCPKG_ROOT") else {
        println!(
            "cargo:warning=FFMPEG_DIR is not set; on Windows, install FFmpeg via vcpkg and point FFMPEG_DIR at the install."
        );
        return;
    };

    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    let install = Path::new(&vcpkg_root).join("installed").join(triplet);
    if install.exists() {
        println!(
            "cargo:warning=Found a vcpkg install at {}; set FFMPEG_DIR to it so ffmpeg-sys-next uses it explicitly.",
            install.display(),
        );
    } else {
        println!(
            "cargo:warning=VCPKG_ROOT is set but {} does not exist; FFmpeg may not be installed.",
            install.display(),
        );
    }
}
