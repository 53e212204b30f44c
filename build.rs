use std::env;

const DEFAULT_MAJOR: &str = "7";
const DEFAULT_QUANTUM_DEPTH: &str = "16";

fn main() {
    println!("cargo:rerun-if-env-changed=MAGICKCORE_LIB");
    println!("cargo:rerun-if-env-changed=MAGICKCORE_LIB_DIR");
    println!("cargo:rerun-if-env-changed=MAGICKCORE_MAJOR");
    println!("cargo:rerun-if-env-changed=MAGICKCORE_QUANTUM_DEPTH");
    println!("cargo:rerun-if-env-changed=MAGICKCORE_HDRI_ENABLE");
    println!("cargo:rerun-if-env-changed=MAGICKCORE_STATIC");

    // Nothing to link unless the FFI provider is compiled in
    if env::var_os("CARGO_FEATURE_MAGICKCORE").is_none() {
        return;
    }

    if let Ok(dir) = env::var("MAGICKCORE_LIB_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    }

    let name = env::var("MAGICKCORE_LIB").unwrap_or_else(|_| default_library_name());
    let kind = match env::var("MAGICKCORE_STATIC").as_deref() {
        Ok("1") | Ok("true") => "static",
        _ => "dylib",
    };
    println!("cargo:rustc-link-lib={kind}={name}");

    // Static MagickCore pulls in pthread and libm on Linux
    if kind == "static" && env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("linux") {
        println!("cargo:rustc-link-lib=pthread");
        println!("cargo:rustc-link-lib=m");
    }
}

/// MagickCore-<major>.Q<depth>[HDRI], the naming used by ImageMagick packages.
fn default_library_name() -> String {
    let major = env::var("MAGICKCORE_MAJOR").unwrap_or_else(|_| DEFAULT_MAJOR.to_string());
    let depth = env::var("MAGICKCORE_QUANTUM_DEPTH")
        .unwrap_or_else(|_| DEFAULT_QUANTUM_DEPTH.to_string());
    if !matches!(depth.as_str(), "8" | "16" | "32") {
        panic!("MAGICKCORE_QUANTUM_DEPTH must be 8, 16 or 32, got {depth}");
    }
    let hdri = !matches!(
        env::var("MAGICKCORE_HDRI_ENABLE").as_deref(),
        Ok("0") | Ok("false")
    );
    let suffix = if hdri { "HDRI" } else { "" };
    format!("MagickCore-{major}.Q{depth}{suffix}")
}
