use std::env;

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=BLASPROBE_CBLAS_LIB");
    println!("cargo:rerun-if-env-changed=BLASPROBE_CBLAS_DIR");

    // Only link a system CBLAS when the reference backend is compiled in.
    if env::var_os("CARGO_FEATURE_CBLAS").is_none() {
        return;
    }

    if let Ok(dir) = env::var("BLASPROBE_CBLAS_DIR") {
        println!("cargo:rustc-link-search=native={dir}");
    } else {
        println!("cargo:rustc-link-search=/usr/lib/x86_64-linux-gnu");
        println!("cargo:rustc-link-search=/usr/lib64");
        println!("cargo:rustc-link-search=/usr/local/lib");
    }

    let lib = env::var("BLASPROBE_CBLAS_LIB").unwrap_or_else(|_| "cblas".to_string());
    println!("cargo:rustc-link-lib={lib}");
}
