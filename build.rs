use std::env;

fn main() {
    // Window title depends on the profile so dev and release builds are easy to tell apart.
    let profile = env::var("PROFILE").unwrap_or_else(|_| "debug".to_string());
    let app_name = if profile == "release" {
        "Lazy Research"
    } else {
        "Lazy Research (Dev)"
    };
    println!("cargo:rustc-env=APP_NAME={app_name}");
    println!("cargo:rerun-if-changed=build.rs");
}
