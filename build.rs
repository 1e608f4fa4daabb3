fn main() {
    println!("cargo:rerun-if-changed=src/logger.c");

    // The FMI 1.0 and 2.0 logger callbacks are C-variadic, so the forwarding shims live in C.
    if std::env::var_os("CARGO_FEATURE_FMI1").is_some()
        || std::env::var_os("CARGO_FEATURE_FMI2").is_some()
    {
        let mut build = cc::Build::new();
        build.file("src/logger.c");
        if std::env::var_os("CARGO_FEATURE_FMI1").is_some() {
            build.define("FMI_LOGGER_FMI1", None);
        }
        if std::env::var_os("CARGO_FEATURE_FMI2").is_some() {
            build.define("FMI_LOGGER_FMI2", None);
        }
        build.compile("fmi_logger");
    }
}
