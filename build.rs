fn main() {
    // esp-idf link args are only meaningful when building the firmware image.
    // Host-target builds (unit and integration tests) skip them entirely.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
