fn main() {
    // ESP-IDF build-environment plumbing is only needed when building the
    // on-target binary; host-side test builds skip it entirely.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
