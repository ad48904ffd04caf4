fn main() {
    // The ESP-IDF environment is only needed for the device binary; host
    // builds (tests, fuzzing) compile the pure-logic library alone.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
