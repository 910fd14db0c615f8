fn main() {
    // Tauri-generated build configuration; only the desktop shell needs it.
    #[cfg(feature = "desktop")]
    tauri_build::build();
}
