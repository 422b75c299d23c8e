// Integration tests module

mod integration {
    mod config_test;
    mod fallback_test;
    mod render_test;
}
