/// Intercept messages using the `log` crate and print them to STDERR. Defaults to `info`, but
/// `RUST_LOG` overrides that.
pub fn setup() {
    use env_logger::{Builder, Env};
    // Tests may call this more than once
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .try_init();
}
