//! Common test utilities and helpers

use rawhttp::HttpAdapter;
use tracing_subscriber::EnvFilter;

/// Install a test log subscriber, honoring `RUST_LOG`
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Create an adapter with logging enabled
#[allow(dead_code)]
pub fn adapter() -> HttpAdapter {
    init_tracing();
    HttpAdapter::new().expect("Failed to create adapter")
}

/// A local address nothing is listening on
#[allow(dead_code)]
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/unreachable", port)
}
