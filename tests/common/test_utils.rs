use poem_probe::config::ProbeConfig;
use serde_json::{Value, json};

/// Create a test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str) -> ProbeConfig {
    ProbeConfig {
        base_url: base_url.to_string(),
        health_timeout_secs: 2,
        generate_timeout_secs: 5,
        ..ProbeConfig::default()
    }
}

/// A base URL on a local port nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{}/api", port)
}

pub fn success_body(theme: &str, style: &str, mood: &str, poem: &str) -> Value {
    json!({
        "success": true,
        "theme": theme,
        "style": style,
        "mood": mood,
        "poem": poem,
        "metadata": {"model": "test-model", "lines": poem.lines().count()}
    })
}

pub fn health_body() -> Value {
    json!({"message": "Hello World"})
}

pub const HAIKU: &str = "Waves fold into foam\nthe tide keeps its quiet count\nshells hum in the sand";
