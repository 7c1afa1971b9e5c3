use std::{
    fs,
    path::{Path, PathBuf},
};

pub fn fixture_path(relative: impl AsRef<Path>) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(relative)
}

pub fn read_fixture(relative: impl AsRef<Path>) -> String {
    fs::read_to_string(fixture_path(relative)).expect("fixture file should be readable")
}

#[allow(dead_code)]
pub fn edgar() -> edgar_digest::Edgar {
    edgar_digest::Edgar::new("edgar-digest-tests (+example@example.com)").unwrap()
}

/// Client pointed at a closed local port, so every request fails fast.
#[allow(dead_code)]
pub fn offline_edgar() -> edgar_digest::Edgar {
    let urls = edgar_digest::EdgarUrls {
        archives: "http://127.0.0.1:9/Archives/edgar".to_string(),
        data: "http://127.0.0.1:9".to_string(),
        files: "http://127.0.0.1:9/files".to_string(),
    };
    edgar_digest::Edgar::with_config(edgar_digest::EdgarConfig::new(
        "edgar-digest-tests (+example@example.com)",
        10,
        std::time::Duration::from_secs(2),
        Some(urls),
    ))
    .unwrap()
}
