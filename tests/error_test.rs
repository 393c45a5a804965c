use std::io;

use storefront_pages::error::Error;

#[test]
fn test_error_conversion() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();

    match err {
        Error::IoError(_) => (),
        _ => panic!("Expected IoError variant"),
    }
}

#[test]
fn test_error_display() {
    let err = Error::ConfigError("invalid config".to_string());
    assert_eq!(err.to_string(), "Configuration error: invalid config.");

    let err = Error::ContentFetchError {
        source_name: "https://cms.example.com/data.json".to_string(),
        message: "connection refused".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Failed to fetch content data from https://cms.example.com/data.json: connection refused."
    );

    let err = Error::IncludeCollision {
        name: "header".to_string(),
        first: "a/header.html".to_string(),
        second: "b/header.html".to_string(),
    };
    assert_eq!(
        err.to_string(),
        "Include 'header' is defined by both 'a/header.html' and 'b/header.html'."
    );
}
