use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use storefront_pages::cli::Args;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("storefront")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let args = make_args(&["./shop", "--env", "development"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.project_dir, PathBuf::from("./shop"));
    assert_eq!(parsed.env.as_deref(), Some("development"));
    assert!(!parsed.render);
    assert!(!parsed.verbose);
    assert!(parsed.cms_url.is_none());
    assert!(parsed.slugs_file.is_none());
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--env",
        "production",
        "--cms-file",
        "content.json",
        "--slugs-url",
        "https://api.example.com/slugs.json",
        "--config-out",
        "build.json",
        "--render",
        "--verbose",
        "./shop",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert_eq!(parsed.env.as_deref(), Some("production"));
    assert_eq!(parsed.cms_file, Some(PathBuf::from("content.json")));
    assert_eq!(parsed.slugs_url.as_deref(), Some("https://api.example.com/slugs.json"));
    assert_eq!(parsed.config_out, Some(PathBuf::from("build.json")));
    assert!(parsed.render);
    assert!(parsed.verbose);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-r", "-v", "./shop"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.render);
    assert!(parsed.verbose);
}

#[test]
fn test_conflicting_content_sources() {
    let args = make_args(&[
        "--cms-url",
        "https://cms.example.com",
        "--cms-file",
        "content.json",
        "./shop",
    ]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_missing_args() {
    let args = make_args(&[]);
    assert!(Args::try_parse_from(args).is_err());
}

#[test]
fn test_too_many_args() {
    let args = make_args(&["./shop", "extra"]);
    assert!(Args::try_parse_from(args).is_err());
}
