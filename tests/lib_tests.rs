use clap::Parser;
use dirsum::engine::{
    Cli, DigestUnit, LogRecord, ProgressKey, UnitError, digest_equals, hash_bytes, hash_file,
    is_hex_digest, is_hidden_name, load_expected_digests, load_progress, parse_line,
    build_opts, path_relative_to, path_to_log_string, should_include_in_walk,
};
use dirsum::utils::{apply_file_to_opts, parse_settings};
use dirsum::{Mode, Opts};
use std::path::{Path, PathBuf};

const MD5_HI: &str = "49f68a5c8493ec2c0bf489821c21fc3b";
const MD5_BYE: &str = "bfa99df33b137bc8fb5f5407d7e58da8";
const MD5_EMPTY: &str = "d41d8cd98f00b204e9800998ecf8427e";

// --- path helpers ---

#[test]
fn test_path_relative_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/foo/bar/baz/qux");
    assert_eq!(
        path_relative_to(&path, &base),
        Some(PathBuf::from("baz/qux"))
    );
}

#[test]
fn test_path_relative_not_under_base() {
    let base = PathBuf::from("/foo/bar");
    let path = PathBuf::from("/other/qux");
    assert_eq!(path_relative_to(&path, &base), None);
}

#[test]
fn test_path_to_log_string_keeps_forward_slashes() {
    assert_eq!(
        path_to_log_string(Path::new("src/main.rs")),
        Some("src/main.rs".to_string())
    );
}

#[cfg(unix)]
#[test]
fn test_path_to_log_string_keeps_backslash_in_unix_name() {
    assert_eq!(
        path_to_log_string(Path::new("a\\b.txt")),
        Some("a\\b.txt".to_string())
    );
}

#[cfg(windows)]
#[test]
fn test_path_to_log_string_normalizes_backslashes() {
    assert_eq!(
        path_to_log_string(Path::new("src\\main.rs")),
        Some("src/main.rs".to_string())
    );
}

#[test]
fn test_path_to_log_string_rejects_line_breaks() {
    assert_eq!(path_to_log_string(Path::new("two\nlines.txt")), None);
    assert_eq!(path_to_log_string(Path::new("cr\r.txt")), None);
}

#[cfg(unix)]
#[test]
fn test_path_to_log_string_rejects_non_utf8() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;
    let name = OsStr::from_bytes(b"bad\xffname.txt");
    assert_eq!(path_to_log_string(Path::new(name)), None);
}

#[test]
fn test_is_hidden_name() {
    assert!(is_hidden_name(Path::new("/foo/.git")));
    assert!(is_hidden_name(Path::new(".env")));
    assert!(!is_hidden_name(Path::new("/foo/bar.txt")));
    assert!(!is_hidden_name(Path::new("/foo/.hidden/visible.txt")));
}

#[test]
fn test_should_include_root_excluded() {
    let root = PathBuf::from("/foo");
    assert!(!should_include_in_walk(&root, &root, &None, false));
}

#[test]
fn test_should_include_output_log_skipped() {
    let root = PathBuf::from("/foo");
    let out = PathBuf::from("/foo/md5.txt");
    assert!(!should_include_in_walk(&out, &root, &Some(out.clone()), true));
}

#[test]
fn test_should_include_hidden_toggle() {
    let root = PathBuf::from("/foo");
    let path = PathBuf::from("/foo/.bashrc");
    assert!(!should_include_in_walk(&path, &root, &None, false));
    assert!(should_include_in_walk(&path, &root, &None, true));
}

// --- hashing ---

#[test]
fn test_hash_bytes_known_values() {
    assert_eq!(hash_bytes(b"hi"), MD5_HI);
    assert_eq!(hash_bytes(b"bye"), MD5_BYE);
    assert_eq!(hash_bytes(b""), MD5_EMPTY);
}

#[test]
fn test_hash_file_matches_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a.txt");
    std::fs::write(&p, b"hi").unwrap();
    assert_eq!(hash_file(&p).unwrap(), MD5_HI);

    let empty = dir.path().join("empty");
    std::fs::write(&empty, b"").unwrap();
    assert_eq!(hash_file(&empty).unwrap(), MD5_EMPTY);
}

#[test]
fn test_hash_file_spanning_read_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("big.bin");
    let data: Vec<u8> = (0..3 * 1024 * 1024 + 17).map(|i| (i % 251) as u8).collect();
    std::fs::write(&p, &data).unwrap();
    assert_eq!(hash_file(&p).unwrap(), hash_bytes(&data));
}

#[cfg(target_os = "linux")]
#[test]
fn test_hash_file_read_failure_is_unit_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = hash_file(dir.path()).unwrap_err();
    assert!(matches!(err, UnitError::Read(_)));
    assert!(err.to_string().starts_with("failed to read file: "));
}

#[test]
fn test_hash_file_missing_is_not_exist() {
    let dir = tempfile::tempdir().unwrap();
    let err = hash_file(&dir.path().join("nope")).unwrap_err();
    assert!(matches!(err, UnitError::NotExist));
}

#[test]
fn test_is_hex_digest() {
    assert!(is_hex_digest(MD5_HI));
    assert!(is_hex_digest(&MD5_HI.to_uppercase()));
    assert!(!is_hex_digest("not exist"));
    assert!(!is_hex_digest(&MD5_HI[..31]));
    assert!(!is_hex_digest("g9f68a5c8493ec2c0bf489821c21fc3b"));
}

#[test]
fn test_digest_equals_ignores_case() {
    assert!(digest_equals(MD5_HI, &MD5_HI.to_uppercase()));
    assert!(!digest_equals(MD5_HI, MD5_BYE));
}

// --- DigestUnit ---

#[test]
fn test_unit_generate_computes_digest() {
    let dir = tempfile::tempdir().unwrap();
    let p = dir.path().join("a.txt");
    std::fs::write(&p, b"hi").unwrap();
    let mut unit = DigestUnit::generate(p, "a.txt".to_string());
    unit.compute();
    assert!(unit.error.is_none());
    assert_eq!(unit.digest, MD5_HI);
    assert_eq!(unit.serialize(), format!("{MD5_HI}\ta.txt"));
}

#[test]
fn test_unit_generate_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut unit = DigestUnit::generate(dir.path().join("gone.txt"), "gone.txt".to_string());
    unit.compute();
    assert!(unit.is_failed());
    assert!(unit.digest.is_empty());
    assert_eq!(unit.serialize(), "gone.txt\tnot exist");
}

#[test]
fn test_unit_verify_ok_and_mismatch() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hi").unwrap();

    let mut good = DigestUnit::verify(dir.path(), "a.txt", MD5_HI);
    good.compute();
    assert_eq!(good.serialize(), "a.txt\tok");

    let mut bad = DigestUnit::verify(dir.path(), "a.txt", MD5_BYE);
    bad.compute();
    assert!(matches!(bad.error, Some(UnitError::Mismatch)));
    assert_eq!(bad.serialize(), "a.txt\tmismatch");
}

#[test]
fn test_unit_serialize_is_pure() {
    let unit = DigestUnit::verify(Path::new("/nowhere"), "x/y.txt", MD5_HI);
    assert_eq!(unit.serialize(), unit.serialize());
}

// --- log parsing ---

#[test]
fn test_parse_line_digest_record() {
    assert_eq!(
        parse_line(&format!("{MD5_HI}\tsub dir/a.txt\n")),
        Some(LogRecord::Digest {
            digest: MD5_HI.to_string(),
            path: "sub dir/a.txt".to_string()
        })
    );
}

#[test]
fn test_parse_line_strips_quotes_and_spaces() {
    assert_eq!(
        parse_line(&format!("  '{MD5_HI}   a.txt'  ")),
        Some(LogRecord::Digest {
            digest: MD5_HI.to_string(),
            path: "a.txt".to_string()
        })
    );
}

#[test]
fn test_parse_line_status_records() {
    assert_eq!(
        parse_line("a.txt\tok"),
        Some(LogRecord::Verified {
            path: "a.txt".to_string()
        })
    );
    assert_eq!(
        parse_line("a.txt\tfailed to open file: permission denied"),
        Some(LogRecord::Failed {
            path: "a.txt".to_string(),
            reason: "failed to open file: permission denied".to_string()
        })
    );
}

#[test]
fn test_parse_line_keeps_trailing_space_in_path() {
    assert_eq!(
        parse_line(&format!("{MD5_HI}\tx \n")),
        Some(LogRecord::Digest {
            digest: MD5_HI.to_string(),
            path: "x ".to_string()
        })
    );
    assert_eq!(
        parse_line(&format!("{MD5_HI}\t'quoted' \r\n")),
        Some(LogRecord::Digest {
            digest: MD5_HI.to_string(),
            path: "'quoted' ".to_string()
        })
    );
}

#[test]
fn test_parse_line_status_splits_at_last_tab() {
    assert_eq!(
        parse_line("a\tb\tnot exist"),
        Some(LogRecord::Failed {
            path: "a\tb".to_string(),
            reason: "not exist".to_string()
        })
    );
    assert_eq!(
        parse_line("a\tb\tok\n"),
        Some(LogRecord::Verified {
            path: "a\tb".to_string()
        })
    );
    assert_eq!(
        parse_line(&format!("{MD5_HI}\ta\tb")),
        Some(LogRecord::Digest {
            digest: MD5_HI.to_string(),
            path: "a\tb".to_string()
        })
    );
}

#[test]
fn test_parse_line_malformed() {
    assert_eq!(parse_line(""), None);
    assert_eq!(parse_line("   "), None);
    assert_eq!(parse_line("onlyonefield"), None);
    assert_eq!(parse_line("'\t'"), None);
}

#[test]
fn test_load_progress_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(load_progress(&dir.path().join("none.txt"), ProgressKey::Path).is_empty());
}

#[test]
fn test_load_progress_keys() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("md5.txt");
    std::fs::write(
        &log,
        format!("{MD5_HI}\ta.txt\n{MD5_BYE}\tb.txt\nc.txt\tnot exist\ngarbage\n\nd.txt\tok\n"),
    )
    .unwrap();

    let by_path = load_progress(&log, ProgressKey::Path);
    assert_eq!(by_path.len(), 4);
    assert_eq!(by_path["a.txt"], MD5_HI);
    assert_eq!(by_path["c.txt"], "not exist");
    assert_eq!(by_path["d.txt"], "ok");

    let by_digest = load_progress(&log, ProgressKey::Digest);
    assert_eq!(by_digest.len(), 2);
    assert_eq!(by_digest[MD5_BYE], "b.txt");

    let expected = load_expected_digests(&log);
    assert_eq!(expected.len(), 2);
    assert_eq!(expected["a.txt"], MD5_HI);
}

#[test]
fn test_load_expected_digests_keeps_identical_content() {
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("md5.txt");
    std::fs::write(&log, format!("{MD5_HI}\ta.txt\n{MD5_HI}\tcopy/a.txt\n")).unwrap();
    let expected = load_expected_digests(&log);
    assert_eq!(expected.len(), 2);
    assert_eq!(load_progress(&log, ProgressKey::Digest).len(), 1);
}

// --- settings file ---

#[test]
fn test_settings_apply_only_present_fields() {
    let file = parse_settings(
        r#"
[settings]
threads = 3
hidden = true
"#,
    )
    .unwrap();
    let mut opts = Opts {
        resume: true,
        ..Opts::default()
    };
    apply_file_to_opts(&file, &mut opts);
    assert_eq!(opts.num_threads, Some(3));
    assert!(opts.include_hidden);
    assert!(opts.resume);
    assert!(opts.output.is_none());
}

#[test]
fn test_settings_invalid_toml() {
    assert!(parse_settings("[settings]\nthreads = \"many\"").is_err());
}

#[test]
fn test_opts_mode_and_output() {
    let mut opts = Opts::default();
    assert_eq!(opts.mode(), Mode::Generate);
    opts.output = Some(PathBuf::new());
    assert!(opts.output_path().is_none());
    opts.check = Some(PathBuf::from("md5.txt"));
    assert_eq!(opts.mode(), Mode::Verify);
}

// --- option layering ---

fn cli(args: &[&str]) -> Cli {
    Cli::parse_from(std::iter::once("dirsum").chain(args.iter().copied()))
}

#[test]
fn test_build_opts_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let opts = build_opts(&cli(&["-i", root]));
    assert_eq!(opts.root, dir.path());
    assert!(opts.output.is_none());
    assert!(opts.num_threads.is_none());
    assert!(!opts.resume);
    assert!(!opts.include_hidden);
    assert!(opts.show_progress);
    assert_eq!(opts.mode(), Mode::Generate);
}

#[test]
fn test_build_opts_settings_file_then_cli() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(".dirsum.toml"),
        r#"
[settings]
output = "sums.txt"
threads = 3
resume = true
hidden = true
"#,
    )
    .unwrap();
    let root = dir.path().to_str().unwrap();

    let from_file = build_opts(&cli(&["-i", root]));
    assert_eq!(from_file.num_threads, Some(3));
    assert!(from_file.resume);
    assert!(from_file.include_hidden);
    assert_eq!(from_file.output, Some(dir.path().join("sums.txt")));

    let overridden = build_opts(&cli(&[
        "-i",
        root,
        "--resume=false",
        "-t",
        "7",
        "-o",
        "elsewhere.txt",
        "-q",
    ]));
    assert_eq!(overridden.num_threads, Some(7));
    assert!(!overridden.resume);
    assert!(overridden.include_hidden);
    assert_eq!(overridden.output, Some(PathBuf::from("elsewhere.txt")));
    assert!(!overridden.show_progress);
}

#[test]
fn test_build_opts_file_root_reads_settings_beside_it() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("a.txt"), b"hi").unwrap();
    std::fs::write(
        dir.path().join(".dirsum.toml"),
        "[settings]\noutput = \"sums.txt\"\n",
    )
    .unwrap();
    let file = dir.path().join("a.txt");
    let opts = build_opts(&cli(&["-i", file.to_str().unwrap(), "-c", "old.txt"]));
    assert_eq!(opts.output, Some(dir.path().join("sums.txt")));
    assert_eq!(opts.mode(), Mode::Verify);
}
