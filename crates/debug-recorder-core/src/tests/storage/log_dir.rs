use crate::{LogDirNamer, RecorderError, create_log_dir};

use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use tempfile::TempDir;

#[allow(clippy::unwrap_used)]
fn at(h: u32, m: u32, s: u32, ms: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .unwrap()
        .and_hms_milli_opt(h, m, s, ms)
        .unwrap()
}

/// WHAT: Minted paths follow {root}/debug/logs/{appId}_{versionCode}_{timestamp}
/// WHY: External tooling locates recordings by this layout
#[test]
fn given_namer_when_minting_then_layout_and_name_match() {
    // Given: A namer for com.example.app build 42
    let namer = LogDirNamer::new("/cache", "com.example.app", 42);

    // When: Minting at a fixed time
    let path = namer.mint_at(at(7, 5, 3, 9));

    // Then: Directory layout and zero-padded timestamp match the pattern
    assert_eq!(
        path,
        std::path::Path::new("/cache/debug/logs/com.example.app_42_2024-03-09_07-05-03-009")
    );
}

/// WHAT: A minted name parses back to its timestamp
/// WHY: Recordings must be sortable and dateable by name alone
#[test]
#[allow(clippy::unwrap_used)]
fn given_minted_name_when_parsing_then_timestamp_recovered() {
    // Given: A name minted at a known millisecond
    let namer = LogDirNamer::new("/cache", "com.example.app", 42);
    let when = at(23, 59, 59, 999);
    let path = namer.mint_at(when);
    let name = path.file_name().unwrap().to_str().unwrap();

    // When: Parsing the name
    let parsed = namer.parse_timestamp(name);

    // Then: The exact timestamp is recovered; foreign names are rejected
    assert_eq!(parsed, Some(when));
    assert_eq!(namer.parse_timestamp("other.app_42_2024-03-09_07-05-03-009"), None);
}

/// WHAT: Timestamps never go backwards within one namer
/// WHY: Names must stay monotonically non-decreasing across Starts
#[test]
#[allow(clippy::unwrap_used)]
fn given_clock_moving_backwards_when_minting_then_timestamps_non_decreasing() {
    // Given: A namer that already minted at 12:00:00.500
    let namer = LogDirNamer::new("/cache", "com.example.app", 42);
    let first = namer.mint_at(at(12, 0, 0, 500));

    // When: The clock jumps back a minute, then forward again
    let second = namer.mint_at(at(11, 59, 0, 0));
    let third = namer.mint_at(at(12, 0, 1, 0));

    // Then: The second mint is clamped, the third advances
    let ts = |p: &std::path::Path| {
        namer
            .parse_timestamp(p.file_name().unwrap().to_str().unwrap())
            .unwrap()
    };
    assert_eq!(ts(&second), ts(&first));
    assert!(ts(&third) > ts(&second));
    assert_eq!(ts(&third) - ts(&first), ChronoDuration::milliseconds(500));
}

/// WHAT: Repeated real-clock mints are parseable and ordered
/// WHY: Names must be usable as a chronological sort key
#[test]
#[allow(clippy::unwrap_used)]
fn given_repeated_mints_when_parsing_then_non_decreasing() {
    // Given: A namer on the live clock
    let namer = LogDirNamer::new("/cache", "com.example.app", 42);

    // When: Minting several names in a row
    let stamps: Vec<_> = (0..5)
        .map(|_| {
            let path = namer.mint();
            namer
                .parse_timestamp(path.file_name().unwrap().to_str().unwrap())
                .unwrap()
        })
        .collect();

    // Then: Every timestamp is >= its predecessor
    assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
}

/// WHAT: Recording directories are created world-readable and writable
/// WHY: External tools must be able to pull the logs
#[cfg(unix)]
#[test]
#[allow(clippy::unwrap_used)]
fn given_new_dir_when_creating_then_permissions_relaxed() {
    use std::os::unix::fs::PermissionsExt;

    // Given: A nested directory path that does not exist
    let root = TempDir::new().unwrap();
    let path = root.path().join("debug").join("logs").join("run");

    // When: Creating it
    create_log_dir(&path).unwrap();

    // Then: It exists with mode 0777
    let mode = std::fs::metadata(&path).unwrap().permissions().mode();
    assert!(path.is_dir());
    assert_eq!(mode & 0o777, 0o777);
}

/// WHAT: Creation under a regular file fails with DirectoryCreation
/// WHY: Directory creation failure is fatal to the Start transition
#[test]
#[allow(clippy::unwrap_used)]
fn given_parent_is_file_when_creating_then_directory_creation_error() {
    // Given: A path whose parent is a regular file
    let root = TempDir::new().unwrap();
    let blocker = root.path().join("cache");
    std::fs::write(&blocker, b"file").unwrap();

    // When: Creating a directory below it
    let result = create_log_dir(&blocker.join("debug"));

    // Then: DirectoryCreation error
    assert!(matches!(
        result,
        Err(RecorderError::DirectoryCreation { .. })
    ));
}
