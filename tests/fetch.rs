mod support;

use std::fs;

use assert_matches::assert_matches;

use bbc_sfx_fetch::error::{ErrorKind, SfxError};
use bbc_sfx_fetch::fetch::FetchUnit;

use support::{MockDownloader, utf8_root, work_item, zip_bytes};

#[test]
fn extracts_audio_member_to_destination() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let item = work_item(&root, 0, "NHU05094029.wav");
    let archive = zip_bytes(&[
        ("readme.txt", b"notes"),
        ("NHU05094029.wav", b"RIFF-first"),
        ("second.wav", b"RIFF-second"),
    ]);
    let unit = FetchUnit::new(MockDownloader::default().with_archive(&item.url, archive));

    let outcome = unit.process(&item);

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert_eq!(outcome.destination, item.destination);
    assert_eq!(fs::read(item.destination.as_std_path()).unwrap(), b"RIFF-first");
}

#[test]
fn matches_audio_suffix_case_insensitively() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let item = work_item(&root, 0, "B.wav");
    let archive = zip_bytes(&[("nested/TAKE_01.WAV", b"upper")]);
    let unit = FetchUnit::new(MockDownloader::default().with_archive(&item.url, archive));

    let outcome = unit.process(&item);

    assert!(outcome.is_success(), "{:?}", outcome.error());
    assert_eq!(fs::read(item.destination.as_std_path()).unwrap(), b"upper");
    assert!(!root.join("nested").as_std_path().exists());
}

#[test]
fn archive_without_audio_member_fails() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let item = work_item(&root, 0, "C.wav");
    let archive = zip_bytes(&[("C.mp3", b"mpeg"), ("cover.jpg", b"jpeg")]);
    let unit = FetchUnit::new(MockDownloader::default().with_archive(&item.url, archive));

    let outcome = unit.process(&item);

    assert!(!outcome.is_success());
    assert_matches!(outcome.error(), Some(SfxError::NoAudioMember));
    assert_eq!(outcome.error().map(SfxError::kind), Some(ErrorKind::Archive));
    assert!(!item.destination.as_std_path().exists());
}

#[test]
fn unreadable_archive_fails() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let item = work_item(&root, 0, "D.wav");
    let unit = FetchUnit::new(
        MockDownloader::default().with_archive(&item.url, b"<html>not a zip</html>".to_vec()),
    );

    let outcome = unit.process(&item);

    assert_matches!(outcome.error(), Some(SfxError::Archive(_)));
    assert!(!item.destination.as_std_path().exists());
}

#[test]
fn missing_remote_is_a_network_failure() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let item = work_item(&root, 3, "E.wav");
    let unit = FetchUnit::new(MockDownloader::default());

    let outcome = unit.process(&item);

    assert_eq!(outcome.index, 3);
    assert_matches!(outcome.error(), Some(SfxError::HttpStatus { status: 404, .. }));
    assert!(!item.destination.as_std_path().exists());
}

#[test]
fn leaves_no_scratch_files_behind() {
    let temp = tempfile::tempdir().unwrap();
    let root = utf8_root(&temp);
    let ok = work_item(&root, 0, "F.wav");
    let bad = work_item(&root, 1, "G.wav");
    let unit = FetchUnit::new(
        MockDownloader::default()
            .with_archive(&ok.url, zip_bytes(&[("F.wav", b"f")]))
            .with_archive(&bad.url, zip_bytes(&[("G.txt", b"g")])),
    );

    assert!(unit.process(&ok).is_success());
    assert!(!unit.process(&bad).is_success());

    let names = fs::read_dir(root.as_std_path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["F.wav".to_string()]);
}
